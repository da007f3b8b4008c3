use std::io::Write;

use crate::detection::domain::completeness_evaluator::CompletenessVerdict;
use crate::notification::domain::messages::{failure_message, verdict_message, BUSY_MESSAGE};
use crate::notification::domain::notifier::Notifier;

/// Output style for [`ConsoleNotifier`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConsoleFormat {
    #[default]
    Message,
    Json,
}

/// Writes outcomes to a terminal-like sink, one line each.
///
/// The busy line is written to `status` so that `out` only ever carries the
/// final result.
pub struct ConsoleNotifier<W: Write + Send, S: Write + Send> {
    out: W,
    status: S,
    format: ConsoleFormat,
    busy: bool,
}

impl<W: Write + Send, S: Write + Send> ConsoleNotifier<W, S> {
    pub fn new(out: W, status: S, format: ConsoleFormat) -> Self {
        Self {
            out,
            status,
            format,
            busy: false,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn into_inner(self) -> (W, S) {
        (self.out, self.status)
    }

    fn write_result(&mut self, line: &str) {
        write_line(&mut self.out, line, "result");
    }
}

fn write_line(sink: &mut impl Write, line: &str, what: &str) {
    if let Err(e) = writeln!(sink, "{line}") {
        log::warn!("Failed to write {what}: {e}");
    }
}

impl<W: Write + Send, S: Write + Send> Notifier for ConsoleNotifier<W, S> {
    fn set_busy(&mut self, busy: bool) {
        if busy && !self.busy {
            write_line(&mut self.status, BUSY_MESSAGE, "status");
        }
        self.busy = busy;
    }

    fn verdict(&mut self, verdict: &CompletenessVerdict) {
        let line = match self.format {
            ConsoleFormat::Message => verdict_message(verdict),
            ConsoleFormat::Json => match serde_json::to_string(verdict) {
                Ok(json) => json,
                Err(e) => {
                    log::warn!("Failed to serialize verdict: {e}");
                    verdict_message(verdict)
                }
            },
        };
        self.write_result(&line);
    }

    fn failure(&mut self, error: &dyn std::error::Error) {
        let line = match self.format {
            ConsoleFormat::Message => failure_message(error),
            ConsoleFormat::Json => serde_json::json!({ "error": error.to_string() }).to_string(),
        };
        self.write_result(&line);
    }
}
