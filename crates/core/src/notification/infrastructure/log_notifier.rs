use crate::detection::domain::completeness_evaluator::CompletenessVerdict;
use crate::notification::domain::messages::{failure_message, verdict_message, BUSY_MESSAGE};
use crate::notification::domain::notifier::Notifier;

/// Routes outcomes through the `log` facade.
///
/// Complete faces log at info, incomplete ones at warn, failures at error.
#[derive(Default)]
pub struct LogNotifier {
    busy: bool,
}

impl LogNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }
}

impl Notifier for LogNotifier {
    fn set_busy(&mut self, busy: bool) {
        if busy {
            log::info!("{BUSY_MESSAGE}");
        }
        self.busy = busy;
    }

    fn verdict(&mut self, verdict: &CompletenessVerdict) {
        if verdict.is_complete {
            log::info!("{}", verdict_message(verdict));
        } else {
            log::warn!("{}", verdict_message(verdict));
        }
    }

    fn failure(&mut self, error: &dyn std::error::Error) {
        log::error!("{}", failure_message(error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::completeness_evaluator::VerdictReason;

    #[test]
    fn test_tracks_busy_state() {
        let mut n = LogNotifier::new();
        assert!(!n.is_busy());
        n.set_busy(true);
        assert!(n.is_busy());
        n.set_busy(false);
        assert!(!n.is_busy());
    }

    #[test]
    fn test_verdict_and_failure_do_not_touch_busy() {
        let mut n = LogNotifier::new();
        n.set_busy(true);
        n.verdict(&CompletenessVerdict {
            is_complete: false,
            reason: VerdictReason::NoFaceDetected,
        });
        n.failure(&std::io::Error::new(std::io::ErrorKind::Other, "boom"));
        assert!(n.is_busy());
    }
}
