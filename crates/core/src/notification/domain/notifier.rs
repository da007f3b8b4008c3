use crate::detection::domain::completeness_evaluator::CompletenessVerdict;

/// Renders check outcomes to the user.
///
/// The busy indicator is plain per-notifier state toggled by the caller
/// around the detection call.
pub trait Notifier: Send {
    /// Show or hide the "detection in progress" indicator.
    fn set_busy(&mut self, busy: bool);

    fn verdict(&mut self, verdict: &CompletenessVerdict);

    /// Report an upstream failure (image decoding or detection).
    fn failure(&mut self, error: &dyn std::error::Error);
}
