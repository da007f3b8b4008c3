pub mod console_notifier;
pub mod log_notifier;
