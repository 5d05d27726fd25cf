//! Progress events emitted while migrating.
//!
//! The engine reports through an injected [`EventSink`] so callers decide
//! how progress is presented.

/// Receiver for migration progress messages.
pub trait EventSink {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards events to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEvents;

impl EventSink for LogEvents {
    fn info(&self, message: &str) {
        log::info!("{message}");
    }

    fn warn(&self, message: &str) {
        log::warn!("{message}");
    }

    fn error(&self, message: &str) {
        log::error!("{message}");
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEvents;

impl EventSink for NoopEvents {
    fn info(&self, _message: &str) {}

    fn warn(&self, _message: &str) {}

    fn error(&self, _message: &str) {}
}
