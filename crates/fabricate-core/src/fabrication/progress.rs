//! Progress reporting contract between the fabricator and its caller

/// Consumer of per-artifact progress messages.
///
/// The fabricator invokes the sink synchronously, in step order, exactly once
/// per filesystem artifact it creates or modifies. Implementations must not
/// panic; a panicking sink aborts the run.
pub trait ProgressSink {
    fn report(&mut self, message: &str);
}

/// Any `FnMut(&str)` closure is a sink
impl<F: FnMut(&str)> ProgressSink for F {
    fn report(&mut self, message: &str) {
        self(message)
    }
}

/// Sink that collects messages, for tests and non-interactive callers
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub messages: Vec<String>,
}

impl ProgressSink for CollectingSink {
    fn report(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}
