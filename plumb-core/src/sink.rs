//! Failure sinks
//!
//! A [`FailureSink`] is the host test framework's half of the contract: it
//! receives each formatted failure message and decides what happens to the
//! running test. The engine requires nothing else from the host.

/// Receives formatted failure messages.
///
/// By host convention `report` fails the current test; the engine itself
/// carries on after calling it.
pub trait FailureSink {
    fn report(&mut self, message: &str);
}

impl<S: FailureSink + ?Sized> FailureSink for &mut S {
    fn report(&mut self, message: &str) {
        (**self).report(message)
    }
}

impl<S: FailureSink + ?Sized> FailureSink for Box<S> {
    fn report(&mut self, message: &str) {
        (**self).report(message)
    }
}

/// Fails the enclosing `#[test]` by panicking with the message.
#[derive(Clone, Copy, Debug, Default)]
pub struct PanicSink;

impl FailureSink for PanicSink {
    fn report(&mut self, message: &str) {
        panic!("{}", message);
    }
}

/// Substitute sink that keeps every message, for testing assertions themselves.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    messages: Vec<String>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn last(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl FailureSink for RecordingSink {
    fn report(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

/// Adapts a closure into a sink.
pub struct FnSink<F>(pub F);

impl<F: FnMut(&str)> FailureSink for FnSink<F> {
    fn report(&mut self, message: &str) {
        (self.0)(message)
    }
}
