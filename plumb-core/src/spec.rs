// Assertion sessions
//
// A Spec owns the FailureSink, the stack output and the Config; each
// `expect` call opens an Expectation holding one captured left operand.

use tracing::{debug, warn};

use crate::comparator::{self, Verb};
use crate::config::{Config, Palette};
use crate::error::{Failure, UsageError};
use crate::operand::{ErrorLike, Operand};
use crate::output::Output;
use crate::sink::{FailureSink, PanicSink};
use crate::stack;
use crate::stdout_output::StdoutOutput;

pub struct Spec<'s> {
    sink: Option<Box<dyn FailureSink + 's>>,
    output: Box<dyn Output + 's>,
    config: Config,
}

/// An unbound Spec: any assertion on it panics with [`UsageError::MissingSink`].
impl Default for Spec<'_> {
    fn default() -> Self {
        Self::unbound(Config::default())
    }
}

impl Spec<'static> {
    /// Spec for a plain `#[test]`: failures panic, config comes from the environment.
    pub fn for_test() -> Self {
        Spec::with_config(PanicSink, Config::from_env())
    }
}

impl<'s> Spec<'s> {
    pub fn new(sink: impl FailureSink + 's) -> Self {
        Self::with_config(sink, Config::default())
    }

    pub fn with_config(sink: impl FailureSink + 's, config: Config) -> Self {
        let mut spec = Self::unbound(config);
        spec.bind(sink);
        spec
    }

    pub fn unbound(config: Config) -> Self {
        Self {
            sink: None,
            output: Box::new(StdoutOutput::new()),
            config,
        }
    }

    pub fn bind(&mut self, sink: impl FailureSink + 's) {
        self.sink = Some(Box::new(sink));
    }

    pub fn is_bound(&self) -> bool {
        self.sink.is_some()
    }

    /// Send stack renderings somewhere other than stdout.
    pub fn with_output(mut self, output: impl Output + 's) -> Self {
        self.output = Box::new(output);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Capture the left operand of an assertion.
    ///
    /// # Panics
    ///
    /// If no FailureSink is bound.
    #[must_use = "an expectation checks nothing until to_eq or to_not_eq is called"]
    pub fn expect(&mut self, value: impl Into<Operand>) -> Expectation<'_, 's> {
        self.ensure_bound();
        Expectation {
            spec: self,
            left: value.into(),
        }
    }

    /// Assert that `value` is the absence value.
    ///
    /// Any error-kind value fails; so does anything that is neither an error
    /// nor absent, with a distinct message.
    ///
    /// # Panics
    ///
    /// If no FailureSink is bound.
    pub fn expect_no_error(&mut self, value: impl Into<Operand>) {
        self.ensure_bound();
        let value = value.into();
        if let Err(failure) = comparator::evaluate_no_error(&value) {
            self.fail(failure);
        }
    }

    /// Assert that `result` is `Ok`, reporting the error text otherwise.
    pub fn expect_ok<T, E: ErrorLike>(&mut self, result: &Result<T, E>) {
        let operand = match result {
            Ok(_) => Operand::Null,
            Err(err) => Operand::error(err),
        };
        self.expect_no_error(operand);
    }

    // Stack first, then the sink; the sink may not return
    fn fail(&mut self, failure: Failure) {
        if self.config.print_stack {
            self.print_stack();
        }

        let message = self.config.palette.paint_error(&failure.to_string());
        debug!(kind = failure.kind(), len = message.len(), "reporting failure");

        let palette = self.config.palette;
        match self.sink.as_mut() {
            Some(sink) => sink.report(&message),
            None => usage_error(&palette),
        }
    }

    fn print_stack(&mut self) {
        let rendered = stack::render(&stack::capture(), &self.config.palette);
        let written = self
            .output
            .write(rendered.as_bytes())
            .and_then(|()| self.output.flush());

        if let Err(err) = written {
            warn!(error = %err, "failed to write stack rendering");
        }
    }

    fn ensure_bound(&self) {
        if self.sink.is_none() {
            usage_error(&self.config.palette);
        }
    }
}

fn usage_error(palette: &Palette) -> ! {
    panic!("{}", palette.paint_error(&UsageError::MissingSink.to_string()))
}

/// One captured left operand, consumed by chainable verbs.
pub struct Expectation<'a, 's> {
    spec: &'a mut Spec<'s>,
    left: Operand,
}

impl<'a, 's> Expectation<'a, 's> {
    pub fn operand(&self) -> &Operand {
        &self.left
    }

    /// Assert the captured operand equals `right`.
    pub fn to_eq(self, right: impl Into<Operand>) -> Self {
        self.verify(Verb::Equals, right.into())
    }

    /// Assert the captured operand does not equal `right`.
    ///
    /// For records this fails on the first field that is equal.
    pub fn to_not_eq(self, right: impl Into<Operand>) -> Self {
        self.verify(Verb::NotEquals, right.into())
    }

    fn verify(self, verb: Verb, right: Operand) -> Self {
        if let Err(failure) = comparator::evaluate(verb, &self.left, &right) {
            self.spec.fail(failure);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::BufferOutput;
    use crate::sink::RecordingSink;

    fn quiet() -> Config {
        Config::default()
            .with_palette(Palette::plain())
            .with_print_stack(false)
    }

    #[test]
    fn test_chained_verbs_share_left_operand() {
        let mut sink = RecordingSink::new();
        {
            let mut spec = Spec::with_config(&mut sink, quiet());
            let expectation = spec.expect(5).to_eq(5).to_not_eq(6).to_eq(7);
            assert_eq!(expectation.operand(), &Operand::Int32(5));
        }
        assert_eq!(sink.messages(), ["expected: 5 to equal: 7"]);
    }

    #[test]
    fn test_failure_does_not_stop_later_assertions() {
        let mut sink = RecordingSink::new();
        {
            let mut spec = Spec::with_config(&mut sink, quiet());
            spec.expect(1).to_eq(2);
            spec.expect("a").to_eq("b");
        }
        assert_eq!(sink.len(), 2);
        assert_eq!(sink.last(), Some("expected: \"a\" to equal: \"b\""));
    }

    #[test]
    fn test_message_is_painted() {
        let mut sink = RecordingSink::new();
        {
            let config = Config::default().with_print_stack(false);
            let mut spec = Spec::with_config(&mut sink, config);
            spec.expect(55).to_eq(65);
        }
        assert_eq!(sink.last(), Some("\x1b[31;1mexpected: 55 to equal: 65\x1b[0m"));
    }

    #[test]
    fn test_stack_written_only_on_failure() {
        let output = BufferOutput::new();
        let mut sink = RecordingSink::new();
        {
            let config = quiet().with_print_stack(true);
            let mut spec = Spec::with_config(&mut sink, config).with_output(output.clone());
            spec.expect(1).to_eq(1);
            assert!(output.is_empty());

            spec.expect(1).to_eq(2);
        }
        assert!(!output.is_empty());
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_config_is_kept() {
        let mut sink = RecordingSink::new();
        let spec = Spec::with_config(&mut sink, quiet());
        assert!(spec.config().palette.is_plain());
        assert!(!spec.config().print_stack);

        let spec = Spec::unbound(Config::default());
        assert!(spec.config().print_stack);
    }

    #[test]
    #[should_panic(expected = "a FailureSink must be bound")]
    fn test_expect_without_sink_panics() {
        let mut spec = Spec::default();
        let _ = spec.expect(1);
    }

    #[test]
    #[should_panic(expected = "a FailureSink must be bound")]
    fn test_expect_no_error_without_sink_panics() {
        let mut spec = Spec::unbound(quiet());
        spec.expect_no_error(None::<i32>);
    }

    #[test]
    fn test_bind_later() {
        let mut sink = RecordingSink::new();
        {
            let mut spec = Spec::unbound(quiet());
            assert!(!spec.is_bound());
            spec.bind(&mut sink);
            assert!(spec.is_bound());
            spec.expect_no_error(42);
        }
        assert_eq!(
            sink.last(),
            Some("wrong error type provided; expected an error value but got int32")
        );
    }
}
