//! Failure taxonomy
//!
//! [`Failure`] is everything that travels through a FailureSink; its
//! `Display` output is the message the sink receives (before coloring).
//! [`UsageError`] never reaches a sink: it is raised as a panic.

use std::fmt;
use std::rc::Rc;

use thiserror::Error;

use crate::comparator::{Finding, Verb};
use crate::operand::Operand;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum Failure {
    #[error("type mismatch between operands; cannot compare {left} with {right}")]
    TypeMismatch { left: Rc<str>, right: Rc<str> },

    #[error("wrong error type provided; expected an error value but got {found}")]
    WrongKind { found: Rc<str> },

    #[error("expected no error, but got: {message}")]
    UnexpectedError { message: Rc<str> },

    #[error("{}", assertion_message(.verb, .finding))]
    Assertion { verb: Verb, finding: Finding },
}

impl Failure {
    /// Short label for log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Failure::TypeMismatch { .. } => "type-mismatch",
            Failure::WrongKind { .. } => "wrong-kind",
            Failure::UnexpectedError { .. } => "unexpected-error",
            Failure::Assertion { .. } => "assertion",
        }
    }
}

fn assertion_message(verb: &Verb, finding: &Finding) -> String {
    match (verb, finding) {
        (Verb::Equals, Finding::Values { left, right }) => {
            format!("expected: {} to equal: {}", left, right)
        }
        (Verb::NotEquals, Finding::Values { left, right }) => {
            format!("expected: {} to not equal: {}", left, right)
        }
        (Verb::Equals, Finding::Messages { left, right }) => {
            format!("expected error: \"{}\" but got: \"{}\"", left, right)
        }
        (Verb::NotEquals, Finding::Messages { left, right }) => {
            format!("expected error: \"{}\" to not equal error: \"{}\"", left, right)
        }
        (Verb::Equals, Finding::Field { record, field, left, right }) => format!(
            "expected {}.{} to equal {} but got {}",
            record,
            field,
            FieldValue(right.as_ref()),
            left
        ),
        (Verb::NotEquals, Finding::Field { record, field, left, right }) => format!(
            "expected {}.{} to not equal {} but got {}",
            record,
            field,
            FieldValue(right.as_ref()),
            left
        ),
    }
}

// Right-hand field that may be absent from a runtime record.
struct FieldValue<'a>(Option<&'a Operand>);

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(value) => write!(f, "{}", value),
            None => write!(f, "<missing>"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error(
        "a FailureSink must be bound before using Spec (use Spec::new(sink) or Spec::for_test())"
    )]
    MissingSink,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("{type_name} record takes {expected} field values, got {found}")]
    Arity {
        type_name: String,
        expected: usize,
        found: usize,
    },
}
