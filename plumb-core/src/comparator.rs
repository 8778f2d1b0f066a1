// Comparison engine
//
// Classifies an operand pair and applies the matching equality rule.
// Classification order is fixed: type mismatch, error pair, record pair,
// then plain value equality.

use std::rc::Rc;

use tracing::debug;

use crate::error::Failure;
use crate::operand::Operand;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OperandClass {
    TypeMismatch,
    ErrorPair,
    RecordPair,
    PrimitivePair,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verb {
    Equals,
    NotEquals,
}

impl Verb {
    // Whether an "are these equal" answer satisfies this verb
    fn holds(self, equal: bool) -> bool {
        match self {
            Verb::Equals => equal,
            Verb::NotEquals => !equal,
        }
    }
}

/// The part of an operand pair a verdict rests on.
#[derive(Clone, Debug, PartialEq)]
pub enum Finding {
    Values {
        left: Operand,
        right: Operand,
    },
    Messages {
        left: Rc<str>,
        right: Rc<str>,
    },
    // `right` is None when a runtime record lacks the left record's field
    Field {
        record: Rc<str>,
        field: Rc<str>,
        left: Operand,
        right: Option<Operand>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub enum Comparison {
    Equal,
    NotEqual(Finding),
}

impl Comparison {
    pub fn is_equal(&self) -> bool {
        matches!(self, Comparison::Equal)
    }
}

pub fn classify(left: &Operand, right: &Operand) -> OperandClass {
    if left.type_name() != right.type_name() {
        OperandClass::TypeMismatch
    } else if left.is_error() && right.is_error() {
        OperandClass::ErrorPair
    } else if left.is_record() && right.is_record() {
        OperandClass::RecordPair
    } else {
        OperandClass::PrimitivePair
    }
}

/// Plain equality answer for a same-typed pair, with the first difference.
///
/// Records report their first differing field in the left operand's order.
/// Fields are matched by name, so two records holding the same fields in a
/// different order are equal. Type mismatches are not a comparison outcome;
/// see [`evaluate`].
pub fn compare(left: &Operand, right: &Operand) -> Comparison {
    match classify(left, right) {
        OperandClass::ErrorPair => compare_messages(left, right),
        OperandClass::RecordPair => match walk_fields(Verb::Equals, left, right) {
            Some(finding) => Comparison::NotEqual(finding),
            None => compare_shapes(left, right),
        },
        OperandClass::TypeMismatch | OperandClass::PrimitivePair => compare_values(left, right),
    }
}

/// Apply `verb` to the pair, producing the failure to report if it does not hold.
pub fn evaluate(verb: Verb, left: &Operand, right: &Operand) -> Result<(), Failure> {
    let class = classify(left, right);
    debug!(
        ?verb,
        ?class,
        left = left.type_name(),
        right = right.type_name(),
        "comparing operands"
    );

    match class {
        // Reported for both verbs
        OperandClass::TypeMismatch => Err(Failure::TypeMismatch {
            left: left.type_name().into(),
            right: right.type_name().into(),
        }),
        OperandClass::ErrorPair => check(verb, compare(left, right), || Finding::Messages {
            left: message_of(left),
            right: message_of(right),
        }),
        OperandClass::RecordPair => {
            if let Some(finding) = walk_fields(verb, left, right) {
                return Err(Failure::Assertion { verb, finding });
            }
            // Every field passed; the whole-value rule still applies
            // (field-less records, extra fields on the right)
            check(verb, compare(left, right), || values(left, right))
        }
        OperandClass::PrimitivePair => check(verb, compare(left, right), || values(left, right)),
    }
}

/// Outcome of asserting that `value` carries no error.
pub fn evaluate_no_error(value: &Operand) -> Result<(), Failure> {
    match value {
        Operand::Null => Ok(()),
        Operand::Error { message, .. } => Err(Failure::UnexpectedError {
            message: message.clone(),
        }),
        other => Err(Failure::WrongKind {
            found: other.type_name().into(),
        }),
    }
}

fn check(
    verb: Verb,
    comparison: Comparison,
    equal_finding: impl FnOnce() -> Finding,
) -> Result<(), Failure> {
    if verb.holds(comparison.is_equal()) {
        return Ok(());
    }

    let finding = match comparison {
        Comparison::NotEqual(finding) => finding,
        Comparison::Equal => equal_finding(),
    };
    Err(Failure::Assertion { verb, finding })
}

fn compare_values(left: &Operand, right: &Operand) -> Comparison {
    if left == right {
        Comparison::Equal
    } else {
        Comparison::NotEqual(values(left, right))
    }
}

// Called once every left field has an equal counterpart on the right; the
// pair is equal unless the right record carries fields the left lacks
fn compare_shapes(left: &Operand, right: &Operand) -> Comparison {
    let width = |operand: &Operand| operand.fields().map_or(0, <[_]>::len);
    if width(left) == width(right) {
        Comparison::Equal
    } else {
        Comparison::NotEqual(values(left, right))
    }
}

// Message text is authoritative; identity and payload type are ignored
fn compare_messages(left: &Operand, right: &Operand) -> Comparison {
    let (left, right) = (message_of(left), message_of(right));
    if left == right {
        Comparison::Equal
    } else {
        Comparison::NotEqual(Finding::Messages { left, right })
    }
}

// RUST CONCEPT: Field walk in the left operand's declaration order
// Equals stops at the first field that differs; NotEquals stops at the
// first field that is equal, so a record passes NotEquals only when it
// differs in every field position.
fn walk_fields(verb: Verb, left: &Operand, right: &Operand) -> Option<Finding> {
    let fields = left.fields()?;

    fields.iter().find_map(|(name, value)| {
        let other = right.field(name);
        let equal = other == Some(value);

        if verb.holds(equal) {
            None
        } else {
            Some(Finding::Field {
                record: left.type_name().into(),
                field: name.clone(),
                left: value.clone(),
                right: other.cloned(),
            })
        }
    })
}

fn values(left: &Operand, right: &Operand) -> Finding {
    Finding::Values {
        left: left.clone(),
        right: right.clone(),
    }
}

fn message_of(operand: &Operand) -> Rc<str> {
    match operand {
        Operand::Error { message, .. } => message.clone(),
        other => other.to_string().into(),
    }
}
