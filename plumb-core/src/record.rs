// Record-kind operands
//
// A record is a named product type with labeled fields. Rust types opt in by
// implementing RecordLike (by hand or with the `record!` macro); records
// built at runtime go through RecordType, which checks arity the way a
// generated constructor would.

use std::rc::Rc;

use crate::error::RecordError;
use crate::operand::Operand;

pub trait RecordLike {
    /// Dynamic type used for the type-mismatch check.
    fn type_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Field names and values, in declaration order.
    fn fields(&self) -> Vec<(&str, Operand)>;
}

/// Implement [`RecordLike`] for a struct by listing the fields to compare.
///
/// Each listed field must be `Clone` and convert `Into<Operand>`.
///
/// ```
/// use plumb_core::{record, Operand};
///
/// #[derive(Clone)]
/// struct Person {
///     name: String,
///     age: u32,
/// }
///
/// record!(Person { name, age });
///
/// let bob = Operand::record(&Person { name: "bob".into(), age: 30 });
/// assert_eq!(bob.field("age"), Some(&Operand::UInt32(30)));
/// ```
#[macro_export]
macro_rules! record {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::RecordLike for $ty {
            fn fields(&self) -> ::std::vec::Vec<(&str, $crate::Operand)> {
                ::std::vec![
                    $((::core::stringify!($field), $crate::Operand::from(self.$field.clone()))),*
                ]
            }
        }
    };
}

// RUST CONCEPT: Record type descriptors
// Stores the type name and field names; instances are validated against it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordType {
    type_name: Rc<str>,
    field_names: Rc<Vec<Rc<str>>>,
}

impl RecordType {
    pub fn new<I, S>(type_name: &str, field_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            type_name: type_name.into(),
            field_names: Rc::new(
                field_names
                    .into_iter()
                    .map(|name| Rc::<str>::from(name.as_ref()))
                    .collect(),
            ),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.field_names.iter().map(|name| &**name)
    }

    /// Build a record operand from positional field values.
    pub fn instance<I>(&self, values: I) -> Result<Operand, RecordError>
    where
        I: IntoIterator,
        I::Item: Into<Operand>,
    {
        let values: Vec<Operand> = values.into_iter().map(Into::into).collect();

        if values.len() != self.field_names.len() {
            return Err(RecordError::Arity {
                type_name: self.type_name.to_string(),
                expected: self.field_names.len(),
                found: values.len(),
            });
        }

        let fields = self.field_names.iter().cloned().zip(values).collect();

        Ok(Operand::Record {
            type_name: self.type_name.clone(),
            fields: Rc::new(fields),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Person {
        name: String,
        age: u32,
        nickname: Option<String>,
    }

    crate::record!(Person { name, age, nickname });

    #[test]
    fn test_macro_lists_fields_in_order() {
        let person = Person {
            name: "ada".into(),
            age: 36,
            nickname: None,
        };

        let fields = person.fields();
        let names: Vec<&str> = fields.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, ["name", "age", "nickname"]);
        assert_eq!(fields[1].1, Operand::UInt32(36));
        assert_eq!(fields[2].1, Operand::Null);
    }

    #[test]
    fn test_default_type_name_is_rust_path() {
        let person = Person {
            name: "ada".into(),
            age: 36,
            nickname: Some("countess".into()),
        };
        assert_eq!(person.type_name(), std::any::type_name::<Person>());
    }

    #[test]
    fn test_record_type_instance() {
        let point = RecordType::new("point", ["x", "y"]);
        let record = point.instance([3, 4]).unwrap();

        assert_eq!(record.type_name(), "point");
        assert_eq!(record.field("x"), Some(&Operand::Int32(3)));
        assert_eq!(record.field("y"), Some(&Operand::Int32(4)));
        assert_eq!(point.field_names().collect::<Vec<_>>(), ["x", "y"]);
    }

    #[test]
    fn test_record_type_arity_error() {
        let point = RecordType::new("point", ["x", "y"]);
        let err = point.instance([1]).unwrap_err();

        assert_eq!(
            err,
            RecordError::Arity {
                type_name: "point".into(),
                expected: 2,
                found: 1,
            }
        );
        assert_eq!(err.to_string(), "point record takes 2 field values, got 1");
    }
}
