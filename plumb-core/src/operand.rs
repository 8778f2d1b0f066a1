use std::fmt;
use std::rc::Rc;

use num_bigint::BigInt;
#[cfg(feature = "complex_numbers")]
use num_complex::Complex64;
use num_rational::BigRational;

use crate::record::RecordLike;

// RUST CONCEPT: Error-kind capability
// Anything that can render a failure message takes part in error comparison.
// The blanket impl covers every std::error::Error, including io::Error and
// thiserror enums. The type name is the static type: `&*boxed` on a
// Box<dyn Error> reports `dyn core::error::Error`, so all boxed errors share
// one erased type. Use `Operand::error_as` to keep the concrete type.
pub trait ErrorLike {
    /// Dynamic type used for the type-mismatch check.
    fn type_name(&self) -> &str;

    fn message(&self) -> String;
}

impl<E: std::error::Error + ?Sized> ErrorLike for E {
    fn type_name(&self) -> &str {
        std::any::type_name::<E>()
    }

    fn message(&self) -> String {
        self.to_string()
    }
}

// A single runtime value taking part in a comparison.
//
// Primitive variants carry their payload directly; the two capability
// variants (Error, Record) are snapshots taken at capture time, so the
// engine never has to hold on to (or mutate) the caller's value.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    Boolean(bool),
    Char(char),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Int128(i128),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    UInt128(u128),
    SignedSize(isize),
    Size(usize),
    Float32(f32),
    Number(f64),                    // f64, the default float
    Integer(BigInt),                // Arbitrary precision integer
    Rational(BigRational),          // Exact rational number (fraction)
    #[cfg(feature = "complex_numbers")]
    Complex(Complex64),
    String(Rc<str>),
    Null,                           // Absence value (None / no error)

    Error {
        type_name: Rc<str>,
        message: Rc<str>,
    },
    // Fields are kept in declaration order; that order is canonical when
    // two records are walked field by field.
    Record {
        type_name: Rc<str>,
        fields: Rc<Vec<(Rc<str>, Operand)>>,
    },
}

impl Operand {
    /// Snapshot an error-kind value.
    pub fn error<E: ErrorLike + ?Sized>(error: &E) -> Self {
        Operand::Error {
            type_name: error.type_name().into(),
            message: error.message().into(),
        }
    }

    /// Snapshot a type-erased error under its concrete type `E`.
    ///
    /// When `error` is not an `E` the erased `dyn Error` type name is kept,
    /// so it only compares equal to other erased errors.
    pub fn error_as<E: std::error::Error + 'static>(
        error: &(dyn std::error::Error + 'static),
    ) -> Self {
        match error.downcast_ref::<E>() {
            Some(concrete) => Operand::error(concrete),
            None => Operand::error(error),
        }
    }

    /// Snapshot a record-kind value, keeping its field order.
    pub fn record<R: RecordLike + ?Sized>(record: &R) -> Self {
        let fields = record
            .fields()
            .into_iter()
            .map(|(name, value)| (Rc::<str>::from(name), value))
            .collect();

        Operand::Record {
            type_name: record.type_name().into(),
            fields: Rc::new(fields),
        }
    }

    // RUST CONCEPT: Get the type name of a value
    // Two operands are comparable only when these strings match
    pub fn type_name(&self) -> &str {
        match self {
            Operand::Boolean(_) => "boolean",
            Operand::Char(_) => "char",
            Operand::Int8(_) => "int8",
            Operand::Int16(_) => "int16",
            Operand::Int32(_) => "int32",
            Operand::Int64(_) => "int64",
            Operand::Int128(_) => "int128",
            Operand::UInt8(_) => "uint8",
            Operand::UInt16(_) => "uint16",
            Operand::UInt32(_) => "uint32",
            Operand::UInt64(_) => "uint64",
            Operand::UInt128(_) => "uint128",
            Operand::SignedSize(_) => "isize",
            Operand::Size(_) => "usize",
            Operand::Float32(_) => "float32",
            Operand::Number(_) => "number",
            Operand::Integer(_) => "integer",
            Operand::Rational(_) => "rational",
            #[cfg(feature = "complex_numbers")]
            Operand::Complex(_) => "complex",
            Operand::String(_) => "string",
            Operand::Null => "null",
            Operand::Error { type_name, .. } | Operand::Record { type_name, .. } => &**type_name,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Operand::Null)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Operand::Error { .. })
    }

    pub fn is_record(&self) -> bool {
        matches!(self, Operand::Record { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Operand::Error { message, .. } => Some(&**message),
            _ => None,
        }
    }

    pub fn fields(&self) -> Option<&[(Rc<str>, Operand)]> {
        match self {
            Operand::Record { fields, .. } => Some(fields.as_slice()),
            _ => None,
        }
    }

    /// Look up a record field by name.
    pub fn field(&self, name: &str) -> Option<&Operand> {
        self.fields()?
            .iter()
            .find(|(field_name, _)| &**field_name == name)
            .map(|(_, value)| value)
    }
}

macro_rules! operand_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Operand {
                fn from(value: $ty) -> Self {
                    Operand::$variant(value)
                }
            }
        )*
    };
}

operand_from! {
    bool => Boolean,
    char => Char,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    i128 => Int128,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    u128 => UInt128,
    isize => SignedSize,
    usize => Size,
    f32 => Float32,
    f64 => Number,
    BigInt => Integer,
    BigRational => Rational,
}

#[cfg(feature = "complex_numbers")]
impl From<Complex64> for Operand {
    fn from(value: Complex64) -> Self {
        Operand::Complex(value)
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Operand::String(value.into())
    }
}

impl From<String> for Operand {
    fn from(value: String) -> Self {
        Operand::String(value.into())
    }
}

impl From<&String> for Operand {
    fn from(value: &String) -> Self {
        Operand::String(value.as_str().into())
    }
}

impl From<Rc<str>> for Operand {
    fn from(value: Rc<str>) -> Self {
        Operand::String(value)
    }
}

impl From<&Operand> for Operand {
    fn from(value: &Operand) -> Self {
        value.clone()
    }
}

// None is the absence value; Some(v) is just v.
impl<T: Into<Operand>> From<Option<T>> for Operand {
    fn from(value: Option<T>) -> Self {
        value.map_or(Operand::Null, Into::into)
    }
}

// RUST CONCEPT: Display is the form used inside failure messages
// Strings and chars are quoted so "55" and 55 never read the same
impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Boolean(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Operand::Char(c) => write!(f, "'{}'", c),
            Operand::Int8(i) => write!(f, "{}", i),
            Operand::Int16(i) => write!(f, "{}", i),
            Operand::Int32(i) => write!(f, "{}", i),
            Operand::Int64(i) => write!(f, "{}", i),
            Operand::Int128(i) => write!(f, "{}", i),
            Operand::UInt8(i) => write!(f, "{}", i),
            Operand::UInt16(i) => write!(f, "{}", i),
            Operand::UInt32(i) => write!(f, "{}", i),
            Operand::UInt64(i) => write!(f, "{}", i),
            Operand::UInt128(i) => write!(f, "{}", i),
            Operand::SignedSize(i) => write!(f, "{}", i),
            Operand::Size(i) => write!(f, "{}", i),
            Operand::Float32(n) => write!(f, "{}", n),
            Operand::Number(n) => write!(f, "{}", n),
            Operand::Integer(i) => write!(f, "{}", i),
            // BigRational displays as "numerator/denominator"
            Operand::Rational(r) => write!(f, "{}", r),
            #[cfg(feature = "complex_numbers")]
            Operand::Complex(c) => {
                if c.im >= 0.0 {
                    write!(f, "{}+{}i", c.re, c.im)
                } else {
                    write!(f, "{}{}i", c.re, c.im)
                }
            }
            Operand::String(s) => write!(f, "\"{}\"", s),
            Operand::Null => write!(f, "null"),
            Operand::Error { message, .. } => write!(f, "error(\"{}\")", message),
            Operand::Record { type_name, fields } => {
                write!(f, "{} {{", type_name)?;
                let mut iter = fields.iter();
                if let Some((name, value)) = iter.next() {
                    write!(f, " {}: {}", name, value)?;
                    for (name, value) in iter {
                        write!(f, ", {}: {}", name, value)?;
                    }
                    write!(f, " ")?;
                }
                write!(f, "}}")
            }
        }
    }
}
