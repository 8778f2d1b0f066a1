//! # Plumb Core
//!
//! Expectation engine for Rust tests.
//!
//! A [`Spec`] captures a left operand, compares it with a right operand and,
//! on mismatch, prints a filtered, colorized call stack and hands a formatted
//! message to a [`FailureSink`]. What the sink does with it (panic, record,
//! forward to another harness) is up to the host.
//!
//! ## Comparison rules
//!
//! - **Type mismatch**: operands of different dynamic types always fail,
//!   for `to_eq` and `to_not_eq` alike
//! - **Errors**: compared by message text only
//! - **Records**: compared field by field in the left operand's order
//! - **Everything else**: exact `==`
//!
//! ## Example
//!
//! ```
//! use plumb_core::{Config, Palette, RecordingSink, Spec};
//!
//! let mut sink = RecordingSink::new();
//! {
//!     let config = Config::default()
//!         .with_palette(Palette::plain())
//!         .with_print_stack(false);
//!     let mut spec = Spec::with_config(&mut sink, config);
//!
//!     spec.expect(55).to_eq(55);
//!     spec.expect(55).to_eq(65);
//! }
//!
//! assert_eq!(sink.last(), Some("expected: 55 to equal: 65"));
//! ```
//!
//! In a plain `#[test]`, [`Spec::for_test`] panics on the first failure.

// Public modules
pub mod comparator;
pub mod config;
pub mod error;
pub mod operand;
pub mod output;
pub mod record;
pub mod sink;
pub mod spec;
pub mod stack;
pub mod stdout_output;

// Re-exports for convenience
pub use comparator::{Comparison, Finding, OperandClass, Verb};
pub use config::{Config, Palette};
pub use error::{Failure, RecordError, UsageError};
pub use operand::{ErrorLike, Operand};
pub use output::{BufferOutput, NullOutput, Output};
pub use record::{RecordLike, RecordType};
pub use sink::{FailureSink, FnSink, PanicSink, RecordingSink};
pub use spec::{Expectation, Spec};
pub use stdout_output::StdoutOutput;
