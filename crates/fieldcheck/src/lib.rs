//! Declarative field validation for flat records.
//!
//! Fields carry a comma-separated validation directive; the engine evaluates
//! each directive's rules against the field's value and returns a report of
//! field key to failure message.
//!
//! - **Rules**: `required`, `int`, `email`, `url`, `ip`
//! - **Introspection**: records implement [`Describe`], normally derived
//! - **Report**: at most one failure per field, the last failing rule wins
//!
//! # Example
//!
//! ```
//! use fieldcheck::{AnyValue, Describe, Validator};
//!
//! #[derive(Describe)]
//! struct Signup {
//!     #[validate("required")]
//!     name: String,
//!     #[validate("int,required")]
//!     age: AnyValue,
//!     #[validate("required,email")]
//!     email: String,
//! }
//!
//! let signup = Signup {
//!     name: String::new(),
//!     age: AnyValue::new(30_i32),
//!     email: "test@gmail.com".to_string(),
//! };
//!
//! let report = Validator::new().validate(&signup)?;
//! assert_eq!(report.len(), 1);
//! assert_eq!(report["name"], "field is empty");
//! # Ok::<(), fieldcheck::UsageFault>(())
//! ```

mod dispatch;
mod engine;
mod error;
mod options;
mod record;
mod registry;
mod report;
pub mod rules;
mod value;

pub use dispatch::dispatch;
pub use engine::Validator;
pub use error::{ErrorKind, Result, UsageFault, ValidationFailure};
pub use options::{UnknownRulePolicy, ValidatorOptions};
pub use record::{Describe, FieldDescriptor, introspect};
pub use registry::RecordRegistry;
pub use report::{ErrorMap, ValidationReport};
pub use rules::RuleToken;
pub use value::{AnyValue, Capture, FieldValue};

#[cfg(feature = "derive")]
pub use fieldcheck_derive::Describe;
