//! Validation engine.

use std::any::{Any, type_name};

use tracing::debug;

use crate::dispatch::dispatch;
use crate::error::{Result, UsageFault, ValidationFailure};
use crate::options::ValidatorOptions;
use crate::record::{Describe, FieldDescriptor, check_keys, introspect};
use crate::registry::RecordRegistry;
use crate::report::{ErrorMap, ValidationReport};
use crate::rules;

/// Validates records against their field directives.
///
/// The engine holds only immutable configuration. Each call builds its own
/// [`ErrorMap`], so one `Validator` can be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    options: ValidatorOptions,
    registry: RecordRegistry,
}

impl Validator {
    /// Create a validator with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator with the given options.
    pub fn with_options(options: ValidatorOptions) -> Self {
        Self {
            options,
            registry: RecordRegistry::new(),
        }
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    /// Register `T` for [`Validator::validate_any`].
    pub fn register<T: Describe + Any>(&mut self) -> &mut Self {
        self.registry.register::<T>();
        self
    }

    /// Validate a record and return field key to failure message.
    ///
    /// An empty report means every field passed. `Err` is reserved for
    /// records that cannot be validated at all.
    pub fn validate<R: Describe + ?Sized>(&self, record: &R) -> Result<ValidationReport> {
        self.validate_failures(record).map(ValidationReport::from)
    }

    /// Validate a record, keeping the structured failures.
    pub fn validate_failures<R: Describe + ?Sized>(&self, record: &R) -> Result<ErrorMap> {
        let fields = introspect(record)?;
        self.run(type_name::<R>(), fields)
    }

    /// Validate a type-erased record registered through [`Validator::register`].
    pub fn validate_any(&self, record: &dyn Any) -> Result<ValidationReport> {
        let Some(fields) = self.registry.describe(record) else {
            return Err(UsageFault::NotARecord {
                type_id: record.type_id(),
            });
        };
        check_keys(&fields)?;
        self.run("dyn Any", fields).map(ValidationReport::from)
    }

    fn run(&self, record_type: &str, fields: Vec<FieldDescriptor<'_>>) -> Result<ErrorMap> {
        debug!(record = record_type, fields = fields.len(), "validating record");

        let mut errors = ErrorMap::new();
        for field in &fields {
            dispatch(field, self.options.unknown_rules, &mut errors)?;
        }

        debug!(record = record_type, failures = errors.len(), "validation finished");
        Ok(errors)
    }

    /// Succeeds iff `input` is a well-formed email address.
    pub fn is_email(&self, input: &str) -> std::result::Result<(), ValidationFailure> {
        rules::is_email(input)
    }

    /// Succeeds iff `input` is empty.
    pub fn is_empty(&self, input: &str) -> std::result::Result<(), ValidationFailure> {
        rules::is_empty(input)
    }

    /// Succeeds iff `input` is an absolute URL.
    pub fn is_url(&self, input: &str) -> std::result::Result<(), ValidationFailure> {
        rules::is_url(input)
    }

    /// Succeeds iff `input` is an IP address literal.
    pub fn is_ip(&self, input: &str) -> std::result::Result<(), ValidationFailure> {
        rules::is_ip(input)
    }
}
