//! Error types.
//!
//! Two families of errors exist and they never mix:
//!
//! - [`ValidationFailure`]: a rule rejected a field value. Failures are data
//!   problems and are collected into the report.
//! - [`UsageFault`]: the caller handed the engine something it cannot
//!   validate. Faults abort the run and are returned as `Err`.

use std::any::TypeId;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rules::RuleToken;

/// Failure taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Value is not a well-formed email address
    EmailInvalid,
    /// Value was expected to be empty but is not
    FieldNotEmpty,
    /// Value is not an absolute URL
    UrlInvalid,
    /// Value is not an IPv4 or IPv6 literal
    IpInvalid,
    /// Value's runtime type does not match what the rule expects
    TypeMismatch,
    /// Required value is empty
    FieldRequired,
}

impl ErrorKind {
    /// Get all failure kinds.
    pub const fn all() -> &'static [Self] {
        &[
            Self::EmailInvalid,
            Self::FieldNotEmpty,
            Self::UrlInvalid,
            Self::IpInvalid,
            Self::TypeMismatch,
            Self::FieldRequired,
        ]
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::EmailInvalid => "Email Invalid",
            Self::FieldNotEmpty => "Field Not Empty",
            Self::UrlInvalid => "URL Invalid",
            Self::IpInvalid => "IP Invalid",
            Self::TypeMismatch => "Type Mismatch",
            Self::FieldRequired => "Field Required",
        }
    }

    /// Default message for kinds whose message carries no extra data.
    fn default_message(&self) -> &'static str {
        match self {
            Self::EmailInvalid => "email not valid",
            Self::FieldNotEmpty => "field not empty",
            Self::UrlInvalid => "url not valid",
            Self::IpInvalid => "ip address not valid",
            Self::TypeMismatch => "type mismatch",
            Self::FieldRequired => "field is empty",
        }
    }
}

/// A single rule rejection.
///
/// Standalone checks return failures without context. When raised while
/// validating a record, the dispatcher attaches the field key and the rule
/// token through [`ValidationFailure::with_context`].
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{message}")]
pub struct ValidationFailure {
    kind: ErrorKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    rule: Option<RuleToken>,
    message: String,
}

impl ValidationFailure {
    fn of(kind: ErrorKind) -> Self {
        Self {
            kind,
            field: None,
            rule: None,
            message: kind.default_message().to_string(),
        }
    }

    pub fn email_invalid() -> Self {
        Self::of(ErrorKind::EmailInvalid)
    }

    pub fn field_not_empty() -> Self {
        Self::of(ErrorKind::FieldNotEmpty)
    }

    pub fn url_invalid() -> Self {
        Self::of(ErrorKind::UrlInvalid)
    }

    pub fn ip_invalid() -> Self {
        Self::of(ErrorKind::IpInvalid)
    }

    pub fn field_required() -> Self {
        Self::of(ErrorKind::FieldRequired)
    }

    /// Type mismatch between what a rule expects and what the field holds.
    pub fn type_mismatch(expected: &str, found: &str) -> Self {
        Self {
            message: format!("expected {expected}, got {found}"),
            ..Self::of(ErrorKind::TypeMismatch)
        }
    }

    /// Attach the field key and rule token that produced this failure.
    #[must_use]
    pub fn with_context(mut self, field: impl Into<String>, rule: RuleToken) -> Self {
        self.field = Some(field.into());
        self.rule = Some(rule);
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    pub fn rule(&self) -> Option<&RuleToken> {
        self.rule.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The input cannot be validated at all.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageFault {
    /// Only the `TypeId` is known: a `&dyn Any` carries no type name.
    #[error("value is not a registered record type ({type_id:?})")]
    NotARecord { type_id: TypeId },
    #[error("record describes a field with an empty name")]
    EmptyFieldName,
    #[error("record describes field `{field}` more than once")]
    DuplicateField { field: String },
    #[error("field `{field}` declares unknown rule `{rule}`")]
    UnknownRule { field: String, rule: String },
}

pub type Result<T> = std::result::Result<T, UsageFault>;
