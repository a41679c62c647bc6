//! Configuration options for a [`Validator`](crate::Validator).

use serde::{Deserialize, Serialize};

/// What to do with a rule token outside the vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownRulePolicy {
    /// Skip the token; the field is validated as if it were absent.
    #[default]
    Ignore,
    /// Abort validation with a usage fault.
    Reject,
}

/// Options controlling validation behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorOptions {
    /// Handling of unknown rule tokens.
    /// Default: ignore, so directives written for newer rule sets still validate.
    pub unknown_rules: UnknownRulePolicy,
}

impl ValidatorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unknown_rules(mut self, policy: UnknownRulePolicy) -> Self {
        self.unknown_rules = policy;
        self
    }
}
