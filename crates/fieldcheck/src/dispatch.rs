//! Rule dispatch for a single field.

use tracing::{debug, trace};

use crate::error::{Result, UsageFault, ValidationFailure};
use crate::options::UnknownRulePolicy;
use crate::record::FieldDescriptor;
use crate::report::ErrorMap;
use crate::rules::{self, RuleToken};
use crate::value::FieldValue;

/// Evaluate every rule of `field` in declaration order, recording failures
/// under the field's key.
///
/// Only an unknown rule under [`UnknownRulePolicy::Reject`] returns `Err`;
/// rule failures always land in `errors`.
pub fn dispatch(
    field: &FieldDescriptor<'_>,
    policy: UnknownRulePolicy,
    errors: &mut ErrorMap,
) -> Result<()> {
    for rule in &field.rules {
        let outcome = match rule {
            RuleToken::Required => rules::is_present(&field.value),
            RuleToken::Int => rules::is_int(&field.value),
            RuleToken::Email => with_text(&field.value, rules::is_email),
            RuleToken::Url => with_text(&field.value, rules::is_url),
            RuleToken::Ip => with_text(&field.value, rules::is_ip),
            RuleToken::Unknown(name) => {
                if policy == UnknownRulePolicy::Reject {
                    return Err(UsageFault::UnknownRule {
                        field: field.key.clone(),
                        rule: name.clone(),
                    });
                }
                debug!(field = %field.key, rule = %name, "ignoring unknown rule");
                continue;
            }
        };

        if let Err(failure) = outcome {
            trace!(field = %field.key, rule = %rule, kind = ?failure.kind(), "rule failed");
            errors.record(&field.key, failure.with_context(&field.key, rule.clone()));
        }
    }
    Ok(())
}

/// Run a string check, rejecting values that do not hold a string.
fn with_text(
    value: &FieldValue<'_>,
    check: fn(&str) -> std::result::Result<(), ValidationFailure>,
) -> std::result::Result<(), ValidationFailure> {
    match value.as_str() {
        Some(text) => check(text),
        None => Err(ValidationFailure::type_mismatch("string", value.type_name())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use crate::value::{AnyValue, Capture};

    fn field<'a>(directive: &str, value: FieldValue<'a>) -> FieldDescriptor<'a> {
        FieldDescriptor::new("Field", directive, value)
    }

    #[test]
    fn test_no_rules_always_passes() {
        let mut errors = ErrorMap::new();
        dispatch(&field("", FieldValue::Text("")), UnknownRulePolicy::Ignore, &mut errors)
            .expect("dispatch");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_last_failing_rule_is_kept() {
        let age = AnyValue::new(String::new());
        let mut errors = ErrorMap::new();
        dispatch(&field("int,required", age.capture()), UnknownRulePolicy::Ignore, &mut errors)
            .expect("dispatch");

        let failure = errors.get("field").expect("failure recorded");
        assert_eq!(failure.kind(), ErrorKind::FieldRequired);
        assert_eq!(failure.rule(), Some(&RuleToken::Required));
    }

    #[test]
    fn test_string_rule_on_non_string_is_type_mismatch() {
        let port = 5432_u16;
        let mut errors = ErrorMap::new();
        dispatch(&field("url", port.capture()), UnknownRulePolicy::Ignore, &mut errors)
            .expect("dispatch");

        let failure = errors.get("field").expect("failure recorded");
        assert_eq!(failure.kind(), ErrorKind::TypeMismatch);
        assert_eq!(failure.message(), "expected string, got u16");
    }

    #[test]
    fn test_dynamic_string_feeds_string_rules() {
        let email = AnyValue::new(String::from("test@gmail.com"));
        let mut errors = ErrorMap::new();
        dispatch(&field("email", email.capture()), UnknownRulePolicy::Ignore, &mut errors)
            .expect("dispatch");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_unknown_rule_is_a_no_op() {
        let mut errors = ErrorMap::new();
        dispatch(
            &field("optional,whatever", FieldValue::Text("")),
            UnknownRulePolicy::Ignore,
            &mut errors,
        )
        .expect("dispatch");
        assert!(errors.is_empty());
    }

    #[test]
    fn test_unknown_rule_rejected_by_policy() {
        let mut errors = ErrorMap::new();
        let err = dispatch(
            &field("required,optional", FieldValue::Text("")),
            UnknownRulePolicy::Reject,
            &mut errors,
        )
        .unwrap_err();
        assert_eq!(
            err,
            UsageFault::UnknownRule {
                field: "field".to_string(),
                rule: "optional".to_string(),
            }
        );
    }
}
