//! Field introspection.
//!
//! Rust has no runtime reflection, so each record type describes itself
//! through [`Describe`], usually generated by `#[derive(Describe)]`.

use std::collections::HashSet;
use std::rc::Rc;
use std::sync::Arc;

use crate::error::{Result, UsageFault};
use crate::rules::{RuleToken, parse_directive};
use crate::value::FieldValue;

/// One field of a record: its report key, declared rules and captured value.
#[derive(Debug, Clone)]
pub struct FieldDescriptor<'a> {
    pub key: String,
    pub rules: Vec<RuleToken>,
    pub value: FieldValue<'a>,
}

impl<'a> FieldDescriptor<'a> {
    /// Build a descriptor from a declared field name and its directive.
    ///
    /// The name is case-folded to lowercase to form the report key.
    pub fn new(name: &str, directive: &str, value: FieldValue<'a>) -> Self {
        Self {
            key: name.to_lowercase(),
            rules: parse_directive(directive),
            value,
        }
    }
}

/// "Describe yourself" capability of a validatable record.
///
/// Implementations list every field in declaration order.
pub trait Describe {
    fn describe(&self) -> Vec<FieldDescriptor<'_>>;
}

impl<T: Describe + ?Sized> Describe for &T {
    fn describe(&self) -> Vec<FieldDescriptor<'_>> {
        (**self).describe()
    }
}

impl<T: Describe + ?Sized> Describe for &mut T {
    fn describe(&self) -> Vec<FieldDescriptor<'_>> {
        (**self).describe()
    }
}

impl<T: Describe + ?Sized> Describe for Box<T> {
    fn describe(&self) -> Vec<FieldDescriptor<'_>> {
        (**self).describe()
    }
}

impl<T: Describe + ?Sized> Describe for Rc<T> {
    fn describe(&self) -> Vec<FieldDescriptor<'_>> {
        (**self).describe()
    }
}

impl<T: Describe + ?Sized> Describe for Arc<T> {
    fn describe(&self) -> Vec<FieldDescriptor<'_>> {
        (**self).describe()
    }
}

/// Enumerate a record's fields, rejecting descriptor lists that cannot be
/// keyed unambiguously.
pub fn introspect<R: Describe + ?Sized>(record: &R) -> Result<Vec<FieldDescriptor<'_>>> {
    let fields = record.describe();
    check_keys(&fields)?;
    Ok(fields)
}

pub(crate) fn check_keys(fields: &[FieldDescriptor<'_>]) -> Result<()> {
    let mut seen = HashSet::with_capacity(fields.len());
    for field in fields {
        if field.key.is_empty() {
            return Err(UsageFault::EmptyFieldName);
        }
        if !seen.insert(field.key.as_str()) {
            return Err(UsageFault::DuplicateField {
                field: field.key.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Capture;

    struct Contact {
        name: String,
        phone: u64,
    }

    impl Describe for Contact {
        fn describe(&self) -> Vec<FieldDescriptor<'_>> {
            vec![
                FieldDescriptor::new("Name", "required", self.name.capture()),
                FieldDescriptor::new("Phone", "", self.phone.capture()),
            ]
        }
    }

    struct Clashing;

    impl Describe for Clashing {
        fn describe(&self) -> Vec<FieldDescriptor<'_>> {
            vec![
                FieldDescriptor::new("Email", "email", FieldValue::Text("")),
                FieldDescriptor::new("email", "email", FieldValue::Text("")),
            ]
        }
    }

    #[test]
    fn test_keys_are_case_folded_in_order() {
        let contact = Contact {
            name: "test".to_string(),
            phone: 1234567890,
        };
        let fields = introspect(&contact).expect("introspect");
        let keys: Vec<_> = fields.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, ["name", "phone"]);
        assert_eq!(fields[0].rules, vec![RuleToken::Required]);
        assert!(fields[1].rules.is_empty());
    }

    #[test]
    fn test_pointers_are_transparent() {
        let contact = Arc::new(Box::new(Contact {
            name: String::new(),
            phone: 0,
        }));
        let fields = introspect(&contact).expect("introspect");
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_duplicate_keys_are_a_usage_fault() {
        let err = introspect(&Clashing).unwrap_err();
        assert_eq!(
            err,
            UsageFault::DuplicateField {
                field: "email".to_string()
            }
        );
    }
}
