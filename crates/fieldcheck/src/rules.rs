//! Rule vocabulary and atomic checks.
//!
//! Every check returns `Ok(())` on success or the specific
//! [`ValidationFailure`] on rejection; `is_ok()` gives the plain flag.

use std::any::Any;
use std::fmt;
use std::net::IpAddr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ValidationFailure;
use crate::value::FieldValue;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,4}$").expect("valid email pattern")
});

/// One named check declared in a validation directive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum RuleToken {
    Required,
    Int,
    Email,
    Url,
    Ip,
    /// Token outside the vocabulary, kept verbatim.
    Unknown(String),
}

impl RuleToken {
    /// Parse a single token. Never fails; unrecognised names become `Unknown`.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "required" => Self::Required,
            "int" => Self::Int,
            "email" => Self::Email,
            "url" => Self::Url,
            "ip" => Self::Ip,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Token as written in a directive.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Required => "required",
            Self::Int => "int",
            Self::Email => "email",
            Self::Url => "url",
            Self::Ip => "ip",
            Self::Unknown(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for RuleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for RuleToken {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<RuleToken> for String {
    fn from(token: RuleToken) -> Self {
        match token {
            RuleToken::Unknown(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// Split a comma-separated directive into its tokens, in order.
///
/// Surrounding whitespace is trimmed and empty segments are dropped, so an
/// empty directive yields no rules.
pub fn parse_directive(directive: &str) -> Vec<RuleToken> {
    directive
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(RuleToken::parse)
        .collect()
}

/// Succeeds iff `input` is a lowercase `local@domain.tld` address.
pub fn is_email(input: &str) -> Result<(), ValidationFailure> {
    if input.is_empty() || !EMAIL_PATTERN.is_match(input) {
        return Err(ValidationFailure::email_invalid());
    }
    Ok(())
}

/// Succeeds iff `input` is the empty string.
///
/// This confirms emptiness; presence is [`is_present`].
pub fn is_empty(input: &str) -> Result<(), ValidationFailure> {
    if !input.is_empty() {
        return Err(ValidationFailure::field_not_empty());
    }
    Ok(())
}

/// Succeeds unless the value is an empty string.
///
/// Non-string dynamic values are always present.
pub fn is_present(value: &FieldValue<'_>) -> Result<(), ValidationFailure> {
    match value.as_str() {
        Some("") => Err(ValidationFailure::field_required()),
        _ => Ok(()),
    }
}

/// Succeeds iff `input` parses as an absolute URL.
///
/// Input containing ASCII whitespace or control characters is rejected
/// outright; the parser would otherwise strip them and accept the rest.
pub fn is_url(input: &str) -> Result<(), ValidationFailure> {
    if input
        .chars()
        .any(|c| c.is_ascii_whitespace() || c.is_ascii_control())
    {
        return Err(ValidationFailure::url_invalid());
    }
    // `Url::parse` has no base to resolve against, so relative references
    // fail to parse.
    Url::parse(input)
        .map(|_| ())
        .map_err(|_| ValidationFailure::url_invalid())
}

/// Succeeds iff `input` is an IPv4 or IPv6 literal.
pub fn is_ip(input: &str) -> Result<(), ValidationFailure> {
    input
        .parse::<IpAddr>()
        .map(|_| ())
        .map_err(|_| ValidationFailure::ip_invalid())
}

/// Succeeds iff the value's concrete runtime type is a primitive integer.
///
/// A string that merely looks numeric is a mismatch.
pub fn is_int(value: &FieldValue<'_>) -> Result<(), ValidationFailure> {
    match value {
        FieldValue::Dynamic { value, .. } if is_integer(*value) => Ok(()),
        other => Err(ValidationFailure::type_mismatch("int", other.type_name())),
    }
}

fn is_integer(value: &dyn Any) -> bool {
    value.is::<i8>()
        || value.is::<i16>()
        || value.is::<i32>()
        || value.is::<i64>()
        || value.is::<i128>()
        || value.is::<isize>()
        || value.is::<u8>()
        || value.is::<u16>()
        || value.is::<u32>()
        || value.is::<u64>()
        || value.is::<u128>()
        || value.is::<usize>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{AnyValue, Capture};

    #[test]
    fn test_parse_directive() {
        assert_eq!(
            parse_directive("required,email"),
            vec![RuleToken::Required, RuleToken::Email]
        );
        assert_eq!(
            parse_directive("int, required"),
            vec![RuleToken::Int, RuleToken::Required]
        );
        assert!(parse_directive("").is_empty());
        assert!(parse_directive(" , ").is_empty());
        assert_eq!(
            parse_directive("optional"),
            vec![RuleToken::Unknown("optional".to_string())]
        );
    }

    #[test]
    fn test_token_round_trips_through_string() {
        for name in ["required", "int", "email", "url", "ip", "optional"] {
            assert_eq!(String::from(RuleToken::parse(name)), name);
        }
    }

    #[test]
    fn test_is_email() {
        let cases = [
            ("test.com", false),
            ("", false),
            ("test@testcom", false),
            ("test@.com", false),
            ("@test.com", false),
            ("@.com", false),
            ("Test@gmail.com", false),
            ("test@gmail.company", false),
            ("test@gmail.comma", false),
            ("test@GMAIL.com", false),
            ("test@gmail.com\n", false),
            ("test@@gmail.com", false),
            ("a@b.co", true),
            ("test@gmail.com", true),
            ("first.last+tag@mail.example.org", true),
        ];
        for (input, expected) in cases {
            assert_eq!(is_email(input).is_ok(), expected, "input: {input:?}");
        }
    }

    #[test]
    fn test_is_empty() {
        assert!(is_empty("").is_ok());
        let err = is_empty("test").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::FieldNotEmpty);
    }

    #[test]
    fn test_is_present() {
        assert!(is_present(&FieldValue::Text("test")).is_ok());
        assert!(is_present(&FieldValue::Text("")).is_err());

        let phone = 0_i64;
        assert!(is_present(&phone.capture()).is_ok());

        let blank = AnyValue::new(String::new());
        assert_eq!(
            is_present(&blank.capture()).unwrap_err().kind(),
            crate::ErrorKind::FieldRequired
        );
    }

    #[test]
    fn test_is_url() {
        assert!(is_url("").is_err());
        assert!(is_url("test.com").is_err());
        assert!(is_url("/relative/path").is_err());
        assert!(is_url("https://www.google.com").is_ok());
        assert!(is_url("postgres://localhost:5432/testdb").is_ok());
        assert!(is_url("mailto:test@gmail.com").is_ok());
    }

    #[test]
    fn test_is_url_rejects_whitespace_and_controls() {
        assert!(is_url(" https://www.google.com ").is_err());
        assert!(is_url("https://www.goo\ngle.com").is_err());
        assert!(is_url("ht\ttps://google.com").is_err());
        assert!(is_url("https://www.google.com\0").is_err());
        // Special schemes need a host.
        assert!(is_url("http://").is_err());
    }

    #[test]
    fn test_is_ip() {
        assert!(is_ip("192.168.0").is_err());
        assert!(is_ip("").is_err());
        assert!(is_ip("192.168.0.1").is_ok());
        assert!(is_ip("::1").is_ok());
        assert!(is_ip("2001:db8::ff00:42:8329").is_ok());
        assert!(is_ip("256.0.0.1").is_err());
    }

    #[test]
    fn test_is_int() {
        let age = AnyValue::new(10_i32);
        assert!(is_int(&age.capture()).is_ok());
        let count = 7_usize;
        assert!(is_int(&count.capture()).is_ok());

        let text_age = AnyValue::new(String::from("10"));
        let err = is_int(&text_age.capture()).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::TypeMismatch);
        assert_eq!(err.message(), "expected int, got String");

        let err = is_int(&FieldValue::Text("10")).unwrap_err();
        assert_eq!(err.message(), "expected int, got string");

        let ratio = 1.5_f64;
        assert!(is_int(&ratio.capture()).is_err());
    }
}
