//! Captured field values.
//!
//! A field value is captured either as text or as a type-erased dynamic
//! value. String-typed fields become [`FieldValue::Text`]; everything else,
//! including the open [`AnyValue`] type, becomes [`FieldValue::Dynamic`] so
//! that rules like `int` can inspect the concrete runtime type.

use std::any::{Any, type_name};
use std::borrow::Cow;
use std::fmt;

/// Strip the module path from a type name, leaving generic arguments as-is.
fn short_type_name(full: &'static str) -> &'static str {
    let head = full.find('<').unwrap_or(full.len());
    let start = full[..head].rfind("::").map_or(0, |idx| idx + 2);
    &full[start..]
}

/// Captured value of one field.
#[derive(Clone, Copy)]
pub enum FieldValue<'a> {
    /// Plain string content.
    Text(&'a str),
    /// Any non-string value, with the name of its concrete type.
    Dynamic {
        value: &'a dyn Any,
        type_name: &'static str,
    },
}

impl<'a> FieldValue<'a> {
    /// Capture a non-string value.
    pub fn dynamic<T: Any>(value: &'a T) -> Self {
        FieldValue::Dynamic {
            value,
            type_name: short_type_name(type_name::<T>()),
        }
    }

    /// String content, if this value holds a string.
    ///
    /// Dynamic values holding a `String` or `&'static str` are unwrapped.
    pub fn as_str(&self) -> Option<&'a str> {
        match *self {
            FieldValue::Text(text) => Some(text),
            FieldValue::Dynamic { value, .. } => {
                if let Some(s) = value.downcast_ref::<String>() {
                    Some(s.as_str())
                } else {
                    value.downcast_ref::<&'static str>().copied()
                }
            }
        }
    }

    /// Short name of the captured type, used in mismatch messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "string",
            FieldValue::Dynamic { type_name, .. } => type_name,
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, FieldValue::Dynamic { .. })
    }
}

impl fmt::Debug for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.debug_tuple("Text").field(text).finish(),
            FieldValue::Dynamic { type_name, .. } => {
                f.debug_struct("Dynamic").field("type_name", type_name).finish()
            }
        }
    }
}

/// Open field type: holds a value of any concrete type.
///
/// Declare a field as `AnyValue` when its runtime type is only known at
/// runtime; the `int` rule checks the concrete type held here.
pub struct AnyValue {
    inner: Box<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl AnyValue {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self {
            inner: Box::new(value),
            type_name: short_type_name(type_name::<T>()),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.inner.downcast_ref::<T>()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.inner.is::<T>()
    }
}

impl fmt::Debug for AnyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyValue")
            .field("type_name", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// Types whose values can be captured into a [`FieldValue`].
pub trait Capture {
    fn capture(&self) -> FieldValue<'_>;
}

impl Capture for String {
    fn capture(&self) -> FieldValue<'_> {
        FieldValue::Text(self)
    }
}

impl Capture for str {
    fn capture(&self) -> FieldValue<'_> {
        FieldValue::Text(self)
    }
}

impl Capture for &str {
    fn capture(&self) -> FieldValue<'_> {
        FieldValue::Text(self)
    }
}

impl Capture for Box<str> {
    fn capture(&self) -> FieldValue<'_> {
        FieldValue::Text(self)
    }
}

impl Capture for Cow<'_, str> {
    fn capture(&self) -> FieldValue<'_> {
        FieldValue::Text(self)
    }
}

impl Capture for AnyValue {
    fn capture(&self) -> FieldValue<'_> {
        FieldValue::Dynamic {
            value: &*self.inner,
            type_name: self.type_name,
        }
    }
}

macro_rules! capture_dynamic {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Capture for $ty {
                fn capture(&self) -> FieldValue<'_> {
                    FieldValue::dynamic(self)
                }
            }
        )*
    };
}

capture_dynamic!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, bool, char,
);
