use serde::Serialize;
use std::fmt;

/// A flat scalar stored in the context and written into every record.
///
/// Integers are held as `i64`. `u64`, `usize` and `isize` values outside
/// that range saturate to `i64::MAX` / `i64::MIN`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Str(String),
    Int(i64),
    Num(f64),
}

impl FieldValue {
    /// `false` for floating-point values that have no JSON encoding.
    pub fn is_representable(&self) -> bool {
        match self {
            FieldValue::Num(n) => n.is_finite(),
            _ => true,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => f.write_str(s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Num(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Str(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Str(s)
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::Str(s.clone())
    }
}

macro_rules! int_value {
    ($($t:ty),*) => {
        $(impl From<$t> for FieldValue {
            fn from(i: $t) -> Self {
                FieldValue::Int(i64::from(i))
            }
        })*
    };
}

int_value!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! saturating_int_value {
    ($($t:ty),*) => {
        $(impl From<$t> for FieldValue {
            fn from(i: $t) -> Self {
                let fallback = if i > 0 { i64::MAX } else { i64::MIN };
                FieldValue::Int(i64::try_from(i).unwrap_or(fallback))
            }
        })*
    };
}

saturating_int_value!(u64, usize, isize);

impl From<f32> for FieldValue {
    fn from(n: f32) -> Self {
        FieldValue::Num(f64::from(n))
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Num(n)
    }
}
