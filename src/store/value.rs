//! Stored value representation
//!
//! A value's type is decided once, when it is written, and preserved so that
//! GET can report `(str)` or `(int)` without re-parsing on every read.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A stored value: a string or an integer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    Str(String),
    Int(i64),
}

impl Value {
    /// Build a value from a raw SET argument.
    ///
    /// A literal made of an optional leading `-` followed by ASCII digits is
    /// stored as an integer; anything else (including out-of-range numbers)
    /// is stored verbatim as a string.
    pub fn from_literal(raw: &str) -> Self {
        let digits = raw.strip_prefix('-').unwrap_or(raw);
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = raw.parse::<i64>() {
                return Value::Int(n);
            }
        }
        Value::Str(raw.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => write!(f, "{}", s),
            Value::Int(n) => write!(f, "{}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_literal_becomes_int() {
        assert_eq!(Value::from_literal("5"), Value::Int(5));
        assert_eq!(Value::from_literal("-42"), Value::Int(-42));
        assert_eq!(Value::from_literal("007"), Value::Int(7));
    }

    #[test]
    fn non_numeric_literal_stays_string() {
        assert_eq!(Value::from_literal("value1"), Value::Str("value1".into()));
        assert_eq!(Value::from_literal("-"), Value::Str("-".into()));
        assert_eq!(Value::from_literal("12.5"), Value::Str("12.5".into()));
        assert_eq!(Value::from_literal("+7"), Value::Str("+7".into()));
    }

    #[test]
    fn overflowing_literal_stays_string() {
        let big = "99999999999999999999999999";
        assert_eq!(Value::from_literal(big), Value::Str(big.into()));
    }
}
