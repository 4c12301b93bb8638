//! Reply definitions
//!
//! Typed replies and their wire rendering.

use std::fmt;

use crate::store::Value;

/// A typed reply to send to the client
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Absent value, or a successful write with nothing to report
    Nil,

    /// A string-typed value
    Str(String),

    /// An integer-typed value (DEL/EXISTS counts, integer-typed entries)
    Int(i64),

    /// A malformed command or a failed operation
    Err(String),

    /// An array of replies (KEYS)
    Array(Vec<Reply>),
}

impl Reply {
    /// Build a reply from a stored value, preserving its type tag
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Str(s) => Reply::Str(s),
            Value::Int(n) => Reply::Int(n),
        }
    }

    /// Build an error reply from anything displayable
    pub fn error(message: impl fmt::Display) -> Self {
        Reply::Err(message.to_string())
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Nil => write!(f, "(nil)"),
            Reply::Str(s) => write!(f, "(str) {}", s),
            Reply::Int(n) => write!(f, "(int) {}", n),
            Reply::Err(msg) => write!(f, "(err) {}", msg),
            Reply::Array(elems) => {
                write!(f, "(arr) {}", elems.len())?;
                for elem in elems {
                    write!(f, "\n{}", elem)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_rendering() {
        assert_eq!(Reply::Nil.to_string(), "(nil)");
        assert_eq!(Reply::Str("value1".into()).to_string(), "(str) value1");
        assert_eq!(Reply::Int(1).to_string(), "(int) 1");
        assert_eq!(Reply::error("bad").to_string(), "(err) bad");
    }

    #[test]
    fn array_rendering() {
        let reply = Reply::Array(vec![
            Reply::Str("a".into()),
            Reply::Str("b".into()),
        ]);
        assert_eq!(reply.to_string(), "(arr) 2\n(str) a\n(str) b");
        assert_eq!(Reply::Array(vec![]).to_string(), "(arr) 0");
    }

    #[test]
    fn value_type_is_preserved() {
        assert_eq!(Reply::from_value(Value::Int(5)).to_string(), "(int) 5");
        assert_eq!(
            Reply::from_value(Value::Str("5x".into())).to_string(),
            "(str) 5x"
        );
    }
}
