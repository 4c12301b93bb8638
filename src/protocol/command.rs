//! Command definitions
//!
//! Parses a raw request line into a typed command.

use crate::error::{LiteError, Result};
use crate::store::Value;

/// A parsed command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Set a key to a value (type inferred from the literal)
    Set { key: String, value: Value },

    /// Get a value by key
    Get { key: String },

    /// Delete a key
    Del { key: String },

    /// Check whether a key exists
    Exists { key: String },

    /// List all keys
    Keys,

    /// Remove every key
    FlushAll,

    /// Ping (health check)
    Ping,
}

impl Command {
    /// Parse a raw request line.
    ///
    /// Returns `Ok(None)` for an empty (all-whitespace) line, which is
    /// ignored without a reply. Unknown verbs and wrong arities are parse
    /// errors; they never touch the store.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let mut tokens = line.split_whitespace();

        let verb = match tokens.next() {
            Some(v) => v,
            None => return Ok(None),
        };
        let args: Vec<&str> = tokens.collect();

        let command = if verb.eq_ignore_ascii_case("set") {
            let (key, value) = Self::expect_two(verb, &args)?;
            Command::Set {
                key: key.to_string(),
                value: Value::from_literal(value),
            }
        } else if verb.eq_ignore_ascii_case("get") {
            Command::Get {
                key: Self::expect_one(verb, &args)?.to_string(),
            }
        } else if verb.eq_ignore_ascii_case("del") {
            Command::Del {
                key: Self::expect_one(verb, &args)?.to_string(),
            }
        } else if verb.eq_ignore_ascii_case("exists") {
            Command::Exists {
                key: Self::expect_one(verb, &args)?.to_string(),
            }
        } else if verb.eq_ignore_ascii_case("keys") {
            Self::expect_none(verb, &args)?;
            Command::Keys
        } else if verb.eq_ignore_ascii_case("flushall") {
            Self::expect_none(verb, &args)?;
            Command::FlushAll
        } else if verb.eq_ignore_ascii_case("ping") {
            Self::expect_none(verb, &args)?;
            Command::Ping
        } else {
            return Err(LiteError::Parse(format!("unknown command '{}'", verb)));
        };

        Ok(Some(command))
    }

    fn expect_one<'a>(verb: &str, args: &[&'a str]) -> Result<&'a str> {
        if args.len() != 1 {
            return Err(LiteError::Parse(format!(
                "{} command requires 1 argument (key)",
                verb.to_ascii_lowercase()
            )));
        }
        Ok(args[0])
    }

    fn expect_two<'a>(verb: &str, args: &[&'a str]) -> Result<(&'a str, &'a str)> {
        if args.len() != 2 {
            return Err(LiteError::Parse(format!(
                "{} command requires 2 arguments (key, value)",
                verb.to_ascii_lowercase()
            )));
        }
        Ok((args[0], args[1]))
    }

    fn expect_none(verb: &str, args: &[&str]) -> Result<()> {
        if !args.is_empty() {
            return Err(LiteError::Parse(format!(
                "{} command takes no arguments",
                verb.to_ascii_lowercase()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_set_with_type_inference() {
        assert_eq!(
            Command::parse("set key1 value1").unwrap(),
            Some(Command::Set {
                key: "key1".into(),
                value: Value::Str("value1".into()),
            })
        );
        assert_eq!(
            Command::parse("SET counter 5").unwrap(),
            Some(Command::Set {
                key: "counter".into(),
                value: Value::Int(5),
            })
        );
    }

    #[test]
    fn parses_single_key_commands() {
        assert_eq!(
            Command::parse("get key1").unwrap(),
            Some(Command::Get { key: "key1".into() })
        );
        assert_eq!(
            Command::parse("DEL key1").unwrap(),
            Some(Command::Del { key: "key1".into() })
        );
        assert_eq!(
            Command::parse("exists key1").unwrap(),
            Some(Command::Exists { key: "key1".into() })
        );
    }

    #[test]
    fn parses_zero_arg_commands() {
        assert_eq!(Command::parse("keys").unwrap(), Some(Command::Keys));
        assert_eq!(Command::parse("FLUSHALL").unwrap(), Some(Command::FlushAll));
        assert_eq!(Command::parse("ping").unwrap(), Some(Command::Ping));
    }

    #[test]
    fn empty_line_is_ignored() {
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("   \t ").unwrap(), None);
    }

    #[test]
    fn wrong_arity_is_a_parse_error() {
        assert!(Command::parse("set key1").is_err());
        assert!(Command::parse("get").is_err());
        assert!(Command::parse("get a b").is_err());
        assert!(Command::parse("del").is_err());
        assert!(Command::parse("keys extra").is_err());
    }

    #[test]
    fn unknown_verb_is_a_parse_error() {
        let err = Command::parse("frobnicate key").unwrap_err();
        assert!(err.to_string().contains("unknown command"));
    }
}
