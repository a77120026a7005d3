//! Definition-time and parse-time error types.
//!
//! The two families behave differently. A [`DefinitionError`] is a fault in
//! the option table itself and is returned as `Err` the moment the table is
//! built. A [`ParseError`] describes a problem with user input; it is
//! collected into the parse result and never stops the parse.

use serde::Serialize;
use thiserror::Error;

/// Errors raised while building or compiling an option table.
///
/// # Examples
///
/// ```
/// use getopts_core::{DefinitionTable, OptionKind, CompiledTable, DefinitionError};
///
/// let table = DefinitionTable::new()
///     .option("verbose", OptionKind::Count, &["v"])
///     .option("version", OptionKind::Simple, &["v"]);
///
/// let err = CompiledTable::compile(&table).unwrap_err();
/// assert_eq!(err, DefinitionError::DuplicateName("v".to_string()));
/// assert_eq!(err.to_string(), r#"Duplicate option name "v""#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    /// The option declares no spellings at all.
    #[error("Invalid names to option \"{option}\"")]
    MissingNames {
        /// Identifier of the offending option.
        option: String,
    },
    /// A spelling is neither a single alphanumeric character nor a
    /// (hyphen-separated) alphanumeric word.
    #[error("Invalid name \"{name}\" to option \"{option}\"")]
    MalformedName {
        /// Identifier of the offending option.
        option: String,
        /// The spelling as declared.
        name: String,
    },
    /// Two options claim the same short or the same long spelling.
    #[error("Duplicate option name \"{0}\"")]
    DuplicateName(String),
    /// The kind tag is not one of the known kinds.
    #[error("Invalid kind \"{kind}\" to option \"{option}\"")]
    InvalidKind {
        /// Identifier of the offending option.
        option: String,
        /// The tag as declared.
        kind: String,
    },
}

/// Convenience alias for definition-time results.
pub type Result<T> = std::result::Result<T, DefinitionError>;

/// A problem with the user-supplied arguments.
///
/// The `Display` output is the human-readable sentence reported to users.
/// Spellings are stored with their dashes (`-v`, `--tag`). Serializes as
/// that sentence.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(into = "String")]
pub enum ParseError {
    /// A bare `-` token.
    #[error("Invalid option \"{0}\"")]
    InvalidOption(String),
    /// The spelling is not in the table.
    #[error("Unknown option \"{0}\"")]
    UnknownOption(String),
    /// A value-taking option was the last token.
    #[error("Missing argument to option \"{0}\"")]
    MissingArgument(String),
    /// An associative value without a `=` separator.
    #[error("Malformed argument to option \"{0}\" (a \"=\" is missing)")]
    MalformedArgument(String),
    /// An associative key given a second time to the same option.
    #[error("Duplicate key \"{key}\" to option \"{option}\"")]
    DuplicateKey {
        /// The repeated key.
        key: String,
        /// The spelling used for the rejected occurrence.
        option: String,
    },
}

impl From<ParseError> for String {
    fn from(error: ParseError) -> Self {
        error.to_string()
    }
}
