//! Declarative command-line option parsing.
//!
//! This crate parses raw arguments against a table of option definitions:
//!
//! - [`DefinitionTable`]: caller-chosen option ids, each with an
//!   [`OptionKind`] and one or more spellings (`v`, `verbose`).
//! - [`CompiledTable`]: the validated lookup maps, built once with
//!   [`CompiledTable::compile`] and reused for every parse.
//! - [`ParseResult`]: every error found in the input, a shaped
//!   [`OptionValue`] for every declared option, and the positional arguments.
//!
//! Problems in the table itself are [`DefinitionError`]s and fail
//! compilation. Problems in the arguments are [`ParseError`]s; they are
//! collected and never stop the parse.
//!
//! # Example
//!
//! ```
//! use getopts_core::*;
//!
//! let defs = DefinitionTable::new()
//!     .option("verbose", OptionKind::Count, &["v", "verbose"])
//!     .option("output", OptionKind::Value, &["o", "output"])
//!     .option("define", OptionKind::Associative, &["D", "define"]);
//! let table = CompiledTable::compile(&defs).unwrap();
//!
//! let result = table.parse(["-vv", "--output=a.out", "-DNAME=x", "main.c"]);
//! assert!(result.error_messages().is_none());
//! assert_eq!(result.get("verbose").unwrap().as_count(), Some(2));
//! assert_eq!(result.get("output").unwrap().as_str(), Some("a.out"));
//! assert_eq!(result.get("define").unwrap().as_map().unwrap()["NAME"], "x");
//! assert_eq!(result.positionals(), ["main.c"]);
//!
//! let result = table.parse(["--output"]);
//! assert_eq!(
//!     result.error_messages(),
//!     Some(vec![r#"Missing argument to option "--output""#.to_string()])
//! );
//! ```

mod accumulator;
mod definition;
mod error;
mod kind;
mod parse;
mod shape;
mod source;
mod table;

pub use accumulator::{Occurrence, OptionCell, ParseState};
pub use definition::{DefinitionSpec, DefinitionTable, OptionDefinition, Spelling};
pub use error::{DefinitionError, ParseError, Result};
pub use kind::{Consumption, OptionKind, UnknownKind};
pub use shape::{OptionValue, ParseResult, shape};
pub use source::{ArgSource, ProcessArgs};
pub use table::CompiledTable;

/// Compiles `definitions` and parses `args` in one call.
///
/// Convenient for one-shot use; compile once with
/// [`CompiledTable::compile`] when parsing repeatedly.
///
/// # Errors
///
/// Returns the [`DefinitionError`] raised by compilation. Parse errors are
/// reported inside the [`ParseResult`].
///
/// # Examples
///
/// ```
/// use getopts_core::{DefinitionTable, OptionKind, OptionValue, parse_args};
///
/// let defs = DefinitionTable::new().option("force", OptionKind::Simple, &["f", "force"]);
/// let result = parse_args(&defs, ["-f", "target"]).unwrap();
/// assert_eq!(result.get("force"), Some(&OptionValue::Bool(true)));
/// ```
pub fn parse_args<I, S>(definitions: &DefinitionTable, args: I) -> Result<ParseResult>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let table = CompiledTable::compile(definitions)?;
    Ok(table.parse(args))
}
