//! Folding raw occurrences into final per-option values.
//!
//! Shaping is a pure function of an option's kind and its collected cell, so
//! it can be repeated on the same [`ParseState`] with identical results.
//!
//! | Kind | Not seen | Seen |
//! |---|---|---|
//! | `Simple` | `false` | `true` |
//! | `Toggle` | `false` | odd number of occurrences |
//! | `Count` | `0` | number of occurrences |
//! | `Value` | `false` | last value |
//! | `ValueMultiple` | `false` | all values |
//! | `ValueAutomatic` | `false` | the value if seen once, else all values |
//! | `Optional` | `false` | most recent value, else `true` |
//! | `OptionalMultiple` | `false` | all entries (values and `true`) |
//! | `OptionalAutomatic` | `false` | the entry if seen once, else all entries |
//! | `Associative` | `{}` | the key/value map |

use std::collections::BTreeMap;

use serde::Serialize;

use crate::accumulator::{Occurrence, OptionCell, ParseState};
use crate::error::ParseError;
use crate::kind::OptionKind;

/// The externally visible result of one option.
///
/// Serializes without tags: `false`, `3`, `"x"`, `["a", true]`,
/// `{"k": "v"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Count(usize),
    Str(String),
    /// Items are [`Str`](Self::Str) or `Bool(true)`.
    List(Vec<OptionValue>),
    Map(BTreeMap<String, String>),
}

impl OptionValue {
    /// Whether the option was given at least once.
    ///
    /// # Examples
    ///
    /// ```
    /// use getopts_core::OptionValue;
    ///
    /// assert!(!OptionValue::Bool(false).is_present());
    /// assert!(!OptionValue::Count(0).is_present());
    /// assert!(OptionValue::Str(String::new()).is_present());
    /// ```
    pub fn is_present(&self) -> bool {
        match self {
            OptionValue::Bool(b) => *b,
            OptionValue::Count(n) => *n > 0,
            OptionValue::Str(_) => true,
            OptionValue::List(items) => !items.is_empty(),
            OptionValue::Map(map) => !map.is_empty(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_count(&self) -> Option<usize> {
        match self {
            OptionValue::Count(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[OptionValue]> {
        match self {
            OptionValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, String>> {
        match self {
            OptionValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// All string values, whether the option collapsed to one or kept a list.
    ///
    /// # Examples
    ///
    /// ```
    /// use getopts_core::OptionValue;
    ///
    /// let one = OptionValue::Str("a".into());
    /// let many = OptionValue::List(vec![
    ///     OptionValue::Str("a".into()),
    ///     OptionValue::Bool(true),
    ///     OptionValue::Str("b".into()),
    /// ]);
    /// assert_eq!(one.strings(), vec!["a"]);
    /// assert_eq!(many.strings(), vec!["a", "b"]);
    /// assert!(OptionValue::Bool(false).strings().is_empty());
    /// ```
    pub fn strings(&self) -> Vec<&str> {
        match self {
            OptionValue::Str(s) => vec![s.as_str()],
            OptionValue::List(items) => items.iter().filter_map(OptionValue::as_str).collect(),
            _ => Vec::new(),
        }
    }
}

impl From<&Occurrence> for OptionValue {
    fn from(occurrence: &Occurrence) -> Self {
        match occurrence {
            Occurrence::Flag => OptionValue::Bool(true),
            Occurrence::Value(value) => OptionValue::Str(value.clone()),
        }
    }
}

/// Shapes one option's cell according to its kind.
///
/// # Examples
///
/// ```
/// use getopts_core::{shape, Occurrence, OptionCell, OptionKind, OptionValue};
///
/// let cell = OptionCell::List(vec![
///     Occurrence::Flag,
///     Occurrence::Value("x".into()),
///     Occurrence::Flag,
/// ]);
/// assert_eq!(shape(OptionKind::Optional, &cell), OptionValue::Str("x".into()));
/// assert_eq!(shape(OptionKind::Count, &cell), OptionValue::Count(3));
/// assert_eq!(shape(OptionKind::Toggle, &cell), OptionValue::Bool(true));
/// ```
pub fn shape(kind: OptionKind, cell: &OptionCell) -> OptionValue {
    let items = match cell {
        OptionCell::Map(map) => return OptionValue::Map(map.clone()),
        OptionCell::List(items) => items,
    };
    if items.is_empty() {
        return kind.absent();
    }

    match kind {
        OptionKind::Simple => OptionValue::Bool(true),
        OptionKind::Toggle => OptionValue::Bool(items.len() % 2 == 1),
        OptionKind::Count => OptionValue::Count(items.len()),
        OptionKind::Value => items.last().map(OptionValue::from).unwrap_or(OptionValue::Bool(false)),
        OptionKind::Optional => items
            .iter()
            .rev()
            .find_map(|item| match item {
                Occurrence::Value(value) => Some(OptionValue::Str(value.clone())),
                Occurrence::Flag => None,
            })
            .unwrap_or(OptionValue::Bool(true)),
        OptionKind::ValueMultiple | OptionKind::OptionalMultiple => list(items),
        OptionKind::ValueAutomatic | OptionKind::OptionalAutomatic => match items.as_slice() {
            [single] => OptionValue::from(single),
            _ => list(items),
        },
        // An associative option always owns a map cell.
        OptionKind::Associative => OptionValue::Map(BTreeMap::new()),
    }
}

fn list(items: &[Occurrence]) -> OptionValue {
    OptionValue::List(items.iter().map(OptionValue::from).collect())
}

impl ParseState {
    /// Shapes every declared option. Does not consume or change the state.
    pub fn shape(&self) -> BTreeMap<String, OptionValue> {
        self.cells
            .iter()
            .map(|(id, cell)| {
                let kind = self.kinds.get(id).copied().unwrap_or(OptionKind::Simple);
                (id.clone(), shape(kind, cell))
            })
            .collect()
    }

    /// Shapes the state into the final result.
    pub fn finish(self) -> ParseResult {
        let values = self.shape();
        ParseResult {
            errors: self.errors,
            values,
            positionals: self.positionals,
        }
    }
}

/// The outcome of one parse call.
///
/// Every declared option has a value, even when errors occurred; values of
/// options named in an error message are best effort.
///
/// # Examples
///
/// ```
/// use getopts_core::{CompiledTable, DefinitionTable, OptionKind};
///
/// let table = CompiledTable::compile(
///     &DefinitionTable::new().option("name", OptionKind::Value, &["n", "name"]),
/// )
/// .unwrap();
///
/// let (errors, values, args) = table.parse(["--name=x", "file"]).into_parts();
/// assert!(errors.is_none());
/// assert_eq!(values["name"].as_str(), Some("x"));
/// assert_eq!(args, vec!["file"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    errors: Vec<ParseError>,
    values: BTreeMap<String, OptionValue>,
    positionals: Vec<String>,
}

impl ParseResult {
    /// The shaped value of option `id`.
    pub fn get(&self, id: &str) -> Option<&OptionValue> {
        self.values.get(id)
    }

    pub fn values(&self) -> &BTreeMap<String, OptionValue> {
        &self.values
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Error sentences, or `None` when the parse was clean.
    pub fn error_messages(&self) -> Option<Vec<String>> {
        if self.errors.is_empty() {
            None
        } else {
            Some(self.errors.iter().map(ToString::to_string).collect())
        }
    }

    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    /// Splits the result into `(errors, values, positionals)`.
    pub fn into_parts(
        self,
    ) -> (
        Option<Vec<String>>,
        BTreeMap<String, OptionValue>,
        Vec<String>,
    ) {
        (self.error_messages(), self.values, self.positionals)
    }
}
