//! Option definitions as declared by the caller.
//!
//! A definition pairs an [`OptionKind`] with one or more spellings. Nothing
//! here is validated beyond the kind tag; spellings are checked when the
//! table is compiled (see [`CompiledTable::compile`](crate::CompiledTable::compile)).
//!
//! Definitions can be written three ways, all equivalent:
//!
//! ```
//! use getopts_core::{DefinitionTable, OptionKind};
//!
//! let json = r#"{
//!     "compact":    "Vm o output",
//!     "list":       ["Vm", "i", "input"],
//!     "structured": { "kind": "Vm", "names": ["x", "exclude"] }
//! }"#;
//! let table: DefinitionTable = serde_json::from_str(json).unwrap();
//!
//! for (_, def) in table.iter() {
//!     assert_eq!(def.kind, OptionKind::ValueMultiple);
//!     assert_eq!(def.names.len(), 2);
//! }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{DefinitionError, Result};
use crate::kind::OptionKind;

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^-?[0-9A-Za-z]+(?:-[0-9A-Za-z]+)*$").expect("static regex must compile")
});

/// One user-facing name of an option.
///
/// # Examples
///
/// ```
/// use getopts_core::Spelling;
///
/// assert_eq!(Spelling::parse("opt", "v").unwrap(), Spelling::Short('v'));
/// assert_eq!(Spelling::parse("opt", "dry-run").unwrap(), Spelling::Long("dry-run".into()));
/// // A leading hyphen forces the long form, even for one character.
/// assert_eq!(Spelling::parse("opt", "-a").unwrap(), Spelling::Long("a".into()));
/// assert_eq!(Spelling::Short('v').to_string(), "-v");
/// assert!(Spelling::parse("opt", "--a").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Spelling {
    /// A single alphanumeric character, used as `-c`.
    Short(char),
    /// A word, used as `--word`. Stored without dashes.
    Long(String),
}

impl Spelling {
    /// Validates a declared spelling for the option `option`.
    ///
    /// # Errors
    ///
    /// Returns [`DefinitionError::MalformedName`] if `raw` is neither a
    /// single alphanumeric character nor an alphanumeric word with optional
    /// inner hyphens and an optional leading hyphen.
    pub fn parse(option: &str, raw: &str) -> Result<Self> {
        if !NAME_RE.is_match(raw) {
            return Err(DefinitionError::MalformedName {
                option: option.to_string(),
                name: raw.to_string(),
            });
        }

        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Spelling::Short(c)),
            _ => Ok(Spelling::Long(
                raw.strip_prefix('-').unwrap_or(raw).to_string(),
            )),
        }
    }
}

impl fmt::Display for Spelling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Spelling::Short(c) => write!(f, "-{c}"),
            Spelling::Long(name) => write!(f, "--{name}"),
        }
    }
}

/// A single option: its kind and its declared spellings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionDefinition {
    /// How the option consumes values and shapes its result.
    pub kind: OptionKind,
    /// Spellings as declared (unvalidated).
    pub names: Vec<String>,
}

impl OptionDefinition {
    /// Creates a definition from a kind and spellings.
    pub fn new<S: AsRef<str>>(kind: OptionKind, names: &[S]) -> Self {
        Self {
            kind,
            names: names.iter().map(|n| n.as_ref().to_string()).collect(),
        }
    }

    /// Parses the compact form `"<kind> <name> [<name>...]"`.
    ///
    /// # Errors
    ///
    /// [`DefinitionError::MissingNames`] when `spec` is blank and
    /// [`DefinitionError::InvalidKind`] when the first word is not a kind tag.
    ///
    /// # Examples
    ///
    /// ```
    /// use getopts_core::{OptionDefinition, OptionKind};
    ///
    /// let def = OptionDefinition::parse("level", "C v verbose").unwrap();
    /// assert_eq!(def.kind, OptionKind::Count);
    /// assert_eq!(def.names, vec!["v", "verbose"]);
    /// ```
    pub fn parse(option: &str, spec: &str) -> Result<Self> {
        let words: Vec<&str> = spec.split_whitespace().collect();
        Self::from_words(option, &words)
    }

    fn from_words<S: AsRef<str>>(option: &str, words: &[S]) -> Result<Self> {
        let Some((tag, names)) = words.split_first() else {
            return Err(DefinitionError::MissingNames {
                option: option.to_string(),
            });
        };
        let kind = parse_kind(option, tag.as_ref())?;
        Ok(Self::new(kind, names))
    }
}

fn parse_kind(option: &str, tag: &str) -> Result<OptionKind> {
    tag.parse().map_err(|_| DefinitionError::InvalidKind {
        option: option.to_string(),
        kind: tag.to_string(),
    })
}

/// The accepted input shapes of a definition in a JSON or YAML document.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DefinitionSpec {
    /// `"Vm o output"`
    Compact(String),
    /// `["Vm", "o", "output"]`
    List(Vec<String>),
    /// `{ kind: Vm, names: [o, output] }`
    Structured {
        /// Kind tag.
        kind: String,
        /// Spellings.
        #[serde(default)]
        names: Vec<String>,
    },
}

impl DefinitionSpec {
    /// Converts the spec of option `option` into a definition.
    pub fn into_definition(self, option: &str) -> Result<OptionDefinition> {
        match self {
            DefinitionSpec::Compact(spec) => OptionDefinition::parse(option, &spec),
            DefinitionSpec::List(words) => OptionDefinition::from_words(option, &words),
            DefinitionSpec::Structured { kind, names } => {
                Ok(OptionDefinition::new(parse_kind(option, &kind)?, &names))
            }
        }
    }
}

/// The full set of options recognized by a program, keyed by identifier.
///
/// Identifiers are chosen by the caller and become the keys of the parse
/// result. Iteration is in identifier order.
///
/// # Examples
///
/// ```
/// use getopts_core::{DefinitionTable, OptionKind};
///
/// let table = DefinitionTable::new()
///     .option("verbose", OptionKind::Count, &["v", "verbose"])
///     .option("output", OptionKind::Value, &["o", "output"]);
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.get("output").unwrap().kind, OptionKind::Value);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "BTreeMap<String, DefinitionSpec>")]
pub struct DefinitionTable {
    options: BTreeMap<String, OptionDefinition>,
}

impl DefinitionTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) an option, builder style.
    pub fn option<S: AsRef<str>>(mut self, id: &str, kind: OptionKind, names: &[S]) -> Self {
        self.insert(id, OptionDefinition::new(kind, names));
        self
    }

    /// Adds an option from its compact form, builder style.
    ///
    /// # Errors
    ///
    /// Propagates [`OptionDefinition::parse`] errors.
    pub fn compact(mut self, id: &str, spec: &str) -> Result<Self> {
        self.insert(id, OptionDefinition::parse(id, spec)?);
        Ok(self)
    }

    /// Inserts a definition, returning the one it replaced.
    pub fn insert(&mut self, id: &str, definition: OptionDefinition) -> Option<OptionDefinition> {
        self.options.insert(id.to_string(), definition)
    }

    /// Merges `other` into `self`; definitions in `other` win on equal ids.
    pub fn extend(&mut self, other: DefinitionTable) {
        self.options.extend(other.options);
    }

    /// Looks up a definition by identifier.
    pub fn get(&self, id: &str) -> Option<&OptionDefinition> {
        self.options.get(id)
    }

    /// Iterates over `(identifier, definition)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionDefinition)> {
        self.options.iter().map(|(id, def)| (id.as_str(), def))
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

impl TryFrom<BTreeMap<String, DefinitionSpec>> for DefinitionTable {
    type Error = DefinitionError;

    fn try_from(specs: BTreeMap<String, DefinitionSpec>) -> Result<Self> {
        let mut table = DefinitionTable::new();
        for (id, spec) in specs {
            let definition = spec.into_definition(&id)?;
            table.insert(&id, definition);
        }
        Ok(table)
    }
}

impl FromIterator<(String, OptionDefinition)> for DefinitionTable {
    fn from_iter<I: IntoIterator<Item = (String, OptionDefinition)>>(iter: I) -> Self {
        Self {
            options: iter.into_iter().collect(),
        }
    }
}
