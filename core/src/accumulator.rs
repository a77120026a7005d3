//! Per-parse state: raw occurrences, errors and positional arguments.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::{Serialize, Serializer};

use crate::error::ParseError;
use crate::kind::OptionKind;

/// One encounter of an option on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Occurrence {
    /// Seen without a value.
    Flag,
    /// Seen with a value.
    Value(String),
}

// A flag serializes as `true`, matching how it appears in shaped lists.
impl Serialize for Occurrence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Occurrence::Flag => serializer.serialize_bool(true),
            Occurrence::Value(value) => serializer.serialize_str(value),
        }
    }
}

/// The raw occurrences collected for one option.
///
/// The representation is fixed by the option's kind when the state is
/// created: associative options collect a key map, every other kind an
/// ordered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionCell {
    List(Vec<Occurrence>),
    Map(BTreeMap<String, String>),
}

impl OptionCell {
    /// Creates the empty cell matching `kind`.
    pub fn for_kind(kind: OptionKind) -> Self {
        if kind.is_associative() {
            OptionCell::Map(BTreeMap::new())
        } else {
            OptionCell::List(Vec::new())
        }
    }

    /// Number of recorded occurrences (or keys).
    pub fn len(&self) -> usize {
        match self {
            OptionCell::List(items) => items.len(),
            OptionCell::Map(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything a single parse call produces before shaping.
///
/// Exposed so callers can look at unshaped occurrences, e.g. to tell
/// `-o` from `-o=x -o` where the shaped value hides the difference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseState {
    pub(crate) kinds: BTreeMap<String, OptionKind>,
    pub(crate) cells: BTreeMap<String, OptionCell>,
    pub(crate) errors: Vec<ParseError>,
    pub(crate) positionals: Vec<String>,
}

impl ParseState {
    /// Creates an empty state with one cell per declared option.
    pub(crate) fn new(kinds: &BTreeMap<String, OptionKind>) -> Self {
        let cells = kinds
            .iter()
            .map(|(id, kind)| (id.clone(), OptionCell::for_kind(*kind)))
            .collect();
        Self {
            kinds: kinds.clone(),
            cells,
            errors: Vec::new(),
            positionals: Vec::new(),
        }
    }

    /// Appends an occurrence to a list cell.
    pub(crate) fn push(&mut self, id: &str, occurrence: Occurrence) {
        if let Some(OptionCell::List(items)) = self.cells.get_mut(id) {
            items.push(occurrence);
        }
    }

    /// Inserts a key into a map cell. Returns `false` if the key was
    /// already present; the existing value is kept.
    pub(crate) fn insert_pair(&mut self, id: &str, key: &str, value: &str) -> bool {
        let Some(OptionCell::Map(map)) = self.cells.get_mut(id) else {
            return false;
        };
        match map.entry(key.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(value.to_string());
                true
            }
        }
    }

    pub(crate) fn error(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    pub(crate) fn positional(&mut self, arg: String) {
        self.positionals.push(arg);
    }

    /// The cell of option `id`, if declared.
    pub fn cell(&self, id: &str) -> Option<&OptionCell> {
        self.cells.get(id)
    }

    /// All cells keyed by option identifier.
    pub fn cells(&self) -> &BTreeMap<String, OptionCell> {
        &self.cells
    }

    /// Declared kind of option `id`.
    pub fn kind(&self, id: &str) -> Option<OptionKind> {
        self.kinds.get(id).copied()
    }

    /// Errors in the order they were found.
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Positional arguments in encounter order.
    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }
}
