//! Compiling a definition table into lookup maps.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use crate::definition::{DefinitionTable, Spelling};
use crate::error::{DefinitionError, Result};
use crate::kind::OptionKind;

/// The lookup structures used by every parse of one option table.
///
/// Built once by [`compile`](Self::compile) and never modified afterwards;
/// it can be shared by reference between threads and reused for any number
/// of parses.
///
/// # Examples
///
/// ```
/// use getopts_core::{CompiledTable, DefinitionTable, OptionKind};
///
/// let defs = DefinitionTable::new()
///     .option("all", OptionKind::Simple, &["a", "all"])
///     .option("width", OptionKind::Value, &["w", "-w"]);
/// let table = CompiledTable::compile(&defs).unwrap();
///
/// assert_eq!(table.short('a'), Some("all"));
/// assert_eq!(table.long("w"), Some("width"));
/// assert_eq!(table.kind("width"), Some(OptionKind::Value));
/// assert_eq!(table.long("x"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledTable {
    short: HashMap<char, String>,
    long: HashMap<String, String>,
    pub(crate) kinds: BTreeMap<String, OptionKind>,
}

impl CompiledTable {
    /// Validates `definitions` and builds the lookup maps.
    ///
    /// Stops at the first problem. Short and long spellings live in separate
    /// namespaces, so `v` and `-v` (long `--v`) do not collide.
    ///
    /// # Errors
    ///
    /// - [`DefinitionError::MissingNames`] for an option with no spellings.
    /// - [`DefinitionError::MalformedName`] for an invalid spelling.
    /// - [`DefinitionError::DuplicateName`] when a spelling is claimed twice.
    pub fn compile(definitions: &DefinitionTable) -> Result<Self> {
        let mut table = CompiledTable::default();

        for (id, definition) in definitions.iter() {
            if definition.names.is_empty() {
                return Err(DefinitionError::MissingNames {
                    option: id.to_string(),
                });
            }

            for raw in &definition.names {
                match Spelling::parse(id, raw)? {
                    Spelling::Short(c) => match table.short.entry(c) {
                        Entry::Occupied(_) => {
                            return Err(DefinitionError::DuplicateName(c.to_string()));
                        }
                        Entry::Vacant(slot) => {
                            slot.insert(id.to_string());
                        }
                    },
                    Spelling::Long(name) => match table.long.entry(name) {
                        Entry::Occupied(slot) => {
                            return Err(DefinitionError::DuplicateName(slot.key().clone()));
                        }
                        Entry::Vacant(slot) => {
                            slot.insert(id.to_string());
                        }
                    },
                }
            }

            table.kinds.insert(id.to_string(), definition.kind);
        }

        debug!(
            options = table.kinds.len(),
            short = table.short.len(),
            long = table.long.len(),
            "Compiled option table"
        );
        Ok(table)
    }

    /// Option id for a short spelling.
    pub fn short(&self, c: char) -> Option<&str> {
        self.short.get(&c).map(String::as_str)
    }

    /// Option id for a long spelling (without dashes).
    pub fn long(&self, name: &str) -> Option<&str> {
        self.long.get(name).map(String::as_str)
    }

    /// Declared kind of option `id`.
    pub fn kind(&self, id: &str) -> Option<OptionKind> {
        self.kinds.get(id).copied()
    }

    /// Iterates over `(identifier, kind)` in identifier order.
    pub fn options(&self) -> impl Iterator<Item = (&str, OptionKind)> {
        self.kinds.iter().map(|(id, kind)| (id.as_str(), *kind))
    }

    /// All spellings of option `id`, short ones first, each group sorted.
    pub fn spellings(&self, id: &str) -> Vec<Spelling> {
        let mut short: Vec<char> = self
            .short
            .iter()
            .filter(|(_, owner)| owner.as_str() == id)
            .map(|(c, _)| *c)
            .collect();
        short.sort_unstable();

        let mut long: Vec<&String> = self
            .long
            .iter()
            .filter(|(_, owner)| owner.as_str() == id)
            .map(|(name, _)| name)
            .collect();
        long.sort();

        short
            .into_iter()
            .map(Spelling::Short)
            .chain(long.into_iter().map(|name| Spelling::Long(name.clone())))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
