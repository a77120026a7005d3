//! The closed set of option kinds.
//!
//! A kind decides two things about an option: how it consumes tokens while
//! the arguments are walked (see [`Consumption`]) and how its collected
//! occurrences are folded into the final value (see [`shape()`](crate::shape())).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shape::OptionValue;

/// How an option is declared to behave on the command line.
///
/// Kinds are written as short tags in compact definitions. The canonical
/// tags are `S`, `T`, `C`, `V`, `Vm`, `Va`, `O`, `Om`, `Oa` and `A`; the
/// older two-letter spellings `Ss`, `St`, `Sc`, `Vs` and `Os` are accepted
/// as aliases, as are snake-case names such as `value_multiple`.
///
/// # Examples
///
/// ```
/// use getopts_core::OptionKind;
///
/// let kind: OptionKind = "Vm".parse().unwrap();
/// assert_eq!(kind, OptionKind::ValueMultiple);
/// assert_eq!("St".parse::<OptionKind>().unwrap(), OptionKind::Toggle);
/// assert_eq!(OptionKind::Toggle.tag(), "T");
/// assert!("X".parse::<OptionKind>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum OptionKind {
    /// Present or absent.
    Simple,
    /// Each occurrence flips the value.
    Toggle,
    /// Number of occurrences.
    Count,
    /// Requires a value; the last one wins.
    Value,
    /// Requires a value on each occurrence; all are returned.
    ValueMultiple,
    /// Like [`ValueMultiple`](Self::ValueMultiple), collapsed to a single
    /// value when given once.
    ValueAutomatic,
    /// Takes an attached value if one is given, otherwise a bare marker.
    Optional,
    /// All occurrences of an optional-value option.
    OptionalMultiple,
    /// Like [`OptionalMultiple`](Self::OptionalMultiple), collapsed when
    /// given once.
    OptionalAutomatic,
    /// Each value is a `key=value` pair; keys must be unique.
    Associative,
}

/// What an option does with the token material that follows its spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consumption {
    /// Never takes a value; an attached value is ignored.
    None,
    /// Takes the attached value, or else the next token. Missing is an error.
    Required,
    /// Takes the attached value if present, never the next token.
    Attached,
}

/// A kind tag that is not in the known set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown option kind \"{0}\"")]
pub struct UnknownKind(pub String);

impl OptionKind {
    /// Every kind, in declaration order.
    pub const ALL: [OptionKind; 10] = [
        OptionKind::Simple,
        OptionKind::Toggle,
        OptionKind::Count,
        OptionKind::Value,
        OptionKind::ValueMultiple,
        OptionKind::ValueAutomatic,
        OptionKind::Optional,
        OptionKind::OptionalMultiple,
        OptionKind::OptionalAutomatic,
        OptionKind::Associative,
    ];

    /// Returns the canonical short tag.
    pub fn tag(self) -> &'static str {
        match self {
            OptionKind::Simple => "S",
            OptionKind::Toggle => "T",
            OptionKind::Count => "C",
            OptionKind::Value => "V",
            OptionKind::ValueMultiple => "Vm",
            OptionKind::ValueAutomatic => "Va",
            OptionKind::Optional => "O",
            OptionKind::OptionalMultiple => "Om",
            OptionKind::OptionalAutomatic => "Oa",
            OptionKind::Associative => "A",
        }
    }

    /// Returns the consumption rule applied by the dispatcher.
    ///
    /// # Examples
    ///
    /// ```
    /// use getopts_core::{Consumption, OptionKind};
    ///
    /// assert_eq!(OptionKind::Count.consumption(), Consumption::None);
    /// assert_eq!(OptionKind::Associative.consumption(), Consumption::Required);
    /// assert_eq!(OptionKind::OptionalAutomatic.consumption(), Consumption::Attached);
    /// ```
    pub fn consumption(self) -> Consumption {
        match self {
            OptionKind::Simple | OptionKind::Toggle | OptionKind::Count => Consumption::None,
            OptionKind::Value
            | OptionKind::ValueMultiple
            | OptionKind::ValueAutomatic
            | OptionKind::Associative => Consumption::Required,
            OptionKind::Optional | OptionKind::OptionalMultiple | OptionKind::OptionalAutomatic => {
                Consumption::Attached
            }
        }
    }

    /// Returns the value reported for an option that never appeared.
    ///
    /// # Examples
    ///
    /// ```
    /// use getopts_core::{OptionKind, OptionValue};
    ///
    /// assert_eq!(OptionKind::Count.absent(), OptionValue::Count(0));
    /// assert_eq!(OptionKind::Value.absent(), OptionValue::Bool(false));
    /// assert!(matches!(OptionKind::Associative.absent(), OptionValue::Map(m) if m.is_empty()));
    /// ```
    pub fn absent(self) -> OptionValue {
        match self {
            OptionKind::Count => OptionValue::Count(0),
            OptionKind::Associative => OptionValue::Map(Default::default()),
            _ => OptionValue::Bool(false),
        }
    }

    /// Whether occurrences are collected as `key=value` pairs.
    pub fn is_associative(self) -> bool {
        self == OptionKind::Associative
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for OptionKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let kind = match s {
            "S" | "Ss" | "simple" => OptionKind::Simple,
            "T" | "St" | "toggle" => OptionKind::Toggle,
            "C" | "Sc" | "count" => OptionKind::Count,
            "V" | "Vs" | "value" => OptionKind::Value,
            "Vm" | "value_multiple" => OptionKind::ValueMultiple,
            "Va" | "value_automatic" => OptionKind::ValueAutomatic,
            "O" | "Os" | "optional" => OptionKind::Optional,
            "Om" | "optional_multiple" => OptionKind::OptionalMultiple,
            "Oa" | "optional_automatic" => OptionKind::OptionalAutomatic,
            "A" | "associative" => OptionKind::Associative,
            other => return Err(UnknownKind(other.to_string())),
        };
        Ok(kind)
    }
}

impl TryFrom<String> for OptionKind {
    type Error = UnknownKind;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<OptionKind> for &'static str {
    fn from(kind: OptionKind) -> Self {
        kind.tag()
    }
}
