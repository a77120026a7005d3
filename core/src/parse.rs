//! Walking the raw arguments and dispatching them to options.
//!
//! Recognized syntax:
//!
//! - `--long`, `--long=value`
//! - `-s`, `-svalue`, `-s=value`, and clusters such as `-abc`
//! - `--` ends option processing; everything after it is positional
//! - a bare `-` is always an error
//! - anything else (including the empty string) is positional
//!
//! Errors are recorded and the walk continues, so one call reports every
//! problem in the input.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::accumulator::{Occurrence, ParseState};
use crate::error::ParseError;
use crate::kind::Consumption;
use crate::shape::ParseResult;
use crate::source::ArgSource;
use crate::table::CompiledTable;

/// How one raw argument is read before any table lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    /// `--`
    Separator,
    /// `-`
    BareDash,
    Positional,
    Long {
        name: &'a str,
        attached: Option<&'a str>,
    },
    /// The characters after a single leading dash.
    Cluster(&'a str),
}

fn classify(arg: &str) -> Token<'_> {
    if arg == "--" {
        Token::Separator
    } else if arg == "-" {
        Token::BareDash
    } else if let Some(rest) = arg.strip_prefix("--") {
        match rest.split_once('=') {
            Some((name, value)) => Token::Long {
                name,
                attached: Some(value),
            },
            None => Token::Long {
                name: rest,
                attached: None,
            },
        }
    } else if let Some(rest) = arg.strip_prefix('-') {
        Token::Cluster(rest)
    } else {
        Token::Positional
    }
}

/// Whether a short cluster keeps going after an option was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

struct Dispatcher<'t> {
    table: &'t CompiledTable,
    pending: VecDeque<String>,
    state: ParseState,
}

impl<'t> Dispatcher<'t> {
    fn new(table: &'t CompiledTable, args: VecDeque<String>) -> Self {
        Self {
            table,
            pending: args,
            state: ParseState::new(&table.kinds),
        }
    }

    fn run(mut self) -> ParseState {
        while let Some(arg) = self.pending.pop_front() {
            let token = classify(&arg);
            trace!(arg = %arg, token = ?token, "Classified argument");

            match token {
                Token::Separator => {
                    for rest in self.pending.drain(..) {
                        self.state.positional(rest);
                    }
                }
                Token::BareDash => self.state.error(ParseError::InvalidOption(arg.to_string())),
                Token::Positional => self.state.positional(arg.to_string()),
                Token::Long { name, attached } => self.long(name, attached),
                Token::Cluster(chars) => self.cluster(chars),
            }
        }
        self.state
    }

    fn long(&mut self, name: &str, attached: Option<&str>) {
        let table = self.table;
        let spelling = format!("--{name}");
        match table.long(name) {
            Some(id) => {
                self.dispatch(id, &spelling, attached);
            }
            None => self.state.error(ParseError::UnknownOption(spelling)),
        }
    }

    fn cluster(&mut self, chars: &str) {
        let table = self.table;
        for (offset, c) in chars.char_indices() {
            let spelling = format!("-{c}");
            let Some(id) = table.short(c) else {
                self.state.error(ParseError::UnknownOption(spelling));
                break;
            };

            let rest = &chars[offset + c.len_utf8()..];
            let attached = if rest.is_empty() {
                None
            } else {
                Some(rest.strip_prefix('=').unwrap_or(rest))
            };

            if self.dispatch(id, &spelling, attached) == Flow::Stop {
                break;
            }
        }
    }

    /// Applies the consumption rule of option `id`.
    fn dispatch(&mut self, id: &str, spelling: &str, attached: Option<&str>) -> Flow {
        let Some(kind) = self.table.kind(id) else {
            return Flow::Continue;
        };

        match kind.consumption() {
            Consumption::None => {
                self.state.push(id, Occurrence::Flag);
                Flow::Continue
            }
            Consumption::Attached => {
                let occurrence = match attached {
                    Some(value) => Occurrence::Value(value.to_string()),
                    None => Occurrence::Flag,
                };
                self.state.push(id, occurrence);
                Flow::Stop
            }
            Consumption::Required => {
                let value = match attached {
                    Some(value) => Some(value.to_string()),
                    None => self.pending.pop_front(),
                };
                match value {
                    None => self
                        .state
                        .error(ParseError::MissingArgument(spelling.to_string())),
                    Some(value) if kind.is_associative() => self.associate(id, spelling, &value),
                    Some(value) => self.state.push(id, Occurrence::Value(value)),
                }
                Flow::Stop
            }
        }
    }

    fn associate(&mut self, id: &str, spelling: &str, value: &str) {
        let Some((key, tail)) = value.split_once('=') else {
            self.state
                .error(ParseError::MalformedArgument(spelling.to_string()));
            return;
        };
        if !self.state.insert_pair(id, key, tail) {
            self.state.error(ParseError::DuplicateKey {
                key: key.to_string(),
                option: spelling.to_string(),
            });
        }
    }
}

impl CompiledTable {
    /// Parses `args` and shapes the result.
    ///
    /// # Examples
    ///
    /// ```
    /// use getopts_core::{CompiledTable, DefinitionTable, OptionKind, OptionValue};
    ///
    /// let table = CompiledTable::compile(
    ///     &DefinitionTable::new()
    ///         .option("verbose", OptionKind::Count, &["v"])
    ///         .option("output", OptionKind::Value, &["o", "output"]),
    /// )
    /// .unwrap();
    ///
    /// let result = table.parse(["-vvo", "out.txt", "input", "--", "-v"]);
    /// assert!(!result.has_errors());
    /// assert_eq!(result.get("verbose"), Some(&OptionValue::Count(2)));
    /// assert_eq!(result.get("output").unwrap().as_str(), Some("out.txt"));
    /// assert_eq!(result.positionals(), ["input", "-v"]);
    /// ```
    pub fn parse<I, S>(&self, args: I) -> ParseResult
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parse_state(args).finish()
    }

    /// Parses `args` without shaping, exposing the raw occurrences.
    ///
    /// # Examples
    ///
    /// ```
    /// use getopts_core::{CompiledTable, DefinitionTable, Occurrence, OptionCell, OptionKind};
    ///
    /// let table = CompiledTable::compile(
    ///     &DefinitionTable::new().option("color", OptionKind::Optional, &["c", "color"]),
    /// )
    /// .unwrap();
    ///
    /// let state = table.parse_state(["--color=auto", "-c"]);
    /// assert_eq!(
    ///     state.cell("color"),
    ///     Some(&OptionCell::List(vec![Occurrence::Value("auto".into()), Occurrence::Flag]))
    /// );
    /// ```
    pub fn parse_state<I, S>(&self, args: I) -> ParseState
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let pending: VecDeque<String> = args.into_iter().map(Into::into).collect();
        let total = pending.len();
        let state = Dispatcher::new(self, pending).run();
        debug!(
            args = total,
            errors = state.errors().len(),
            positionals = state.positionals().len(),
            "Parsed arguments"
        );
        state
    }

    /// Parses the arguments supplied by `source`.
    pub fn parse_from<A: ArgSource + ?Sized>(&self, source: &A) -> ParseResult {
        self.parse(source.args())
    }
}
