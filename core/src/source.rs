//! Where raw arguments come from.
//!
//! The parser itself only ever sees a sequence of strings. Reading the host
//! process's argument list goes through [`ArgSource`] so that parsing stays a
//! pure function of the table and its input.

/// A provider of raw argument strings, program name excluded.
pub trait ArgSource {
    fn args(&self) -> Vec<String>;
}

/// The arguments of the running process, without the program name.
///
/// Arguments that are not valid UTF-8 are converted lossily.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessArgs;

impl ArgSource for ProcessArgs {
    fn args(&self) -> Vec<String> {
        std::env::args_os()
            .skip(1)
            .map(|arg| {
                arg.into_string()
                    .unwrap_or_else(|raw| raw.to_string_lossy().into_owned())
            })
            .collect()
    }
}

impl ArgSource for Vec<String> {
    fn args(&self) -> Vec<String> {
        self.clone()
    }
}

impl ArgSource for [String] {
    fn args(&self) -> Vec<String> {
        self.to_vec()
    }
}

impl ArgSource for [&str] {
    fn args(&self) -> Vec<String> {
        self.iter().map(|s| s.to_string()).collect()
    }
}
