// src/profile/options.rs

//! Package options and the fixed Boost module table

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A Boost library that can be left out of the build
///
/// Each module has a `without_<name>` option; declaration order is the
/// order `--without-<name>` flags are emitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Module {
    Atomic,
    Chrono,
    Container,
    Context,
    Coroutine,
    Coroutine2,
    DateTime,
    Exception,
    Fiber,
    Filesystem,
    Graph,
    GraphParallel,
    Iostreams,
    Locale,
    Log,
    Math,
    Metaparse,
    Mpi,
    ProgramOptions,
    Python,
    Random,
    Regex,
    Serialization,
    Signals,
    System,
    Test,
    Thread,
    Timer,
    TypeErasure,
    Wave,
}

impl Module {
    /// Every module, in declaration order
    pub const ALL: [Module; 30] = [
        Self::Atomic,
        Self::Chrono,
        Self::Container,
        Self::Context,
        Self::Coroutine,
        Self::Coroutine2,
        Self::DateTime,
        Self::Exception,
        Self::Fiber,
        Self::Filesystem,
        Self::Graph,
        Self::GraphParallel,
        Self::Iostreams,
        Self::Locale,
        Self::Log,
        Self::Math,
        Self::Metaparse,
        Self::Mpi,
        Self::ProgramOptions,
        Self::Python,
        Self::Random,
        Self::Regex,
        Self::Serialization,
        Self::Signals,
        Self::System,
        Self::Test,
        Self::Thread,
        Self::Timer,
        Self::TypeErasure,
        Self::Wave,
    ];

    /// Directory name under `libs/` in the Boost tree
    pub fn name(&self) -> &'static str {
        match self {
            Self::Atomic => "atomic",
            Self::Chrono => "chrono",
            Self::Container => "container",
            Self::Context => "context",
            Self::Coroutine => "coroutine",
            Self::Coroutine2 => "coroutine2",
            Self::DateTime => "date_time",
            Self::Exception => "exception",
            Self::Fiber => "fiber",
            Self::Filesystem => "filesystem",
            Self::Graph => "graph",
            Self::GraphParallel => "graph_parallel",
            Self::Iostreams => "iostreams",
            Self::Locale => "locale",
            Self::Log => "log",
            Self::Math => "math",
            Self::Metaparse => "metaparse",
            Self::Mpi => "mpi",
            Self::ProgramOptions => "program_options",
            Self::Python => "python",
            Self::Random => "random",
            Self::Regex => "regex",
            Self::Serialization => "serialization",
            Self::Signals => "signals",
            Self::System => "system",
            Self::Test => "test",
            Self::Thread => "thread",
            Self::Timer => "timer",
            Self::TypeErasure => "type_erasure",
            Self::Wave => "wave",
        }
    }

    /// Look up a module by its directory name
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.name() == name)
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Module {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| Error::InvalidOption(format!("unknown module: {}", s)))
    }
}

/// Package options
///
/// `shared`, `fpic` and `python` are `None` once configuration has removed
/// them (header-only packages, or `fPIC` under Visual Studio).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    #[serde(default = "default_false")]
    pub shared: Option<bool>,

    #[serde(default)]
    pub header_only: bool,

    #[serde(default = "default_false", rename = "fPIC", alias = "fpic")]
    pub fpic: Option<bool>,

    #[serde(default = "default_false")]
    pub python: Option<bool>,

    /// Modules whose `without_<module>` option is set
    #[serde(default)]
    pub without: BTreeSet<Module>,
}

fn default_false() -> Option<bool> {
    Some(false)
}

impl Default for Options {
    fn default() -> Self {
        Self {
            shared: Some(false),
            header_only: false,
            fpic: Some(false),
            python: Some(false),
            without: BTreeSet::new(),
        }
    }
}

impl Options {
    /// Shared libraries requested (false when the option was removed)
    pub fn shared(&self) -> bool {
        self.shared.unwrap_or(false)
    }

    pub fn fpic(&self) -> bool {
        self.fpic.unwrap_or(false)
    }

    pub fn python(&self) -> bool {
        self.python.unwrap_or(false)
    }

    pub fn is_disabled(&self, module: Module) -> bool {
        self.without.contains(&module)
    }

    /// Whether a module named in a build log is switched off
    ///
    /// Names outside the module table have no `without_` option and are
    /// never disabled.
    pub fn is_module_disabled(&self, name: &str) -> bool {
        Module::parse(name).is_some_and(|m| self.is_disabled(m))
    }

    /// Disabled modules in declaration order
    pub fn disabled_modules(&self) -> impl Iterator<Item = Module> + '_ {
        Module::ALL.iter().copied().filter(|m| self.is_disabled(*m))
    }

    /// Apply a `key=value` override such as `shared=True` or `without_mpi=True`
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let flag = parse_bool(value)
            .ok_or_else(|| Error::InvalidOption(format!("{}={} (expected True/False)", key, value)))?;

        match key {
            "shared" => set_removable(&mut self.shared, key, flag)?,
            "fPIC" | "fpic" => set_removable(&mut self.fpic, key, flag)?,
            "python" => set_removable(&mut self.python, key, flag)?,
            "header_only" => self.header_only = flag,
            _ => {
                let module = key
                    .strip_prefix("without_")
                    .and_then(Module::parse)
                    .ok_or_else(|| Error::InvalidOption(format!("unknown option: {}", key)))?;
                if flag {
                    self.without.insert(module);
                } else {
                    self.without.remove(&module);
                }
            }
        }
        Ok(())
    }
}

fn set_removable(slot: &mut Option<bool>, key: &str, flag: bool) -> Result<()> {
    match slot {
        Some(value) => {
            *value = flag;
            Ok(())
        }
        None => Err(Error::InvalidOption(format!(
            "option '{}' does not exist in this configuration",
            key
        ))),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "True" | "true" | "1" => Some(true),
        "False" | "false" | "0" => Some(false),
        _ => None,
    }
}
