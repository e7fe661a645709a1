// src/recipe/buildlog.rs

//! Build log artifact collector
//!
//! b2 run with `-d2` prints one line per action, e.g.
//!
//! ```text
//! gcc.archive bin.v2/libs/system/build/gcc-7/release/link-static/libboost_system.a
//! gcc.link.dll bin.v2/libs/thread/build/gcc-7/release/threading-multi/libboost_thread.so.1.65.1
//! ```
//!
//! The collector picks the archive (static) or shared-link actions out of
//! that transcript, groups the produced libraries by the `libs/<module>/`
//! directory they were built under, and returns their logical names in
//! linker order.
//!
//! The parser is tied to that line format; other b2 output is ignored.

use crate::error::{Error, Result};
use crate::profile::{Options, Profile};
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::{debug, trace};

/// Library file extensions that may carry a `lib` prefix
const LIBRARY_EXTENSIONS: &[&str] = &[".so", ".lib", ".a", ".dylib"];

/// Import library extension; its base name keeps the `lib` prefix
const IMPORT_LIBRARY_EXTENSION: &str = ".lib";

/// Kind of link step the collector looks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkMode {
    /// `<toolset>.archive` lines
    Static,
    /// `<toolset>.link.dll` lines
    Shared,
}

impl LinkMode {
    pub fn from_shared(shared: bool) -> Self {
        if shared { Self::Shared } else { Self::Static }
    }

    /// Whether a dot-separated action token is this mode's link step
    fn matches_action(&self, action: &str) -> bool {
        let parts: Vec<&str> = action.split('.').collect();
        match self {
            Self::Shared => parts.len() >= 3 && parts[1] == "link" && parts[2] == "dll",
            Self::Static => parts.len() >= 2 && parts[1] == "archive",
        }
    }
}

/// One library found in the log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactRecord {
    /// Module directory under `libs/`
    pub module: String,
    /// Logical library name (`boost_system`)
    pub library: String,
}

/// Parser for one link mode and target platform
#[derive(Debug)]
pub struct ArtifactCollector<'a> {
    link_mode: LinkMode,
    separator: char,
    /// Strip `.1.65.1` style suffixes (shared objects outside Windows)
    strip_version_suffix: bool,
    options: &'a Options,
    module_pattern: Regex,
}

impl<'a> ArtifactCollector<'a> {
    /// Create a collector using `separator` as the log's path separator
    pub fn new(
        link_mode: LinkMode,
        separator: char,
        windows_target: bool,
        options: &'a Options,
    ) -> Result<Self> {
        let sep = regex::escape(&separator.to_string());
        let module_pattern = Regex::new(&format!(r"^.*{sep}libs{sep}([^{sep}]*){sep}"))
            .map_err(|e| Error::ParseError(format!("Invalid module pattern: {}", e)))?;

        Ok(Self {
            link_mode,
            separator,
            strip_version_suffix: link_mode == LinkMode::Shared && !windows_target,
            options,
            module_pattern,
        })
    }

    /// Collector for a configured profile
    pub fn for_profile(profile: &'a Profile) -> Result<Self> {
        let os = profile.settings.os;
        Self::new(
            LinkMode::from_shared(profile.options.shared()),
            os.path_separator(),
            os.is_windows(),
            &profile.options,
        )
    }

    /// Extract the artifact a single log line describes
    ///
    /// Returns `None` for lines that are not this mode's link step or do
    /// not name a `libs/<module>/` path. Disabled modules are not filtered
    /// here.
    pub fn parse_line(&self, line: &str) -> Option<ArtifactRecord> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (action, rest) = line.split_once(' ')?;
        if !self.link_mode.matches_action(action) {
            return None;
        }

        let module = self.module_pattern.captures(rest)?.get(1)?.as_str();
        Some(ArtifactRecord {
            module: module.to_string(),
            library: self.resolve_library(rest),
        })
    }

    /// Logical library name for an artifact path
    ///
    /// `.../libboost_system.so.1.65.1` becomes `boost_system`; Windows
    /// import libraries (`.lib`) keep any `lib` prefix.
    pub fn resolve_library(&self, path: &str) -> String {
        let path = path.trim();
        let mut name = path
            .rsplit(|c: char| c == self.separator || c == '/')
            .next()
            .unwrap_or(path);

        if self.strip_version_suffix {
            while let Some((head, tail)) = name.rsplit_once('.') {
                if tail.is_empty() || !tail.chars().all(|c| c.is_ascii_digit()) {
                    break;
                }
                name = head;
            }
        }

        let (base, ext) = split_extension(name);
        if LIBRARY_EXTENSIONS.contains(&ext)
            && ext != IMPORT_LIBRARY_EXTENSION
            && let Some(stripped) = base.strip_prefix("lib")
        {
            return stripped.to_string();
        }
        base.to_string()
    }

    /// Every artifact of enabled modules, in log order
    pub fn records(&self, log: &str) -> Vec<ArtifactRecord> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut records = Vec::new();

        for line in log.lines() {
            let Some(record) = self.parse_line(line) else {
                continue;
            };

            if !seen.contains(&record.module) {
                if self.options.is_module_disabled(&record.module) {
                    trace!("Skipping disabled module {}", record.module);
                    continue;
                }
                seen.insert(record.module.clone());
            }

            records.push(record);
        }

        records
    }

    /// Ordered library list for the linker
    ///
    /// Libraries are grouped by module in first-seen order, then the whole
    /// list is reversed: b2 builds dependencies last, so the reversed list
    /// puts dependents before the libraries they need.
    pub fn collect(&self, log: &str) -> Vec<String> {
        let mut module_order: Vec<String> = Vec::new();
        let mut by_module: HashMap<String, Vec<String>> = HashMap::new();

        for record in self.records(log) {
            let libs = by_module.entry(record.module.clone()).or_insert_with(|| {
                module_order.push(record.module.clone());
                Vec::new()
            });
            libs.push(record.library);
        }

        let mut result: Vec<String> = module_order
            .iter()
            .filter_map(|module| by_module.remove(module))
            .flatten()
            .collect();
        result.reverse();

        debug!(
            "Collected {} libraries from {} modules",
            result.len(),
            module_order.len()
        );
        result
    }

    /// Read and collect a build log from disk
    pub fn collect_file(&self, path: &Path) -> Result<Vec<String>> {
        let content = fs::read(path).map_err(|e| {
            Error::IoError(format!("Failed to read build log {}: {}", path.display(), e))
        })?;
        Ok(self.collect(&String::from_utf8_lossy(&content)))
    }
}

/// Split `name.ext` at the last dot; leading dots never start an extension
fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if name[..idx].chars().any(|c| c != '.') => (&name[..idx], &name[idx..]),
        _ => (name, ""),
    }
}
