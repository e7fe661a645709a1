// src/recipe/format.rs

//! Recipe file format definitions
//!
//! A recipe names the package and where its sources come from. The
//! built-in [`Recipe::boost`] describes the default Boost release; a TOML
//! recipe can pin another version or mirror.

use crate::profile::Os;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default Boost release packaged by the built-in recipe
pub const DEFAULT_BOOST_VERSION: &str = "1.65.1";

/// Default download location (`%(archive)s` is the archive file name)
pub const DEFAULT_ARCHIVE_URL: &str =
    "https://sourceforge.net/projects/boost/files/boost/%(version)s/%(archive)s/download";

/// A complete recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Package metadata
    pub package: PackageSection,

    /// Source archive info
    #[serde(default)]
    pub source: SourceSection,

    /// Variables for substitution (optional)
    #[serde(default)]
    pub variables: HashMap<String, String>,
}

impl Recipe {
    /// The built-in Boost recipe
    pub fn boost() -> Self {
        Self {
            package: PackageSection {
                name: "boost".to_string(),
                version: DEFAULT_BOOST_VERSION.to_string(),
                summary: Some("Free peer-reviewed portable C++ source libraries".to_string()),
                license: Some(
                    "Boost Software License - Version 1.0. http://www.boost.org/LICENSE_1_0.txt"
                        .to_string(),
                ),
                homepage: Some("https://www.boost.org".to_string()),
            },
            source: SourceSection::default(),
            variables: HashMap::new(),
        }
    }

    /// Name of the top-level directory inside the source archive
    ///
    /// `boost_1_65_1` for version `1.65.1` unless the recipe overrides it.
    pub fn folder_name(&self) -> String {
        self.source.folder.clone().unwrap_or_else(|| {
            format!(
                "{}_{}",
                self.package.name,
                self.package.version.replace('.', "_")
            )
        })
    }

    /// Archive file name; zip on Windows hosts, gzipped tar elsewhere
    pub fn archive_filename(&self, host: Os) -> String {
        let ext = if host.is_windows() { "zip" } else { "tar.gz" };
        format!("{}.{}", self.folder_name(), ext)
    }

    /// Substitute variables in a string
    ///
    /// Replaces `%(name)s` patterns with their values from:
    /// 1. Built-in variables (name, version, folder, archive)
    /// 2. Custom variables from the [variables] section
    pub fn substitute(&self, template: &str, host: Os) -> String {
        let mut result = template.to_string();

        result = result.replace("%(version)s", &self.package.version);
        result = result.replace("%(name)s", &self.package.name);
        result = result.replace("%(folder)s", &self.folder_name());
        result = result.replace("%(archive)s", &self.archive_filename(host));

        for (key, value) in &self.variables {
            result = result.replace(&format!("%({})s", key), value);
        }

        result
    }

    /// Download URL with variables substituted
    pub fn archive_url(&self, host: Os) -> String {
        self.substitute(&self.source.archive, host)
    }
}

/// Package metadata section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageSection {
    /// Package name
    pub name: String,

    /// Upstream version
    pub version: String,

    /// Short description
    #[serde(default)]
    pub summary: Option<String>,

    /// License text or identifier
    #[serde(default)]
    pub license: Option<String>,

    /// Homepage URL
    #[serde(default)]
    pub homepage: Option<String>,
}

/// Source archive section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSection {
    /// Source archive URL template
    #[serde(default = "default_archive")]
    pub archive: String,

    /// Checksum for the archive (`sha256:...`); unchecked when absent
    #[serde(default)]
    pub checksum: Option<String>,

    /// Directory name after extraction (if different from `<name>_<version>`)
    #[serde(default)]
    pub folder: Option<String>,
}

impl Default for SourceSection {
    fn default() -> Self {
        Self {
            archive: default_archive(),
            checksum: None,
            folder: None,
        }
    }
}

fn default_archive() -> String {
    DEFAULT_ARCHIVE_URL.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folder_name() {
        let recipe = Recipe::boost();
        assert_eq!(recipe.folder_name(), "boost_1_65_1");

        let mut custom = Recipe::boost();
        custom.source.folder = Some("boost-src".to_string());
        assert_eq!(custom.folder_name(), "boost-src");
    }

    #[test]
    fn test_archive_url() {
        let recipe = Recipe::boost();
        assert_eq!(
            recipe.archive_url(Os::Linux),
            "https://sourceforge.net/projects/boost/files/boost/1.65.1/boost_1_65_1.tar.gz/download"
        );
        assert_eq!(
            recipe.archive_url(Os::Windows),
            "https://sourceforge.net/projects/boost/files/boost/1.65.1/boost_1_65_1.zip/download"
        );
    }

    #[test]
    fn test_custom_variables() {
        let mut recipe = Recipe::boost();
        recipe.source.archive = "https://%(mirror)s/%(folder)s.tar.gz".to_string();
        recipe
            .variables
            .insert("mirror".to_string(), "mirror.example.com".to_string());
        assert_eq!(
            recipe.archive_url(Os::Linux),
            "https://mirror.example.com/boost_1_65_1.tar.gz"
        );
    }
}
