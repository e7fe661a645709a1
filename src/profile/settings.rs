// src/profile/settings.rs

//! Build settings: operating system, architecture, compiler, build type
//!
//! Setting values use the spellings package managers commonly use
//! (`Linux`, `x86_64`, `Visual Studio`, `libstdc++11`, ...), both in
//! profile files and on the command line.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target operating system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Os {
    Windows,
    Linux,
    Macos,
    FreeBSD,
    SunOS,
    Android,
    #[serde(rename = "iOS")]
    Ios,
}

impl Os {
    /// Setting spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Windows => "Windows",
            Self::Linux => "Linux",
            Self::Macos => "Macos",
            Self::FreeBSD => "FreeBSD",
            Self::SunOS => "SunOS",
            Self::Android => "Android",
            Self::Ios => "iOS",
        }
    }

    /// Operating system this binary is running on
    pub fn host() -> Option<Self> {
        match std::env::consts::OS {
            "windows" => Some(Self::Windows),
            "linux" => Some(Self::Linux),
            "macos" => Some(Self::Macos),
            "freebsd" => Some(Self::FreeBSD),
            "solaris" | "illumos" => Some(Self::SunOS),
            "android" => Some(Self::Android),
            "ios" => Some(Self::Ios),
            _ => None,
        }
    }

    pub fn is_windows(&self) -> bool {
        *self == Self::Windows
    }

    /// Path separator used in build logs produced on this OS
    pub fn path_separator(&self) -> char {
        if self.is_windows() { '\\' } else { '/' }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Os {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Windows" => Ok(Self::Windows),
            "Linux" => Ok(Self::Linux),
            "Macos" => Ok(Self::Macos),
            "FreeBSD" => Ok(Self::FreeBSD),
            "SunOS" => Ok(Self::SunOS),
            "Android" => Ok(Self::Android),
            "iOS" => Ok(Self::Ios),
            _ => Err(Error::InvalidSetting(format!("os={}", s))),
        }
    }
}

/// Target architecture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arch {
    X86,
    #[serde(rename = "x86_64")]
    X86_64,
    Armv6,
    Armv7,
    Armv7hf,
    Armv8,
}

impl Arch {
    /// Setting spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::X86 => "x86",
            Self::X86_64 => "x86_64",
            Self::Armv6 => "armv6",
            Self::Armv7 => "armv7",
            Self::Armv7hf => "armv7hf",
            Self::Armv8 => "armv8",
        }
    }

    /// Architecture this binary is running on
    pub fn host() -> Option<Self> {
        match std::env::consts::ARCH {
            "x86" => Some(Self::X86),
            "x86_64" => Some(Self::X86_64),
            "arm" => Some(Self::Armv7),
            "aarch64" => Some(Self::Armv8),
            _ => None,
        }
    }

    /// Value of b2's `address-model` feature
    pub fn address_model(&self) -> u32 {
        match self {
            Self::X86 => 32,
            _ => 64,
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Arch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "x86" => Ok(Self::X86),
            "x86_64" => Ok(Self::X86_64),
            "armv6" => Ok(Self::Armv6),
            "armv7" => Ok(Self::Armv7),
            "armv7hf" => Ok(Self::Armv7hf),
            "armv8" => Ok(Self::Armv8),
            _ => Err(Error::InvalidSetting(format!("arch={}", s))),
        }
    }
}

/// Build type, mapped to b2's `variant`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BuildType {
    Debug,
    #[default]
    Release,
    RelWithDebInfo,
    MinSizeRel,
}

impl BuildType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Release => "Release",
            Self::RelWithDebInfo => "RelWithDebInfo",
            Self::MinSizeRel => "MinSizeRel",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Debug" => Ok(Self::Debug),
            "Release" => Ok(Self::Release),
            "RelWithDebInfo" => Ok(Self::RelWithDebInfo),
            "MinSizeRel" => Ok(Self::MinSizeRel),
            _ => Err(Error::InvalidSetting(format!("build_type={}", s))),
        }
    }
}

/// Compiler identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompilerKind {
    #[serde(rename = "gcc")]
    Gcc,
    #[serde(rename = "clang")]
    Clang,
    #[serde(rename = "apple-clang")]
    AppleClang,
    #[serde(rename = "Visual Studio")]
    VisualStudio,
}

impl CompilerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gcc => "gcc",
            Self::Clang => "clang",
            Self::AppleClang => "apple-clang",
            Self::VisualStudio => "Visual Studio",
        }
    }

    /// Any clang flavor (upstream or Apple)
    pub fn is_clang(&self) -> bool {
        matches!(self, Self::Clang | Self::AppleClang)
    }

    pub fn is_msvc(&self) -> bool {
        *self == Self::VisualStudio
    }
}

impl fmt::Display for CompilerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CompilerKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "gcc" => Ok(Self::Gcc),
            "clang" => Ok(Self::Clang),
            "apple-clang" => Ok(Self::AppleClang),
            "Visual Studio" => Ok(Self::VisualStudio),
            _ => Err(Error::InvalidSetting(format!("compiler={}", s))),
        }
    }
}

/// C++ standard library selection (gcc/clang only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Libcxx {
    #[serde(rename = "libstdc++")]
    Libstdcxx,
    #[serde(rename = "libstdc++11")]
    Libstdcxx11,
    #[serde(rename = "libc++")]
    Libcxx,
}

impl Libcxx {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Libstdcxx => "libstdc++",
            Self::Libstdcxx11 => "libstdc++11",
            Self::Libcxx => "libc++",
        }
    }
}

impl fmt::Display for Libcxx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Libcxx {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "libstdc++" => Ok(Self::Libstdcxx),
            "libstdc++11" => Ok(Self::Libstdcxx11),
            "libc++" => Ok(Self::Libcxx),
            _ => Err(Error::InvalidSetting(format!("compiler.libcxx={}", s))),
        }
    }
}

/// Visual Studio C runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Runtime {
    MT,
    MTd,
    MD,
    MDd,
}

impl Runtime {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MT => "MT",
            Self::MTd => "MTd",
            Self::MD => "MD",
            Self::MDd => "MDd",
        }
    }

    /// MT and MTd link the C runtime statically
    pub fn is_static(&self) -> bool {
        self.as_str().contains("MT")
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Runtime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "MT" => Ok(Self::MT),
            "MTd" => Ok(Self::MTd),
            "MD" => Ok(Self::MD),
            "MDd" => Ok(Self::MDd),
            _ => Err(Error::InvalidSetting(format!("compiler.runtime={}", s))),
        }
    }
}

/// Compiler setting with its sub-settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compiler {
    /// Compiler identity
    pub name: CompilerKind,

    /// Version as written in the profile, e.g. `7`, `4.9`, `15`
    pub version: String,

    /// C++ standard library (not used by Visual Studio)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub libcxx: Option<Libcxx>,

    /// C runtime (Visual Studio only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<Runtime>,
}

impl Compiler {
    /// Create a compiler setting without sub-settings
    pub fn new(name: CompilerKind, version: impl Into<String>) -> Self {
        Self {
            name,
            version: version.into(),
            libcxx: None,
            runtime: None,
        }
    }

    /// Leading numeric component of the version
    pub fn major_version(&self) -> Option<u32> {
        self.version.split('.').next()?.parse().ok()
    }
}

/// The full settings value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub os: Os,
    pub arch: Arch,
    pub compiler: Compiler,
    #[serde(default)]
    pub build_type: BuildType,
}

impl Settings {
    /// Apply a `key=value` override such as `compiler.version=7`
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "os" => self.os = value.parse()?,
            "arch" => self.arch = value.parse()?,
            "build_type" => self.build_type = value.parse()?,
            "compiler" => {
                // Switching compilers drops sub-settings that belong to the old one
                self.compiler = Compiler::new(value.parse()?, self.compiler.version.clone());
            }
            "compiler.version" => self.compiler.version = value.to_string(),
            "compiler.libcxx" => self.compiler.libcxx = Some(value.parse()?),
            "compiler.runtime" => self.compiler.runtime = Some(value.parse()?),
            _ => return Err(Error::InvalidSetting(format!("unknown setting: {}", key))),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_spellings_round_trip() {
        for os in ["Windows", "Linux", "Macos", "FreeBSD", "SunOS", "Android", "iOS"] {
            assert_eq!(os.parse::<Os>().unwrap().to_string(), os);
        }
        for compiler in ["gcc", "clang", "apple-clang", "Visual Studio"] {
            assert_eq!(compiler.parse::<CompilerKind>().unwrap().to_string(), compiler);
        }
        assert!("linux".parse::<Os>().is_err());
        assert!("msvc".parse::<CompilerKind>().is_err());
    }

    #[test]
    fn test_runtime_static() {
        assert!(Runtime::MT.is_static());
        assert!(Runtime::MTd.is_static());
        assert!(!Runtime::MD.is_static());
        assert!(!Runtime::MDd.is_static());
    }

    #[test]
    fn test_major_version() {
        assert_eq!(Compiler::new(CompilerKind::Gcc, "7").major_version(), Some(7));
        assert_eq!(Compiler::new(CompilerKind::Gcc, "4.9").major_version(), Some(4));
        assert_eq!(Compiler::new(CompilerKind::Gcc, "10.2").major_version(), Some(10));
        assert_eq!(Compiler::new(CompilerKind::Gcc, "").major_version(), None);
    }

    #[test]
    fn test_settings_set() {
        let mut settings = Settings {
            os: Os::Linux,
            arch: Arch::X86_64,
            compiler: Compiler::new(CompilerKind::Gcc, "7"),
            build_type: BuildType::Release,
        };
        settings.set("compiler.libcxx", "libstdc++11").unwrap();
        settings.set("build_type", "Debug").unwrap();
        settings.set("arch", "x86").unwrap();
        assert_eq!(settings.compiler.libcxx, Some(Libcxx::Libstdcxx11));
        assert_eq!(settings.build_type, BuildType::Debug);
        assert_eq!(settings.arch.address_model(), 32);

        settings.set("compiler", "clang").unwrap();
        assert_eq!(settings.compiler.name, CompilerKind::Clang);
        assert_eq!(settings.compiler.libcxx, None);

        assert!(settings.set("compiler.color", "red").is_err());
        assert!(settings.set("os", "Plan9").is_err());
    }
}
