// src/recipe/flags.rs

//! Mapping from settings and options to bootstrap and b2 command lines
//!
//! Everything here is pure: the same profile always produces the same
//! flags. Environment setup that needs the host (the Visual Studio
//! `vcvarsall` prefix, the job count) is passed in by the caller.

use crate::profile::{CompilerKind, Libcxx, Options, Profile, Settings};
use std::path::Path;

/// Build log file written next to the source folder
pub const BUILD_LOG_NAME: &str = "build_report.txt";

/// Log the bootstrap script leaves in the source folder
pub const BOOTSTRAP_LOG_NAME: &str = "bootstrap.log";

/// b2 toolset version for a Visual Studio release
///
/// Visual Studio 2017 (version 15) ships toolset 14.1; earlier releases
/// use `<version>.0`.
pub fn msvc_toolset_version(version: &str) -> String {
    if version == "15" {
        "14.1".to_string()
    } else {
        format!("{}.0", version)
    }
}

/// The `toolset=` flag, if the compiler needs one
pub fn toolset_flag(settings: &Settings) -> Option<String> {
    let compiler = &settings.compiler;
    match compiler.name {
        CompilerKind::VisualStudio => Some(format!(
            "toolset=msvc-{}",
            msvc_toolset_version(&compiler.version)
        )),
        // b2 only finds gcc >= 5 by its major version; MinGW keeps the full one
        CompilerKind::Gcc
            if !settings.os.is_windows() && compiler.major_version().is_some_and(|v| v >= 5) =>
        {
            compiler
                .major_version()
                .map(|major| format!("toolset=gcc-{}", major))
        }
        CompilerKind::Gcc | CompilerKind::Clang => {
            Some(format!("toolset={}-{}", compiler.name, compiler.version))
        }
        CompilerKind::AppleClang => None,
    }
}

/// b2 flags derived from the configured profile
pub fn build_flags(profile: &Profile) -> Vec<String> {
    let settings = &profile.settings;
    let options = &profile.options;
    let compiler = &settings.compiler;
    let mut flags = Vec::new();

    if let Some(toolset) = toolset_flag(settings) {
        flags.push(toolset);
    }

    flags.push(format!(
        "link={}",
        if options.shared() { "shared" } else { "static" }
    ));

    if compiler.name.is_msvc()
        && let Some(runtime) = compiler.runtime
    {
        flags.push(format!(
            "runtime-link={}",
            if runtime.is_static() { "static" } else { "shared" }
        ));
    }

    flags.push(format!("variant={}", settings.build_type.as_str().to_lowercase()));
    flags.push(format!("address-model={}", settings.arch.address_model()));

    for module in options.disabled_modules() {
        flags.push(format!("--without-{}", module));
    }

    let mut cxx_flags: Vec<&str> = Vec::new();
    if !compiler.name.is_msvc() && options.fpic() {
        cxx_flags.push("-fPIC");
    }

    if let Some(libcxx) = compiler.libcxx {
        match libcxx {
            Libcxx::Libstdcxx => flags.push("define=_GLIBCXX_USE_CXX11_ABI=0".to_string()),
            Libcxx::Libstdcxx11 => flags.push("define=_GLIBCXX_USE_CXX11_ABI=1".to_string()),
            Libcxx::Libcxx => {}
        }

        if compiler.name.is_clang() {
            if libcxx == Libcxx::Libcxx {
                cxx_flags.extend(["-stdlib=libc++", "-std=c++11"]);
                flags.push("linkflags=\"-stdlib=libc++\"".to_string());
            } else {
                cxx_flags.extend(["-stdlib=libstdc++", "-std=c++11"]);
            }
        }
    }

    if !cxx_flags.is_empty() {
        flags.push(format!("cxxflags=\"{}\"", cxx_flags.join(" ")));
    }

    flags
}

/// Toolset name the bootstrap script understands
pub fn bootstrap_toolset(compiler: CompilerKind) -> &'static str {
    match compiler {
        CompilerKind::AppleClang => "darwin",
        other => other.as_str(),
    }
}

/// How to run the bootstrap script, plus b2 flags it implies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapPlan {
    /// Shell command, run from the source folder
    pub command: String,
    /// Flags every later b2 invocation must carry
    pub flags: Vec<String>,
}

/// Bootstrap command for the target settings
///
/// `env_prefix` is the Visual Studio environment command; it is only used
/// for Visual Studio on Windows.
pub fn bootstrap_plan(settings: &Settings, env_prefix: Option<&str>) -> BootstrapPlan {
    let compiler = settings.compiler.name;
    let mut flags = Vec::new();

    let mut command = if settings.os.is_windows() {
        "bootstrap".to_string()
    } else {
        format!("./bootstrap.sh --with-toolset={}", bootstrap_toolset(compiler))
    };

    if settings.os.is_windows()
        && compiler.is_msvc()
        && let Some(prefix) = env_prefix
    {
        command = format!("{} && {}", prefix, command);
    }

    if settings.os.is_windows() && compiler == CompilerKind::Gcc {
        command.push_str(" mingw");
        flags.push("--layout=system".to_string());
    }

    BootstrapPlan { command, flags }
}

/// The b2 command line used for both the build and the install step
///
/// `flags` are the bootstrap flags followed by [`build_flags`].
pub fn b2_command(
    settings: &Settings,
    options: &Options,
    flags: &[String],
    jobs: u32,
    env_prefix: Option<&str>,
) -> String {
    let program = if settings.os.is_windows() { "b2" } else { "./b2" };

    let mut parts = vec![program.to_string()];
    parts.extend(flags.iter().cloned());
    parts.push(format!("-j{}", jobs));
    parts.push("--abbreviate-paths".to_string());
    if !options.python() {
        parts.push("--without-python".to_string());
    }
    // -d2 prints each action line, which the log collector depends on
    parts.push("-d2".to_string());

    let command = parts.join(" ");
    match env_prefix {
        Some(prefix) if settings.os.is_windows() && settings.compiler.name.is_msvc() => {
            format!("{} && {}", prefix, command)
        }
        _ => command,
    }
}

/// Arguments appended to [`b2_command`] to install into a package folder
pub fn install_args(package_dir: &Path) -> String {
    format!(
        "install --prefix=\"{}\" --exec-prefix=\"{}\" --libdir=\"{}\" --includedir=\"{}\"",
        package_dir.display(),
        package_dir.join("bin").display(),
        package_dir.join("lib").display(),
        package_dir.join("include").display()
    )
}
