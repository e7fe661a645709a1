// src/recipe/kitchen/toolchain.rs

//! Host toolchain environment: Visual Studio `vcvarsall` and shell runner

use crate::error::{Error, Result};
use crate::profile::{Arch, Settings};
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// `vcvarsall.bat` argument for the target architecture
fn vcvars_arch(arch: Arch) -> &'static str {
    match arch {
        Arch::X86 => "x86",
        Arch::X86_64 => "amd64",
        Arch::Armv6 | Arch::Armv7 | Arch::Armv7hf => "x86_arm",
        Arch::Armv8 => "amd64_arm64",
    }
}

fn vswhere_path() -> Option<PathBuf> {
    if let Ok(path) = which::which("vswhere") {
        return Some(path);
    }
    let program_files = std::env::var_os("ProgramFiles(x86)")?;
    let path = PathBuf::from(program_files)
        .join("Microsoft Visual Studio")
        .join("Installer")
        .join("vswhere.exe");
    path.exists().then_some(path)
}

/// Installation directory of a Visual Studio 2017+ release
fn vs_installation_path(major: u32) -> Result<PathBuf> {
    let vswhere = vswhere_path()
        .ok_or_else(|| Error::NotFound("vswhere.exe (Visual Studio installer)".to_string()))?;

    let range = format!("[{}.0,{}.0)", major, major + 1);
    let output = Command::new(&vswhere)
        .args(["-version", &range, "-legacy", "-property", "installationPath"])
        .output()
        .map_err(|e| Error::IoError(format!("Failed to run vswhere: {}", e)))?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| Error::NotFound(format!("Visual Studio {} installation", major)))
}

/// Shell prefix that loads the Visual Studio build environment
///
/// Visual Studio 2017 and later are located with vswhere; older releases
/// through their `VS<ver>0COMNTOOLS` variable. An environment that already
/// has `VisualStudioVersion` set is used as-is.
pub fn vcvars_command(settings: &Settings) -> Result<String> {
    if std::env::var_os("VisualStudioVersion").is_some() {
        debug!("Visual Studio environment already loaded");
        return Ok("echo vcvars already set".to_string());
    }

    let major = settings.compiler.major_version().ok_or_else(|| {
        Error::InvalidSetting(format!(
            "compiler.version={} is not a Visual Studio version",
            settings.compiler.version
        ))
    })?;
    let arch = vcvars_arch(settings.arch);

    let vcvars = if major >= 15 {
        vs_installation_path(major)?
            .join("VC")
            .join("Auxiliary")
            .join("Build")
            .join("vcvarsall.bat")
    } else {
        let var = format!("VS{}0COMNTOOLS", major);
        let tools = std::env::var_os(&var)
            .ok_or_else(|| Error::NotFound(format!("environment variable {}", var)))?;
        PathBuf::from(tools)
            .join("..")
            .join("..")
            .join("VC")
            .join("vcvarsall.bat")
    };

    Ok(format!("call \"{}\" {}", vcvars.display(), arch))
}

/// Platform shell invocation for a command line
pub fn shell(command: &str) -> Command {
    if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(command);
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command);
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vcvars_arch() {
        assert_eq!(vcvars_arch(Arch::X86), "x86");
        assert_eq!(vcvars_arch(Arch::X86_64), "amd64");
        assert_eq!(vcvars_arch(Arch::Armv8), "amd64_arm64");
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_runs_command() {
        let output = shell("echo kitchen").output().unwrap();
        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "kitchen");
    }
}
