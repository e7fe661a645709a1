// src/recipe/kitchen/cook.rs

//! Cook: the build and package phases for a single configured profile

use crate::error::{Error, Result};
use crate::profile::{DependencyInfo, Os, Profile};
use crate::recipe::buildlog::ArtifactCollector;
use crate::recipe::configure::{needs_compression_libs, BZIP2_VERSION, ZLIB_VERSION};
use crate::recipe::flags::{
    b2_command, bootstrap_plan, build_flags, install_args, BOOTSTRAP_LOG_NAME, BUILD_LOG_NAME,
};
use crate::recipe::format::Recipe;
use crate::recipe::package_info::LibraryList;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

use super::archive::extract_archive;
use super::rename::rename_msvc_static_libs;
use super::toolchain::{shell, vcvars_command};
use super::Kitchen;

/// Working directory of a cook
enum BuildDir {
    Temp(TempDir),
    Fixed(PathBuf),
}

impl BuildDir {
    fn path(&self) -> &Path {
        match self {
            BuildDir::Temp(dir) => dir.path(),
            BuildDir::Fixed(path) => path,
        }
    }
}

/// A single cook operation
pub struct Cook<'a> {
    pub(super) kitchen: &'a Kitchen,
    pub(super) recipe: &'a Recipe,
    /// Profile after configuration
    pub(super) profile: &'a Profile,
    /// Operating system this process runs on
    host: Os,
    build_dir: BuildDir,
    /// `<build_dir>/<folder>`, where bootstrap and b2 run
    pub(super) source_dir: PathBuf,
    pub(super) package_dir: PathBuf,
    /// Bootstrap flags followed by the derived b2 flags
    pub(super) flags: Vec<String>,
    /// Visual Studio environment command
    env_prefix: Option<String>,
    bootstrap_command: String,
    /// Build log accumulator
    pub(super) log: String,
    pub(super) warnings: Vec<String>,
}

impl<'a> Cook<'a> {
    pub(super) fn new(kitchen: &'a Kitchen, recipe: &'a Recipe, profile: &'a Profile) -> Result<Self> {
        let config = &kitchen.config;
        let build_dir = match &config.build_dir {
            Some(dir) => {
                fs::create_dir_all(dir)?;
                BuildDir::Fixed(std::path::absolute(dir)?)
            }
            None => BuildDir::Temp(
                tempfile::Builder::new()
                    .prefix("boost-kitchen-")
                    .keep(config.keep_builddir)
                    .tempdir()
                    .map_err(|e| {
                        Error::IoError(format!("Failed to create build directory: {}", e))
                    })?,
            ),
        };
        debug!("Build directory: {}", build_dir.path().display());

        let source_dir = build_dir.path().join(recipe.folder_name());
        let package_dir = std::path::absolute(&config.package_dir)?;

        let settings = &profile.settings;
        let env_prefix = if settings.os.is_windows() && settings.compiler.name.is_msvc() {
            Some(vcvars_command(settings)?)
        } else {
            None
        };

        let plan = bootstrap_plan(settings, env_prefix.as_deref());
        let mut flags = plan.flags;
        flags.extend(build_flags(profile));

        Ok(Self {
            kitchen,
            recipe,
            profile,
            host: Os::host().unwrap_or(settings.os),
            build_dir,
            source_dir,
            package_dir,
            flags,
            env_prefix,
            bootstrap_command: plan.command,
            log: String::new(),
            warnings: Vec::new(),
        })
    }

    /// Build log written by the b2 build step
    pub(super) fn build_log_path(&self) -> PathBuf {
        self.build_dir.path().join(BUILD_LOG_NAME)
    }

    /// Phase 1: Prep - fetch and extract the source archive
    pub(super) fn prep(&mut self) -> Result<()> {
        if self.source_dir.is_dir() {
            info!(
                "Source folder {} exists, skipping download",
                self.source_dir.display()
            );
            self.log_line(&format!("Reused source: {}", self.source_dir.display()));
            return Ok(());
        }

        let archive = self
            .kitchen
            .fetch_source(self.recipe, self.host, self.build_dir.path())?;
        extract_archive(&archive, self.build_dir.path())?;
        self.log_line(&format!("Extracted source: {}", archive.display()));

        if self.kitchen.config.source_cache.is_none() {
            fs::remove_file(&archive)?;
        }

        if !self.source_dir.is_dir() {
            return Err(Error::NotFound(format!(
                "archive did not contain {}",
                self.recipe.folder_name()
            )));
        }
        Ok(())
    }

    /// Phase 2: Simmer - bootstrap b2 and compile the libraries
    pub(super) fn simmer(&mut self) -> Result<()> {
        if self.profile.options.header_only {
            warn!("Header only package, skipping build");
            self.warnings.push("Header only package, build skipped".to_string());
            return Ok(());
        }

        self.bootstrap()?;
        self.patch_project_jam()?;

        let command = self.b2();
        info!("Running b2, output in {}", self.build_log_path().display());
        debug!("Command: {}", command);

        let log_path = self.build_log_path();
        let log_file = File::create(&log_path).map_err(|e| {
            Error::IoError(format!("Failed to create {}: {}", log_path.display(), e))
        })?;
        let status = shell(&command)
            .current_dir(&self.source_dir)
            .stdout(log_file.try_clone()?)
            .stderr(log_file)
            .status()
            .map_err(|e| Error::IoError(format!("Failed to run b2: {}", e)))?;

        self.log_line(&format!("=== build ===\n{}", command));
        if !status.success() {
            return Err(Error::build_failed(
                "build",
                format!(
                    "b2 exited with {:?}, see {}",
                    status.code(),
                    log_path.display()
                ),
            ));
        }
        Ok(())
    }

    fn bootstrap(&mut self) -> Result<()> {
        info!("Bootstrapping b2");
        let command = self.bootstrap_command.clone();
        match self.run_step("bootstrap", &command) {
            Ok(()) => Ok(()),
            Err(e) => {
                let log_path = self.source_dir.join(BOOTSTRAP_LOG_NAME);
                let content = match fs::read_to_string(&log_path) {
                    Ok(content) => content,
                    Err(read_err) => {
                        error!("Could not read {}: {}", log_path.display(), read_err);
                        return Err(e);
                    }
                };
                error!("{}:\n{}", log_path.display(), content);
                self.log_line(&content);
                match e {
                    Error::BuildFailed { phase, message } => Err(Error::build_failed(
                        phase,
                        format!("{}\n{}:\n{}", message, BOOTSTRAP_LOG_NAME, content),
                    )),
                    other => Err(other),
                }
            }
        }
    }

    /// Register zlib (and bzip2 on Linux/Macos) with b2 for iostreams
    fn patch_project_jam(&mut self) -> Result<()> {
        if !needs_compression_libs(self.profile) {
            return Ok(());
        }

        warn!("Patching project-config.jam");
        let mut contents = jam_using("zlib", ZLIB_VERSION, self.profile.dependency("zlib")?)?;
        if matches!(self.profile.settings.os, Os::Linux | Os::Macos) {
            contents.push_str(&jam_using(
                "bzip2",
                BZIP2_VERSION,
                self.profile.dependency("bzip2")?,
            )?);
        }

        let path = self.source_dir.join("project-config.jam");
        let mut jam = fs::read_to_string(&path)
            .map_err(|e| Error::IoError(format!("Failed to read {}: {}", path.display(), e)))?;
        jam.push_str(&contents);
        fs::write(&path, jam)?;
        self.log_line(&format!("Patched {}", path.display()));
        Ok(())
    }

    /// Phase 3: Plate - install into the package folder and record libraries
    pub(super) fn plate(&mut self) -> Result<LibraryList> {
        fs::create_dir_all(&self.package_dir)?;

        if self.profile.options.header_only {
            let headers = self.source_dir.join("boost");
            let dest = self.package_dir.join("include").join("boost");
            let copied = copy_tree(&headers, &dest)?;
            info!("Copied {} headers into {}", copied, dest.display());
            let list = LibraryList::new(Vec::new());
            list.save(&self.package_dir)?;
            return Ok(list);
        }

        let command = format!("{} {}", self.b2(), install_args(&self.package_dir));
        self.run_step("install", &command)?;

        let options = &self.profile.options;
        if self.profile.settings.compiler.name.is_msvc() && !options.shared() {
            let renames = rename_msvc_static_libs(&self.package_dir.join("lib"))?;
            self.log_line(&format!("Renamed {} libraries", renames.len()));
        }

        let libraries =
            ArtifactCollector::for_profile(self.profile)?.collect_file(&self.build_log_path())?;
        let list = LibraryList::new(libraries);
        let path = list.save(&self.package_dir)?;
        self.log_line(&format!("Recorded libraries in {}", path.display()));

        Ok(list)
    }

    fn b2(&self) -> String {
        b2_command(
            &self.profile.settings,
            &self.profile.options,
            &self.flags,
            self.kitchen.config.jobs,
            self.env_prefix.as_deref(),
        )
    }

    /// Run a shell command in the source folder, capturing its output
    fn run_step(&mut self, phase: &str, command: &str) -> Result<()> {
        info!("Running {} phase", phase);
        debug!("Command: {}", command);

        let output = shell(command)
            .current_dir(&self.source_dir)
            .output()
            .map_err(|e| Error::IoError(format!("Failed to run {} phase: {}", phase, e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        self.log_output(phase, &stdout, &stderr);

        if !output.status.success() {
            return Err(Error::build_failed(
                phase,
                format!("exit code {:?}\nstderr: {}", output.status.code(), stderr),
            ));
        }
        Ok(())
    }

    fn log_line(&mut self, line: &str) {
        self.log.push_str(line);
        self.log.push('\n');
    }

    fn log_output(&mut self, phase: &str, stdout: &str, stderr: &str) {
        self.log_line(&format!("=== {} ===", phase));
        if !stdout.is_empty() {
            self.log_line(stdout);
        }
        if !stderr.is_empty() {
            self.log_line(stderr);
        }
    }
}

/// `using <name> : <version> : <include>... <search>... ;` for project-config.jam
fn jam_using(name: &str, default_version: &str, dep: &DependencyInfo) -> Result<String> {
    let include = dep
        .include_paths
        .first()
        .ok_or_else(|| Error::NotFound(format!("include path for {}", name)))?;
    let lib = dep
        .lib_paths
        .first()
        .ok_or_else(|| Error::NotFound(format!("library path for {}", name)))?;

    Ok(format!(
        "\nusing {} : {} : <include>{} <search>{} ;",
        name,
        dep.version.as_deref().unwrap_or(default_version),
        include.display().to_string().replace('\\', "/"),
        lib.display().to_string().replace('\\', "/"),
    ))
}

/// Copy a directory tree, returning the number of files copied
fn copy_tree(src: &Path, dest: &Path) -> Result<usize> {
    if !src.is_dir() {
        return Err(Error::NotFound(format!("header folder {}", src.display())));
    }

    let mut copied = 0;
    for entry in WalkDir::new(src) {
        let entry = entry.map_err(|e| Error::IoError(format!("Failed to walk {}: {}", src.display(), e)))?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| Error::IoError(e.to_string()))?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}
