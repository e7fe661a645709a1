// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use boost_kitchen::profile::{Arch, BuildType, Compiler, CompilerKind, Os, Settings};
use boost_kitchen::Profile;
use std::fs;
use std::path::{Path, PathBuf};

/// Static gcc 7 Linux build log, as `b2 -d2` prints it (abridged).
pub const LINUX_STATIC_LOG: &str = "\
common.mkdir bin.v2/libs/system/build/gcc-7/release/link-static
gcc.compile.c++ bin.v2/libs/system/build/gcc-7/release/link-static/error_code.o
gcc.archive bin.v2/libs/system/build/gcc-7/release/link-static/libboost_system.a
gcc.compile.c++ bin.v2/libs/filesystem/build/gcc-7/release/link-static/path.o
gcc.archive bin.v2/libs/filesystem/build/gcc-7/release/link-static/libboost_filesystem.a
gcc.archive bin.v2/libs/mpi/build/gcc-7/release/link-static/libboost_mpi.a
gcc.archive bin.v2/libs/test/build/gcc-7/release/link-static/libboost_prg_exec_monitor.a
gcc.archive bin.v2/libs/test/build/gcc-7/release/link-static/libboost_unit_test_framework.a
common.copy stage/lib/libboost_system.a
";

/// Shared gcc 7 Linux build log.
pub const LINUX_SHARED_LOG: &str = "\
gcc.link.dll bin.v2/libs/system/build/gcc-7/release/threading-multi/libboost_system.so.1.65.1
gcc.archive bin.v2/libs/exception/build/gcc-7/release/link-static/libboost_exception.a
gcc.link.dll bin.v2/libs/thread/build/gcc-7/release/threading-multi/libboost_thread.so.1.65.1
";

/// Linux gcc 7 settings
pub fn linux_gcc7() -> Settings {
    Settings {
        os: Os::Linux,
        arch: Arch::X86_64,
        compiler: Compiler::new(CompilerKind::Gcc, "7"),
        build_type: BuildType::Release,
    }
}

/// Profile with iostreams disabled, so no dependency info is needed
pub fn linux_profile_without_iostreams() -> Profile {
    Profile::new(linux_gcc7())
        .with_options(["without_iostreams=True"])
        .unwrap()
}

/// Write a profile TOML file and return its path
pub fn write_profile(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("profile.toml");
    fs::write(&path, content).unwrap();
    path
}

/// Write an executable shell script
#[cfg(unix)]
pub fn write_script(path: &Path, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    fs::write(path, body).unwrap();
    let mut perms = fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).unwrap();
}

/// Create an extracted Boost source folder whose bootstrap and b2 are stubs
///
/// `b2` prints `build_log` when building and lays out include/ and lib/
/// under `--prefix` when called with `install`. Every invocation is
/// appended to `b2_invocations.txt`.
#[cfg(unix)]
pub fn fake_boost_source(build_dir: &Path, folder: &str, build_log: &str) -> PathBuf {
    let source = build_dir.join(folder);
    fs::create_dir_all(source.join("boost").join("system")).unwrap();
    fs::write(
        source.join("boost").join("version.hpp"),
        "#define BOOST_VERSION 106501\n",
    )
    .unwrap();
    fs::write(source.join("boost").join("system").join("error_code.hpp"), "").unwrap();

    write_script(
        &source.join("bootstrap.sh"),
        "#!/bin/sh\necho \"bootstrap $@\" > bootstrap.log\necho 'using gcc ;' > project-config.jam\n",
    );

    let script = format!(
        r#"#!/bin/sh
echo "$@" >> b2_invocations.txt
mode=build
prefix=""
for arg in "$@"; do
    case "$arg" in
        install) mode=install ;;
        --prefix=*) prefix="${{arg#--prefix=}}" ;;
    esac
done
if [ "$mode" = "install" ]; then
    mkdir -p "$prefix/lib" "$prefix/include/boost"
    touch "$prefix/lib/libboost_system.a" "$prefix/lib/libboost_filesystem.a"
    exit 0
fi
cat <<'LOG'
{build_log}LOG
"#
    );
    write_script(&source.join("b2"), &script);

    source
}

/// Bootstrap script that fails after writing its log
#[cfg(unix)]
pub fn failing_bootstrap(source: &Path) {
    write_script(
        &source.join("bootstrap.sh"),
        "#!/bin/sh\necho 'cannot find compiler' > bootstrap.log\nexit 1\n",
    );
}
