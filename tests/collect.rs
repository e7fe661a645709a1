// tests/collect.rs

//! Link-order collection from b2 build logs.

mod common;

use boost_kitchen::profile::Module;
use boost_kitchen::recipe::configure;
use boost_kitchen::{ArtifactCollector, LinkMode, Options, Profile};
use common::{linux_gcc7, LINUX_SHARED_LOG, LINUX_STATIC_LOG};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_static_link_order() {
    let options = Options::default();
    let collector = ArtifactCollector::new(LinkMode::Static, '/', false, &options).unwrap();

    assert_eq!(
        collector.collect(LINUX_STATIC_LOG),
        vec![
            "boost_unit_test_framework",
            "boost_prg_exec_monitor",
            "boost_mpi",
            "boost_filesystem",
            "boost_system",
        ]
    );
}

#[test]
fn test_disabled_modules_are_skipped() {
    let profile = Profile::new(linux_gcc7())
        .with_options(["without_mpi=True", "without_test=True"])
        .unwrap();
    let collector = ArtifactCollector::for_profile(&profile).unwrap();

    assert_eq!(
        collector.collect(LINUX_STATIC_LOG),
        vec!["boost_filesystem", "boost_system"]
    );
}

#[test]
fn test_shared_profile_reads_dll_links() {
    let profile = configure(&Profile::new(linux_gcc7()).with_options(["shared=True"]).unwrap());
    let collector = ArtifactCollector::for_profile(&profile).unwrap();

    assert_eq!(
        collector.collect(LINUX_SHARED_LOG),
        vec!["boost_thread", "boost_system"]
    );
}

#[test]
fn test_collection_is_repeatable() {
    let options = Options::default();
    let collector = ArtifactCollector::new(LinkMode::Static, '/', false, &options).unwrap();
    assert_eq!(
        collector.collect(LINUX_STATIC_LOG),
        collector.collect(LINUX_STATIC_LOG)
    );
}

#[test]
fn test_every_collected_library_comes_from_an_enabled_module() {
    let mut options = Options::default();
    options.without.insert(Module::Filesystem);
    let collector = ArtifactCollector::new(LinkMode::Static, '/', false, &options).unwrap();

    for record in collector.records(LINUX_STATIC_LOG) {
        assert!(!options.is_module_disabled(&record.module));
    }
    assert!(!collector
        .collect(LINUX_STATIC_LOG)
        .contains(&"boost_filesystem".to_string()));
}

#[test]
fn test_windows_log_file() {
    let log = "compile-c-c++ bin.v2\\libs\\system\\build\\msvc-14.1\\release\\link-static\\error_code.obj\r\n\
msvc.archive bin.v2\\libs\\system\\build\\msvc-14.1\\release\\link-static\\libboost_system-vc141-mt-s-1_65_1.lib\r\n\
msvc.archive bin.v2\\libs\\regex\\build\\msvc-14.1\\release\\link-static\\libboost_regex-vc141-mt-s-1_65_1.lib\r\n";
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("build_report.txt");
    fs::write(&path, log).unwrap();

    let options = Options::default();
    let collector = ArtifactCollector::new(LinkMode::Static, '\\', true, &options).unwrap();
    assert_eq!(
        collector.collect_file(&path).unwrap(),
        vec![
            "libboost_regex-vc141-mt-s-1_65_1",
            "libboost_system-vc141-mt-s-1_65_1",
        ]
    );
}

#[test]
fn test_empty_log() {
    let options = Options::default();
    let collector = ArtifactCollector::new(LinkMode::Shared, '/', false, &options).unwrap();
    assert!(collector.collect("").is_empty());
}
