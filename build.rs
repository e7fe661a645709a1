// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Common argument: profile file
fn profile_arg() -> Arg {
    Arg::new("profile")
        .short('p')
        .long("profile")
        .value_name("FILE")
        .help("Profile TOML file (detected from the host when omitted)")
}

/// Common argument: setting override
fn setting_arg() -> Arg {
    Arg::new("setting")
        .short('s')
        .long("setting")
        .value_name("KEY=VALUE")
        .action(ArgAction::Append)
        .help("Setting override, e.g. compiler.version=7")
}

/// Common argument: option override
fn option_arg() -> Arg {
    Arg::new("option")
        .short('o')
        .long("option")
        .value_name("KEY=VALUE")
        .action(ArgAction::Append)
        .help("Option override, e.g. shared=True")
}

fn build_cli() -> Command {
    Command::new("boost-kitchen")
        .version(env!("CARGO_PKG_VERSION"))
        .author("boost-kitchen contributors")
        .about("Build and package the Boost C++ libraries")
        .subcommand_required(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Enable debug logging"),
        )
        .subcommand(
            Command::new("cook")
                .about("Fetch, build and package Boost")
                .arg(profile_arg())
                .arg(setting_arg())
                .arg(option_arg())
                .arg(Arg::new("recipe").short('r').long("recipe").help("Recipe file"))
                .arg(
                    Arg::new("package_dir")
                        .long("package-dir")
                        .default_value("package")
                        .help("Package folder receiving include/, lib/ and bin/"),
                )
                .arg(Arg::new("build_dir").long("build-dir").help("Build directory"))
                .arg(
                    Arg::new("source_cache")
                        .long("source-cache")
                        .help("Keep downloaded archives here"),
                )
                .arg(Arg::new("jobs").short('j').long("jobs").help("Parallel b2 jobs"))
                .arg(
                    Arg::new("keep_builddir")
                        .long("keep-builddir")
                        .action(ArgAction::SetTrue)
                        .help("Keep the temporary build directory"),
                )
                .arg(
                    Arg::new("validate_only")
                        .long("validate-only")
                        .action(ArgAction::SetTrue)
                        .help("Only validate the recipe"),
                )
                .arg(
                    Arg::new("fetch_only")
                        .long("fetch-only")
                        .action(ArgAction::SetTrue)
                        .help("Only download and verify the source archive"),
                ),
        )
        .subcommand(
            Command::new("flags")
                .about("Print the bootstrap and b2 command lines for a profile")
                .arg(profile_arg())
                .arg(setting_arg())
                .arg(option_arg())
                .arg(
                    Arg::new("jobs")
                        .short('j')
                        .long("jobs")
                        .default_value("1")
                        .help("Parallel b2 jobs shown in the command line"),
                ),
        )
        .subcommand(
            Command::new("collect")
                .about("Collect libraries in link order from a b2 build log")
                .arg(Arg::new("log").required(true).help("Build log written by b2 -d2"))
                .arg(profile_arg())
                .arg(setting_arg())
                .arg(option_arg())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the libraries as a JSON array"),
                ),
        )
        .subcommand(
            Command::new("info")
                .about("Show libraries and defines for a cooked package")
                .arg(profile_arg())
                .arg(setting_arg())
                .arg(option_arg())
                .arg(
                    Arg::new("package_dir")
                        .long("package-dir")
                        .default_value("package")
                        .help("Package folder holding link_library_list.json"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print as JSON"),
                ),
        )
        .subcommand(
            Command::new("package-id")
                .about("Print the binary package id of a profile")
                .arg(profile_arg())
                .arg(setting_arg())
                .arg(option_arg()),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .required(true)
                        .value_parser(["bash", "zsh", "fish", "powershell", "elvish"])
                        .help("Shell type"),
                ),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = match env::var("CARGO_MANIFEST_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=CARGO_MANIFEST_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = manifest_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    let man_path = man_dir.join("boost-kitchen.1");
    if let Err(e) = fs::write(&man_path, buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
