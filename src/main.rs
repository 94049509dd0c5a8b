use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

use goenv_resolve::discovery::{detect_version_mismatch, discover_version, scan_projects};
use goenv_resolve::toolchain::AbiCache;
use goenv_resolve::{Config, Manager, logging};

#[derive(Parser)]
#[command(name = "goenv-resolve")]
#[command(version, about = "Go toolchain version resolution for goenv")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the version in effect and where it was set
    Current {
        /// Only look in this directory instead of walking up
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Print the installed version the spec resolves to
        #[arg(long)]
        resolved: bool,
    },
    /// Resolve a spec to an installed version
    Resolve { spec: String },
    /// Check that a spec names a usable toolchain
    Validate { spec: String },
    /// Show whether a version is installed and intact
    Status {
        spec: String,
        #[arg(long)]
        json: bool,
    },
    /// Print the go binary a spec selects
    Which { spec: String },
    /// Show the version declared in a directory
    Discover {
        dir: Option<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Compare .go-version with go.mod
    Mismatch { dir: Option<PathBuf> },
    /// List every project below a directory with its version
    Scan {
        dir: Option<PathBuf>,
        /// Levels below the root to visit; 0 is unlimited
        #[arg(long, default_value_t = 0)]
        max_depth: usize,
        #[arg(long)]
        json: bool,
    },
    /// List installed versions
    Installed,
    /// Write .go-version for a directory
    Local {
        spec: Option<String>,
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Remove the .go-version file instead
        #[arg(long, conflicts_with = "spec")]
        unset: bool,
    },
    /// Set the global version
    Global { spec: String },
    /// Manage version aliases
    Alias {
        #[command(subcommand)]
        action: AliasAction,
    },
    /// Show ABI variables of a toolchain
    Abi {
        spec: String,
        /// Target architecture; defaults to $GOARCH or the host
        #[arg(long)]
        goarch: Option<String>,
    },
}

#[derive(Subcommand)]
enum AliasAction {
    List,
    Set { name: String, version: String },
    Remove { name: String },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env();
    let _guard = logging::init(config.debug);

    run(cli.command, Manager::new(config))
}

fn run(command: Command, manager: Manager) -> anyhow::Result<()> {
    match command {
        Command::Current { dir, resolved } => {
            if resolved {
                let (version, current) = manager.current_version_resolved(dir.as_deref())?;
                println!("{} (set by {})", version, current.origin);
            } else {
                println!("{}", manager.current_version(dir.as_deref())?);
            }
        }
        Command::Resolve { spec } => println!("{}", manager.resolve_version_spec(&spec)?),
        Command::Validate { spec } => {
            manager.validate_version(&spec)?;
            println!("{} is valid", spec);
        }
        Command::Status { spec, json } => {
            let status = manager.status(&spec)?;
            if json {
                print_json(&status)?;
            } else {
                let state = match (status.installed, status.corrupted) {
                    (true, true) => "corrupted",
                    (true, false) => "installed",
                    (false, _) => "not installed",
                };
                println!("{} {}", status.version, state);
            }
        }
        Command::Which { spec } => println!("{}", manager.go_binary(&spec)?.display()),
        Command::Discover { dir, json } => {
            let dir = dir_or_current(dir)?;
            let discovered = discover_version(&dir)?;
            match (json, discovered) {
                (true, discovered) => print_json(&discovered)?,
                (false, Some(found)) => println!("{} ({})", found.version, found.source),
                (false, None) => println!("none"),
            }
        }
        Command::Mismatch { dir } => {
            let report = detect_version_mismatch(&dir_or_current(dir)?);
            print_json(&report)?;
        }
        Command::Scan {
            dir,
            max_depth,
            json,
        } => {
            let projects = scan_projects(&dir_or_current(dir)?, max_depth);
            if json {
                print_json(&projects)?;
            } else {
                for project in projects {
                    println!(
                        "{}\t{}\t{}",
                        project.path.display(),
                        project.version,
                        project.source
                    );
                }
            }
        }
        Command::Installed => {
            for version in manager.installed_versions()? {
                println!("{}", version);
            }
        }
        Command::Local { spec, dir, unset } => {
            let dir = dir_or_current(dir)?;
            match spec {
                Some(spec) if !unset => {
                    let path = manager.set_local_version(&dir, &spec)?;
                    println!("{}", path.display());
                }
                _ if unset => manager.unset_local_version(&dir)?,
                _ => println!("{}", manager.current_version(Some(&dir))?),
            }
        }
        Command::Global { spec } => {
            let path = manager.set_global_version(&spec)?;
            println!("{}", path.display());
        }
        Command::Alias { action } => run_alias(action, &manager)?,
        Command::Abi { spec, goarch } => {
            let binary = manager.go_binary(&spec)?;
            let goarch = goarch
                .or_else(|| std::env::var("GOARCH").ok())
                .unwrap_or_else(|| host_goarch().to_string());
            let env: HashMap<String, String> = std::env::vars().collect();

            let mut cache = AbiCache::with_command_probe();
            for variable in cache.variables(&binary) {
                println!("{}={}", variable.name, variable.default_value);
            }
            let suffix = cache.abi_suffix(&binary, &goarch, &env);
            println!("suffix: {}", if suffix.is_empty() { "(none)" } else { suffix.as_str() });
        }
    }

    Ok(())
}

fn run_alias(action: AliasAction, manager: &Manager) -> anyhow::Result<()> {
    let aliases = manager.aliases();
    match action {
        AliasAction::List => {
            for (name, version) in aliases.list()? {
                println!("{} -> {}", name, version);
            }
        }
        AliasAction::Set { name, version } => aliases.set(&name, &version)?,
        AliasAction::Remove { name } => aliases.remove(&name)?,
    }
    Ok(())
}

fn dir_or_current(dir: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match dir {
        Some(dir) => Ok(dir),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// GOARCH name of the host
fn host_goarch() -> &'static str {
    match std::env::consts::ARCH {
        "x86_64" => "amd64",
        "x86" => "386",
        "aarch64" => "arm64",
        "powerpc64" => "ppc64",
        "loongarch64" => "loong64",
        other => other,
    }
}
