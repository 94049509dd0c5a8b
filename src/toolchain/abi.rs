//! ABI variable discovery
//!
//! Architecture-level variables such as `GOAMD64` or `GOARM` change the code a
//! toolchain emits, so build caches must be keyed on them. The variables a
//! toolchain supports are read from `go env -json` once per binary and kept
//! in an [`AbiCache`] owned by the caller. A binary's compiled-in variables
//! never change while the process runs, so entries only go away through
//! [`AbiCache::invalidate`].

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::process::Command;

#[cfg(test)]
use mockall::automock;
use serde::Serialize;
use tracing::debug;

use crate::toolchain::error::AbiError;

/// Prefixes of `go env` keys that select an ABI variant
const ABI_PREFIXES: &[&str] = &[
    "GOAMD64",
    "GOARM",
    "GO386",
    "GOMIPS",
    "GOPPC64",
    "GORISCV64",
    "GOWASM",
];

/// Used when the toolchain cannot be asked
const KNOWN_ABI_VARIABLES: &[(&str, &str)] = &[
    ("GOAMD64", "v1"),
    ("GOARM", "7"),
    ("GO386", "sse2"),
    ("GOMIPS", "hardfloat"),
    ("GOMIPS64", "hardfloat"),
    ("GOPPC64", "power8"),
    ("GORISCV64", "rva20u64"),
    ("GOWASM", ""),
];

/// An ABI-related environment variable and the toolchain's default for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AbiVariable {
    pub name: String,
    pub default_value: String,
}

/// Source of `go env -json` output
#[cfg_attr(test, automock)]
pub trait GoEnvProbe {
    fn go_env_json(&self, go_binary: &Path) -> Result<String, AbiError>;
}

/// Runs `<go_binary> env -json`
pub struct CommandProbe;

impl GoEnvProbe for CommandProbe {
    fn go_env_json(&self, go_binary: &Path) -> Result<String, AbiError> {
        let output = Command::new(go_binary)
            .args(["env", "-json"])
            .output()
            .map_err(|source| AbiError::Spawn {
                binary: go_binary.to_path_buf(),
                source,
            })?;

        if !output.status.success() {
            return Err(AbiError::Failed {
                binary: go_binary.to_path_buf(),
                status: output.status,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Per-binary memo of discovered ABI variables
pub struct AbiCache<P: GoEnvProbe> {
    probe: P,
    entries: HashMap<PathBuf, Vec<AbiVariable>>,
}

impl AbiCache<CommandProbe> {
    pub fn with_command_probe() -> Self {
        Self::new(CommandProbe)
    }
}

impl<P: GoEnvProbe> AbiCache<P> {
    pub fn new(probe: P) -> Self {
        Self {
            probe,
            entries: HashMap::new(),
        }
    }

    /// ABI variables supported by `go_binary`.
    ///
    /// Falls back to the known variable table when the probe fails or reports
    /// nothing; fallbacks are not cached.
    pub fn variables(&mut self, go_binary: &Path) -> Vec<AbiVariable> {
        if let Some(cached) = self.entries.get(go_binary) {
            return cached.clone();
        }

        let discovered = self
            .probe
            .go_env_json(go_binary)
            .and_then(|json| parse_abi_variables(&json));

        match discovered {
            Ok(variables) if !variables.is_empty() => {
                self.entries
                    .insert(go_binary.to_path_buf(), variables.clone());
                variables
            }
            Ok(_) => {
                debug!("No ABI variables reported by {:?}", go_binary);
                known_abi_variables()
            }
            Err(e) => {
                debug!("ABI discovery failed, using known variables: {}", e);
                known_abi_variables()
            }
        }
    }

    /// Drop every cached entry.
    pub fn invalidate(&mut self) {
        self.entries.clear();
    }

    /// Drop the cached entry of one binary.
    pub fn invalidate_binary(&mut self, go_binary: &Path) {
        self.entries.remove(go_binary);
    }

    /// Build the ABI part of a cache directory name, e.g. `-v3` for
    /// `GOAMD64=v3` on amd64. Variables at their default are left out.
    pub fn abi_suffix(
        &mut self,
        go_binary: &Path,
        goarch: &str,
        env: &HashMap<String, String>,
    ) -> String {
        self.variables(go_binary)
            .iter()
            .filter(|var| is_relevant_for_arch(&var.name, goarch))
            .filter_map(|var| {
                let value = env.get(&var.name).unwrap_or(&var.default_value);
                (!value.is_empty() && *value != var.default_value)
                    .then(|| format!("-{}", sanitize_abi_value(value)))
            })
            .collect()
    }
}

/// Extract ABI variables from `go env -json` output, sorted by name.
pub fn parse_abi_variables(json: &str) -> Result<Vec<AbiVariable>, AbiError> {
    let env: BTreeMap<String, String> = serde_json::from_str(json)?;

    Ok(env
        .into_iter()
        .filter(|(key, _)| ABI_PREFIXES.iter().any(|prefix| key.starts_with(prefix)))
        .map(|(name, default_value)| AbiVariable {
            name,
            default_value,
        })
        .collect())
}

fn known_abi_variables() -> Vec<AbiVariable> {
    KNOWN_ABI_VARIABLES
        .iter()
        .map(|(name, default_value)| AbiVariable {
            name: name.to_string(),
            default_value: default_value.to_string(),
        })
        .collect()
}

fn is_relevant_for_arch(name: &str, goarch: &str) -> bool {
    let arches: &[&str] = match name {
        "GOAMD64" => &["amd64"],
        "GOARM" => &["arm"],
        "GO386" => &["386"],
        "GOMIPS" => &["mips", "mipsle"],
        "GOMIPS64" => &["mips64", "mips64le"],
        "GOPPC64" => &["ppc64", "ppc64le"],
        "GORISCV64" => &["riscv64"],
        "GOWASM" => &["wasm"],
        "GOLOONG64" => &["loong64"],
        _ => &[],
    };
    arches.contains(&goarch)
}

fn sanitize_abi_value(value: &str) -> String {
    value.replace([',', ' ', '/'], "-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const GO_ENV_JSON: &str = r#"{
        "GOARCH": "amd64",
        "GOAMD64": "v1",
        "GOOS": "linux",
        "GOWASM": "",
        "GOROOT": "/root/.goenv/versions/1.22.5"
    }"#;

    fn probe_returning(json: &'static str, times: usize) -> MockGoEnvProbe {
        let mut probe = MockGoEnvProbe::new();
        probe
            .expect_go_env_json()
            .times(times)
            .returning(move |_| Ok(json.to_string()));
        probe
    }

    #[test]
    fn parse_abi_variables_keeps_only_abi_keys() {
        let variables = parse_abi_variables(GO_ENV_JSON).unwrap();

        assert_eq!(
            variables,
            vec![
                AbiVariable {
                    name: "GOAMD64".to_string(),
                    default_value: "v1".to_string(),
                },
                AbiVariable {
                    name: "GOWASM".to_string(),
                    default_value: String::new(),
                },
            ]
        );
    }

    #[test]
    fn variables_are_memoized_per_binary() {
        let mut cache = AbiCache::new(probe_returning(GO_ENV_JSON, 1));
        let binary = Path::new("/root/.goenv/versions/1.22.5/bin/go");

        let first = cache.variables(binary);
        let second = cache.variables(binary);

        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn invalidate_forces_a_new_probe() {
        let mut cache = AbiCache::new(probe_returning(GO_ENV_JSON, 3));
        let binary = Path::new("/root/.goenv/versions/1.22.5/bin/go");

        cache.variables(binary);
        cache.invalidate();
        cache.variables(binary);
        cache.invalidate_binary(binary);
        cache.variables(binary);
    }

    #[test]
    fn variables_fall_back_when_probe_fails() {
        let mut probe = MockGoEnvProbe::new();
        probe.expect_go_env_json().times(2).returning(|binary| {
            Err(AbiError::Spawn {
                binary: binary.to_path_buf(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
        });
        let mut cache = AbiCache::new(probe);
        let binary = Path::new("/missing/go");

        let variables = cache.variables(binary);
        // fallbacks are not cached, so the probe runs again
        cache.variables(binary);

        assert_eq!(variables.len(), KNOWN_ABI_VARIABLES.len());
        assert_eq!(variables[0].name, "GOAMD64");
    }

    #[test]
    fn variables_fall_back_on_invalid_json() {
        let mut cache = AbiCache::new(probe_returning("not json", 1));
        let variables = cache.variables(Path::new("/root/go"));
        assert_eq!(variables.len(), KNOWN_ABI_VARIABLES.len());
    }

    #[rstest]
    #[case("amd64", &[("GOAMD64", "v3")], "-v3")]
    #[case("amd64", &[("GOAMD64", "v1")], "")]
    #[case("amd64", &[], "")]
    #[case("arm64", &[("GOAMD64", "v3")], "")]
    #[case("wasm", &[("GOWASM", "satconv,signext")], "-satconv-signext")]
    fn abi_suffix_returns_expected(
        #[case] goarch: &str,
        #[case] env: &[(&str, &str)],
        #[case] expected: &str,
    ) {
        let mut cache = AbiCache::new(probe_returning(GO_ENV_JSON, 1));
        let env: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let suffix = cache.abi_suffix(Path::new("/root/go"), goarch, &env);

        assert_eq!(suffix, expected);
    }

    #[rstest]
    #[case("GOMIPS", "mipsle", true)]
    #[case("GOMIPS", "mips64", false)]
    #[case("GOPPC64", "ppc64le", true)]
    #[case("GOUNKNOWN", "amd64", false)]
    fn is_relevant_for_arch_returns_expected(
        #[case] name: &str,
        #[case] goarch: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(is_relevant_for_arch(name, goarch), expected);
    }
}
