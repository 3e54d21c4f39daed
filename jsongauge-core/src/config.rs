// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! YAML run configuration with strict validation.
//!
//! A raw struct carries the serde defaults; validation turns it into the
//! typed [`Config`] or fails with a `SetupError` before any backend runs.
//! A missing file yields the built-in defaults; a malformed file is fatal.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::backend;
use crate::error::SetupError;
use crate::normalize::Basis;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "jsongauge.yaml";

fn default_iterations() -> u64 {
    // Large enough to amortize fixed overhead in optimized runs; the
    // debug-profile count keeps wall-clock time tractable.
    if cfg!(debug_assertions) {
        100_000
    } else {
        1_000_000
    }
}

fn default_stress_iterations() -> u64 {
    if cfg!(debug_assertions) {
        1_000
    } else {
        10_000
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("results")
}

/// Raw configuration as parsed from YAML (before validation).
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default = "default_iterations")]
    iterations: u64,
    #[serde(default = "default_stress_iterations")]
    stress_iterations: u64,
    #[serde(default = "default_output_dir")]
    output_dir: PathBuf,
    #[serde(default)]
    basis: Basis,
    #[serde(default)]
    backends: Option<Vec<String>>,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            iterations: default_iterations(),
            stress_iterations: default_stress_iterations(),
            output_dir: default_output_dir(),
            basis: Basis::default(),
            backends: None,
        }
    }
}

/// Validated run configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Iteration count for the main fixture.
    pub iterations: u64,
    /// Iteration count for the stress fixture.
    pub stress_iterations: u64,
    /// Directory the report artifacts are written into.
    pub output_dir: PathBuf,
    /// Throughput normalization basis.
    pub basis: Basis,
    /// Optional backend selection; `None` runs the full registry.
    pub backends: Option<Vec<String>>,
}

impl Config {
    /// The built-in defaults, already validated.
    pub fn default_run() -> Self {
        Self {
            iterations: default_iterations(),
            stress_iterations: default_stress_iterations(),
            output_dir: default_output_dir(),
            basis: Basis::default(),
            backends: None,
        }
    }

    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, SetupError> {
        if !path.exists() {
            return Err(SetupError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let text = fs::read_to_string(path).map_err(|source| SetupError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: RawConfig =
            serde_yaml::from_str(&text).map_err(|err| SetupError::ConfigParse {
                message: err.to_string(),
            })?;
        Self::validate(raw)
    }

    /// Load a configuration file if it exists, otherwise use the
    /// defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, SetupError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default_run())
        }
    }

    fn validate(raw: RawConfig) -> Result<Self, SetupError> {
        if raw.iterations == 0 {
            return Err(SetupError::InvalidFieldValue {
                field: "iterations",
                value: "0".to_string(),
                reason: "iteration count must be positive".to_string(),
            });
        }
        if raw.stress_iterations == 0 {
            return Err(SetupError::InvalidFieldValue {
                field: "stress_iterations",
                value: "0".to_string(),
                reason: "iteration count must be positive".to_string(),
            });
        }
        if let Some(names) = &raw.backends {
            if names.is_empty() {
                return Err(SetupError::InvalidFieldValue {
                    field: "backends",
                    value: "[]".to_string(),
                    reason: "backend selection cannot be empty".to_string(),
                });
            }
            let known: Vec<&str> = backend::registry().iter().map(|b| b.name()).collect();
            for name in names {
                if !known.contains(&name.as_str()) {
                    return Err(SetupError::InvalidFieldValue {
                        field: "backends",
                        value: name.clone(),
                        reason: format!("unknown backend (known: {})", known.join(", ")),
                    });
                }
            }
        }
        Ok(Self {
            iterations: raw.iterations,
            stress_iterations: raw.stress_iterations,
            output_dir: raw.output_dir,
            basis: raw.basis,
            backends: raw.backends,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn load_yaml(text: &str) -> Result<Config, SetupError> {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        Config::load(file.path())
    }

    #[test]
    fn test_defaults_when_file_is_missing() {
        let config = Config::load_or_default(Path::new("does-not-exist.yaml")).unwrap();
        assert!(config.iterations >= 100_000);
        assert_eq!(config.basis, Basis::SharedMinified);
        assert!(config.backends.is_none());
    }

    #[test]
    fn test_explicit_load_of_missing_file_fails() {
        let err = Config::load(Path::new("does-not-exist.yaml")).unwrap_err();
        assert!(matches!(err, SetupError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_partial_file_fills_in_defaults() {
        let config = load_yaml("iterations: 5000\nbasis: own-length\n").unwrap();
        assert_eq!(config.iterations, 5000);
        assert_eq!(config.basis, Basis::OwnLength);
        assert_eq!(config.output_dir, PathBuf::from("results"));
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let err = load_yaml("iterations: 0\n").unwrap_err();
        assert!(matches!(
            err,
            SetupError::InvalidFieldValue {
                field: "iterations",
                ..
            }
        ));
    }

    #[test]
    fn test_unknown_backend_rejected() {
        let err = load_yaml("backends: [serde_json, rapidjson]\n").unwrap_err();
        match err {
            SetupError::InvalidFieldValue { field, value, .. } => {
                assert_eq!(field, "backends");
                assert_eq!(value, "rapidjson");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_backend_selection_rejected() {
        let err = load_yaml("backends: []\n").unwrap_err();
        assert!(matches!(err, SetupError::InvalidFieldValue { .. }));
    }

    #[test]
    fn test_malformed_yaml_is_a_parse_error() {
        let err = load_yaml("iterations: [not a number\n").unwrap_err();
        assert!(matches!(err, SetupError::ConfigParse { .. }));
    }
}
