//! Scenario override and population files
//!
//! Both are YAML, or JSON when the file has a `.json` extension. An override
//! file is a partial `ScenarioBuilder`; a population file is a list of
//! wealth holders.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use wealthtax_core::ScenarioBuilder;
use wealthtax_core::model::{Population, WealthHolder};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("{} contains no wealth holders", path.display())]
    EmptyPopulation { path: PathBuf },
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed = if is_json(path) {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    } else {
        serde_saphyr::from_str(&content).map_err(|e| e.to_string())
    };
    parsed.map_err(|message| LoadError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

/// Load a partial scenario from an override file
pub fn load_overrides(path: &Path) -> Result<ScenarioBuilder, LoadError> {
    let overrides: ScenarioBuilder = read_document(path)?;
    tracing::debug!(path = %path.display(), "loaded scenario overrides");
    Ok(overrides)
}

/// Load and validate a population file
pub fn load_population(path: &Path) -> Result<Population, LoadError> {
    let holders: Vec<WealthHolder> = read_document(path)?;
    if holders.is_empty() {
        return Err(LoadError::EmptyPopulation {
            path: path.to_path_buf(),
        });
    }
    Population::new(holders).map_err(|e| LoadError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a population file, falling back to the static tier baseline on any
/// failure.
pub fn load_population_or_baseline(path: &Path) -> Population {
    match load_population(path) {
        Ok(population) => {
            tracing::info!(
                path = %path.display(),
                holders = population.len(),
                "loaded population"
            );
            population
        }
        Err(err) => {
            tracing::warn!("{err}; falling back to baseline tiers");
            Population::baseline()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_yaml_population() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "population.yaml",
            "- net_worth: 3.5\n  name: First\n- net_worth: 12.0\n  industry: Energy\n",
        );
        let population = load_population(&path).unwrap();
        assert_eq!(population.len(), 2);
        assert_eq!(population.total_wealth(), 15.5);
    }

    #[test]
    fn test_load_json_population() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "population.json",
            r#"[{"net_worth": 2.0}, {"net_worth": 4.0, "real_estate_share": 0.2}]"#,
        );
        let population = load_population(&path).unwrap();
        assert_eq!(population.holders()[1].real_estate_share, Some(0.2));
    }

    #[test]
    fn test_invalid_holder_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "bad.json", r#"[{"net_worth": -1.0}]"#);
        assert!(matches!(
            load_population(&path),
            Err(LoadError::Parse { .. })
        ));
    }

    #[test]
    fn test_fallback_to_baseline() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.yaml");
        assert!(matches!(
            load_population(&missing),
            Err(LoadError::Io { .. })
        ));
        assert_eq!(load_population_or_baseline(&missing), Population::baseline());

        let empty = write(&dir, "empty.json", "[]");
        assert_eq!(load_population_or_baseline(&empty), Population::baseline());

        let garbage = write(&dir, "garbage.yaml", "net_worth: [not, a, list");
        assert_eq!(load_population_or_baseline(&garbage), Population::baseline());
    }

    #[test]
    fn test_load_overrides() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "overrides.yaml",
            "name: aggressive\nelasticity: 0.9\ncompliance_rate: 0.75\nhorizon_years: 30\n",
        );
        let overrides = load_overrides(&path).unwrap();
        assert_eq!(overrides.name.as_deref(), Some("aggressive"));
        assert_eq!(overrides.elasticity, Some(0.9));
        assert_eq!(overrides.horizon_years, Some(30));
        assert!(overrides.tax_rate.is_none());
    }

    #[test]
    fn test_unknown_override_field_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "typo.json", r#"{"elastcity": 0.9}"#);
        assert!(matches!(
            load_overrides(&path),
            Err(LoadError::Parse { .. })
        ));
    }
}
