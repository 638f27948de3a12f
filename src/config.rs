// Studio Configuration
// Tunable constants: tempo defaults, band cutoffs, storage key

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Density cutoffs for complexity bands
///
/// Bands are half-open: a density equal to a cutoff falls into the next band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DensityBands {
    pub sparse_below: f64,
    pub moderate_below: f64,
    pub medium_below: f64,
    pub dense_below: f64,
}

impl Default for DensityBands {
    fn default() -> Self {
        DensityBands {
            sparse_below: 0.25,
            moderate_below: 0.40,
            medium_below: 0.60,
            dense_below: 0.75,
        }
    }
}

/// BPM cutoffs for slow / medium / fast tempo labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TempoBands {
    pub slow_below: u32,
    pub medium_below: u32,
}

impl Default for TempoBands {
    fn default() -> Self {
        TempoBands {
            slow_below: 165,
            medium_below: 173,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// Tempo used for a fresh or reset session
    pub default_tempo: u32,

    /// Range offered by the tempo slider (inclusive); advisory only
    pub tempo_range: (u32, u32),

    /// Maximum BPM distance for drum compatibility suggestions
    pub bpm_tolerance: u32,

    /// Storage key for the persisted session document
    pub storage_key: String,

    pub density_bands: DensityBands,
    pub tempo_bands: TempoBands,
}

impl Default for StudioConfig {
    fn default() -> Self {
        StudioConfig {
            default_tempo: 170,
            tempo_range: (160, 180),
            bpm_tolerance: 10,
            storage_key: "beatgrid_session_state".to_string(),
            density_bands: DensityBands::default(),
            tempo_bands: TempoBands::default(),
        }
    }
}

impl StudioConfig {
    /// Read a config file; missing keys take their defaults
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Load configuration, falling back to defaults
///
/// A missing file is normal. An unreadable or malformed file is logged and
/// ignored so a bad config never blocks startup.
pub fn load_config(path: &Path) -> StudioConfig {
    if !path.exists() {
        return StudioConfig::default();
    }

    match StudioConfig::from_file(path) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Ignoring config at {}: {}", path.display(), e);
            StudioConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = StudioConfig::default();
        assert_eq!(config.default_tempo, 170);
        assert_eq!(config.tempo_range, (160, 180));
        assert_eq!(config.bpm_tolerance, 10);
        assert_eq!(config.storage_key, "beatgrid_session_state");
        assert_eq!(config.density_bands.sparse_below, 0.25);
        assert_eq!(config.tempo_bands.slow_below, 165);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = load_config(&temp_dir.path().join("config.json"));
        assert_eq!(config, StudioConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{"default_tempo": 174, "tempo_bands": {"slow_below": 168}}"#).unwrap();

        let config = load_config(&path);
        assert_eq!(config.default_tempo, 174);
        assert_eq!(config.tempo_bands.slow_below, 168);
        assert_eq!(config.tempo_bands.medium_below, 173);
        assert_eq!(config.bpm_tolerance, 10);
    }

    #[test]
    fn test_malformed_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(load_config(&path), StudioConfig::default());
        assert!(StudioConfig::from_file(&path).is_err());
    }
}
