//! `astrodex.toml` settings. Every key is optional.

use crate::chart::HouseSystem;
use crate::ephemeris::EphemerisSettings;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_PATHS: [&str; 2] = ["configs/astrodex.toml", "../../configs/astrodex.toml"];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AstrodexConfig {
    #[serde(default)]
    pub ephemeris: EphemerisSettings,
    #[serde(default)]
    pub chart: ChartSettings,
    #[serde(default)]
    pub geocoding: GeocodingSettings,
    #[serde(default)]
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartSettings {
    #[serde(default)]
    pub house_system: HouseSystem,
    /// Hours east of UTC used when none is given
    #[serde(default)]
    pub utc_offset: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingSettings {
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
}

impl GeocodingSettings {
    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }
}

impl Default for GeocodingSettings {
    fn default() -> Self {
        Self {
            min_interval_ms: default_min_interval_ms(),
        }
    }
}

fn default_min_interval_ms() -> u64 {
    1000
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    #[serde(default = "default_storage_dir")]
    pub dir: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
        }
    }
}

fn default_storage_dir() -> PathBuf {
    PathBuf::from(".astrodex")
}

impl AstrodexConfig {
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse astrodex.toml: {e}"))
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Could not read {}: {e}", path.display()))?;
        Self::from_toml_str(&text)
    }

    /// Load an explicit file, or try the usual relative locations and fall
    /// back to defaults when none exists.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        for p in &CONFIG_PATHS {
            if let Ok(text) = fs::read_to_string(p) {
                log::debug!("Loaded config from {}", p);
                return Self::from_toml_str(&text);
            }
        }
        log::debug!("No astrodex.toml in {:?}; using defaults", CONFIG_PATHS);
        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::EphemerisBackend;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AstrodexConfig::from_toml_str("").unwrap();
        assert_eq!(config.ephemeris.backend, EphemerisBackend::Analytic);
        assert_eq!(config.chart.house_system, HouseSystem::Equal);
        assert_eq!(config.chart.utc_offset, None);
        assert_eq!(config.geocoding.min_interval(), Duration::from_secs(1));
        assert_eq!(config.storage.dir, PathBuf::from(".astrodex"));
    }

    #[test]
    fn reads_every_section() {
        let config = AstrodexConfig::from_toml_str(
            r#"
            [ephemeris]
            backend = "swiss"
            path = "/usr/share/sweph"

            [chart]
            house_system = "whole_sign"
            utc_offset = -8.0

            [geocoding]
            min_interval_ms = 250

            [storage]
            dir = "/tmp/astrodex"
            "#,
        )
        .unwrap();
        assert_eq!(config.ephemeris.backend, EphemerisBackend::Swiss);
        assert_eq!(config.ephemeris.path, Some(PathBuf::from("/usr/share/sweph")));
        assert_eq!(config.chart.house_system, HouseSystem::WholeSign);
        assert_eq!(config.chart.utc_offset, Some(-8.0));
        assert_eq!(config.geocoding.min_interval_ms, 250);
        assert_eq!(config.storage.dir, PathBuf::from("/tmp/astrodex"));
    }

    #[test]
    fn explicit_path_must_exist_and_parse() {
        assert!(AstrodexConfig::load(Some(Path::new("/nonexistent/astrodex.toml"))).is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[chart]\nutc_offset = 5.5").unwrap();
        let config = AstrodexConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.chart.utc_offset, Some(5.5));

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        writeln!(bad, "[chart]\nhouse_system = \"porphyry\"").unwrap();
        assert!(AstrodexConfig::load(Some(bad.path())).is_err());
    }
}
