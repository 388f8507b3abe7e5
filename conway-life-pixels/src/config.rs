//! The JSON configuration file read at startup.

use life_grid::{CellMatrix, Grid, GridError, InitPolicy, Random};
use life_pixels_support::WindowSettings;
use serde::Deserialize;
use std::fs;
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const PIXELS_PER_INCH: f64 = 100.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Config {
    pub rows: i64,
    pub cols: i64,
    pub grid_initialization: String,
    #[serde(default = "default_inches")]
    pub height_inches: f64,
    #[serde(default = "default_inches")]
    pub width_inches: f64,
    #[serde(default = "default_tick_millis")]
    pub tick_millis: NonZeroU64,
}

fn default_inches() -> f64 {
    5.0
}

fn default_tick_millis() -> NonZeroU64 {
    NonZeroU64::new(500).unwrap_or(NonZeroU64::MIN)
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&json).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn init_policy(&self) -> InitPolicy {
        InitPolicy::from_config_str(&self.grid_initialization)
    }

    pub fn build_grid(&self, rand: &mut Random) -> Result<Grid, GridError> {
        let (rows, cols) = CellMatrix::checked_dimensions(self.rows, self.cols)?;
        Grid::with_random(rows, cols, self.init_policy(), rand)
    }

    pub fn window_settings(&self) -> WindowSettings {
        WindowSettings {
            width: self.width_inches * PIXELS_PER_INCH,
            height: self.height_inches * PIXELS_PER_INCH,
            tick: Duration::from_millis(self.tick_millis.get()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config = Config::from_json(
            r#"{ "rows": 30, "cols": 40, "grid_initialization": "zeros" }"#,
        )
        .unwrap();
        assert_eq!(config.init_policy(), InitPolicy::Zeros);
        assert_eq!(
            config.window_settings(),
            WindowSettings {
                width: 500.0,
                height: 500.0,
                tick: Duration::from_millis(500),
            }
        );

        let grid = config.build_grid(&mut Random::from_seed(0)).unwrap();
        assert_eq!(grid.read().shape(), (30, 40));
        assert_eq!(grid.read().num_alive(), 0);
    }

    #[test]
    fn full_config() {
        let config = Config::from_json(
            r#"{
                "height_inches": 8,
                "width_inches": 6.5,
                "rows": 80,
                "cols": 65,
                "grid_initialization": "ones",
                "tick_millis": 100
            }"#,
        )
        .unwrap();
        let settings = config.window_settings();
        assert_eq!(settings.width, 650.0);
        assert_eq!(settings.height, 800.0);
        assert_eq!(settings.tick, Duration::from_millis(100));

        let grid = config.build_grid(&mut Random::from_seed(0)).unwrap();
        assert_eq!(grid.read().num_alive(), 80 * 65);
    }

    #[test]
    fn unknown_policy_still_builds_a_grid() {
        let config = Config::from_json(
            r#"{ "rows": 4, "cols": 5, "grid_initialization": "gliders" }"#,
        )
        .unwrap();
        assert_eq!(config.init_policy(), InitPolicy::Random);
        let grid = config.build_grid(&mut Random::from_seed(9)).unwrap();
        assert_eq!(grid.read().shape(), (4, 5));
    }

    #[test]
    fn non_positive_dimensions_fail_to_build() {
        let config = Config::from_json(
            r#"{ "rows": -3, "cols": 5, "grid_initialization": "zeros" }"#,
        )
        .unwrap();
        assert_eq!(
            config.build_grid(&mut Random::from_seed(0)),
            Err(GridError::InvalidDimension { rows: -3, cols: 5 })
        );
    }

    #[test]
    fn zero_tick_is_rejected() {
        let result = Config::from_json(
            r#"{ "rows": 4, "cols": 5, "grid_initialization": "zeros", "tick_millis": 0 }"#,
        );
        assert!(result.is_err());

        let config = Config::from_json(
            r#"{ "rows": 4, "cols": 5, "grid_initialization": "zeros", "tick_millis": 1 }"#,
        )
        .unwrap();
        assert_eq!(config.window_settings().tick, Duration::from_millis(1));
    }

    #[test]
    fn zero_tick_file_fails_to_load() {
        let path = std::env::temp_dir().join(format!(
            "conway-life-pixels-zero-tick-{}.json",
            std::process::id()
        ));
        fs::write(
            &path,
            r#"{ "rows": 4, "cols": 5, "grid_initialization": "ones", "tick_millis": 0 }"#,
        )
        .unwrap();
        let result = Config::load(&path);
        fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn missing_fields_are_parse_errors() {
        assert!(Config::from_json(r#"{ "rows": 4, "cols": 5 }"#).is_err());
        assert!(Config::from_json(r#"{ "rows": "4", "cols": 5, "grid_initialization": "ones" }"#).is_err());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = Path::new("this/config/does/not/exist.json");
        assert!(matches!(
            Config::load(path),
            Err(ConfigError::Io { path: p, .. }) if p == path
        ));
    }
}
