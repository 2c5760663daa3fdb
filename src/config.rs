//! TOML-based configuration for caissa.
//!
//! Collects every report default in one structure instead of scattering
//! them across builder signatures. Values reflect the observed ranges of
//! the dataset (Elo 246-3958, turns 1-201, event dates 1942-2024).
//!
//! Example configuration:
//! ```toml
//! min_games = 50
//! fetch_rows = 25
//! low_white_elo = 1200
//! high_white_elo = 2900
//! start_date = "01-JAN-1990"
//! end_date = "31-DEC-2020"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Default parameters for the analytical reports.
///
/// Range bounds are inclusive on both ends. No cross-field validation is
/// performed; a caller supplying `low_turn > high_turn` gets a syntactically
/// valid query that selects no rows.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct QueryDefaults {
    /// Minimum decided games an opening needs to qualify for the win-rate report.
    pub min_games: u32,

    /// Row cap applied to the row-limited fragments (FETCH FIRST n ROWS ONLY).
    pub fetch_rows: u64,

    /// White Elo range.
    pub low_white_elo: i64,
    pub high_white_elo: i64,

    /// Black Elo range.
    pub low_black_elo: i64,
    pub high_black_elo: i64,

    /// Turn-count range.
    pub low_turn: i64,
    pub high_turn: i64,

    /// Event-date range, DD-MON-YYYY.
    pub start_date: String,
    pub end_date: String,

    /// Month/year window for the risky-openings report, MON-YYYY.
    pub start_month: String,
    pub end_month: String,
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Self {
            min_games: 1,
            fetch_rows: 130,
            low_white_elo: 246,
            high_white_elo: 3958,
            low_black_elo: 246,
            high_black_elo: 3958,
            low_turn: 1,
            high_turn: 201,
            start_date: "01-JAN-1942".to_string(),
            end_date: "01-JAN-2024".to_string(),
            start_month: "JAN-2018".to_string(),
            end_month: "DEC-2023".to_string(),
        }
    }
}

impl QueryDefaults {
    /// Load defaults from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let defaults: QueryDefaults = toml::from_str(&content)?;
        Ok(defaults)
    }

    /// Load defaults from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `CAISSA_CONFIG`
    /// 2. `./caissa.toml`
    /// 3. `~/.config/caissa/config.toml`
    ///
    /// Falls back to [`QueryDefaults::default`] when no file is found.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = env::var("CAISSA_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("caissa.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("caissa").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(QueryDefaults::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values_match_dataset_ranges() {
        let defaults = QueryDefaults::default();

        assert_eq!(defaults.min_games, 1);
        assert_eq!(defaults.fetch_rows, 130);
        assert_eq!(defaults.low_white_elo, 246);
        assert_eq!(defaults.high_white_elo, 3958);
        assert_eq!(defaults.low_turn, 1);
        assert_eq!(defaults.high_turn, 201);
        assert_eq!(defaults.start_date, "01-JAN-1942");
        assert_eq!(defaults.end_date, "01-JAN-2024");
        assert_eq!(defaults.start_month, "JAN-2018");
        assert_eq!(defaults.end_month, "DEC-2023");
    }

    #[test]
    fn test_parse_toml_partial_override() {
        let toml = r#"
min_games = 50
fetch_rows = 25
start_month = "MAR-2020"
"#;

        let defaults: QueryDefaults = toml::from_str(toml).unwrap();

        assert_eq!(defaults.min_games, 50);
        assert_eq!(defaults.fetch_rows, 25);
        assert_eq!(defaults.start_month, "MAR-2020");
        // Untouched fields keep their defaults
        assert_eq!(defaults.high_black_elo, 3958);
        assert_eq!(defaults.end_date, "01-JAN-2024");
    }

    #[test]
    fn test_from_file_missing() {
        let result = QueryDefaults::from_file("/nonexistent/caissa.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_roundtrip_serialize() {
        let defaults = QueryDefaults::default();
        let text = toml::to_string(&defaults).unwrap();
        let parsed: QueryDefaults = toml::from_str(&text).unwrap();
        assert_eq!(parsed, defaults);
    }
}
