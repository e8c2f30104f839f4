//! Typed application configuration, built and validated from a [`ConfigPort`].
//!
//! Every key is optional; missing keys fall back to the defaults below.

use crate::domain::error::StocksvizError;
use crate::domain::window::TimeWindow;
use crate::ports::config_port::ConfigPort;
use std::path::PathBuf;

pub const DEFAULT_PROCESSED_DIR: &str = "./datasets/data/processed";
pub const DEFAULT_MACRO_FILE: &str = "./datasets/data/Daily_macro_interpolate_data.csv";
pub const DEFAULT_SYNTHETIC_FILE: &str = "./datasets/data/stock_data.csv";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub processed_dir: PathBuf,
    pub macro_file: PathBuf,
    pub synthetic_file: PathBuf,
    pub enable_preprocessing: bool,
    pub time_window: TimeWindow,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            processed_dir: PathBuf::from(DEFAULT_PROCESSED_DIR),
            macro_file: PathBuf::from(DEFAULT_MACRO_FILE),
            synthetic_file: PathBuf::from(DEFAULT_SYNTHETIC_FILE),
            enable_preprocessing: true,
            time_window: TimeWindow::All,
        }
    }
}

impl AppConfig {
    pub fn from_port(config: &dyn ConfigPort) -> Result<Self, StocksvizError> {
        validate_paths(config)?;
        Ok(Self {
            processed_dir: config.get_path("data", "processed_dir", DEFAULT_PROCESSED_DIR),
            macro_file: config.get_path("data", "macro_file", DEFAULT_MACRO_FILE),
            synthetic_file: config.get_path("data", "synthetic_file", DEFAULT_SYNTHETIC_FILE),
            enable_preprocessing: config.get_bool("pipeline", "enable_preprocessing", true),
            time_window: parse_time_window(config)?,
        })
    }
}

fn validate_paths(config: &dyn ConfigPort) -> Result<(), StocksvizError> {
    for key in ["processed_dir", "macro_file", "synthetic_file"] {
        if let Some(value) = config.get_string("data", key) {
            if value.trim().is_empty() {
                return Err(StocksvizError::ConfigInvalid {
                    section: "data".to_string(),
                    key: key.to_string(),
                    reason: format!("{} must not be empty", key),
                });
            }
        }
    }
    Ok(())
}

fn parse_time_window(config: &dyn ConfigPort) -> Result<TimeWindow, StocksvizError> {
    match config.get_string("display", "time_window") {
        None => Ok(TimeWindow::All),
        Some(s) => s.parse().map_err(|reason| StocksvizError::ConfigInvalid {
            section: "display".to_string(),
            key: "time_window".to_string(),
            reason,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapConfig(HashMap<(String, String), String>);

    impl MapConfig {
        fn new(entries: &[(&str, &str, &str)]) -> Self {
            Self(
                entries
                    .iter()
                    .map(|(s, k, v)| ((s.to_string(), k.to_string()), v.to_string()))
                    .collect(),
            )
        }
    }

    impl ConfigPort for MapConfig {
        fn get_string(&self, section: &str, key: &str) -> Option<String> {
            self.0.get(&(section.to_string(), key.to_string())).cloned()
        }

        fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
            self.get_string(section, key)
                .map(|v| v == "true")
                .unwrap_or(default)
        }
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = AppConfig::from_port(&MapConfig::new(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn reads_every_key() {
        let config = AppConfig::from_port(&MapConfig::new(&[
            ("data", "processed_dir", "/data/companies"),
            ("data", "macro_file", "/data/macro.csv"),
            ("data", "synthetic_file", "/data/synthetic.csv"),
            ("pipeline", "enable_preprocessing", "false"),
            ("display", "time_window", "3 Months"),
        ]))
        .unwrap();

        assert_eq!(config.processed_dir, PathBuf::from("/data/companies"));
        assert_eq!(config.macro_file, PathBuf::from("/data/macro.csv"));
        assert_eq!(config.synthetic_file, PathBuf::from("/data/synthetic.csv"));
        assert!(!config.enable_preprocessing);
        assert_eq!(config.time_window, TimeWindow::LastThreeMonths);
    }

    #[test]
    fn rejects_unknown_time_window() {
        let err = AppConfig::from_port(&MapConfig::new(&[("display", "time_window", "decade")]))
            .unwrap_err();
        assert!(matches!(err, StocksvizError::ConfigInvalid { key, .. } if key == "time_window"));
    }

    #[test]
    fn rejects_empty_path() {
        let err = AppConfig::from_port(&MapConfig::new(&[("data", "macro_file", "  ")]))
            .unwrap_err();
        assert!(matches!(err, StocksvizError::ConfigInvalid { key, .. } if key == "macro_file"));
    }
}
