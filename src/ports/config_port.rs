//! Configuration access port.

use std::path::PathBuf;

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;

    fn get_path(&self, section: &str, key: &str, default: &str) -> PathBuf {
        self.get_string(section, key)
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| default.to_string())
            .into()
    }
}
