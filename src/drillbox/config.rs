use crate::error::{DrillError, Result};
use crate::store::fs::FileStore;
use crate::store::DocumentStore;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

const CONFIG_NAME: &str = "config";
const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_CODE_LENGTH: usize = 6;
const DEFAULT_MAX_ATTEMPTS: u32 = 1000;
const DEFAULT_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub const KEYS: &[&str] = &["code-length", "code-alphabet", "max-attempts"];

/// Configuration for drillbox, stored in `<data dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DrillConfig {
    /// Length of generated short codes
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// Characters short codes are drawn from
    #[serde(default = "default_alphabet")]
    pub code_alphabet: String,

    /// How many candidate codes to try before giving up
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_code_length() -> usize {
    DEFAULT_CODE_LENGTH
}

fn default_alphabet() -> String {
    DEFAULT_ALPHABET.to_string()
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

impl Default for DrillConfig {
    fn default() -> Self {
        Self {
            code_length: DEFAULT_CODE_LENGTH,
            code_alphabet: default_alphabet(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl DrillConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(DrillError::Io)?;
        let config: DrillConfig =
            serde_json::from_str(&content).map_err(DrillError::Serialization)?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to the given directory, replacing the file atomically
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self).map_err(DrillError::Serialization)?;
        FileStore::new(config_dir.as_ref().to_path_buf()).write_document(CONFIG_NAME, &content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.code_length == 0 {
            return Err(DrillError::Validation(
                "code-length must be at least 1".to_string(),
            ));
        }
        if self.max_attempts == 0 {
            return Err(DrillError::Validation(
                "max-attempts must be at least 1".to_string(),
            ));
        }
        if self.code_alphabet.is_empty() {
            return Err(DrillError::Validation(
                "code-alphabet must not be empty".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = self.code_alphabet.chars().find(|c| !seen.insert(*c)) {
            return Err(DrillError::Validation(format!(
                "code-alphabet repeats '{}'",
                dup
            )));
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "code-length" => Some(self.code_length.to_string()),
            "code-alphabet" => Some(self.code_alphabet.clone()),
            "max-attempts" => Some(self.max_attempts.to_string()),
            _ => None,
        }
    }

    /// Set a key from its textual value, leaving the config untouched on error.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut updated = self.clone();
        match key {
            "code-length" => updated.code_length = parse_number(key, value)?,
            "code-alphabet" => updated.code_alphabet = value.to_string(),
            "max-attempts" => updated.max_attempts = parse_number(key, value)?,
            _ => {
                return Err(DrillError::Validation(format!(
                    "Unknown config key: {}",
                    key
                )))
            }
        }
        updated.validate()?;
        *self = updated;
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| DrillError::Validation(format!("{} expects a number, got {:?}", key, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DrillConfig::default();
        assert_eq!(config.code_length, 6);
        assert_eq!(config.max_attempts, 1000);
        assert_eq!(config.code_alphabet.chars().count(), 62);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = DrillConfig::load(dir.path()).unwrap();
        assert_eq!(config, DrillConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();

        let mut config = DrillConfig::default();
        config.set("code-length", "8").unwrap();
        config.save(dir.path()).unwrap();

        let loaded = DrillConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.code_length, 8);
        assert_eq!(loaded.max_attempts, 1000);
    }

    #[test]
    fn test_save_replaces_file_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join("nested");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join(CONFIG_FILENAME), r#"{"code_len"#).unwrap();

        let mut config = DrillConfig::default();
        config.set("max-attempts", "7").unwrap();
        config.save(&config_dir).unwrap();

        assert_eq!(DrillConfig::load(&config_dir).unwrap(), config);
        let names: Vec<String> = fs::read_dir(&config_dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec![CONFIG_FILENAME.to_string()]);
    }

    #[test]
    fn test_save_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join("a").join("b");
        DrillConfig::default().save(&config_dir).unwrap();
        assert!(config_dir.join(CONFIG_FILENAME).exists());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{"max_attempts": 5}"#).unwrap();

        let loaded = DrillConfig::load(dir.path()).unwrap();
        assert_eq!(loaded.max_attempts, 5);
        assert_eq!(loaded.code_length, 6);
    }

    #[test]
    fn test_set_rejects_invalid_values() {
        let mut config = DrillConfig::default();
        assert!(config.set("code-length", "0").is_err());
        assert!(config.set("max-attempts", "lots").is_err());
        assert!(config.set("code-alphabet", "aba").is_err());
        assert!(config.set("colour", "red").is_err());
        assert_eq!(config, DrillConfig::default());
    }

    #[test]
    fn test_get_known_and_unknown_keys() {
        let config = DrillConfig::default();
        for key in KEYS {
            assert!(config.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(config.get("nope"), None);
    }
}
