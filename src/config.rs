// src/config.rs
//
// Runtime configuration
//
// Load order:
// 1. Built-in defaults
// 2. TOML file named by QA_CONFIG (optional)
// 3. QA_DATABASE_PATH / QA_LOG_LEVEL environment overrides

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AppError, AppResult};

pub const CONFIG_ENV: &str = "QA_CONFIG";
pub const DATABASE_PATH_ENV: &str = "QA_DATABASE_PATH";
pub const LOG_LEVEL_ENV: &str = "QA_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct QaConfig {
    /// Default log filter, used when RUST_LOG is not set
    pub log_level: String,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file; the platform data directory is used when absent
    pub path: Option<PathBuf>,
    pub max_connections: u32,
    pub busy_timeout_ms: u64,
}

impl Default for QaConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            database: DatabaseConfig::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: None,
            max_connections: 15,
            busy_timeout_ms: 5000,
        }
    }
}

impl QaConfig {
    /// Load configuration from the process environment
    pub fn load() -> AppResult<Self> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> AppResult<Self> {
        log::debug!("Reading configuration from {}", path.display());
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> AppResult<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(DATABASE_PATH_ENV).filter(|p| !p.trim().is_empty()) {
            self.database.path = Some(PathBuf::from(path));
        }
        if let Some(level) = lookup(LOG_LEVEL_ENV).filter(|l| !l.trim().is_empty()) {
            self.log_level = level;
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.database.max_connections == 0 {
            return Err(AppError::Config(
                "database.max_connections must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl DatabaseConfig {
    /// The database file to open, creating its directory if needed
    pub fn resolve_path(&self) -> AppResult<PathBuf> {
        match &self.path {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                Ok(path.clone())
            }
            None => default_database_path(),
        }
    }
}

/// Get the default database file path
///
/// Path structure: {APP_DATA}/qa/qa.db
pub fn default_database_path() -> AppResult<PathBuf> {
    let app_data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Config("Could not determine app data directory".to_string()))?;

    let qa_dir = app_data_dir.join("qa");
    std::fs::create_dir_all(&qa_dir)?;

    Ok(qa_dir.join("qa.db"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = QaConfig::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.database.max_connections, 15);
        assert_eq!(config.database.busy_timeout_ms, 5000);
        assert!(config.database.path.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = QaConfig::from_toml_str(
            r#"
            [database]
            max_connections = 4
            "#,
        )
        .unwrap();

        assert_eq!(config.database.max_connections, 4);
        assert_eq!(config.database.busy_timeout_ms, 5000);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_zero_connections_rejected() {
        let err = QaConfig::from_toml_str("[database]\nmax_connections = 0\n").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let err = QaConfig::from_toml_str("log_level = [").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_level = \"debug\"").unwrap();
        writeln!(file, "[database]").unwrap();
        writeln!(file, "path = \"/tmp/qa-test.db\"").unwrap();

        let config = QaConfig::from_file(file.path()).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.database.path, Some(PathBuf::from("/tmp/qa-test.db")));
    }

    #[test]
    fn test_env_overrides_win() {
        let env: HashMap<&str, &str> = [
            (DATABASE_PATH_ENV, "/var/lib/qa/override.db"),
            (LOG_LEVEL_ENV, "warn"),
        ]
        .into_iter()
        .collect();

        let mut config = QaConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(
            config.database.path,
            Some(PathBuf::from("/var/lib/qa/override.db"))
        );
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_blank_overrides_are_ignored() {
        let mut config = QaConfig::default();
        config.apply_overrides(|_| Some("  ".to_string()));
        assert!(config.database.path.is_none());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_resolve_path_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("qa.db");
        let config = DatabaseConfig {
            path: Some(db_path.clone()),
            ..DatabaseConfig::default()
        };

        assert_eq!(config.resolve_path().unwrap(), db_path);
        assert!(dir.path().join("nested").is_dir());
    }
}
