use crate::core::{ConfigProvider, CorruptFilePolicy};
use crate::utils::error::{PlaceError, Result};
use crate::utils::logger::LogFormat;
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_DATA_DIR: &str = "./places";
pub const DEFAULT_FILE_NAME: &str = "places_database.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_file_name")]
    pub file_name: String,
    #[serde(default)]
    pub on_corrupt: CorruptFilePolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

fn default_data_dir() -> String {
    DEFAULT_DATA_DIR.to_string()
}

fn default_file_name() -> String {
    DEFAULT_FILE_NAME.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            file_name: default_file_name(),
            on_corrupt: CorruptFilePolicy::default(),
        }
    }
}

impl StoreConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PlaceError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PlaceError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${HOME})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PlaceError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn log_format(&self) -> LogFormat {
        match self.logging.as_ref().and_then(|l| l.json) {
            Some(true) => LogFormat::Json,
            _ => LogFormat::Compact,
        }
    }
}

impl ConfigProvider for StoreConfig {
    fn data_dir(&self) -> &str {
        &self.storage.data_dir
    }

    fn file_name(&self) -> &str {
        &self.storage.file_name
    }

    fn corrupt_policy(&self) -> CorruptFilePolicy {
        self.storage.on_corrupt
    }
}

impl Validate for StoreConfig {
    fn validate(&self) -> Result<()> {
        crate::utils::validation::validate_path("storage.data_dir", &self.storage.data_dir)?;
        crate::utils::validation::validate_file_name("storage.file_name", &self.storage.file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_storage_config() {
        let toml_content = r#"
[storage]
data_dir = "/var/lib/places"
file_name = "journal.json"
on_corrupt = "fail"

[logging]
verbose = true
"#;

        let config = StoreConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.data_dir(), "/var/lib/places");
        assert_eq!(config.file_name(), "journal.json");
        assert_eq!(config.corrupt_policy(), CorruptFilePolicy::Fail);
        assert!(config.verbose());
        assert_eq!(config.log_format(), LogFormat::Compact);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_logging_switch() {
        let config = StoreConfig::from_toml_str("[logging]\njson = true\n").unwrap();
        assert_eq!(config.log_format(), LogFormat::Json);
        assert!(!config.verbose());
    }

    #[test]
    fn test_defaults_when_sections_missing() {
        let config = StoreConfig::from_toml_str("").unwrap();

        assert_eq!(config.data_dir(), DEFAULT_DATA_DIR);
        assert_eq!(config.file_name(), DEFAULT_FILE_NAME);
        assert_eq!(config.corrupt_policy(), CorruptFilePolicy::StartEmpty);
        assert!(!config.verbose());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PLACE_JOURNAL_TEST_DIR", "/tmp/place-journal");

        let toml_content = r#"
[storage]
data_dir = "${PLACE_JOURNAL_TEST_DIR}/data"
"#;

        let config = StoreConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.data_dir(), "/tmp/place-journal/data");

        std::env::remove_var("PLACE_JOURNAL_TEST_DIR");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[storage]
file_name = "sub/places.json"
"#;

        let config = StoreConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_policy_is_rejected() {
        let toml_content = r#"
[storage]
on_corrupt = "explode"
"#;

        assert!(matches!(
            StoreConfig::from_toml_str(toml_content),
            Err(PlaceError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[storage]\nfile_name = \"file-test.json\"\n")
            .unwrap();

        let config = StoreConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.file_name(), "file-test.json");
    }
}
