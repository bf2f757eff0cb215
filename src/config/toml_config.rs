use crate::config::source::SourceLocation;
use crate::core::window::WindowConfig;
use crate::utils::error::{DashError, Result};
use crate::utils::validation::{validate_positive_length, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub window: WindowConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    /// URL 或本機路徑
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DashError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DashError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CSV_URL})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DashError::ConfigValidationError {
            field: "environment".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn source_location(&self) -> Option<SourceLocation> {
        self.source.location.as_deref().map(SourceLocation::parse)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn log_json(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(location) = self.source_location() {
            location.validate("source.location")?;
        }
        validate_positive_length("window.row_height", self.window.row_height)?;
        validate_positive_length("window.viewport_height", self.window.viewport_height)?;

        if let Some(level) = self.log_level() {
            let valid = ["trace", "debug", "info", "warn", "error"];
            if !valid.contains(&level.to_ascii_lowercase().as_str()) {
                return Err(DashError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.to_string(),
                    reason: format!("Valid levels: {}", valid.join(", ")),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[source]
location = "https://cdn.example.com/Sheet1.csv"

[window]
row_height = 40.0
viewport_height = 800.0
overscan = 2

[logging]
level = "debug"
json = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(
            config.source_location(),
            Some(SourceLocation::Url("https://cdn.example.com/Sheet1.csv".to_string()))
        );
        assert_eq!(config.window.row_height, 40.0);
        assert_eq!(config.window.overscan, 2);
        assert_eq!(config.log_level(), Some("debug"));
        assert!(config.log_json());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = TomlConfig::from_toml_str("[window]\noverscan = 1\n").unwrap();

        assert_eq!(config.source_location(), None);
        assert_eq!(config.window.row_height, 35.0);
        assert_eq!(config.window.viewport_height, 600.0);
        assert_eq!(config.window.overscan, 1);
        assert!(!config.log_json());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DOMAIN_DASH_TEST_CSV", "http://localhost:9000/Sheet1.csv");

        let config =
            TomlConfig::from_toml_str("[source]\nlocation = \"${DOMAIN_DASH_TEST_CSV}\"\n")
                .unwrap();
        assert_eq!(
            config.source.location.as_deref(),
            Some("http://localhost:9000/Sheet1.csv")
        );

        std::env::remove_var("DOMAIN_DASH_TEST_CSV");
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str("[window]\nrow_height = 0.0\n").unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[source]\nlocation = \"  \"\n").unwrap();
        assert!(config.validate().is_err());

        let config =
            TomlConfig::from_toml_str("[source]\nlocation = \"https://\"\n").unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[source]\nlocation = \"./public/Sheet1.csv\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(
            config.source_location(),
            Some(SourceLocation::File("./public/Sheet1.csv".into()))
        );
    }
}
