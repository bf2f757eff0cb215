pub mod source;
pub mod toml_config;

use crate::core::window::WindowConfig;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_column_names, validate_non_negative_length, validate_positive_length, Validate,
};
use source::SourceLocation;
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "domain-dash")]
#[command(about = "Searchable, sortable domain dashboard over a CSV sheet")]
pub struct CliConfig {
    /// CSV location: http(s) URL or local path (default: Sheet1.csv)
    #[arg(long)]
    pub source: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long)]
    pub username: Option<String>,

    #[arg(short, long)]
    pub password: Option<String>,

    /// Case-insensitive filter on the domain name
    #[arg(long, default_value = "")]
    pub search: String,

    /// Column header to click; repeat to toggle direction
    #[arg(long = "sort")]
    pub sort_clicks: Vec<String>,

    /// Scroll offset in pixels
    #[arg(long, default_value = "0")]
    pub scroll: f64,

    #[arg(long)]
    pub row_height: Option<f64>,

    #[arg(long)]
    pub viewport_height: Option<f64>,

    #[arg(long)]
    pub overscan: Option<usize>,

    /// Print the visible rows as JSON
    #[arg(long)]
    pub json: bool,

    /// Read commands from stdin instead of rendering once
    #[arg(short, long)]
    pub interactive: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

/// 合併 TOML 檔與命令列後的最終設定
#[derive(Debug, Clone)]
pub struct Settings {
    pub source: SourceLocation,
    pub window: WindowConfig,
    pub log_level: Option<String>,
    pub log_json: bool,
}

impl Settings {
    /// 命令列參數覆蓋檔案中的值
    pub fn merge(
        file: Option<TomlConfig>,
        source: Option<&str>,
        row_height: Option<f64>,
        viewport_height: Option<f64>,
        overscan: Option<usize>,
        log_json: bool,
    ) -> Self {
        let file = file.unwrap_or_default();
        let mut window = file.window;
        if let Some(h) = row_height {
            window.row_height = h;
        }
        if let Some(h) = viewport_height {
            window.viewport_height = h;
        }
        if let Some(n) = overscan {
            window.overscan = n;
        }

        Self {
            source: source
                .map(SourceLocation::parse)
                .or_else(|| file.source_location())
                .unwrap_or_default(),
            window,
            log_level: file.log_level().map(str::to_string),
            log_json: log_json || file.log_json(),
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        self.source.validate("source")?;
        validate_positive_length("row_height", self.window.row_height)?;
        validate_positive_length("viewport_height", self.window.viewport_height)?;
        Ok(())
    }
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn settings(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => Some(TomlConfig::from_file(path)?),
            None => None,
        };
        if let Some(file) = &file {
            file.validate()?;
        }

        Ok(Settings::merge(
            file,
            self.source.as_deref(),
            self.row_height,
            self.viewport_height,
            self.overscan,
            self.log_json,
        ))
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_column_names("sort", &self.sort_clicks)?;
        validate_non_negative_length("scroll", self.scroll)?;
        if let Some(source) = &self.source {
            SourceLocation::parse(source).validate("source")?;
        }
        if let Some(h) = self.row_height {
            validate_positive_length("row_height", h)?;
        }
        if let Some(h) = self.viewport_height {
            validate_positive_length("viewport_height", h)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_values_override_file() {
        let file = TomlConfig::from_toml_str(
            "[source]\nlocation = \"https://cdn.example.com/Sheet1.csv\"\n[window]\noverscan = 1\nrow_height = 20.0\n",
        )
        .unwrap();

        let settings = Settings::merge(Some(file), Some("local.csv"), None, None, Some(9), false);

        assert_eq!(settings.source, SourceLocation::File("local.csv".into()));
        assert_eq!(settings.window.overscan, 9);
        assert_eq!(settings.window.row_height, 20.0);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::merge(None, None, None, None, None, false);

        assert_eq!(settings.source, SourceLocation::default());
        assert_eq!(settings.window, WindowConfig::default());
        assert_eq!(settings.log_level, None);
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_parsing_and_validation() {
        let config = CliConfig::parse_from([
            "domain-dash",
            "--source",
            "http://localhost:8080/Sheet1.csv",
            "-u",
            "demo",
            "-p",
            "demo",
            "--sort",
            "DR",
            "--sort",
            "DR",
            "--search",
            "shop",
        ]);

        assert_eq!(config.sort_clicks, vec!["DR", "DR"]);
        assert_eq!(config.search, "shop");
        assert!(config.validate().is_ok());

        let bad = CliConfig::parse_from(["domain-dash", "--sort", "Rank"]);
        assert!(bad.validate().is_err());
    }
}
