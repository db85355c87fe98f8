use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};

/// Default Telnyx API v2 endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.telnyx.com/v2";

/// Output format for the run summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Human => write!(f, "human"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "human" | "text" | "console" => Ok(OutputFormat::Human),
            "json" => Ok(OutputFormat::Json),
            _ => Err(AppError::Config(format!("Unknown output format: {}", s))),
        }
    }
}

/// Global settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    #[serde(default)]
    pub output_format: OutputFormat,
    /// Where the JSON results mapping is written after a run
    #[serde(default)]
    pub results_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            output_format: OutputFormat::default(),
            results_file: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AuthConfig {
    /// Telnyx API key (bearer token). Usually supplied via TELNYX_API_KEY
    /// rather than stored here.
    pub api_key: Option<String>,
}

/// Phone numbers used by the SMS and voice probes
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct NumbersConfig {
    /// Outbound number the account owns; SMS and voice probes refuse to run
    /// without one.
    pub from_number: Option<String>,
    /// Default destination number for SMS/voice probes
    pub test_phone: Option<String>,
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub global: GlobalConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub numbers: NumbersConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::FileNotFound(path.display().to_string())
            } else {
                AppError::Io(e)
            }
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Create a default configuration
    pub fn default_config() -> Self {
        Config::default()
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Resolve the results file path, falling back to the fixed default
    /// under the system temp directory.
    pub fn results_file(&self) -> PathBuf {
        self.global
            .results_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("telnyx_preflight_results.json"))
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("TELNYX_API_KEY") {
            self.auth.api_key = Some(key);
        }
        if let Ok(number) = std::env::var("TELNYX_FROM_NUMBER") {
            self.numbers.from_number = Some(number);
        }
        if let Ok(phone) = std::env::var("TELNYX_TEST_PHONE") {
            self.numbers.test_phone = Some(phone);
        }
        if let Ok(url) = std::env::var("TELNYX_BASE_URL") {
            self.global.base_url = url;
        }
    }
}

/// Validate configuration, returning non-fatal warnings
pub fn validate_config(config: &Config) -> Result<Vec<String>> {
    let mut warnings = Vec::new();

    url::Url::parse(&config.global.base_url)?;

    if config.auth.api_key.is_none() {
        warnings.push(
            "No API key configured; supply one via TELNYX_API_KEY or --api-key".to_string(),
        );
    }

    if config.numbers.from_number.is_none() {
        warnings.push(
            "No outbound number configured; SMS and voice probes will fail until one is set"
                .to_string(),
        );
    }

    for (field, number) in [
        ("from_number", &config.numbers.from_number),
        ("test_phone", &config.numbers.test_phone),
    ] {
        if let Some(n) = number {
            if !n.starts_with('+') {
                warnings.push(format!(
                    "{} '{}' does not start with '+'; Telnyx expects E.164 format",
                    field, n
                ));
            }
        }
    }

    if config.global.timeout_seconds == 0 {
        warnings.push("timeout_seconds is 0; requests will fail immediately".to_string());
    }

    Ok(warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_config();
        assert_eq!(config.global.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.global.timeout_seconds, 30);
        assert!(config.auth.api_key.is_none());
    }

    #[test]
    fn test_results_file_default() {
        let config = Config::default_config();
        assert!(config
            .results_file()
            .ends_with("telnyx_preflight_results.json"));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = Config::default_config();
        let toml = config.to_toml().unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.global.base_url, config.global.base_url);
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("human".parse::<OutputFormat>().unwrap(), OutputFormat::Human);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_validate_warns_on_bare_numbers() {
        let mut config = Config::default_config();
        config.auth.api_key = Some("KEY".to_string());
        config.numbers.from_number = Some("15551234567".to_string());
        let warnings = validate_config(&config).unwrap();
        assert!(warnings.iter().any(|w| w.contains("E.164")));
    }

    #[test]
    fn test_validate_rejects_bad_base_url() {
        let mut config = Config::default_config();
        config.global.base_url = "not a url".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_from_file_missing() {
        let err = Config::from_file(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err, AppError::FileNotFound(_)));
    }
}
