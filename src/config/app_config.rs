use std::time::Duration;

use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub renderer: RendererSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Fallback rendering settings
#[derive(Debug, Clone, Deserialize)]
pub struct RendererSettings {
    /// TOML file holding the stored renderer chain
    #[serde(default)]
    pub config_path: Option<String>,

    /// Per-renderer invocation timeout in milliseconds; 0 disables it
    #[serde(default)]
    pub timeout_ms: u64,

    #[serde(default = "default_true")]
    pub collect_metrics: bool,
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            config_path: None,
            timeout_ms: 0,
            collect_metrics: true,
        }
    }
}

impl RendererSettings {
    /// Invocation timeout, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_ms > 0).then(|| Duration::from_millis(self.timeout_ms))
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("FALLBACK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
