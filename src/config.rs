use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

pub(crate) const API_KEY_PLACEHOLDER: &str = "PLACEHOLDER_OPENROUTER_API_KEY";

/// Main configuration structure for the advisor
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub advisor: AdvisorConfig,
    pub server: ServerConfig,
}

/// Settings for talking to the completion endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    pub api_key: String,
    pub model: String,
    pub api_url: String,
    /// Sent as the HTTP-Referer header, which OpenRouter uses for app attribution
    pub referer: String,
    /// Sent as the X-Title header
    pub title: String,
    pub timeout_seconds: u64,
}

/// Settings for the single-page web surface
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Config {
    /// Load configuration from file with environment variable overrides.
    /// ALWAYS returns a usable config - never fails.
    pub fn load() -> Self {
        // Load environment variables from .env files
        let env_paths = ["../.env", ".env"];

        let mut env_loaded = false;
        for path in &env_paths {
            if dotenvy::from_path(path).is_ok() {
                tracing::info!("Loaded .env from: {}", path);
                env_loaded = true;
                break;
            }
        }

        if !env_loaded {
            tracing::debug!("No .env file found - continuing with process env only");
        }

        let config_path =
            env::var("ADVISOR_CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            match fs::read_to_string(&config_path) {
                Ok(contents) => match serde_yaml::from_str::<Config>(&contents) {
                    Ok(config) => {
                        tracing::info!("Loaded configuration from {}", config_path);
                        config
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to parse config file {}: {} - using defaults",
                            config_path,
                            e
                        );
                        Self::default()
                    }
                },
                Err(e) => {
                    tracing::error!(
                        "Failed to read config file {}: {} - using defaults",
                        config_path,
                        e
                    );
                    Self::default()
                }
            }
        } else {
            tracing::debug!("Config file not found at {} - using defaults", config_path);
            Self::default()
        };

        config.apply_env_overrides();

        // Validate configuration - log warnings but don't fail
        if let Err(e) = config.validate() {
            tracing::warn!("Config validation warnings: {} - continuing anyway", e);
        }

        config
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(api_key) = env::var("OPENROUTER_API_KEY") {
            self.advisor.api_key = api_key;
        }
        if let Ok(model) = env::var("ADVISOR_MODEL") {
            self.advisor.model = model;
        }
        if let Ok(api_url) = env::var("ADVISOR_API_URL") {
            self.advisor.api_url = api_url;
        }
        if let Ok(referer) = env::var("ADVISOR_REFERER") {
            self.advisor.referer = referer;
        }
        if let Ok(title) = env::var("ADVISOR_TITLE") {
            self.advisor.title = title;
        }
        if let Ok(timeout) = env::var("ADVISOR_TIMEOUT_SECONDS") {
            if let Ok(seconds) = timeout.parse() {
                self.advisor.timeout_seconds = seconds;
            }
        }
        if let Ok(bind) = env::var("ADVISOR_HTTP_BIND") {
            self.server.bind = bind;
        }
    }

    /// Validate configuration
    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.advisor.model.is_empty() {
            return Err("Advisor model cannot be empty".into());
        }

        if !self.advisor.api_url.starts_with("http") {
            return Err("Advisor api_url must be an http(s) URL".into());
        }

        if self.advisor.timeout_seconds == 0 {
            return Err("Advisor timeout_seconds cannot be 0".into());
        }

        if self.advisor.api_key == API_KEY_PLACEHOLDER || self.advisor.api_key.is_empty() {
            return Err("OPENROUTER_API_KEY environment variable must be set".into());
        }

        Ok(())
    }
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            api_key: env::var("OPENROUTER_API_KEY").unwrap_or_else(|_| {
                tracing::warn!("OPENROUTER_API_KEY not set, using placeholder");
                API_KEY_PLACEHOLDER.to_string()
            }),
            model: "deepseek/deepseek-r1:free".to_string(),
            api_url: "https://openrouter.ai/api/v1/chat/completions".to_string(),
            referer: "http://localhost:8501".to_string(),
            title: "Sports Nutrition Advisor".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8501".to_string(),
        }
    }
}
