use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use crate::logger::LogLevel;

/// Deployment environment tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }

    /// Unknown names fall back to `Development`.
    pub fn parse(input: &str) -> Self {
        match input.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Startup configuration, read once from the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub log_level: LogLevel,
    pub env: Environment,
    pub timeout_ms: u64,
}

impl ClientConfig {
    /// Reads `TICKDESK_API_BASE_URL`, `TICKDESK_LOG_LEVEL` and
    /// `TICKDESK_ENV`. Missing variables use the development defaults.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("TICKDESK_API_BASE_URL")
                .unwrap_or_else(|_| String::from("/api")),
            log_level: LogLevel::parse(
                &std::env::var("TICKDESK_LOG_LEVEL").unwrap_or_else(|_| String::from("debug")),
            ),
            env: Environment::parse(
                &std::env::var("TICKDESK_ENV").unwrap_or_else(|_| String::from("development")),
            ),
            timeout_ms: 10_000,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::from("/api"),
            log_level: LogLevel::Debug,
            env: Environment::Development,
            timeout_ms: 10_000,
        }
    }
}

/// Transport-facing configuration for the request pipeline. Immutable after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub default_headers: BTreeMap<String, String>,
}

impl PipelineConfig {
    pub fn new(base_url: impl Into<String>, timeout_ms: u64) -> Self {
        let mut default_headers = BTreeMap::new();
        default_headers.insert(
            String::from("content-type"),
            String::from("application/json"),
        );
        Self {
            base_url: base_url.into(),
            timeout_ms,
            default_headers,
        }
    }

    pub fn from_client(config: &ClientConfig) -> Self {
        Self::new(config.base_url.clone(), config.timeout_ms)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_defaults_are_applied() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "/api");
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.env, Environment::Development);
        assert_eq!(config.timeout_ms, 10_000);
    }

    #[test]
    fn pipeline_config_carries_json_content_type() {
        let pipeline = PipelineConfig::from_client(&ClientConfig::default());
        assert_eq!(
            pipeline.default_headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(pipeline.base_url, "/api");
        assert_eq!(pipeline.timeout_ms, 10_000);
    }

    #[test]
    fn unknown_environment_normalizes_to_development() {
        assert_eq!(Environment::parse("staging"), Environment::Development);
        assert_eq!(Environment::parse("PROD"), Environment::Production);
    }

    #[test]
    fn extra_default_headers_are_lowercased() {
        let pipeline = PipelineConfig::new("https://api.test", 5_000)
            .with_header("X-Client", "tickdesk");
        assert_eq!(
            pipeline.default_headers.get("x-client").map(String::as_str),
            Some("tickdesk")
        );
    }
}
