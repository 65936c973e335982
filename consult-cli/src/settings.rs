use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use consult_client::HttpClientConfig;

pub const DEFAULT_API_ORIGIN: &str = "http://127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_origin: String,
    pub log_level: String,
    pub http: HttpClientConfig,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let api_origin = std::env::var("CONSULT_API_ORIGIN")
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_ORIGIN.to_string());
        // `RUST_LOG` читает сам EnvFilter, здесь только уровень по умолчанию.
        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let defaults = HttpClientConfig::default();
        Ok(Self {
            api_origin: normalize_server(api_origin),
            log_level,
            http: HttpClientConfig {
                connect_timeout: timeout_env("HTTP_CONNECT_TIMEOUT_SECS", defaults.connect_timeout)?,
                request_timeout: timeout_env("HTTP_REQUEST_TIMEOUT_SECS", defaults.request_timeout)?,
            },
        })
    }

    /// `--server` из командной строки важнее окружения.
    pub fn with_server(mut self, server: Option<String>) -> Self {
        if let Some(server) = server {
            self.api_origin = normalize_server(server);
        }
        self
    }
}

pub fn normalize_server(server: String) -> String {
    let lower = server.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn timeout_env(key: &str, default: Duration) -> Result<Duration> {
    parse_timeout(key, std::env::var(key).ok().as_deref(), default)
}

/// Таймаут в целых секундах. Ноль для reqwest означает «сразу», поэтому
/// отвергается.
fn parse_timeout(key: &str, raw: Option<&str>, default: Duration) -> Result<Duration> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(default);
    };
    let secs = raw
        .parse::<u64>()
        .with_context(|| format!("{key}={raw:?} is not a number of seconds"))?;
    if secs == 0 {
        return Err(anyhow!("{key} must be at least one second"));
    }
    Ok(Duration::from_secs(secs))
}
