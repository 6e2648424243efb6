use std::time::Duration;

use tracing::warn;
use url::Url;

use crate::error::ConfigError;

const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";
const DEFAULT_RETRY_PERIOD_SECS: u64 = 600;
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 20;

/// Everything the bot needs, read once at startup and passed by reference.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
    pub endpoint: Url,
    pub telegram_api_base: Url,
    pub retry_period: Duration,
    pub http_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let practicum_token = required("PRACTICUM_TOKEN")?;
        let telegram_token = required("TELEGRAM_TOKEN")?;
        let telegram_chat_id = required("TELEGRAM_CHAT_ID")?;

        let endpoint = parse_url(
            "HOMEWORK_ENDPOINT",
            lookup("HOMEWORK_ENDPOINT").as_deref().unwrap_or(DEFAULT_ENDPOINT),
        )?;
        let telegram_api_base = parse_url(
            "TELEGRAM_API_BASE",
            lookup("TELEGRAM_API_BASE").as_deref().unwrap_or(DEFAULT_TELEGRAM_API_BASE),
        )?;

        let retry_period = secs_or_default("RETRY_PERIOD_SECS", lookup("RETRY_PERIOD_SECS"), DEFAULT_RETRY_PERIOD_SECS);
        let http_timeout = secs_or_default("HTTP_TIMEOUT_SECS", lookup("HTTP_TIMEOUT_SECS"), DEFAULT_HTTP_TIMEOUT_SECS);

        Ok(AppConfig {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            endpoint,
            telegram_api_base,
            retry_period,
            http_timeout,
        })
    }
}

fn parse_url(name: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|e| ConfigError::Invalid { name, reason: e.to_string() })
}

fn secs_or_default(name: &str, raw: Option<String>, default: u64) -> Duration {
    let Some(raw) = raw else { return Duration::from_secs(default) };
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Duration::from_secs(secs),
        _ => {
            warn!(var = name, value = %raw, default, "ignoring unparseable duration");
            Duration::from_secs(default)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars = env(pairs);
        AppConfig::from_lookup(|k| vars.get(k).cloned())
    }

    const SECRETS: [(&str, &str); 3] = [
        ("PRACTICUM_TOKEN", "p-token"),
        ("TELEGRAM_TOKEN", "t-token"),
        ("TELEGRAM_CHAT_ID", "12345"),
    ];

    #[test]
    fn defaults_apply_when_only_secrets_are_set() {
        let cfg = load(&SECRETS).unwrap();
        assert_eq!(cfg.practicum_token, "p-token");
        assert_eq!(cfg.telegram_chat_id, "12345");
        assert_eq!(cfg.endpoint.as_str(), DEFAULT_ENDPOINT);
        assert_eq!(cfg.retry_period, Duration::from_secs(600));
        assert_eq!(cfg.http_timeout, Duration::from_secs(20));
    }

    #[test]
    fn each_missing_secret_is_reported_by_name() {
        for skip in 0..SECRETS.len() {
            let pairs: Vec<(&str, &str)> = SECRETS
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != skip)
                .map(|(_, p)| *p)
                .collect();
            let err = load(&pairs).unwrap_err();
            assert_eq!(err, ConfigError::Missing(SECRETS[skip].0));
        }
    }

    #[test]
    fn blank_secret_counts_as_missing() {
        let mut pairs = SECRETS.to_vec();
        pairs[1] = ("TELEGRAM_TOKEN", "  ");
        assert_eq!(load(&pairs).unwrap_err(), ConfigError::Missing("TELEGRAM_TOKEN"));
    }

    #[test]
    fn overrides_and_bad_numbers() {
        let mut pairs = SECRETS.to_vec();
        pairs.push(("RETRY_PERIOD_SECS", "30"));
        pairs.push(("HTTP_TIMEOUT_SECS", "soon"));
        pairs.push(("HOMEWORK_ENDPOINT", "http://127.0.0.1:9000/statuses/"));
        let cfg = load(&pairs).unwrap();
        assert_eq!(cfg.retry_period, Duration::from_secs(30));
        assert_eq!(cfg.http_timeout, Duration::from_secs(20));
        assert_eq!(cfg.endpoint.as_str(), "http://127.0.0.1:9000/statuses/");
    }

    #[test]
    fn malformed_endpoint_is_invalid() {
        let mut pairs = SECRETS.to_vec();
        pairs.push(("TELEGRAM_API_BASE", "not a url"));
        assert!(matches!(load(&pairs), Err(ConfigError::Invalid { name: "TELEGRAM_API_BASE", .. })));
    }
}
