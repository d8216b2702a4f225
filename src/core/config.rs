use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use url::Url;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini-2024-07-18";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

/// Language the model is instructed to answer in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplyLanguage {
    English,
    #[default]
    Spanish,
}

impl ReplyLanguage {
    fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Self::English),
            "es" | "spanish" => Ok(Self::Spanish),
            other => Err(format!("SUMMARY_LANGUAGE: unsupported value '{other}'")),
        }
    }
}

/// What to do when the model reply contains no parseable JSON object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFallback {
    /// Surface `Error: Invalid JSON response from API`.
    #[default]
    Error,
    /// Show the raw reply as the summary and leave the other fields empty.
    RawText,
}

impl JsonFallback {
    fn parse(raw: &str) -> Result<Self, String> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "raw" | "raw_text" => Ok(Self::RawText),
            other => Err(format!("JSON_FALLBACK: unsupported value '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryOptions {
    pub language: ReplyLanguage,
    pub fallback: JsonFallback,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai_api_key: Option<String>,
    pub openai_org_id: Option<String>,
    pub openai_model: String,
    pub openai_base_url: Url,
    pub openai_timeout: Option<Duration>,
    pub summary: SummaryOptions,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let openai_base_url = match var("OPENAI_BASE_URL") {
            Some(raw) => Url::parse(raw.trim()).map_err(|e| format!("OPENAI_BASE_URL: {}", e))?,
            None => Url::parse(DEFAULT_BASE_URL).map_err(|e| format!("OPENAI_BASE_URL: {}", e))?,
        };

        let openai_timeout = var("OPENAI_TIMEOUT_SECS")
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|e| format!("OPENAI_TIMEOUT_SECS: {}", e))
            })
            .transpose()?;

        let language = var("SUMMARY_LANGUAGE")
            .map(|raw| ReplyLanguage::parse(&raw))
            .transpose()?
            .unwrap_or_default();

        let fallback = var("JSON_FALLBACK")
            .map(|raw| JsonFallback::parse(&raw))
            .transpose()?
            .unwrap_or_default();

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .trim()
            .parse::<SocketAddr>()
            .map_err(|e| format!("BIND_ADDR: {}", e))?;

        Ok(Self {
            openai_api_key: var("OPENAI_API_KEY"),
            openai_org_id: var("OPENAI_ORG_ID"),
            openai_model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            openai_base_url,
            openai_timeout,
            summary: SummaryOptions { language, fallback },
            bind_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = config_from(&[]).unwrap();
        assert!(config.openai_api_key.is_none());
        assert_eq!(config.openai_model, DEFAULT_MODEL);
        assert_eq!(config.openai_base_url.as_str(), "https://api.openai.com/v1");
        assert!(config.openai_timeout.is_none());
        assert_eq!(config.summary.language, ReplyLanguage::Spanish);
        assert_eq!(config.summary.fallback, JsonFallback::Error);
        assert_eq!(config.bind_addr.port(), 5000);
    }

    #[test]
    fn empty_api_key_counts_as_unset() {
        let config = config_from(&[("OPENAI_API_KEY", "  ")]).unwrap();
        assert!(config.openai_api_key.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_MODEL", "gpt-4o"),
            ("OPENAI_TIMEOUT_SECS", "30"),
            ("SUMMARY_LANGUAGE", "English"),
            ("JSON_FALLBACK", "raw"),
            ("BIND_ADDR", "0.0.0.0:8080"),
        ])
        .unwrap();
        assert_eq!(config.openai_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.openai_model, "gpt-4o");
        assert_eq!(config.openai_timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.summary.language, ReplyLanguage::English);
        assert_eq!(config.summary.fallback, JsonFallback::RawText);
        assert_eq!(config.bind_addr.port(), 8080);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(config_from(&[("SUMMARY_LANGUAGE", "klingon")]).is_err());
        assert!(config_from(&[("JSON_FALLBACK", "maybe")]).is_err());
        assert!(config_from(&[("BIND_ADDR", "not-an-addr")]).is_err());
        assert!(config_from(&[("OPENAI_BASE_URL", "::nope")]).is_err());
        let err = config_from(&[("OPENAI_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(err.starts_with("OPENAI_TIMEOUT_SECS"));
    }
}
