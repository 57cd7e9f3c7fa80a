use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/";

/// Environment variables checked for the API credential, in order.
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no API key: set one of {vars:?} or `api_key` in the config file")]
    MissingApiKey { vars: [&'static str; 2] },
}

/// Business rules baked into the prompt. The defaults target the Saudi market.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    pub region: String,
    pub currency_name: String,
    pub currency_code: String,
    pub currency_symbol: String,
    pub example_stores: Vec<String>,
    /// Free text, e.g. "at least 4-5".
    pub store_count: String,
    pub notes_language: String,
    pub notes_examples: Vec<String>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            region: "Saudi Arabia".to_string(),
            currency_name: "Saudi Riyals".to_string(),
            currency_code: "SAR".to_string(),
            currency_symbol: "ر.س".to_string(),
            example_stores: ["Amazon SA", "Noon", "Jarir", "Extra", "Nice One"]
                .map(String::from)
                .to_vec(),
            store_count: "at least 4-5".to_string(),
            notes_language: "Arabic".to_string(),
            notes_examples: ["شامل الضريبة", "توصيل مجاني"].map(String::from).to_vec(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base_url: String,
    /// Unset means no client-side timeout; the transport's own limits apply.
    pub request_timeout_seconds: Option<u64>,
    pub market: MarketConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_seconds: None,
            market: MarketConfig::default(),
        }
    }
}

impl AppConfig {
    /// Environment wins over the file so the key can stay out of `config.json`.
    pub fn resolve_api_key(&self) -> Result<String, ConfigError> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    fn resolve_api_key_with<F>(&self, lookup: F) -> Result<String, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        API_KEY_ENV_VARS
            .iter()
            .filter_map(|&name| lookup(name))
            .chain(self.api_key.clone())
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey {
                vars: API_KEY_ENV_VARS,
            })
    }
}

/// Loads the config file. A missing file yields the defaults.
pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_string(),
                source,
            });
        }
    };
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = serde_json::from_str(content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let cfg = parse_config("{}").unwrap();
        assert_eq!(cfg.model, DEFAULT_MODEL);
        assert_eq!(cfg.market.currency_code, "SAR");
        assert_eq!(cfg.market.example_stores.len(), 5);
        assert!(cfg.request_timeout_seconds.is_none());
    }

    #[test]
    fn partial_market_override_keeps_other_defaults() {
        let cfg = parse_config(
            r#"{ "model": "gemini-2.0-flash", "market": { "region": "UAE", "currency_code": "AED" } }"#,
        )
        .unwrap();
        assert_eq!(cfg.model, "gemini-2.0-flash");
        assert_eq!(cfg.market.region, "UAE");
        assert_eq!(cfg.market.currency_code, "AED");
        assert_eq!(cfg.market.notes_language, "Arabic");
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(matches!(parse_config("{ model: "), Err(ConfigError::Json(_))));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let cfg = load_config("definitely/not/here/config.json").unwrap();
        assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn env_key_takes_precedence() {
        let cfg = AppConfig {
            api_key: Some("from-file".into()),
            ..AppConfig::default()
        };
        let key = cfg
            .resolve_api_key_with(|name| (name == "API_KEY").then(|| "from-env".to_string()))
            .unwrap();
        assert_eq!(key, "from-env");

        let key = cfg.resolve_api_key_with(|_| None).unwrap();
        assert_eq!(key, "from-file");
    }

    #[test]
    fn blank_keys_are_ignored() {
        let cfg = AppConfig {
            api_key: Some("   ".into()),
            ..AppConfig::default()
        };
        assert!(matches!(
            cfg.resolve_api_key_with(|_| Some(String::new())),
            Err(ConfigError::MissingApiKey { .. })
        ));
    }
}
