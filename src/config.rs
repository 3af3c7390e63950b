use crate::i18n::Locale;
use crate::util::parse_bool_flag;
use anyhow::{bail, Result};
use std::path::PathBuf;

pub const API_KEY_ENV: &str = "API_KEY";
pub const API_KEY_FALLBACK_ENV: &str = "GEMINI_API_KEY";
const MODEL_ENV: &str = "FUSION_MODEL";
const API_URL_ENV: &str = "FUSION_API_URL";
const LOCALE_ENV: &str = "FUSION_LOCALE";
const LOG_PATH_ENV: &str = "FUSION_LOG_PATH";
const DEBUG_PAYLOAD_ENV: &str = "FUSION_DEBUG_PAYLOAD";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub api_url: String,
    pub locale: Locale,
    pub log_path: PathBuf,
    pub debug_payload: bool,
}

impl Config {
    /// Reads the process environment. A missing API key is fatal.
    pub fn load() -> Result<Self> {
        let api_key = non_empty_var(API_KEY_ENV)
            .or_else(|| non_empty_var(API_KEY_FALLBACK_ENV));
        let Some(api_key) = api_key else {
            bail!("{API_KEY_ENV} environment variable is not set");
        };

        let model = non_empty_var(MODEL_ENV).unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let api_url = non_empty_var(API_URL_ENV).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let locale = non_empty_var(LOCALE_ENV)
            .and_then(|value| Locale::parse(&value))
            .unwrap_or_default();
        let log_path = non_empty_var(LOG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| std::env::temp_dir().join("fusion.log"));
        let debug_payload = std::env::var(DEBUG_PAYLOAD_ENV)
            .ok()
            .and_then(parse_bool_flag)
            .unwrap_or(false);

        Ok(Self {
            api_key,
            model,
            api_url,
            locale,
            log_path,
            debug_payload,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            bail!("{API_KEY_ENV} must not be empty");
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            bail!(
                "Invalid {API_URL_ENV} '{}': expected http:// or https:// URL",
                self.api_url
            );
        }

        if self.model.trim().is_empty() || self.model.contains('/') {
            bail!(
                "Invalid model name: '{}'. Expected a bare model id such as '{DEFAULT_MODEL}'",
                self.model
            );
        }

        Ok(())
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
