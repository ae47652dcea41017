use std::env;
use std::path::PathBuf;

use anyhow::Result;
use once_cell::sync::Lazy;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub logs_dir: String,
    pub gemini_api_key: String,
    pub gemini_api_base_url: String,
    pub gemini_request_timeout_seconds: u64,
    pub gemini_safety_settings: String,
    pub output_dir: PathBuf,
    pub max_photo_bytes: usize,
    pub options_file: Option<PathBuf>,
}

pub static CONFIG: Lazy<Config> =
    Lazy::new(|| Config::load().expect("Failed to load configuration"));

fn env_string(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn env_path(name: &str) -> Option<PathBuf> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn normalize_gemini_safety_settings(value: String) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return "permissive".to_string();
    }

    let lowered = trimmed.to_lowercase();
    match lowered.as_str() {
        "permissive" | "off" | "none" => "permissive".to_string(),
        "standard" => "standard".to_string(),
        _ => {
            warn!(
                "Unknown GEMINI_SAFETY_SETTINGS value '{}'; defaulting to permissive.",
                value
            );
            "permissive".to_string()
        }
    }
}

fn normalize_base_url(value: String) -> String {
    value.trim().trim_end_matches('/').to_string()
}

impl Config {
    pub const DEFAULT_MAX_PHOTO_BYTES: usize = 10 * 1024 * 1024;

    pub fn load() -> Result<Self> {
        let gemini_api_base_url = normalize_base_url(env_string(
            "GEMINI_API_BASE_URL",
            "https://generativelanguage.googleapis.com/v1beta",
        ));
        if gemini_api_base_url.is_empty() {
            return Err(anyhow::anyhow!("GEMINI_API_BASE_URL must not be empty"));
        }

        let timeout = env_u64("GEMINI_REQUEST_TIMEOUT_SECONDS", 120);
        let max_photo_bytes = env_usize("MAX_PHOTO_BYTES", Self::DEFAULT_MAX_PHOTO_BYTES);

        Ok(Config {
            log_level: env_string("LOG_LEVEL", "info").to_lowercase(),
            logs_dir: env_string("LOGS_DIR", "logs"),
            gemini_api_key: env_string("GEMINI_API_KEY", ""),
            gemini_api_base_url,
            gemini_request_timeout_seconds: timeout.max(1),
            gemini_safety_settings: normalize_gemini_safety_settings(env_string(
                "GEMINI_SAFETY_SETTINGS",
                "permissive",
            )),
            output_dir: PathBuf::from(env_string("OUTPUT_DIR", "output")),
            max_photo_bytes: max_photo_bytes.max(1),
            options_file: env_path("OPTIONS_FILE"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safety_settings_normalize_aliases() {
        assert_eq!(normalize_gemini_safety_settings("OFF".to_string()), "permissive");
        assert_eq!(normalize_gemini_safety_settings(" standard ".to_string()), "standard");
        assert_eq!(normalize_gemini_safety_settings(String::new()), "permissive");
        assert_eq!(normalize_gemini_safety_settings("strict".to_string()), "permissive");
    }

    #[test]
    fn base_url_drops_trailing_slashes() {
        assert_eq!(
            normalize_base_url(" https://example.test/v1beta// ".to_string()),
            "https://example.test/v1beta"
        );
    }
}
