use std::path::PathBuf;
use std::time::Duration;

use env_helpers::get_env_default;
use poolkb_sdk::{ClientConfig, DEFAULT_BASE_URL};
use secrecy::SecretString;

pub struct CliConfig {
    /// API server address (e.g., "https://kb.example.com").
    pub base_url: String,
    /// Total time allowed per request.
    pub timeout: Duration,
    /// JSON settings file holding the persisted language preference.
    pub settings_path: PathBuf,
    /// Bearer token for admin commands, as printed by `admin login`.
    pub admin_token: Option<SecretString>,
    /// Password for `admin login` when `--password` is not given.
    pub admin_password: Option<SecretString>,
    /// Emit logs as JSON instead of the pretty console format.
    pub log_json: bool,
}

impl CliConfig {
    pub fn from_env() -> Self {
        let base_url: String = get_env_default("POOLKB_BASE_URL", DEFAULT_BASE_URL.to_string());
        let timeout_secs: u64 = get_env_default("POOLKB_TIMEOUT_SECS", 30);
        let settings_path: String =
            get_env_default("POOLKB_SETTINGS_PATH", default_settings_path());
        let admin_token = secret_from_env("POOLKB_ADMIN_TOKEN");
        let admin_password = secret_from_env("POOLKB_ADMIN_PASSWORD");
        let log_json: bool = get_env_default("POOLKB_LOG_JSON", false);

        Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
            settings_path: PathBuf::from(settings_path),
            admin_token,
            admin_password,
            log_json,
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.base_url.clone()).with_timeout(self.timeout)
    }
}

fn secret_from_env(var: &str) -> Option<SecretString> {
    std::env::var(var)
        .ok()
        .filter(|value| !value.is_empty())
        .map(|value| SecretString::new(value.into()))
}

fn default_settings_path() -> String {
    match std::env::var("HOME") {
        Ok(home) if !home.is_empty() => format!("{}/.poolkb/settings.json", home),
        _ => ".poolkb/settings.json".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_carries_timeout() {
        let config = CliConfig {
            base_url: "http://kb.internal:8000".into(),
            timeout: Duration::from_millis(1_500),
            settings_path: PathBuf::from("settings.json"),
            admin_token: None,
            admin_password: None,
            log_json: false,
        };

        let client_config = config.client_config();
        assert_eq!(client_config.base_url, "http://kb.internal:8000");
        assert_eq!(client_config.timeout, Duration::from_millis(1_500));
    }

    #[test]
    fn test_default_settings_path_is_json_file() {
        assert!(default_settings_path().ends_with(".poolkb/settings.json"));
    }
}
