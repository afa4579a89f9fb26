//! Build-time configuration for the dashboard.
//!
//! The wasm bundle has no process environment at runtime, so values are baked
//! in when the frontend is compiled (`CALLWATCH_API_URL`, `CALLWATCH_TOKEN_KEY`).

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TOKEN_STORAGE_KEY: &str = "access_token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Scheme and host of the notification service, without a trailing slash.
    pub api_base_url: String,
    /// Local storage key holding the bearer token.
    pub token_storage_key: String,
}

impl Config {
    /// Values captured from the compile-time environment.
    pub fn from_build_env() -> Self {
        Self::from_lookup(|key| match key {
            "CALLWATCH_API_URL" => option_env!("CALLWATCH_API_URL").map(str::to_string),
            "CALLWATCH_TOKEN_KEY" => option_env!("CALLWATCH_TOKEN_KEY").map(str::to_string),
            _ => None,
        })
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_base_url = lookup("CALLWATCH_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let token_storage_key = lookup("CALLWATCH_TOKEN_KEY")
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| DEFAULT_TOKEN_STORAGE_KEY.to_string());

        Self {
            api_base_url,
            token_storage_key,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.token_storage_key, "access_token");
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let config = Config::from_lookup(|key| match key {
            "CALLWATCH_API_URL" => Some("https://api.example.com//".to_string()),
            _ => None,
        });
        assert_eq!(config.api_base_url, "https://api.example.com");
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = Config::from_lookup(|_| Some("   ".to_string()));
        assert_eq!(config, Config::default());
    }
}
