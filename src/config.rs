use std::time::Duration;

// =========================================================
// 运行时配置 (Runtime Configuration)
// =========================================================

/// Defaults used when a key is not configured.
const DEFAULT_IDENTITY_URL: &str = "http://localhost:8002";
const DEFAULT_DINING_URL: &str = "http://localhost:8001";
const DEFAULT_HOUSING_URL: &str = "http://localhost:8003";
const DEFAULT_TODAY_MENUS_TIMEOUT_MS: u64 = 5_000;

pub const KEY_IDENTITY_URL: &str = "CAMPUS_IDENTITY_URL";
pub const KEY_DINING_URL: &str = "CAMPUS_DINING_URL";
pub const KEY_HOUSING_URL: &str = "CAMPUS_HOUSING_URL";
pub const KEY_TODAY_MENUS_TIMEOUT_MS: &str = "CAMPUS_TODAY_MENUS_TIMEOUT_MS";

/// Base addresses of the three backends plus the one request timeout the
/// client enforces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub identity_url: String,
    pub dining_url: String,
    pub housing_url: String,
    pub today_menus_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl ApiConfig {
    /// Resolves every key through `lookup`, falling back to the default per key.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
                .trim()
                .trim_end_matches('/')
                .to_string()
        };

        let timeout_ms = lookup(KEY_TODAY_MENUS_TIMEOUT_MS)
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_TODAY_MENUS_TIMEOUT_MS);

        Self {
            identity_url: url(KEY_IDENTITY_URL, DEFAULT_IDENTITY_URL),
            dining_url: url(KEY_DINING_URL, DEFAULT_DINING_URL),
            housing_url: url(KEY_HOUSING_URL, DEFAULT_HOUSING_URL),
            today_menus_timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// Configuration baked in at build time (a CSR bundle has no runtime env).
    pub fn from_build_env() -> Self {
        Self::from_lookup(|key| {
            let value = match key {
                KEY_IDENTITY_URL => option_env!("CAMPUS_IDENTITY_URL"),
                KEY_DINING_URL => option_env!("CAMPUS_DINING_URL"),
                KEY_HOUSING_URL => option_env!("CAMPUS_HOUSING_URL"),
                KEY_TODAY_MENUS_TIMEOUT_MS => option_env!("CAMPUS_TODAY_MENUS_TIMEOUT_MS"),
                _ => None,
            };
            value.map(str::to_string)
        })
    }
}
