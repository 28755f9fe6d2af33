use std::time::Duration;

pub const DEFAULT_RECIPE_URL: &str = "https://forkify-api.herokuapp.com/api/v2/recipes";
pub const DEFAULT_NUTRITION_URL: &str = "https://api.spoonacular.com/recipes";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Endpoints, keys and the request timeout shared by both API clients.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub recipe_url: String,
    pub api_key: String,
    pub nutrition_url: String,
    pub nutrition_key: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            recipe_url: DEFAULT_RECIPE_URL.to_string(),
            api_key: String::new(),
            nutrition_url: DEFAULT_NUTRITION_URL.to_string(),
            nutrition_key: String::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ApiConfig {
    /// Load from `LARDER_*` environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let timeout_secs = env_or("LARDER_TIMEOUT_SECS", &DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        Self {
            recipe_url: trim_base(&env_or("LARDER_API_URL", DEFAULT_RECIPE_URL)),
            api_key: env_or("LARDER_API_KEY", ""),
            nutrition_url: trim_base(&env_or("LARDER_NUTRITION_URL", DEFAULT_NUTRITION_URL)),
            nutrition_key: env_or("LARDER_NUTRITION_KEY", ""),
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

pub(crate) fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = ApiConfig::default();
        assert_eq!(cfg.timeout, Duration::from_secs(10));
        assert!(!cfg.recipe_url.ends_with('/'));
    }

    #[test]
    fn test_trim_base() {
        assert_eq!(trim_base("http://x/api/"), "http://x/api");
        assert_eq!(trim_base("http://x/api"), "http://x/api");
    }
}
