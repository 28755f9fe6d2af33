use std::path::PathBuf;

use larder_api::ApiConfig;
use larder_core::DEFAULT_PAGE_SIZE;

pub const DEFAULT_DATA_DIR: &str = ".larder";

/// Everything the `larder` binary needs to assemble a controller.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub page_size: usize,
    /// Where bookmarks and the shopping list are kept between runs.
    pub data_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            page_size: DEFAULT_PAGE_SIZE,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let page_size = env_or("LARDER_PAGE_SIZE", &DEFAULT_PAGE_SIZE.to_string())
            .parse()
            .ok()
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        Self {
            api: ApiConfig::from_env(),
            page_size,
            data_dir: PathBuf::from(env_or("LARDER_DATA_DIR", DEFAULT_DATA_DIR)),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
