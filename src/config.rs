//! Runtime configuration
//!
//! The only external setting is the OMDb API key. It is read from the
//! `OMDB_API_KEY` environment variable at startup, falling back to the value
//! the binary was built with.

const API_KEY_VAR: &str = "OMDB_API_KEY";
pub const OMDB_API_URL: &str = "https://www.omdbapi.com/";
pub const DATA_DIR: &str = ".cache";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_key: String,
    pub api_url: String,
    pub data_dir: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let runtime_key = std::env::var(API_KEY_VAR).ok();
        Self::resolve(runtime_key, option_env!("OMDB_API_KEY"))
    }

    fn resolve(runtime_key: Option<String>, build_key: Option<&str>) -> Self {
        let api_key = runtime_key
            .filter(|k| !k.trim().is_empty())
            .or_else(|| build_key.map(str::to_string))
            .unwrap_or_default();

        if api_key.is_empty() {
            // Upstream answers "No API key provided." which the UI shows verbatim
            tracing::warn!("{} is not set, searches will be rejected upstream", API_KEY_VAR);
        }

        Self {
            api_key,
            api_url: OMDB_API_URL.to_string(),
            data_dir: DATA_DIR.to_string(),
        }
    }
}
