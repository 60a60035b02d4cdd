//! Build-time configuration for the backend-as-a-service connection.
//!
//! Values come from environment variables present when the bundle is built
//! (`trunk build`), falling back to a local development backend.

use log::LevelFilter;

const DEFAULT_SUPABASE_URL: &str = "http://localhost:54321";
const DEFAULT_STORAGE_BUCKET: &str = "certificates";
const CERTIFICATES_TABLE: &str = "certificates";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Project base URL, without trailing slash
    pub supabase_url: String,
    /// Public anon key sent as `apikey` with every request
    pub anon_key: String,
    pub storage_bucket: String,
    pub table: String,
    pub log_level: LevelFilter,
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("CREDHEX_SUPABASE_URL"),
            option_env!("CREDHEX_SUPABASE_ANON_KEY"),
            option_env!("CREDHEX_STORAGE_BUCKET"),
            option_env!("CREDHEX_LOG_LEVEL"),
        )
    }

    fn from_values(
        url: Option<&str>,
        anon_key: Option<&str>,
        bucket: Option<&str>,
        log_level: Option<&str>,
    ) -> Self {
        Self {
            supabase_url: non_empty(url)
                .unwrap_or(DEFAULT_SUPABASE_URL)
                .trim_end_matches('/')
                .to_string(),
            anon_key: non_empty(anon_key).unwrap_or_default().to_string(),
            storage_bucket: non_empty(bucket).unwrap_or(DEFAULT_STORAGE_BUCKET).to_string(),
            table: CERTIFICATES_TABLE.to_string(),
            log_level: non_empty(log_level)
                .and_then(|level| level.parse().ok())
                .unwrap_or(LevelFilter::Info),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn defaults_point_at_local_backend() {
        let config = AppConfig::from_values(None, None, Some("  "), None);
        assert_eq!(config.supabase_url, DEFAULT_SUPABASE_URL);
        assert_eq!(config.storage_bucket, DEFAULT_STORAGE_BUCKET);
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[wasm_bindgen_test]
    fn trailing_slash_is_dropped() {
        let config = AppConfig::from_values(Some("https://abc.supabase.co/"), Some("key"), None, Some("debug"));
        assert_eq!(config.supabase_url, "https://abc.supabase.co");
        assert_eq!(config.anon_key, "key");
        assert_eq!(config.log_level, LevelFilter::Debug);
    }
}
