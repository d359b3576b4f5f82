/// Application configuration
///
/// A one-shot interactive tool carries no config file; defaults live here and
/// the handful of knobs worth turning are overridable via environment
/// variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub fetch: FetchConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: String,
    /// Fixed settle delay after navigation in the headless-render path.
    pub render_wait_secs: u64,
}

#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub default_format: String,
    pub default_basename: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig {
                request_timeout_secs: 30,
                connect_timeout_secs: 10,
                user_agent: "Mozilla/5.0 (pagesift 0.1)".to_string(),
                render_wait_secs: 8,
            },
            export: ExportConfig {
                default_format: "csv".to_string(),
                default_basename: "extracted".to_string(),
            },
        }
    }
}

impl AppConfig {
    /// Defaults plus environment overrides.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(secs) = env_u64("PAGESIFT_TIMEOUT_SECS") {
            config.fetch.request_timeout_secs = secs;
        }
        if let Some(secs) = env_u64("PAGESIFT_RENDER_WAIT_SECS") {
            config.fetch.render_wait_secs = secs;
        }
        config
    }
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok()?.trim().parse().ok()
}
