/// Application configuration, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the registration portal API.
    pub portal_base_url: String,
    /// Directive string for the tracing subscriber, e.g. `info` or
    /// `sedereg_client=debug`.
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}
