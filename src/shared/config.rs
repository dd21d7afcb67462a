//! Application configuration. Bot URL, cascade policy, logging.

use crate::domain::{BotLink, CascadePolicy, DEFAULT_BOT_URL, DomainError};
use serde::Deserialize;

/// Default tracing filter when neither RUST_LOG nor MACRO_FORGE_LOG_FILTER is set.
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Bot deep-link base. Read from MACRO_FORGE_BOT_URL.
    #[serde(default)]
    pub bot_url: Option<String>,

    /// `any_enabler` (default) or `position_aware`; the CLI spellings `any` and
    /// `position-aware` are accepted too. Read from MACRO_FORGE_CASCADE_POLICY.
    #[serde(default)]
    pub cascade_policy: Option<CascadePolicy>,

    /// tracing EnvFilter directive. Read from MACRO_FORGE_LOG_FILTER.
    #[serde(default)]
    pub log_filter: Option<String>,

    /// Print the startup banner (default true). Read from MACRO_FORGE_SHOW_BANNER.
    #[serde(default)]
    pub show_banner: Option<bool>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("MACRO_FORGE").try_parsing(true));
        if let Ok(path) = std::env::var("MACRO_FORGE_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    pub fn bot_url_or_default(&self) -> &str {
        self.bot_url.as_deref().unwrap_or(DEFAULT_BOT_URL)
    }

    /// Parsed bot link; fails on a malformed MACRO_FORGE_BOT_URL.
    pub fn bot_link(&self) -> Result<BotLink, DomainError> {
        BotLink::parse(self.bot_url_or_default())
    }

    pub fn cascade_policy_or_default(&self) -> CascadePolicy {
        self.cascade_policy.unwrap_or_default()
    }

    pub fn log_filter_or_default(&self) -> &str {
        self.log_filter.as_deref().unwrap_or(DEFAULT_LOG_FILTER)
    }

    pub fn show_banner_or_default(&self) -> bool {
        self.show_banner.unwrap_or(true)
    }
}
