//! Bot deep link: `<bot-url>?start=macro_<payload>`.

use crate::domain::errors::DomainError;
use url::Url;

pub const DEFAULT_BOT_URL: &str = "https://t.me/FernieXBot";

/// Validated base URL of the bot that installs macros.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotLink {
    base: Url,
}

impl BotLink {
    /// Accepts http(s) URLs with a host and no query or fragment.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let base =
            Url::parse(raw.trim()).map_err(|e| DomainError::InvalidBotUrl(format!("{raw}: {e}")))?;
        if !matches!(base.scheme(), "https" | "http") {
            return Err(DomainError::InvalidBotUrl(format!(
                "{raw}: scheme must be http or https"
            )));
        }
        if base.host_str().is_none() {
            return Err(DomainError::InvalidBotUrl(format!("{raw}: missing host")));
        }
        if base.query().is_some() || base.fragment().is_some() {
            return Err(DomainError::InvalidBotUrl(format!(
                "{raw}: must not carry a query or fragment"
            )));
        }
        Ok(Self { base })
    }

    pub fn as_str(&self) -> &str {
        self.base.as_str()
    }

    /// Appends the payload verbatim. Base64 `+`, `/` and `=` are not escaped;
    /// the bot reads the parameter exactly as produced.
    pub fn macro_url(&self, payload: &str) -> String {
        format!("{}?start=macro_{}", self.base.as_str(), payload)
    }
}

/// Result of a successful create-macro.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroLink {
    pub url: String,
    pub payload: String,
    pub trigger: String,
    pub action_count: usize,
}

impl MacroLink {
    /// How the trigger is typed in chat.
    pub fn command(&self) -> String {
        format!("/{}", self.trigger)
    }
}
