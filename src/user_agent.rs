//! Shared User-Agent string for proceedings traffic.
//!
//! The proceedings host serves bot-looking clients inconsistently, so every
//! request presents the same desktop browser identity.

/// Desktop browser User-Agent sent with every page and PDF request.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default User-Agent for the HTTP transport.
#[must_use]
pub(crate) fn default_user_agent() -> String {
    BROWSER_USER_AGENT.to_string()
}
