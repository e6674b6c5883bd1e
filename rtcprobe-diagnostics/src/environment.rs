//! Browser and platform identification for diagnostics reports

use serde::{Deserialize, Serialize};

/// Browser name tokens in match priority order
const BROWSER_TOKENS: [&str; 4] = ["Chrome", "Firefox", "Safari", "Edge"];

/// Reported when no browser token matches
pub const UNKNOWN_BROWSER: &str = "Unknown";

/// Where a diagnostics report was produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environment {
    /// Raw user-agent string
    pub user_agent: String,
    /// Platform identifier, e.g. "Win32", "MacIntel" or "linux-x86_64"
    pub platform: String,
}

impl Environment {
    /// Create an environment from explicit values
    pub fn new(user_agent: impl Into<String>, platform: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            platform: platform.into(),
        }
    }

    /// Environment of the running process
    ///
    /// Native processes have no browser user agent, so the browser is reported
    /// as unknown.
    pub fn current() -> Self {
        Self {
            user_agent: format!("rtcprobe/{}", env!("CARGO_PKG_VERSION")),
            platform: format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH),
        }
    }

    /// Coarse browser name detected from the user agent
    pub fn browser(&self) -> &'static str {
        detect_browser(&self.user_agent)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::current()
    }
}

/// First browser token contained in `user_agent`, or "Unknown"
///
/// Tokens are tried in the order Chrome, Firefox, Safari, Edge. Chromium-based
/// Edge also advertises "Chrome" and is therefore reported as Chrome.
pub fn detect_browser(user_agent: &str) -> &'static str {
    BROWSER_TOKENS
        .iter()
        .copied()
        .find(|token| user_agent.contains(token))
        .unwrap_or(UNKNOWN_BROWSER)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHROME_UA: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";
    const FIREFOX_UA: &str =
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:143.0) Gecko/20100101 Firefox/143.0";
    const SAFARI_UA: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 14_5) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Safari/605.1.15";
    const EDGE_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36 Edg/126.0.0.0";

    #[test]
    fn test_detect_major_browsers() {
        assert_eq!(detect_browser(CHROME_UA), "Chrome");
        assert_eq!(detect_browser(FIREFOX_UA), "Firefox");
        assert_eq!(detect_browser(SAFARI_UA), "Safari");
    }

    #[test]
    fn test_chrome_wins_over_later_tokens() {
        assert_eq!(detect_browser(EDGE_UA), "Chrome");
        assert_eq!(detect_browser("Legacy Edge/18.0"), "Edge");
    }

    #[test]
    fn test_unknown_browser() {
        assert_eq!(detect_browser(""), UNKNOWN_BROWSER);
        assert_eq!(detect_browser("curl/8.5.0"), UNKNOWN_BROWSER);
        assert_eq!(Environment::current().browser(), UNKNOWN_BROWSER);
    }

    #[test]
    fn test_current_platform() {
        let env = Environment::current();
        assert!(env.platform.starts_with(std::env::consts::OS));
    }
}
