//! Router configuration.
//!
//! A malformed configuration is never fatal: parsing falls back to defaults
//! with a warning, trading completeness for availability (the same policy
//! providers follow for malformed route sources).

use serde::Deserialize;
use tracing::warn;

/// Configuration consumed by the router.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Friendly-URL mode: match and build human-readable path templates.
    /// When false, everything routes through the entry script with flat
    /// query parameters.
    pub friendly_url: bool,
    /// Leading part of request URLs to ignore (application living in a
    /// sub-directory of the host).
    pub root_path: String,
    /// Extra fixed segment between the root and route paths.
    pub base_uri: String,
    /// Host override for generated URLs; the request host is used when
    /// absent.
    pub domain: Option<String>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            friendly_url: false,
            root_path: String::new(),
            base_uri: String::new(),
            domain: None,
        }
    }
}

impl RouterConfig {
    /// Parses a TOML fragment, falling back to defaults on any parse error.
    ///
    /// # Examples
    ///
    /// ```
    /// use cadre_router::RouterConfig;
    ///
    /// let config = RouterConfig::from_toml_str("friendly_url = true\nroot_path = \"/app/\"");
    /// assert!(config.friendly_url);
    /// assert_eq!(config.root_path, "/app/");
    ///
    /// let fallback = RouterConfig::from_toml_str("friendly_url = ???");
    /// assert!(!fallback.friendly_url);
    /// ```
    pub fn from_toml_str(text: &str) -> Self {
        match toml::from_str(text) {
            Ok(config) => config,
            Err(err) => {
                warn!(error = %err, "malformed router configuration, using defaults");
                Self::default()
            }
        }
    }

    /// Root path normalized for prefix stripping and URL assembly: no
    /// surrounding slashes, one trailing slash when non-empty.
    pub(crate) fn normalized_root_path(&self) -> String {
        let trimmed = self.root_path.trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("{trimmed}/")
        }
    }
}
