//! Input resolution for the address bar
//!
//! The decision boundary is deliberately crude and must stay that way:
//! `file.txt` and `sub/page.html` are treated as hosts, `localhost` and
//! `192.168.0.1:8080/admin` are not special-cased.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::NavigationError;
use crate::Result;

pub const DEFAULT_SEARCH_HOST: &str = "www.google.com";

/// Result of resolving address bar text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "url")]
pub enum NavigationIntent {
    /// Load this URL
    Url(String),
    /// Load this search results URL
    Search(String),
}

impl NavigationIntent {
    pub fn url(&self) -> &str {
        match self {
            NavigationIntent::Url(url) | NavigationIntent::Search(url) => url,
        }
    }

    pub fn into_url(self) -> String {
        match self {
            NavigationIntent::Url(url) | NavigationIntent::Search(url) => url,
        }
    }

    pub fn is_search(&self) -> bool {
        matches!(self, NavigationIntent::Search(_))
    }
}

#[derive(Debug, Clone)]
pub struct InputResolver {
    /// Host serving `/search?q=`
    search_host: String,
}

impl InputResolver {
    pub fn new() -> Self {
        Self {
            search_host: DEFAULT_SEARCH_HOST.to_string(),
        }
    }

    pub fn with_search_host(host: impl Into<String>) -> Result<Self> {
        let mut resolver = Self::new();
        resolver.set_search_host(host)?;
        Ok(resolver)
    }

    /// Change the search host. `host` may carry a port but no path.
    pub fn set_search_host(&mut self, host: impl Into<String>) -> Result<()> {
        let host = host.into();
        if !Self::is_valid_host(&host) {
            return Err(NavigationError::InvalidSearchHost(host));
        }
        self.search_host = host;
        Ok(())
    }

    pub fn search_host(&self) -> &str {
        &self.search_host
    }

    /// Resolve raw address bar text. Never fails: anything that does not
    /// look like an address becomes a search.
    pub fn resolve(&self, input: &str) -> NavigationIntent {
        if input.starts_with("http://") || input.starts_with("https://") {
            return NavigationIntent::Url(input.to_string());
        }

        let last_segment = input.rsplit('/').next().unwrap_or(input);
        if !last_segment.contains('.') {
            let intent = NavigationIntent::Search(self.build_search_url(input));
            tracing::debug!(input = %input, url = %intent.url(), "Resolved input as search");
            return intent;
        }

        NavigationIntent::Url(format!("https://{}", input))
    }

    /// Only spaces are escaped; the rest of the query is passed through
    fn build_search_url(&self, query: &str) -> String {
        format!(
            "https://{}/search?q={}",
            self.search_host,
            query.replace(' ', "%20")
        )
    }

    fn is_valid_host(host: &str) -> bool {
        if host.trim().is_empty() || host.contains(char::is_whitespace) {
            return false;
        }

        match Url::parse(&format!("https://{}/search", host)) {
            Ok(url) => {
                url.host_str().is_some()
                    && url.path() == "/search"
                    && url.query().is_none()
                    && url.fragment().is_none()
                    && url.username().is_empty()
            }
            Err(_) => false,
        }
    }
}

impl Default for InputResolver {
    fn default() -> Self {
        Self::new()
    }
}
