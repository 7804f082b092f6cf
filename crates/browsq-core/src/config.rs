//! Browser configuration

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use url::Url;

use browsq_navigation::{InputResolver, DEFAULT_SEARCH_HOST};

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the bookmark file
    pub bookmarks_path: PathBuf,
    /// Target of the Home button
    pub home_url: String,
    /// Page opened by the New Tab action
    pub new_tab_url: String,
    /// Tab strip label of the tab opened at startup
    pub initial_tab_label: String,
    /// Tab strip label of tabs opened with New Tab
    pub new_tab_label: String,
    /// Host serving `/search?q=` for address bar searches
    pub search_host: String,
    /// Suffix of the window title
    pub app_name: String,
}

impl Config {
    /// Read a JSON config file; absent fields take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`Config::load`], but a missing file yields the defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        match Self::load(path.as_ref()) {
            Err(CoreError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.as_ref().display(), "No config file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("home_url", &self.home_url), ("new_tab_url", &self.new_tab_url)] {
            Url::parse(value)
                .map_err(|e| CoreError::Config(format!("{name} {value:?} is not a URL: {e}")))?;
        }

        if self.app_name.trim().is_empty() {
            return Err(CoreError::Config("app_name cannot be empty".to_string()));
        }

        InputResolver::with_search_host(self.search_host.as_str())?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bookmarks_path: PathBuf::from("bookmarks.json"),
            home_url: "http://www.google.com".to_string(),
            new_tab_url: "https://google.com".to_string(),
            initial_tab_label: "Home".to_string(),
            new_tab_label: "New Tab".to_string(),
            search_host: DEFAULT_SEARCH_HOST.to_string(),
            app_name: "BrowsQ".to_string(),
        }
    }
}
