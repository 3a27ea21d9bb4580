//! Configuration for feedstore
//!
//! This module provides the store configuration and re-exports the record
//! types from the `feedstore-types` crate for convenience.
use serde::de::Error;

pub use feedstore_types::config::AppendOptions;
pub use feedstore_types::feed::Feed;
pub use feedstore_types::filter::DataFilter;
pub use feedstore_types::point::{DataPoint, Direction, PointId};
pub use feedstore_types::stats::StoreStats;

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Create a placeholder feed when data is appended to an unknown key
    #[serde(default = "Config::default_auto_create_feeds")]
    pub auto_create_feeds: bool,

    /// Upper bound on the number of points returned by a single listing
    #[serde(default)]
    pub max_list_len: Option<usize>,
}

impl Config {
    const fn default_auto_create_feeds() -> bool {
        true
    }

    pub fn with_auto_create_feeds(mut self, enabled: bool) -> Self {
        self.auto_create_feeds = enabled;
        self
    }

    pub fn with_max_list_len(mut self, max: usize) -> Self {
        assert!(max > 0, "List length limit must be greater than zero");

        if max > 1_000_000 {
            log::warn!(
                "List length limit of {} is very large; a single listing clones every point it returns.",
                max
            );
        }

        self.max_list_len = Some(max);
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some(max) = self.max_list_len
            && max == 0
        {
            return Err("List length limit must be greater than zero".to_string());
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auto_create_feeds: Self::default_auto_create_feeds(),
            max_list_len: None,
        }
    }
}
