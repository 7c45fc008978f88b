#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::FieldUpdate;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};

pub const DEFAULT_SERVER: &str = "http://localhost:3000";
pub const DEFAULT_ORIGIN: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Fully resolved settings for one form session.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub server: String,
    pub origin: String,
    pub timeout_seconds: u64,
    /// Share link or bare token to open the form with.
    pub link: Option<String>,
    /// Field values to apply after the link is loaded, in order.
    pub updates: Vec<FieldUpdate>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            link: None,
            updates: Vec::new(),
        }
    }
}

impl ConfigProvider for Settings {
    fn server(&self) -> &str {
        &self.server
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("server", &self.server)?;
        validate_url("origin", &self.origin)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, 300)?;
        if let Some(link) = &self.link {
            validate_non_empty_string("link", link)?;
        }

        tracing::debug!("Settings validation passed");
        Ok(())
    }
}
