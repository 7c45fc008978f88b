use crate::domain::model::{Field, FieldUpdate};
use crate::utils::error::{CapsuleError, Result};
use crate::utils::validation::{validate_range, validate_url};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerConfig>,
    pub frontend: Option<FrontendConfig>,
    pub defaults: Option<DefaultsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrontendConfig {
    pub origin: Option<String>,
}

/// Initial form values, by key or label.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub season: Option<String>,
    pub style: Option<String>,
    pub number_of_outfits: Option<String>,
    pub colors: Option<Vec<String>>,
    pub preferences: Option<Vec<String>>,
}

impl DefaultsConfig {
    pub fn updates(&self) -> Result<Vec<FieldUpdate>> {
        let mut updates = Vec::new();
        let singles = [
            (Field::Season, &self.season),
            (Field::Style, &self.style),
            (Field::NumberOfOutfits, &self.number_of_outfits),
        ];
        for (field, value) in singles {
            if let Some(value) = value {
                updates.push(FieldUpdate::parse(field, &[value])?);
            }
        }
        if let Some(colors) = &self.colors {
            updates.push(FieldUpdate::parse(Field::Colors, colors)?);
        }
        if let Some(preferences) = &self.preferences {
            updates.push(FieldUpdate::parse(Field::Preferences, preferences)?);
        }
        Ok(updates)
    }
}

impl TomlConfig {
    /// Loads a configuration file, substituting `${VAR}` placeholders.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CapsuleError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CapsuleError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Unknown variables are left as written so validation can point at them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CapsuleError::ConfigError {
            message: format!("placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(server) = &self.server {
            if let Some(endpoint) = &server.endpoint {
                validate_url("server.endpoint", endpoint)?;
            }
            if let Some(timeout) = server.timeout_seconds {
                validate_range("server.timeout_seconds", timeout, 1, 300)?;
            }
        }

        if let Some(origin) = self.frontend.as_ref().and_then(|f| f.origin.as_ref()) {
            validate_url("frontend.origin", origin)?;
        }

        if let Some(defaults) = &self.defaults {
            defaults.updates()?;
        }

        Ok(())
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.server.as_ref()?.endpoint.as_deref()
    }

    pub fn timeout_seconds(&self) -> Option<u64> {
        self.server.as_ref()?.timeout_seconds
    }

    pub fn origin(&self) -> Option<&str> {
        self.frontend.as_ref()?.origin.as_deref()
    }

    pub fn default_updates(&self) -> Result<Vec<FieldUpdate>> {
        match &self.defaults {
            Some(defaults) => defaults.updates(),
            None => Ok(Vec::new()),
        }
    }
}
