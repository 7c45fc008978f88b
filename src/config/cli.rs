use crate::config::toml_config::TomlConfig;
use crate::config::{Settings, DEFAULT_ORIGIN, DEFAULT_SERVER, DEFAULT_TIMEOUT_SECONDS};
use crate::domain::model::{Field, FieldUpdate};
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "capsule-form")]
#[command(about = "Fill in the capsule wardrobe form and fetch your wardrobe")]
pub struct CliConfig {
    /// Wardrobe service base URL
    #[arg(long, env = "SERVER")]
    pub server: Option<String>,

    /// Origin used to build share links
    #[arg(long, env = "FRONTEND_ORIGIN")]
    pub origin: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Share link (or bare token) to reopen a capsule
    #[arg(long)]
    pub link: Option<String>,

    #[arg(long, help = "Autumn/Winter or Spring/Summer")]
    pub season: Option<String>,

    #[arg(long, help = "Casual or Office")]
    pub style: Option<String>,

    #[arg(long, help = "Outfit bucket, e.g. From21to30 or \"From 21 to 30\"")]
    pub outfits: Option<String>,

    #[arg(long, value_delimiter = ',', num_args = 0.., help = "Colors, comma separated")]
    pub colors: Option<Vec<String>>,

    #[arg(long, value_delimiter = ',', num_args = 0.., help = "Preferences, comma separated")]
    pub preferences: Option<Vec<String>>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Print the token and share link without calling the service
    #[arg(long)]
    pub dry_run: bool,

    /// Log as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Field values given on the command line, as form updates.
    pub fn field_updates(&self) -> Result<Vec<FieldUpdate>> {
        let mut updates = Vec::new();
        let singles = [
            (Field::Season, &self.season),
            (Field::Style, &self.style),
            (Field::NumberOfOutfits, &self.outfits),
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

    /// Merges flags over the configuration file over built-in defaults.
    pub fn resolve(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                let file = TomlConfig::from_file(path)?;
                file.validate_config()?;
                file
            }
            None => TomlConfig::default(),
        };

        let server = self
            .server
            .clone()
            .or_else(|| file.endpoint().map(str::to_string))
            .unwrap_or_else(|| DEFAULT_SERVER.to_string());
        let origin = self
            .origin
            .clone()
            .or_else(|| file.origin().map(str::to_string))
            .unwrap_or_else(|| DEFAULT_ORIGIN.to_string());
        let timeout_seconds = self
            .timeout_seconds
            .or(file.timeout_seconds())
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS);

        // file defaults first so flags win
        let mut updates = file.default_updates()?;
        updates.extend(self.field_updates()?);

        Ok(Settings {
            server,
            origin,
            timeout_seconds,
            link: self.link.clone(),
            updates,
        })
    }
}
