use anyhow::{Context, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDate;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::fmt::Write;
use std::path::Path;
use tasklist_core::Cost;

/// Looked up in the working directory when no config path is given
pub const DEFAULT_CONFIG_NAME: &str = "tasklist";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Tasks costing at least this much are highlighted in the list view
    pub high_cost_threshold: Cost,
    pub currency_symbol: String,
    /// strftime pattern for due dates
    pub date_format: String,
    pub confirm_deletes: bool,
    pub show_list_after_change: bool,
}

impl Settings {
    /// Defaults, then the TOML file, then `TASKLIST_*` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = Settings::default();

        let mut builder = Config::builder()
            .set_default("high_cost_threshold", defaults.high_cost_threshold.to_string())?
            .set_default("currency_symbol", defaults.currency_symbol)?
            .set_default("date_format", defaults.date_format)?
            .set_default("confirm_deletes", defaults.confirm_deletes)?
            .set_default("show_list_after_change", defaults.show_list_after_change)?;

        builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_NAME).required(false)),
        };

        let settings: Settings = builder
            .add_source(Environment::with_prefix("TASKLIST"))
            .build()
            .context("Failed to read configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        settings.validate()?;

        tracing::debug!("Loaded settings: {:?}", settings);

        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            anyhow::bail!("Invalid date_format: {}", self.date_format);
        }

        // Time or offset fields parse fine but cannot be rendered from a date
        let mut sample = String::new();
        if write!(sample, "{}", NaiveDate::MIN.format(&self.date_format)).is_err() {
            anyhow::bail!("date_format cannot render a calendar date: {}", self.date_format);
        }
        Ok(())
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            high_cost_threshold: Cost::from_units(1000),
            currency_symbol: "R$".to_string(),
            date_format: "%d/%m/%Y".to_string(),
            confirm_deletes: true,
            show_list_after_change: false,
        }
    }
}
