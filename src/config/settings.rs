//! Application settings loaded from config.toml
//!
//! The file holds two kinds of data: runtime settings for the inventory rules
//! (`[inventory]`) and seed data (`[[warehouses]]`, `[[categories]]`, `[[admins]]`)
//! that is written to the database the first time the bot starts.

use crate::core::stock::LowStockRule;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Environment variable overriding [`DEFAULT_CONFIG_PATH`]
pub const CONFIG_PATH_ENV: &str = "WAREWISE_CONFIG";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Inventory rule settings
    #[serde(default)]
    pub inventory: InventorySettings,
    /// Warehouses to seed
    #[serde(default)]
    pub warehouses: Vec<WarehouseConfig>,
    /// Categories to seed
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
    /// Administrator accounts to seed
    #[serde(default)]
    pub admins: Vec<AdminConfig>,
}

/// Runtime settings for inventory rules and listings
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct InventorySettings {
    /// How current stock is compared with minimum stock
    pub low_stock_rule: LowStockRule,
    /// Maximum rows shown by list commands
    pub list_limit: usize,
    /// Maximum movements/log rows shown on item details and the dashboard
    pub recent_activity_limit: u64,
}

impl Default for InventorySettings {
    fn default() -> Self {
        Self {
            low_stock_rule: LowStockRule::default(),
            list_limit: 25,
            recent_activity_limit: 10,
        }
    }
}

/// A warehouse to seed. `floors` × `sections` becomes the layout.
#[derive(Debug, Clone, Deserialize)]
pub struct WarehouseConfig {
    /// Unique warehouse name
    pub name: String,
    /// Short location label
    pub location: String,
    /// Optional postal address
    #[serde(default)]
    pub address: Option<String>,
    /// Floor names
    #[serde(default)]
    pub floors: Vec<String>,
    /// Section names available on every floor
    #[serde(default)]
    pub sections: Vec<String>,
}

/// A category to seed
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryConfig {
    /// Unique category name
    pub name: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
}

/// An administrator account to seed
#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    /// Discord user ID
    pub discord_id: String,
    /// Contact e-mail
    pub email: String,
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Loading configuration from {}", path_ref.display());
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    parse_config(&contents)
}

/// Parses configuration from a TOML string.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads configuration from `$WAREWISE_CONFIG`, or ./config.toml.
///
/// A missing default file is not an error: the bot starts with default settings
/// and nothing to seed.
pub fn load_default_config() -> Result<AppConfig> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return load_config(path);
    }

    if Path::new(DEFAULT_CONFIG_PATH).exists() {
        load_config(DEFAULT_CONFIG_PATH)
    } else {
        tracing::warn!("No {DEFAULT_CONFIG_PATH} found, using default settings");
        Ok(AppConfig::default())
    }
}
