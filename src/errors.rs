//! Unified error types for WareWise.
//!
//! Every fallible function in the crate returns [`Result`]. Variants that describe
//! something the user can fix (bad input, duplicates, missing records) are reported
//! back in the command reply; everything else is logged by the bot's error handler.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad configuration file, bad seed data, or a malformed stored value
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Any failure reported by the database layer
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// One or more form fields were rejected
    #[error("Invalid input: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// No (non-deleted) item with this id or SKU
    #[error("Item not found: {id}")]
    ItemNotFound {
        /// Item id or SKU as given by the caller
        id: String,
    },

    /// No warehouse with this name or id
    #[error("Warehouse not found: {name}")]
    WarehouseNotFound {
        /// Warehouse name or id as given by the caller
        name: String,
    },

    /// No category with this name or id
    #[error("Category not found: {name}")]
    CategoryNotFound {
        /// Category name or id as given by the caller
        name: String,
    },

    /// No user with this id
    #[error("User not found: {id}")]
    UserNotFound {
        /// Discord id or row id
        id: String,
    },

    /// Another live item already uses this SKU
    #[error("SKU {sku} is already in use")]
    DuplicateSku {
        /// The conflicting SKU
        sku: String,
    },

    /// Another live item with the same name sits at the same location
    #[error("An item named '{name}' already exists at {warehouse} {floor}/{section}")]
    DuplicateLocation {
        /// Item name
        name: String,
        /// Warehouse name
        warehouse: String,
        /// Floor
        floor: String,
        /// Section
        section: String,
    },

    /// The floor/section pair is not part of the warehouse layout
    #[error("Floor '{floor}' / section '{section}' does not exist in {warehouse}")]
    InvalidLocation {
        /// Warehouse name
        warehouse: String,
        /// Floor
        floor: String,
        /// Section
        section: String,
    },

    /// Stock values must be non-negative
    #[error("Invalid stock value: {value}")]
    InvalidStock {
        /// The rejected value
        value: i64,
    },

    /// A name that must be unique is taken
    #[error("'{name}' already exists")]
    AlreadyExists {
        /// The conflicting name
        name: String,
    },

    /// The account exists but has been deactivated
    #[error("Account is inactive. Contact an administrator.")]
    AccountInactive,

    /// The acting user lacks the role required for an action
    #[error("You don't have permission to {action}")]
    PermissionDenied {
        /// Description of the attempted action
        action: String,
    },

    /// I/O failure (config file, data directory)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Failure while building a reply string
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Failure while stringifying a snapshot
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Integer conversion overflow
    #[error("Conversion error: {0}")]
    Conversion(#[from] std::num::TryFromIntError),

    /// Serenity/Poise framework failure
    #[error("Serenity/Poise framework error: {0}")]
    #[allow(clippy::enum_variant_names)]
    FrameworkError(Box<poise::serenity_prelude::Error>),
}

impl Error {
    /// Returns true for errors caused by user input rather than infrastructure.
    ///
    /// The bot replies with the error text for these and keeps going.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::ItemNotFound { .. }
                | Self::WarehouseNotFound { .. }
                | Self::CategoryNotFound { .. }
                | Self::UserNotFound { .. }
                | Self::DuplicateSku { .. }
                | Self::DuplicateLocation { .. }
                | Self::InvalidLocation { .. }
                | Self::InvalidStock { .. }
                | Self::AlreadyExists { .. }
                | Self::AccountInactive
                | Self::PermissionDenied { .. }
        )
    }
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::FrameworkError(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_errors_are_classified() {
        assert!(Error::AccountInactive.is_user_error());
        assert!(Error::from(validator::ValidationErrors::new()).is_user_error());
        assert!(
            Error::DuplicateSku {
                sku: "SKU-1".to_string()
            }
            .is_user_error()
        );
        assert!(
            !Error::Config {
                message: "broken".to_string()
            }
            .is_user_error()
        );
        assert!(!Error::Database(sea_orm::DbErr::Custom("x".to_string())).is_user_error());
    }
}
