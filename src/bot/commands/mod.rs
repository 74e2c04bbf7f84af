//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Slash command choice enums
pub mod choices;

/// Dashboard, low-stock and activity commands
pub mod dashboard;

/// General utility commands
pub mod general;

/// Inventory listing and item management commands
pub mod inventory;

/// Warehouse and category commands
pub mod setup;

/// User management commands
pub mod users;

// Export commands
pub use dashboard::*;
pub use general::*;
pub use inventory::*;
pub use setup::*;
pub use users::*;
