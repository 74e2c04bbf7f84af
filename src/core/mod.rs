/// Activity log of item changes
pub mod activity;

/// Category lookup and creation
pub mod category;

/// Dashboard statistics, low-stock alerts and recent updates
pub mod dashboard;

/// Inventory list filtering and sorting
pub mod inventory;

/// Item create/edit/adjust/delete with bookkeeping
pub mod item;

/// SKU generation and format checks
pub mod sku;

/// Low-stock rules and the stock movement ledger
pub mod stock;

/// Accounts, roles and sign-in
pub mod user;

/// Form validation
pub mod validation;

/// Warehouses and their floor/section layouts
pub mod warehouse;
