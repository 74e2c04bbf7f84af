//! Shared test utilities for `WareWise`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{category, item, user, validation::ItemDraft, warehouse},
    entities::{self, ItemStatus, Role},
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Name of the warehouse created by [`setup_with_warehouse`]
pub const TEST_WAREHOUSE: &str = "Main Warehouse";
/// Name of the category created by [`setup_with_warehouse`]
pub const TEST_CATEGORY: &str = "General";

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test warehouse with the layout Ground/A, Ground/B and First/A.
pub async fn create_test_warehouse(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::warehouse::Model> {
    let wh = warehouse::create_warehouse(db, name, "Main Street", None).await?;
    for (floor, section) in [("Ground", "A"), ("Ground", "B"), ("First", "A")] {
        warehouse::add_section(db, wh.id, floor, section).await?;
    }
    Ok(wh)
}

/// Creates a test category with no description.
pub async fn create_test_category(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::category::Model> {
    category::create_category(db, name, None).await
}

/// An item form with sensible defaults.
///
/// # Defaults
/// * warehouse: [`TEST_WAREHOUSE`], Ground/A
/// * category: [`TEST_CATEGORY`]
/// * price: 2.5
/// * `current_stock`: 10, `min_stock`: 2
/// * status: Active, SKU generated
#[must_use]
pub fn test_draft(name: &str) -> ItemDraft {
    ItemDraft {
        name: name.to_string(),
        description: None,
        category: TEST_CATEGORY.to_string(),
        warehouse: TEST_WAREHOUSE.to_string(),
        floor: Some("Ground".to_string()),
        section: Some("A".to_string()),
        price: 2.5,
        current_stock: 10,
        min_stock: 2,
        status: ItemStatus::Active,
        sku: None,
    }
}

/// Creates a test item through the normal create path with custom stock values.
pub async fn create_test_item(
    db: &DatabaseConnection,
    name: &str,
    current_stock: i64,
    min_stock: i64,
) -> Result<entities::inventory_item::Model> {
    let draft = ItemDraft {
        current_stock,
        min_stock,
        ..test_draft(name)
    };
    item::create_item(db, &draft, "test_user").await
}

/// Creates a test user bound to `discord_id`.
pub async fn create_test_user(
    db: &DatabaseConnection,
    discord_id: &str,
    role: Role,
) -> Result<entities::user::Model> {
    user::create_user(db, discord_id, &format!("{discord_id}@example.com"), role).await
}

/// Sets up a database with the test warehouse and category.
/// Returns (db, warehouse) for common test scenarios.
pub async fn setup_with_warehouse() -> Result<(DatabaseConnection, entities::warehouse::Model)> {
    let db = setup_test_db().await?;
    let wh = create_test_warehouse(&db, TEST_WAREHOUSE).await?;
    create_test_category(&db, TEST_CATEGORY).await?;
    Ok((db, wh))
}

/// Sets up a database with one item of 10 units (minimum 2).
/// Returns (db, item) for item-related tests.
pub async fn setup_with_item() -> Result<(DatabaseConnection, entities::inventory_item::Model)> {
    let (db, _wh) = setup_with_warehouse().await?;
    let item = create_test_item(&db, "Test Item", 10, 2).await?;
    Ok((db, item))
}
