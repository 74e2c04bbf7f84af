//! Database configuration module for WareWise.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated with `Schema::create_table_from_entity`, so the schema always
//! matches the entity definitions without hand-written SQL.

use crate::entities::{
    ActivityLog, Category, InventoryItem, StockMovement, SystemState, User, Warehouse,
    WarehouseSection, warehouse_section,
};
use crate::errors::Result;
use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema, sea_query::Index,
};

/// Fallback when `DATABASE_URL` is not set
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/warewise.sqlite?mode=rwc";

/// Gets the database URL from environment variable or returns default `SQLite` path.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Establishes a connection to the database named by `DATABASE_URL`.
///
/// Falls back to a local `SQLite` file, creating the `data/` directory for it
/// when needed.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();
    if database_url == DEFAULT_DATABASE_URL {
        std::fs::create_dir_all("data")?;
    }

    tracing::info!("Connecting to database");
    Database::connect(&database_url).await.map_err(Into::into)
}

async fn create_table_for<C, E>(db: &C, schema: &Schema, entity: E) -> Result<()>
where
    C: ConnectionTrait,
    E: EntityTrait,
{
    let builder = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

/// Creates all tables that do not exist yet.
///
/// Safe to call on every start-up.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table_for(db, &schema, Warehouse).await?;
    create_table_for(db, &schema, WarehouseSection).await?;
    create_table_for(db, &schema, Category).await?;
    create_table_for(db, &schema, InventoryItem).await?;
    create_table_for(db, &schema, StockMovement).await?;
    create_table_for(db, &schema, ActivityLog).await?;
    create_table_for(db, &schema, User).await?;
    create_table_for(db, &schema, SystemState).await?;

    // One row per (warehouse, floor, section) slot
    let slot_index = Index::create()
        .name("idx_warehouse_sections_slot")
        .table(WarehouseSection)
        .col(warehouse_section::Column::WarehouseId)
        .col(warehouse_section::Column::Floor)
        .col(warehouse_section::Column::Section)
        .unique()
        .if_not_exists()
        .to_owned();
    db.execute(db.get_database_backend().build(&slot_index)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        ActivityLogModel, CategoryModel, InventoryItemModel, StockMovementModel,
        SystemStateModel, UserModel, WarehouseModel, WarehouseSectionModel,
    };
    use sea_orm::{ActiveModelTrait, QuerySelect, Set};

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<WarehouseModel> = Warehouse::find().limit(1).all(&db).await?;
        let _: Vec<WarehouseSectionModel> = WarehouseSection::find().limit(1).all(&db).await?;
        let _: Vec<CategoryModel> = Category::find().limit(1).all(&db).await?;
        let _: Vec<InventoryItemModel> = InventoryItem::find().limit(1).all(&db).await?;
        let _: Vec<StockMovementModel> = StockMovement::find().limit(1).all(&db).await?;
        let _: Vec<ActivityLogModel> = ActivityLog::find().limit(1).all(&db).await?;
        let _: Vec<UserModel> = User::find().limit(1).all(&db).await?;
        let _: Vec<SystemStateModel> = SystemState::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_warehouse_slots_are_unique() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        let warehouse = crate::entities::warehouse::ActiveModel {
            name: Set("Main Warehouse".to_string()),
            location: Set("Main Street".to_string()),
            ..Default::default()
        }
        .insert(&db)
        .await?;
        let slot = || warehouse_section::ActiveModel {
            warehouse_id: Set(warehouse.id),
            floor: Set("Ground".to_string()),
            section: Set("A".to_string()),
            ..Default::default()
        };

        slot().insert(&db).await?;
        assert!(slot().insert(&db).await.is_err());
        assert_eq!(WarehouseSection::find().all(&db).await?.len(), 1);
        Ok(())
    }
}
