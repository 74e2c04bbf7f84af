//! Inventory item entity - One stocked product at one warehouse location.
//!
//! Items carry their current and minimum stock, price, SKU and lifecycle status.
//! Deleting an item only sets `is_deleted` so that stock movements and activity
//! logs keep pointing at an existing row.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle status of an item
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ItemStatus {
    /// Stocked and counted on the dashboard
    #[sea_orm(string_value = "Active")]
    Active,
    /// Temporarily not stocked
    #[sea_orm(string_value = "Inactive")]
    Inactive,
    /// No longer carried; does not block its location
    #[sea_orm(string_value = "Discontinued")]
    Discontinued,
}

impl ItemStatus {
    /// Display label, identical to the stored value
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Discontinued => "Discontinued",
        }
    }
}

/// Inventory item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory_items")]
pub struct Model {
    /// Unique identifier for the item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Item name (e.g., "Pallet Wrap 500mm")
    pub name: String,
    /// Optional free-text description
    pub description: Option<String>,
    /// Category this item belongs to
    pub category_id: i64,
    /// Warehouse holding this item
    pub warehouse_id: i64,
    /// Floor inside the warehouse, empty when unassigned
    pub floor: String,
    /// Section on the floor, empty when unassigned
    pub section: String,
    /// Unit price in dollars
    pub price: f64,
    /// Units currently on hand
    pub current_stock: i32,
    /// Threshold for the low-stock warning
    pub min_stock: i32,
    /// Lifecycle status
    pub status: ItemStatus,
    /// Stock-keeping unit, unique among non-deleted items
    pub sku: String,
    /// Soft delete flag - if true, item is hidden but history is preserved
    pub is_deleted: bool,
    /// When the item was created
    pub created_at: DateTimeUtc,
    /// When the item was last modified
    pub updated_at: DateTimeUtc,
    /// Discord user ID of the last editor
    pub updated_by: String,
}

/// Defines relationships between items and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each item is stored in one warehouse
    #[sea_orm(
        belongs_to = "super::warehouse::Entity",
        from = "Column::WarehouseId",
        to = "super::warehouse::Column::Id"
    )]
    Warehouse,
    /// Each item belongs to one category
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    /// One item has many stock movements
    #[sea_orm(has_many = "super::stock_movement::Entity")]
    StockMovements,
    /// One item has many activity log entries
    #[sea_orm(has_many = "super::activity_log::Entity")]
    ActivityLogs,
}

impl Related<super::warehouse::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Warehouse.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::stock_movement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StockMovements.def()
    }
}

impl Related<super::activity_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActivityLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
