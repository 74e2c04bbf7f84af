//! Stock movement entity - Append-only ledger of stock changes.
//!
//! Each row records the signed quantity delta applied to one item, who applied it,
//! and why. Rows are never updated or deleted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of stock change
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum MovementType {
    /// Opening balance recorded when the item is created
    #[sea_orm(string_value = "INITIAL")]
    Initial,
    /// Stock went up
    #[sea_orm(string_value = "INCREASE")]
    Increase,
    /// Stock went down
    #[sea_orm(string_value = "DECREASE")]
    Decrease,
}

/// Stock movement database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "stock_movements")]
pub struct Model {
    /// Unique identifier for the movement
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Item whose stock changed
    pub item_id: i64,
    /// Warehouse the item was in at the time
    pub warehouse_id: i64,
    /// Signed quantity delta (opening balance for `INITIAL`)
    pub quantity: i32,
    /// Kind of change
    pub movement_type: MovementType,
    /// Optional human-readable reason
    pub reason: Option<String>,
    /// Discord user ID who made the change
    pub user_id: String,
    /// When the change was recorded
    pub timestamp: DateTimeUtc,
}

/// Defines relationships between movements and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each movement belongs to one item
    #[sea_orm(
        belongs_to = "super::inventory_item::Entity",
        from = "Column::ItemId",
        to = "super::inventory_item::Column::Id"
    )]
    Item,
}

impl Related<super::inventory_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Item.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
