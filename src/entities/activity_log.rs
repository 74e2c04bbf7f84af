//! Activity log entity - Append-only audit trail of item changes.
//!
//! `old_value`/`new_value` hold stringified JSON snapshots of the item.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// What happened to the item
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ActivityType {
    /// Item was created
    #[sea_orm(string_value = "CREATE")]
    Create,
    /// Item fields were edited
    #[sea_orm(string_value = "UPDATE")]
    Update,
    /// Item was deleted
    #[sea_orm(string_value = "DELETE")]
    Delete,
    /// Stock was adjusted outside of a full edit
    #[sea_orm(string_value = "STOCK_UPDATE")]
    StockUpdate,
}

/// Activity log database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activity_logs")]
pub struct Model {
    /// Unique identifier for the entry
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Item the entry is about
    pub item_id: i64,
    /// Discord user ID of the actor
    pub user_id: String,
    /// What happened
    pub action_type: ActivityType,
    /// Snapshot before the change
    pub old_value: Option<String>,
    /// Snapshot after the change
    pub new_value: Option<String>,
    /// Free-text summary
    pub details: String,
    /// When the entry was written
    pub timestamp: DateTimeUtc,
}

/// Defines relationships between log entries and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each entry belongs to one item
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
