//! Warehouse entity - A physical site holding inventory.
//!
//! The floor/section layout lives in `warehouse_sections`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Warehouse database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "warehouses")]
pub struct Model {
    /// Unique identifier for the warehouse
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Unique display name (e.g., "Main Warehouse")
    #[sea_orm(unique)]
    pub name: String,
    /// Short location label (e.g., "Main Street")
    pub location: String,
    /// Optional postal address
    pub address: Option<String>,
}

/// Defines relationships between Warehouse and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One warehouse has many floor/section entries
    #[sea_orm(has_many = "super::warehouse_section::Entity")]
    Sections,
    /// One warehouse holds many items
    #[sea_orm(has_many = "super::inventory_item::Entity")]
    Items,
}

impl Related<super::warehouse_section::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sections.def()
    }
}

impl Related<super::inventory_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
