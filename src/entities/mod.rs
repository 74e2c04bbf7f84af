//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod activity_log;
pub mod category;
pub mod inventory_item;
pub mod stock_movement;
pub mod system_state;
pub mod user;
pub mod warehouse;
pub mod warehouse_section;

// Re-export specific types to avoid conflicts
pub use activity_log::{
    ActivityType, Column as ActivityLogColumn, Entity as ActivityLog, Model as ActivityLogModel,
};
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use inventory_item::{
    Column as InventoryItemColumn, Entity as InventoryItem, ItemStatus,
    Model as InventoryItemModel,
};
pub use stock_movement::{
    Column as StockMovementColumn, Entity as StockMovement, Model as StockMovementModel,
    MovementType,
};
pub use system_state::{
    Column as SystemStateColumn, Entity as SystemState, Model as SystemStateModel,
};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel, Role};
pub use warehouse::{Column as WarehouseColumn, Entity as Warehouse, Model as WarehouseModel};
pub use warehouse_section::{
    Column as WarehouseSectionColumn, Entity as WarehouseSection,
    Model as WarehouseSectionModel,
};
