//! Item business logic - Creating, editing, adjusting and deleting inventory items.
//!
//! Every write that touches an item also appends its bookkeeping rows (stock
//! movement and/or activity log) inside the same database transaction, so an item
//! never changes without its audit trail.

use crate::{
    core::{
        activity::{self, NewActivity},
        category, sku, stock,
        validation::{ItemDraft, normalize_location, validate_item_draft},
        warehouse,
    },
    entities::{
        ActivityType, InventoryItem, ItemStatus, MovementType, activity_log,
        category as category_entity, inventory_item, stock_movement,
        warehouse as warehouse_entity,
    },
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, Set, TransactionTrait, prelude::*};
use serde::Serialize;

/// Stringified into activity log `old_value`/`new_value`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemSnapshot {
    /// Item name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Category name
    pub category: String,
    /// Warehouse name
    pub warehouse: String,
    /// Floor
    pub floor: String,
    /// Section
    pub section: String,
    /// Unit price
    pub price: f64,
    /// Units on hand
    pub current_stock: i32,
    /// Low-stock threshold
    pub min_stock: i32,
    /// Lifecycle status
    pub status: ItemStatus,
    /// Stock-keeping unit
    pub sku: String,
}

impl ItemSnapshot {
    /// Captures the item with its warehouse and category names resolved.
    #[must_use]
    pub fn capture(item: &inventory_item::Model, warehouse: &str, category: &str) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            category: category.to_string(),
            warehouse: warehouse.to_string(),
            floor: item.floor.clone(),
            section: item.section.clone(),
            price: item.price,
            current_stock: item.current_stock,
            min_stock: item.min_stock,
            status: item.status,
            sku: item.sku.clone(),
        }
    }

    /// JSON form stored in the activity log.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(Into::into)
    }
}

/// Everything shown on the item details view.
#[derive(Debug, Clone)]
pub struct ItemDetails {
    /// The item itself
    pub item: inventory_item::Model,
    /// Its warehouse, if it still exists
    pub warehouse: Option<warehouse_entity::Model>,
    /// Its category, if it still exists
    pub category: Option<category_entity::Model>,
    /// Stock movements, newest first
    pub movements: Vec<stock_movement::Model>,
    /// Activity log, newest first
    pub logs: Vec<activity_log::Model>,
}

/// Outcome of [`adjust_stock`].
#[derive(Debug, Clone)]
pub struct StockAdjustment {
    /// The item after the adjustment
    pub item: inventory_item::Model,
    /// Stock before the adjustment
    pub old_stock: i32,
    /// The recorded movement, `None` when the stock did not change
    pub movement: Option<stock_movement::Model>,
}

/// Draft with its references resolved against the database.
struct ResolvedDraft {
    name: String,
    description: Option<String>,
    category: category_entity::Model,
    warehouse: warehouse_entity::Model,
    floor: String,
    section: String,
    price: f64,
    current_stock: i32,
    min_stock: i32,
    status: ItemStatus,
}

fn to_stock(value: i64) -> Result<i32> {
    if value < 0 {
        return Err(Error::InvalidStock { value });
    }
    i32::try_from(value).map_err(|_| Error::InvalidStock { value })
}

async fn resolve_draft<C>(db: &C, draft: &ItemDraft) -> Result<ResolvedDraft>
where
    C: ConnectionTrait,
{
    let warehouse = warehouse::get_warehouse_by_name(db, &draft.warehouse)
        .await?
        .ok_or_else(|| Error::WarehouseNotFound {
            name: draft.warehouse.trim().to_string(),
        })?;

    let category = category::get_category_by_name(db, &draft.category)
        .await?
        .ok_or_else(|| Error::CategoryNotFound {
            name: draft.category.trim().to_string(),
        })?;

    let floor = normalize_location(draft.floor.as_deref());
    let section = normalize_location(draft.section.as_deref());
    if !warehouse::is_valid_location(db, warehouse.id, &floor, &section).await? {
        return Err(Error::InvalidLocation {
            warehouse: warehouse.name,
            floor,
            section,
        });
    }

    Ok(ResolvedDraft {
        name: draft.name.trim().to_string(),
        description: draft
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(ToString::to_string),
        category,
        warehouse,
        floor,
        section,
        price: draft.price,
        current_stock: to_stock(draft.current_stock)?,
        min_stock: to_stock(draft.min_stock)?,
        status: draft.status,
    })
}

/// Rejects `sku` if a live item other than `exclude_id` already uses it.
async fn ensure_unique_sku<C>(db: &C, sku: &str, exclude_id: Option<i64>) -> Result<()>
where
    C: ConnectionTrait,
{
    let mut query = InventoryItem::find()
        .filter(inventory_item::Column::Sku.eq(sku))
        .filter(inventory_item::Column::IsDeleted.eq(false));
    if let Some(id) = exclude_id {
        query = query.filter(inventory_item::Column::Id.ne(id));
    }

    if query.count(db).await? > 0 {
        return Err(Error::DuplicateSku {
            sku: sku.to_string(),
        });
    }
    Ok(())
}

/// Rejects a second live, non-discontinued item with the same name at the same spot.
async fn ensure_unique_location<C>(
    db: &C,
    resolved: &ResolvedDraft,
    exclude_id: Option<i64>,
) -> Result<()>
where
    C: ConnectionTrait,
{
    if resolved.status == ItemStatus::Discontinued {
        return Ok(());
    }

    let mut query = InventoryItem::find()
        .filter(inventory_item::Column::Name.eq(resolved.name.as_str()))
        .filter(inventory_item::Column::WarehouseId.eq(resolved.warehouse.id))
        .filter(inventory_item::Column::Floor.eq(resolved.floor.as_str()))
        .filter(inventory_item::Column::Section.eq(resolved.section.as_str()))
        .filter(inventory_item::Column::Status.ne(ItemStatus::Discontinued))
        .filter(inventory_item::Column::IsDeleted.eq(false));
    if let Some(id) = exclude_id {
        query = query.filter(inventory_item::Column::Id.ne(id));
    }

    if query.count(db).await? > 0 {
        return Err(Error::DuplicateLocation {
            name: resolved.name.clone(),
            warehouse: resolved.warehouse.name.clone(),
            floor: resolved.floor.clone(),
            section: resolved.section.clone(),
        });
    }
    Ok(())
}

/// Loads a non-deleted item or fails with `ItemNotFound`.
async fn load_live_item<C>(db: &C, item_id: i64) -> Result<inventory_item::Model>
where
    C: ConnectionTrait,
{
    InventoryItem::find_by_id(item_id)
        .filter(inventory_item::Column::IsDeleted.eq(false))
        .one(db)
        .await?
        .ok_or_else(|| Error::ItemNotFound {
            id: item_id.to_string(),
        })
}

/// Snapshot of a stored item, resolving its warehouse and category names.
async fn snapshot_of<C>(db: &C, item: &inventory_item::Model) -> Result<ItemSnapshot>
where
    C: ConnectionTrait,
{
    let warehouse_name = warehouse::get_warehouse_by_id(db, item.warehouse_id)
        .await?
        .map_or_else(String::new, |w| w.name);
    let category_name = category::get_category_by_id(db, item.category_id)
        .await?
        .map_or_else(String::new, |c| c.name);
    Ok(ItemSnapshot::capture(item, &warehouse_name, &category_name))
}

/// Retrieves an item by ID, including soft-deleted items.
pub async fn get_item_by_id(
    db: &DatabaseConnection,
    item_id: i64,
) -> Result<Option<inventory_item::Model>> {
    InventoryItem::find_by_id(item_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds a live item by SKU.
pub async fn get_item_by_sku(
    db: &DatabaseConnection,
    sku: &str,
) -> Result<Option<inventory_item::Model>> {
    InventoryItem::find()
        .filter(inventory_item::Column::Sku.eq(sku.trim()))
        .filter(inventory_item::Column::IsDeleted.eq(false))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates an item together with its `INITIAL` movement and `CREATE` log entry.
///
/// A SKU is generated when the draft has none.
///
/// # Errors
/// Returns an error if:
/// - Any form field is invalid
/// - The warehouse or category does not exist
/// - The floor/section pair is not in the warehouse layout
/// - The SKU is taken, or the same item already sits at that location
/// - A database write fails (nothing is written in that case)
pub async fn create_item(
    db: &DatabaseConnection,
    draft: &ItemDraft,
    actor: &str,
) -> Result<inventory_item::Model> {
    validate_item_draft(draft)?;

    let sku = draft
        .sku
        .as_deref()
        .map_or_else(sku::generate_sku, |s| s.trim().to_string());

    let txn = db.begin().await?;

    let resolved = resolve_draft(&txn, draft).await?;
    ensure_unique_sku(&txn, &sku, None).await?;
    ensure_unique_location(&txn, &resolved, None).await?;

    let now = chrono::Utc::now();
    let model = inventory_item::ActiveModel {
        name: Set(resolved.name.clone()),
        description: Set(resolved.description.clone()),
        category_id: Set(resolved.category.id),
        warehouse_id: Set(resolved.warehouse.id),
        floor: Set(resolved.floor.clone()),
        section: Set(resolved.section.clone()),
        price: Set(resolved.price),
        current_stock: Set(resolved.current_stock),
        min_stock: Set(resolved.min_stock),
        status: Set(resolved.status),
        sku: Set(sku),
        is_deleted: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
        updated_by: Set(actor.to_string()),
        ..Default::default()
    };
    let item = model.insert(&txn).await?;

    stock::record_movement(
        &txn,
        item.id,
        item.warehouse_id,
        item.current_stock,
        MovementType::Initial,
        Some("Initial stock entry".to_string()),
        actor,
    )
    .await?;

    let snapshot = ItemSnapshot::capture(&item, &resolved.warehouse.name, &resolved.category.name);
    activity::log_activity(
        &txn,
        NewActivity {
            item_id: item.id,
            user_id: actor.to_string(),
            action_type: ActivityType::Create,
            old_value: None,
            new_value: Some(snapshot.to_json()?),
            details: format!(
                "Created new item: {} in {} at {}/{}",
                item.name, resolved.warehouse.name, item.floor, item.section
            ),
        },
    )
    .await?;

    txn.commit().await?;

    tracing::info!(item_id = item.id, sku = %item.sku, actor, "Created item");
    Ok(item)
}

/// Replaces an item's fields, logging the change and any stock difference.
///
/// The SKU is kept when the draft has none.
///
/// # Errors
/// Same as [`create_item`], plus `ItemNotFound` for a missing or deleted item.
pub async fn update_item(
    db: &DatabaseConnection,
    item_id: i64,
    draft: &ItemDraft,
    actor: &str,
) -> Result<inventory_item::Model> {
    validate_item_draft(draft)?;

    let txn = db.begin().await?;

    let existing = load_live_item(&txn, item_id).await?;
    let resolved = resolve_draft(&txn, draft).await?;
    let sku = draft
        .sku
        .as_deref()
        .map_or_else(|| existing.sku.clone(), |s| s.trim().to_string());

    ensure_unique_sku(&txn, &sku, Some(item_id)).await?;
    ensure_unique_location(&txn, &resolved, Some(item_id)).await?;

    let old_snapshot = snapshot_of(&txn, &existing).await?;
    let old_stock = existing.current_stock;

    let mut model: inventory_item::ActiveModel = existing.into();
    model.name = Set(resolved.name.clone());
    model.description = Set(resolved.description.clone());
    model.category_id = Set(resolved.category.id);
    model.warehouse_id = Set(resolved.warehouse.id);
    model.floor = Set(resolved.floor.clone());
    model.section = Set(resolved.section.clone());
    model.price = Set(resolved.price);
    model.current_stock = Set(resolved.current_stock);
    model.min_stock = Set(resolved.min_stock);
    model.status = Set(resolved.status);
    model.sku = Set(sku);
    model.updated_at = Set(chrono::Utc::now());
    model.updated_by = Set(actor.to_string());
    let item = model.update(&txn).await?;

    let new_snapshot =
        ItemSnapshot::capture(&item, &resolved.warehouse.name, &resolved.category.name);
    activity::log_activity(
        &txn,
        NewActivity {
            item_id: item.id,
            user_id: actor.to_string(),
            action_type: ActivityType::Update,
            old_value: Some(old_snapshot.to_json()?),
            new_value: Some(new_snapshot.to_json()?),
            details: format!("Updated item: {} in {}", item.name, resolved.warehouse.name),
        },
    )
    .await?;

    let delta = item.current_stock - old_stock;
    if delta != 0 {
        stock::record_movement(
            &txn,
            item.id,
            item.warehouse_id,
            delta,
            MovementType::from_delta(delta),
            Some("Stock updated through edit".to_string()),
            actor,
        )
        .await?;
    }

    txn.commit().await?;

    tracing::info!(item_id = item.id, actor, stock_delta = delta, "Updated item");
    Ok(item)
}

/// Sets an item's stock to `new_stock`, recording the signed difference.
///
/// When the stock is unchanged nothing is written.
///
/// # Errors
/// Returns an error if `new_stock` is negative, the item is missing or deleted,
/// or a database write fails.
pub async fn adjust_stock(
    db: &DatabaseConnection,
    item_id: i64,
    new_stock: i64,
    reason: Option<String>,
    actor: &str,
) -> Result<StockAdjustment> {
    let new_stock = to_stock(new_stock)?;

    let txn = db.begin().await?;
    let item = load_live_item(&txn, item_id).await?;
    let old_stock = item.current_stock;
    let delta = new_stock - old_stock;

    if delta == 0 {
        tracing::debug!(item_id, "Stock unchanged, nothing to record");
        return Ok(StockAdjustment {
            item,
            old_stock,
            movement: None,
        });
    }

    let mut model: inventory_item::ActiveModel = item.into();
    model.current_stock = Set(new_stock);
    model.updated_at = Set(chrono::Utc::now());
    model.updated_by = Set(actor.to_string());
    let item = model.update(&txn).await?;

    let reason = reason
        .map(|r| r.trim().to_string())
        .filter(|r| !r.is_empty())
        .unwrap_or_else(|| "Manual adjustment".to_string());
    let movement = stock::record_movement(
        &txn,
        item.id,
        item.warehouse_id,
        delta,
        MovementType::from_delta(delta),
        Some(reason),
        actor,
    )
    .await?;

    activity::log_activity(
        &txn,
        NewActivity {
            item_id: item.id,
            user_id: actor.to_string(),
            action_type: ActivityType::StockUpdate,
            old_value: Some(old_stock.to_string()),
            new_value: Some(new_stock.to_string()),
            details: format!("Stock updated from {old_stock} to {new_stock}"),
        },
    )
    .await?;

    txn.commit().await?;

    tracing::info!(item_id = item.id, old_stock, new_stock, actor, "Adjusted stock");
    Ok(StockAdjustment {
        item,
        old_stock,
        movement: Some(movement),
    })
}

/// Soft deletes an item after logging the deletion.
///
/// # Errors
/// Returns an error if the item is missing or already deleted, or a write fails.
pub async fn delete_item(
    db: &DatabaseConnection,
    item_id: i64,
    actor: &str,
) -> Result<inventory_item::Model> {
    let txn = db.begin().await?;
    let item = load_live_item(&txn, item_id).await?;
    let snapshot = snapshot_of(&txn, &item).await?;

    activity::log_activity(
        &txn,
        NewActivity {
            item_id: item.id,
            user_id: actor.to_string(),
            action_type: ActivityType::Delete,
            old_value: Some(snapshot.to_json()?),
            new_value: None,
            details: format!("Item deleted: {}", item.name),
        },
    )
    .await?;

    let mut model: inventory_item::ActiveModel = item.into();
    model.is_deleted = Set(true);
    model.updated_at = Set(chrono::Utc::now());
    model.updated_by = Set(actor.to_string());
    let item = model.update(&txn).await?;

    txn.commit().await?;

    tracing::info!(item_id = item.id, actor, "Deleted item");
    Ok(item)
}

/// Loads an item with its warehouse, category, movements and log.
///
/// # Errors
/// Returns `ItemNotFound` if the item is missing or deleted.
pub async fn get_item_details(db: &DatabaseConnection, item_id: i64) -> Result<ItemDetails> {
    let item = load_live_item(db, item_id).await?;
    let warehouse = warehouse::get_warehouse_by_id(db, item.warehouse_id).await?;
    let category = category::get_category_by_id(db, item.category_id).await?;
    let movements = stock::get_movements_for_item(db, item.id).await?;
    let logs = activity::get_logs_for_item(db, item.id).await?;

    Ok(ItemDetails {
        item,
        warehouse,
        category,
        movements,
        logs,
    })
}
