//! Inventory listing - Filtering, searching and sorting the item list.

use crate::{
    core::stock::{self, LowStockRule, StockLevel},
    entities::{InventoryItem, inventory_item},
    errors::Result,
};
use sea_orm::{QueryOrder, prelude::*};

/// Sort order of the inventory list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Name, A to Z
    #[default]
    Name,
    /// Current stock, lowest first
    Stock,
    /// Price, highest first
    Price,
}

/// Filters applied to the inventory list. The default matches every live item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InventoryFilter {
    /// Only items in this warehouse
    pub warehouse_id: Option<i64>,
    /// Only items in this category
    pub category_id: Option<i64>,
    /// Only items at this stock level
    pub stock_level: Option<StockLevel>,
    /// Case-insensitive substring of name or SKU
    pub search: Option<String>,
    /// Result ordering
    pub sort: SortOrder,
}

impl InventoryFilter {
    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

/// Returns true if the item passes the stock-level filter.
///
/// `Low` follows the configured rule and so includes empty items; `Ok` is
/// everything that is not low.
#[must_use]
pub const fn matches_stock_level(
    item: &inventory_item::Model,
    level: StockLevel,
    rule: LowStockRule,
) -> bool {
    let low = stock::is_low_stock(item.current_stock, item.min_stock, rule);
    match level {
        StockLevel::Out => item.current_stock == 0,
        StockLevel::Low => low,
        StockLevel::Ok => !low,
    }
}

fn matches_search(item: &inventory_item::Model, term: &str) -> bool {
    item.name.to_lowercase().contains(term) || item.sku.to_lowercase().contains(term)
}

/// Lists live items matching `filter`.
///
/// Warehouse, category and ordering are applied by the query; the stock level
/// and search term are applied to the fetched rows.
pub async fn list_items(
    db: &DatabaseConnection,
    filter: &InventoryFilter,
    rule: LowStockRule,
) -> Result<Vec<inventory_item::Model>> {
    let mut query = InventoryItem::find().filter(inventory_item::Column::IsDeleted.eq(false));

    if let Some(warehouse_id) = filter.warehouse_id {
        query = query.filter(inventory_item::Column::WarehouseId.eq(warehouse_id));
    }
    if let Some(category_id) = filter.category_id {
        query = query.filter(inventory_item::Column::CategoryId.eq(category_id));
    }

    query = match filter.sort {
        SortOrder::Name => query.order_by_asc(inventory_item::Column::Name),
        SortOrder::Stock => query.order_by_asc(inventory_item::Column::CurrentStock),
        SortOrder::Price => query.order_by_desc(inventory_item::Column::Price),
    };
    let rows = query
        .order_by_asc(inventory_item::Column::Id)
        .all(db)
        .await?;

    let term = filter.search_term();
    let items: Vec<_> = rows
        .into_iter()
        .filter(|item| {
            filter
                .stock_level
                .is_none_or(|level| matches_stock_level(item, level, rule))
        })
        .filter(|item| term.as_deref().is_none_or(|t| matches_search(item, t)))
        .collect();

    tracing::debug!(count = items.len(), ?filter, "Listed inventory items");
    Ok(items)
}

/// Why the list came back empty, checked in order: search, warehouse,
/// category, stock level.
#[must_use]
pub fn empty_state_message(filter: &InventoryFilter) -> &'static str {
    if filter.search_term().is_some() {
        "No items match your search"
    } else if filter.warehouse_id.is_some() {
        "No items in selected warehouse"
    } else if filter.category_id.is_some() {
        "No items in selected category"
    } else if filter.stock_level.is_some() {
        "No items with selected status"
    } else {
        "No items found"
    }
}
