//! Dashboard business logic - Summary statistics, low-stock alerts and recent updates.
//!
//! Statistics only count Active, non-deleted items. All functions take an optional
//! warehouse to restrict the view to; `None` means all warehouses.

use crate::{
    core::stock::{self, LowStockRule},
    entities::{InventoryItem, ItemStatus, Warehouse, inventory_item},
    errors::Result,
};
use sea_orm::{PaginatorTrait, QueryOrder, prelude::*};
use std::collections::{BTreeMap, HashMap};

/// Headline numbers shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardStats {
    /// Number of active items
    pub total_items: u64,
    /// Sum of price × current stock
    pub total_value: f64,
    /// Active items at or below their minimum, per the configured rule
    pub low_stock_count: u64,
    /// Warehouses in view
    pub warehouse_count: u64,
    /// Category name → number of active items
    pub category_distribution: BTreeMap<String, u64>,
}

/// One row of the low-stock list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LowStockItem {
    /// Item ID
    pub id: i64,
    /// Item name
    pub name: String,
    /// Units on hand
    pub current_stock: i32,
    /// Configured minimum
    pub min_stock: i32,
    /// Name of the warehouse holding the item
    pub warehouse_name: String,
    /// Floor, possibly empty
    pub floor: String,
    /// Section, possibly empty
    pub section: String,
    /// Stock-keeping unit
    pub sku: String,
}

/// What a stock movement did, from the reader's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateAction {
    /// Units came in
    Added,
    /// Units went out
    Removed,
    /// Recorded without a change in quantity
    Updated,
}

impl UpdateAction {
    /// Action for a signed movement quantity.
    #[must_use]
    pub const fn from_quantity(quantity: i32) -> Self {
        if quantity > 0 {
            Self::Added
        } else if quantity < 0 {
            Self::Removed
        } else {
            Self::Updated
        }
    }

    /// Display label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Added => "Added",
            Self::Removed => "Removed",
            Self::Updated => "Updated",
        }
    }
}

/// One row of the recent updates feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentUpdate {
    /// Item ID
    pub item_id: i64,
    /// Item name at the time of reading
    pub item_name: String,
    /// Added/Removed/Updated
    pub action: UpdateAction,
    /// Absolute number of units moved
    pub quantity: i32,
    /// When the movement happened
    pub timestamp: DateTimeUtc,
    /// Discord user ID of the actor
    pub updated_by: String,
}

async fn active_items(
    db: &DatabaseConnection,
    warehouse_id: Option<i64>,
) -> Result<Vec<inventory_item::Model>> {
    let mut query = InventoryItem::find()
        .filter(inventory_item::Column::Status.eq(ItemStatus::Active))
        .filter(inventory_item::Column::IsDeleted.eq(false));
    if let Some(id) = warehouse_id {
        query = query.filter(inventory_item::Column::WarehouseId.eq(id));
    }
    query
        .order_by_asc(inventory_item::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Computes the dashboard statistics.
pub async fn get_dashboard_stats(
    db: &DatabaseConnection,
    warehouse_id: Option<i64>,
    rule: LowStockRule,
) -> Result<DashboardStats> {
    let items = active_items(db, warehouse_id).await?;

    let warehouse_count = match warehouse_id {
        Some(id) => Warehouse::find_by_id(id).count(db).await?,
        None => Warehouse::find().count(db).await?,
    };

    let category_names: HashMap<i64, String> = crate::core::category::get_all_categories(db)
        .await?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    let mut stats = DashboardStats {
        warehouse_count,
        ..Default::default()
    };
    for item in &items {
        stats.total_items += 1;
        stats.total_value += item.price * f64::from(item.current_stock);
        if stock::is_low_stock(item.current_stock, item.min_stock, rule) {
            stats.low_stock_count += 1;
        }
        let category = category_names
            .get(&item.category_id)
            .cloned()
            .unwrap_or_else(|| "Uncategorized".to_string());
        *stats.category_distribution.entry(category).or_default() += 1;
    }

    tracing::debug!(
        ?warehouse_id,
        total_items = stats.total_items,
        low_stock = stats.low_stock_count,
        "Computed dashboard stats"
    );
    Ok(stats)
}

/// Lists active items that are low on stock, emptiest first.
pub async fn get_low_stock_items(
    db: &DatabaseConnection,
    warehouse_id: Option<i64>,
    rule: LowStockRule,
) -> Result<Vec<LowStockItem>> {
    let warehouse_names: HashMap<i64, String> = crate::core::warehouse::get_all_warehouses(db)
        .await?
        .into_iter()
        .map(|w| (w.id, w.name))
        .collect();

    let mut low: Vec<LowStockItem> = active_items(db, warehouse_id)
        .await?
        .into_iter()
        .filter(|item| stock::is_low_stock(item.current_stock, item.min_stock, rule))
        .map(|item| LowStockItem {
            warehouse_name: warehouse_names
                .get(&item.warehouse_id)
                .cloned()
                .unwrap_or_default(),
            id: item.id,
            name: item.name,
            current_stock: item.current_stock,
            min_stock: item.min_stock,
            floor: item.floor,
            section: item.section,
            sku: item.sku,
        })
        .collect();

    // Stable sort keeps the name order within equal stock
    low.sort_by_key(|item| item.current_stock);
    Ok(low)
}

/// The latest stock movements, newest first, with item names resolved.
pub async fn get_recent_updates(db: &DatabaseConnection, limit: u64) -> Result<Vec<RecentUpdate>> {
    let movements = stock::get_recent_movements(db, limit).await?;

    let item_ids: Vec<i64> = movements.iter().map(|m| m.item_id).collect();
    let names: HashMap<i64, String> = InventoryItem::find()
        .filter(inventory_item::Column::Id.is_in(item_ids))
        .all(db)
        .await?
        .into_iter()
        .map(|i| (i.id, i.name))
        .collect();

    Ok(movements
        .into_iter()
        .map(|m| RecentUpdate {
            item_name: names
                .get(&m.item_id)
                .cloned()
                .unwrap_or_else(|| "Unknown Item".to_string()),
            item_id: m.item_id,
            action: UpdateAction::from_quantity(m.quantity),
            quantity: m.quantity.abs(),
            timestamp: m.timestamp,
            updated_by: m.user_id,
        })
        .collect())
}

/// Formats an amount as US dollars with thousands separators, e.g. `$1,234.50`.
#[must_use]
pub fn format_currency(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{
        core::{category, item},
        test_utils::*,
    };

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(5.5), "$5.50");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(1_234_567.891), "$1,234,567.89");
        assert_eq!(format_currency(-42.1), "-$42.10");
    }

    #[test]
    fn test_update_action_from_quantity() {
        assert_eq!(UpdateAction::from_quantity(4), UpdateAction::Added);
        assert_eq!(UpdateAction::from_quantity(-4), UpdateAction::Removed);
        assert_eq!(UpdateAction::from_quantity(0), UpdateAction::Updated);
    }

    #[tokio::test]
    async fn test_stats_count_only_active_items() -> Result<()> {
        let (db, _wh) = setup_with_warehouse().await?;
        category::create_category(&db, "Tools", None).await?;

        // 10 × 2.5 = 25.0, not low
        create_test_item(&db, "Tape", 10, 2).await?;
        // 2 × 2.5 = 5.0, low under both rules
        create_test_item(&db, "Glue", 2, 5).await?;

        let mut draft = test_draft("Hammer");
        draft.category = "Tools".to_string();
        draft.current_stock = 4;
        draft.price = 10.0;
        // 4 × 10 = 40.0, exactly at minimum
        draft.min_stock = 4;
        item::create_item(&db, &draft, "user1").await?;

        let mut retired = test_draft("Old Stapler");
        retired.status = ItemStatus::Discontinued;
        retired.current_stock = 0;
        item::create_item(&db, &retired, "user1").await?;

        let stats = get_dashboard_stats(&db, None, LowStockRule::AtOrBelow).await?;
        assert_eq!(stats.total_items, 3);
        assert_eq!(stats.total_value, 70.0);
        assert_eq!(stats.low_stock_count, 2);
        assert_eq!(stats.warehouse_count, 1);
        assert_eq!(stats.category_distribution["General"], 2);
        assert_eq!(stats.category_distribution["Tools"], 1);

        let strict = get_dashboard_stats(&db, None, LowStockRule::Below).await?;
        assert_eq!(strict.low_stock_count, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_stats_for_one_warehouse() -> Result<()> {
        let (db, _wh) = setup_with_warehouse().await?;
        create_test_item(&db, "Tape", 10, 2).await?;
        let other = create_test_warehouse(&db, "Overflow").await?;

        let stats = get_dashboard_stats(&db, Some(other.id), LowStockRule::AtOrBelow).await?;
        assert_eq!(stats.total_items, 0);
        assert_eq!(stats.total_value, 0.0);
        assert_eq!(stats.warehouse_count, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_low_stock_items() -> Result<()> {
        let (db, _wh) = setup_with_warehouse().await?;
        create_test_item(&db, "Tape", 10, 2).await?;
        create_test_item(&db, "Glue", 2, 5).await?;
        create_test_item(&db, "Labels", 0, 5).await?;

        let low = get_low_stock_items(&db, None, LowStockRule::AtOrBelow).await?;
        assert_eq!(low.len(), 2);
        assert_eq!(low[0].name, "Labels");
        assert_eq!(low[1].name, "Glue");
        assert_eq!(low[1].warehouse_name, TEST_WAREHOUSE);
        assert_eq!(low[1].floor, "Ground");
        assert_eq!(low[1].section, "A");
        Ok(())
    }

    #[tokio::test]
    async fn test_recent_updates_from_movements() -> Result<()> {
        let (db, tape) = setup_with_item().await?;
        item::adjust_stock(&db, tape.id, 4, None, "user2").await?;

        let updates = get_recent_updates(&db, 10).await?;
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].action, UpdateAction::Removed);
        assert_eq!(updates[0].quantity, 6);
        assert_eq!(updates[0].updated_by, "user2");
        assert_eq!(updates[0].item_name, tape.name);
        assert_eq!(updates[1].action, UpdateAction::Added);
        assert_eq!(updates[1].quantity, 10);

        let limited = get_recent_updates(&db, 1).await?;
        assert_eq!(limited.len(), 1);
        Ok(())
    }
}
