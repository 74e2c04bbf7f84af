//! Stock business logic - Low-stock rules and the stock movement ledger.
//!
//! Movements are append-only: this module only ever inserts and reads them.

use crate::{
    entities::{MovementType, StockMovement, stock_movement},
    errors::Result,
};
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*};
use serde::Deserialize;

/// How current stock is compared against the configured minimum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LowStockRule {
    /// Low when `current < min`
    Below,
    /// Low when `current <= min`
    #[default]
    AtOrBelow,
}

/// Stock health of a single item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockLevel {
    /// Nothing on hand
    Out,
    /// At or below the minimum, per the active rule
    Low,
    /// Comfortably stocked
    Ok,
}

/// Returns true if an item with these values counts as low stock.
#[must_use]
pub const fn is_low_stock(current_stock: i32, min_stock: i32, rule: LowStockRule) -> bool {
    match rule {
        LowStockRule::Below => current_stock < min_stock,
        LowStockRule::AtOrBelow => current_stock <= min_stock,
    }
}

/// Classifies an item's stock. `Out` wins over `Low`.
#[must_use]
pub const fn classify(current_stock: i32, min_stock: i32, rule: LowStockRule) -> StockLevel {
    if current_stock == 0 {
        StockLevel::Out
    } else if is_low_stock(current_stock, min_stock, rule) {
        StockLevel::Low
    } else {
        StockLevel::Ok
    }
}

impl MovementType {
    /// Movement type for a non-initial stock change.
    ///
    /// Zero is treated as a decrease; callers skip zero deltas before recording.
    #[must_use]
    pub const fn from_delta(delta: i32) -> Self {
        if delta > 0 {
            Self::Increase
        } else {
            Self::Decrease
        }
    }

    /// Label as stored in the database
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Initial => "INITIAL",
            Self::Increase => "INCREASE",
            Self::Decrease => "DECREASE",
        }
    }
}

/// Appends a movement row. Works inside a transaction.
pub async fn record_movement<C>(
    db: &C,
    item_id: i64,
    warehouse_id: i64,
    quantity: i32,
    movement_type: MovementType,
    reason: Option<String>,
    user_id: &str,
) -> Result<stock_movement::Model>
where
    C: ConnectionTrait,
{
    let movement = stock_movement::ActiveModel {
        item_id: Set(item_id),
        warehouse_id: Set(warehouse_id),
        quantity: Set(quantity),
        movement_type: Set(movement_type),
        reason: Set(reason),
        user_id: Set(user_id.to_string()),
        timestamp: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = movement.insert(db).await?;
    tracing::debug!(
        item_id,
        quantity,
        movement_type = movement_type.label(),
        "Recorded stock movement"
    );
    Ok(result)
}

/// Retrieves all movements for an item, newest first.
pub async fn get_movements_for_item(
    db: &DatabaseConnection,
    item_id: i64,
) -> Result<Vec<stock_movement::Model>> {
    StockMovement::find()
        .filter(stock_movement::Column::ItemId.eq(item_id))
        .order_by_desc(stock_movement::Column::Timestamp)
        .order_by_desc(stock_movement::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the most recent movements across all items, newest first.
pub async fn get_recent_movements(
    db: &DatabaseConnection,
    limit: u64,
) -> Result<Vec<stock_movement::Model>> {
    StockMovement::find()
        .order_by_desc(stock_movement::Column::Timestamp)
        .order_by_desc(stock_movement::Column::Id)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Formats a signed movement quantity, e.g. `+5` or `-3`.
#[must_use]
pub fn format_quantity(movement: &stock_movement::Model) -> String {
    match movement.movement_type {
        MovementType::Initial => format!("{}", movement.quantity),
        _ if movement.quantity >= 0 => format!("+{}", movement.quantity),
        _ => format!("{}", movement.quantity),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_low_stock_rules_disagree_only_at_threshold() {
        assert!(is_low_stock(4, 5, LowStockRule::Below));
        assert!(is_low_stock(4, 5, LowStockRule::AtOrBelow));

        assert!(!is_low_stock(5, 5, LowStockRule::Below));
        assert!(is_low_stock(5, 5, LowStockRule::AtOrBelow));

        assert!(!is_low_stock(6, 5, LowStockRule::Below));
        assert!(!is_low_stock(6, 5, LowStockRule::AtOrBelow));
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify(0, 0, LowStockRule::Below), StockLevel::Out);
        assert_eq!(classify(0, 5, LowStockRule::AtOrBelow), StockLevel::Out);
        assert_eq!(classify(3, 5, LowStockRule::AtOrBelow), StockLevel::Low);
        assert_eq!(classify(10, 5, LowStockRule::AtOrBelow), StockLevel::Ok);
    }

    #[test]
    fn test_movement_type_from_delta() {
        assert_eq!(MovementType::from_delta(5), MovementType::Increase);
        assert_eq!(MovementType::from_delta(-2), MovementType::Decrease);
    }

    #[tokio::test]
    async fn test_movements_are_returned_newest_first() -> Result<()> {
        let (db, item) = setup_with_item().await?;

        record_movement(
            &db,
            item.id,
            item.warehouse_id,
            5,
            MovementType::Increase,
            Some("Delivery".to_string()),
            "user1",
        )
        .await?;
        record_movement(
            &db,
            item.id,
            item.warehouse_id,
            -2,
            MovementType::Decrease,
            None,
            "user2",
        )
        .await?;

        let movements = get_movements_for_item(&db, item.id).await?;
        // INITIAL from item creation plus the two above
        assert_eq!(movements.len(), 3);
        assert_eq!(movements[0].quantity, -2);
        assert_eq!(movements[1].quantity, 5);
        assert_eq!(movements[2].movement_type, MovementType::Initial);

        assert_eq!(format_quantity(&movements[0]), "-2");
        assert_eq!(format_quantity(&movements[1]), "+5");

        Ok(())
    }

    #[tokio::test]
    async fn test_recent_movements_respects_limit() -> Result<()> {
        let (db, item) = setup_with_item().await?;
        for _ in 0..4 {
            record_movement(
                &db,
                item.id,
                item.warehouse_id,
                1,
                MovementType::Increase,
                None,
                "user1",
            )
            .await?;
        }

        let recent = get_recent_movements(&db, 3).await?;
        assert_eq!(recent.len(), 3);
        Ok(())
    }
}
