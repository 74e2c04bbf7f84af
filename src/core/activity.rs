//! Activity log business logic - The append-only audit trail for items.

use crate::{
    entities::{ActivityLog, ActivityType, activity_log},
    errors::Result,
};
use sea_orm::{QueryOrder, QuerySelect, Set, prelude::*};

impl ActivityType {
    /// Label as stored in the database
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::StockUpdate => "STOCK_UPDATE",
        }
    }
}

/// A new log entry, before it is written.
#[derive(Debug, Clone)]
pub struct NewActivity {
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
}

/// Appends a log entry. Works inside a transaction.
pub async fn log_activity<C>(db: &C, entry: NewActivity) -> Result<activity_log::Model>
where
    C: ConnectionTrait,
{
    let action = entry.action_type;
    let model = activity_log::ActiveModel {
        item_id: Set(entry.item_id),
        user_id: Set(entry.user_id),
        action_type: Set(entry.action_type),
        old_value: Set(entry.old_value),
        new_value: Set(entry.new_value),
        details: Set(entry.details),
        timestamp: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = model.insert(db).await?;
    tracing::debug!(item_id = result.item_id, action = action.label(), "Logged activity");
    Ok(result)
}

/// Retrieves the log for one item, newest first.
pub async fn get_logs_for_item(
    db: &DatabaseConnection,
    item_id: i64,
) -> Result<Vec<activity_log::Model>> {
    ActivityLog::find()
        .filter(activity_log::Column::ItemId.eq(item_id))
        .order_by_desc(activity_log::Column::Timestamp)
        .order_by_desc(activity_log::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the latest entries across all items, newest first.
pub async fn get_recent_activity(
    db: &DatabaseConnection,
    limit: u64,
) -> Result<Vec<activity_log::Model>> {
    ActivityLog::find()
        .order_by_desc(activity_log::Column::Timestamp)
        .order_by_desc(activity_log::Column::Id)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_log_and_read_back() -> Result<()> {
        let (db, item) = setup_with_item().await?;

        log_activity(
            &db,
            NewActivity {
                item_id: item.id,
                user_id: "user1".to_string(),
                action_type: ActivityType::StockUpdate,
                old_value: Some("10".to_string()),
                new_value: Some("12".to_string()),
                details: "Stock updated from 10 to 12".to_string(),
            },
        )
        .await?;

        let logs = get_logs_for_item(&db, item.id).await?;
        // CREATE from item creation plus the entry above
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].action_type, ActivityType::StockUpdate);
        assert_eq!(logs[0].old_value.as_deref(), Some("10"));
        assert_eq!(logs[1].action_type, ActivityType::Create);

        let recent = get_recent_activity(&db, 1).await?;
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, logs[0].id);

        Ok(())
    }
}
