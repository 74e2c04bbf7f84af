//! Dashboard Discord commands - overview, low-stock list, and activity feed.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            embed::{self, DESCRIPTION_LIMIT, FIELD_LIMIT},
            handlers::autocomplete,
        },
        core::{
            activity,
            dashboard::{self, format_currency},
            warehouse,
        },
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Resolves the optional warehouse parameter into (id, label).
    async fn warehouse_scope(
        ctx: poise::Context<'_, BotData, Error>,
        name: Option<&str>,
    ) -> Result<(Option<i64>, String)> {
        match name {
            Some(name) => {
                let wh = warehouse::require_warehouse_by_name(&ctx.data().database, name).await?;
                Ok((Some(wh.id), wh.name))
            }
            None => Ok((None, "All Warehouses".to_string())),
        }
    }

    /// Shows inventory totals, low-stock alerts and the latest stock changes.
    #[allow(clippy::too_many_lines)]
    #[poise::command(slash_command)]
    pub async fn dashboard(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Only show this warehouse"]
        #[autocomplete = "autocomplete::autocomplete_warehouse"]
        warehouse: Option<String>,
    ) -> Result<()> {
        ctx.defer().await?;

        let data = ctx.data();
        let db = &data.database;
        let rule = data.settings.low_stock_rule;
        let (warehouse_id, scope) = warehouse_scope(ctx, warehouse.as_deref()).await?;

        let stats = dashboard::get_dashboard_stats(db, warehouse_id, rule).await?;
        let low_stock = dashboard::get_low_stock_items(db, warehouse_id, rule).await?;
        let updates =
            dashboard::get_recent_updates(db, data.settings.recent_activity_limit).await?;

        let low_stock_label = if stats.low_stock_count > 0 {
            format!("⚠️ {}", stats.low_stock_count)
        } else {
            stats.low_stock_count.to_string()
        };

        let categories: Vec<String> = stats
            .category_distribution
            .iter()
            .map(|(name, count)| format!("{name}: {count}"))
            .collect();

        let low_stock_lines: Vec<String> = low_stock
            .iter()
            .take(data.settings.list_limit)
            .map(|item| {
                format!(
                    "**{}** ({}) - {} / min {} · {}",
                    item.name, item.sku, item.current_stock, item.min_stock, item.warehouse_name
                )
            })
            .collect();

        let update_lines: Vec<String> = updates
            .iter()
            .map(|update| {
                format!(
                    "{} **{}** {} · <@{}> · {}",
                    update.action.label(),
                    update.quantity,
                    update.item_name,
                    update.updated_by,
                    update.timestamp.format("%Y-%m-%d %H:%M")
                )
            })
            .collect();

        let embed = serenity::CreateEmbed::default()
            .title("📊 Inventory Dashboard")
            .description(embed::truncate(&scope, DESCRIPTION_LIMIT))
            .color(0x0034_98DB)
            .field("Total Items", stats.total_items.to_string(), true)
            .field("Total Value", format_currency(stats.total_value), true)
            .field("Low Stock Items", low_stock_label, true)
            .field("Warehouses", stats.warehouse_count.to_string(), true)
            .field(
                "Categories",
                embed::join_lines(&categories, FIELD_LIMIT, "No active items"),
                false,
            )
            .field(
                "Low Stock",
                embed::join_lines(&low_stock_lines, FIELD_LIMIT, "No items are low on stock 🎉"),
                false,
            )
            .field(
                "Recent Updates",
                embed::join_lines(&update_lines, FIELD_LIMIT, "No stock changes yet"),
                false,
            );

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Lists active items that are at or below their minimum stock.
    #[poise::command(slash_command)]
    pub async fn low_stock(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Only show this warehouse"]
        #[autocomplete = "autocomplete::autocomplete_warehouse"]
        warehouse: Option<String>,
    ) -> Result<()> {
        let data = ctx.data();
        let (warehouse_id, scope) = warehouse_scope(ctx, warehouse.as_deref()).await?;
        let items = dashboard::get_low_stock_items(
            &data.database,
            warehouse_id,
            data.settings.low_stock_rule,
        )
        .await?;

        if items.is_empty() {
            ctx.say(format!("✅ No items are low on stock in {scope}."))
                .await?;
            return Ok(());
        }

        let lines: Vec<String> = items
            .iter()
            .take(data.settings.list_limit)
            .map(|item| {
                let location = if item.floor.is_empty() {
                    "unplaced".to_string()
                } else {
                    format!("{}/{}", item.floor, item.section)
                };
                format!(
                    "**{}** `{}` · {} / min {} · {} {location}",
                    item.name, item.sku, item.current_stock, item.min_stock, item.warehouse_name
                )
            })
            .collect();

        let embed = serenity::CreateEmbed::default()
            .title(embed::truncate(&format!("⚠️ Low Stock · {scope}"), embed::TITLE_LIMIT))
            .color(0x00E7_4C3C)
            .description(embed::join_lines(&lines, DESCRIPTION_LIMIT, ""))
            .footer(serenity::CreateEmbedFooter::new(format!(
                "{} item{}",
                items.len(),
                if items.len() == 1 { "" } else { "s" }
            )));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Shows the latest item changes across the inventory.
    #[poise::command(slash_command, check = "crate::bot::reports_check")]
    pub async fn activity(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let data = ctx.data();
        let entries =
            activity::get_recent_activity(&data.database, data.settings.recent_activity_limit)
                .await?;

        if entries.is_empty() {
            ctx.say("No activity recorded yet.").await?;
            return Ok(());
        }

        let lines: Vec<String> = entries
            .iter()
            .map(|entry| {
                format!(
                    "`{}` **{}** {} · <@{}>",
                    entry.timestamp.format("%Y-%m-%d %H:%M"),
                    entry.action_type.label(),
                    entry.details,
                    entry.user_id
                )
            })
            .collect();

        let embed = serenity::CreateEmbed::default()
            .title("🗒️ Recent Activity")
            .color(0x0034_98DB)
            .description(embed::join_lines(&lines, DESCRIPTION_LIMIT, ""));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
