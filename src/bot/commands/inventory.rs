//! Inventory Discord commands - browsing the item list and managing single items.
//!
//! Items are addressed by SKU. Every write goes through `core::item`, which
//! records the matching stock movement and activity log entry.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::choices::{SortChoice, StatusChoice, StockChoice},
            embed::{self, DESCRIPTION_LIMIT, FIELD_LIMIT, TITLE_LIMIT},
            handlers::autocomplete,
        },
        core::{
            category,
            dashboard::format_currency,
            inventory::{self, InventoryFilter},
            item, stock,
            validation::ItemDraft,
            warehouse,
        },
        entities::{InventoryItemModel, ItemStatus},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    fn location_label(item: &InventoryItemModel) -> String {
        if item.floor.is_empty() && item.section.is_empty() {
            "unplaced".to_string()
        } else {
            format!("{}/{}", item.floor, item.section)
        }
    }

    fn stock_badge(item: &InventoryItemModel, rule: stock::LowStockRule) -> &'static str {
        match stock::classify(item.current_stock, item.min_stock, rule) {
            stock::StockLevel::Out => "🔴",
            stock::StockLevel::Low => "🟡",
            stock::StockLevel::Ok => "🟢",
        }
    }

    async fn find_item(
        ctx: poise::Context<'_, BotData, Error>,
        sku: &str,
    ) -> Result<InventoryItemModel> {
        item::get_item_by_sku(&ctx.data().database, sku)
            .await?
            .ok_or_else(|| Error::ItemNotFound {
                id: sku.trim().to_string(),
            })
    }

    /// Browses the inventory with optional filters.
    #[poise::command(slash_command)]
    pub async fn inventory(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Only items in this warehouse"]
        #[autocomplete = "autocomplete::autocomplete_warehouse"]
        warehouse: Option<String>,
        #[description = "Only items in this category"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: Option<String>,
        #[description = "Only items at this stock level"] stock: Option<StockChoice>,
        #[description = "Search by name or SKU"] search: Option<String>,
        #[description = "Sort order (default: name)"] sort: Option<SortChoice>,
    ) -> Result<()> {
        let data = ctx.data();
        let db = &data.database;

        let warehouse_id = match warehouse.as_deref() {
            Some(name) => Some(warehouse::require_warehouse_by_name(db, name).await?.id),
            None => None,
        };
        let category_id = match category.as_deref() {
            Some(name) => Some(category::require_category_by_name(db, name).await?.id),
            None => None,
        };

        let filter = InventoryFilter {
            warehouse_id,
            category_id,
            stock_level: stock.map(Into::into),
            search,
            sort: sort.map(Into::into).unwrap_or_default(),
        };
        let rule = data.settings.low_stock_rule;
        let items = inventory::list_items(db, &filter, rule).await?;

        if items.is_empty() {
            ctx.say(format!("📦 {}", inventory::empty_state_message(&filter)))
                .await?;
            return Ok(());
        }

        let lines: Vec<String> = items
            .iter()
            .take(data.settings.list_limit)
            .map(|it| {
                format!(
                    "{} **{}** `{}` · {} in stock · {} · {}",
                    stock_badge(it, rule),
                    it.name,
                    it.sku,
                    it.current_stock,
                    format_currency(it.price),
                    location_label(it)
                )
            })
            .collect();
        let shown = items.len().min(data.settings.list_limit);
        let footer = if shown < items.len() {
            format!("Showing {shown} of {} items", items.len())
        } else {
            format!("{} items", items.len())
        };

        let embed = serenity::CreateEmbed::default()
            .title("📦 Inventory")
            .color(0x0058_65F2)
            .description(embed::join_lines(&lines, DESCRIPTION_LIMIT, ""))
            .footer(serenity::CreateEmbedFooter::new(footer));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Parent command for managing single inventory items.
    #[poise::command(
        slash_command,
        rename = "item",
        subcommands("item_add", "item_edit", "item_show", "item_adjust", "item_delete")
    )]
    pub async fn item_manage(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Item management command. Available subcommands:\n\
            `/item add` - Add a new item\n\
            `/item edit` - Change an item\n\
            `/item show` - Show item details and history\n\
            `/item adjust` - Set the stock on hand\n\
            `/item delete` - Remove an item";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Adds a new item. A SKU is generated when none is given.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, rename = "add")]
    pub async fn item_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Item name"] name: String,
        #[description = "Category"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: String,
        #[description = "Warehouse"]
        #[autocomplete = "autocomplete::autocomplete_warehouse"]
        warehouse: String,
        #[description = "Unit price (e.g., 12.50)"] price: f64,
        #[description = "Units on hand"] current_stock: i64,
        #[description = "Warn when stock falls to this level"] min_stock: i64,
        #[description = "Floor inside the warehouse"] floor: Option<String>,
        #[description = "Section on the floor"] section: Option<String>,
        #[description = "Description"] description: Option<String>,
        #[description = "Status (default: Active)"] status: Option<StatusChoice>,
        #[description = "SKU (generated when empty)"] sku: Option<String>,
    ) -> Result<()> {
        let draft = ItemDraft {
            name,
            description,
            category,
            warehouse,
            floor,
            section,
            price,
            current_stock,
            min_stock,
            status: status.map_or(ItemStatus::Active, Into::into),
            sku,
        };

        let actor = ctx.author().id.to_string();
        let created = item::create_item(&ctx.data().database, &draft, &actor).await?;

        ctx.say(format!(
            "✅ Added **{}** with SKU `{}` ({} in stock at {} {}).",
            created.name,
            created.sku,
            created.current_stock,
            draft.warehouse.trim(),
            location_label(&created)
        ))
        .await?;
        Ok(())
    }

    /// Changes an item. Only the given fields are replaced.
    #[allow(clippy::too_many_arguments)]
    #[poise::command(slash_command, rename = "edit")]
    pub async fn item_edit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "SKU of the item to edit"]
        #[autocomplete = "autocomplete::autocomplete_sku"]
        sku: String,
        #[description = "New name"] name: Option<String>,
        #[description = "New category"]
        #[autocomplete = "autocomplete::autocomplete_category"]
        category: Option<String>,
        #[description = "New warehouse"]
        #[autocomplete = "autocomplete::autocomplete_warehouse"]
        warehouse: Option<String>,
        #[description = "New floor"] floor: Option<String>,
        #[description = "New section"] section: Option<String>,
        #[description = "New unit price"] price: Option<f64>,
        #[description = "New stock on hand"] current_stock: Option<i64>,
        #[description = "New minimum stock"] min_stock: Option<i64>,
        #[description = "New description"] description: Option<String>,
        #[description = "New status"] status: Option<StatusChoice>,
        #[description = "New SKU"] new_sku: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let existing = find_item(ctx, &sku).await?;
        let details = item::get_item_details(db, existing.id).await?;
        let current = details.item;

        let draft = ItemDraft {
            name: name.unwrap_or_else(|| current.name.clone()),
            description: description.or_else(|| current.description.clone()),
            category: category
                .or_else(|| details.category.map(|c| c.name))
                .unwrap_or_default(),
            warehouse: warehouse
                .or_else(|| details.warehouse.map(|w| w.name))
                .unwrap_or_default(),
            floor: floor.or_else(|| Some(current.floor.clone())),
            section: section.or_else(|| Some(current.section.clone())),
            price: price.unwrap_or(current.price),
            current_stock: current_stock.unwrap_or_else(|| i64::from(current.current_stock)),
            min_stock: min_stock.unwrap_or_else(|| i64::from(current.min_stock)),
            status: status.map_or(current.status, Into::into),
            sku: new_sku,
        };

        let actor = ctx.author().id.to_string();
        let updated = item::update_item(db, current.id, &draft, &actor).await?;

        ctx.say(format!("✅ Updated **{}** (`{}`).", updated.name, updated.sku))
            .await?;
        Ok(())
    }

    /// Shows an item with its stock movements and activity log.
    #[poise::command(slash_command, rename = "show")]
    pub async fn item_show(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "SKU of the item"]
        #[autocomplete = "autocomplete::autocomplete_sku"]
        sku: String,
    ) -> Result<()> {
        let data = ctx.data();
        let found = find_item(ctx, &sku).await?;
        let details = item::get_item_details(&data.database, found.id).await?;
        let it = &details.item;
        let limit = usize::try_from(data.settings.recent_activity_limit)?;

        let movements: Vec<String> = details
            .movements
            .iter()
            .take(limit)
            .map(|m| {
                format!(
                    "`{}` {} **{}** {} · <@{}>",
                    m.timestamp.format("%Y-%m-%d %H:%M"),
                    m.movement_type.label(),
                    stock::format_quantity(m),
                    m.reason.as_deref().unwrap_or(""),
                    m.user_id
                )
            })
            .collect();

        let logs: Vec<String> = details
            .logs
            .iter()
            .take(limit)
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

        let warehouse_name = details.warehouse.map_or_else(String::new, |w| w.name);
        let category_name = details.category.map_or_else(String::new, |c| c.name);

        let title = format!("{} {}", stock_badge(it, data.settings.low_stock_rule), it.name);
        let mut reply = serenity::CreateEmbed::default()
            .title(embed::truncate(&title, TITLE_LIMIT))
            .color(0x0058_65F2)
            .field("SKU", &it.sku, true)
            .field("Status", it.status.label(), true)
            .field("Category", embed::truncate(&category_name, FIELD_LIMIT), true)
            .field("Stock", format!("{} (min {})", it.current_stock, it.min_stock), true)
            .field("Price", format_currency(it.price), true)
            .field(
                "Location",
                embed::truncate(&format!("{warehouse_name} {}", location_label(it)), FIELD_LIMIT),
                true,
            )
            .field(
                "Stock Movements",
                embed::join_lines(&movements, FIELD_LIMIT, "None"),
                false,
            )
            .field("Activity", embed::join_lines(&logs, FIELD_LIMIT, "None"), false)
            .footer(serenity::CreateEmbedFooter::new(format!(
                "Last updated {} by {}",
                it.updated_at.format("%Y-%m-%d %H:%M"),
                it.updated_by
            )));
        if let Some(description) = &it.description {
            reply = reply.description(embed::truncate(description, FIELD_LIMIT));
        }

        ctx.send(poise::CreateReply::default().embed(reply)).await?;
        Ok(())
    }

    /// Sets the stock on hand, recording the difference as a movement.
    #[poise::command(slash_command, rename = "adjust")]
    pub async fn item_adjust(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "SKU of the item"]
        #[autocomplete = "autocomplete::autocomplete_sku"]
        sku: String,
        #[description = "New stock on hand"] new_stock: i64,
        #[description = "Reason (default: Manual adjustment)"] reason: Option<String>,
    ) -> Result<()> {
        let found = find_item(ctx, &sku).await?;
        let actor = ctx.author().id.to_string();
        let result =
            item::adjust_stock(&ctx.data().database, found.id, new_stock, reason, &actor).await?;

        let message = match &result.movement {
            Some(movement) => format!(
                "✅ Stock of **{}** updated from {} to {} ({}).",
                result.item.name,
                result.old_stock,
                result.item.current_stock,
                stock::format_quantity(movement)
            ),
            None => format!(
                "ℹ️ Stock of **{}** is already {}. Nothing changed.",
                result.item.name, result.item.current_stock
            ),
        };
        ctx.say(message).await?;
        Ok(())
    }

    /// Removes an item. Its history is kept.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn item_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "SKU of the item to delete"]
        #[autocomplete = "autocomplete::autocomplete_sku"]
        sku: String,
        #[description = "Confirm the deletion"] confirm: bool,
    ) -> Result<()> {
        let found = find_item(ctx, &sku).await?;
        if !confirm {
            ctx.say(format!(
                "⚠️ Are you sure you want to delete **{}**? Run the command again with `confirm: True`.",
                found.name
            ))
            .await?;
            return Ok(());
        }

        let actor = ctx.author().id.to_string();
        let deleted = item::delete_item(&ctx.data().database, found.id, &actor).await?;
        ctx.say(format!("🗑️ Deleted **{}** (`{}`).", deleted.name, deleted.sku))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
