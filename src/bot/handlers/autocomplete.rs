//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggestions come straight from the database so that warehouse, category and
//! SKU parameters match stored values exactly. Lookup failures yield no
//! suggestions rather than an error.

use crate::{
    bot::BotData,
    core::{category, inventory, warehouse},
    errors::Error,
};

/// Discord's limit on autocomplete suggestions
const MAX_SUGGESTIONS: usize = 25;

fn matching_names(names: impl IntoIterator<Item = String>, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    names
        .into_iter()
        .filter(|name| name.to_lowercase().contains(&partial_lower))
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Suggests warehouse names containing `partial`.
pub async fn autocomplete_warehouse(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let Ok(warehouses) = warehouse::get_all_warehouses(&ctx.data().database).await else {
        return Vec::new();
    };
    matching_names(warehouses.into_iter().map(|w| w.name), partial)
}

/// Suggests category names containing `partial`.
pub async fn autocomplete_category(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let Ok(categories) = category::get_all_categories(&ctx.data().database).await else {
        return Vec::new();
    };
    matching_names(categories.into_iter().map(|c| c.name), partial)
}

/// Suggests SKUs of live items whose name or SKU contains `partial`.
pub async fn autocomplete_sku(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let data = ctx.data();
    let filter = inventory::InventoryFilter {
        search: Some(partial.to_string()),
        ..Default::default()
    };
    let Ok(items) =
        inventory::list_items(&data.database, &filter, data.settings.low_stock_rule).await
    else {
        return Vec::new();
    };
    items
        .into_iter()
        .map(|item| item.sku)
        .take(MAX_SUGGESTIONS)
        .collect()
}
