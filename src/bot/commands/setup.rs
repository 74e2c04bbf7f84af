//! Setup Discord commands - warehouses, their layouts, and item categories.
//!
//! Anyone can list; only admins can add.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            embed::{self, DESCRIPTION_LIMIT, TITLE_LIMIT},
            handlers::autocomplete,
        },
        core::{category, warehouse},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Parent command for warehouses.
    #[poise::command(
        slash_command,
        rename = "warehouse",
        subcommands(
            "warehouse_list",
            "warehouse_layout",
            "warehouse_add",
            "warehouse_add_section"
        )
    )]
    pub async fn warehouse_manage(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Warehouse command. Available subcommands:\n\
            `/warehouse list` - List warehouses\n\
            `/warehouse layout` - Show floors and sections\n\
            `/warehouse add` - Add a warehouse (admins)\n\
            `/warehouse add_section` - Add a floor/section (admins)";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Lists all warehouses.
    #[poise::command(slash_command, rename = "list")]
    pub async fn warehouse_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let warehouses = warehouse::get_all_warehouses(&ctx.data().database).await?;

        if warehouses.is_empty() {
            ctx.say("No warehouses yet. An admin can add one with `/warehouse add`.")
                .await?;
            return Ok(());
        }

        let lines: Vec<String> = warehouses
            .iter()
            .map(|w| match &w.address {
                Some(address) => format!("**{}** · {} · {address}", w.name, w.location),
                None => format!("**{}** · {}", w.name, w.location),
            })
            .collect();
        let embed = serenity::CreateEmbed::default()
            .title("🏭 Warehouses")
            .color(0x0058_65F2)
            .description(embed::join_lines(&lines, DESCRIPTION_LIMIT, ""));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Shows the floors and sections of a warehouse.
    #[poise::command(slash_command, rename = "layout")]
    pub async fn warehouse_layout(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Warehouse"]
        #[autocomplete = "autocomplete::autocomplete_warehouse"]
        name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let wh = warehouse::require_warehouse_by_name(db, &name).await?;
        let layout = warehouse::get_layout(db, wh.id).await?;

        let lines: Vec<String> = layout
            .iter()
            .map(|(floor, sections)| format!("**{floor}:** {}", sections.join(", ")))
            .collect();

        let embed = serenity::CreateEmbed::default()
            .title(embed::truncate(&format!("🗺️ {} layout", wh.name), TITLE_LIMIT))
            .color(0x0058_65F2)
            .description(embed::join_lines(
                &lines,
                DESCRIPTION_LIMIT,
                "No floors or sections defined.",
            ));
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Adds a warehouse.
    #[poise::command(
        slash_command,
        rename = "add",
        check = "crate::bot::admin_check"
    )]
    pub async fn warehouse_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Unique warehouse name"] name: String,
        #[description = "Short location label"] location: String,
        #[description = "Postal address"] address: Option<String>,
    ) -> Result<()> {
        let wh = warehouse::create_warehouse(&ctx.data().database, &name, &location, address)
            .await?;
        ctx.say(format!(
            "✅ Added warehouse **{}**. Add floors and sections with `/warehouse add_section`.",
            wh.name
        ))
        .await?;
        Ok(())
    }

    /// Adds a floor/section slot to a warehouse.
    #[poise::command(
        slash_command,
        rename = "add_section",
        check = "crate::bot::admin_check"
    )]
    pub async fn warehouse_add_section(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Warehouse"]
        #[autocomplete = "autocomplete::autocomplete_warehouse"]
        name: String,
        #[description = "Floor (e.g., Ground)"] floor: String,
        #[description = "Section (e.g., A)"] section: String,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let wh = warehouse::require_warehouse_by_name(db, &name).await?;
        let slot = warehouse::add_section(db, wh.id, &floor, &section).await?;
        ctx.say(format!("✅ **{}** now has {}/{}.", wh.name, slot.floor, slot.section))
            .await?;
        Ok(())
    }

    /// Parent command for categories.
    #[poise::command(
        slash_command,
        rename = "category",
        subcommands("category_list", "category_add")
    )]
    pub async fn category_manage(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Category command. Available subcommands:\n\
            `/category list` - List categories\n\
            `/category add` - Add a category (admins)";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Lists all categories.
    #[poise::command(slash_command, rename = "list")]
    pub async fn category_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let categories = category::get_all_categories(&ctx.data().database).await?;

        if categories.is_empty() {
            ctx.say("No categories yet. An admin can add one with `/category add`.")
                .await?;
            return Ok(());
        }

        let lines: Vec<String> = categories
            .iter()
            .map(|c| match &c.description {
                Some(d) => format!("**{}** - {d}", c.name),
                None => format!("**{}**", c.name),
            })
            .collect();

        let embed = serenity::CreateEmbed::default()
            .title("🏷️ Categories")
            .color(0x0058_65F2)
            .description(embed::join_lines(&lines, DESCRIPTION_LIMIT, ""));
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Adds a category.
    #[poise::command(
        slash_command,
        rename = "add",
        check = "crate::bot::admin_check"
    )]
    pub async fn category_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Unique category name"] name: String,
        #[description = "Description"] description: Option<String>,
    ) -> Result<()> {
        let created = category::create_category(&ctx.data().database, &name, description).await?;
        ctx.say(format!("✅ Added category **{}**.", created.name))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
