//! General Discord commands - ping, help, and the caller's profile.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, current_user},
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**WareWise Help**\n\
        Here is a summary of all available commands for WareWise.\n\n\
        **Overview**\n\
        • `/dashboard [warehouse]` - Totals, low-stock alerts and recent stock changes.\n\
        • `/low_stock [warehouse]` - Items at or below their minimum stock.\n\
        • `/inventory [warehouse] [category] [stock] [search] [sort]` - Browse items.\n\
        • `/activity` - Latest item changes (admins).\n\n\
        **Items**\n\
        • `/item add <name> <category> <warehouse> <price> <stock> <min_stock> ...` - Add an item.\n\
        • `/item edit <sku> ...` - Change any item field.\n\
        • `/item show <sku>` - Item details, stock movements and activity.\n\
        • `/item adjust <sku> <new_stock> [reason]` - Set the stock on hand.\n\
        • `/item delete <sku> <confirm>` - Remove an item.\n\n\
        **Setup**\n\
        • `/warehouse list|layout|add|add_section` - Warehouses and their floors/sections.\n\
        • `/category list|add` - Item categories.\n\
        • `/user list|add|edit|activate|deactivate` - Accounts (admins).\n\n\
        **Utility**\n\
        • `/profile` - Your account and permissions.\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Shows your WareWise account.
    #[poise::command(slash_command)]
    pub async fn profile(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let account = current_user(ctx).await?;

        let yes_no = |allowed: bool| if allowed { "✅" } else { "❌" };
        let last_login = account
            .last_login
            .map_or_else(|| "Never".to_string(), |t| t.format("%Y-%m-%d %H:%M UTC").to_string());
        let permissions = format!(
            "{} Edit inventory\n{} View reports\n{} Manage users",
            yes_no(account.role.can_edit_inventory()),
            yes_no(account.role.can_view_reports()),
            yes_no(account.role.can_manage_users()),
        );

        let embed = serenity::CreateEmbed::default()
            .title(format!("👤 {}", ctx.author().name))
            .color(0x0034_98DB)
            .field("Email", &account.email, true)
            .field("Role", account.role.label(), true)
            .field("Last login", last_login, true)
            .field("Permissions", permissions, false);

        ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
