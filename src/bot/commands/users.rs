//! User management Discord commands - admin-only account administration.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::choices::RoleChoice,
            current_user,
            embed::{self, DESCRIPTION_LIMIT},
        },
        core::user::{self, UserFilter, UserUpdate},
        entities::Role,
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Parent command for account management. Admins only.
    #[poise::command(
        slash_command,
        rename = "user",
        check = "crate::bot::admin_check",
        subcommands(
            "user_list",
            "user_add",
            "user_edit",
            "user_activate",
            "user_deactivate"
        )
    )]
    pub async fn user_manage(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "User management command. Available subcommands:\n\
            `/user list` - List accounts\n\
            `/user add` - Register a Discord user\n\
            `/user edit` - Change e-mail, role or status\n\
            `/user activate` - Allow sign-in\n\
            `/user deactivate` - Block sign-in";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Lists accounts, newest first.
    #[poise::command(
        slash_command,
        rename = "list",
        check = "crate::bot::admin_check"
    )]
    pub async fn user_list(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Only this role"] role: Option<RoleChoice>,
        #[description = "Search by e-mail"] search: Option<String>,
    ) -> Result<()> {
        let data = ctx.data();
        let filter = UserFilter {
            role: role.map(Into::into),
            search,
        };
        let users = user::list_users(&data.database, &filter).await?;
        let stats = user::user_stats(&data.database).await?;

        let lines: Vec<String> = users
            .iter()
            .take(data.settings.list_limit)
            .map(|account| {
                let status = if account.is_active { "🟢" } else { "⚪" };
                let last_login = account
                    .last_login
                    .map_or_else(|| "never".to_string(), |t| t.format("%Y-%m-%d").to_string());
                format!(
                    "{status} <@{}> {} · **{}** · last login {last_login}",
                    account.discord_id,
                    account.email,
                    account.role.label()
                )
            })
            .collect();

        let embed = serenity::CreateEmbed::default()
            .title("👥 Users")
            .color(0x0058_65F2)
            .description(embed::join_lines(&lines, DESCRIPTION_LIMIT, "No users match."))
            .footer(serenity::CreateEmbedFooter::new(format!(
                "{} total · {} active",
                stats.total, stats.active
            )));

        ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
            .await?;
        Ok(())
    }

    /// Registers a Discord user.
    #[poise::command(
        slash_command,
        rename = "add",
        check = "crate::bot::admin_check"
    )]
    pub async fn user_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Discord user"] member: serenity::User,
        #[description = "Contact e-mail"] email: String,
        #[description = "Role (default: staff)"] role: Option<RoleChoice>,
    ) -> Result<()> {
        let role = role.map_or(Role::Staff, Into::into);
        let created =
            user::create_user(&ctx.data().database, &member.id.to_string(), &email, role).await?;
        ctx.say(format!(
            "✅ Registered <@{}> as **{}**.",
            created.discord_id,
            created.role.label()
        ))
        .await?;
        Ok(())
    }

    /// Changes an account's e-mail, role or status.
    #[poise::command(
        slash_command,
        rename = "edit",
        check = "crate::bot::admin_check"
    )]
    pub async fn user_edit(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Discord user"] member: serenity::User,
        #[description = "New e-mail"] email: Option<String>,
        #[description = "New role"] role: Option<RoleChoice>,
        #[description = "Allow sign-in"] active: Option<bool>,
    ) -> Result<()> {
        let actor = current_user(ctx).await?;
        let changes = UserUpdate {
            email,
            role: role.map(Into::into),
            is_active: active,
        };
        let updated =
            user::update_user(&ctx.data().database, &actor, &member.id.to_string(), changes)
                .await?;
        ctx.say(format!(
            "✅ Updated <@{}>: {} · **{}** · {}.",
            updated.discord_id,
            updated.email,
            updated.role.label(),
            if updated.is_active { "active" } else { "inactive" }
        ))
        .await?;
        Ok(())
    }

    /// Allows an account to sign in again.
    #[poise::command(
        slash_command,
        rename = "activate",
        check = "crate::bot::admin_check"
    )]
    pub async fn user_activate(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Discord user"] member: serenity::User,
    ) -> Result<()> {
        let actor = current_user(ctx).await?;
        user::set_active(&ctx.data().database, &actor, &member.id.to_string(), true).await?;
        ctx.say(format!("✅ <@{}> can sign in again.", member.id))
            .await?;
        Ok(())
    }

    /// Blocks an account from signing in.
    #[poise::command(
        slash_command,
        rename = "deactivate",
        check = "crate::bot::admin_check"
    )]
    pub async fn user_deactivate(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Discord user"] member: serenity::User,
    ) -> Result<()> {
        let actor = current_user(ctx).await?;
        user::set_active(&ctx.data().database, &actor, &member.id.to_string(), false).await?;
        ctx.say(format!("🚫 <@{}> can no longer sign in.", member.id))
            .await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
