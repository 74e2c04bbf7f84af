//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for the WareWise application,
//! including all slash commands, autocomplete handlers, and bot context management.
//! Every invocation first signs the Discord user in; deactivated accounts are
//! refused before the command body runs.

/// Discord command implementations (dashboard, inventory, items, users, general)
pub mod commands;
/// Embed size limits
pub mod embed;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    config::settings::InventorySettings,
    core::user,
    entities::UserModel,
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;

/// Shared data available to all bot commands.
/// This structure holds the database connection and the inventory settings
/// that commands need to access.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Low-stock rule and list limits from config.toml
    pub settings: InventorySettings,
}

impl BotData {
    /// Creates a new `BotData` instance with the given database connection and settings.
    #[must_use]
    pub const fn new(database: DatabaseConnection, settings: InventorySettings) -> Self {
        Self { database, settings }
    }
}

/// Poise context used by every command
pub type Context<'a> = poise::Context<'a, BotData, Error>;

/// Loads the account of the invoking user.
///
/// The global sign-in check has already run, so a missing account means it was
/// removed in between.
pub async fn current_user(ctx: Context<'_>) -> Result<UserModel> {
    let discord_id = ctx.author().id.to_string();
    let account = user::get_user_by_discord_id(&ctx.data().database, &discord_id).await?;
    account.ok_or(Error::UserNotFound { id: discord_id })
}

/// Global check: signs the author in, registering new users as staff.
async fn sign_in_check(ctx: Context<'_>) -> Result<bool> {
    let author = ctx.author();
    let fallback_email = format!("{}@users.discord.invalid", author.name);
    user::sign_in(&ctx.data().database, &author.id.to_string(), &fallback_email).await?;
    Ok(true)
}

/// Command check restricting a command to admins.
pub async fn admin_check(ctx: Context<'_>) -> Result<bool> {
    let account = current_user(ctx).await?;
    if account.role.can_manage_users() {
        Ok(true)
    } else {
        Err(Error::PermissionDenied {
            action: "manage users".to_string(),
        })
    }
}

/// Command check restricting a command to roles that may view reports.
pub async fn reports_check(ctx: Context<'_>) -> Result<bool> {
    let account = current_user(ctx).await?;
    if account.role.can_view_reports() {
        Ok(true)
    } else {
        Err(Error::PermissionDenied {
            action: "view reports".to_string(),
        })
    }
}

async fn reply_with_error(ctx: Context<'_>, error: &Error) {
    let command = &ctx.command().qualified_name;
    let message = if error.is_user_error() {
        tracing::info!(command = %command, "Rejected command: {error}");
        format!("❌ {error}")
    } else {
        tracing::error!(command = %command, "Error in command: {error:?}");
        "❌ Something went wrong. Please try again later.".to_string()
    };

    let reply = poise::CreateReply::default().content(message).ephemeral(true);
    if let Err(e) = ctx.send(reply).await {
        tracing::error!("Failed to send error message: {e}");
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            tracing::error!("Failed to start bot: {error:?}");
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            reply_with_error(ctx, &error).await;
        }
        poise::FrameworkError::CommandCheckFailed {
            error: Some(error),
            ctx,
            ..
        } => {
            reply_with_error(ctx, &error).await;
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                tracing::error!("Error while handling error: {e}");
            }
        }
    }
}

/// Registers all commands and runs the Discord client until it stops.
///
/// # Errors
/// Returns an error if the client cannot be built or the gateway connection fails.
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::ping(),
                commands::help(),
                commands::profile(),
                commands::dashboard(),
                commands::low_stock(),
                commands::activity(),
                commands::inventory(),
                commands::item_manage(),
                commands::warehouse_manage(),
                commands::category_manage(),
                commands::user_manage(),
            ],
            command_check: Some(|ctx| Box::pin(sign_in_check(ctx))),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                tracing::info!("Logged in as {}", ready.user.name);
                tracing::info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    let intents = serenity::GatewayIntents::non_privileged();

    tracing::info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| tracing::error!("Error creating client: {e:?}"))?;

    tracing::info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| tracing::error!("Client error: {e:?}"))?;
    Ok(())
}
