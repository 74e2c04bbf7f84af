//! Initial data seeding from config.toml
//!
//! On the first start the warehouses (with their floor × section layouts),
//! categories and admin accounts listed in the config are written to the
//! database. Entries that already exist are left alone. Once finished, the run
//! is recorded in `system_state` and later starts skip seeding entirely.

use crate::{
    config::settings::AppConfig,
    core::{category, user, warehouse},
    entities::{Role, SystemState, system_state},
    errors::Result,
};
use sea_orm::{Set, prelude::*};

/// `system_state` key marking a completed seed
pub const SEED_MARKER_KEY: &str = "initial_seed_completed";

/// Returns true if the initial seed has already run.
pub async fn is_seeded(db: &DatabaseConnection) -> Result<bool> {
    let marker = SystemState::find()
        .filter(system_state::Column::Key.eq(SEED_MARKER_KEY))
        .one(db)
        .await?;
    Ok(marker.is_some())
}

async fn mark_seeded(db: &DatabaseConnection) -> Result<()> {
    let marker = system_state::ActiveModel {
        key: Set(SEED_MARKER_KEY.to_string()),
        value: Set("true".to_string()),
        updated_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    marker.insert(db).await?;
    Ok(())
}

/// Seeds warehouses, categories and admins from `config` once.
///
/// Returns `true` if seeding ran, `false` if it had already been done.
pub async fn seed_initial_data(db: &DatabaseConnection, config: &AppConfig) -> Result<bool> {
    if is_seeded(db).await? {
        tracing::debug!("Initial seed already completed, skipping");
        return Ok(false);
    }

    tracing::info!(
        warehouses = config.warehouses.len(),
        categories = config.categories.len(),
        admins = config.admins.len(),
        "Seeding initial data from configuration"
    );

    for cfg in &config.warehouses {
        let wh = match warehouse::get_warehouse_by_name(db, &cfg.name).await? {
            Some(existing) => {
                tracing::warn!(warehouse = %cfg.name, "Warehouse already exists, keeping it");
                existing
            }
            None => {
                warehouse::create_warehouse(db, &cfg.name, &cfg.location, cfg.address.clone())
                    .await?
            }
        };
        for floor in &cfg.floors {
            for section in &cfg.sections {
                warehouse::add_section(db, wh.id, floor, section).await?;
            }
        }
    }

    for cfg in &config.categories {
        if category::get_category_by_name(db, &cfg.name).await?.is_some() {
            tracing::warn!(category = %cfg.name, "Category already exists, skipping");
            continue;
        }
        category::create_category(db, &cfg.name, cfg.description.clone()).await?;
    }

    for cfg in &config.admins {
        if user::get_user_by_discord_id(db, &cfg.discord_id)
            .await?
            .is_some()
        {
            tracing::warn!(discord_id = %cfg.discord_id, "User already exists, skipping");
            continue;
        }
        user::create_user(db, &cfg.discord_id, &cfg.email, Role::Admin).await?;
    }

    mark_seeded(db).await?;
    tracing::info!("Finished seeding initial data");
    Ok(true)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{config::settings::parse_config, test_utils::setup_test_db};

    const SEED_TOML: &str = r#"
        [[warehouses]]
        name = "Main Warehouse"
        location = "Main Street"
        floors = ["Ground", "First"]
        sections = ["A", "B"]

        [[categories]]
        name = "General"

        [[categories]]
        name = "Tools"
        description = "Hand tools"

        [[admins]]
        discord_id = "1"
        email = "admin@example.com"
    "#;

    #[tokio::test]
    async fn test_seed_creates_configured_data() -> Result<()> {
        let db = setup_test_db().await?;
        let config = parse_config(SEED_TOML)?;

        assert!(seed_initial_data(&db, &config).await?);

        let wh = warehouse::get_warehouse_by_name(&db, "Main Warehouse")
            .await?
            .unwrap();
        let layout = warehouse::get_layout(&db, wh.id).await?;
        assert_eq!(layout["Ground"], vec!["A", "B"]);
        assert_eq!(layout["First"], vec!["A", "B"]);

        assert_eq!(category::get_all_categories(&db).await?.len(), 2);

        let admin = user::get_user_by_discord_id(&db, "1").await?.unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert!(is_seeded(&db).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_runs_only_once() -> Result<()> {
        let db = setup_test_db().await?;
        let config = parse_config(SEED_TOML)?;

        assert!(seed_initial_data(&db, &config).await?);
        assert!(!seed_initial_data(&db, &config).await?);
        assert_eq!(category::get_all_categories(&db).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_keeps_existing_records() -> Result<()> {
        let db = setup_test_db().await?;
        category::create_category(&db, "General", Some("Hand made".to_string())).await?;
        user::create_user(&db, "1", "staff@example.com", Role::Staff).await?;

        let config = parse_config(SEED_TOML)?;
        seed_initial_data(&db, &config).await?;

        let general = category::get_category_by_name(&db, "General")
            .await?
            .unwrap();
        assert_eq!(general.description.as_deref(), Some("Hand made"));
        let existing = user::get_user_by_discord_id(&db, "1").await?.unwrap();
        assert_eq!(existing.role, Role::Staff);
        Ok(())
    }
}
