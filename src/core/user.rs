//! User business logic - Accounts, roles and sign-in.
//!
//! Accounts are keyed by Discord user ID. The first command a new Discord user
//! runs registers them as active staff; admins come from the config seed or are
//! promoted by another admin.

use crate::{
    core::validation::{self, validate_email},
    entities::{Role, User, user},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, Set, SqlErr, prelude::*, sea_query::OnConflict};

impl Role {
    /// Only admins manage accounts.
    #[must_use]
    pub const fn can_manage_users(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Only admins see reports.
    #[must_use]
    pub const fn can_view_reports(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Every active account may edit inventory.
    #[must_use]
    pub const fn can_edit_inventory(self) -> bool {
        true
    }

    /// Label as stored in the database
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Staff => "staff",
        }
    }
}

/// Changes applied by [`update_user`]. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    /// New e-mail
    pub email: Option<String>,
    /// New role
    pub role: Option<Role>,
    /// New active flag
    pub is_active: Option<bool>,
}

/// Filters for [`list_users`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Only this role
    pub role: Option<Role>,
    /// Case-insensitive substring of the e-mail
    pub search: Option<String>,
}

/// Account counts shown above the user list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserStats {
    /// All accounts
    pub total: u64,
    /// Accounts allowed to sign in
    pub active: u64,
}

fn checked_email(email: &str) -> Result<String> {
    let email = email.trim();
    if !validate_email(email) {
        return Err(validation::field_error(
            "email",
            "email",
            "please enter a valid email address",
        )
        .into());
    }
    Ok(email.to_string())
}

fn require_admin(actor: &user::Model, action: &str) -> Result<()> {
    if actor.is_active && actor.role.can_manage_users() {
        Ok(())
    } else {
        Err(Error::PermissionDenied {
            action: action.to_string(),
        })
    }
}

/// Finds an account by Discord user ID.
pub async fn get_user_by_discord_id(
    db: &DatabaseConnection,
    discord_id: &str,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::DiscordId.eq(discord_id))
        .one(db)
        .await
        .map_err(Into::into)
}

async fn load_user(db: &DatabaseConnection, discord_id: &str) -> Result<user::Model> {
    get_user_by_discord_id(db, discord_id)
        .await?
        .ok_or_else(|| Error::UserNotFound {
            id: discord_id.to_string(),
        })
}

/// Creates an active account.
///
/// # Errors
/// Returns an error if the e-mail is invalid, the Discord ID already has an
/// account, or the insert fails.
pub async fn create_user(
    db: &DatabaseConnection,
    discord_id: &str,
    email: &str,
    role: Role,
) -> Result<user::Model> {
    let email = checked_email(email)?;

    if get_user_by_discord_id(db, discord_id).await?.is_some() {
        return Err(Error::AlreadyExists {
            name: discord_id.to_string(),
        });
    }

    let model = user::ActiveModel {
        discord_id: Set(discord_id.to_string()),
        email: Set(email),
        role: Set(role),
        is_active: Set(true),
        created_at: Set(chrono::Utc::now()),
        last_login: Set(None),
        ..Default::default()
    };
    let result = model.insert(db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => Error::AlreadyExists {
            name: discord_id.to_string(),
        },
        _ => e.into(),
    })?;
    tracing::info!(discord_id, role = role.label(), "Created user");
    Ok(result)
}

/// Signs a Discord user in, registering unknown users as active staff.
///
/// A failed last-login update is logged and does not block the sign-in.
///
/// # Errors
/// Returns `AccountInactive` for deactivated accounts, or a database error if the
/// lookup or registration fails.
pub async fn sign_in(
    db: &DatabaseConnection,
    discord_id: &str,
    fallback_email: &str,
) -> Result<user::Model> {
    if get_user_by_discord_id(db, discord_id).await?.is_none() {
        let model = user::ActiveModel {
            discord_id: Set(discord_id.to_string()),
            email: Set(fallback_email.trim().to_string()),
            role: Set(Role::Staff),
            is_active: Set(true),
            created_at: Set(chrono::Utc::now()),
            last_login: Set(None),
            ..Default::default()
        };
        // A concurrent first sign-in may have registered the account already
        let inserted = User::insert(model)
            .on_conflict(
                OnConflict::column(user::Column::DiscordId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
        if inserted > 0 {
            tracing::info!(discord_id, "Registered new staff account");
        }
    }

    let existing = load_user(db, discord_id).await?;
    if !existing.is_active {
        tracing::info!(discord_id, "Refused sign-in for inactive account");
        return Err(Error::AccountInactive);
    }

    let mut model: user::ActiveModel = existing.clone().into();
    model.last_login = Set(Some(chrono::Utc::now()));
    match model.update(db).await {
        Ok(updated) => Ok(updated),
        Err(e) => {
            tracing::warn!(discord_id, error = %e, "Failed to update last login");
            Ok(existing)
        }
    }
}

/// Applies `changes` to the account of `discord_id`.
///
/// # Errors
/// Returns an error if:
/// - `actor` is not an active admin
/// - `actor` tries to demote or deactivate their own account
/// - The new e-mail is invalid
/// - The account does not exist or the update fails
pub async fn update_user(
    db: &DatabaseConnection,
    actor: &user::Model,
    discord_id: &str,
    changes: UserUpdate,
) -> Result<user::Model> {
    require_admin(actor, "manage users")?;

    if actor.discord_id == discord_id {
        if changes.role.is_some_and(|r| r != Role::Admin) {
            return Err(Error::PermissionDenied {
                action: "remove your own admin role".to_string(),
            });
        }
        if changes.is_active == Some(false) {
            return Err(Error::PermissionDenied {
                action: "deactivate your own account".to_string(),
            });
        }
    }

    let email = changes.email.as_deref().map(checked_email).transpose()?;
    let target = load_user(db, discord_id).await?;

    let mut model: user::ActiveModel = target.into();
    if let Some(email) = email {
        model.email = Set(email);
    }
    if let Some(role) = changes.role {
        model.role = Set(role);
    }
    if let Some(active) = changes.is_active {
        model.is_active = Set(active);
    }
    let result = model.update(db).await?;

    tracing::info!(
        actor = %actor.discord_id,
        discord_id,
        role = result.role.label(),
        active = result.is_active,
        "Updated user"
    );
    Ok(result)
}

/// Activates or deactivates an account.
///
/// # Errors
/// Same as [`update_user`].
pub async fn set_active(
    db: &DatabaseConnection,
    actor: &user::Model,
    discord_id: &str,
    active: bool,
) -> Result<user::Model> {
    update_user(
        db,
        actor,
        discord_id,
        UserUpdate {
            is_active: Some(active),
            ..Default::default()
        },
    )
    .await
}

/// Lists accounts matching `filter`, newest first.
pub async fn list_users(db: &DatabaseConnection, filter: &UserFilter) -> Result<Vec<user::Model>> {
    let mut query = User::find();
    if let Some(role) = filter.role {
        query = query.filter(user::Column::Role.eq(role));
    }
    let users = query
        .order_by_desc(user::Column::CreatedAt)
        .order_by_desc(user::Column::Id)
        .all(db)
        .await?;

    let term = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    Ok(match term {
        Some(term) => users
            .into_iter()
            .filter(|u| u.email.to_lowercase().contains(&term))
            .collect(),
        None => users,
    })
}

/// Counts all and active accounts.
pub async fn user_stats(db: &DatabaseConnection) -> Result<UserStats> {
    let total = User::find().count(db).await?;
    let active = User::find()
        .filter(user::Column::IsActive.eq(true))
        .count(db)
        .await?;
    Ok(UserStats { total, active })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[test]
    fn test_role_permissions() {
        assert!(Role::Admin.can_manage_users());
        assert!(Role::Admin.can_view_reports());
        assert!(Role::Admin.can_edit_inventory());

        assert!(!Role::Staff.can_manage_users());
        assert!(!Role::Staff.can_view_reports());
        assert!(Role::Staff.can_edit_inventory());
    }

    #[tokio::test]
    async fn test_create_user_rejects_bad_email_before_query() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let result = create_user(&db, "42", "not-an-email", Role::Staff).await;
        assert!(
            matches!(result, Err(Error::Validation(e)) if e.field_errors().contains_key("email"))
        );
    }

    #[tokio::test]
    async fn test_create_user_rejects_duplicate() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_user(&db, "42", Role::Staff).await?;
        let result = create_user(&db, "42", "other@example.com", Role::Admin).await;
        assert!(matches!(result, Err(Error::AlreadyExists { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_sign_in_registers_unknown_user_as_staff() -> Result<()> {
        let db = setup_test_db().await?;

        let user = sign_in(&db, "100", "newbie@example.com").await?;
        assert_eq!(user.role, Role::Staff);
        assert!(user.is_active);
        assert!(user.last_login.is_some());

        // Second sign-in finds the same account
        let again = sign_in(&db, "100", "ignored@example.com").await?;
        assert_eq!(again.id, user.id);
        assert_eq!(again.email, "newbie@example.com");
        assert_eq!(user_stats(&db).await?.total, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_simultaneous_first_sign_ins_share_one_account() -> Result<()> {
        let db = setup_test_db().await?;

        let (first, second) = tokio::join!(
            sign_in(&db, "555", "new@example.com"),
            sign_in(&db, "555", "new@example.com"),
        );
        let (first, second) = (first?, second?);

        assert_eq!(first.id, second.id);
        assert_eq!(first.role, Role::Staff);
        assert_eq!(user_stats(&db).await?.total, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_sign_in_updates_last_login() -> Result<()> {
        let db = setup_test_db().await?;
        let user = create_test_user(&db, "7", Role::Staff).await?;
        assert!(user.last_login.is_none());

        let signed_in = sign_in(&db, "7", "x@example.com").await?;
        assert!(signed_in.last_login.is_some());
        Ok(())
    }

    #[tokio::test]
    async fn test_inactive_user_cannot_sign_in() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = create_test_user(&db, "1", Role::Admin).await?;
        create_test_user(&db, "2", Role::Staff).await?;
        set_active(&db, &admin, "2", false).await?;

        let result = sign_in(&db, "2", "x@example.com").await;
        assert!(matches!(result, Err(Error::AccountInactive)));

        set_active(&db, &admin, "2", true).await?;
        assert!(sign_in(&db, "2", "x@example.com").await.is_ok());
        Ok(())
    }

    #[tokio::test]
    async fn test_update_user_requires_admin() -> Result<()> {
        let db = setup_test_db().await?;
        let staff = create_test_user(&db, "2", Role::Staff).await?;
        create_test_user(&db, "3", Role::Staff).await?;

        let result = set_active(&db, &staff, "3", false).await;
        assert!(matches!(result, Err(Error::PermissionDenied { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_admin_cannot_demote_or_deactivate_self() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = create_test_user(&db, "1", Role::Admin).await?;

        let demote = UserUpdate {
            role: Some(Role::Staff),
            ..Default::default()
        };
        let result = update_user(&db, &admin, "1", demote).await;
        assert!(matches!(result, Err(Error::PermissionDenied { .. })));

        let result = set_active(&db, &admin, "1", false).await;
        assert!(matches!(result, Err(Error::PermissionDenied { .. })));

        // Changing their own e-mail is fine
        let email = UserUpdate {
            email: Some("boss@example.com".to_string()),
            ..Default::default()
        };
        let updated = update_user(&db, &admin, "1", email).await?;
        assert_eq!(updated.email, "boss@example.com");
        Ok(())
    }

    #[tokio::test]
    async fn test_update_user_changes_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = create_test_user(&db, "1", Role::Admin).await?;
        create_test_user(&db, "2", Role::Staff).await?;

        let changes = UserUpdate {
            email: Some(" lead@example.com ".to_string()),
            role: Some(Role::Admin),
            is_active: None,
        };
        let updated = update_user(&db, &admin, "2", changes).await?;
        assert_eq!(updated.email, "lead@example.com");
        assert_eq!(updated.role, Role::Admin);
        assert!(updated.is_active);

        let bad = UserUpdate {
            email: Some("nope".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            update_user(&db, &admin, "2", bad).await,
            Err(Error::Validation(_))
        ));

        let missing = update_user(&db, &admin, "999", UserUpdate::default()).await;
        assert!(matches!(missing, Err(Error::UserNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_users_filters_and_orders() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = create_test_user(&db, "1", Role::Admin).await?;
        create_test_user(&db, "2", Role::Staff).await?;
        create_test_user(&db, "3", Role::Staff).await?;
        set_active(&db, &admin, "3", false).await?;

        let all = list_users(&db, &UserFilter::default()).await?;
        let ids: Vec<_> = all.iter().map(|u| u.discord_id.as_str()).collect();
        assert_eq!(ids, vec!["3", "2", "1"]);

        let staff = list_users(
            &db,
            &UserFilter {
                role: Some(Role::Staff),
                search: None,
            },
        )
        .await?;
        assert_eq!(staff.len(), 2);

        let searched = list_users(
            &db,
            &UserFilter {
                role: None,
                search: Some("2@EXAMPLE".to_string()),
            },
        )
        .await?;
        assert_eq!(searched.len(), 1);
        assert_eq!(searched[0].discord_id, "2");

        let stats = user_stats(&db).await?;
        assert_eq!(stats, UserStats { total: 3, active: 2 });
        Ok(())
    }
}
