//! User entity - Accounts allowed to use the bot and their roles.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account role
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum Role {
    /// Full access, including user management and reports
    #[sea_orm(string_value = "admin")]
    Admin,
    /// Inventory access only
    #[sea_orm(string_value = "staff")]
    Staff,
}

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Discord user ID this account is bound to
    #[sea_orm(unique)]
    pub discord_id: String,
    /// Contact e-mail
    pub email: String,
    /// Account role
    pub role: Role,
    /// Inactive accounts are refused at sign-in
    pub is_active: bool,
    /// When the account was created
    pub created_at: DateTimeUtc,
    /// Last successful sign-in
    pub last_login: Option<DateTimeUtc>,
}

/// Users have no relationships; activity rows store the Discord id directly
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
