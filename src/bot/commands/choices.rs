//! Fixed-choice slash command parameters and their mapping onto core types.

use crate::{
    core::{inventory::SortOrder, stock::StockLevel},
    entities::{ItemStatus, Role},
};

/// Item status as offered in slash commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub enum StatusChoice {
    /// Stocked
    Active,
    /// Temporarily not stocked
    Inactive,
    /// No longer carried
    Discontinued,
}

impl From<StatusChoice> for ItemStatus {
    fn from(choice: StatusChoice) -> Self {
        match choice {
            StatusChoice::Active => Self::Active,
            StatusChoice::Inactive => Self::Inactive,
            StatusChoice::Discontinued => Self::Discontinued,
        }
    }
}

/// Stock level filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub enum StockChoice {
    /// Nothing on hand
    #[name = "Out of stock"]
    Out,
    /// At or below the minimum
    #[name = "Low stock"]
    Low,
    /// Not low
    #[name = "In stock"]
    Ok,
}

impl From<StockChoice> for StockLevel {
    fn from(choice: StockChoice) -> Self {
        match choice {
            StockChoice::Out => Self::Out,
            StockChoice::Low => Self::Low,
            StockChoice::Ok => Self::Ok,
        }
    }
}

/// Inventory sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub enum SortChoice {
    /// A to Z
    Name,
    /// Lowest stock first
    Stock,
    /// Highest price first
    Price,
}

impl From<SortChoice> for SortOrder {
    fn from(choice: SortChoice) -> Self {
        match choice {
            SortChoice::Name => Self::Name,
            SortChoice::Stock => Self::Stock,
            SortChoice::Price => Self::Price,
        }
    }
}

/// Account role
#[derive(Debug, Clone, Copy, PartialEq, Eq, poise::ChoiceParameter)]
pub enum RoleChoice {
    /// Full access
    Admin,
    /// Inventory only
    Staff,
}

impl From<RoleChoice> for Role {
    fn from(choice: RoleChoice) -> Self {
        match choice {
            RoleChoice::Admin => Self::Admin,
            RoleChoice::Staff => Self::Staff,
        }
    }
}
