//! Discord interaction handlers
//!
//! This module provides handlers for Discord interactions such as autocomplete.

/// Autocomplete handlers for warehouse names, category names, and SKUs
pub mod autocomplete;
