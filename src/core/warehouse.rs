//! Warehouse business logic - Warehouses and their floor/section layouts.

use crate::{
    core::validation,
    entities::{Warehouse, WarehouseSection, warehouse, warehouse_section},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use std::collections::BTreeMap;

/// Floor name → sorted section names
pub type Layout = BTreeMap<String, Vec<String>>;

/// Retrieves all warehouses ordered alphabetically by name.
pub async fn get_all_warehouses(db: &DatabaseConnection) -> Result<Vec<warehouse::Model>> {
    Warehouse::find()
        .order_by_asc(warehouse::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a warehouse by its exact name.
pub async fn get_warehouse_by_name<C>(db: &C, name: &str) -> Result<Option<warehouse::Model>>
where
    C: ConnectionTrait,
{
    Warehouse::find()
        .filter(warehouse::Column::Name.eq(name.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Like [`get_warehouse_by_name`] but fails with `WarehouseNotFound`.
pub async fn require_warehouse_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<warehouse::Model> {
    get_warehouse_by_name(db, name)
        .await?
        .ok_or_else(|| Error::WarehouseNotFound {
            name: name.trim().to_string(),
        })
}

/// Finds a warehouse by its unique ID.
pub async fn get_warehouse_by_id<C>(db: &C, warehouse_id: i64) -> Result<Option<warehouse::Model>>
where
    C: ConnectionTrait,
{
    Warehouse::find_by_id(warehouse_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a warehouse with an empty layout.
///
/// # Errors
/// Returns an error if the name is blank or already taken, or the insert fails.
pub async fn create_warehouse(
    db: &DatabaseConnection,
    name: &str,
    location: &str,
    address: Option<String>,
) -> Result<warehouse::Model> {
    let name = name.trim();
    validation::check_name("name", name)?;

    if get_warehouse_by_name(db, name).await?.is_some() {
        return Err(Error::AlreadyExists {
            name: name.to_string(),
        });
    }

    let model = warehouse::ActiveModel {
        name: Set(name.to_string()),
        location: Set(location.trim().to_string()),
        address: Set(address
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())),
        ..Default::default()
    };
    let result = model.insert(db).await?;
    tracing::info!(warehouse = %result.name, "Created warehouse");
    Ok(result)
}

/// Adds a (floor, section) slot to a warehouse. Adding an existing slot is a no-op.
///
/// # Errors
/// Returns an error if floor or section is blank, or the warehouse does not exist.
pub async fn add_section(
    db: &DatabaseConnection,
    warehouse_id: i64,
    floor: &str,
    section: &str,
) -> Result<warehouse_section::Model> {
    let (floor, section) = (floor.trim(), section.trim());
    if floor.is_empty() || section.is_empty() {
        return Err(validation::field_error(
            "section",
            "required",
            "floor and section are both required",
        )
        .into());
    }

    if get_warehouse_by_id(db, warehouse_id).await?.is_none() {
        return Err(Error::WarehouseNotFound {
            name: warehouse_id.to_string(),
        });
    }

    if let Some(existing) = find_section(db, warehouse_id, floor, section).await? {
        return Ok(existing);
    }

    let model = warehouse_section::ActiveModel {
        warehouse_id: Set(warehouse_id),
        floor: Set(floor.to_string()),
        section: Set(section.to_string()),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

async fn find_section<C>(
    db: &C,
    warehouse_id: i64,
    floor: &str,
    section: &str,
) -> Result<Option<warehouse_section::Model>>
where
    C: ConnectionTrait,
{
    WarehouseSection::find()
        .filter(warehouse_section::Column::WarehouseId.eq(warehouse_id))
        .filter(warehouse_section::Column::Floor.eq(floor))
        .filter(warehouse_section::Column::Section.eq(section))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Builds the floor → sections map of a warehouse.
pub async fn get_layout<C>(db: &C, warehouse_id: i64) -> Result<Layout>
where
    C: ConnectionTrait,
{
    let rows = WarehouseSection::find()
        .filter(warehouse_section::Column::WarehouseId.eq(warehouse_id))
        .order_by_asc(warehouse_section::Column::Floor)
        .order_by_asc(warehouse_section::Column::Section)
        .all(db)
        .await?;

    let mut layout = Layout::new();
    for row in rows {
        layout.entry(row.floor).or_default().push(row.section);
    }
    Ok(layout)
}

/// Checks that a location exists in the warehouse.
///
/// An item does not have to be placed: when either floor or section is blank the
/// location is accepted. Otherwise the exact pair must be part of the layout.
pub async fn is_valid_location<C>(
    db: &C,
    warehouse_id: i64,
    floor: &str,
    section: &str,
) -> Result<bool>
where
    C: ConnectionTrait,
{
    if floor.trim().is_empty() || section.trim().is_empty() {
        return Ok(true);
    }
    Ok(find_section(db, warehouse_id, floor.trim(), section.trim())
        .await?
        .is_some())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_warehouse_validation() {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let result = create_warehouse(&db, "   ", "Somewhere", None).await;
        assert!(
            matches!(result, Err(Error::Validation(e)) if e.field_errors().contains_key("name"))
        );
    }

    #[tokio::test]
    async fn test_create_warehouse_rejects_duplicate_name() -> Result<()> {
        let db = setup_test_db().await?;
        create_warehouse(&db, "North", "North Road", None).await?;

        let result = create_warehouse(&db, " North ", "Elsewhere", None).await;
        assert!(matches!(result, Err(Error::AlreadyExists { .. })));

        assert_eq!(require_warehouse_by_name(&db, "North").await?.name, "North");
        assert!(matches!(
            require_warehouse_by_name(&db, "South").await,
            Err(Error::WarehouseNotFound { .. })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_layout_groups_sections_by_floor() -> Result<()> {
        let db = setup_test_db().await?;
        let wh = create_warehouse(&db, "North", "North Road", Some("1 North Rd".into())).await?;

        add_section(&db, wh.id, "Ground", "B").await?;
        add_section(&db, wh.id, "Ground", "A").await?;
        add_section(&db, wh.id, "First", "A").await?;
        // Duplicate is ignored
        add_section(&db, wh.id, "Ground", "A").await?;

        let layout = get_layout(&db, wh.id).await?;
        assert_eq!(layout.len(), 2);
        assert_eq!(layout["Ground"], vec!["A", "B"]);
        assert_eq!(layout["First"], vec!["A"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_add_section_unknown_warehouse() -> Result<()> {
        let db = setup_test_db().await?;
        let result = add_section(&db, 999, "Ground", "A").await;
        assert!(matches!(result, Err(Error::WarehouseNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_is_valid_location() -> Result<()> {
        let (db, wh) = setup_with_warehouse().await?;

        assert!(is_valid_location(&db, wh.id, "Ground", "A").await?);
        // Pair must exist together
        assert!(!is_valid_location(&db, wh.id, "Ground", "Z").await?);
        assert!(!is_valid_location(&db, wh.id, "Basement", "A").await?);
        // Unplaced items are fine
        assert!(is_valid_location(&db, wh.id, "", "").await?);
        assert!(is_valid_location(&db, wh.id, "Ground", " ").await?);
        Ok(())
    }
}
