//! Category business logic.

use crate::{
    core::validation,
    entities::{Category, category},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};

/// Retrieves all categories ordered alphabetically by name.
pub async fn get_all_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    Category::find()
        .order_by_asc(category::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a category by its exact name.
pub async fn get_category_by_name<C>(db: &C, name: &str) -> Result<Option<category::Model>>
where
    C: ConnectionTrait,
{
    Category::find()
        .filter(category::Column::Name.eq(name.trim()))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Like [`get_category_by_name`] but fails with `CategoryNotFound`.
pub async fn require_category_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<category::Model> {
    get_category_by_name(db, name)
        .await?
        .ok_or_else(|| Error::CategoryNotFound {
            name: name.trim().to_string(),
        })
}

/// Finds a category by its unique ID.
pub async fn get_category_by_id<C>(db: &C, category_id: i64) -> Result<Option<category::Model>>
where
    C: ConnectionTrait,
{
    Category::find_by_id(category_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a category.
///
/// # Errors
/// Returns an error if the name is blank or already taken, or the insert fails.
pub async fn create_category(
    db: &DatabaseConnection,
    name: &str,
    description: Option<String>,
) -> Result<category::Model> {
    let name = name.trim();
    validation::check_name("name", name)?;

    if get_category_by_name(db, name).await?.is_some() {
        return Err(Error::AlreadyExists {
            name: name.to_string(),
        });
    }

    let model = category::ActiveModel {
        name: Set(name.to_string()),
        description: Set(description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())),
        ..Default::default()
    };
    let result = model.insert(db).await?;
    tracing::info!(category = %result.name, "Created category");
    Ok(result)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_and_list_categories() -> Result<()> {
        let db = setup_test_db().await?;
        create_category(&db, "Tools", None).await?;
        let packaging =
            create_category(&db, " Packaging ", Some("Boxes and wrap".to_string())).await?;
        assert_eq!(packaging.name, "Packaging");

        let all = get_all_categories(&db).await?;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Packaging");
        assert_eq!(all[1].name, "Tools");

        let found = get_category_by_name(&db, "Tools").await?.unwrap();
        assert_eq!(get_category_by_id(&db, found.id).await?.unwrap(), found);
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_category_is_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        create_category(&db, "Tools", None).await?;
        let result = create_category(&db, "Tools", None).await;
        assert!(matches!(result, Err(Error::AlreadyExists { .. })));
        assert!(matches!(
            require_category_by_name(&db, "Paint").await,
            Err(Error::CategoryNotFound { .. })
        ));
        Ok(())
    }
}
