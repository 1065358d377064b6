//! Shared repository helpers.
//!
//! Query fragments common to the per-entity stores: display-order
//! assignment for session-scoped children and the pagination shape used
//! by list queries.

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect};
use uuid::Uuid;

use super::entities::catalog_item::{self, Entity as CatalogEntity};
use crate::domain::CatalogKind;
use crate::errors::{AppError, AppResult};

/// Highest display order among an entity's children of one parent row,
/// or 0 when the parent has none.
pub(crate) async fn max_child_order<E>(
    db: &impl ConnectionTrait,
    parent_col: E::Column,
    parent_id: Uuid,
    order_col: E::Column,
) -> AppResult<i32>
where
    E: EntityTrait,
{
    let max: Option<Option<i32>> = E::find()
        .select_only()
        .column_as(order_col.max(), "max_order")
        .filter(parent_col.eq(parent_id))
        .into_tuple()
        .one(db)
        .await
        .map_err(AppError::from)?;

    Ok(max.flatten().unwrap_or(0))
}

/// Verify that a catalog reference points at an active entry of the
/// expected kind, failing with an invalid-reference error otherwise.
pub(crate) async fn ensure_catalog_ref(
    db: &impl ConnectionTrait,
    id: Uuid,
    kind: CatalogKind,
) -> AppResult<()> {
    let count = CatalogEntity::find()
        .filter(catalog_item::Column::Id.eq(id))
        .filter(catalog_item::Column::Kind.eq(kind.as_str()))
        .filter(catalog_item::Column::IsActive.eq(true))
        .count(db)
        .await?;

    if count == 0 {
        return Err(AppError::invalid_reference(kind.label()));
    }
    Ok(())
}

/// Resolve the display order for a new child row.
///
/// A positive requested order is honored as-is; anything else gets
/// max-plus-one. Two concurrent creates can both read the same max and
/// end up with equal orders; readers sort by (order, created_at) so the
/// duplicate is display-stable rather than an error.
pub(crate) fn resolve_order(requested: Option<i32>, max_existing: i32) -> i32 {
    match requested {
        Some(order) if order > 0 => order,
        _ => max_existing + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_positive_order_is_kept() {
        assert_eq!(resolve_order(Some(7), 3), 7);
    }

    #[test]
    fn missing_order_appends_after_max() {
        assert_eq!(resolve_order(None, 3), 4);
        assert_eq!(resolve_order(None, 0), 1);
    }

    #[test]
    fn non_positive_order_appends_after_max() {
        assert_eq!(resolve_order(Some(0), 3), 4);
        assert_eq!(resolve_order(Some(-2), 5), 6);
    }
}
