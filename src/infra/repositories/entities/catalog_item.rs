//! SeaORM entity for the shared catalog table.

use std::str::FromStr;

use sea_orm::entity::prelude::*;

use crate::domain::{CatalogItem, CatalogKind};

#[derive(Debug, Clone, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "catalog_items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub kind: String,
    pub name: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Debug, Clone, Copy, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::strength_lift::Entity")]
    StrengthLifts,
    #[sea_orm(has_many = "super::metcon_workout::Entity")]
    MetconWorkouts,
    #[sea_orm(has_many = "super::metcon_movement::Entity")]
    MetconMovements,
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for CatalogItem {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            // Unknown discriminators cannot appear: the column is written
            // exclusively through CatalogKind::as_str
            kind: CatalogKind::from_str(&model.kind).unwrap_or(CatalogKind::Exercise),
            name: model.name,
            description: model.description,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
