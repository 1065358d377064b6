//! SeaORM entity for the metcon_movements table.

use sea_orm::entity::prelude::*;

use crate::domain::MetconMovement;

#[derive(Debug, Clone, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "metcon_movements")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub metcon_workout_id: Uuid,
    pub movement_type_id: Uuid,
    pub reps: Option<i32>,
    pub distance_meters: Option<f64>,
    pub weight: Option<f64>,
    pub sort_order: i32,
}

#[derive(Debug, Clone, Copy, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::metcon_workout::Entity",
        from = "Column::MetconWorkoutId",
        to = "super::metcon_workout::Column::Id"
    )]
    Workout,
    #[sea_orm(
        belongs_to = "super::catalog_item::Entity",
        from = "Column::MovementTypeId",
        to = "super::catalog_item::Column::Id"
    )]
    MovementType,
}

impl Related<super::metcon_workout::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Workout.def()
    }
}

impl Related<super::catalog_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MovementType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for MetconMovement {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            metcon_workout_id: model.metcon_workout_id,
            movement_type_id: model.movement_type_id,
            reps: model.reps,
            distance_meters: model.distance_meters,
            weight: model.weight,
            order: model.sort_order,
        }
    }
}
