//! SeaORM entity for the strength_lifts table.

use sea_orm::entity::prelude::*;

use crate::domain::StrengthLift;

#[derive(Debug, Clone, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "strength_lifts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub session_id: Uuid,
    pub exercise_type_id: Uuid,
    pub scheme: Option<String>,
    pub sets: i32,
    pub reps: i32,
    pub weight: f64,
    pub additional_weight: Option<f64>,
    pub duration: Option<f64>,
    pub rest_period: Option<f64>,
    pub comments: Option<String>,
    pub sort_order: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Debug, Clone, Copy, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::workout_session::Entity",
        from = "Column::SessionId",
        to = "super::workout_session::Column::Id"
    )]
    Session,
    #[sea_orm(
        belongs_to = "super::catalog_item::Entity",
        from = "Column::ExerciseTypeId",
        to = "super::catalog_item::Column::Id"
    )]
    ExerciseType,
}

impl Related<super::workout_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl Related<super::catalog_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExerciseType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for StrengthLift {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            session_id: model.session_id,
            exercise_type_id: model.exercise_type_id,
            scheme: model.scheme,
            sets: model.sets,
            reps: model.reps,
            weight: model.weight,
            additional_weight: model.additional_weight,
            duration: model.duration,
            rest_period: model.rest_period,
            comments: model.comments,
            order: model.sort_order,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
