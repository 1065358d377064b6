//! SeaORM entity for the metcon_workouts table.

use sea_orm::entity::prelude::*;

use crate::domain::MetconWorkout;

#[derive(Debug, Clone, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "metcon_workouts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub session_id: Uuid,
    pub metcon_type_id: Uuid,
    pub rounds: i32,
    pub time_cap_minutes: Option<f64>,
    pub actual_time_minutes: Option<f64>,
    pub rest_between_rounds: Option<f64>,
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
        from = "Column::MetconTypeId",
        to = "super::catalog_item::Column::Id"
    )]
    MetconType,
    #[sea_orm(has_many = "super::metcon_movement::Entity")]
    Movements,
}

impl Related<super::workout_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl Related<super::metcon_movement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Movements.def()
    }
}

impl Related<super::catalog_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MetconType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for MetconWorkout {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            session_id: model.session_id,
            metcon_type_id: model.metcon_type_id,
            rounds: model.rounds,
            time_cap_minutes: model.time_cap_minutes,
            actual_time_minutes: model.actual_time_minutes,
            rest_between_rounds: model.rest_between_rounds,
            comments: model.comments,
            order: model.sort_order,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
