//! SeaORM entity for the workout_sessions table.

use sea_orm::entity::prelude::*;

use crate::domain::WorkoutSession;

#[derive(Debug, Clone, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "workout_sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: Date,
    pub notes: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Debug, Clone, Copy, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::strength_lift::Entity")]
    StrengthLifts,
    #[sea_orm(has_many = "super::metcon_workout::Entity")]
    MetconWorkouts,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::strength_lift::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StrengthLifts.def()
    }
}

impl Related<super::metcon_workout::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MetconWorkouts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for WorkoutSession {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            date: model.date,
            notes: model.notes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
