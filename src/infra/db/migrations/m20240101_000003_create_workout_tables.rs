//! Migration: Create workout session, strength lift and metcon tables.
//!
//! Child rows cascade on session delete; catalog references restrict so a
//! referenced catalog item cannot be hard-deleted.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WorkoutSessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WorkoutSessions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WorkoutSessions::UserId).uuid().not_null())
                    .col(ColumnDef::new(WorkoutSessions::Date).date().not_null())
                    .col(ColumnDef::new(WorkoutSessions::Notes).string().null())
                    .col(
                        ColumnDef::new(WorkoutSessions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WorkoutSessions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_workout_sessions_user")
                            .from(WorkoutSessions::Table, WorkoutSessions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_workout_sessions_user_date")
                    .table(WorkoutSessions::Table)
                    .col(WorkoutSessions::UserId)
                    .col(WorkoutSessions::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StrengthLifts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StrengthLifts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StrengthLifts::SessionId).uuid().not_null())
                    .col(
                        ColumnDef::new(StrengthLifts::ExerciseTypeId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StrengthLifts::Scheme).string().null())
                    .col(ColumnDef::new(StrengthLifts::Sets).integer().not_null())
                    .col(ColumnDef::new(StrengthLifts::Reps).integer().not_null())
                    .col(ColumnDef::new(StrengthLifts::Weight).double().not_null())
                    .col(
                        ColumnDef::new(StrengthLifts::AdditionalWeight)
                            .double()
                            .null(),
                    )
                    .col(ColumnDef::new(StrengthLifts::Duration).double().null())
                    .col(ColumnDef::new(StrengthLifts::RestPeriod).double().null())
                    .col(ColumnDef::new(StrengthLifts::Comments).string().null())
                    .col(
                        ColumnDef::new(StrengthLifts::SortOrder)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StrengthLifts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StrengthLifts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_strength_lifts_session")
                            .from(StrengthLifts::Table, StrengthLifts::SessionId)
                            .to(WorkoutSessions::Table, WorkoutSessions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_strength_lifts_exercise_type")
                            .from(StrengthLifts::Table, StrengthLifts::ExerciseTypeId)
                            .to(CatalogItems::Table, CatalogItems::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_strength_lifts_session")
                    .table(StrengthLifts::Table)
                    .col(StrengthLifts::SessionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MetconWorkouts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MetconWorkouts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MetconWorkouts::SessionId).uuid().not_null())
                    .col(
                        ColumnDef::new(MetconWorkouts::MetconTypeId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MetconWorkouts::Rounds).integer().not_null())
                    .col(
                        ColumnDef::new(MetconWorkouts::TimeCapMinutes)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MetconWorkouts::ActualTimeMinutes)
                            .double()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MetconWorkouts::RestBetweenRounds)
                            .double()
                            .null(),
                    )
                    .col(ColumnDef::new(MetconWorkouts::Comments).string().null())
                    .col(
                        ColumnDef::new(MetconWorkouts::SortOrder)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MetconWorkouts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MetconWorkouts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_metcon_workouts_session")
                            .from(MetconWorkouts::Table, MetconWorkouts::SessionId)
                            .to(WorkoutSessions::Table, WorkoutSessions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_metcon_workouts_metcon_type")
                            .from(MetconWorkouts::Table, MetconWorkouts::MetconTypeId)
                            .to(CatalogItems::Table, CatalogItems::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_metcon_workouts_session")
                    .table(MetconWorkouts::Table)
                    .col(MetconWorkouts::SessionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(MetconMovements::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MetconMovements::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MetconMovements::MetconWorkoutId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MetconMovements::MovementTypeId)
                            .uuid()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MetconMovements::Reps).integer().null())
                    .col(
                        ColumnDef::new(MetconMovements::DistanceMeters)
                            .double()
                            .null(),
                    )
                    .col(ColumnDef::new(MetconMovements::Weight).double().null())
                    .col(
                        ColumnDef::new(MetconMovements::SortOrder)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_metcon_movements_workout")
                            .from(MetconMovements::Table, MetconMovements::MetconWorkoutId)
                            .to(MetconWorkouts::Table, MetconWorkouts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_metcon_movements_movement_type")
                            .from(MetconMovements::Table, MetconMovements::MovementTypeId)
                            .to(CatalogItems::Table, CatalogItems::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_metcon_movements_workout")
                    .table(MetconMovements::Table)
                    .col(MetconMovements::MetconWorkoutId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MetconMovements::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MetconWorkouts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(StrengthLifts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WorkoutSessions::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum CatalogItems {
    Table,
    Id,
}

#[derive(Iden)]
enum WorkoutSessions {
    Table,
    Id,
    UserId,
    Date,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum StrengthLifts {
    Table,
    Id,
    SessionId,
    ExerciseTypeId,
    Scheme,
    Sets,
    Reps,
    Weight,
    AdditionalWeight,
    Duration,
    RestPeriod,
    Comments,
    SortOrder,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum MetconWorkouts {
    Table,
    Id,
    SessionId,
    MetconTypeId,
    Rounds,
    TimeCapMinutes,
    ActualTimeMinutes,
    RestBetweenRounds,
    Comments,
    SortOrder,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum MetconMovements {
    Table,
    Id,
    MetconWorkoutId,
    MovementTypeId,
    Reps,
    DistanceMeters,
    Weight,
    SortOrder,
}
