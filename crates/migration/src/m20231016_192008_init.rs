//! Initial schema migration.
//!
//! - `users`: accounts and their privilege flags
//! - `events`: groups of matches with a lifecycle status
//! - `matches`: fixtures, owned by an event
//! - `predictions`: one guess per user and match
//!
//! Statuses are stored as the ordinal of their enum. Deleting a user, an
//! event or a match cascades to whatever references it.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Email,
    HashedPassword,
    IsActive,
    IsSuperuser,
}

#[derive(Iden)]
enum Events {
    Table,
    Id,
    Name,
    Status,
    Deadline,
}

#[derive(Iden)]
enum Matches {
    Table,
    Id,
    HomeTeam,
    AwayTeam,
    Status,
    HomeGoals,
    AwayGoals,
    StartTime,
    EventId,
}

#[derive(Iden)]
enum Predictions {
    Table,
    Id,
    HomeGoals,
    AwayGoals,
    Points,
    MatchId,
    UserId,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Users::Email).string_len(320).not_null())
                    .col(
                        ColumnDef::new(Users::HashedPassword)
                            .string_len(1024)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Users::IsSuperuser)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-users-email-unique")
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Events
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Events::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Events::Name).string_len(128).not_null())
                    .col(
                        ColumnDef::new(Events::Status)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Events::Deadline).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-events-status-deadline")
                    .table(Events::Table)
                    .col(Events::Status)
                    .col(Events::Deadline)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Matches
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Matches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Matches::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Matches::HomeTeam).string_len(128).not_null())
                    .col(ColumnDef::new(Matches::AwayTeam).string_len(128).not_null())
                    .col(
                        ColumnDef::new(Matches::Status)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Matches::HomeGoals).integer())
                    .col(ColumnDef::new(Matches::AwayGoals).integer())
                    .col(ColumnDef::new(Matches::StartTime).timestamp().not_null())
                    .col(ColumnDef::new(Matches::EventId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-matches-event_id")
                            .from(Matches::Table, Matches::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-matches-event_id")
                    .table(Matches::Table)
                    .col(Matches::EventId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Predictions
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Predictions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Predictions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Predictions::HomeGoals).integer())
                    .col(ColumnDef::new(Predictions::AwayGoals).integer())
                    .col(ColumnDef::new(Predictions::Points).integer())
                    .col(ColumnDef::new(Predictions::MatchId).integer().not_null())
                    .col(ColumnDef::new(Predictions::UserId).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-predictions-match_id")
                            .from(Predictions::Table, Predictions::MatchId)
                            .to(Matches::Table, Matches::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-predictions-user_id")
                            .from(Predictions::Table, Predictions::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // At most one prediction per user and match.
        manager
            .create_index(
                Index::create()
                    .name("idx-predictions-match_id-user_id-unique")
                    .table(Predictions::Table)
                    .col(Predictions::MatchId)
                    .col(Predictions::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-predictions-user_id")
                    .table(Predictions::Table)
                    .col(Predictions::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(Predictions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Matches::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
