use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WatchHistory::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WatchHistory::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WatchHistory::ShowId).integer().not_null())
                    .col(ColumnDef::new(WatchHistory::Season).integer().not_null())
                    .col(ColumnDef::new(WatchHistory::Episode).integer().not_null())
                    .col(ColumnDef::new(WatchHistory::WatchedAt).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_watch_history_show")
                            .from(WatchHistory::Table, WatchHistory::ShowId)
                            .to(Shows::Table, Shows::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_watch_history_show_id")
                    .table(WatchHistory::Table)
                    .col(WatchHistory::ShowId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WatchHistory::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum WatchHistory {
    Table,
    Id,
    ShowId,
    Season,
    Episode,
    WatchedAt,
}

#[derive(DeriveIden)]
enum Shows {
    Table,
    Id,
}
