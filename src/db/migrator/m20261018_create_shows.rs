use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Shows::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Shows::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Shows::Title).string().not_null())
                    .col(ColumnDef::new(Shows::Service).string().null())
                    .col(
                        ColumnDef::new(Shows::CurrentSeason)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Shows::CurrentEpisode)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Shows::LatestSeason)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Shows::LatestEpisode)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Shows::AirDay).string().null())
                    .col(
                        ColumnDef::new(Shows::Priority)
                            .integer()
                            .not_null()
                            .default(2),
                    )
                    .col(ColumnDef::new(Shows::Notes).text().null())
                    .col(ColumnDef::new(Shows::CreatedAt).string().not_null())
                    .col(ColumnDef::new(Shows::UpdatedAt).string().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Shows::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Shows {
    Table,
    Id,
    Title,
    Service,
    CurrentSeason,
    CurrentEpisode,
    LatestSeason,
    LatestEpisode,
    AirDay,
    Priority,
    Notes,
    CreatedAt,
    UpdatedAt,
}
