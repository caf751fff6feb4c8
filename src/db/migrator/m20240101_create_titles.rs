use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Titles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Titles::Pk)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Titles::ShowId).string_len(100).not_null())
                    .col(ColumnDef::new(Titles::Title).string_len(200).not_null())
                    .col(
                        ColumnDef::new(Titles::TitleFolded)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Titles::Type).string_len(50).not_null())
                    .col(ColumnDef::new(Titles::Director).string_len(100).null())
                    .col(
                        ColumnDef::new(Titles::DirectorFolded)
                            .string_len(100)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Titles::Cast)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(Titles::Country).string_len(100).null())
                    .col(
                        ColumnDef::new(Titles::CountryFolded)
                            .string_len(100)
                            .null(),
                    )
                    .col(ColumnDef::new(Titles::DateAdded).string_len(20).null())
                    .col(ColumnDef::new(Titles::ReleaseYear).string_len(20).null())
                    .col(ColumnDef::new(Titles::Rating).string_len(20).null())
                    .col(ColumnDef::new(Titles::Duration).string_len(50).null())
                    .col(
                        ColumnDef::new(Titles::Genres)
                            .text()
                            .not_null()
                            .default("[]"),
                    )
                    .col(ColumnDef::new(Titles::Description).string_len(1000).null())
                    .col(ColumnDef::new(Titles::Platform).string_len(50).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Titles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Titles {
    Table,
    Pk,
    ShowId,
    Title,
    TitleFolded,
    Type,
    Director,
    DirectorFolded,
    Cast,
    Country,
    CountryFolded,
    DateAdded,
    ReleaseYear,
    Rating,
    Duration,
    Genres,
    Description,
    Platform,
}
