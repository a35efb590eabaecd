//! Creates the translations table holding one row per provider translation job

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Translations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Translations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Translations::OriginalString)
                            .string_len(500)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Translations::TranslatedString)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Translations::Status)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Translations::SourceLanguage)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Translations::TargetLanguage)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Translations::Uid)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Translations::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Translations::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Reconciliation filters on status every listing request
        manager
            .create_index(
                Index::create()
                    .name("idx_translations_status")
                    .table(Translations::Table)
                    .col(Translations::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Translations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Translations {
    Table,
    Id,
    OriginalString,
    TranslatedString,
    Status,
    SourceLanguage,
    TargetLanguage,
    Uid,
    CreatedAt,
    UpdatedAt,
}
