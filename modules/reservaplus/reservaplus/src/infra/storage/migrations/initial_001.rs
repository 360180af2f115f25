use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(KvItems::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(KvItems::Pk).string().not_null())
                    .col(ColumnDef::new(KvItems::Sk).string().not_null())
                    .col(ColumnDef::new(KvItems::Attributes).text().not_null())
                    .primary_key(Index::create().col(KvItems::Pk).col(KvItems::Sk))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(KvItems::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum KvItems {
    Table,
    Pk,
    Sk,
    Attributes,
}
