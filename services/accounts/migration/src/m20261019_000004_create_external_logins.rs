use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ExternalLogins::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ExternalLogins::Provider).string().not_null())
                    .col(
                        ColumnDef::new(ExternalLogins::ProviderKey)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ExternalLogins::AccountId).uuid().not_null())
                    .col(
                        ColumnDef::new(ExternalLogins::ProviderDisplayName)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ExternalLogins::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .primary_key(
                        Index::create()
                            .col(ExternalLogins::Provider)
                            .col(ExternalLogins::ProviderKey),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ExternalLogins::Table, ExternalLogins::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(ExternalLogins::Table)
                    .col(ExternalLogins::AccountId)
                    .name("idx_external_logins_account_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ExternalLogins::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ExternalLogins {
    Table,
    Provider,
    ProviderKey,
    AccountId,
    ProviderDisplayName,
    CreatedAt,
}

#[derive(Iden)]
enum Accounts {
    Table,
    Id,
}
