use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Accounts::Username).string().not_null())
                    .col(
                        ColumnDef::new(Accounts::NormalizedUsername)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Accounts::Email).string().not_null())
                    .col(ColumnDef::new(Accounts::NormalizedEmail).string().not_null())
                    .col(
                        ColumnDef::new(Accounts::FirstName)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(Accounts::LastName)
                            .string()
                            .not_null()
                            .default(""),
                    )
                    .col(ColumnDef::new(Accounts::PhoneNumber).string().null())
                    .col(ColumnDef::new(Accounts::PasswordHash).string().null())
                    .col(
                        ColumnDef::new(Accounts::EmailConfirmed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Accounts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Accounts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Uniqueness is enforced here, not in the workflow: concurrent
        // registrations race past the lookup and one insert must lose.
        manager
            .create_index(
                Index::create()
                    .table(Accounts::Table)
                    .col(Accounts::NormalizedUsername)
                    .name("idx_accounts_normalized_username")
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Accounts::Table)
                    .col(Accounts::NormalizedEmail)
                    .name("idx_accounts_normalized_email")
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Accounts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Accounts {
    Table,
    Id,
    Username,
    NormalizedUsername,
    Email,
    NormalizedEmail,
    FirstName,
    LastName,
    PhoneNumber,
    PasswordHash,
    EmailConfirmed,
    CreatedAt,
    UpdatedAt,
}
