//! Create `usuarios` table.
//!
//! `id_expediente` is the natural key. `created_at` is filled by MySQL with
//! microsecond precision so newest-first ordering is stable for rows
//! inserted within the same second.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Usuarios::Table)
                    .if_not_exists()
                    .col(string_len(Usuarios::IdExpediente, 64).primary_key())
                    .col(string_len(Usuarios::Nombre, 255))
                    .col(string_len(Usuarios::Area, 255))
                    .col(
                        ColumnDef::new(Usuarios::CreatedAt)
                            .custom(Alias::new("TIMESTAMP(6)"))
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP(6)"),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_usuarios_created_at")
                    .table(Usuarios::Table)
                    .col(Usuarios::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Usuarios::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Usuarios { Table, IdExpediente, Nombre, Area, CreatedAt }
