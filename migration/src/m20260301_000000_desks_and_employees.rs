use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // desks
        manager
            .create_table(
                Table::create()
                    .table(Desks::Table)
                    .if_not_exists()
                    .col(string_len(Desks::DeskId, 5).primary_key())
                    .col(string_null(Desks::Occupant))
                    .to_owned(),
            )
            .await?;

        // employees
        manager
            .create_table(
                Table::create()
                    .table(Employees::Table)
                    .if_not_exists()
                    .col(string(Employees::Id).primary_key())
                    .col(string(Employees::Name))
                    .col(string(Employees::Title).default(""))
                    .col(string_len_null(Employees::Desk, 5))
                    .col(string(Employees::Email).default(""))
                    .col(string(Employees::Phone).default(""))
                    .col(string(Employees::Manager).default(""))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employees_desk")
                            .from(Employees::Table, Employees::Desk)
                            .to(Desks::Table, Desks::DeskId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Employees::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Desks::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Desks {
    Table,
    DeskId,
    Occupant,
}

#[derive(DeriveIden)]
pub enum Employees {
    Table,
    Id,
    Name,
    Title,
    Desk,
    Email,
    Phone,
    Manager,
}
