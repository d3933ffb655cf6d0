use sea_orm_migration::prelude::*;

use crate::m20260301_000000_desks_and_employees::Employees;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // A desk can be referenced by at most one employee. NULLs stay distinct.
        manager
            .create_index(
                Index::create()
                    .name("idx_employees_desk_unique")
                    .table(Employees::Table)
                    .col(Employees::Desk)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_employees_desk_unique")
                    .table(Employees::Table)
                    .to_owned(),
            )
            .await
    }
}
