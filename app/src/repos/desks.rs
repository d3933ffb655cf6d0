use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::models::desk::{self, ActiveModel, Entity as DeskEntity, Model as Desk};

pub struct DesksRepo<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DesksRepo<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create_vacant(&self, desk_id: &str) -> Result<Desk, DbErr> {
        let desk_model = ActiveModel {
            desk_id: Set(desk_id.to_string()),
            occupant: Set(None),
        };

        desk_model.insert(self.db).await
    }

    pub async fn find(&self, desk_id: &str) -> Result<Option<Desk>, DbErr> {
        DeskEntity::find_by_id(desk_id.to_string()).one(self.db).await
    }

    pub async fn get(&self, desk_id: &str) -> Result<Desk, DbErr> {
        self.find(desk_id)
            .await?
            .ok_or(DbErr::RecordNotFound("Desk not found".to_string()))
    }

    /// Desks whose id matches a `LIKE` pattern, ordered by id.
    pub async fn matching(&self, pattern: &str) -> Result<Vec<Desk>, DbErr> {
        DeskEntity::find()
            .filter(desk::Column::DeskId.like(pattern))
            .order_by_asc(desk::Column::DeskId)
            .all(self.db)
            .await
    }

    /// Sets the occupant only if the desk is still free. Returns false when
    /// another writer got there first.
    pub async fn claim(&self, desk_id: &str, occupant: &str) -> Result<bool, DbErr> {
        let result = DeskEntity::update_many()
            .col_expr(desk::Column::Occupant, Expr::value(occupant.to_string()))
            .filter(desk::Column::DeskId.eq(desk_id))
            .filter(
                Condition::any()
                    .add(desk::Column::Occupant.is_null())
                    .add(desk::Column::Occupant.eq("")),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Unconditionally rewrites the occupant name, used when the holder is renamed.
    pub async fn rename_occupant(&self, desk_id: &str, occupant: &str) -> Result<(), DbErr> {
        DeskEntity::update_many()
            .col_expr(desk::Column::Occupant, Expr::value(occupant.to_string()))
            .filter(desk::Column::DeskId.eq(desk_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn vacate(&self, desk_id: &str) -> Result<(), DbErr> {
        DeskEntity::update_many()
            .col_expr(desk::Column::Occupant, Expr::value(Option::<String>::None))
            .filter(desk::Column::DeskId.eq(desk_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn delete(&self, desk_id: &str) -> Result<bool, DbErr> {
        let result = DeskEntity::delete_by_id(desk_id.to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}
