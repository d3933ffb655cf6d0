use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter,
};

use crate::models::employee::{self, ActiveModel, Entity as EmployeeEntity, Model as Employee};

pub struct EmployeesRepo<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> EmployeesRepo<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, employee: Employee) -> Result<Employee, DbErr> {
        let employee_model = ActiveModel {
            id: Set(employee.id),
            name: Set(employee.name),
            title: Set(employee.title),
            desk: Set(employee.desk),
            email: Set(employee.email),
            phone: Set(employee.phone),
            manager: Set(employee.manager),
        };

        employee_model.insert(self.db).await
    }

    pub async fn find(&self, id: &str) -> Result<Option<Employee>, DbErr> {
        EmployeeEntity::find_by_id(id.to_string()).one(self.db).await
    }

    pub async fn get(&self, id: &str) -> Result<Employee, DbErr> {
        self.find(id)
            .await?
            .ok_or(DbErr::RecordNotFound("Employee not found".to_string()))
    }

    pub async fn holding_desk(&self, desk_id: &str) -> Result<Option<Employee>, DbErr> {
        EmployeeEntity::find()
            .filter(employee::Column::Desk.eq(desk_id))
            .one(self.db)
            .await
    }

    /// Overwrites every column except the primary key.
    pub async fn save(&self, employee: Employee) -> Result<Employee, DbErr> {
        let mut employee_model: ActiveModel = self.get(&employee.id).await?.into();
        employee_model.name = Set(employee.name);
        employee_model.title = Set(employee.title);
        employee_model.desk = Set(employee.desk);
        employee_model.email = Set(employee.email);
        employee_model.phone = Set(employee.phone);
        employee_model.manager = Set(employee.manager);

        employee_model.update(self.db).await
    }

    /// Detaches everyone referencing the desk and returns their ids.
    pub async fn unassign_desk(&self, desk_id: &str) -> Result<Vec<String>, DbErr> {
        let holders = EmployeeEntity::find()
            .filter(employee::Column::Desk.eq(desk_id))
            .all(self.db)
            .await?;

        if holders.is_empty() {
            return Ok(Vec::new());
        }

        EmployeeEntity::update_many()
            .col_expr(employee::Column::Desk, Expr::value(Option::<String>::None))
            .filter(employee::Column::Desk.eq(desk_id))
            .exec(self.db)
            .await?;

        Ok(holders.into_iter().map(|e| e.id).collect())
    }

    pub async fn delete(&self, id: &str) -> Result<bool, DbErr> {
        let result = EmployeeEntity::delete_by_id(id.to_string())
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{database::connect::connect_test_database, repos::desks::DesksRepo};

    fn employee(id: &str, desk: Option<&str>) -> Employee {
        Employee {
            id: id.to_string(),
            name: id.to_uppercase(),
            title: String::new(),
            desk: desk.map(str::to_string),
            email: String::new(),
            phone: String::new(),
            manager: String::new(),
        }
    }

    #[tokio::test]
    async fn test_two_employees_cannot_share_a_desk() {
        let db = connect_test_database().await;
        DesksRepo::new(&db).create_vacant("D4001").await.unwrap();
        let employees = EmployeesRepo::new(&db);

        employees.create(employee("e1", Some("D4001"))).await.unwrap();
        assert!(employees.create(employee("e2", Some("D4001"))).await.is_err());
        assert!(employees.find("e2").await.unwrap().is_none());

        // Any number of employees may have no desk.
        employees.create(employee("e3", None)).await.unwrap();
        employees.create(employee("e4", None)).await.unwrap();
    }

    #[tokio::test]
    async fn test_desk_must_exist() {
        let db = connect_test_database().await;

        let result = EmployeesRepo::new(&db)
            .create(employee("e1", Some("D4999")))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_unassign_desk_returns_holders() {
        let db = connect_test_database().await;
        DesksRepo::new(&db).create_vacant("D4001").await.unwrap();
        let employees = EmployeesRepo::new(&db);
        employees.create(employee("e1", Some("D4001"))).await.unwrap();

        assert_eq!(employees.unassign_desk("D4001").await.unwrap(), vec!["e1"]);
        assert!(employees.unassign_desk("D4001").await.unwrap().is_empty());
        assert_eq!(employees.get("e1").await.unwrap().desk, None);
    }
}
