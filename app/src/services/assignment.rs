use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    models::{desk::Model as Desk, employee::Model as Employee},
    repos::{desks::DesksRepo, employees::EmployeesRepo},
    services::{
        desk_id::DeskId,
        error::{ServiceError, ServiceResult},
    },
};

/// Editable employee fields. A blank `desk` means "no desk".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeForm {
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub desk: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub manager: String,
}

impl EmployeeForm {
    fn into_employee(self, id: String) -> ServiceResult<(Employee, Option<DeskId>)> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(ServiceError::Validation("Name is required".to_string()));
        }

        let desk = match self.desk.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(DeskId::parse(raw)?),
        };

        let employee = Employee {
            id,
            name,
            title: self.title.trim().to_string(),
            desk: desk.as_ref().map(|d| d.to_string()),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            manager: self.manager.trim().to_string(),
        };

        Ok((employee, desk))
    }
}

/// Every write to `desks` and `employees` goes through here. Each operation
/// runs in its own transaction; dropping an uncommitted transaction rolls it
/// back, so an early `?` return leaves both tables untouched.
#[derive(Clone)]
pub struct AssignmentService {
    db: DatabaseConnection,
}

impl AssignmentService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create_employee(&self, id: &str, form: EmployeeForm) -> ServiceResult<Employee> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ServiceError::Validation("Id is required".to_string()));
        }
        let (employee, desk_id) = form.into_employee(id.to_string())?;

        let txn = self.db.begin().await?;
        let employees = EmployeesRepo::new(&txn);

        if employees.find(&employee.id).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "employee {} already exists",
                employee.id
            )));
        }

        if let Some(desk_id) = &desk_id {
            ensure_desk_available(&txn, desk_id).await?;
        }

        let employee = employees.create(employee).await?;
        if let Some(desk_id) = &desk_id {
            claim_desk(&txn, desk_id, &employee.name).await?;
        }

        txn.commit().await?;
        info!(
            "Created employee {} at desk {}",
            employee.id,
            employee.desk.as_deref().unwrap_or("-")
        );

        Ok(employee)
    }

    pub async fn edit_employee(&self, id: &str, form: EmployeeForm) -> ServiceResult<Employee> {
        let txn = self.db.begin().await?;
        let employees = EmployeesRepo::new(&txn);
        let desks = DesksRepo::new(&txn);

        let current = employees
            .find(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Employee not found".to_string()))?;
        let (updated, target) = form.into_employee(current.id.clone())?;

        match (current.desk.as_deref(), target.as_ref()) {
            (Some(held), Some(target)) if held == target.as_str() => {
                // Same desk: it must still exist, and follows a rename.
                desks
                    .find(held)
                    .await?
                    .ok_or_else(|| ServiceError::NotFound("Desk not found".to_string()))?;
                if updated.name != current.name {
                    desks.rename_occupant(held, &updated.name).await?;
                }
            }
            (held, Some(target)) => {
                ensure_desk_available(&txn, target).await?;
                if let Some(held) = held {
                    desks.vacate(held).await?;
                }
                claim_desk(&txn, target, &updated.name).await?;
            }
            (Some(held), None) => {
                desks.vacate(held).await?;
            }
            (None, None) => {}
        }

        let employee = employees.save(updated).await?;
        txn.commit().await?;
        info!(
            "Updated employee {} (desk {} -> {})",
            employee.id,
            current.desk.as_deref().unwrap_or("-"),
            employee.desk.as_deref().unwrap_or("-")
        );

        Ok(employee)
    }

    pub async fn delete_employee(&self, id: &str) -> ServiceResult<Employee> {
        let txn = self.db.begin().await?;
        let employees = EmployeesRepo::new(&txn);

        let employee = employees
            .find(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Employee not found".to_string()))?;

        employees.delete(&employee.id).await?;
        if let Some(held) = employee.desk.as_deref() {
            DesksRepo::new(&txn).vacate(held).await?;
        }

        txn.commit().await?;
        info!("Deleted employee {}", employee.id);

        Ok(employee)
    }

    /// Seats an employee at a desk picked on the floor map, releasing whatever
    /// desk they held before.
    pub async fn move_occupant(&self, desk_id: &str, employee_id: &str) -> ServiceResult<Desk> {
        let desk_id = DeskId::parse(desk_id)?;

        let txn = self.db.begin().await?;
        let employees = EmployeesRepo::new(&txn);
        let desks = DesksRepo::new(&txn);

        let mut employee = employees
            .find(employee_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Employee not found".to_string()))?;

        if employee.desk.as_deref() == Some(desk_id.as_str()) {
            return Ok(desks.get(desk_id.as_str()).await?);
        }

        ensure_desk_available(&txn, &desk_id).await?;
        if let Some(held) = employee.desk.as_deref() {
            desks.vacate(held).await?;
        }
        claim_desk(&txn, &desk_id, &employee.name).await?;

        let previous = employee.desk.replace(desk_id.to_string());
        employees.save(employee.clone()).await?;
        let desk = desks.get(desk_id.as_str()).await?;

        txn.commit().await?;
        info!(
            "Moved employee {} from {} to {}",
            employee.id,
            previous.as_deref().unwrap_or("-"),
            desk_id
        );

        Ok(desk)
    }

    /// Empties a desk. Clearing a desk that is already free is not an error.
    pub async fn clear_desk(&self, desk_id: &str) -> ServiceResult<Desk> {
        let txn = self.db.begin().await?;
        let desks = DesksRepo::new(&txn);

        let desk = desks
            .find(desk_id.trim())
            .await?
            .ok_or_else(|| ServiceError::NotFound("Desk not found".to_string()))?;

        let unassigned = EmployeesRepo::new(&txn)
            .unassign_desk(&desk.desk_id)
            .await?;
        desks.vacate(&desk.desk_id).await?;
        let desk = desks.get(&desk.desk_id).await?;

        txn.commit().await?;
        if !unassigned.is_empty() {
            info!("Cleared desk {} (was {:?})", desk.desk_id, unassigned);
        }

        Ok(desk)
    }

    pub async fn create_desk(&self, desk_id: &str) -> ServiceResult<Desk> {
        let desk_id = DeskId::parse(desk_id)?;

        let txn = self.db.begin().await?;
        let desks = DesksRepo::new(&txn);

        if desks.find(desk_id.as_str()).await?.is_some() {
            return Err(ServiceError::Conflict("Desk already exists.".to_string()));
        }
        let desk = desks.create_vacant(desk_id.as_str()).await?;

        txn.commit().await?;
        info!("Created desk {}", desk.desk_id);

        Ok(desk)
    }

    /// Removes a desk, unassigning whoever held it.
    pub async fn delete_desk(&self, desk_id: &str) -> ServiceResult<Vec<String>> {
        let txn = self.db.begin().await?;

        let desk = DesksRepo::new(&txn)
            .find(desk_id.trim())
            .await?
            .ok_or_else(|| ServiceError::NotFound("Desk not found".to_string()))?;

        let unassigned = EmployeesRepo::new(&txn)
            .unassign_desk(&desk.desk_id)
            .await?;
        DesksRepo::new(&txn).delete(&desk.desk_id).await?;

        txn.commit().await?;
        info!("Deleted desk {}", desk.desk_id);

        Ok(unassigned)
    }
}

/// Fails unless the desk exists and nobody sits there.
async fn ensure_desk_available<C: ConnectionTrait>(db: &C, desk_id: &DeskId) -> ServiceResult<()> {
    let desk = DesksRepo::new(db)
        .find(desk_id.as_str())
        .await?
        .ok_or_else(|| ServiceError::NotFound("Desk not found".to_string()))?;
    let holder = EmployeesRepo::new(db).holding_desk(desk_id.as_str()).await?;

    if desk.is_vacant() && holder.is_none() {
        return Ok(());
    }

    let occupant = desk
        .occupant
        .filter(|o| !o.is_empty())
        .or(holder.map(|e| e.name))
        .unwrap_or_default();
    warn!("Rejected assignment to desk {}: held by {}", desk_id, occupant);

    Err(ServiceError::Conflict(format!(
        "desk already occupied by {}",
        occupant
    )))
}

async fn claim_desk<C: ConnectionTrait>(db: &C, desk_id: &DeskId, name: &str) -> ServiceResult<()> {
    let desks = DesksRepo::new(db);
    if desks.claim(desk_id.as_str(), name).await? {
        return Ok(());
    }

    let occupant = desks
        .find(desk_id.as_str())
        .await?
        .and_then(|d| d.occupant)
        .unwrap_or_default();
    Err(ServiceError::Conflict(format!(
        "desk already occupied by {}",
        occupant
    )))
}
