use std::collections::BTreeSet;

use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::Serialize;
use tracing::info;

use crate::{
    models::employee::Model as Employee,
    repos::{desks::DesksRepo, employees::EmployeesRepo},
    services::{
        desk_id::{DeskId, Floor},
        error::{ServiceError, ServiceResult},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Occupancy {
    Vacant,
    Occupied,
    NotFound,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeskLookup {
    pub desk_id: String,
    pub floor: Option<Floor>,
    pub status: Occupancy,
    pub occupant: Option<String>,
    pub employee: Option<Employee>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmployeeLocation {
    pub employee_id: String,
    pub name: String,
    pub desk: Option<DeskId>,
    pub floor: Option<Floor>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FloorDesk {
    pub desk_id: DeskId,
    pub status: Occupancy,
    pub occupant: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RefillReport {
    pub floor: String,
    pub kept: Vec<String>,
    pub inserted: Vec<String>,
    pub removed: Vec<String>,
    pub unassigned: Vec<String>,
}

pub fn floor_of(desk_id: &str) -> ServiceResult<Floor> {
    Ok(DeskId::parse(desk_id)?.floor())
}

#[derive(Clone)]
pub struct FloorService {
    db: DatabaseConnection,
}

impl FloorService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Point query used by the interactive map. Malformed ids are reported as
    /// not found rather than rejected.
    pub async fn lookup(&self, desk_id: &str) -> ServiceResult<DeskLookup> {
        let desk_id = desk_id.trim();
        let Ok(parsed) = DeskId::parse(desk_id) else {
            return Ok(DeskLookup {
                desk_id: desk_id.to_string(),
                floor: None,
                status: Occupancy::NotFound,
                occupant: None,
                employee: None,
            });
        };

        let desk = DesksRepo::new(&self.db).find(parsed.as_str()).await?;
        let Some(desk) = desk else {
            return Ok(DeskLookup {
                desk_id: parsed.to_string(),
                floor: Some(parsed.floor()),
                status: Occupancy::NotFound,
                occupant: None,
                employee: None,
            });
        };

        let employee = EmployeesRepo::new(&self.db)
            .holding_desk(parsed.as_str())
            .await?;
        let status = if desk.is_vacant() {
            Occupancy::Vacant
        } else {
            Occupancy::Occupied
        };

        Ok(DeskLookup {
            desk_id: desk.desk_id,
            floor: Some(parsed.floor()),
            status,
            occupant: desk.occupant.filter(|o| !o.is_empty()),
            employee,
        })
    }

    pub async fn is_occupied(&self, desk_id: &str) -> ServiceResult<Occupancy> {
        Ok(self.lookup(desk_id).await?.status)
    }

    /// Where to find an employee on the map.
    pub async fn locate(&self, employee_id: &str) -> ServiceResult<EmployeeLocation> {
        let employee = EmployeesRepo::new(&self.db)
            .find(employee_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Employee not found".to_string()))?;

        let desk = employee
            .desk
            .as_deref()
            .and_then(|d| DeskId::parse(d).ok());

        Ok(EmployeeLocation {
            employee_id: employee.id,
            name: employee.name,
            floor: desk.as_ref().map(DeskId::floor),
            desk,
        })
    }

    pub async fn desks_on_floor(&self, floor: &str) -> ServiceResult<Vec<FloorDesk>> {
        let floor = Floor::parse(floor)?;

        let desks = DesksRepo::new(&self.db)
            .matching(&floor.desk_id_pattern())
            .await?;
        Ok(desks
            .into_iter()
            .filter_map(|desk| {
                let desk_id = DeskId::parse(&desk.desk_id).ok()?;
                let status = if desk.is_vacant() {
                    Occupancy::Vacant
                } else {
                    Occupancy::Occupied
                };
                Some(FloorDesk {
                    desk_id,
                    status,
                    occupant: desk.occupant.filter(|o| !o.is_empty()),
                })
            })
            .collect())
    }

    /// Makes the stored desks of `floor` match `desk_ids` exactly: desks
    /// missing from the list are deleted (their holders unassigned), new ids
    /// are inserted vacant, everything else keeps its occupant.
    pub async fn refill_floor(&self, floor: &str, desk_ids: &[String]) -> ServiceResult<RefillReport> {
        let floor = Floor::parse(floor)?;

        let mut wanted = BTreeSet::new();
        for raw in desk_ids {
            let desk_id = DeskId::parse(raw)?;
            if desk_id.floor() != floor {
                return Err(ServiceError::Validation(format!(
                    "desk {} is not on floor {}",
                    desk_id, floor
                )));
            }
            wanted.insert(desk_id);
        }

        let txn = self.db.begin().await?;
        let desks = DesksRepo::new(&txn);
        let employees = EmployeesRepo::new(&txn);
        let mut report = RefillReport {
            floor: floor.to_string(),
            ..Default::default()
        };

        let mut present = BTreeSet::new();
        for desk in desks.matching(&floor.desk_id_pattern()).await? {
            let Ok(desk_id) = DeskId::parse(&desk.desk_id) else {
                continue;
            };

            if wanted.contains(&desk_id) {
                report.kept.push(desk.desk_id);
                present.insert(desk_id);
            } else {
                report
                    .unassigned
                    .extend(employees.unassign_desk(desk_id.as_str()).await?);
                desks.delete(desk_id.as_str()).await?;
                report.removed.push(desk.desk_id);
            }
        }

        for desk_id in wanted.difference(&present) {
            desks.create_vacant(desk_id.as_str()).await?;
            report.inserted.push(desk_id.to_string());
        }

        txn.commit().await?;
        info!(
            "Refilled floor {}: {} kept, {} inserted, {} removed, {} unassigned",
            report.floor,
            report.kept.len(),
            report.inserted.len(),
            report.removed.len(),
            report.unassigned.len()
        );

        Ok(report)
    }
}
