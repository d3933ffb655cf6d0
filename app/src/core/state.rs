use sea_orm::DatabaseConnection;

use crate::config::{config::Config, floors::FloorsConfig};
use crate::services::{
    assignment::AssignmentService, directory::DirectoryService, floors::FloorService,
};

#[derive(Clone, Debug)]
pub struct AppState {
    pub database: DatabaseConnection,
    pub config: Config,
    pub floors: FloorsConfig,
}

impl AppState {
    pub fn assignments(&self) -> AssignmentService {
        AssignmentService::new(self.database.clone())
    }

    pub fn directory(&self) -> DirectoryService {
        DirectoryService::new(
            self.database.clone(),
            self.config.desk_page_size,
            self.config.employee_page_size,
        )
    }

    pub fn floor_lookup(&self) -> FloorService {
        FloorService::new(self.database.clone())
    }
}
