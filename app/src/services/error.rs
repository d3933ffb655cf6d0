use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("Database Error: {0}")]
    Database(#[from] DbErr),

    #[error("Diagram Error: {0}")]
    Diagram(#[from] std::io::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
