use super::{CarError, GarageError, MaintenanceError};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Car error: {0}")]
    CarError(#[from] CarError),

    #[error("Garage error: {0}")]
    GarageError(#[from] GarageError),

    #[error("Maintenance error: {0}")]
    MaintenanceError(#[from] MaintenanceError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}
