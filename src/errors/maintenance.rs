use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum MaintenanceError {
    #[error("Maintenance record not found")]
    MaintenanceNotFound,

    #[error("No maintenance records found")]
    NoMaintenanceFound,

    #[error("Service type cannot be empty")]
    EmptyServiceType,

    #[error("Garage has no free capacity on the requested date")]
    CapacityExceeded,

    #[error("Invalid date format, expected YYYY-MM-DD")]
    InvalidDateFormat,

    #[error("Invalid month format, expected YYYY-MM")]
    InvalidMonthFormat,
}

impl MaintenanceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            MaintenanceError::MaintenanceNotFound => StatusCode::NOT_FOUND,
            MaintenanceError::NoMaintenanceFound => StatusCode::NOT_FOUND,
            MaintenanceError::EmptyServiceType => StatusCode::BAD_REQUEST,
            MaintenanceError::CapacityExceeded => StatusCode::BAD_REQUEST,
            MaintenanceError::InvalidDateFormat => StatusCode::BAD_REQUEST,
            MaintenanceError::InvalidMonthFormat => StatusCode::BAD_REQUEST,
        }
    }
}
