use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum GarageError {
    #[error("Garage not found")]
    GarageNotFound,

    #[error("No garages found")]
    NoGaragesFound,

    #[error("Garage capacity must be a positive integer")]
    InvalidCapacity,

    #[error("Invalid date format, expected YYYY-MM-DD")]
    InvalidDateFormat,
}

impl GarageError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            GarageError::GarageNotFound => StatusCode::NOT_FOUND,
            GarageError::NoGaragesFound => StatusCode::NOT_FOUND,
            GarageError::InvalidCapacity => StatusCode::BAD_REQUEST,
            GarageError::InvalidDateFormat => StatusCode::BAD_REQUEST,
        }
    }
}
