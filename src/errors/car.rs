use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum CarError {
    #[error("Car not found")]
    CarNotFound,

    #[error("No cars found")]
    NoCarsFound,

    #[error("Invalid request parameters")]
    InvalidRequest,
}

impl CarError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CarError::CarNotFound => StatusCode::NOT_FOUND,
            CarError::NoCarsFound => StatusCode::NOT_FOUND,
            CarError::InvalidRequest => StatusCode::BAD_REQUEST,
        }
    }
}
