use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sea_orm::DbErr),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("No active user")]
    NoActiveUser,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl AppError {
    /// True for the identity/authorization failures the UI renders inline
    /// instead of treating as faults.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            AppError::InvalidCredentials | AppError::EmailAlreadyRegistered | AppError::NoActiveUser
        )
    }
}
