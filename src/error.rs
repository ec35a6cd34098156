use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Consistency violation: {0}")]
    Consistency(String),
}

impl AppError {
    /// True when the underlying sqlx error is a unique-constraint violation.
    ///
    /// 2067 = SQLite unique constraint, 23505 = PostgreSQL unique violation.
    pub fn is_unique_violation(&self) -> bool {
        if let AppError::Database(e) = self {
            if let Some(db_err) = e.as_database_error() {
                let code = db_err.code().unwrap_or_default();
                return code == "2067" || code == "23505";
            }
        }
        false
    }
}
