use thiserror::Error;

/// Errors produced by store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("task '{0}' not found")]
    TaskNotFound(String),

    #[error("project '{0}' not found")]
    ProjectNotFound(String),

    #[error("invalid status '{0}': must be todo, in-progress, or done")]
    InvalidStatus(String),

    #[error("project '{0}' is the default project and cannot be removed")]
    ProtectedProject(String),

    #[error("project '{0}' already exists")]
    DuplicateProject(String),

    #[error("storage error: {0}")]
    Persistence(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors from the mock authentication collaborator.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
}
