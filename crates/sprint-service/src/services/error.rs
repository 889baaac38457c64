//! Errors returned by the service layer

use sprint_common::AppError;
use sprint_core::DomainError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A tracker rule was violated (unknown entity, duplicate tag, ...)
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Authentication and credential failures
    #[error(transparent)]
    App(#[from] AppError),

    /// Input that passed shape validation but breaks a cross-field rule
    #[error("Validation error: {0}")]
    Validation(String),

    /// The context was assembled without one of its collaborators
    #[error("Service context is missing its {0}")]
    MissingDependency(&'static str),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => sprint_common::error::domain_status(e),
            Self::App(e) => e.status_code(),
            Self::Validation(_) => 400,
            Self::MissingDependency(_) => 500,
        }
    }

    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::App(e) => e.error_code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::MissingDependency(_) => "INTERNAL_ERROR",
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
