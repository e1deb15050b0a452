use crate::ids::RegionId;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    InvalidInput,
    NotFound,
    Conflict,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
        }
    }
}

/// Failures surfaced by the region engine. All of them are recoverable by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeofenceError {
    #[error("no drawing session is active")]
    NoActiveSession,
    #[error("a region needs at least 3 points, got {count}")]
    TooFewPoints { count: usize },
    #[error("region {0} not found")]
    NotFound(RegionId),
    #[error("no region is selected")]
    NothingSelected,
}

impl GeofenceError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::NoActiveSession => ErrorCode::Conflict,
            Self::TooFewPoints { .. } => ErrorCode::InvalidInput,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::NothingSelected => ErrorCode::Conflict,
        }
    }
}

pub type GeofenceResult<T> = Result<T, GeofenceError>;
