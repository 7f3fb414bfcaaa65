#![forbid(unsafe_code)]

/// Coarse failure taxonomy surfaced to callers alongside the precise error code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    NotFound,
    ValidationFailure,
    PersistenceFailure,
}

impl ErrorClass {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::ValidationFailure => "validation_failure",
            Self::PersistenceFailure => "persistence_failure",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("sqlite: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    #[error("unknown id")]
    UnknownId,
    #[error("unknown scope")]
    UnknownScope,
    #[error("order out of range (order={order}, siblings={len})")]
    OrderOutOfRange { order: i64, len: usize },
    #[error("stale order (expected={expected}, actual={actual})")]
    StaleOrder { expected: i64, actual: i64 },
    #[error("revision mismatch (expected={expected}, actual={actual})")]
    RevisionMismatch { expected: i64, actual: i64 },
}

impl StoreError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "IO",
            Self::Sql(_) => "SQL",
            Self::InvalidInput(message) if message.starts_with("RESET_REQUIRED") => {
                "RESET_REQUIRED"
            }
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::UnknownId => "UNKNOWN_ID",
            Self::UnknownScope => "UNKNOWN_SCOPE",
            Self::OrderOutOfRange { .. } => "ORDER_OUT_OF_RANGE",
            Self::StaleOrder { .. } => "STALE_ORDER",
            Self::RevisionMismatch { .. } => "REVISION_MISMATCH",
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            Self::UnknownId | Self::UnknownScope => ErrorClass::NotFound,
            Self::InvalidInput(_)
            | Self::OrderOutOfRange { .. }
            | Self::StaleOrder { .. }
            | Self::RevisionMismatch { .. } => ErrorClass::ValidationFailure,
            Self::Io(_) | Self::Sql(_) => ErrorClass::PersistenceFailure,
        }
    }
}
