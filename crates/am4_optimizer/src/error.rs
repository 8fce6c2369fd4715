use std::fmt;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Airport,
    Aircraft,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Airport => write!(f, "airport"),
            EntityKind::Aircraft => write!(f, "aircraft"),
        }
    }
}

/// A reason the reference dataset was refused at load time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatasetIssue {
    #[error("the dataset has no {0}")]
    Empty(EntityKind),

    #[error("duplicate {kind} id `{id}`")]
    DuplicateId { kind: EntityKind, id: String },

    #[error("{kind} `{id}` has an empty id or name")]
    MissingField { kind: EntityKind, id: String },

    #[error("{kind} `{id}`: {field} is out of domain ({value})")]
    OutOfDomain {
        kind: EntityKind,
        id: String,
        field: &'static str,
        value: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("{kind} `{id}` not found")]
    NotFound { kind: EntityKind, id: String },

    #[error("invalid dataset: {0}")]
    DatasetInvalid(#[from] DatasetIssue),

    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("the economic model produced a non-finite {quantity}")]
    NonFinite { quantity: &'static str },
}

impl EngineError {
    pub(crate) fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        EngineError::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        EngineError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

/// Fails with [`EngineError::NonFinite`] unless `value` is a definite number.
pub(crate) fn ensure_finite(quantity: &'static str, value: f64) -> Result<f64, EngineError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EngineError::NonFinite { quantity })
    }
}

/// Fails with [`EngineError::InvalidArgument`] unless `value` is finite and `>= 0`.
pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> Result<f64, EngineError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(EngineError::invalid_argument(
            name,
            format!("expected a finite non-negative number, got {value}"),
        ))
    }
}
