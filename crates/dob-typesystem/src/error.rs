//! Error types for container access and identifier construction.

use thiserror::Error;

/// Error kinds reported by container operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// C001: Read of a null value
    NullValue,
    /// C002: Array or sequence index out of range
    IndexOutOfRange,
    /// C003: Dictionary key not present
    KeyNotFound,
    /// C004: Copy between incompatible container types
    TypeMismatch,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "C001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::NullValue => "C001",
            ErrorCode::IndexOutOfRange => "C002",
            ErrorCode::KeyNotFound => "C003",
            ErrorCode::TypeMismatch => "C004",
        }
    }
}

/// Error raised by a container operation whose precondition does not hold.
///
/// Containers never substitute a default for a null read and never clamp
/// an index; every violation surfaces here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainerError {
    #[error("[C001] value is null")]
    NullValue,

    #[error("[C002] index {index} out of range (len: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("[C003] key {key} not found")]
    KeyNotFound { key: String },

    #[error("[C004] cannot copy {found} into {expected}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl ContainerError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ContainerError::NullValue => ErrorCode::NullValue,
            ContainerError::IndexOutOfRange { .. } => ErrorCode::IndexOutOfRange,
            ContainerError::KeyNotFound { .. } => ErrorCode::KeyNotFound,
            ContainerError::TypeMismatch { .. } => ErrorCode::TypeMismatch,
        }
    }

    pub(crate) fn out_of_range(index: usize, len: usize) -> Self {
        ContainerError::IndexOutOfRange { index, len }
    }

    pub(crate) fn key_not_found(key: &impl std::fmt::Debug) -> Self {
        ContainerError::KeyNotFound {
            key: format!("{key:?}"),
        }
    }
}

/// Error when constructing a hashed identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("{kind} cannot be generated from an empty string")]
    EmptyString { kind: &'static str },
}
