//! # Error Types
//!
//! Structured error types for panel_core. Every failure carries enough
//! context to tell which station input was bad and why, so callers can
//! decide whether to skip a station, tighten a tolerance, or abort the run.
//!
//! All errors are terminal for the station being processed: the sizing
//! pipeline never returns a partial or degraded record on error.
//!
//! ## Example
//!
//! ```rust
//! use panel_core::errors::{PanelError, PanelResult};
//!
//! fn validate_thickness(thickness_m: f64) -> PanelResult<()> {
//!     if thickness_m <= 0.0 {
//!         return Err(PanelError::invalid_geometry(
//!             "skin_thickness_m",
//!             thickness_m.to_string(),
//!             "Skin thickness must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for panel_core operations
pub type PanelResult<T> = Result<T, PanelError>;

/// Structured error type for the sizing pipeline.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic handling by batch runners and report tooling.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum PanelError {
    /// A physical dimension is non-positive or otherwise out of range
    #[error("Invalid geometry for '{field}': {value} - {reason}")]
    InvalidGeometry {
        field: String,
        value: String,
        reason: String,
    },

    /// Boundary condition not in the buckling coefficient table
    #[error("Unsupported boundary condition: '{value}'")]
    InvalidBoundaryCondition { value: String },

    /// Effective-width method name not recognized
    #[error("Unsupported reduction method: '{value}'")]
    InvalidMethod { value: String },

    /// Derived cross-section is degenerate (non-positive area or inertia)
    #[error("Invalid section: {quantity} = {value}")]
    InvalidSection { quantity: String, value: f64 },

    /// Iteration cap reached without meeting the convergence tolerance
    #[error(
        "Reduction did not converge after {iterations} iterations \
         (last relative change {last_relative_change:.4}, tolerance {tolerance:.4})"
    )]
    NonConvergence {
        iterations: usize,
        last_relative_change: f64,
        tolerance: f64,
    },

    /// Span fraction outside [0, 1]
    #[error("Span fraction out of range: {value} (expected 0.0..=1.0)")]
    OutOfRange { value: f64 },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// Malformed line in an externally supplied data file
    #[error("Data format error in '{path}' line {line}: {reason}")]
    DataFormat {
        path: String,
        line: usize,
        reason: String,
    },

    /// File is locked by another user/process
    #[error("File locked: '{path}' is locked by {locked_by} since {locked_at}")]
    FileLocked {
        path: String,
        locked_by: String,
        locked_at: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

impl PanelError {
    /// Create an InvalidGeometry error
    pub fn invalid_geometry(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        PanelError::InvalidGeometry {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidSection error
    pub fn invalid_section(quantity: impl Into<String>, value: f64) -> Self {
        PanelError::InvalidSection {
            quantity: quantity.into(),
            value,
        }
    }

    /// Create an OutOfRange error for a span fraction
    pub fn out_of_range(value: f64) -> Self {
        PanelError::OutOfRange { value }
    }

    /// Create a FileError
    pub fn file_error(
        operation: impl Into<String>,
        path: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        PanelError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a DataFormat error
    pub fn data_format(path: impl Into<String>, line: usize, reason: impl Into<String>) -> Self {
        PanelError::DataFormat {
            path: path.into(),
            line,
            reason: reason.into(),
        }
    }

    /// Create a FileLocked error
    pub fn file_locked(
        path: impl Into<String>,
        locked_by: impl Into<String>,
        locked_at: impl Into<String>,
    ) -> Self {
        PanelError::FileLocked {
            path: path.into(),
            locked_by: locked_by.into(),
            locked_at: locked_at.into(),
        }
    }

    /// Check if this is a recoverable error (e.g., can retry)
    pub fn is_recoverable(&self) -> bool {
        matches!(self, PanelError::FileLocked { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            PanelError::InvalidGeometry { .. } => "INVALID_GEOMETRY",
            PanelError::InvalidBoundaryCondition { .. } => "INVALID_BOUNDARY_CONDITION",
            PanelError::InvalidMethod { .. } => "INVALID_METHOD",
            PanelError::InvalidSection { .. } => "INVALID_SECTION",
            PanelError::NonConvergence { .. } => "NON_CONVERGENCE",
            PanelError::OutOfRange { .. } => "OUT_OF_RANGE",
            PanelError::FileError { .. } => "FILE_ERROR",
            PanelError::DataFormat { .. } => "DATA_FORMAT",
            PanelError::FileLocked { .. } => "FILE_LOCKED",
            PanelError::SerializationError { .. } => "SERIALIZATION_ERROR",
            PanelError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = PanelError::invalid_geometry("skin_thickness_m", "-0.002", "must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: PanelError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            PanelError::out_of_range(1.2).error_code(),
            "OUT_OF_RANGE"
        );
        assert_eq!(
            PanelError::invalid_section("reduced_inertia_m4", 0.0).error_code(),
            "INVALID_SECTION"
        );
        let nc = PanelError::NonConvergence {
            iterations: 10,
            last_relative_change: 0.08,
            tolerance: 0.02,
        };
        assert_eq!(nc.error_code(), "NON_CONVERGENCE");
    }

    #[test]
    fn test_recoverable() {
        let locked = PanelError::file_locked("run.wpd", "user@host", "2026-01-01T00:00:00Z");
        assert!(locked.is_recoverable());
        assert!(!PanelError::out_of_range(-0.1).is_recoverable());
    }
}
