// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Custom error types for the jsongauge harness.
//!
//! This module defines explicit enum error types as per coding guidelines.
//! No `Box<dyn Error>`, no `anyhow::Result` - all errors are strongly typed.
//!
//! Codec and correctness errors are local to one backend's run and never
//! propagate past it; only setup and report-emission errors are fatal.

use std::path::PathBuf;

use thiserror::Error;

/// Per-phase codec failure. Caught at the phase boundary: the phase's
/// timing is discarded and the run continues with the next phase/backend.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("parse failed: {detail}")]
    Parse { detail: String },

    #[error("encode failed: {detail}")]
    Encode { detail: String },
}

impl CodecError {
    /// Wrap a codec library's decode error.
    pub fn parse(err: impl std::fmt::Display) -> Self {
        Self::Parse {
            detail: err.to_string(),
        }
    }

    /// Wrap a codec library's encode error.
    pub fn encode(err: impl std::fmt::Display) -> Self {
        Self::Encode {
            detail: err.to_string(),
        }
    }
}

/// Oracle verdicts. Logged as non-fatal warnings; timing results are
/// unaffected.
#[derive(Debug, Error)]
pub enum CorrectnessMismatch {
    #[error("output of {backend} is unreadable by the reference codec: {detail}")]
    Unreadable { backend: String, detail: String },

    #[error("canonical form mismatch for {backend} (diverging fields: {fields})")]
    Mismatch { backend: String, fields: String },
}

/// Fatal setup failures. Without a canonical form or a valid configuration
/// the harness cannot proceed for any backend.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("reference codec rejected the golden literal: {source}")]
    GoldenLiteral {
        #[source]
        source: serde_json::Error,
    },

    #[error("reference codec failed to encode the fixture: {source}")]
    ReferenceEncode {
        #[source]
        source: serde_json::Error,
    },

    #[error("configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("failed to read configuration file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration parse error: {message}")]
    ConfigParse { message: String },

    #[error("invalid field value: {field} = {value} - {reason}")]
    InvalidFieldValue {
        field: &'static str,
        value: String,
        reason: String,
    },
}

/// Report artifact emission failures.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write report artifact: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Top-level error type for a harness run.
#[derive(Debug, Error)]
pub enum GaugeError {
    #[error("setup error: {0}")]
    Setup(#[from] SetupError),

    #[error("report error: {0}")]
    Report(#[from] ReportError),
}

/// Result type alias using GaugeError.
pub type GaugeResult<T> = Result<T, GaugeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codec_error_display() {
        let err = CodecError::parse("unexpected end of input");
        assert!(err.to_string().contains("parse failed"));
        assert!(err.to_string().contains("unexpected end of input"));
    }

    #[test]
    fn test_mismatch_names_backend() {
        let err = CorrectnessMismatch::Mismatch {
            backend: "sonic-rs".to_string(),
            fields: "number".to_string(),
        };
        assert!(err.to_string().contains("sonic-rs"));
        assert!(err.to_string().contains("number"));
    }

    #[test]
    fn test_error_chain() {
        let setup = SetupError::ConfigParse {
            message: "bad yaml".to_string(),
        };
        let top: GaugeError = setup.into();
        assert!(matches!(top, GaugeError::Setup(_)));
    }
}
