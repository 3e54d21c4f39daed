// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Throughput normalization.
//!
//! MB/s = iterations * byte_length / (elapsed_seconds * 1_048_576).
//!
//! The byte-length basis is chosen once per run and carried in an explicit
//! context value threaded into every computation, so one report can never
//! mix bases.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Bytes per mebibyte.
const MEBIBYTE: f64 = 1_048_576.0;

/// Byte-length basis for throughput computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Basis {
    /// Each backend's own serialized byte length. Rewards compact encoders
    /// but makes figures across backends not directly comparable.
    OwnLength,
    /// One reference byte length (the reference codec's minified encoding
    /// of the fixture) applied identically to every backend. Preferred for
    /// cross-backend comparison.
    SharedMinified,
}

impl Default for Basis {
    fn default() -> Self {
        Basis::SharedMinified
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Basis::OwnLength => write!(f, "own-length"),
            Basis::SharedMinified => write!(f, "shared-minified"),
        }
    }
}

/// Normalization context: the active basis plus the shared reference
/// lengths, computed once at setup and passed by value. No global state.
#[derive(Debug, Clone, Copy)]
pub struct NormalizeContext {
    basis: Basis,
    document_len: u64,
    flat_len: u64,
}

impl NormalizeContext {
    /// `document_len` and `flat_len` are the reference codec's minified
    /// byte lengths for the two fixtures.
    pub fn new(basis: Basis, document_len: u64, flat_len: u64) -> Self {
        Self {
            basis,
            document_len,
            flat_len,
        }
    }

    pub fn basis(&self) -> Basis {
        self.basis
    }

    /// Throughput for a main-fixture phase, or `None` when unmeasured.
    pub fn document_throughput(
        &self,
        own_len: Option<u64>,
        elapsed_s: Option<f64>,
        iterations: u64,
    ) -> Option<f64> {
        self.throughput(self.document_len, own_len, elapsed_s, iterations)
    }

    /// Throughput for a stress-fixture phase, or `None` when unmeasured.
    pub fn flat_throughput(
        &self,
        own_len: Option<u64>,
        elapsed_s: Option<f64>,
        iterations: u64,
    ) -> Option<f64> {
        self.throughput(self.flat_len, own_len, elapsed_s, iterations)
    }

    fn throughput(
        &self,
        shared_len: u64,
        own_len: Option<u64>,
        elapsed_s: Option<f64>,
        iterations: u64,
    ) -> Option<f64> {
        let byte_len = match self.basis {
            Basis::SharedMinified => shared_len,
            Basis::OwnLength => own_len?,
        };
        let elapsed = elapsed_s?;
        if elapsed <= 0.0 {
            return None;
        }
        Some(iterations as f64 * byte_len as f64 / (elapsed * MEBIBYTE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_throughput_formula() {
        let ctx = NormalizeContext::new(Basis::SharedMinified, 1_048_576, 0);
        // 10 iterations over one MiB in 2 seconds = 5 MB/s.
        let mbps = ctx.document_throughput(None, Some(2.0), 10).unwrap();
        assert!((mbps - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_shared_basis_ratio_depends_only_on_time() {
        // Two backends with very different own lengths for equivalent
        // content: under the shared basis the MB/s ratio must equal the
        // inverse elapsed ratio.
        let ctx = NormalizeContext::new(Basis::SharedMinified, 600, 0);
        let a = ctx.document_throughput(Some(480), Some(1.5), 1000).unwrap();
        let b = ctx.document_throughput(Some(900), Some(3.0), 1000).unwrap();
        assert!((a / b - 3.0 / 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_own_basis_requires_a_measured_length() {
        let ctx = NormalizeContext::new(Basis::OwnLength, 600, 0);
        assert!(ctx.document_throughput(None, Some(1.0), 1000).is_none());
        assert!(ctx.document_throughput(Some(480), Some(1.0), 1000).is_some());
    }

    #[test]
    fn test_unmeasured_time_yields_no_throughput() {
        let ctx = NormalizeContext::new(Basis::SharedMinified, 600, 0);
        assert!(ctx.document_throughput(Some(480), None, 1000).is_none());
        assert!(ctx.document_throughput(Some(480), Some(0.0), 1000).is_none());
    }

    #[test]
    fn test_basis_display() {
        assert_eq!(Basis::OwnLength.to_string(), "own-length");
        assert_eq!(Basis::SharedMinified.to_string(), "shared-minified");
    }
}
