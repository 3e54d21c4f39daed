// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Cross-backend correctness oracle.
//!
//! Backends are free to differ in whitespace, key order and numeric
//! formatting, so byte equality of their own output proves nothing.
//! Equivalence is judged through the reference codec instead: canonical
//! form = reference decode of the golden literal, re-encoded by the
//! reference codec. A candidate's output is decoded and re-encoded the
//! same way and byte-compared against the canonical form. This proves
//! content equivalence as observed through the reference codec's own
//! serialization, nothing about the candidate's bytes themselves.

use crate::error::{CorrectnessMismatch, SetupError};
use crate::fixture::{Document, GOLDEN_LITERAL};
use crate::schema::DOCUMENT_FIELDS;

/// Holds the parsed golden document and its canonical byte form.
pub struct Oracle {
    golden: Document,
    canonical: Vec<u8>,
}

impl Oracle {
    /// Parse the embedded golden literal with the reference codec and
    /// compute the canonical form. Failure here is fatal: without a
    /// canonical form no backend can be verified.
    pub fn from_golden_literal() -> Result<Self, SetupError> {
        let golden: Document = serde_json::from_str(GOLDEN_LITERAL)
            .map_err(|source| SetupError::GoldenLiteral { source })?;
        let canonical =
            serde_json::to_vec(&golden).map_err(|source| SetupError::ReferenceEncode { source })?;
        Ok(Self { golden, canonical })
    }

    /// The golden document, parsed once and never mutated.
    pub fn golden(&self) -> &Document {
        &self.golden
    }

    /// Byte length of the canonical (minified) form. This is the shared
    /// throughput basis for the main fixture.
    pub fn canonical_len(&self) -> u64 {
        self.canonical.len() as u64
    }

    /// Verify a candidate backend's serialized output against the
    /// canonical form.
    pub fn verify(&self, backend: &str, output: &[u8]) -> Result<(), CorrectnessMismatch> {
        let decoded: Document =
            serde_json::from_slice(output).map_err(|err| CorrectnessMismatch::Unreadable {
                backend: backend.to_owned(),
                detail: err.to_string(),
            })?;
        let recanonical =
            serde_json::to_vec(&decoded).map_err(|err| CorrectnessMismatch::Unreadable {
                backend: backend.to_owned(),
                detail: err.to_string(),
            })?;
        if recanonical == self.canonical {
            Ok(())
        } else {
            Err(CorrectnessMismatch::Mismatch {
                backend: backend.to_owned(),
                fields: self.diverging_fields(&recanonical),
            })
        }
    }

    /// Name the top-level fields whose canonicalized values differ,
    /// walking the schema descriptor in declaration order.
    fn diverging_fields(&self, candidate: &[u8]) -> String {
        let canonical: serde_json::Value = match serde_json::from_slice(&self.canonical) {
            Ok(value) => value,
            Err(_) => return "unknown".to_string(),
        };
        let candidate: serde_json::Value = match serde_json::from_slice(candidate) {
            Ok(value) => value,
            Err(_) => return "unknown".to_string(),
        };
        let names: Vec<&str> = DOCUMENT_FIELDS
            .iter()
            .copied()
            .filter(|name| canonical.get(*name) != candidate.get(*name))
            .collect();
        if names.is_empty() {
            "unknown".to_string()
        } else {
            names.join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend;

    #[test]
    fn test_canonical_form_is_stable() {
        let a = Oracle::from_golden_literal().unwrap();
        let b = Oracle::from_golden_literal().unwrap();
        assert_eq!(a.canonical, b.canonical);
        assert!(a.canonical_len() > 0);
    }

    #[test]
    fn test_golden_literal_itself_verifies() {
        let oracle = Oracle::from_golden_literal().unwrap();
        assert!(oracle.verify("reference", GOLDEN_LITERAL.as_bytes()).is_ok());
    }

    #[test]
    fn test_every_registered_backend_round_trips() {
        let oracle = Oracle::from_golden_literal().unwrap();
        for mut backend in backend::registry() {
            let mut doc = Document::default();
            backend.decode(GOLDEN_LITERAL.as_bytes(), &mut doc).unwrap();
            let mut buf = Vec::new();
            backend.encode(&doc, &mut buf).unwrap();
            oracle
                .verify(backend.name(), &buf)
                .unwrap_or_else(|err| panic!("{err}"));
        }
    }

    #[test]
    fn test_content_divergence_is_a_mismatch() {
        let oracle = Oracle::from_golden_literal().unwrap();
        let mut doc = oracle.golden().clone();
        doc.number = 2.71;
        let tampered = serde_json::to_vec(&doc).unwrap();
        let err = oracle.verify("tampered", &tampered).unwrap_err();
        match err {
            CorrectnessMismatch::Mismatch { backend, fields } => {
                assert_eq!(backend, "tampered");
                assert_eq!(fields, "number");
            }
            other => panic!("unexpected verdict: {other}"),
        }
    }

    #[test]
    fn test_unreadable_output_is_reported() {
        let oracle = Oracle::from_golden_literal().unwrap();
        let err = oracle.verify("broken", b"\xff\xfe not json").unwrap_err();
        assert!(matches!(err, CorrectnessMismatch::Unreadable { .. }));
    }

    #[test]
    fn test_key_order_does_not_matter() {
        // Same content with top-level keys in a different order must pass:
        // canonicalization goes through the typed document.
        let oracle = Oracle::from_golden_literal().unwrap();
        let value: serde_json::Value = serde_json::from_str(GOLDEN_LITERAL).unwrap();
        let object = value.as_object().unwrap();
        let mut reversed = serde_json::Map::new();
        for (key, val) in object.iter().rev() {
            reversed.insert(key.clone(), val.clone());
        }
        let bytes = serde_json::to_vec(&serde_json::Value::Object(reversed)).unwrap();
        assert!(oracle.verify("reordered", &bytes).is_ok());
    }
}
