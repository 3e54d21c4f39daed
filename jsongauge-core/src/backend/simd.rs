// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! simd-json backend (text only).
//!
//! simd-json parses destructively in place, so the adapter owns a scratch
//! copy of the input that is reused across iterations. The scratch buffer
//! lives exactly as long as the adapter instance.

use crate::backend::Backend;
use crate::error::CodecError;
use crate::fixture::{Document, FlatLarge};

/// Adapter around simd-json's serde interface.
pub struct SimdJsonBackend {
    scratch: Vec<u8>,
}

impl SimdJsonBackend {
    pub fn new() -> Self {
        Self {
            scratch: Vec::new(),
        }
    }

    fn fill_scratch(&mut self, bytes: &[u8]) -> &mut [u8] {
        self.scratch.clear();
        self.scratch.extend_from_slice(bytes);
        &mut self.scratch
    }
}

impl Default for SimdJsonBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for SimdJsonBackend {
    fn name(&self) -> &'static str {
        "simd-json"
    }

    fn url(&self) -> &'static str {
        "https://github.com/simd-lite/simd-json"
    }

    fn encode(&mut self, doc: &Document, out: &mut Vec<u8>) -> Result<(), CodecError> {
        *out = simd_json::to_vec(doc).map_err(CodecError::encode)?;
        Ok(())
    }

    fn decode(&mut self, bytes: &[u8], doc: &mut Document) -> Result<(), CodecError> {
        let scratch = self.fill_scratch(bytes);
        *doc = simd_json::from_slice(scratch).map_err(CodecError::parse)?;
        Ok(())
    }

    fn encode_flat(&mut self, flat: &FlatLarge, out: &mut Vec<u8>) -> Result<(), CodecError> {
        *out = simd_json::to_vec(flat).map_err(CodecError::encode)?;
        Ok(())
    }

    fn decode_flat(&mut self, bytes: &[u8], flat: &mut FlatLarge) -> Result<(), CodecError> {
        let scratch = self.fill_scratch(bytes);
        *flat = simd_json::from_slice(scratch).map_err(CodecError::parse)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::GOLDEN_LITERAL;

    #[test]
    fn test_text_round_trip() {
        let mut backend = SimdJsonBackend::new();
        let mut doc = Document::default();
        backend.decode(GOLDEN_LITERAL.as_bytes(), &mut doc).unwrap();

        let mut buf = Vec::new();
        backend.encode(&doc, &mut buf).unwrap();

        let mut reread = Document::default();
        backend.decode(&buf, &mut reread).unwrap();
        assert_eq!(doc, reread);
    }

    #[test]
    fn test_decode_leaves_caller_input_untouched() {
        let mut backend = SimdJsonBackend::new();
        let input = GOLDEN_LITERAL.as_bytes().to_vec();
        let mut doc = Document::default();
        backend.decode(&input, &mut doc).unwrap();
        // Destructive parsing happens on the scratch copy only.
        assert_eq!(input, GOLDEN_LITERAL.as_bytes());
    }

    #[test]
    fn test_malformed_input_is_a_parse_error() {
        let mut backend = SimdJsonBackend::new();
        let mut doc = Document::default();
        let err = backend.decode(b"not json", &mut doc).unwrap_err();
        assert!(matches!(err, CodecError::Parse { .. }));
    }
}
