// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! sonic-rs backend (text only).

use crate::backend::Backend;
use crate::error::CodecError;
use crate::fixture::{Document, FlatLarge};

/// Adapter around sonic-rs' serde interface.
pub struct SonicRsBackend;

impl SonicRsBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SonicRsBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for SonicRsBackend {
    fn name(&self) -> &'static str {
        "sonic-rs"
    }

    fn url(&self) -> &'static str {
        "https://github.com/cloudwego/sonic-rs"
    }

    fn encode(&mut self, doc: &Document, out: &mut Vec<u8>) -> Result<(), CodecError> {
        *out = sonic_rs::to_vec(doc).map_err(CodecError::encode)?;
        Ok(())
    }

    fn decode(&mut self, bytes: &[u8], doc: &mut Document) -> Result<(), CodecError> {
        *doc = sonic_rs::from_slice(bytes).map_err(CodecError::parse)?;
        Ok(())
    }

    fn encode_flat(&mut self, flat: &FlatLarge, out: &mut Vec<u8>) -> Result<(), CodecError> {
        *out = sonic_rs::to_vec(flat).map_err(CodecError::encode)?;
        Ok(())
    }

    fn decode_flat(&mut self, bytes: &[u8], flat: &mut FlatLarge) -> Result<(), CodecError> {
        *flat = sonic_rs::from_slice(bytes).map_err(CodecError::parse)?;
        Ok(())
    }
}
