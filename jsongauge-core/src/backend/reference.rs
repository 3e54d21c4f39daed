// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Reference backend: serde_json text codec with a MessagePack binary
//! wire form via rmp-serde.
//!
//! serde_json doubles as the harness's reference codec: the oracle's
//! canonical form and the shared-minified throughput basis are both
//! produced by this adapter's text encoder. The binary codec drives the
//! same serde data model through a second wire format.

use crate::backend::{Backend, BinaryCodec};
use crate::error::CodecError;
use crate::fixture::{Document, FlatLarge};

/// Adapter around serde_json (text) and rmp-serde (binary).
pub struct SerdeJsonBackend {
    binary: MessagePackCodec,
}

impl SerdeJsonBackend {
    pub fn new() -> Self {
        Self {
            binary: MessagePackCodec,
        }
    }
}

impl Default for SerdeJsonBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for SerdeJsonBackend {
    fn name(&self) -> &'static str {
        "serde_json"
    }

    fn url(&self) -> &'static str {
        "https://github.com/serde-rs/json"
    }

    fn encode(&mut self, doc: &Document, out: &mut Vec<u8>) -> Result<(), CodecError> {
        out.clear();
        serde_json::to_writer(&mut *out, doc).map_err(CodecError::encode)
    }

    fn decode(&mut self, bytes: &[u8], doc: &mut Document) -> Result<(), CodecError> {
        *doc = serde_json::from_slice(bytes).map_err(CodecError::parse)?;
        Ok(())
    }

    fn encode_flat(&mut self, flat: &FlatLarge, out: &mut Vec<u8>) -> Result<(), CodecError> {
        out.clear();
        serde_json::to_writer(&mut *out, flat).map_err(CodecError::encode)
    }

    fn decode_flat(&mut self, bytes: &[u8], flat: &mut FlatLarge) -> Result<(), CodecError> {
        *flat = serde_json::from_slice(bytes).map_err(CodecError::parse)?;
        Ok(())
    }

    fn binary(&mut self) -> Option<&mut dyn BinaryCodec> {
        Some(&mut self.binary)
    }
}

/// MessagePack wire form over the same serde data model.
struct MessagePackCodec;

impl BinaryCodec for MessagePackCodec {
    fn encode(&mut self, doc: &Document, out: &mut Vec<u8>) -> Result<(), CodecError> {
        *out = rmp_serde::to_vec(doc).map_err(CodecError::encode)?;
        Ok(())
    }

    fn decode(&mut self, bytes: &[u8], doc: &mut Document) -> Result<(), CodecError> {
        *doc = rmp_serde::from_slice(bytes).map_err(CodecError::parse)?;
        Ok(())
    }
}
