// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Backend adapter contract and the registered codec pool.
//!
//! Each external codec crate is consumed only through the [`Backend`]
//! trait: decode bytes into a fixture, encode a fixture into bytes, plus
//! an optional binary wire form. Capability variants are exactly
//! {text-only codec, text-plus-binary codec}; absence of a binary codec is
//! a valid state, not an error. Dispatch is via trait objects.

pub mod reference;
pub mod simd;
pub mod sonic;

use crate::config::Config;
use crate::error::CodecError;
use crate::fixture::{Document, FlatLarge};

/// Uniform capability-set wrapper around one external codec library.
///
/// Adapters may hold internal scratch buffers whose lifetime is scoped to
/// the adapter instance; reuse across iterations is required so allocator
/// warm-up is not measured.
pub trait Backend {
    /// Display name, also used as the registry key.
    fn name(&self) -> &'static str;

    /// Reference URL rendered as the library link in report tables.
    fn url(&self) -> &'static str;

    /// Serialize the document into `out`, replacing its contents.
    fn encode(&mut self, doc: &Document, out: &mut Vec<u8>) -> Result<(), CodecError>;

    /// Fully repopulate the document from previously-valid serialized
    /// bytes. Malformed or schema-incompatible input is a parse error;
    /// a logically absent required field must never leave a stale value.
    fn decode(&mut self, bytes: &[u8], doc: &mut Document) -> Result<(), CodecError>;

    /// Serialize the stress fixture into `out`, replacing its contents.
    fn encode_flat(&mut self, flat: &FlatLarge, out: &mut Vec<u8>) -> Result<(), CodecError>;

    /// Fully repopulate the stress fixture from serialized bytes.
    fn decode_flat(&mut self, bytes: &[u8], flat: &mut FlatLarge) -> Result<(), CodecError>;

    /// Non-text wire form, if this backend offers one.
    fn binary(&mut self) -> Option<&mut dyn BinaryCodec> {
        None
    }
}

/// Optional binary wire form of a backend.
pub trait BinaryCodec {
    /// Serialize the document into `out`, replacing its contents.
    fn encode(&mut self, doc: &Document, out: &mut Vec<u8>) -> Result<(), CodecError>;

    /// Fully repopulate the document from binary bytes.
    fn decode(&mut self, bytes: &[u8], doc: &mut Document) -> Result<(), CodecError>;
}

/// All registered backends, in invocation order. The first entry is the
/// reference codec.
pub fn registry() -> Vec<Box<dyn Backend>> {
    vec![
        Box::new(reference::SerdeJsonBackend::new()),
        Box::new(simd::SimdJsonBackend::new()),
        Box::new(sonic::SonicRsBackend::new()),
    ]
}

/// The registry, restricted to the backends a config selects. With no
/// selection the full pool runs.
pub fn registry_for(config: &Config) -> Vec<Box<dyn Backend>> {
    let mut pool = registry();
    if let Some(names) = &config.backends {
        pool.retain(|backend| names.iter().any(|name| name == backend.name()));
    }
    pool
}
