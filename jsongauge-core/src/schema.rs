// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Explicit schema descriptors for the benchmark fixtures.
//!
//! Field bindings are runtime descriptor tables, built once and consumed
//! generically: the stress-fixture table drives the field-order probe and
//! the post-decode sequence check, the document field list drives the
//! oracle's mismatch diagnostics. Codec-internal reflection (serde derive)
//! stays internal to each wrapped library.

use crate::fixture::{FlatLarge, STRESS_SEQUENCE_LEN};

/// One stress-fixture field: name plus typed accessor.
pub struct FlatField {
    pub name: &'static str,
    pub get: fn(&FlatLarge) -> &[i64],
}

/// Ordered descriptor table for all 26 stress-fixture fields.
pub const FLAT_FIELDS: [FlatField; 26] = [
    FlatField { name: "a", get: |f| &f.a },
    FlatField { name: "b", get: |f| &f.b },
    FlatField { name: "c", get: |f| &f.c },
    FlatField { name: "d", get: |f| &f.d },
    FlatField { name: "e", get: |f| &f.e },
    FlatField { name: "f", get: |f| &f.f },
    FlatField { name: "g", get: |f| &f.g },
    FlatField { name: "h", get: |f| &f.h },
    FlatField { name: "i", get: |f| &f.i },
    FlatField { name: "j", get: |f| &f.j },
    FlatField { name: "k", get: |f| &f.k },
    FlatField { name: "l", get: |f| &f.l },
    FlatField { name: "m", get: |f| &f.m },
    FlatField { name: "n", get: |f| &f.n },
    FlatField { name: "o", get: |f| &f.o },
    FlatField { name: "p", get: |f| &f.p },
    FlatField { name: "q", get: |f| &f.q },
    FlatField { name: "r", get: |f| &f.r },
    FlatField { name: "s", get: |f| &f.s },
    FlatField { name: "t", get: |f| &f.t },
    FlatField { name: "u", get: |f| &f.u },
    FlatField { name: "v", get: |f| &f.v },
    FlatField { name: "w", get: |f| &f.w },
    FlatField { name: "x", get: |f| &f.x },
    FlatField { name: "y", get: |f| &f.y },
    FlatField { name: "z", get: |f| &f.z },
];

/// Ordered top-level field names of the benchmark document.
pub const DOCUMENT_FIELDS: [&str; 8] = [
    "fixed_object",
    "fixed_name_object",
    "another_object",
    "string_array",
    "string",
    "number",
    "boolean",
    "another_bool",
];

/// Field order of a probe encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOrder {
    Forward,
    Reversed,
}

/// Encode the stress fixture with an explicit field order.
///
/// Relies on serde_json's `preserve_order` feature: map entries serialize
/// in insertion order.
pub fn flat_to_json(flat: &FlatLarge, order: FieldOrder) -> serde_json::Result<Vec<u8>> {
    let mut map = serde_json::Map::with_capacity(FLAT_FIELDS.len());
    let mut insert = |field: &FlatField| -> serde_json::Result<()> {
        map.insert(field.name.to_owned(), serde_json::to_value((field.get)(flat))?);
        Ok(())
    };
    match order {
        FieldOrder::Forward => {
            for field in FLAT_FIELDS.iter() {
                insert(field)?;
            }
        }
        FieldOrder::Reversed => {
            for field in FLAT_FIELDS.iter().rev() {
                insert(field)?;
            }
        }
    }
    serde_json::to_vec(&serde_json::Value::Object(map))
}

/// Check that every stress-fixture field holds exactly 0..999.
pub fn flat_is_sequential(flat: &FlatLarge) -> bool {
    FLAT_FIELDS.iter().all(|field| {
        let values = (field.get)(flat);
        values.len() == STRESS_SEQUENCE_LEN
            && values.iter().enumerate().all(|(i, &v)| v == i as i64)
    })
}
