// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Benchmark fixture schemas and the embedded golden literal.
//!
//! `Document` is the shared benchmark payload every backend serializes and
//! deserializes; `FlatLarge` is the flat stress payload used to probe
//! field-order resolution. Field names and nesting are fixed; serialized
//! field order is backend-defined.

use serde::{Deserialize, Serialize};

/// Length of each stress-fixture sequence.
pub const STRESS_SEQUENCE_LEN: usize = 1000;

/// The golden literal: the fixed JSON document used as the canonical
/// benchmark payload. Parsed once by the reference codec at harness start.
/// `another_object.string` deliberately contains characters that require
/// escaping.
pub const GOLDEN_LITERAL: &str = r#"
{
   "fixed_object": {
      "int_array": [0, 1, 2, 3, 4, 5, 6],
      "float_array": [0.1, 0.2, 0.3, 0.4, 0.5, 0.6],
      "double_array": [3288398.238, 233e22, 289e-1, 0.928759872, 0.22222848, 0.1, 0.2, 0.3, 0.4]
   },
   "fixed_name_object": {
      "name0": "James",
      "name1": "Abraham",
      "name2": "Susan",
      "name3": "Frank",
      "name4": "Alicia"
   },
   "another_object": {
      "string": "here is some text\twith a \"quoted\" part and a backslash \\",
      "another_string": "Hello World",
      "boolean": false,
      "nested_object": {
         "v3s": [[0.12345, 0.23456, 0.001345],
                  [0.3894675, 97.39827, 297.92387],
                  [18.18, 87.289, 2988.298]],
         "id": "298728949872"
      }
   },
   "string_array": ["Cat", "Dog", "Elephant", "Tiger"],
   "string": "Hello world",
   "number": 3.14,
   "boolean": true,
   "another_bool": false
}
"#;

/// Three homogeneous numeric sequences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixedObject {
    pub int_array: Vec<i32>,
    pub float_array: Vec<f32>,
    pub double_array: Vec<f64>,
}

/// Five distinct short-text fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixedNameObject {
    pub name0: String,
    pub name1: String,
    pub name2: String,
    pub name3: String,
    pub name4: String,
}

/// Ordered sequence of 3-element vectors plus an identifier string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NestedObject {
    pub v3s: Vec<[f64; 3]>,
    pub id: String,
}

/// Free-text fields, a boolean, and the nested record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnotherObject {
    pub string: String,
    pub another_string: String,
    pub boolean: bool,
    pub nested_object: NestedObject,
}

/// The shared benchmark payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub fixed_object: FixedObject,
    pub fixed_name_object: FixedNameObject,
    pub another_object: AnotherObject,
    pub string_array: Vec<String>,
    pub string: String,
    pub number: f64,
    pub boolean: bool,
    pub another_bool: bool,
}

/// Flat stress payload: 26 equally-typed fields.
///
/// Post-decode, every field must equal the sequence 0..999 regardless of
/// the field order encountered in the input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatLarge {
    pub a: Vec<i64>,
    pub b: Vec<i64>,
    pub c: Vec<i64>,
    pub d: Vec<i64>,
    pub e: Vec<i64>,
    pub f: Vec<i64>,
    pub g: Vec<i64>,
    pub h: Vec<i64>,
    pub i: Vec<i64>,
    pub j: Vec<i64>,
    pub k: Vec<i64>,
    pub l: Vec<i64>,
    pub m: Vec<i64>,
    pub n: Vec<i64>,
    pub o: Vec<i64>,
    pub p: Vec<i64>,
    pub q: Vec<i64>,
    pub r: Vec<i64>,
    pub s: Vec<i64>,
    pub t: Vec<i64>,
    pub u: Vec<i64>,
    pub v: Vec<i64>,
    pub w: Vec<i64>,
    pub x: Vec<i64>,
    pub y: Vec<i64>,
    pub z: Vec<i64>,
}

impl FlatLarge {
    /// Build the stress fixture with every field holding 0..999.
    pub fn sequential() -> Self {
        let seq: Vec<i64> = (0..STRESS_SEQUENCE_LEN as i64).collect();
        Self {
            a: seq.clone(),
            b: seq.clone(),
            c: seq.clone(),
            d: seq.clone(),
            e: seq.clone(),
            f: seq.clone(),
            g: seq.clone(),
            h: seq.clone(),
            i: seq.clone(),
            j: seq.clone(),
            k: seq.clone(),
            l: seq.clone(),
            m: seq.clone(),
            n: seq.clone(),
            o: seq.clone(),
            p: seq.clone(),
            q: seq.clone(),
            r: seq.clone(),
            s: seq.clone(),
            t: seq.clone(),
            u: seq.clone(),
            v: seq.clone(),
            w: seq.clone(),
            x: seq.clone(),
            y: seq.clone(),
            z: seq,
        }
    }
}
