// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Fixed-iteration timing harness.
//!
//! Each operation under test runs a fixed iteration count in a tight loop
//! with no intervening I/O, wrapped in a single monotonic start/stop pair.
//! A failure raised mid-loop aborts that phase, its timing is discarded,
//! and the run continues with the next phase/backend: one broken backend
//! must never abort the whole run.
//!
//! Execution is fully sequential and single-threaded. Each backend
//! exclusively owns its working document, output buffer and any adapter
//! scratch space for the duration of its run; everything is released
//! deterministically before the next backend starts.

use std::time::{Duration, Instant};

use crate::backend::{self, Backend};
use crate::config::Config;
use crate::error::{CodecError, GaugeError, SetupError};
use crate::fixture::{Document, FlatLarge, GOLDEN_LITERAL};
use crate::metrics::{BackendRecord, RunReport, StressRecord};
use crate::normalize::NormalizeContext;
use crate::oracle::Oracle;
use crate::schema::{self, FieldOrder};

/// Outcome of one backend's main-fixture run.
pub struct DocumentRun {
    pub record: BackendRecord,
    /// The backend's own text serialization of the golden content, fed to
    /// the correctness oracle. `None` when the backend could not encode.
    pub output: Option<Vec<u8>>,
}

/// Runs the timed phases for one backend at a time.
pub struct Harness {
    iterations: u64,
    stress_iterations: u64,
}

impl Harness {
    pub fn new(iterations: u64, stress_iterations: u64) -> Self {
        Self {
            iterations,
            stress_iterations,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.iterations, config.stress_iterations)
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    pub fn stress_iterations(&self) -> u64 {
        self.stress_iterations
    }

    /// Run the main-fixture phases for one backend: text round-trip,
    /// write, read, then the binary equivalents when the adapter offers a
    /// binary codec.
    pub fn run_document(&self, backend: &mut dyn Backend, golden: &Document) -> DocumentRun {
        let name = backend.name();
        let mut record = BackendRecord::new(name, backend.url(), self.iterations);

        let mut doc = Document::default();
        let mut buf = GOLDEN_LITERAL.as_bytes().to_vec();

        // Round-trip: decode the previous iteration's output, re-encode
        // over it. The first iteration consumes the golden literal.
        match timed(self.iterations, || {
            backend.decode(&buf, &mut doc)?;
            backend.encode(&doc, &mut buf)
        }) {
            Ok(elapsed) => record.text.roundtrip_s = Some(elapsed.as_secs_f64()),
            Err(err) => phase_aborted(name, "roundtrip", &err),
        }

        // Write: every backend encodes an identical, freshly cloned
        // document.
        doc = golden.clone();
        match timed(self.iterations, || backend.encode(&doc, &mut buf)) {
            Ok(elapsed) => record.text.write_s = Some(elapsed.as_secs_f64()),
            Err(err) => phase_aborted(name, "write", &err),
        }

        // The backend's own serialized output feeds the read phase and
        // the oracle; one untimed encode recovers it if the timed write
        // failed.
        let output = if record.text.write_s.is_some() {
            Some(buf.clone())
        } else {
            match backend.encode(&doc, &mut buf) {
                Ok(()) => Some(buf.clone()),
                Err(err) => {
                    tracing::warn!(backend = name, error = %err, "no serialized output available");
                    None
                }
            }
        };
        if let Some(bytes) = &output {
            record.text.bytes = Some(bytes.len() as u64);
        }

        // Read: consume the backend's own output, falling back to the
        // golden literal when encoding failed.
        let read_input = output
            .clone()
            .unwrap_or_else(|| GOLDEN_LITERAL.as_bytes().to_vec());
        match timed(self.iterations, || backend.decode(&read_input, &mut doc)) {
            Ok(elapsed) => record.text.read_s = Some(elapsed.as_secs_f64()),
            Err(err) => phase_aborted(name, "read", &err),
        }

        if let Some(binary) = backend.binary() {
            let mut bin_buf = Vec::new();

            match timed(self.iterations, || binary.encode(&doc, &mut bin_buf)) {
                Ok(elapsed) => record.binary.write_s = Some(elapsed.as_secs_f64()),
                Err(err) => phase_aborted(name, "binary write", &err),
            }

            // Binary read and round-trip need one valid binary encoding.
            let bin_ready = if record.binary.write_s.is_some() {
                true
            } else {
                match binary.encode(&doc, &mut bin_buf) {
                    Ok(()) => true,
                    Err(err) => {
                        tracing::warn!(backend = name, error = %err, "no binary output available");
                        false
                    }
                }
            };

            if bin_ready {
                record.binary.bytes = Some(bin_buf.len() as u64);

                match timed(self.iterations, || binary.decode(&bin_buf, &mut doc)) {
                    Ok(elapsed) => record.binary.read_s = Some(elapsed.as_secs_f64()),
                    Err(err) => phase_aborted(name, "binary read", &err),
                }

                match timed(self.iterations, || {
                    binary.decode(&bin_buf, &mut doc)?;
                    binary.encode(&doc, &mut bin_buf)
                }) {
                    Ok(elapsed) => record.binary.roundtrip_s = Some(elapsed.as_secs_f64()),
                    Err(err) => phase_aborted(name, "binary roundtrip", &err),
                }
            }
        }

        DocumentRun { record, output }
    }

    /// Run the stress-fixture phases for one backend: the field-order
    /// probe, then the timed read loop over the backend's own encoding.
    pub fn run_stress(&self, backend: &mut dyn Backend) -> StressRecord {
        let name = backend.name();
        let mut record = StressRecord::new(name, backend.url(), self.stress_iterations);
        let flat = FlatLarge::sequential();

        record.field_order_ok = probe_field_order(backend, &flat);

        let mut buf = Vec::new();
        if let Err(err) = backend.encode_flat(&flat, &mut buf) {
            tracing::warn!(backend = name, error = %err, "no stress output available");
            return record;
        }
        record.bytes = Some(buf.len() as u64);

        let mut scratch = FlatLarge::default();
        match timed(self.stress_iterations, || {
            backend.decode_flat(&buf, &mut scratch)
        }) {
            Ok(elapsed) => record.read_s = Some(elapsed.as_secs_f64()),
            Err(err) => phase_aborted(name, "stress read", &err),
        }

        record
    }
}

/// Drive a full run: oracle setup, per-backend phases, stress runs and
/// correctness verification, aggregation in invocation order.
pub fn run_suite(config: &Config) -> Result<(RunReport, NormalizeContext), GaugeError> {
    let oracle = Oracle::from_golden_literal()?;
    let flat_reference = serde_json::to_vec(&FlatLarge::sequential())
        .map_err(|source| SetupError::ReferenceEncode { source })?;
    let ctx = NormalizeContext::new(
        config.basis,
        oracle.canonical_len(),
        flat_reference.len() as u64,
    );

    let harness = Harness::from_config(config);
    let mut report = RunReport::new(config.basis, harness.iterations(), harness.stress_iterations());

    for mut backend in backend::registry_for(config) {
        let name = backend.name();
        tracing::info!(backend = name, "running");

        let DocumentRun { record, output } = harness.run_document(backend.as_mut(), oracle.golden());
        match &output {
            Some(bytes) => {
                if let Err(err) = oracle.verify(name, bytes) {
                    tracing::warn!(error = %err, "correctness verification failed");
                }
            }
            None => {
                tracing::warn!(backend = name, "skipping correctness verification: no output");
            }
        }
        report.push(record);

        report.push_stress(harness.run_stress(backend.as_mut()));
        tracing::info!(backend = name, "finished");
    }

    Ok((report, ctx))
}

/// Time `iterations` executions of `op` under one monotonic start/stop
/// pair. The first error aborts the loop and discards the timing.
fn timed<F>(iterations: u64, mut op: F) -> Result<Duration, CodecError>
where
    F: FnMut() -> Result<(), CodecError>,
{
    let start = Instant::now();
    for _ in 0..iterations {
        op()?;
    }
    Ok(start.elapsed())
}

fn phase_aborted(backend: &str, phase: &str, err: &CodecError) {
    tracing::warn!(backend, phase, error = %err, "phase aborted, timing discarded");
}

/// Field-order probe: encode the stress fixture in forward and reversed
/// field order through the schema descriptor, and require the backend to
/// resolve every field to 0..999 in both cases.
fn probe_field_order(backend: &mut dyn Backend, flat: &FlatLarge) -> Option<bool> {
    let name = backend.name();
    let mut ok = true;
    for order in [FieldOrder::Forward, FieldOrder::Reversed] {
        let bytes = match schema::flat_to_json(flat, order) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(error = %err, "field-order probe encoding failed");
                return None;
            }
        };
        let mut decoded = FlatLarge::default();
        match backend.decode_flat(&bytes, &mut decoded) {
            Ok(()) => {
                if !schema::flat_is_sequential(&decoded) {
                    tracing::warn!(backend = name, ?order, "decoded sequences diverge from 0..999");
                    ok = false;
                }
            }
            Err(err) => {
                tracing::warn!(backend = name, ?order, error = %err, "field-order probe decode failed");
                ok = false;
            }
        }
    }
    Some(ok)
}
