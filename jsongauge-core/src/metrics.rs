// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Result records and run-level aggregation.
//!
//! Every metric field is independently optional: a capability that is not
//! supported, or a phase whose timing was discarded, stays `None` and is
//! omitted from serialized output. A metric is never defaulted to zero as
//! a stand-in for "not measured".

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sysinfo::System;

use crate::normalize::Basis;

/// One wire form's metric group: byte length plus the three phase timings,
/// in seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_s: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_s: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roundtrip_s: Option<f64>,
}

impl WireMetrics {
    /// True when no metric in the group was measured.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_none()
            && self.read_s.is_none()
            && self.write_s.is_none()
            && self.roundtrip_s.is_none()
    }
}

/// Per-backend result record for the main fixture. Immutable once handed
/// to the reporter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendRecord {
    pub name: String,
    pub url: String,
    pub iterations: u64,
    pub text: WireMetrics,
    /// Populated only when the backend exposes a binary codec.
    #[serde(default, skip_serializing_if = "WireMetrics::is_empty")]
    pub binary: WireMetrics,
}

impl BackendRecord {
    pub fn new(name: &str, url: &str, iterations: u64) -> Self {
        Self {
            name: name.to_owned(),
            url: url.to_owned(),
            iterations,
            text: WireMetrics::default(),
            binary: WireMetrics::default(),
        }
    }
}

/// Per-backend result record for the stress fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StressRecord {
    pub name: String,
    pub url: String,
    pub iterations: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_s: Option<f64>,
    /// Field-order probe verdict; `None` when the probe could not run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_order_ok: Option<bool>,
}

impl StressRecord {
    pub fn new(name: &str, url: &str, iterations: u64) -> Self {
        Self {
            name: name.to_owned(),
            url: url.to_owned(),
            iterations,
            bytes: None,
            read_s: None,
            field_order_ok: None,
        }
    }
}

/// System information captured at benchmark time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    pub os: String,
    pub os_version: String,
    pub kernel_version: Option<String>,
    pub cpu_model: String,
    pub cpu_cores: usize,
    pub memory_bytes: u64,
    pub hostname: String,
}

impl SystemInfo {
    /// Collect current system information.
    pub fn collect() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();

        Self {
            os: System::name().unwrap_or_else(|| "Unknown".to_string()),
            os_version: System::os_version().unwrap_or_else(|| "Unknown".to_string()),
            kernel_version: System::kernel_version(),
            cpu_model: sys
                .cpus()
                .first()
                .map(|cpu| cpu.brand().to_string())
                .unwrap_or_else(|| "Unknown".to_string()),
            cpu_cores: sys.cpus().len(),
            memory_bytes: sys.total_memory(),
            hostname: System::host_name().unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}

/// Complete run report: records in backend invocation order plus run
/// metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub suite: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub basis: Basis,
    pub iterations: u64,
    pub stress_iterations: u64,
    pub system_info: SystemInfo,
    pub backends: Vec<BackendRecord>,
    pub stress: Vec<StressRecord>,
}

impl RunReport {
    pub fn new(basis: Basis, iterations: u64, stress_iterations: u64) -> Self {
        Self {
            suite: "jsongauge".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            basis,
            iterations,
            stress_iterations,
            system_info: SystemInfo::collect(),
            backends: Vec::new(),
            stress: Vec::new(),
        }
    }

    /// Append a main-fixture record, preserving invocation order.
    pub fn push(&mut self, record: BackendRecord) {
        self.backends.push(record);
    }

    /// Append a stress-fixture record, preserving invocation order.
    pub fn push_stress(&mut self, record: StressRecord) {
        self.stress.push(record);
    }
}
