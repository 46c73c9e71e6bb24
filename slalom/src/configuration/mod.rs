// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Pilot configuration
//!
//! Every value has a default matching the competition setup, so a configuration
//! file only needs to name what differs.

pub mod serial;
pub mod thresholds;

use crate::blob::{ColorCode, OffsetAnchor};
use crate::classifier::Selection;
use crate::error::Error;
use crate::estimator::EstimatorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

pub use serial::SerialConfig;
pub use thresholds::{ColorThresholds, LabRange};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Distance of each guide line from the frame center in pixels
    pub line_offset: i32,
    /// Ignore blobs centered above this row. `0` disables the filter.
    pub y_ignore_threshold: i32,
    /// Low-pass weight of the newest obstacle position, in `(0, 1]`
    pub lpf_alpha: f64,
    /// Re-anchor the low-pass filter after this many frames
    pub lpf_reset_loops: u32,
    /// Point of a blob used for positions
    pub anchor: OffsetAnchor,
    /// Target cycle time. Frames are processed back to back if unset.
    pub cycle_time_ms: Option<u64>,
    pub serial: SerialConfig,
    pub thresholds: ColorThresholds,
}

impl Default for Config {
    fn default() -> Self {
        let estimator = EstimatorConfig::default();
        Self {
            line_offset: estimator.line_offset,
            y_ignore_threshold: 30,
            lpf_alpha: estimator.lpf_alpha,
            lpf_reset_loops: estimator.lpf_reset_loops,
            anchor: OffsetAnchor::default(),
            cycle_time_ms: None,
            serial: SerialConfig::default(),
            thresholds: ColorThresholds::default(),
        }
    }
}

impl Config {
    /// Read a JSON configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| Error::Io((e, "failed to read configuration")))?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.lpf_alpha > 0.0 && self.lpf_alpha <= 1.0) {
            return Err(Error::Config(format!(
                "lpf_alpha must be in (0, 1], got {}",
                self.lpf_alpha
            )));
        }
        if self.lpf_reset_loops == 0 {
            return Err(Error::Config("lpf_reset_loops must be positive".into()));
        }
        if self.line_offset < 0 {
            return Err(Error::Config(format!(
                "line_offset must not be negative, got {}",
                self.line_offset
            )));
        }
        if self.y_ignore_threshold < 0 {
            return Err(Error::Config(format!(
                "y_ignore_threshold must not be negative, got {}",
                self.y_ignore_threshold
            )));
        }
        self.serial.validate()
    }

    pub fn selection(&self) -> Selection {
        Selection {
            obstacle_mask: ColorCode::OBSTACLE,
            marker_mask: ColorCode::MARKER,
            y_ignore_threshold: self.y_ignore_threshold,
            anchor: self.anchor,
        }
    }

    pub fn estimator(&self) -> EstimatorConfig {
        EstimatorConfig {
            line_offset: self.line_offset,
            lpf_alpha: self.lpf_alpha,
            lpf_reset_loops: self.lpf_reset_loops,
        }
    }

    pub fn cycle_time(&self) -> Option<Duration> {
        self.cycle_time_ms.map(Duration::from_millis)
    }
}
