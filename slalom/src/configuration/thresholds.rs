// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Color classes handed to the blob detector
//!
//! Each class is an LAB range `(l_min, l_max, a_min, a_max, b_min, b_max)`.
//! The detector reports the classes as the [ColorCode](crate::blob::ColorCode)
//! bits red, green and marker.

use serde::{Deserialize, Serialize};

pub type LabRange = (i16, i16, i16, i16, i16, i16);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorThresholds {
    pub red: LabRange,
    pub green: LabRange,
    pub marker: LabRange,
}

impl Default for ColorThresholds {
    fn default() -> Self {
        Self {
            red: (3, 29, 7, 36, 4, 21),
            green: (20, 60, -28, -7, 4, 27),
            marker: (55, 72, 26, 48, -19, -7),
        }
    }
}
