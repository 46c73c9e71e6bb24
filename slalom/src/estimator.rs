// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Steering error estimation
//!
//! Each obstacle color has its own virtual guide line, `line_offset` pixels left
//! (red) or right (green) of the frame center. The error is the horizontal
//! distance of the obstacle from its guide line. The obstacle position is
//! smoothed with an exponential low-pass filter which is re-anchored to the raw
//! position whenever the color changes and every `lpf_reset_loops` frames.

use crate::classifier::{Obstacle, Signature};

/// Filter memory carried from one frame to the next
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FilterState {
    /// Smoothed horizontal offset from the frame center
    pub smoothed_x: f64,
    /// Frames since the last re-anchoring
    pub loops: u32,
    /// Signature of the previous frame
    pub last_signature: Signature,
}

/// Tuning of the [ErrorEstimator]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatorConfig {
    /// Distance of each guide line from the frame center in pixels
    pub line_offset: i32,
    /// Weight of the new sample, in `(0, 1]`
    pub lpf_alpha: f64,
    /// Re-anchor the filter after this many frames of the same signature
    pub lpf_reset_loops: u32,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            line_offset: 159,
            lpf_alpha: 0.8,
            lpf_reset_loops: 7,
        }
    }
}

/// Converts a selected obstacle into a steering error
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorEstimator {
    config: EstimatorConfig,
}

impl ErrorEstimator {
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    /// Horizontal position of the guide line belonging to `signature`
    pub fn guide_line(&self, signature: Signature, center_x: i32) -> Option<i32> {
        match signature {
            Signature::Red => Some(center_x.saturating_sub(self.config.line_offset)),
            Signature::Green => Some(center_x.saturating_add(self.config.line_offset)),
            Signature::None => None,
        }
    }

    /// Compute the error of `obstacle` and the filter state for the next frame
    ///
    /// A positive error means the obstacle is right of its guide line. Without an
    /// obstacle the error is zero and the smoothed value is kept as is.
    pub fn estimate(
        &self,
        obstacle: &Obstacle,
        state: FilterState,
        center_x: i32,
    ) -> (f64, FilterState) {
        let Some(line_x) = self.guide_line(obstacle.signature, center_x) else {
            let state = FilterState {
                loops: 0,
                last_signature: Signature::None,
                ..state
            };
            return (0.0, state);
        };

        let raw = f64::from(obstacle.x);
        let mut next = FilterState {
            last_signature: obstacle.signature,
            ..state
        };

        if obstacle.signature != state.last_signature {
            next.smoothed_x = raw;
            next.loops = 0;
        } else {
            let alpha = self.config.lpf_alpha;
            next.smoothed_x = alpha * raw + (1.0 - alpha) * state.smoothed_x;
            next.loops = state.loops + 1;
            if next.loops >= self.config.lpf_reset_loops {
                next.smoothed_x = raw;
                next.loops = 0;
            }
        }

        let obstacle_x = f64::from(center_x) + next.smoothed_x;
        (obstacle_x - f64::from(line_x), next)
    }
}
