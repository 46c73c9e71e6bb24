// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Slalom turns the blob detector output of a small autonomous vehicle into a
//! steering error for its motion controller.
//!
//! # Classification
//!
//! The [classifier](crate::classifier) selects the largest red or green obstacle
//! and the largest marker of a frame. Red blobs wider than tall and blobs
//! above a configurable row are ignored.
//!
//! # Error estimation
//!
//! The [estimator](crate::estimator) measures the obstacle against a virtual
//! guide line (left for red, right for green) after smoothing its position
//! with a low-pass filter.
//!
//! # Transmission
//!
//! The result is encoded by [protocol](crate::protocol) as a single text line
//! and sent over a [transport](crate::transport), usually a serial port.
//! The [pilot](crate::pilot) runs this cycle once per frame.

pub mod blob;
pub mod classifier;
pub mod configuration;
pub mod error;
pub mod estimator;
pub mod pilot;
pub mod protocol;
pub mod source;
pub mod transport;

/// Re-export the public API
pub mod prelude {
    pub use crate::blob::{Blob, ColorCode, Frame, OffsetAnchor};
    pub use crate::classifier::{classify, Marker, Obstacle, Selection, Signature};
    pub use crate::configuration::Config;
    pub use crate::error::Error;
    pub use crate::estimator::{ErrorEstimator, EstimatorConfig, FilterState};
    pub use crate::pilot::{self, Pilot, Step};
    pub use crate::protocol::{decode, encode, OutputMessage};
    pub use crate::source::{FrameSource, ReplaySource};
    pub use crate::transport::{SerialTransport, Transport, WriterTransport};
}
