// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Detector output
//!
//! The blob detector runs outside of this crate. What arrives here is, per frame,
//! an ordered list of [Blob]s: colored bounding boxes with their pixel count
//! and the set of color classes they matched.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr};

/// Set of color classes a blob matched
///
/// A blob may match several classes at once, so this is a bit set rather than
/// an enumeration. Only the three known bits are ever set.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct ColorCode(u8);

impl ColorCode {
    pub const RED: ColorCode = ColorCode(1);
    pub const GREEN: ColorCode = ColorCode(2);
    pub const MARKER: ColorCode = ColorCode(4);
    /// Classes that count as an obstacle
    pub const OBSTACLE: ColorCode = ColorCode(Self::RED.0 | Self::GREEN.0);

    const ALL: u8 = Self::RED.0 | Self::GREEN.0 | Self::MARKER.0;

    /// Create a code from raw detector bits. Unknown bits are dropped.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::ALL)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if at least one class of `other` is present
    pub const fn intersects(self, other: ColorCode) -> bool {
        self.0 & other.0 != 0
    }
}

impl From<u8> for ColorCode {
    fn from(bits: u8) -> Self {
        Self::from_bits(bits)
    }
}

impl From<ColorCode> for u8 {
    fn from(code: ColorCode) -> Self {
        code.0
    }
}

impl BitOr for ColorCode {
    type Output = ColorCode;

    fn bitor(self, rhs: ColorCode) -> ColorCode {
        ColorCode(self.0 | rhs.0)
    }
}

impl BitAnd for ColorCode {
    type Output = ColorCode;

    fn bitand(self, rhs: ColorCode) -> ColorCode {
        ColorCode(self.0 & rhs.0)
    }
}

impl fmt::Display for ColorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#05b}", self.0)
    }
}

/// Point of a blob used for position computations
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OffsetAnchor {
    /// Center of the bounding box, `(x + w / 2, y + h / 2)`
    #[default]
    BoundingBox,
    /// Pixel centroid reported by the detector, bounding box center if missing
    Centroid,
}

/// A detected colored region
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blob {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub code: ColorCode,
    /// Number of pixels of the region
    pub pixels: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub centroid: Option<(i32, i32)>,
}

impl Blob {
    pub fn new(x: i32, y: i32, width: i32, height: i32, code: ColorCode, pixels: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            code,
            pixels,
            centroid: None,
        }
    }

    pub fn with_centroid(mut self, cx: i32, cy: i32) -> Self {
        self.centroid = Some((cx, cy));
        self
    }

    /// Center of the bounding box, truncating like the detector's integer coordinates
    ///
    /// Saturates at the `i32` range.
    pub fn bbox_center(&self) -> (i32, i32) {
        (
            self.x.saturating_add(self.width / 2),
            self.y.saturating_add(self.height / 2),
        )
    }

    /// Reference point of the blob according to `anchor`
    pub fn center(&self, anchor: OffsetAnchor) -> (i32, i32) {
        match anchor {
            OffsetAnchor::BoundingBox => self.bbox_center(),
            OffsetAnchor::Centroid => self.centroid.unwrap_or_else(|| self.bbox_center()),
        }
    }

    /// Wider than tall
    pub fn is_lying(&self) -> bool {
        self.width > self.height
    }
}

/// Detector output of a single frame
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub blobs: Vec<Blob>,
}

impl Frame {
    pub fn new(width: u32, height: u32, blobs: Vec<Blob>) -> Self {
        Self {
            width,
            height,
            blobs,
        }
    }

    /// Geometric center of the frame
    pub fn center(&self) -> (i32, i32) {
        let half = |size: u32| i32::try_from(size / 2).unwrap_or(i32::MAX);
        (half(self.width), half(self.height))
    }
}

#[cfg(test)]
mod test {
    use super::{Blob, ColorCode, Frame, OffsetAnchor};

    #[test]
    fn color_code_sets() {
        assert_eq!(ColorCode::RED | ColorCode::GREEN, ColorCode::OBSTACLE);
        assert!(ColorCode::OBSTACLE.intersects(ColorCode::GREEN));
        assert!(!ColorCode::OBSTACLE.intersects(ColorCode::MARKER));
        assert!((ColorCode::RED | ColorCode::MARKER).intersects(ColorCode::OBSTACLE));
        assert!((ColorCode::RED & ColorCode::GREEN).is_empty());
        assert_eq!(ColorCode::from_bits(0xff).bits(), 7);
    }

    #[test]
    fn bbox_center_truncates() {
        let blob = Blob::new(10, 20, 5, 7, ColorCode::RED, 30);
        assert_eq!(blob.bbox_center(), (12, 23));
        assert_eq!(Frame::new(321, 241, vec![]).center(), (160, 120));
    }

    #[test]
    fn centers_saturate() {
        let blob = Blob::new(i32::MAX - 1, i32::MIN, 10, -40, ColorCode::GREEN, 800);
        assert_eq!(blob.bbox_center(), (i32::MAX, i32::MIN));
        assert_eq!(
            Frame::new(u32::MAX, 240, vec![]).center(),
            (i32::MAX, 120)
        );
    }

    #[test]
    fn centroid_anchor_falls_back() {
        let blob = Blob::new(0, 0, 10, 10, ColorCode::GREEN, 100);
        assert_eq!(blob.center(OffsetAnchor::Centroid), (5, 5));
        let blob = blob.with_centroid(3, 8);
        assert_eq!(blob.center(OffsetAnchor::Centroid), (3, 8));
        assert_eq!(blob.center(OffsetAnchor::BoundingBox), (5, 5));
    }

    #[test]
    fn lying() {
        assert!(Blob::new(0, 0, 11, 10, ColorCode::RED, 1).is_lying());
        assert!(!Blob::new(0, 0, 10, 10, ColorCode::RED, 1).is_lying());
    }

    #[test]
    fn frame_from_json() {
        let json = r#"{"width":320,"height":240,"blobs":[
            {"x":1,"y":2,"width":3,"height":4,"code":5,"pixels":6},
            {"x":1,"y":2,"width":3,"height":4,"code":2,"pixels":6,"centroid":[2,3]}
        ]}"#;
        let frame: Frame = serde_json::from_str(json).unwrap();
        assert_eq!(frame.blobs.len(), 2);
        assert_eq!(frame.blobs[0].code, ColorCode::RED | ColorCode::MARKER);
        assert_eq!(frame.blobs[1].centroid, Some((2, 3)));

        let empty: Frame = serde_json::from_str(r#"{"width":320,"height":240}"#).unwrap();
        assert!(empty.blobs.is_empty());
    }
}
