// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Obstacle and marker selection
//!
//! From the blob list of one frame, pick at most one obstacle and at most one
//! marker. The largest blob (by pixel count) of each kind wins. Ties go to the
//! blob seen first.

use crate::blob::{Blob, ColorCode, OffsetAnchor};
use std::fmt;

/// Classification of the selected obstacle
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub enum Signature {
    Red,
    Green,
    /// No qualifying obstacle in the frame
    #[default]
    None,
}

impl Signature {
    /// Code transmitted to the motion controller
    pub const fn code(self) -> u8 {
        match self {
            Signature::Red => 1,
            Signature::Green => 2,
            Signature::None => 6,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Signature::Red),
            2 => Some(Signature::Green),
            6 => Some(Signature::None),
            _ => None,
        }
    }

    /// Red takes precedence when a blob matched both obstacle colors
    fn from_color(code: ColorCode) -> Self {
        if code.intersects(ColorCode::RED) {
            Signature::Red
        } else {
            Signature::Green
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signature::Red => write!(f, "red"),
            Signature::Green => write!(f, "green"),
            Signature::None => write!(f, "none"),
        }
    }
}

/// Selected obstacle, position relative to the frame center
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Obstacle {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub signature: Signature,
}

/// Selected marker, position relative to the frame center
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct Marker {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Selection rules applied by [classify]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub obstacle_mask: ColorCode,
    pub marker_mask: ColorCode,
    /// Blobs centered above this row are ignored. `0` disables the filter.
    pub y_ignore_threshold: i32,
    pub anchor: OffsetAnchor,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            obstacle_mask: ColorCode::OBSTACLE,
            marker_mask: ColorCode::MARKER,
            y_ignore_threshold: 0,
            anchor: OffsetAnchor::BoundingBox,
        }
    }
}

impl Selection {
    fn ignores_row(&self, y: i32) -> bool {
        self.y_ignore_threshold > 0 && y < self.y_ignore_threshold
    }

    fn is_obstacle(&self, blob: &Blob) -> bool {
        // Red blobs lying on their side are mostly line markings
        blob.code.intersects(self.obstacle_mask)
            && !(blob.code.intersects(ColorCode::RED) && blob.is_lying())
    }

    fn is_marker(&self, blob: &Blob) -> bool {
        blob.code.intersects(self.marker_mask)
    }
}

/// Select the obstacle and the marker of a frame
///
/// `center` is the frame center in detector coordinates. Missing obstacles
/// resolve to the default [Obstacle] with [Signature::None], missing markers to
/// the all-zero [Marker].
pub fn classify(blobs: &[Blob], center: (i32, i32), selection: &Selection) -> (Obstacle, Marker) {
    let mut obstacle: Option<&Blob> = None;
    let mut marker: Option<&Blob> = None;

    for blob in blobs {
        let (_, y) = blob.center(selection.anchor);
        if selection.ignores_row(y) {
            continue;
        }

        if selection.is_obstacle(blob) && larger(blob, obstacle) {
            obstacle = Some(blob);
        }
        if selection.is_marker(blob) && larger(blob, marker) {
            marker = Some(blob);
        }
    }

    let obstacle = obstacle
        .map(|blob| {
            let (x, y) = relative(blob, center, selection.anchor);
            Obstacle {
                x,
                y,
                width: blob.width,
                height: blob.height,
                signature: Signature::from_color(blob.code),
            }
        })
        .unwrap_or_default();

    let marker = marker
        .map(|blob| {
            let (x, y) = relative(blob, center, selection.anchor);
            Marker {
                x,
                y,
                width: blob.width,
                height: blob.height,
            }
        })
        .unwrap_or_default();

    (obstacle, marker)
}

fn larger(blob: &Blob, best: Option<&Blob>) -> bool {
    best.map_or(true, |best| blob.pixels > best.pixels)
}

fn relative(blob: &Blob, center: (i32, i32), anchor: OffsetAnchor) -> (i32, i32) {
    let (x, y) = blob.center(anchor);
    (x.saturating_sub(center.0), y.saturating_sub(center.1))
}

#[cfg(test)]
mod test {
    use super::{classify, Marker, Obstacle, Selection, Signature};
    use crate::blob::{Blob, ColorCode, OffsetAnchor};

    const CENTER: (i32, i32) = (160, 120);

    fn filtered(threshold: i32) -> Selection {
        Selection {
            y_ignore_threshold: threshold,
            ..Selection::default()
        }
    }

    #[test]
    fn empty_frame() {
        let (obstacle, marker) = classify(&[], CENTER, &Selection::default());
        assert_eq!(obstacle, Obstacle::default());
        assert_eq!(obstacle.signature, Signature::None);
        assert_eq!(marker, Marker::default());
    }

    #[test]
    fn largest_obstacle_wins() {
        let blobs = [
            Blob::new(0, 100, 10, 20, ColorCode::RED, 150),
            Blob::new(200, 100, 30, 40, ColorCode::GREEN, 900),
            Blob::new(100, 100, 20, 30, ColorCode::RED, 400),
        ];
        let (obstacle, _) = classify(&blobs, CENTER, &Selection::default());
        assert_eq!(
            obstacle,
            Obstacle {
                x: 215 - 160,
                y: 120 - 120,
                width: 30,
                height: 40,
                signature: Signature::Green,
            }
        );
    }

    #[test]
    fn ties_go_to_first() {
        let blobs = [
            Blob::new(10, 100, 10, 20, ColorCode::GREEN, 500),
            Blob::new(300, 100, 10, 20, ColorCode::RED, 500),
        ];
        let (obstacle, _) = classify(&blobs, CENTER, &Selection::default());
        assert_eq!(obstacle.signature, Signature::Green);
        assert_eq!(obstacle.x, 15 - 160);
    }

    #[test]
    fn lying_red_rejected() {
        let blobs = [
            Blob::new(0, 100, 80, 10, ColorCode::RED, 5000),
            Blob::new(0, 100, 10, 20, ColorCode::RED, 100),
        ];
        let (obstacle, _) = classify(&blobs, CENTER, &Selection::default());
        assert_eq!(obstacle.width, 10);
        assert_eq!(obstacle.signature, Signature::Red);

        let blobs = [Blob::new(0, 100, 80, 10, ColorCode::RED, 5000)];
        let (obstacle, _) = classify(&blobs, CENTER, &Selection::default());
        assert_eq!(obstacle.signature, Signature::None);
    }

    #[test]
    fn lying_green_accepted() {
        let blobs = [Blob::new(0, 100, 80, 10, ColorCode::GREEN, 5000)];
        let (obstacle, _) = classify(&blobs, CENTER, &Selection::default());
        assert_eq!(obstacle.signature, Signature::Green);
        assert_eq!(obstacle.width, 80);
    }

    #[test]
    fn red_and_green_is_red() {
        let blobs = [Blob::new(0, 100, 10, 20, ColorCode::OBSTACLE, 100)];
        let (obstacle, _) = classify(&blobs, CENTER, &Selection::default());
        assert_eq!(obstacle.signature, Signature::Red);
    }

    #[test]
    fn y_threshold_filters_both() {
        // Centers at y = 10, above the threshold
        let blobs = [
            Blob::new(0, 0, 10, 20, ColorCode::GREEN, 1000),
            Blob::new(50, 0, 10, 20, ColorCode::MARKER, 1000),
            Blob::new(100, 100, 10, 20, ColorCode::RED, 10),
        ];
        let (obstacle, marker) = classify(&blobs, CENTER, &filtered(30));
        assert_eq!(obstacle.signature, Signature::Red);
        assert_eq!(marker, Marker::default());

        let (obstacle, marker) = classify(&blobs, CENTER, &filtered(0));
        assert_eq!(obstacle.signature, Signature::Green);
        assert_eq!(marker.x, 55 - 160);

        // Centered exactly on the threshold row is kept
        let blobs = [
            Blob::new(0, 20, 10, 20, ColorCode::GREEN, 1000),
            Blob::new(50, 20, 10, 20, ColorCode::MARKER, 1000),
        ];
        let (obstacle, marker) = classify(&blobs, CENTER, &filtered(30));
        assert_eq!(obstacle.signature, Signature::Green);
        assert_eq!(obstacle.y, 30 - 120);
        assert_eq!(marker.y, 30 - 120);
    }

    #[test]
    fn extreme_coordinates() {
        let blobs = [
            Blob::new(i32::MAX - 1, 100, 10, 40, ColorCode::GREEN, 800),
            Blob::new(i32::MIN, 100, 10, 40, ColorCode::MARKER, 800),
        ];
        let (obstacle, marker) = classify(&blobs, CENTER, &Selection::default());
        assert_eq!(obstacle.signature, Signature::Green);
        assert_eq!(obstacle.x, i32::MAX - 160);
        assert_eq!(marker.x, i32::MIN);
    }

    #[test]
    fn y_threshold_uses_anchor() {
        let blob = Blob::new(0, 0, 10, 100, ColorCode::GREEN, 1000).with_centroid(5, 10);
        let selection = Selection {
            anchor: OffsetAnchor::Centroid,
            ..filtered(30)
        };
        let (obstacle, _) = classify(&[blob], CENTER, &selection);
        assert_eq!(obstacle.signature, Signature::None);

        let (obstacle, _) = classify(&[blob], CENTER, &filtered(30));
        assert_eq!(obstacle.signature, Signature::Green);
        assert_eq!(obstacle.y, 50 - 120);
    }

    #[test]
    fn marker_independent_of_obstacle() {
        let blobs = [
            Blob::new(0, 100, 80, 10, ColorCode::RED, 5000),
            Blob::new(200, 150, 20, 18, ColorCode::MARKER, 300),
            Blob::new(0, 150, 20, 18, ColorCode::MARKER, 200),
        ];
        let (obstacle, marker) = classify(&blobs, CENTER, &Selection::default());
        assert_eq!(obstacle.signature, Signature::None);
        assert_eq!(
            marker,
            Marker {
                x: 210 - 160,
                y: 159 - 120,
                width: 20,
                height: 18,
            }
        );
    }

    #[test]
    fn blob_can_be_obstacle_and_marker() {
        let blobs = [Blob::new(100, 100, 10, 20, ColorCode::GREEN | ColorCode::MARKER, 100)];
        let (obstacle, marker) = classify(&blobs, CENTER, &Selection::default());
        assert_eq!(obstacle.signature, Signature::Green);
        assert_eq!((marker.x, marker.y), (obstacle.x, obstacle.y));
    }

    #[test]
    fn signature_codes() {
        for signature in [Signature::Red, Signature::Green, Signature::None] {
            assert_eq!(
                Signature::from_code(signature.code() as i32),
                Some(signature)
            );
        }
        assert_eq!(Signature::from_code(4), None);
    }
}
