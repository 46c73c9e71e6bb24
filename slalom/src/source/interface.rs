// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

use crate::blob::Frame;
use crate::configuration::ColorThresholds;
use crate::error::Error;

/// Delivers the detector output of one frame per call
pub trait FrameSource {
    /// Called once before the first frame with the color classes to detect
    fn startup(&mut self, _thresholds: &ColorThresholds) -> Result<(), Error> {
        Ok(())
    }

    /// Block until the next frame is available
    ///
    /// `Ok(None)` means the source is exhausted. Errors are fatal.
    fn acquire(&mut self) -> Result<Option<Frame>, Error>;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn startup(&mut self, thresholds: &ColorThresholds) -> Result<(), Error> {
        (**self).startup(thresholds)
    }

    fn acquire(&mut self) -> Result<Option<Frame>, Error> {
        (**self).acquire()
    }
}
