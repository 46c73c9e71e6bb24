// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Replay of recorded detector output
//!
//! A recording holds one JSON encoded [Frame] per line. Blank lines are skipped.

use crate::blob::Frame;
use crate::error::Error;
use crate::source::FrameSource;
use log::{debug, info};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Default)]
pub struct ReplaySource {
    frames: Vec<Frame>,
    next: usize,
    looping: bool,
}

impl ReplaySource {
    pub fn new(frames: Vec<Frame>) -> Self {
        Self {
            frames,
            next: 0,
            looping: false,
        }
    }

    /// Open a recording file
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::Io((e, "failed to open recording")))?;
        let source = Self::from_reader(BufReader::new(file))?;
        info!(
            "Loaded {} frames from {}",
            source.frames.len(),
            path.display()
        );
        Ok(source)
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut frames = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| Error::Io((e, "failed to read recording")))?;
            if line.trim().is_empty() {
                continue;
            }
            let frame = serde_json::from_str(&line)
                .map_err(|e| Error::Decode(format!("line {}: {e}", index + 1)))?;
            frames.push(frame);
        }
        Ok(Self::new(frames))
    }

    /// Start over at the first frame instead of running out
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl FrameSource for ReplaySource {
    fn acquire(&mut self) -> Result<Option<Frame>, Error> {
        if self.next == self.frames.len() && self.looping && !self.frames.is_empty() {
            debug!("Restarting replay");
            self.next = 0;
        }

        let frame = self.frames.get(self.next).cloned();
        if frame.is_some() {
            self.next += 1;
        }
        Ok(frame)
    }
}
