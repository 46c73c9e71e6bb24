// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Per-frame control cycle
//!
//! The pilot acquires a frame, selects obstacle and marker, estimates the
//! steering error and transmits the encoded message. One frame is finished
//! before the next one is acquired. The filter state is owned by the pilot and
//! lives as long as it does.

use crate::blob::Frame;
use crate::classifier::{classify, Selection};
use crate::configuration::Config;
use crate::error::Error;
use crate::estimator::{ErrorEstimator, FilterState};
use crate::protocol::OutputMessage;
use crate::source::FrameSource;
use crate::transport::Transport;
use log::{debug, error, info, trace, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

/// Outcome of a single cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The message was transmitted
    Sent(OutputMessage),
    /// Transmission failed and the message was dropped
    Dropped(OutputMessage),
    /// The frame source has no more frames
    Exhausted,
}

pub struct Pilot<S, T> {
    source: S,
    transport: T,
    config: Config,
    selection: Selection,
    estimator: ErrorEstimator,
    state: FilterState,
    cycles: u64,
    dropped: u64,
}

impl<S: FrameSource, T: Transport> Pilot<S, T> {
    pub fn new(config: Config, source: S, transport: T) -> Self {
        Self {
            source,
            transport,
            selection: config.selection(),
            estimator: ErrorEstimator::new(config.estimator()),
            config,
            state: FilterState::default(),
            cycles: 0,
            dropped: 0,
        }
    }

    /// Called once before the first cycle
    ///
    /// Rejects an invalid configuration before any frame is acquired.
    pub fn startup(&mut self) -> Result<(), Error> {
        self.config.validate()?;
        info!(
            "Pilot startup: line offset {}, y ignore {}, lpf alpha {}, lpf reset {}, anchor {:?}",
            self.config.line_offset,
            self.config.y_ignore_threshold,
            self.config.lpf_alpha,
            self.config.lpf_reset_loops,
            self.config.anchor,
        );
        self.source.startup(&self.config.thresholds)
    }

    /// Run one cycle: acquire, classify, estimate, transmit
    ///
    /// Acquisition errors are returned. Transmission errors are logged and the
    /// message is dropped.
    pub fn step(&mut self) -> Result<Step, Error> {
        let Some(frame) = self.source.acquire()? else {
            return Ok(Step::Exhausted);
        };

        let message = self.process(&frame);
        self.cycles += 1;

        match self.transport.send(&message.to_line()) {
            Ok(()) => Ok(Step::Sent(message)),
            Err(e) => {
                self.dropped += 1;
                warn!("Dropping message {message}: {e}");
                Ok(Step::Dropped(message))
            }
        }
    }

    /// Turn a frame into its message and advance the filter state
    pub fn process(&mut self, frame: &Frame) -> OutputMessage {
        let center = frame.center();
        let (obstacle, marker) = classify(&frame.blobs, center, &self.selection);
        let (error, state) = self.estimator.estimate(&obstacle, self.state, center.0);
        self.state = state;

        let message = OutputMessage::new(error, obstacle.signature, marker);
        debug!(
            "error: {error:.1} sig: {} ({}) marker: {:?} blobs: {}",
            obstacle.signature,
            obstacle.signature.code(),
            marker,
            frame.blobs.len()
        );
        message
    }

    /// Called once after the last cycle
    pub fn shutdown(&mut self) {
        info!(
            "Pilot shutdown after {} cycles, {} messages dropped",
            self.cycles, self.dropped
        );
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.state
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn cycle_time(&self) -> Option<Duration> {
        self.config.cycle_time()
    }

    pub fn into_parts(self) -> (S, T) {
        (self.source, self.transport)
    }
}

/// Run cycles until `cancel` is set or the source is exhausted
///
/// If a cycle time is configured, each cycle is padded to that duration.
/// Acquisition errors end the loop and are returned after shutdown.
pub fn run<S: FrameSource, T: Transport>(
    pilot: &mut Pilot<S, T>,
    cancel: &AtomicBool,
) -> Result<(), Error> {
    pilot.startup()?;

    let result = loop {
        if cancel.load(Ordering::SeqCst) {
            info!("Cancellation requested");
            break Ok(());
        }

        let cycle_start = Instant::now();
        match pilot.step() {
            Ok(Step::Exhausted) => {
                info!("Frame source exhausted");
                break Ok(());
            }
            Ok(_) => {}
            Err(e) => {
                error!("Frame acquisition failed: {e}");
                break Err(e);
            }
        }

        if let Some(cycle_time) = pilot.cycle_time() {
            let cycle_duration = cycle_start.elapsed();
            let time_left = cycle_time.saturating_sub(cycle_duration);
            if time_left.is_zero() {
                warn!(
                    "Finished cycle after {cycle_duration:?}. Expected less than {cycle_time:?}"
                );
            } else {
                trace!("Finished cycle after {cycle_duration:?}. Sleeping for {time_left:?}");
                thread::sleep(time_left);
            }
        }
    };

    pilot.shutdown();
    result
}
