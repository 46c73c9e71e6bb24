// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Serial link to the motion controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SerialConfig {
    /// Device path. Messages go to stdout if unset.
    pub port: Option<String>,
    pub baud_rate: u32,
    /// Upper bound for a single write
    pub timeout_ms: u64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: None,
            baud_rate: 19200,
            timeout_ms: 100,
        }
    }
}

impl SerialConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub(super) fn validate(&self) -> Result<(), Error> {
        if self.baud_rate == 0 {
            return Err(Error::Config("baud_rate must be positive".into()));
        }
        if self.timeout_ms == 0 {
            return Err(Error::Config("serial timeout must be positive".into()));
        }
        Ok(())
    }
}
