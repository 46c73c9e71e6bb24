// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

use crate::configuration::SerialConfig;
use crate::error::Error;
use crate::transport::Transport;
use log::{debug, info};
use serialport::SerialPort;
use std::fmt;
use std::io::Write;

/// Serial port transport
///
/// The port is opened once and closed when the transport is dropped. Writes
/// give up after the configured timeout.
pub struct SerialTransport {
    name: String,
    port: Box<dyn SerialPort>,
}

impl SerialTransport {
    pub fn open(config: &SerialConfig) -> Result<Self, Error> {
        let name = config
            .port
            .clone()
            .ok_or_else(|| Error::Config("no serial port configured".into()))?;

        let port = serialport::new(name.as_str(), config.baud_rate)
            .timeout(config.timeout())
            .open()?;

        info!(
            "Opened serial port {name} at {} baud, timeout {:?}",
            config.baud_rate,
            config.timeout()
        );
        Ok(Self { name, port })
    }
}

impl fmt::Debug for SerialTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SerialTransport")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl Transport for SerialTransport {
    fn send(&mut self, line: &str) -> Result<(), Error> {
        self.port
            .write_all(line.as_bytes())
            .map_err(|e| Error::Io((e, "failed to write to serial port")))
    }
}

impl Drop for SerialTransport {
    fn drop(&mut self) {
        debug!("Closing serial port {}", self.name);
    }
}
