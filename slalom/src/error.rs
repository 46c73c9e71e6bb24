// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Slalom Error implementation

/// Slalom Error type
#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    Io((std::io::Error, &'static str)),
    Serial(serialport::Error),
    Decode(String),
    Config(String),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io((e, _)) => Some(e),
            Error::Serial(e) => Some(e),
            Error::Decode(_) | Error::Config(_) => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::Io((e, description)) => write!(f, "Io error: {}, {}", description, e),
            Error::Serial(e) => write!(f, "Serial error: {}", e),
            Error::Decode(description) => write!(f, "Decode error, {}", description),
            Error::Config(description) => write!(f, "Config error, {}", description),
        }
    }
}

impl From<serialport::Error> for Error {
    fn from(e: serialport::Error) -> Self {
        Error::Serial(e)
    }
}
