// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

use crate::error::Error;
use std::io::Write;

/// Sink for encoded message lines
///
/// A failed send is not retried. The next message supersedes the lost one.
pub trait Transport {
    fn send(&mut self, line: &str) -> Result<(), Error>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, line: &str) -> Result<(), Error> {
        (**self).send(line)
    }
}

/// Transport on top of any writer, e.g. stdout or a buffer
#[derive(Debug, Default)]
pub struct WriterTransport<W> {
    writer: W,
}

impl<W: Write> WriterTransport<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Transport for WriterTransport<W> {
    fn send(&mut self, line: &str) -> Result<(), Error> {
        self.writer
            .write_all(line.as_bytes())
            .and_then(|_| self.writer.flush())
            .map_err(|e| Error::Io((e, "failed to write message")))
    }
}
