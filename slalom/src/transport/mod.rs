// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Message transmission to the motion controller

mod interface;
mod serial;

pub use interface::{Transport, WriterTransport};
pub use serial::SerialTransport;
