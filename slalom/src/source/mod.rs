// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Frame acquisition

mod interface;
mod replay;

pub use interface::FrameSource;
pub use replay::ReplaySource;
