// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Wire format towards the motion controller
//!
//! One ASCII line per frame:
//!
//! ```text
//! D,<error>,<signature>,<marker x>,<marker y>,<marker width>,<marker height>\n
//! ```
//!
//! All fields are base-10 integers. The leading `D` tags the message type.

use crate::classifier::{Marker, Signature};
use std::fmt;
use std::str::FromStr;

/// Type tag of a steering data message
pub const MESSAGE_TYPE: &str = "D";

const NUM_FIELDS: usize = 6;

/// Steering data message
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub struct OutputMessage {
    pub error: i32,
    pub signature: Signature,
    pub marker: Marker,
}

impl OutputMessage {
    /// Create a message. `error` is truncated toward zero.
    pub fn new(error: f64, signature: Signature, marker: Marker) -> Self {
        Self {
            // Saturating, NaN maps to zero
            error: error as i32,
            signature,
            marker,
        }
    }

    /// The newline terminated wire representation
    pub fn to_line(&self) -> String {
        format!("{self}\n")
    }
}

impl fmt::Display for OutputMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Marker {
            x,
            y,
            width,
            height,
        } = self.marker;
        write!(
            f,
            "{MESSAGE_TYPE},{},{},{x},{y},{width},{height}",
            self.error,
            self.signature.code()
        )
    }
}

impl FromStr for OutputMessage {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}

/// Encode a message line
pub fn encode(error: f64, signature: Signature, marker: &Marker) -> String {
    OutputMessage::new(error, signature, *marker).to_line()
}

/// Decode a message line as the motion controller does
///
/// Surrounding whitespace including the line terminator is ignored.
pub fn decode(line: &str) -> Result<OutputMessage, ProtocolError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ProtocolError::Empty);
    }

    let mut fields = line.split(',');
    match fields.next() {
        Some(MESSAGE_TYPE) => {}
        Some(tag) => return Err(ProtocolError::UnknownType(tag.to_owned())),
        None => return Err(ProtocolError::Empty),
    }

    let values = fields
        .map(|field| {
            field
                .parse::<i32>()
                .map_err(|_| ProtocolError::InvalidInteger(field.to_owned()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let [error, code, x, y, width, height] = <[i32; NUM_FIELDS]>::try_from(values)
        .map_err(|values| ProtocolError::FieldCount(values.len()))?;

    let signature = Signature::from_code(code).ok_or(ProtocolError::InvalidSignature(code))?;

    Ok(OutputMessage {
        error,
        signature,
        marker: Marker {
            x,
            y,
            width,
            height,
        },
    })
}

/// Reasons for rejecting a message line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    Empty,
    UnknownType(String),
    FieldCount(usize),
    InvalidInteger(String),
    InvalidSignature(i32),
}

impl std::error::Error for ProtocolError {}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::Empty => write!(f, "empty message"),
            ProtocolError::UnknownType(tag) => write!(f, "unknown message type {tag:?}"),
            ProtocolError::FieldCount(n) => {
                write!(f, "expected {NUM_FIELDS} fields, got {n}")
            }
            ProtocolError::InvalidInteger(field) => write!(f, "invalid integer {field:?}"),
            ProtocolError::InvalidSignature(code) => write!(f, "invalid signature code {code}"),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{decode, encode, OutputMessage, ProtocolError};
    use crate::classifier::{Marker, Signature};

    const MARKER: Marker = Marker {
        x: 5,
        y: -3,
        width: 20,
        height: 18,
    };

    #[test]
    fn exact_format() {
        assert_eq!(
            encode(-12.0, Signature::Red, &MARKER),
            "D,-12,1,5,-3,20,18\n"
        );
        assert_eq!(
            encode(0.0, Signature::None, &Marker::default()),
            "D,0,6,0,0,0,0\n"
        );
    }

    #[test]
    fn error_truncates_toward_zero() {
        assert_eq!(OutputMessage::new(-12.9, Signature::Red, MARKER).error, -12);
        assert_eq!(OutputMessage::new(7.99, Signature::Green, MARKER).error, 7);
        assert_eq!(OutputMessage::new(f64::NAN, Signature::Green, MARKER).error, 0);
    }

    #[test]
    fn decode_encoded() {
        let line = encode(-140.6, Signature::Green, &MARKER);
        let message = decode(&line).unwrap();
        assert_eq!(
            message,
            OutputMessage {
                error: -140,
                signature: Signature::Green,
                marker: MARKER,
            }
        );
        assert_eq!(message.to_line(), line);
        assert_eq!("D,3,6,0,0,0,0\r\n".parse::<OutputMessage>().unwrap().error, 3);
    }

    #[test]
    fn decode_rejects() {
        assert_eq!(decode(" \n"), Err(ProtocolError::Empty));
        assert_eq!(
            decode("O,1,2,3,4,5,6"),
            Err(ProtocolError::UnknownType("O".into()))
        );
        assert_eq!(decode("D,1,2,3,4,5"), Err(ProtocolError::FieldCount(5)));
        assert_eq!(decode("D,1,2,3,4,5,6,7"), Err(ProtocolError::FieldCount(7)));
        assert_eq!(
            decode("D,1,2,x,4,5,6"),
            Err(ProtocolError::InvalidInteger("x".into()))
        );
        assert_eq!(
            decode("D,1, 2,3,4,5,6"),
            Err(ProtocolError::InvalidInteger(" 2".into()))
        );
        assert_eq!(
            decode("D,1,4,3,4,5,6"),
            Err(ProtocolError::InvalidSignature(4))
        );
    }
}
