// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the purifier bridge.
//!
//! Two classes of failure exist at this layer. Transport failures reported by
//! the [`StateProvider`](crate::protocol::StateProvider) are carried unchanged
//! inside [`Error::Protocol`]. Unknown mode strings never reach the caller of
//! an accessor; they are logged and resolved to a default. [`ValueError`]
//! comes from constrained-type constructors such as
//! [`RotationSpeed::new`](crate::types::RotationSpeed::new) and from code
//! decoding in [`CharacteristicCodes`](crate::CharacteristicCodes), whose
//! `UnknownCode` the accessory's `write` logs and drops.

use thiserror::Error;

use crate::types::DpId;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// The state provider failed to read or write a datapoint.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// The state provider returned a snapshot that cannot be interpreted.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A write was issued to a characteristic that only supports reads.
    #[error("characteristic {0} is read-only")]
    ReadOnly(&'static str),
}

/// Errors related to value validation and constraints.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },

    /// A numeric code does not belong to the characteristic's enumeration.
    #[error("unknown {characteristic} code: {code}")]
    UnknownCode {
        /// The characteristic being decoded.
        characteristic: &'static str,
        /// The code that was provided.
        code: u8,
    },
}

/// Errors reported by a state provider while talking to the device.
///
/// These are produced by provider implementations and forwarded verbatim by
/// the accessory. The bridge never retries.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Connection to the device failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timed out.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// The device rejected or failed the request.
    #[error("device error: {0}")]
    Device(String),

    /// Internal channel was closed.
    #[error("channel closed: {0}")]
    ChannelClosed(String),
}

/// Errors related to interpreting a datapoint snapshot.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// A requested datapoint is absent from the snapshot.
    #[error("datapoint {0} missing from snapshot")]
    MissingDatapoint(DpId),

    /// A datapoint holds a value of the wrong shape.
    #[error("datapoint {datapoint}: expected {expected}")]
    UnexpectedType {
        /// The datapoint that failed to parse.
        datapoint: DpId,
        /// Description of the expected value.
        expected: &'static str,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
