// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Access to the device's datapoints.
//!
//! The bridge does not talk to devices itself. A host supplies a
//! [`StateProvider`] that reads and writes raw datapoints over whatever
//! transport the device uses, and owns retries, timeouts and connection
//! lifecycle.
//!
//! # Providers
//!
//! - [`MemoryStateProvider`]: in-memory datapoints that echo writes, for
//!   tests and for hosts that stage state themselves

mod memory;

pub use memory::MemoryStateProvider;

use crate::error::ProtocolError;
use crate::types::{DpId, DpSnapshot, DpValue};

/// Trait for anything that can read and write device datapoints.
///
/// Every call resolves exactly once, with a value or an error. Implementations
/// must fetch fresh values on each [`get_state`](Self::get_state) call; the
/// bridge relies on that and never caches.
#[allow(async_fn_in_trait)]
pub trait StateProvider {
    /// Fetches the current values of the given datapoints.
    ///
    /// When several keys are requested they must be returned together as a
    /// single snapshot.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the device cannot be reached or rejects
    /// the request.
    async fn get_state(&self, keys: &[DpId]) -> Result<DpSnapshot, ProtocolError>;

    /// Writes a raw value to one datapoint.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if the write fails.
    async fn set_state(&self, key: &DpId, value: DpValue) -> Result<(), ProtocolError>;
}
