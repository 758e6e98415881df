// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types on both sides of the bridge.
//!
//! # Device side
//!
//! - [`DpId`] - Datapoint identifier (`"1"`, `"3"`, ...)
//! - [`DpValue`] - Raw datapoint value (bool, integer, string)
//! - [`DpSnapshot`] - Datapoint values fetched together for one request
//! - [`DeviceMode`] / [`FanLevel`] - The mode datapoint's vocabulary
//!
//! # Characteristic side
//!
//! - [`Active`] - Power state
//! - [`CurrentAirPurifierState`] - What the purifier is doing
//! - [`TargetAirPurifierState`] - Manual or automatic operation
//! - [`RotationSpeed`] - Fan speed (0-100%)
//! - [`FilterChangeIndication`] - Filter replacement flag

mod datapoint;
mod mode;
mod speed;
mod state;

pub use datapoint::{DpId, DpSnapshot, DpValue};
pub use mode::{DeviceMode, FanLevel, current_state_for_mode};
pub use speed::RotationSpeed;
pub use state::{Active, CurrentAirPurifierState, FilterChangeIndication, TargetAirPurifierState};
