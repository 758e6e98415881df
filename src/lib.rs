// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Purifier Bridge - exposes a datapoint-driven air purifier as a
//! home-automation accessory.
//!
//! Smart air purifiers report their state as numbered datapoints: a power
//! switch, an operating mode string (`auto`, `sleep`, `1F`..`4F`), filter life
//! and a filter-change flag. Home-automation frameworks expect an Air Purifier
//! service with `Active`, `CurrentAirPurifierState`, `TargetAirPurifierState`,
//! `RotationSpeed`, `FilterLifeLevel` and `FilterChangeIndication`
//! characteristics. This library translates between the two.
//!
//! # Architecture
//!
//! - [`protocol::StateProvider`]: supplied by the host, reads and writes raw
//!   datapoints over the device transport
//! - [`AirPurifier`]: stateless translation of characteristics to datapoints
//! - [`types`]: typed values on both sides and the mode lookup table
//! - [`CharacteristicCodes`]: the framework's numeric codes, injected at
//!   construction
//!
//! # Quick Start
//!
//! ```
//! use purifier_bridge::{AccessoryConfig, AirPurifier, Characteristic};
//! use purifier_bridge::protocol::MemoryStateProvider;
//!
//! # async fn example() -> purifier_bridge::Result<()> {
//! let config = AccessoryConfig::from_json(r#"{"name": "Bedroom", "dpMode": 3}"#)?;
//! let provider = MemoryStateProvider::new()
//!     .with_datapoint(1, true)
//!     .with_datapoint(3, "2F")
//!     .with_datapoint(5, 87_i64)
//!     .with_datapoint(22, false);
//!
//! let purifier = AirPurifier::new(provider, config);
//!
//! // Framework-facing dispatch uses numeric codes
//! assert_eq!(purifier.read(Characteristic::RotationSpeed).await?, 50);
//! purifier.write(Characteristic::Active, 0).await?;
//! assert_eq!(purifier.read(Characteristic::RotationSpeed).await?, 0);
//! # Ok(())
//! # }
//! ```

mod accessory;
pub mod characteristic;
pub mod config;
pub mod error;
pub mod protocol;
pub mod types;

pub use accessory::AirPurifier;
pub use characteristic::{Characteristic, CharacteristicCodes};
pub use config::{AccessoryConfig, DatapointMap};
pub use error::{Error, ParseError, ProtocolError, Result, ValueError};
pub use protocol::{MemoryStateProvider, StateProvider};
pub use types::{
    Active, CurrentAirPurifierState, DeviceMode, DpId, DpSnapshot, DpValue, FanLevel,
    FilterChangeIndication, RotationSpeed, TargetAirPurifierState,
};
