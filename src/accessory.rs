// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The air purifier accessory.
//!
//! [`AirPurifier`] projects two device axes, power (switch datapoint) and
//! operating mode (mode datapoint), onto the characteristics of an air
//! purifier service. It keeps no state of its own: every read fetches a fresh
//! snapshot from the [`StateProvider`] and every write goes straight to it.
//!
//! Provider failures are returned unchanged inside [`Error::Protocol`]. Mode
//! strings outside the device vocabulary are logged and resolved to a default
//! so the framework never sees a failed characteristic for them.
//!
//! # Examples
//!
//! ```
//! use purifier_bridge::{AccessoryConfig, AirPurifier};
//! use purifier_bridge::protocol::MemoryStateProvider;
//! use purifier_bridge::types::{RotationSpeed, TargetAirPurifierState};
//!
//! # async fn example() -> purifier_bridge::Result<()> {
//! let provider = MemoryStateProvider::new()
//!     .with_datapoint(1, true)
//!     .with_datapoint(3, "auto");
//! let purifier = AirPurifier::new(provider, AccessoryConfig::new("Bedroom"));
//!
//! assert_eq!(purifier.get_target_air_purifier_state().await?, TargetAirPurifierState::Auto);
//!
//! purifier.set_rotation_speed(RotationSpeed::new(60)?).await?;
//! assert_eq!(purifier.get_rotation_speed().await?, RotationSpeed::THREE_QUARTERS);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crate::characteristic::{Characteristic, CharacteristicCodes};
use crate::config::{AccessoryConfig, DatapointMap};
use crate::error::{Error, ParseError, Result};
use crate::protocol::StateProvider;
use crate::types::{
    Active, CurrentAirPurifierState, DeviceMode, DpId, DpSnapshot, DpValue, FanLevel,
    FilterChangeIndication, RotationSpeed, TargetAirPurifierState, current_state_for_mode,
};

/// An air purifier backed by device datapoints.
///
/// # Type Parameter
///
/// `P` is the [`StateProvider`] that reaches the device. The accessory holds
/// it behind an `Arc`, so clones share one provider.
#[derive(Debug)]
pub struct AirPurifier<P: StateProvider> {
    provider: Arc<P>,
    config: AccessoryConfig,
    codes: CharacteristicCodes,
}

impl<P: StateProvider> Clone for AirPurifier<P> {
    fn clone(&self) -> Self {
        Self {
            provider: Arc::clone(&self.provider),
            config: self.config.clone(),
            codes: self.codes,
        }
    }
}

impl<P: StateProvider> AirPurifier<P> {
    /// Creates an accessory using the standard HomeKit codes.
    #[must_use]
    pub fn new(provider: P, config: AccessoryConfig) -> Self {
        Self::with_shared_provider(Arc::new(provider), config)
    }

    /// Creates an accessory over a provider shared with other owners.
    #[must_use]
    pub fn with_shared_provider(provider: Arc<P>, config: AccessoryConfig) -> Self {
        Self {
            provider,
            config,
            codes: CharacteristicCodes::default(),
        }
    }

    /// Replaces the characteristic codes used by [`read`](Self::read) and
    /// [`write`](Self::write).
    #[must_use]
    pub fn with_codes(mut self, codes: CharacteristicCodes) -> Self {
        self.codes = codes;
        self
    }

    /// Returns the accessory's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Returns the datapoint layout.
    #[must_use]
    pub fn datapoints(&self) -> &DatapointMap {
        &self.config.datapoints
    }

    /// Returns the characteristic codes.
    #[must_use]
    pub fn codes(&self) -> &CharacteristicCodes {
        &self.codes
    }

    /// Returns the host category code of this accessory.
    #[must_use]
    pub fn category(&self) -> u8 {
        self.codes.category
    }

    /// Returns the underlying state provider.
    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Returns the characteristics this accessory serves.
    #[must_use]
    pub fn characteristics(&self) -> &'static [Characteristic] {
        &Characteristic::ALL
    }

    // ========== Active ==========

    /// Reads the power state.
    ///
    /// A datapoint missing from the reply reads as `Inactive`.
    ///
    /// # Errors
    ///
    /// Returns error if the provider fails.
    pub async fn get_active(&self) -> Result<Active> {
        let dp = &self.config.datapoints.active;
        let snapshot = self.fetch(std::slice::from_ref(dp)).await?;
        Ok(Active::from(self.truthy(&snapshot, dp)))
    }

    /// Switches the purifier on or off.
    ///
    /// # Errors
    ///
    /// Returns error if the provider rejects the write.
    pub async fn set_active(&self, value: Active) -> Result<()> {
        self.store(&self.config.datapoints.active, DpValue::Bool(value.is_active()))
            .await
    }

    // ========== Current State ==========

    /// Reads what the purifier is currently doing.
    ///
    /// Unknown mode strings are logged and reported as `Inactive`.
    ///
    /// # Errors
    ///
    /// Returns error if the provider fails or omits the datapoint.
    pub async fn get_current_air_purifier_state(&self) -> Result<CurrentAirPurifierState> {
        let dp = &self.config.datapoints.mode;
        let snapshot = self.fetch(std::slice::from_ref(dp)).await?;
        let raw = snapshot.require(dp)?;

        match raw.as_str().and_then(current_state_for_mode) {
            Some(state) => Ok(state),
            None => {
                tracing::warn!(mode = %raw, "Unhandled current state mode value");
                Ok(CurrentAirPurifierState::Inactive)
            }
        }
    }

    // ========== Target State ==========

    /// Reads whether the purifier runs automatically or manually.
    ///
    /// Unknown or missing mode values are logged and reported as `Auto`.
    ///
    /// # Errors
    ///
    /// Returns error if the provider fails.
    pub async fn get_target_air_purifier_state(&self) -> Result<TargetAirPurifierState> {
        let dp = &self.config.datapoints.mode;
        let snapshot = self.fetch(std::slice::from_ref(dp)).await?;
        let raw = self.lookup(&snapshot, dp);

        match raw.and_then(DpValue::as_str).and_then(DeviceMode::parse) {
            Some(mode) => Ok(mode.target_state()),
            None => {
                if let Some(raw) = raw {
                    tracing::warn!(mode = %raw, "Unhandled target state mode value");
                }
                Ok(TargetAirPurifierState::Auto)
            }
        }
    }

    /// Switches between automatic and manual operation.
    ///
    /// Manual writes fan level `1F`; automatic writes `auto`.
    ///
    /// # Errors
    ///
    /// Returns error if the provider rejects the write.
    pub async fn set_target_air_purifier_state(&self, value: TargetAirPurifierState) -> Result<()> {
        let mode = DeviceMode::for_target_state(value);
        self.store(&self.config.datapoints.mode, DpValue::from(mode.as_str()))
            .await
    }

    // ========== Rotation Speed ==========

    /// Reads the fan speed.
    ///
    /// The switch and mode datapoints are fetched in one request. The speed is
    /// 0 whenever the switch is off or missing, whatever the mode says. An
    /// unknown or missing mode is logged and reads as 0.
    ///
    /// # Errors
    ///
    /// Returns error if the provider fails.
    pub async fn get_rotation_speed(&self) -> Result<RotationSpeed> {
        let DatapointMap { switch, mode, .. } = &self.config.datapoints;
        let snapshot = self.fetch(&[switch.clone(), mode.clone()]).await?;

        if !self.truthy(&snapshot, switch) {
            return Ok(RotationSpeed::OFF);
        }

        let raw = self.lookup(&snapshot, mode);
        match raw
            .and_then(DpValue::as_str)
            .and_then(DeviceMode::parse)
            .and_then(|m| m.rotation_speed())
        {
            Some(speed) => Ok(speed),
            None => {
                if let Some(raw) = raw {
                    tracing::warn!(mode = %raw, "Unhandled rotation speed mode value");
                }
                Ok(RotationSpeed::OFF)
            }
        }
    }

    /// Sets the fan speed.
    ///
    /// A speed of 0 switches the purifier off and leaves the mode untouched.
    /// Any other speed selects the fan level whose band contains it. Setting a
    /// speed does not switch the purifier on.
    ///
    /// # Errors
    ///
    /// Returns error if the provider rejects the write.
    pub async fn set_rotation_speed(&self, value: RotationSpeed) -> Result<()> {
        match FanLevel::for_speed(value) {
            None => self.set_active(Active::Inactive).await,
            Some(level) => {
                self.store(&self.config.datapoints.mode, DpValue::from(level.as_str()))
                    .await
            }
        }
    }

    // ========== Filter ==========

    /// Reads the remaining filter life in percent, as reported.
    ///
    /// # Errors
    ///
    /// Returns error if the provider fails, omits the datapoint, or reports
    /// something other than an integer in `0..=255`.
    pub async fn get_filter_life_level(&self) -> Result<u8> {
        let dp = &self.config.datapoints.filter_life;
        let snapshot = self.fetch(std::slice::from_ref(dp)).await?;

        snapshot
            .require(dp)?
            .as_integer()
            .and_then(|n| u8::try_from(n).ok())
            .ok_or_else(|| {
                ParseError::UnexpectedType {
                    datapoint: dp.clone(),
                    expected: "integer percent",
                }
                .into()
            })
    }

    /// Reads whether the filter needs replacing.
    ///
    /// A datapoint missing from the reply reads as `FilterOk`.
    ///
    /// # Errors
    ///
    /// Returns error if the provider fails.
    pub async fn get_filter_change_indication(&self) -> Result<FilterChangeIndication> {
        let dp = &self.config.datapoints.filter_change;
        let snapshot = self.fetch(std::slice::from_ref(dp)).await?;
        Ok(FilterChangeIndication::from(self.truthy(&snapshot, dp)))
    }

    // ========== Framework Dispatch ==========

    /// Reads a characteristic and encodes it with the configured codes.
    ///
    /// # Errors
    ///
    /// Returns error if the underlying getter fails.
    pub async fn read(&self, characteristic: Characteristic) -> Result<u8> {
        let codes = &self.codes;
        let code = match characteristic {
            Characteristic::Active => codes.encode_active(self.get_active().await?),
            Characteristic::CurrentAirPurifierState => {
                codes.encode_current_state(self.get_current_air_purifier_state().await?)
            }
            Characteristic::TargetAirPurifierState => {
                codes.encode_target_state(self.get_target_air_purifier_state().await?)
            }
            Characteristic::RotationSpeed => self.get_rotation_speed().await?.value(),
            Characteristic::FilterLifeLevel => self.get_filter_life_level().await?,
            Characteristic::FilterChangeIndication => {
                codes.encode_filter_change(self.get_filter_change_indication().await?)
            }
        };
        tracing::debug!(characteristic = %characteristic, code, "Read characteristic");
        Ok(code)
    }

    /// Decodes a framework value and writes it to the device.
    ///
    /// An `Active` code other than `ACTIVE` switches the purifier off. An
    /// unknown `TargetAirPurifierState` code is logged and ignored. Rotation
    /// speeds above 100 fall into the top band.
    ///
    /// # Errors
    ///
    /// Returns `Error::ReadOnly` for characteristics without a setter, or
    /// the provider's error if the write fails.
    pub async fn write(&self, characteristic: Characteristic, code: u8) -> Result<()> {
        tracing::debug!(characteristic = %characteristic, code, "Write characteristic");
        match characteristic {
            Characteristic::Active => self.set_active(self.codes.decode_active(code)).await,
            Characteristic::TargetAirPurifierState => {
                match self.codes.decode_target_state(code) {
                    Ok(state) => self.set_target_air_purifier_state(state).await,
                    Err(e) => {
                        tracing::warn!(
                            value = code,
                            error = %e,
                            "Unhandled target state value, ignoring"
                        );
                        Ok(())
                    }
                }
            }
            Characteristic::RotationSpeed => {
                self.set_rotation_speed(RotationSpeed::clamped(code)).await
            }
            Characteristic::CurrentAirPurifierState
            | Characteristic::FilterLifeLevel
            | Characteristic::FilterChangeIndication => {
                Err(Error::ReadOnly(characteristic.name()))
            }
        }
    }

    async fn fetch(&self, keys: &[DpId]) -> Result<DpSnapshot> {
        let snapshot = self.provider.get_state(keys).await?;
        tracing::debug!(
            accessory = %self.config.name,
            ?keys,
            ?snapshot,
            "Fetched datapoints"
        );
        Ok(snapshot)
    }

    /// Returns a datapoint from the snapshot, logging when the device left it out.
    fn lookup<'a>(&self, snapshot: &'a DpSnapshot, dp: &DpId) -> Option<&'a DpValue> {
        let value = snapshot.get(dp);
        if value.is_none() {
            tracing::warn!(
                accessory = %self.config.name,
                datapoint = %dp,
                "Datapoint missing from snapshot"
            );
        }
        value
    }

    fn truthy(&self, snapshot: &DpSnapshot, dp: &DpId) -> bool {
        self.lookup(snapshot, dp).is_some_and(DpValue::is_truthy)
    }

    async fn store(&self, key: &DpId, value: DpValue) -> Result<()> {
        tracing::debug!(
            accessory = %self.config.name,
            datapoint = %key,
            value = %value,
            "Writing datapoint"
        );
        self.provider.set_state(key, value).await?;
        Ok(())
    }
}
