// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Characteristics of the air purifier service and their wire codes.
//!
//! The home-automation framework exchanges characteristic values as small
//! integers. Which integer stands for which enum member belongs to the
//! framework, so the codes are handed to the accessory at construction as a
//! [`CharacteristicCodes`] instead of being hard-wired. The default is the
//! standard HomeKit numbering.

use std::fmt;

use crate::error::ValueError;
use crate::types::{Active, CurrentAirPurifierState, FilterChangeIndication, TargetAirPurifierState};

/// One characteristic of the air purifier service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Characteristic {
    /// Power on/off.
    Active,
    /// What the purifier is doing (read-only).
    CurrentAirPurifierState,
    /// Manual or automatic operation.
    TargetAirPurifierState,
    /// Fan speed in percent.
    RotationSpeed,
    /// Remaining filter life in percent (read-only).
    FilterLifeLevel,
    /// Filter replacement flag (read-only).
    FilterChangeIndication,
}

impl Characteristic {
    /// Every characteristic registered on the service, in registration order.
    pub const ALL: [Self; 6] = [
        Self::Active,
        Self::CurrentAirPurifierState,
        Self::TargetAirPurifierState,
        Self::RotationSpeed,
        Self::FilterLifeLevel,
        Self::FilterChangeIndication,
    ];

    /// Returns the characteristic's framework name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::CurrentAirPurifierState => "CurrentAirPurifierState",
            Self::TargetAirPurifierState => "TargetAirPurifierState",
            Self::RotationSpeed => "RotationSpeed",
            Self::FilterLifeLevel => "FilterLifeLevel",
            Self::FilterChangeIndication => "FilterChangeIndication",
        }
    }

    /// Returns `true` if the characteristic accepts writes.
    #[must_use]
    pub const fn is_writable(&self) -> bool {
        matches!(
            self,
            Self::Active | Self::TargetAirPurifierState | Self::RotationSpeed
        )
    }
}

impl fmt::Display for Characteristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Numeric codes the framework uses for each enumerated value.
///
/// # Examples
///
/// ```
/// use purifier_bridge::characteristic::CharacteristicCodes;
/// use purifier_bridge::types::TargetAirPurifierState;
///
/// let codes = CharacteristicCodes::default();
/// assert_eq!(codes.encode_target_state(TargetAirPurifierState::Auto), 1);
/// assert_eq!(codes.decode_target_state(0).unwrap(), TargetAirPurifierState::Manual);
/// assert!(codes.decode_target_state(2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacteristicCodes {
    /// Accessory category of an air purifier.
    pub category: u8,
    /// `Active.INACTIVE`.
    pub inactive: u8,
    /// `Active.ACTIVE`.
    pub active: u8,
    /// `CurrentAirPurifierState.INACTIVE`.
    pub current_inactive: u8,
    /// `CurrentAirPurifierState.IDLE`.
    pub current_idle: u8,
    /// `CurrentAirPurifierState.PURIFYING_AIR`.
    pub current_purifying_air: u8,
    /// `TargetAirPurifierState.MANUAL`.
    pub target_manual: u8,
    /// `TargetAirPurifierState.AUTO`.
    pub target_auto: u8,
    /// `FilterChangeIndication.FILTER_OK`.
    pub filter_ok: u8,
    /// `FilterChangeIndication.CHANGE_FILTER`.
    pub change_filter: u8,
}

impl CharacteristicCodes {
    /// Standard HomeKit numbering.
    pub const HOMEKIT: Self = Self {
        category: 19,
        inactive: 0,
        active: 1,
        current_inactive: 0,
        current_idle: 1,
        current_purifying_air: 2,
        target_manual: 0,
        target_auto: 1,
        filter_ok: 0,
        change_filter: 1,
    };

    /// Encodes an `Active` value.
    #[must_use]
    pub const fn encode_active(&self, value: Active) -> u8 {
        match value {
            Active::Inactive => self.inactive,
            Active::Active => self.active,
        }
    }

    /// Decodes an `Active` code.
    ///
    /// Only the `ACTIVE` code means active; any other code is treated as
    /// inactive.
    #[must_use]
    pub const fn decode_active(&self, code: u8) -> Active {
        if code == self.active {
            Active::Active
        } else {
            Active::Inactive
        }
    }

    /// Encodes a `CurrentAirPurifierState` value.
    #[must_use]
    pub const fn encode_current_state(&self, value: CurrentAirPurifierState) -> u8 {
        match value {
            CurrentAirPurifierState::Inactive => self.current_inactive,
            CurrentAirPurifierState::Idle => self.current_idle,
            CurrentAirPurifierState::PurifyingAir => self.current_purifying_air,
        }
    }

    /// Encodes a `TargetAirPurifierState` value.
    #[must_use]
    pub const fn encode_target_state(&self, value: TargetAirPurifierState) -> u8 {
        match value {
            TargetAirPurifierState::Manual => self.target_manual,
            TargetAirPurifierState::Auto => self.target_auto,
        }
    }

    /// Decodes a `TargetAirPurifierState` code.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::UnknownCode` for a code outside the enumeration.
    pub fn decode_target_state(&self, code: u8) -> Result<TargetAirPurifierState, ValueError> {
        if code == self.target_manual {
            Ok(TargetAirPurifierState::Manual)
        } else if code == self.target_auto {
            Ok(TargetAirPurifierState::Auto)
        } else {
            Err(ValueError::UnknownCode {
                characteristic: Characteristic::TargetAirPurifierState.name(),
                code,
            })
        }
    }

    /// Encodes a `FilterChangeIndication` value.
    #[must_use]
    pub const fn encode_filter_change(&self, value: FilterChangeIndication) -> u8 {
        match value {
            FilterChangeIndication::FilterOk => self.filter_ok,
            FilterChangeIndication::ChangeFilter => self.change_filter,
        }
    }
}

impl Default for CharacteristicCodes {
    fn default() -> Self {
        Self::HOMEKIT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writable_characteristics() {
        let writable: Vec<_> = Characteristic::ALL
            .iter()
            .filter(|c| c.is_writable())
            .map(Characteristic::name)
            .collect();
        assert_eq!(
            writable,
            vec!["Active", "TargetAirPurifierState", "RotationSpeed"]
        );
    }

    #[test]
    fn homekit_codes() {
        let codes = CharacteristicCodes::default();
        assert_eq!(codes.category, 19);
        assert_eq!(codes.encode_active(Active::Active), 1);
        assert_eq!(codes.encode_active(Active::Inactive), 0);
        assert_eq!(
            codes.encode_current_state(CurrentAirPurifierState::PurifyingAir),
            2
        );
        assert_eq!(codes.encode_current_state(CurrentAirPurifierState::Idle), 1);
        assert_eq!(
            codes.encode_filter_change(FilterChangeIndication::ChangeFilter),
            1
        );
    }

    #[test]
    fn decode_active_is_binary() {
        let codes = CharacteristicCodes::default();
        assert_eq!(codes.decode_active(1), Active::Active);
        assert_eq!(codes.decode_active(0), Active::Inactive);
        assert_eq!(codes.decode_active(9), Active::Inactive);
    }

    #[test]
    fn custom_codes_are_honored() {
        let codes = CharacteristicCodes {
            target_manual: 10,
            target_auto: 20,
            ..CharacteristicCodes::HOMEKIT
        };
        assert_eq!(
            codes.decode_target_state(20).unwrap(),
            TargetAirPurifierState::Auto
        );
        assert_eq!(
            codes.decode_target_state(0).unwrap_err(),
            ValueError::UnknownCode {
                characteristic: "TargetAirPurifierState",
                code: 0
            }
        );
    }
}
