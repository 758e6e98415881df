// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Enumerated characteristic values of the air purifier service.

use std::fmt;

/// Power state exposed through the `Active` characteristic.
///
/// # Examples
///
/// ```
/// use purifier_bridge::types::Active;
///
/// assert_eq!(Active::from(true), Active::Active);
/// assert!(!Active::Inactive.is_active());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Active {
    /// The purifier is switched off.
    #[default]
    Inactive,
    /// The purifier is switched on.
    Active,
}

impl Active {
    /// Returns `true` for [`Active::Active`].
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl From<bool> for Active {
    fn from(value: bool) -> Self {
        if value { Self::Active } else { Self::Inactive }
    }
}

impl fmt::Display for Active {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Inactive => "INACTIVE",
            Self::Active => "ACTIVE",
        })
    }
}

/// What the purifier is currently doing.
///
/// `Idle` is part of the characteristic's enumeration but no device mode
/// maps to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CurrentAirPurifierState {
    /// Not purifying.
    #[default]
    Inactive,
    /// Powered but idle.
    Idle,
    /// Actively purifying air.
    PurifyingAir,
}

impl fmt::Display for CurrentAirPurifierState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Inactive => "INACTIVE",
            Self::Idle => "IDLE",
            Self::PurifyingAir => "PURIFYING_AIR",
        })
    }
}

/// Whether the purifier picks its own speed or runs at a manual level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TargetAirPurifierState {
    /// Fixed fan level chosen by the user.
    Manual,
    /// Speed chosen by the device.
    #[default]
    Auto,
}

impl fmt::Display for TargetAirPurifierState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Manual => "MANUAL",
            Self::Auto => "AUTO",
        })
    }
}

/// Whether the filter needs replacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterChangeIndication {
    /// The filter is fine.
    #[default]
    FilterOk,
    /// The filter should be replaced.
    ChangeFilter,
}

impl From<bool> for FilterChangeIndication {
    fn from(value: bool) -> Self {
        if value {
            Self::ChangeFilter
        } else {
            Self::FilterOk
        }
    }
}

impl fmt::Display for FilterChangeIndication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FilterOk => "FILTER_OK",
            Self::ChangeFilter => "CHANGE_FILTER",
        })
    }
}
