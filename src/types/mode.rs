// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device operating modes and their projection onto characteristics.
//!
//! The mode datapoint carries a small closed vocabulary of strings. This
//! module turns those strings into a [`DeviceMode`] through one lookup table
//! and projects each mode onto the air purifier characteristics:
//!
//! | Device mode | Current state | Target state | Rotation speed |
//! |-------------|---------------|--------------|----------------|
//! | `auto`, `sleep` | `PurifyingAir` | `Auto` | 0 |
//! | `manual` | `Inactive` | `Manual` | none |
//! | `1F` .. `4F` | `Inactive` | `Manual` | 25 .. 100 |
//!
//! Several modes collapse onto the same characteristic value, so the write
//! path picks a representative mode instead of inverting the table.

use std::fmt;

use super::{CurrentAirPurifierState, RotationSpeed, TargetAirPurifierState};

/// Manual fan level of the purifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FanLevel {
    /// Level `1F`, reported as 25%.
    One,
    /// Level `2F`, reported as 50%.
    Two,
    /// Level `3F`, reported as 75%.
    Three,
    /// Level `4F`, reported as 100%.
    Four,
}

impl FanLevel {
    /// All levels, slowest first.
    pub const ALL: [Self; 4] = [Self::One, Self::Two, Self::Three, Self::Four];

    /// Returns the mode string the device uses for this level.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::One => "1F",
            Self::Two => "2F",
            Self::Three => "3F",
            Self::Four => "4F",
        }
    }

    /// Returns the canonical rotation speed for this level.
    #[must_use]
    pub const fn rotation_speed(&self) -> RotationSpeed {
        match self {
            Self::One => RotationSpeed::QUARTER,
            Self::Two => RotationSpeed::HALF,
            Self::Three => RotationSpeed::THREE_QUARTERS,
            Self::Four => RotationSpeed::FULL,
        }
    }

    /// Returns the level whose band contains a nonzero speed.
    ///
    /// Bands are inclusive at the top: 1-25, 26-50, 51-75, 76-100.
    /// Returns `None` for a speed of 0, which has no device mode.
    ///
    /// # Examples
    ///
    /// ```
    /// use purifier_bridge::types::{FanLevel, RotationSpeed};
    ///
    /// let speed = RotationSpeed::new(26).unwrap();
    /// assert_eq!(FanLevel::for_speed(speed), Some(FanLevel::Two));
    /// assert_eq!(FanLevel::for_speed(RotationSpeed::OFF), None);
    /// ```
    #[must_use]
    pub const fn for_speed(speed: RotationSpeed) -> Option<Self> {
        match speed.value() {
            0 => None,
            1..=25 => Some(Self::One),
            26..=50 => Some(Self::Two),
            51..=75 => Some(Self::Three),
            _ => Some(Self::Four),
        }
    }
}

impl fmt::Display for FanLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operating mode reported by the mode datapoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceMode {
    /// Automatic mode driven by the device's air quality sensor.
    Auto,
    /// Quiet night mode.
    Sleep,
    /// Generic manual mode without a fan level.
    Manual,
    /// Manual mode at a fixed fan level.
    Fan(FanLevel),
}

/// Every string the device is known to report for the mode datapoint.
const MODE_TABLE: &[(&str, DeviceMode)] = &[
    ("auto", DeviceMode::Auto),
    ("Auto", DeviceMode::Auto),
    ("sleep", DeviceMode::Sleep),
    ("Sleep", DeviceMode::Sleep),
    ("manual", DeviceMode::Manual),
    ("Manual", DeviceMode::Manual),
    ("1F", DeviceMode::Fan(FanLevel::One)),
    ("2F", DeviceMode::Fan(FanLevel::Two)),
    ("3F", DeviceMode::Fan(FanLevel::Three)),
    ("4F", DeviceMode::Fan(FanLevel::Four)),
];

impl DeviceMode {
    /// Mode written when the target state is switched to manual.
    pub const DEFAULT_MANUAL: Self = Self::Fan(FanLevel::One);

    /// Looks a raw mode string up in the device vocabulary.
    ///
    /// Matching is exact: only the case variants the device is known to
    /// emit are accepted.
    ///
    /// # Examples
    ///
    /// ```
    /// use purifier_bridge::types::{DeviceMode, FanLevel};
    ///
    /// assert_eq!(DeviceMode::parse("Sleep"), Some(DeviceMode::Sleep));
    /// assert_eq!(DeviceMode::parse("3F"), Some(DeviceMode::Fan(FanLevel::Three)));
    /// assert_eq!(DeviceMode::parse("SLEEP"), None);
    /// ```
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        MODE_TABLE
            .iter()
            .find(|(name, _)| *name == raw)
            .map(|(_, mode)| *mode)
    }

    /// Returns the string written to the device for this mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Sleep => "sleep",
            Self::Manual => "manual",
            Self::Fan(level) => level.as_str(),
        }
    }

    /// Projects this mode onto the target state characteristic.
    ///
    /// Sleep has no target state of its own and reports as `Auto`.
    #[must_use]
    pub const fn target_state(&self) -> TargetAirPurifierState {
        match self {
            Self::Auto | Self::Sleep => TargetAirPurifierState::Auto,
            Self::Manual | Self::Fan(_) => TargetAirPurifierState::Manual,
        }
    }

    /// Projects this mode onto the rotation speed characteristic.
    ///
    /// Auto and sleep report 0 since the device picks the speed itself.
    /// Generic manual mode carries no level and returns `None`.
    #[must_use]
    pub const fn rotation_speed(&self) -> Option<RotationSpeed> {
        match self {
            Self::Auto | Self::Sleep => Some(RotationSpeed::OFF),
            Self::Fan(level) => Some(level.rotation_speed()),
            Self::Manual => None,
        }
    }

    /// Returns the mode that represents a target state on the device.
    #[must_use]
    pub const fn for_target_state(state: TargetAirPurifierState) -> Self {
        match state {
            TargetAirPurifierState::Manual => Self::DEFAULT_MANUAL,
            TargetAirPurifierState::Auto => Self::Auto,
        }
    }
}

/// Derives the current state from a raw mode string.
///
/// Auto, sleep and the legacy `F`-prefixed strings report as purifying. The
/// fan levels `1F`..`4F` begin with a digit, not `F`, so they report
/// inactive.
///
/// Returns `None` when the string is outside the known vocabulary so the
/// caller can log it before falling back to `Inactive`.
///
/// # Examples
///
/// ```
/// use purifier_bridge::types::{current_state_for_mode, CurrentAirPurifierState};
///
/// assert_eq!(current_state_for_mode("auto"), Some(CurrentAirPurifierState::PurifyingAir));
/// assert_eq!(current_state_for_mode("F2"), Some(CurrentAirPurifierState::PurifyingAir));
/// assert_eq!(current_state_for_mode("2F"), Some(CurrentAirPurifierState::Inactive));
/// assert_eq!(current_state_for_mode("turbo"), None);
/// ```
#[must_use]
pub fn current_state_for_mode(raw: &str) -> Option<CurrentAirPurifierState> {
    match DeviceMode::parse(raw) {
        Some(DeviceMode::Auto | DeviceMode::Sleep) => Some(CurrentAirPurifierState::PurifyingAir),
        Some(_) => Some(CurrentAirPurifierState::Inactive),
        None if raw.starts_with('F') => Some(CurrentAirPurifierState::PurifyingAir),
        None => None,
    }
}

impl fmt::Display for DeviceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_every_table_entry() {
        for (name, mode) in MODE_TABLE {
            assert_eq!(DeviceMode::parse(name), Some(*mode), "{name}");
        }
    }

    #[test]
    fn parse_rejects_unknown_and_other_cases() {
        assert_eq!(DeviceMode::parse("turbo"), None);
        assert_eq!(DeviceMode::parse("AUTO"), None);
        assert_eq!(DeviceMode::parse("1f"), None);
        assert_eq!(DeviceMode::parse(""), None);
    }

    #[test]
    fn auto_and_sleep_collapse() {
        for raw in ["auto", "Auto", "sleep", "Sleep"] {
            let mode = DeviceMode::parse(raw).unwrap();
            assert_eq!(mode.target_state(), TargetAirPurifierState::Auto);
            assert_eq!(mode.rotation_speed(), Some(RotationSpeed::OFF));
        }
    }

    #[test]
    fn fan_levels_are_manual_with_quarter_speeds() {
        let expected = [25, 50, 75, 100];
        for (level, speed) in FanLevel::ALL.iter().zip(expected) {
            let mode = DeviceMode::Fan(*level);
            assert_eq!(mode.target_state(), TargetAirPurifierState::Manual);
            assert_eq!(mode.rotation_speed().map(|s| s.value()), Some(speed));
        }
    }

    #[test]
    fn manual_has_no_speed() {
        assert_eq!(
            DeviceMode::Manual.target_state(),
            TargetAirPurifierState::Manual
        );
        assert_eq!(DeviceMode::Manual.rotation_speed(), None);
    }

    #[test]
    fn current_state_table() {
        use CurrentAirPurifierState::{Inactive, PurifyingAir};

        assert_eq!(current_state_for_mode("auto"), Some(PurifyingAir));
        assert_eq!(current_state_for_mode("sleep"), Some(PurifyingAir));
        assert_eq!(current_state_for_mode("Auto"), Some(PurifyingAir));
        assert_eq!(current_state_for_mode("Sleep"), Some(PurifyingAir));
        assert_eq!(current_state_for_mode("Fhigh"), Some(PurifyingAir));
        assert_eq!(current_state_for_mode("manual"), Some(Inactive));
        for level in FanLevel::ALL {
            assert_eq!(current_state_for_mode(level.as_str()), Some(Inactive));
        }
        assert_eq!(current_state_for_mode("turbo"), None);
    }

    #[test]
    fn speed_bands_inclusive_upper_bound() {
        let cases = [
            (1, FanLevel::One),
            (25, FanLevel::One),
            (26, FanLevel::Two),
            (50, FanLevel::Two),
            (51, FanLevel::Three),
            (75, FanLevel::Three),
            (76, FanLevel::Four),
            (100, FanLevel::Four),
        ];
        for (value, level) in cases {
            let speed = RotationSpeed::new(value).unwrap();
            assert_eq!(FanLevel::for_speed(speed), Some(level), "{value}");
        }
        assert_eq!(FanLevel::for_speed(RotationSpeed::OFF), None);
    }

    #[test]
    fn band_round_trip_quantizes() {
        for value in 1..=100 {
            let level = FanLevel::for_speed(RotationSpeed::new(value).unwrap()).unwrap();
            let reread = DeviceMode::parse(level.as_str())
                .and_then(|m| m.rotation_speed())
                .unwrap();
            assert_eq!(FanLevel::for_speed(reread), Some(level));
            assert_eq!(reread.value() % 25, 0);
            assert!(reread.value() >= value);
        }
    }

    #[test]
    fn target_state_representatives() {
        assert_eq!(
            DeviceMode::for_target_state(TargetAirPurifierState::Manual).as_str(),
            "1F"
        );
        assert_eq!(
            DeviceMode::for_target_state(TargetAirPurifierState::Auto).as_str(),
            "auto"
        );
    }
}
