// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Rotation speed type for the purifier fan.

use std::fmt;

use crate::error::ValueError;

/// Fan rotation speed as a percentage (0-100).
///
/// The device only knows four fan levels, so speeds read back from it are
/// always 0, 25, 50, 75 or 100. Arbitrary percentages are accepted on the
/// write path and quantized into a level by
/// [`FanLevel::for_speed`](crate::types::FanLevel::for_speed).
///
/// # Examples
///
/// ```
/// use purifier_bridge::types::RotationSpeed;
///
/// let speed = RotationSpeed::new(60).unwrap();
/// assert_eq!(speed.value(), 60);
///
/// assert!(RotationSpeed::new(101).is_err());
/// assert_eq!(RotationSpeed::clamped(150), RotationSpeed::FULL);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct RotationSpeed(u8);

impl RotationSpeed {
    /// Fan stopped (0%).
    pub const OFF: Self = Self(0);

    /// Level 1 (25%).
    pub const QUARTER: Self = Self(25);

    /// Level 2 (50%).
    pub const HALF: Self = Self(50);

    /// Level 3 (75%).
    pub const THREE_QUARTERS: Self = Self(75);

    /// Level 4 (100%).
    pub const FULL: Self = Self(100);

    /// Creates a new rotation speed.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value exceeds 100.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > 100 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: u16::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Creates a rotation speed, clamping values above 100.
    #[must_use]
    pub const fn clamped(value: u8) -> Self {
        if value > 100 { Self(100) } else { Self(value) }
    }

    /// Returns the percentage.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Returns `true` for a speed of 0.
    #[must_use]
    pub const fn is_off(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for RotationSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u8> for RotationSpeed {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RotationSpeed> for u8 {
    fn from(speed: RotationSpeed) -> Self {
        speed.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_speed_valid() {
        for v in 0..=100 {
            assert_eq!(RotationSpeed::new(v).unwrap().value(), v);
        }
    }

    #[test]
    fn rotation_speed_invalid() {
        let err = RotationSpeed::new(101).unwrap_err();
        assert_eq!(
            err,
            ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: 101
            }
        );
    }

    #[test]
    fn rotation_speed_clamped() {
        assert_eq!(RotationSpeed::clamped(255).value(), 100);
        assert_eq!(RotationSpeed::clamped(40).value(), 40);
    }

    #[test]
    fn rotation_speed_presets() {
        assert!(RotationSpeed::OFF.is_off());
        assert_eq!(RotationSpeed::QUARTER.value(), 25);
        assert_eq!(RotationSpeed::HALF.value(), 50);
        assert_eq!(RotationSpeed::THREE_QUARTERS.value(), 75);
        assert_eq!(RotationSpeed::FULL.value(), 100);
    }

    #[test]
    fn rotation_speed_display() {
        assert_eq!(RotationSpeed::HALF.to_string(), "50%");
    }
}
