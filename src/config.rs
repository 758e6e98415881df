// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Accessory configuration.
//!
//! Hosts describe each purifier with a small JSON object. Only the name is
//! required; every datapoint id falls back to the layout shipped by the
//! device vendor.
//!
//! ```json
//! {
//!     "name": "Bedroom Purifier",
//!     "dpActive": 1,
//!     "dpMode": "3",
//!     "dpFilterLife": 5
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{ParseError, Result};
use crate::types::DpId;

/// Datapoint ids backing each semantic key.
///
/// # Examples
///
/// ```
/// use purifier_bridge::config::DatapointMap;
/// use purifier_bridge::types::DpId;
///
/// let map = DatapointMap::default().with_mode(4);
/// assert_eq!(map.mode, DpId::from(4));
/// assert_eq!(map.active, DpId::from(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatapointMap {
    /// Power datapoint read and written by the `Active` characteristic.
    #[serde(rename = "dpActive")]
    pub active: DpId,
    /// Operating mode datapoint.
    #[serde(rename = "dpMode")]
    pub mode: DpId,
    /// Power switch datapoint consulted for rotation speed.
    #[serde(rename = "dpSwitch")]
    pub switch: DpId,
    /// Remaining filter life in percent.
    #[serde(rename = "dpFilterLife")]
    pub filter_life: DpId,
    /// Filter replacement flag.
    #[serde(rename = "dpFilterChange")]
    pub filter_change: DpId,
}

impl DatapointMap {
    /// Default power datapoint.
    pub const DEFAULT_ACTIVE: u16 = 1;
    /// Default mode datapoint.
    pub const DEFAULT_MODE: u16 = 3;
    /// Default switch datapoint (same slot as power).
    pub const DEFAULT_SWITCH: u16 = 1;
    /// Default filter life datapoint.
    pub const DEFAULT_FILTER_LIFE: u16 = 5;
    /// Default filter change datapoint.
    pub const DEFAULT_FILTER_CHANGE: u16 = 22;

    /// Sets the power datapoint.
    #[must_use]
    pub fn with_active(mut self, id: impl Into<DpId>) -> Self {
        self.active = id.into();
        self
    }

    /// Sets the mode datapoint.
    #[must_use]
    pub fn with_mode(mut self, id: impl Into<DpId>) -> Self {
        self.mode = id.into();
        self
    }

    /// Sets the switch datapoint.
    #[must_use]
    pub fn with_switch(mut self, id: impl Into<DpId>) -> Self {
        self.switch = id.into();
        self
    }

    /// Sets the filter life datapoint.
    #[must_use]
    pub fn with_filter_life(mut self, id: impl Into<DpId>) -> Self {
        self.filter_life = id.into();
        self
    }

    /// Sets the filter change datapoint.
    #[must_use]
    pub fn with_filter_change(mut self, id: impl Into<DpId>) -> Self {
        self.filter_change = id.into();
        self
    }
}

impl Default for DatapointMap {
    fn default() -> Self {
        Self {
            active: DpId::from(Self::DEFAULT_ACTIVE),
            mode: DpId::from(Self::DEFAULT_MODE),
            switch: DpId::from(Self::DEFAULT_SWITCH),
            filter_life: DpId::from(Self::DEFAULT_FILTER_LIFE),
            filter_change: DpId::from(Self::DEFAULT_FILTER_CHANGE),
        }
    }
}

/// Configuration of one air purifier accessory.
///
/// # Examples
///
/// ```
/// use purifier_bridge::config::AccessoryConfig;
/// use purifier_bridge::types::DpId;
///
/// let config = AccessoryConfig::from_json(r#"{"name": "Office", "dpMode": 4}"#).unwrap();
/// assert_eq!(config.name, "Office");
/// assert_eq!(config.datapoints.mode, DpId::from(4));
/// assert_eq!(config.datapoints.filter_life, DpId::from(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessoryConfig {
    /// Display name of the accessory.
    pub name: String,
    /// Datapoint layout.
    #[serde(flatten)]
    pub datapoints: DatapointMap,
}

impl AccessoryConfig {
    /// Creates a configuration with the default datapoint layout.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            datapoints: DatapointMap::default(),
        }
    }

    /// Replaces the datapoint layout.
    #[must_use]
    pub fn with_datapoints(mut self, datapoints: DatapointMap) -> Self {
        self.datapoints = datapoints;
        self
    }

    /// Parses a configuration from the host's JSON.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Json` if the JSON is malformed or has no name.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(ParseError::from)
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn defaults() {
        let map = DatapointMap::default();
        assert_eq!(map.active, DpId::from(1));
        assert_eq!(map.mode, DpId::from(3));
        assert_eq!(map.switch, map.active);
        assert_eq!(map.filter_life, DpId::from(5));
        assert_eq!(map.filter_change, DpId::from(22));
    }

    #[test]
    fn builder_overrides() {
        let map = DatapointMap::default()
            .with_active(2)
            .with_switch("7")
            .with_filter_life(15)
            .with_filter_change(16);
        assert_eq!(map.active, DpId::from(2));
        assert_eq!(map.switch, DpId::from(7));
        assert_eq!(map.filter_life, DpId::from(15));
        assert_eq!(map.filter_change, DpId::from(16));
        assert_eq!(map.mode, DpId::from(3));
    }

    #[test]
    fn from_json_mixed_id_forms() {
        let config = AccessoryConfig::from_json(
            r#"{
                "name": "Living Room",
                "dpActive": "2",
                "dpMode": 4,
                "dpSwitch": 2,
                "dpFilterLife": "9",
                "dpFilterChange": 10
            }"#,
        )
        .unwrap();

        assert_eq!(config.name, "Living Room");
        assert_eq!(
            config.datapoints,
            DatapointMap::default()
                .with_active(2)
                .with_mode(4)
                .with_switch(2)
                .with_filter_life(9)
                .with_filter_change(10)
        );
    }

    #[test]
    fn from_json_name_only() {
        let config = AccessoryConfig::from_json(r#"{"name": "Purifier"}"#).unwrap();
        assert_eq!(config, AccessoryConfig::new("Purifier"));
    }

    #[test]
    fn from_json_missing_name() {
        let err = AccessoryConfig::from_json(r#"{"dpMode": 3}"#).unwrap_err();
        assert!(matches!(err, Error::Parse(ParseError::Json(_))));
    }

    #[test]
    fn serializes_with_host_keys() {
        let json = serde_json::to_value(AccessoryConfig::new("X")).unwrap();
        assert_eq!(json["dpMode"], "3");
        assert_eq!(json["dpFilterChange"], "22");
    }
}
