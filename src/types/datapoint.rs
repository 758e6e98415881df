// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Raw datapoint identifiers, values and snapshots.
//!
//! A datapoint (DP) is a single raw state slot on the device, addressed by an
//! opaque string key such as `"1"`. Values are booleans, integers or strings;
//! the bridge never invents other shapes.

use std::collections::HashMap;
use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ParseError;

/// Identifier of a datapoint on the device.
///
/// Devices key their datapoints with decimal strings, but hosts frequently
/// configure them as numbers. Both forms convert into the same id.
///
/// # Examples
///
/// ```
/// use purifier_bridge::types::DpId;
///
/// assert_eq!(DpId::from(3), DpId::from("3"));
/// assert_eq!(DpId::from(3).as_str(), "3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DpId(String);

impl DpId {
    /// Creates a datapoint id from any string-like key.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DpId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DpId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for DpId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u16> for DpId {
    fn from(value: u16) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for DpId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DpIdVisitor;

        impl Visitor<'_> for DpIdVisitor {
            type Value = DpId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a datapoint id as string or non-negative integer")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<DpId, E> {
                Ok(DpId::new(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<DpId, E> {
                Ok(DpId(v.to_string()))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<DpId, E> {
                u64::try_from(v)
                    .map(|v| DpId(v.to_string()))
                    .map_err(|_| E::invalid_value(de::Unexpected::Signed(v), &self))
            }
        }

        deserializer.deserialize_any(DpIdVisitor)
    }
}

/// A raw datapoint value as reported by the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DpValue {
    /// Boolean datapoint (power switch, filter-change flag).
    Bool(bool),
    /// Integer datapoint (filter life percent).
    Integer(i64),
    /// Enumerated string datapoint (operating mode).
    String(String),
}

impl DpValue {
    /// Returns the device's loose truthiness of this value.
    ///
    /// `false`, `0` and the empty string are falsy; everything else is truthy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Integer(n) => *n != 0,
            Self::String(s) => !s.is_empty(),
        }
    }

    /// Returns the string payload, if this is a string datapoint.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer payload, if this is an integer datapoint.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl fmt::Display for DpValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::String(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<bool> for DpValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for DpValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<&str> for DpValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for DpValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

/// Raw datapoint values returned together for one read request.
///
/// Serializes as a plain JSON object, matching the `dps` map devices report:
///
/// ```
/// use purifier_bridge::types::{DpId, DpSnapshot, DpValue};
///
/// let snapshot: DpSnapshot = serde_json::from_str(r#"{"1": true, "3": "auto"}"#).unwrap();
/// assert_eq!(snapshot.get(&DpId::from(1)), Some(&DpValue::Bool(true)));
/// assert_eq!(snapshot.get(&DpId::from(3)), Some(&DpValue::from("auto")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DpSnapshot(HashMap<DpId, DpValue>);

impl DpSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of a datapoint, if present.
    #[must_use]
    pub fn get(&self, id: &DpId) -> Option<&DpValue> {
        self.0.get(id)
    }

    /// Returns the value of a datapoint that the caller requested.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::MissingDatapoint` if the provider left it out.
    pub fn require(&self, id: &DpId) -> Result<&DpValue, ParseError> {
        self.0
            .get(id)
            .ok_or_else(|| ParseError::MissingDatapoint(id.clone()))
    }

    /// Inserts or replaces a datapoint value, returning the previous one.
    pub fn insert(&mut self, id: DpId, value: DpValue) -> Option<DpValue> {
        self.0.insert(id, value)
    }

    /// Returns a snapshot containing only the given datapoints.
    ///
    /// Ids not present in `self` are skipped.
    #[must_use]
    pub fn select(&self, ids: &[DpId]) -> Self {
        ids.iter()
            .filter_map(|id| self.0.get(id).map(|v| (id.clone(), v.clone())))
            .collect()
    }

    /// Returns the number of datapoints in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the snapshot holds no datapoints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(DpId, DpValue)> for DpSnapshot {
    fn from_iter<I: IntoIterator<Item = (DpId, DpValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dp_id_from_number_and_string() {
        assert_eq!(DpId::from(11), DpId::from("11"));
        assert_eq!(DpId::from(11).to_string(), "11");
    }

    #[test]
    fn dp_id_deserializes_from_string_or_number() {
        let id: DpId = serde_json::from_str("\"22\"").unwrap();
        assert_eq!(id, DpId::from(22));
        let id: DpId = serde_json::from_str("22").unwrap();
        assert_eq!(id, DpId::from(22));
        assert!(serde_json::from_str::<DpId>("-1").is_err());
        assert!(serde_json::from_str::<DpId>("true").is_err());
    }

    #[test]
    fn truthiness() {
        assert!(DpValue::Bool(true).is_truthy());
        assert!(!DpValue::Bool(false).is_truthy());
        assert!(DpValue::Integer(1).is_truthy());
        assert!(!DpValue::Integer(0).is_truthy());
        assert!(DpValue::from("auto").is_truthy());
        assert!(!DpValue::from("").is_truthy());
    }

    #[test]
    fn value_accessors() {
        assert_eq!(DpValue::from("sleep").as_str(), Some("sleep"));
        assert_eq!(DpValue::Bool(true).as_str(), None);
        assert_eq!(DpValue::Integer(42).as_integer(), Some(42));
        assert_eq!(DpValue::from("42").as_integer(), None);
    }

    #[test]
    fn value_deserializes_untagged() {
        let values: Vec<DpValue> = serde_json::from_str(r#"[true, 80, "4F"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                DpValue::Bool(true),
                DpValue::Integer(80),
                DpValue::from("4F")
            ]
        );
    }

    #[test]
    fn snapshot_require_missing() {
        let snapshot = DpSnapshot::new();
        let err = snapshot.require(&DpId::from(1)).unwrap_err();
        assert!(matches!(err, ParseError::MissingDatapoint(id) if id == DpId::from(1)));
    }

    #[test]
    fn snapshot_select() {
        let snapshot: DpSnapshot = [
            (DpId::from(1), DpValue::Bool(true)),
            (DpId::from(3), DpValue::from("2F")),
            (DpId::from(5), DpValue::Integer(60)),
        ]
        .into_iter()
        .collect();

        let selected = snapshot.select(&[DpId::from(1), DpId::from(3), DpId::from(9)]);
        assert_eq!(selected.len(), 2);
        assert_eq!(selected.get(&DpId::from(3)), Some(&DpValue::from("2F")));
        assert_eq!(selected.get(&DpId::from(5)), None);
    }

    #[test]
    fn snapshot_serializes_as_object() {
        let mut snapshot = DpSnapshot::new();
        snapshot.insert(DpId::from(1), DpValue::Bool(false));
        assert_eq!(serde_json::to_string(&snapshot).unwrap(), r#"{"1":false}"#);
    }
}
