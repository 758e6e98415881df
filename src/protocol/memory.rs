// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory state provider.

use std::time::Duration;

use parking_lot::{Mutex, RwLock};

use crate::error::ProtocolError;
use crate::protocol::StateProvider;
use crate::types::{DpId, DpSnapshot, DpValue};

/// Datapoints held in memory.
///
/// Writes are stored and echoed by later reads. Every successful write is also
/// appended to a journal so callers can check exactly what was sent.
///
/// # Examples
///
/// ```
/// use purifier_bridge::protocol::{MemoryStateProvider, StateProvider};
/// use purifier_bridge::types::{DpId, DpValue};
///
/// # async fn example() -> Result<(), purifier_bridge::error::ProtocolError> {
/// let provider = MemoryStateProvider::new()
///     .with_datapoint(1, true)
///     .with_datapoint(3, "auto");
///
/// provider.set_state(&DpId::from(3), DpValue::from("2F")).await?;
/// let snapshot = provider.get_state(&[DpId::from(3)]).await?;
/// assert_eq!(snapshot.get(&DpId::from(3)), Some(&DpValue::from("2F")));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct MemoryStateProvider {
    datapoints: RwLock<DpSnapshot>,
    journal: Mutex<Vec<(DpId, DpValue)>>,
    failure: Mutex<Option<ProtocolError>>,
    latency: Option<Duration>,
}

impl MemoryStateProvider {
    /// Creates a provider with no datapoints.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider seeded with a snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: DpSnapshot) -> Self {
        Self {
            datapoints: RwLock::new(snapshot),
            ..Self::default()
        }
    }

    /// Seeds a datapoint value.
    #[must_use]
    pub fn with_datapoint(self, id: impl Into<DpId>, value: impl Into<DpValue>) -> Self {
        self.datapoints.write().insert(id.into(), value.into());
        self
    }

    /// Delays every request by the given duration.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Makes every request fail with `error` until cleared with `None`.
    pub fn set_failure(&self, error: Option<ProtocolError>) {
        *self.failure.lock() = error;
    }

    /// Replaces a datapoint value without recording a write.
    pub fn update(&self, id: impl Into<DpId>, value: impl Into<DpValue>) {
        self.datapoints.write().insert(id.into(), value.into());
    }

    /// Returns the current value of a datapoint.
    #[must_use]
    pub fn value(&self, id: &DpId) -> Option<DpValue> {
        self.datapoints.read().get(id).cloned()
    }

    /// Returns every write received so far, oldest first.
    #[must_use]
    pub fn writes(&self) -> Vec<(DpId, DpValue)> {
        self.journal.lock().clone()
    }

    async fn round_trip(&self) -> Result<(), ProtocolError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        match self.failure.lock().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl StateProvider for MemoryStateProvider {
    async fn get_state(&self, keys: &[DpId]) -> Result<DpSnapshot, ProtocolError> {
        self.round_trip().await?;
        Ok(self.datapoints.read().select(keys))
    }

    async fn set_state(&self, key: &DpId, value: DpValue) -> Result<(), ProtocolError> {
        self.round_trip().await?;
        self.datapoints.write().insert(key.clone(), value.clone());
        self.journal.lock().push((key.clone(), value));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_requested_keys_only() {
        let provider = MemoryStateProvider::new()
            .with_datapoint(1, true)
            .with_datapoint(3, "sleep")
            .with_datapoint(5, 80_i64);

        let snapshot = provider
            .get_state(&[DpId::from(1), DpId::from(3)])
            .await
            .unwrap();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get(&DpId::from(5)), None);
    }

    #[tokio::test]
    async fn from_snapshot_seeds_datapoints() {
        let snapshot: DpSnapshot =
            serde_json::from_str(r#"{"1": true, "3": "2F", "22": false}"#).unwrap();
        let provider = MemoryStateProvider::from_snapshot(snapshot);

        let read = provider
            .get_state(&[DpId::from(1), DpId::from(3), DpId::from(5)])
            .await
            .unwrap();

        assert_eq!(read.len(), 2);
        assert_eq!(read.get(&DpId::from(3)), Some(&DpValue::from("2F")));
        assert_eq!(provider.value(&DpId::from(22)), Some(DpValue::Bool(false)));
        assert!(provider.writes().is_empty());
    }

    #[tokio::test]
    async fn write_is_echoed_and_journaled() {
        let provider = MemoryStateProvider::new().with_datapoint(1, false);

        provider
            .set_state(&DpId::from(1), DpValue::Bool(true))
            .await
            .unwrap();

        assert_eq!(provider.value(&DpId::from(1)), Some(DpValue::Bool(true)));
        assert_eq!(
            provider.writes(),
            vec![(DpId::from(1), DpValue::Bool(true))]
        );
    }

    #[tokio::test]
    async fn update_is_not_journaled() {
        let provider = MemoryStateProvider::new();
        provider.update(3, "4F");
        assert_eq!(provider.value(&DpId::from(3)), Some(DpValue::from("4F")));
        assert!(provider.writes().is_empty());
    }

    #[tokio::test]
    async fn failure_applies_until_cleared() {
        let provider = MemoryStateProvider::new().with_datapoint(1, true);
        provider.set_failure(Some(ProtocolError::Timeout(1000)));

        let err = provider.get_state(&[DpId::from(1)]).await.unwrap_err();
        assert_eq!(err, ProtocolError::Timeout(1000));

        let err = provider
            .set_state(&DpId::from(1), DpValue::Bool(false))
            .await
            .unwrap_err();
        assert_eq!(err, ProtocolError::Timeout(1000));
        assert!(provider.writes().is_empty());

        provider.set_failure(None);
        assert!(provider.get_state(&[DpId::from(1)]).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn latency_delays_requests() {
        let provider = MemoryStateProvider::new()
            .with_datapoint(1, true)
            .with_latency(Duration::from_millis(250));

        let start = tokio::time::Instant::now();
        provider.get_state(&[DpId::from(1)]).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(250));
    }
}
