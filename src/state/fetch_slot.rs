//! FetchSlot - Cached fetch result for one chart

use crate::error::{Error, Result};
use crate::services::{RequestId, RequestSequencer};

/// Loading status shown by a chart
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    /// Load failed; holds the panel text
    Failed(String),
}

/// What happened to a response handed to [`FetchSlot::settle`]
#[derive(Debug)]
pub enum Settled {
    /// Superseded by a newer request; nothing changed
    Stale,
    /// Stored; the chart can render
    Ready,
    /// Recorded as failed; the error is handed back for the panel
    Failed(Error),
}

/// Last successful fetch, the parameters it was made with, and the
/// sequencer that decides whether an incoming response is still wanted
#[derive(Debug)]
pub struct FetchSlot<K, T> {
    key: Option<K>,
    data: Option<T>,
    status: LoadStatus,
    sequencer: RequestSequencer,
    pending: Option<K>,
}

impl<K, T> Default for FetchSlot<K, T> {
    fn default() -> Self {
        Self {
            key: None,
            data: None,
            status: LoadStatus::Idle,
            sequencer: RequestSequencer::new(),
            pending: None,
        }
    }
}

impl<K: Clone + PartialEq, T> FetchSlot<K, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop cached data and start a request for `key`. Any earlier request
    /// becomes stale.
    pub fn begin(&mut self, key: K) -> RequestId {
        self.data = None;
        self.key = None;
        self.status = LoadStatus::Loading;
        self.pending = Some(key);
        self.sequencer.issue()
    }

    /// Whether a response for `id` should be applied
    pub fn is_current(&self, id: RequestId) -> bool {
        self.sequencer.is_latest(id)
    }

    /// Store a successful response. Returns false (and stores nothing) when
    /// the response is stale.
    pub fn complete(&mut self, id: RequestId, data: T) -> bool {
        if !self.sequencer.is_latest(id) {
            return false;
        }
        self.sequencer.retire(id);
        self.key = self.pending.take();
        self.data = Some(data);
        self.status = LoadStatus::Ready;
        true
    }

    /// Record a failure. Returns false when the response is stale.
    pub fn fail(&mut self, id: RequestId, message: impl Into<String>) -> bool {
        if !self.sequencer.is_latest(id) {
            return false;
        }
        self.sequencer.retire(id);
        self.pending = None;
        self.status = LoadStatus::Failed(message.into());
        true
    }

    /// Apply a response, successful or not
    pub fn settle(&mut self, id: RequestId, result: Result<T>) -> Settled {
        if !self.is_current(id) {
            return Settled::Stale;
        }
        match result {
            Ok(data) => {
                self.complete(id, data);
                Settled::Ready
            }
            Err(err) => {
                self.fail(id, err.to_string());
                Settled::Failed(err)
            }
        }
    }

    /// A request for `key` is outstanding
    pub fn is_pending_for(&self, key: &K) -> bool {
        self.sequencer.in_flight() && self.pending.as_ref() == Some(key)
    }

    /// Cached data, if it was fetched for `key`
    pub fn get_for(&self, key: &K) -> Option<&T> {
        match (&self.key, &self.data) {
            (Some(k), Some(data)) if k == key => Some(data),
            _ => None,
        }
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn key(&self) -> Option<&K> {
        self.key.as_ref()
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    /// Forget everything and abandon in-flight requests
    pub fn clear(&mut self) {
        self.sequencer.cancel_all();
        self.key = None;
        self.data = None;
        self.pending = None;
        self.status = LoadStatus::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stale_response_is_discarded() {
        let mut slot: FetchSlot<&str, u32> = FetchSlot::new();
        let old = slot.begin("gold");
        let new = slot.begin("silver");

        assert!(slot.complete(new, 2));
        assert!(!slot.complete(old, 1));
        assert_eq!(slot.data(), Some(&2));
        assert_eq!(slot.get_for(&"silver"), Some(&2));
        assert_eq!(slot.get_for(&"gold"), None);
    }

    #[test]
    fn test_failure_then_duplicate_ignored() {
        let mut slot: FetchSlot<u32, u32> = FetchSlot::new();
        let id = slot.begin(10);
        assert!(slot.fail(id, "boom"));
        assert_eq!(slot.status(), &LoadStatus::Failed("boom".into()));
        assert!(!slot.complete(id, 1));
        assert!(slot.data().is_none());
    }

    #[test]
    fn test_settle_reports_outcome() {
        let mut slot: FetchSlot<u32, u32> = FetchSlot::new();
        let old = slot.begin(1);
        let id = slot.begin(2);
        assert!(matches!(slot.settle(old, Ok(5)), Settled::Stale));
        assert!(matches!(
            slot.settle(id, Err(Error::Http { status: 502 })),
            Settled::Failed(Error::Http { status: 502 })
        ));
        let retry = slot.begin(2);
        assert!(matches!(slot.settle(retry, Ok(7)), Settled::Ready));
        assert_eq!(slot.get_for(&2), Some(&7));
    }

    #[test]
    fn test_settle_ignores_late_answers() {
        let mut slot: FetchSlot<&str, Vec<u32>> = FetchSlot::new();
        let id = slot.begin("Rowing");
        assert!(matches!(slot.settle(id, Ok(vec![1, 2])), Settled::Ready));
        assert!(matches!(slot.settle(id, Ok(vec![9])), Settled::Stale));
        assert!(matches!(
            slot.settle(id, Err(Error::Http { status: 500 })),
            Settled::Stale
        ));
        assert_eq!(slot.get_for(&"Rowing"), Some(&vec![1, 2]));
        assert_eq!(slot.status(), &LoadStatus::Ready);
    }

    #[test]
    fn test_pending_for_tracks_outstanding_key() {
        let mut slot: FetchSlot<String, u32> = FetchSlot::new();
        let swimming = "Swimming".to_string();
        assert!(!slot.is_pending_for(&swimming));
        let id = slot.begin(swimming.clone());
        assert!(slot.is_pending_for(&swimming));
        assert!(!slot.is_pending_for(&"Rowing".to_string()));
        slot.settle(id, Ok(3));
        assert!(!slot.is_pending_for(&swimming));
    }

    #[test]
    fn test_clear_abandons_in_flight() {
        let mut slot: FetchSlot<u32, u32> = FetchSlot::new();
        let id = slot.begin(1);
        slot.clear();
        assert!(!slot.is_current(id));
        assert_eq!(slot.status(), &LoadStatus::Idle);
    }
}
