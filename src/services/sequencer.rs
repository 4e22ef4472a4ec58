//! Request Sequencing
//!
//! Each chart numbers its requests with a monotonically increasing id. A
//! response is applied only when its id is still the latest one issued, so a
//! slow response for old parameters can never overwrite fresher state.

use std::fmt;

/// Monotonic request number, unique per sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues request ids and answers "is this response still wanted?"
#[derive(Debug, Default, Clone)]
pub struct RequestSequencer {
    issued: u64,
    /// Latest id whose response is still wanted; None once retired
    wanted: Option<u64>,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new id; every earlier id becomes stale
    pub fn issue(&mut self) -> RequestId {
        self.issued += 1;
        self.wanted = Some(self.issued);
        RequestId(self.issued)
    }

    /// Whether a response carrying `id` should be applied
    pub fn is_latest(&self, id: RequestId) -> bool {
        self.wanted == Some(id.0)
    }

    /// Mark the latest request as answered or abandoned; later responses
    /// with that id are discarded
    pub fn retire(&mut self, id: RequestId) {
        if self.wanted == Some(id.0) {
            self.wanted = None;
        }
    }

    /// Abandon whatever is in flight (chart teardown)
    pub fn cancel_all(&mut self) {
        self.wanted = None;
    }

    /// A request is outstanding
    pub fn in_flight(&self) -> bool {
        self.wanted.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_is_applied() {
        let mut seq = RequestSequencer::new();
        let first = seq.issue();
        let second = seq.issue();
        assert!(first < second);
        assert!(!seq.is_latest(first));
        assert!(seq.is_latest(second));
    }

    #[test]
    fn test_retire_discards_duplicates() {
        let mut seq = RequestSequencer::new();
        let id = seq.issue();
        assert!(seq.in_flight());
        seq.retire(id);
        assert!(!seq.is_latest(id));
        assert!(!seq.in_flight());
    }

    #[test]
    fn test_cancel_all() {
        let mut seq = RequestSequencer::new();
        let id = seq.issue();
        seq.cancel_all();
        assert!(!seq.is_latest(id));
        let next = seq.issue();
        assert!(seq.is_latest(next));
    }
}
