//! Session tag tracker
//!
//! De-duplicates transponder ids within one continuous polling run. The
//! set lives for the lifetime of the polling loop and is never persisted;
//! a process restart starts a fresh session.

use std::sync::Arc;

use parking_lot::Mutex;

use rfpad_types::TagId;

/// Seen-tag set for a polling session
///
/// Backed by a growable vector; membership is a full linear scan comparing
/// all 8 id bytes. Linear scan is fine at proximity-pad tag populations;
/// a deployment tracking thousands of tags would want a hash set here.
///
/// De-duplication keys on the id alone: the reported type framing may vary
/// across firmware revisions for the same physical tag.
///
/// No internal synchronization. To share one tracker across concurrently
/// polled devices, use [`SharedTagTracker`].
#[derive(Debug, Clone, Default)]
pub struct TagTracker {
    seen: Vec<TagId>,
}

/// Tracker shared across concurrently polled sessions
pub type SharedTagTracker = Arc<Mutex<TagTracker>>;

impl TagTracker {
    /// Initial capacity of the seen set
    pub const INITIAL_CAPACITY: usize = 16;

    pub fn new() -> Self {
        Self {
            seen: Vec::with_capacity(Self::INITIAL_CAPACITY),
        }
    }

    /// Create a tracker behind a lock, for cross-session sharing
    pub fn shared() -> SharedTagTracker {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Record an id, returning `true` if it was not seen before
    pub fn record_if_new(&mut self, id: &TagId) -> bool {
        if self.contains(id) {
            return false;
        }

        self.seen.push(*id);
        true
    }

    /// Exact byte-for-byte membership test
    pub fn contains(&self, id: &TagId) -> bool {
        self.seen.iter().any(|seen| seen == id)
    }

    /// Number of distinct ids recorded
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Forget everything seen so far
    pub fn clear(&mut self) {
        self.seen.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn id(n: u8) -> TagId {
        TagId([n, 0, 0, 0, 0, 0, 0, n])
    }

    #[test]
    fn test_record_if_new_is_idempotent() {
        let mut tracker = TagTracker::new();

        assert!(tracker.record_if_new(&id(1)));
        assert!(!tracker.record_if_new(&id(1)));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_distinct_ids_are_all_recorded() {
        let mut tracker = TagTracker::new();

        assert!(tracker.record_if_new(&id(1)));
        assert!(tracker.record_if_new(&id(2)));
        assert!(tracker.record_if_new(&id(3)));
        assert_eq!(tracker.len(), 3);
    }

    #[test]
    fn test_membership_is_byte_exact() {
        let mut tracker = TagTracker::new();
        tracker.record_if_new(&TagId([1, 2, 3, 4, 5, 6, 7, 8]));

        // Differs only in the last byte
        assert!(!tracker.contains(&TagId([1, 2, 3, 4, 5, 6, 7, 9])));
        assert!(tracker.contains(&TagId([1, 2, 3, 4, 5, 6, 7, 8])));
    }

    #[test]
    fn test_grows_past_initial_capacity() {
        let mut tracker = TagTracker::new();

        for n in 0..3 * TagTracker::INITIAL_CAPACITY as u8 {
            assert!(tracker.record_if_new(&id(n)));
        }

        assert_eq!(tracker.len(), 3 * TagTracker::INITIAL_CAPACITY);
        assert!(tracker.contains(&id(0)));
        assert!(tracker.contains(&id(47)));
    }

    #[test]
    fn test_clear_starts_a_fresh_session() {
        let mut tracker = TagTracker::new();
        tracker.record_if_new(&id(1));

        tracker.clear();

        assert!(tracker.is_empty());
        assert!(tracker.record_if_new(&id(1)));
    }

    #[test]
    fn test_shared_tracker_serializes_access() {
        let shared = TagTracker::shared();

        assert!(shared.lock().record_if_new(&id(9)));
        assert!(!shared.lock().record_if_new(&id(9)));
    }
}
