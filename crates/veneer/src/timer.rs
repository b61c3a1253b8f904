//! Deadline-ordered timer queue.
//!
//! The queue only stores `(deadline, key)` pairs; firing is done by the owner,
//! which pops due keys and advances whatever state machine they name. Entries
//! with equal deadlines fire in scheduling order.

use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
};

use tokio::time::Instant;

/// One scheduled entry.
struct Entry<K> {
    /// When the entry becomes due.
    at: Instant,
    /// Tie-breaker preserving insertion order.
    seq: u64,
    /// Caller-defined payload.
    key: K,
}

impl<K> PartialEq for Entry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at && self.seq == other.seq
    }
}

impl<K> Eq for Entry<K> {}

impl<K> PartialOrd for Entry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K> Ord for Entry<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.at, self.seq).cmp(&(other.at, other.seq))
    }
}

/// Min-heap of deadlines.
pub struct TimerQueue<K> {
    /// Pending entries, earliest first.
    heap: BinaryHeap<Reverse<Entry<K>>>,
    /// Next sequence number.
    seq: u64,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> TimerQueue<K> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Schedule `key` to become due at `at`.
    pub fn schedule(&mut self, at: Instant, key: K) {
        self.seq += 1;
        self.heap.push(Reverse(Entry {
            at,
            seq: self.seq,
            key,
        }));
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.heap.peek().map(|Reverse(e)| e.at)
    }

    /// Pop the earliest entry if it is due at `now`.
    pub fn pop_due(&mut self, now: Instant) -> Option<(Instant, K)> {
        if self.next_deadline()? > now {
            return None;
        }
        self.heap.pop().map(|Reverse(e)| (e.at, e.key))
    }

    /// Drop every entry whose key fails `keep`.
    pub fn retain(&mut self, mut keep: impl FnMut(&K) -> bool) {
        self.heap.retain(|Reverse(e)| keep(&e.key));
    }

    /// Number of pending entries.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// True when nothing is scheduled.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn pops_in_deadline_then_insertion_order() {
        let t0 = Instant::now();
        let mut q = TimerQueue::new();
        q.schedule(t0 + Duration::from_millis(20), "late");
        q.schedule(t0 + Duration::from_millis(10), "a");
        q.schedule(t0 + Duration::from_millis(10), "b");

        assert_eq!(q.pop_due(t0), None);
        let now = t0 + Duration::from_millis(15);
        assert_eq!(q.pop_due(now).map(|(_, k)| k), Some("a"));
        assert_eq!(q.pop_due(now).map(|(_, k)| k), Some("b"));
        assert_eq!(q.pop_due(now), None);
        assert_eq!(q.next_deadline(), Some(t0 + Duration::from_millis(20)));
    }

    #[test]
    fn retain_filters_keys() {
        let t0 = Instant::now();
        let mut q = TimerQueue::new();
        for k in 0..4 {
            q.schedule(t0, k);
        }
        q.retain(|k| k % 2 == 0);
        assert_eq!(q.len(), 2);
        q.retain(|_| false);
        assert!(q.is_empty());
    }
}
