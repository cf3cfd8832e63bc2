/*!
 * Bounded Binary Heap
 * Array-backed min-heap with fixed capacity and FIFO tie-breaking
 */

use crate::core::errors::QueueOverflow;
use crate::core::types::Pid;

#[derive(Debug, Clone, Copy)]
struct Entry<K> {
    key: K,
    seq: u64,
    pid: Pid,
}

impl<K: Ord + Copy> Entry<K> {
    /// Heap order: key first, insertion sequence second.
    /// Equal keys therefore leave the heap in FIFO order.
    fn rank(&self) -> (K, u64) {
        (self.key, self.seq)
    }
}

/// Fixed-capacity binary min-heap of process identifiers.
///
/// One structure serves both orderings the scheduler needs: keyed by
/// priority for the ready queues and by wakeup tick for the sleep queue.
/// `insert` and `poll` are O(log n); `poll`/`peek` on an empty heap return
/// `None`, the "no process" sentinel.
#[derive(Debug, Clone)]
pub struct BoundedHeap<K> {
    entries: Vec<Entry<K>>,
    capacity: usize,
    next_seq: u64,
}

impl<K: Ord + Copy> BoundedHeap<K> {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
            next_seq: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert a pid under the given key, preserving heap order.
    ///
    /// Exceeding the fixed capacity is a configuration bug, reported as
    /// `QueueOverflow` and left to the caller to treat as fatal or not.
    pub fn insert(&mut self, key: K, pid: Pid) -> Result<(), QueueOverflow> {
        if self.entries.len() == self.capacity {
            return Err(QueueOverflow {
                capacity: self.capacity,
            });
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry { key, seq, pid });
        self.sift_up(self.entries.len() - 1);
        Ok(())
    }

    /// Remove and return the pid with the minimum key
    pub fn poll(&mut self) -> Option<Pid> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.entries.len() - 1;
        self.entries.swap(0, last);
        let extracted = self.entries.pop().map(|e| e.pid);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        extracted
    }

    /// Pid that `poll` would return, without removing it
    #[must_use]
    pub fn peek(&self) -> Option<Pid> {
        self.entries.first().map(|e| e.pid)
    }

    /// Key of the entry at the front of the heap
    #[must_use]
    pub fn peek_key(&self) -> Option<K> {
        self.entries.first().map(|e| e.key)
    }

    /// Iterate entries in internal (heap array) order, for snapshots only
    pub fn iter(&self) -> impl Iterator<Item = (Pid, K)> + '_ {
        self.entries.iter().map(|e| (e.pid, e.key))
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.entries[index].rank() >= self.entries[parent].rank() {
                break;
            }
            self.entries.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut smallest = index;
            if left < len && self.entries[left].rank() < self.entries[smallest].rank() {
                smallest = left;
            }
            if right < len && self.entries[right].rank() < self.entries[smallest].rank() {
                smallest = right;
            }
            if smallest == index {
                break;
            }
            self.entries.swap(index, smallest);
            index = smallest;
        }
    }
}
