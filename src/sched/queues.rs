/*!
 * Ready and Sleep Queues
 * Priority-ordered ready queues per class and the wakeup-ordered sleep queue
 */

use crate::core::errors::QueueOverflow;
use crate::core::heap::BoundedHeap;
use crate::core::types::{Pid, Priority, Tick};
use crate::process::types::QueueClass;
use serde::Serialize;

/// One entry of a queue snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnapshotEntry {
    pub pid: Pid,
    pub key: i64,
}

/// Behavior-neutral dump of one queue, for diagnostics only
#[derive(Debug, Clone, Serialize)]
pub struct QueueSnapshot {
    pub queue: String,
    pub entries: Vec<SnapshotEntry>,
}

/// The two priority-ordered ready queues, one per process class.
///
/// Entries exist only while the process is READY; ordering is by fixed
/// priority with FIFO tie-breaking inside the heap.
#[derive(Debug)]
pub struct ReadyQueues {
    user: BoundedHeap<Priority>,
    daemon: BoundedHeap<Priority>,
}

impl ReadyQueues {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            user: BoundedHeap::with_capacity(capacity),
            daemon: BoundedHeap::with_capacity(capacity),
        }
    }

    fn queue(&self, class: QueueClass) -> &BoundedHeap<Priority> {
        match class {
            QueueClass::User => &self.user,
            QueueClass::Daemon => &self.daemon,
        }
    }

    fn queue_mut(&mut self, class: QueueClass) -> &mut BoundedHeap<Priority> {
        match class {
            QueueClass::User => &mut self.user,
            QueueClass::Daemon => &mut self.daemon,
        }
    }

    /// Insert a pid keyed by its fixed priority
    pub fn insert(
        &mut self,
        class: QueueClass,
        priority: Priority,
        pid: Pid,
    ) -> Result<(), QueueOverflow> {
        self.queue_mut(class).insert(priority, pid)
    }

    /// Extract the most urgent pid of the class, `None` when empty
    pub fn pick_next(&mut self, class: QueueClass) -> Option<Pid> {
        self.queue_mut(class).poll()
    }

    /// Pid at the front of the class queue, without removing it
    #[must_use]
    pub fn peek(&self, class: QueueClass) -> Option<Pid> {
        self.queue(class).peek()
    }

    #[must_use]
    pub fn len(&self, class: QueueClass) -> usize {
        self.queue(class).len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.user.is_empty() && self.daemon.is_empty()
    }

    /// Snapshot of one class queue in heap-array order
    #[must_use]
    pub fn snapshot(&self, class: QueueClass) -> QueueSnapshot {
        QueueSnapshot {
            queue: class.to_string(),
            entries: self
                .queue(class)
                .iter()
                .map(|(pid, key)| SnapshotEntry { pid, key })
                .collect(),
        }
    }
}

/// Blocked processes ordered by absolute wakeup tick
#[derive(Debug)]
pub struct SleepQueue {
    heap: BoundedHeap<Tick>,
}

impl SleepQueue {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: BoundedHeap::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, wake_tick: Tick, pid: Pid) -> Result<(), QueueOverflow> {
        self.heap.insert(wake_tick, pid)
    }

    /// Remove and return the earliest sleeper iff its wakeup tick is `tick`
    pub fn pop_due(&mut self, tick: Tick) -> Option<Pid> {
        if self.heap.peek_key() == Some(tick) {
            self.heap.poll()
        } else {
            None
        }
    }

    #[must_use]
    pub fn next_wake_tick(&self) -> Option<Tick> {
        self.heap.peek_key()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[must_use]
    pub fn snapshot(&self) -> QueueSnapshot {
        QueueSnapshot {
            queue: "SLEEPING".to_string(),
            entries: self
                .heap
                .iter()
                .map(|(pid, key)| SnapshotEntry {
                    pid,
                    key: key as i64,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_then_pick_returns_the_inserted_pid() {
        let mut queues = ReadyQueues::with_capacity(4);
        queues.insert(QueueClass::User, 3, 1).unwrap();

        assert_eq!(queues.pick_next(QueueClass::User), Some(1));
        assert_eq!(queues.pick_next(QueueClass::User), None);
    }

    #[test]
    fn test_classes_are_independent() {
        let mut queues = ReadyQueues::with_capacity(4);
        queues.insert(QueueClass::User, 2, 0).unwrap();
        queues.insert(QueueClass::Daemon, 1, 3).unwrap();

        assert_eq!(queues.pick_next(QueueClass::Daemon), Some(3));
        assert_eq!(queues.pick_next(QueueClass::Daemon), None);
        assert_eq!(queues.pick_next(QueueClass::User), Some(0));
    }

    #[test]
    fn test_priority_extraction_order() {
        let mut queues = ReadyQueues::with_capacity(4);
        queues.insert(QueueClass::User, 5, 1).unwrap();
        queues.insert(QueueClass::User, 2, 0).unwrap();

        assert_eq!(queues.pick_next(QueueClass::User), Some(0));
        assert_eq!(queues.pick_next(QueueClass::User), Some(1));
    }

    #[test]
    fn test_sleep_queue_pops_only_at_exact_tick() {
        let mut sleepers = SleepQueue::with_capacity(4);
        sleepers.insert(14, 2).unwrap();

        assert_eq!(sleepers.pop_due(13), None);
        assert_eq!(sleepers.pop_due(15), None);
        assert_eq!(sleepers.pop_due(14), Some(2));
        assert_eq!(sleepers.pop_due(14), None);
    }

    #[test]
    fn test_snapshot_lists_pid_and_key() {
        let mut queues = ReadyQueues::with_capacity(4);
        queues.insert(QueueClass::User, 2, 0).unwrap();
        let snapshot = queues.snapshot(QueueClass::User);

        assert_eq!(snapshot.queue, "USER");
        assert_eq!(snapshot.entries, vec![SnapshotEntry { pid: 0, key: 2 }]);
    }
}
