/*!
 * CPU Scheduler
 * Manages process scheduling with multiple policies and preemption
 */

use super::atomic_stats::AtomicSchedulerStats;
use super::types::SchedulingPolicy;
use crate::core::types::Pid;
use crate::monitoring::Collector;
use dashmap::DashMap;
use log::info;
use parking_lot::RwLock;
use std::collections::{BinaryHeap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

mod entry;
mod operations;
mod policy;
mod stats;

use entry::{Entry, FairEntry};

/// Location of a process in the scheduler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QueueLocation {
    Current,
    RoundRobin,
    Priority,
    Fair,
}

/// CPU Scheduler
///
/// # Performance
/// - Cache-line aligned for optimal performance in high-frequency scheduling operations
/// - Lock-free atomic stats for zero-contention monitoring in hot scheduling paths
#[repr(C, align(64))]
pub struct Scheduler {
    policy: Arc<RwLock<SchedulingPolicy>>,
    quantum: Arc<RwLock<Duration>>,

    // Round-robin queue
    rr_queue: Arc<RwLock<VecDeque<Entry>>>,

    // Priority queue (max-heap by priority)
    priority_queue: Arc<RwLock<BinaryHeap<Entry>>>,

    // Fair queue (min-heap by vruntime) - O(log n) operations
    fair_queue: Arc<RwLock<BinaryHeap<FairEntry>>>,

    // Current running process
    current: Arc<RwLock<Option<Entry>>>,

    // Process location index for O(1) lookup
    process_locations: Arc<DashMap<Pid, QueueLocation>>,

    // Statistics - lock-free atomics for hot path updates
    stats: Arc<AtomicSchedulerStats>,

    // Observability collector for event streaming
    collector: Option<Arc<Collector>>,
}

impl Scheduler {
    /// Create new scheduler with policy
    pub fn new(policy: SchedulingPolicy) -> Self {
        Self::with_quantum(policy, Duration::from_millis(10))
    }

    /// Create scheduler with custom quantum
    pub fn with_quantum(policy: SchedulingPolicy, quantum: Duration) -> Self {
        info!(
            "Scheduler initialized with lock-free atomic stats: policy={:?}, quantum={:?}",
            policy, quantum
        );

        Self {
            policy: Arc::new(RwLock::new(policy)),
            quantum: Arc::new(RwLock::new(quantum)),
            rr_queue: Arc::new(RwLock::new(VecDeque::new())),
            priority_queue: Arc::new(RwLock::new(BinaryHeap::new())),
            fair_queue: Arc::new(RwLock::new(BinaryHeap::new())),
            current: Arc::new(RwLock::new(None)),
            process_locations: Arc::new(DashMap::new()),
            stats: Arc::new(AtomicSchedulerStats::new(policy, quantum)),
            collector: None,
        }
    }

    /// Add observability collector
    pub fn with_collector(mut self, collector: Arc<Collector>) -> Self {
        self.collector = Some(collector);
        self
    }

    /// Set collector after construction
    pub fn set_collector(&mut self, collector: Arc<Collector>) {
        self.collector = Some(collector);
    }
}

impl Clone for Scheduler {
    fn clone(&self) -> Self {
        Self {
            policy: Arc::clone(&self.policy),
            quantum: Arc::clone(&self.quantum),
            rr_queue: Arc::clone(&self.rr_queue),
            priority_queue: Arc::clone(&self.priority_queue),
            fair_queue: Arc::clone(&self.fair_queue),
            current: Arc::clone(&self.current),
            process_locations: Arc::clone(&self.process_locations),
            stats: Arc::clone(&self.stats),
            collector: self.collector.as_ref().map(Arc::clone),
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(SchedulingPolicy::Fair)
    }
}
