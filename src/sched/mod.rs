/*!
 * Scheduling Module
 * Ready/sleep queue structures and the long-term admission pass
 */

pub mod admission;
pub mod queues;

// Re-export public API
pub use queues::{QueueSnapshot, ReadyQueues, SleepQueue, SnapshotEntry};
