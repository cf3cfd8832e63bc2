/*!
 * Seqlock-based Statistics Wrapper
 * Zero-cost reads for read-heavy statistics structures
 */

use seqlock::{SeqLock as InnerSeqLock};
use std::sync::Arc;

/// Seqlock wrapper for statistics structures
///
/// # Performance
///
/// - **Reads**: Lock-free, wait-free (just sequence number check)
/// - **Writes**: Mutex-based, increments sequence number
/// - **Best for**: Structures read 100x more than written
///
/// # Example
///
/// ```ignore
/// let stats = SeqlockStats::new(JitStats::default());
///
/// // Read (lock-free, ~1-2ns)
/// let current = stats.read();
///
/// // Write (locks briefly, ~10-20ns)
/// stats.write(|s| {
///     s.jit_hits += 1;
/// });
/// ```
pub struct SeqlockStats<T> {
    inner: Arc<InnerSeqLock<T>>,
}

impl<T: Clone> SeqlockStats<T> {
    /// Create new seqlock-protected stats
    #[inline]
    pub fn new(initial: T) -> Self {
        Self {
            inner: Arc::new(InnerSeqLock::new(initial)),
        }
    }

    /// Read current stats (lock-free)
    ///
    /// This is wait-free and never blocks. If a writer is active,
    /// it will spin briefly and retry, but this is very rare.
    #[inline(always)]
    pub fn read(&self) -> T {
        self.inner.read()
    }

    /// Update stats with a closure
    ///
    /// The closure receives mutable access to the stats. This operation
    /// takes a write lock briefly.
    #[inline]
    pub fn write<F>(&self, f: F)
    where
        F: FnOnce(&mut T),
    {
        let mut guard = self.inner.lock_write();
        f(&mut *guard);
    }

    /// Replace stats entirely
    #[inline]
    pub fn replace(&self, new_value: T) {
        *self.inner.lock_write() = new_value;
    }

    /// Access stats for batched updates (holds lock longer)
    #[inline]
    pub fn write_batch<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        let mut guard = self.inner.lock_write();
        f(&mut *guard)
    }
}

impl<T: Clone> Clone for SeqlockStats<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

// Safety: SeqLock is Sync and Send when T is
unsafe impl<T: Send> Send for SeqlockStats<T> {}
unsafe impl<T: Sync> Sync for SeqlockStats<T> {}
