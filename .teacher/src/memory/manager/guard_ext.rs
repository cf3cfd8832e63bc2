/*!
 * Memory Guard Extensions
 *
 * Extension trait to create RAII guards for memory allocations
 */

use super::MemoryManager;
use crate::core::guard::{MemoryGuard, MemoryGuardRef};
use crate::core::types::{Pid, Size};
use crate::memory::types::MemoryResult;
use std::sync::Arc;

/// Extension trait for creating memory guards
pub trait MemoryGuardExt {
    /// Allocate memory with an RAII guard for automatic cleanup
    ///
    /// # Example
    ///
    /// ```rust
    /// use ai_os_kernel::memory::manager::{MemoryManager, MemoryGuardExt};
    ///
    /// let manager = MemoryManager::new();
    /// let guard = manager.allocate_guard(1024, 1)?;
    /// let addr = guard.address();
    /// // Memory automatically freed on drop
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    fn allocate_guard(&self, size: Size, pid: Pid) -> MemoryResult<MemoryGuard>;

    /// Allocate memory with a reference-counted guard for shared ownership
    ///
    /// Multiple owners can hold references; memory is freed when the last
    /// reference is dropped.
    ///
    /// # Example
    ///
    /// ```rust
    /// use ai_os_kernel::memory::manager::{MemoryManager, MemoryGuardExt};
    ///
    /// let manager = MemoryManager::new();
    /// let guard1 = manager.allocate_guard_ref(1024, 1)?;
    /// let guard2 = guard1.clone(); // Shared ownership
    /// // Memory freed when both guards drop
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    fn allocate_guard_ref(&self, size: Size, pid: Pid) -> MemoryResult<MemoryGuardRef>;
}

impl MemoryGuardExt for MemoryManager {
    fn allocate_guard(&self, size: Size, pid: Pid) -> MemoryResult<MemoryGuard> {
        // Allocate memory first
        let address = self.allocate(size, pid)?;

        // Create guard that will deallocate on drop
        Ok(MemoryGuard::new(
            address,
            size,
            pid,
            Arc::new(self.clone()),
            self.collector(),
        ))
    }

    fn allocate_guard_ref(&self, size: Size, pid: Pid) -> MemoryResult<MemoryGuardRef> {
        // Allocate memory first
        let address = self.allocate(size, pid)?;

        // Create reference-counted guard
        Ok(MemoryGuardRef::new(
            address,
            size,
            pid,
            Arc::new(self.clone()),
            self.collector(),
        ))
    }
}
