/*!
 * Async Syscall Handler Trait
 * Async interface for syscall handlers with Tokio runtime support
 */

use crate::core::types::Pid;
use crate::syscalls::types::{Syscall, SyscallResult};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Async trait for handling individual syscalls
/// Each syscall category can implement async handlers for I/O-bound operations
#[allow(dead_code)]
pub trait AsyncSyscallHandler: Send + Sync {
    /// Handle a syscall asynchronously and return the result
    fn handle_async(
        &self,
        pid: Pid,
        syscall: &Syscall,
    ) -> Pin<Box<dyn Future<Output = Option<SyscallResult>> + Send + '_>>;

    /// Get the name of this handler (for logging/debugging)
    fn name(&self) -> &'static str;
}

/// Registry for async syscall handlers
/// Dispatches syscalls to appropriate async handlers based on type
#[derive(Clone)]
#[allow(dead_code)]
pub struct AsyncSyscallHandlerRegistry {
    handlers: Arc<Vec<Arc<dyn AsyncSyscallHandler>>>,
}

#[allow(dead_code)]
impl AsyncSyscallHandlerRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Vec::new().into()),
        }
    }

    /// Register a handler in the registry
    pub fn register(mut self, handler: Arc<dyn AsyncSyscallHandler>) -> Self {
        // Get mutable reference to handlers
        let handlers = Arc::make_mut(&mut self.handlers);
        handlers.push(handler);
        self
    }

    /// Dispatch a syscall to the appropriate async handler
    /// Returns None if no handler can handle this syscall
    pub async fn dispatch(&self, pid: Pid, syscall: &Syscall) -> Option<SyscallResult> {
        // Try each handler until one returns Some
        for handler in self.handlers.iter() {
            if let Some(result) = handler.handle_async(pid, syscall).await {
                return Some(result);
            }
        }
        None
    }

    /// Get the number of registered handlers
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl Default for AsyncSyscallHandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
