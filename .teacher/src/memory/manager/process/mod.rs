/*!
 * Process Memory Operations
 * Process-specific memory management and tracking
 */

pub mod process_ops;
pub mod tracking;

pub use tracking::ProcessMemoryTracking;
