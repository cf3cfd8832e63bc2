/*!
 * Process Core Types and Traits
 * Fundamental types and trait definitions for process management
 */

pub mod traits;
pub mod types;

// Re-export everything for convenience
pub use traits::*;
pub use types::*;

