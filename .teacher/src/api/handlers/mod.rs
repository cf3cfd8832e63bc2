/*!
 * Handler implementations for gRPC service methods
 */

pub mod async_handlers;
pub mod process_handlers;
pub mod sandbox_handlers;
pub mod scheduler_handlers;
pub mod streaming_handlers;
