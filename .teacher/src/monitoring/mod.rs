/*!
 * Performance Monitoring
 * Centralized performance tracking with metrics and tracing
 */

mod metrics;
mod tracer;

pub use metrics::{MetricsCollector, MetricsSnapshot};
pub use tracer::{init_tracing, span_operation, span_syscall};
