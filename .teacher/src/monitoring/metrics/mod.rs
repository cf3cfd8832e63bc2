/*!
 * Metrics
 * Performance metrics collection and timeout observability
 */

mod collector;
mod timeout;

pub use collector::{MetricsCollector, MetricsSnapshot};
pub use timeout::{TimeoutObserver, TimeoutStats};
