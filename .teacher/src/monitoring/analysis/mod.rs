/*!
 * Analysis
 * Event analysis, querying, and sampling
 */

mod anomaly;
mod query;
mod sampler;

pub use anomaly::{Anomaly, Detector};
pub use query::{AggregationType, CausalityTracer, CommonQueries, Query, QueryResult};
pub use sampler::{SampleDecision, Sampler};

