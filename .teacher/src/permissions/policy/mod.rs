/*!
 * Policy Module
 * Policy engine and evaluation context
 */

mod context;
mod engine;

pub use context::{EvaluationContext, RequestContext};
pub use engine::{DefaultPolicy, Policy, PolicyDecision, PolicyEngine};
