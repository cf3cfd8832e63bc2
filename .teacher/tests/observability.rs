/*!
 * Observability System Integration Tests
 */

#[path = "monitoring/events_test.rs"]
mod events_test;

#[path = "monitoring/collector_test.rs"]
mod collector_test;

#[path = "monitoring/query_test.rs"]
mod query_test;

#[path = "monitoring/integration_test.rs"]
mod integration_test;
