/*!
 * Monitoring
 * Diagnostic tracing setup
 */

mod tracer;

pub use tracer::{init_tracing, TRACE_JSON_ENV};
