//! Metrics collection
//!
//! Counter and histogram names for the query surface. The macros are
//! no-ops until the embedding process installs a recorder; [`init`]
//! installs a no-op recorder explicitly for processes that never export
//! metrics.

use std::time::Duration;

use anyhow::Result;
use metrics::{counter, gauge, histogram};

/// Total query operations, labelled by operation and status
pub const QUERIES_TOTAL: &str = "wa_directory_queries_total";
/// Query duration in seconds, labelled by operation
pub const QUERY_DURATION: &str = "wa_directory_query_duration_seconds";
/// Total swallowed or reported errors, labelled by operation
pub const ERRORS_TOTAL: &str = "wa_directory_errors_total";
/// Idle connections in the pool
pub const POOL_IDLE_CONNECTIONS: &str = "wa_directory_pool_idle_connections";

/// Initialize metrics collection with a no-op recorder
pub fn init() -> Result<()> {
    metrics::set_global_recorder(metrics::NoopRecorder)
        .map_err(|e| anyhow::anyhow!("Failed to initialize metrics recorder: {e}"))?;

    Ok(())
}

/// Record one query operation's duration and outcome
pub fn record_query(operation: &str, duration: Duration, success: bool) {
    let status = if success { "success" } else { "error" };

    counter!(
        QUERIES_TOTAL,
        "operation" => operation.to_string(),
        "status" => status
    )
    .increment(1);
    histogram!(QUERY_DURATION, "operation" => operation.to_string())
        .record(duration.as_secs_f64());

    if !success {
        counter!(ERRORS_TOTAL, "operation" => operation.to_string()).increment(1);
    }
}

/// Update the pool idle-connection gauge
pub fn update_pool_idle(idle: u32) {
    gauge!(POOL_IDLE_CONNECTIONS).set(f64::from(idle));
}
