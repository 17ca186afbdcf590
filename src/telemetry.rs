//! Fire-and-forget usage counters.
//!
//! Events land in the structured log and an in-process counter map. Nothing
//! here can fail loudly; instrumentation must never break an edit.

use std::collections::HashMap;
use std::sync::{LazyLock, Mutex};

static COUNTERS: LazyLock<Mutex<HashMap<String, u64>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Record one occurrence of a named event.
pub fn track(event: &str) {
    tracing::info!(target: "qrforge::telemetry", event, "event");
    if let Ok(mut counters) = COUNTERS.lock() {
        *counters.entry(event.to_string()).or_insert(0) += 1;
    }
}

/// How many times an event has fired in this process.
pub fn count(event: &str) -> u64 {
    COUNTERS
        .lock()
        .map(|counters| counters.get(event).copied().unwrap_or(0))
        .unwrap_or(0)
}
