use crate::error::Result;
use crate::model::{HistoryEntry, HistoryLog};
use crate::store::DocumentStore;
use tracing::debug;

/// Append one evaluated expression to the log. No deduplication, no cap.
pub fn record<S: DocumentStore>(store: &mut S, expr: &str, result: f64) -> Result<HistoryEntry> {
    let mut log: HistoryLog = store.open()?;
    let entry = HistoryEntry {
        expr: expr.to_string(),
        result,
    };
    log.history.push(entry.clone());
    store.commit(&log)?;

    debug!(entries = log.history.len(), "history entry recorded");
    Ok(entry)
}

/// Every entry, oldest first.
pub fn all<S: DocumentStore>(store: &mut S) -> Result<Vec<HistoryEntry>> {
    let log: HistoryLog = store.open()?;
    Ok(log.history)
}
