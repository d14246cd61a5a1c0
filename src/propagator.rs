use crate::error::Result;
use crate::keywords::KeywordIndex;
use crate::models::TransactionId;
use crate::store::Store;
use crate::tags;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct PropagationReport {
    pub scanned: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub failures: Vec<(TransactionId, String)>,
}

impl PropagationReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Recompute and persist the canonical tag string of every stored
/// transaction, re-matching each one against the whole keyword index.
///
/// A failed write does not stop the scan; it is logged and recorded in the
/// report so callers can decide whether to keep or discard the batch.
pub fn recompute_all<S: Store>(store: &mut S, index: &KeywordIndex) -> Result<PropagationReport> {
    let transactions = store.all_transactions()?;
    let mut report = PropagationReport {
        scanned: transactions.len(),
        ..Default::default()
    };

    for txn in &transactions {
        let new_tags = tags::canonical(index.match_tags(&txn.description));
        if new_tags == txn.tags {
            report.unchanged += 1;
            continue;
        }
        match store.set_transaction_tags(txn.id, &new_tags) {
            Ok(()) => {
                tracing::debug!(id = txn.id, old = %txn.tags, new = %new_tags, "retagged");
                report.updated += 1;
            }
            Err(e) => {
                tracing::warn!(id = txn.id, "failed to update tags: {e}");
                report.failures.push((txn.id, e.to_string()));
            }
        }
    }

    tracing::info!(
        scanned = report.scanned,
        updated = report.updated,
        unchanged = report.unchanged,
        failed = report.failed(),
        keywords = index.len(),
        "tag propagation finished"
    );
    Ok(report)
}
