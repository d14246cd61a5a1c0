use std::collections::HashSet;

use crate::charts::{self, ChartPayload, ChartScope};
use crate::error::{Result, TagbookError};
use crate::importer::{self, IngestResult};
use crate::keywords::{self, KeywordIndex};
use crate::models::{Keyword, KeywordId, RawRow, Transaction};
use crate::propagator::{self, PropagationReport};
use crate::store::Store;

#[derive(Debug)]
pub struct KeywordChange {
    pub keyword: Keyword,
    pub propagation: PropagationReport,
}

/// Mutations take `&mut self`, so there is a single writer. A keyword change
/// and the retagging it triggers run inside one [`Store::atomically`] unit.
pub struct Ledger<S: Store> {
    store: S,
}

impl<S: Store> Ledger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn keywords(&self) -> Result<Vec<Keyword>> {
        self.store.all_keywords()
    }

    pub fn transactions(&self) -> Result<Vec<Transaction>> {
        self.store.all_transactions()
    }

    pub fn match_tags(&self, description: &str) -> Result<HashSet<String>> {
        Ok(KeywordIndex::load(&self.store)?.match_tags(description))
    }

    pub fn add_keyword(&mut self, keyword: &str, tag: &str) -> Result<KeywordChange> {
        self.store.atomically(|store| {
            let keyword = keywords::add_keyword(store, keyword, tag)?;
            let propagation = propagate_or_abort(store)?;
            Ok(KeywordChange { keyword, propagation })
        })
    }

    pub fn remove_keyword(&mut self, id: KeywordId) -> Result<KeywordChange> {
        self.store.atomically(|store| {
            let keyword = keywords::remove_keyword(store, id)?;
            let propagation = propagate_or_abort(store)?;
            Ok(KeywordChange { keyword, propagation })
        })
    }

    pub fn ingest<I>(&mut self, rows: I) -> Result<IngestResult>
    where
        I: IntoIterator<Item = RawRow>,
    {
        let index = KeywordIndex::load(&self.store)?;
        if index.is_empty() {
            tracing::debug!("no keywords defined, rows will be stored untagged");
        }
        Ok(importer::ingest(&mut self.store, &index, rows))
    }

    /// Re-derive every stored tag string from the current keywords. Unlike
    /// keyword mutations this keeps whatever succeeded and reports the rest.
    pub fn retag(&mut self) -> Result<PropagationReport> {
        let index = KeywordIndex::load(&self.store)?;
        propagator::recompute_all(&mut self.store, &index)
    }

    pub fn chart(&self, scope: ChartScope) -> Result<ChartPayload> {
        let transactions = match scope.date_range()? {
            Some((from, to)) => self.store.transactions_between(from, to)?,
            None => self.store.all_transactions()?,
        };
        Ok(charts::aggregate(&transactions, scope.grouping()))
    }
}

fn propagate_or_abort<S: Store>(store: &mut S) -> Result<PropagationReport> {
    let index = KeywordIndex::load(store)?;
    let report = propagator::recompute_all(store, &index)?;
    if !report.is_complete() {
        return Err(TagbookError::PropagationIncomplete {
            updated: report.updated,
            failed: report.failed(),
        });
    }
    Ok(report)
}
