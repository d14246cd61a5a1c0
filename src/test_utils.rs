use std::collections::HashSet;

use chrono::NaiveDate;

use crate::error::{Result, TagbookError};
use crate::models::{Keyword, KeywordId, NewTransaction, Transaction, TransactionId};
use crate::store::{MemoryStore, Store};

/// A [`MemoryStore`] whose tag writes fail for the transaction ids in `broken`.
#[derive(Clone, Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub broken: HashSet<TransactionId>,
}

impl Store for FlakyStore {
    fn insert_transaction(&mut self, txn: NewTransaction) -> Result<Transaction> {
        self.inner.insert_transaction(txn)
    }

    fn all_transactions(&self) -> Result<Vec<Transaction>> {
        self.inner.all_transactions()
    }

    fn transactions_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Transaction>> {
        self.inner.transactions_between(from, to)
    }

    fn set_transaction_tags(&mut self, id: TransactionId, tags: &str) -> Result<()> {
        if self.broken.contains(&id) {
            return Err(TagbookError::Io(std::io::Error::other("disk full")));
        }
        self.inner.set_transaction_tags(id, tags)
    }

    fn insert_keyword(&mut self, keyword: &str, tag: &str) -> Result<Keyword> {
        self.inner.insert_keyword(keyword, tag)
    }

    fn all_keywords(&self) -> Result<Vec<Keyword>> {
        self.inner.all_keywords()
    }

    fn delete_keyword(&mut self, id: KeywordId) -> Result<Keyword> {
        self.inner.delete_keyword(id)
    }

    fn atomically<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let snapshot = self.inner.clone();
        let result = f(self);
        if result.is_err() {
            self.inner = snapshot;
        }
        result
    }
}

pub fn insert_txn(store: &mut impl Store, description: &str, tags: &str) -> Transaction {
    store
        .insert_transaction(NewTransaction {
            date: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            description: description.to_string(),
            amount_spent: 25.0,
            amount_received: 0.0,
            tags: tags.to_string(),
        })
        .unwrap()
}

pub fn tags_of(store: &impl Store, id: TransactionId) -> String {
    store
        .all_transactions()
        .unwrap()
        .into_iter()
        .find(|t| t.id == id)
        .unwrap()
        .tags
}
