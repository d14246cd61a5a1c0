use std::cmp::Reverse;

use chrono::NaiveDate;

use crate::error::{Result, TagbookError};
use crate::models::{Keyword, KeywordId, NewTransaction, Transaction, TransactionId};
use crate::store::Store;

/// Vec-backed store. Ids start at 1 and are never reused.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    transactions: Vec<Transaction>,
    keywords: Vec<Keyword>,
    last_transaction_id: TransactionId,
    last_keyword_id: KeywordId,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(mut txns: Vec<Transaction>) -> Vec<Transaction> {
    txns.sort_by_key(|t| Reverse((t.date, t.id)));
    txns
}

impl Store for MemoryStore {
    fn insert_transaction(&mut self, txn: NewTransaction) -> Result<Transaction> {
        self.last_transaction_id += 1;
        let stored = Transaction {
            id: self.last_transaction_id,
            date: txn.date,
            description: txn.description,
            amount_spent: txn.amount_spent,
            amount_received: txn.amount_received,
            tags: txn.tags,
        };
        self.transactions.push(stored.clone());
        Ok(stored)
    }

    fn all_transactions(&self) -> Result<Vec<Transaction>> {
        Ok(newest_first(self.transactions.clone()))
    }

    fn transactions_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Transaction>> {
        let selected = self
            .transactions
            .iter()
            .filter(|t| t.date >= from && t.date <= to)
            .cloned()
            .collect();
        Ok(newest_first(selected))
    }

    fn set_transaction_tags(&mut self, id: TransactionId, tags: &str) -> Result<()> {
        let txn = self
            .transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| TagbookError::NotFound(format!("transaction {id}")))?;
        txn.tags = tags.to_string();
        Ok(())
    }

    fn insert_keyword(&mut self, keyword: &str, tag: &str) -> Result<Keyword> {
        if self.keywords.iter().any(|k| k.keyword == keyword) {
            return Err(TagbookError::DuplicateKeyword(keyword.to_string()));
        }
        self.last_keyword_id += 1;
        let stored = Keyword {
            id: self.last_keyword_id,
            keyword: keyword.to_string(),
            tag: tag.to_string(),
        };
        self.keywords.push(stored.clone());
        Ok(stored)
    }

    fn all_keywords(&self) -> Result<Vec<Keyword>> {
        Ok(self.keywords.clone())
    }

    fn delete_keyword(&mut self, id: KeywordId) -> Result<Keyword> {
        let pos = self
            .keywords
            .iter()
            .position(|k| k.id == id)
            .ok_or_else(|| TagbookError::NotFound(format!("keyword {id}")))?;
        Ok(self.keywords.remove(pos))
    }

    fn atomically<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let snapshot = self.clone();
        let result = f(self);
        if result.is_err() {
            *self = snapshot;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_txn(date: &str, description: &str) -> NewTransaction {
        NewTransaction {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            description: description.to_string(),
            amount_spent: 10.0,
            amount_received: 0.0,
            tags: String::new(),
        }
    }

    #[test]
    fn test_transactions_are_newest_first() {
        let mut store = MemoryStore::new();
        store.insert_transaction(new_txn("2024-01-05", "a")).unwrap();
        store.insert_transaction(new_txn("2024-03-01", "b")).unwrap();
        store.insert_transaction(new_txn("2024-01-05", "c")).unwrap();
        let descs: Vec<String> = store
            .all_transactions()
            .unwrap()
            .into_iter()
            .map(|t| t.description)
            .collect();
        assert_eq!(descs, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_transactions_between_is_inclusive() {
        let mut store = MemoryStore::new();
        store.insert_transaction(new_txn("2023-12-31", "before")).unwrap();
        store.insert_transaction(new_txn("2024-01-01", "first")).unwrap();
        store.insert_transaction(new_txn("2024-01-31", "last")).unwrap();
        store.insert_transaction(new_txn("2024-02-01", "after")).unwrap();
        let from = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let found = store.transactions_between(from, to).unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn test_keyword_ids_not_reused() {
        let mut store = MemoryStore::new();
        let first = store.insert_keyword("uber", "Transport").unwrap();
        store.delete_keyword(first.id).unwrap();
        let second = store.insert_keyword("uber", "Transport").unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_atomically_rolls_back_on_error() {
        let mut store = MemoryStore::new();
        let result: Result<()> = store.atomically(|s| {
            s.insert_keyword("uber", "Transport")?;
            Err(TagbookError::EmptyKeyword)
        });
        assert!(result.is_err());
        assert!(store.all_keywords().unwrap().is_empty());
    }

    #[test]
    fn test_set_tags_on_missing_transaction() {
        let mut store = MemoryStore::new();
        let err = store.set_transaction_tags(42, "A").unwrap_err();
        assert!(matches!(err, TagbookError::NotFound(_)));
    }
}
