#[cfg(test)]
mod memory;
mod sqlite;

#[cfg(test)]
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use chrono::NaiveDate;

use crate::error::Result;
use crate::models::{Keyword, KeywordId, NewTransaction, Transaction, TransactionId};

/// Persistence for transactions and keywords, backed by SQLite in the CLI.
pub trait Store {
    fn insert_transaction(&mut self, txn: NewTransaction) -> Result<Transaction>;

    /// All transactions, newest first.
    fn all_transactions(&self) -> Result<Vec<Transaction>>;

    /// Transactions dated within `from..=to`, newest first.
    fn transactions_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Transaction>>;

    /// Replace the stored tag string of one transaction.
    ///
    /// Fails with `NotFound` if no transaction has this id.
    fn set_transaction_tags(&mut self, id: TransactionId, tags: &str) -> Result<()>;

    /// Fails with `DuplicateKeyword` if the keyword text is already stored.
    fn insert_keyword(&mut self, keyword: &str, tag: &str) -> Result<Keyword>;

    /// All keywords in creation order.
    fn all_keywords(&self) -> Result<Vec<Keyword>>;

    /// Remove a keyword and return what was removed.
    ///
    /// Fails with `NotFound` if no keyword has this id.
    fn delete_keyword(&mut self, id: KeywordId) -> Result<Keyword>;

    /// Run `f` as a single unit. If `f` returns an error, every change it
    /// made is undone before the error is handed back.
    fn atomically<T, F>(&mut self, f: F) -> Result<T>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<T>;
}
