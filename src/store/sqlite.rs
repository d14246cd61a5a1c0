use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{Connection, ErrorCode, OptionalExtension, Row};

use crate::db::{get_connection, init_db};
use crate::error::{Result, TagbookError};
use crate::models::{Keyword, KeywordId, NewTransaction, Transaction, TransactionId};
use crate::store::Store;

const DATE_FORMAT: &str = "%Y-%m-%d";

const SELECT_TRANSACTION: &str =
    "SELECT id, date, description, amount_spent, amount_received, tags FROM transactions";

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database file and make sure the schema exists.
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = get_connection(db_path)?;
        Self::from_connection(conn)
    }

    pub fn from_connection(conn: Connection) -> Result<Self> {
        init_db(&conn)?;
        Ok(Self { conn })
    }

    fn query_transactions(
        &self,
        sql: &str,
        params: &[&dyn rusqlite::ToSql],
    ) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

fn row_to_transaction(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    let raw_date: String = row.get(1)?;
    let date = NaiveDate::parse_from_str(&raw_date, DATE_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Transaction {
        id: row.get(0)?,
        date,
        description: row.get(2)?,
        amount_spent: row.get(3)?,
        amount_received: row.get(4)?,
        tags: row.get(5)?,
    })
}

fn row_to_keyword(row: &Row<'_>) -> rusqlite::Result<Keyword> {
    Ok(Keyword {
        id: row.get(0)?,
        keyword: row.get(1)?,
        tag: row.get(2)?,
    })
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
    matches!(err, rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation)
}

impl Store for SqliteStore {
    fn insert_transaction(&mut self, txn: NewTransaction) -> Result<Transaction> {
        let date = txn.date.format(DATE_FORMAT).to_string();
        self.conn.execute(
            "INSERT INTO transactions (date, description, amount_spent, amount_received, tags) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![date, txn.description, txn.amount_spent, txn.amount_received, txn.tags],
        )?;
        Ok(Transaction {
            id: self.conn.last_insert_rowid(),
            date: txn.date,
            description: txn.description,
            amount_spent: txn.amount_spent,
            amount_received: txn.amount_received,
            tags: txn.tags,
        })
    }

    fn all_transactions(&self) -> Result<Vec<Transaction>> {
        let sql = format!("{SELECT_TRANSACTION} ORDER BY date DESC, id DESC");
        self.query_transactions(&sql, rusqlite::params![])
    }

    fn transactions_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Transaction>> {
        let sql = format!("{SELECT_TRANSACTION} WHERE date BETWEEN ?1 AND ?2 ORDER BY date DESC, id DESC");
        let from = from.format(DATE_FORMAT).to_string();
        let to = to.format(DATE_FORMAT).to_string();
        self.query_transactions(&sql, rusqlite::params![from, to])
    }

    fn set_transaction_tags(&mut self, id: TransactionId, tags: &str) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE transactions SET tags = ?1, updated_at = datetime('now') WHERE id = ?2",
            rusqlite::params![tags, id],
        )?;
        if changed == 0 {
            return Err(TagbookError::NotFound(format!("transaction {id}")));
        }
        Ok(())
    }

    fn insert_keyword(&mut self, keyword: &str, tag: &str) -> Result<Keyword> {
        match self.conn.execute(
            "INSERT INTO keywords (keyword, tag) VALUES (?1, ?2)",
            rusqlite::params![keyword, tag],
        ) {
            Ok(_) => Ok(Keyword {
                id: self.conn.last_insert_rowid(),
                keyword: keyword.to_string(),
                tag: tag.to_string(),
            }),
            Err(e) if is_constraint_violation(&e) => {
                Err(TagbookError::DuplicateKeyword(keyword.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn all_keywords(&self) -> Result<Vec<Keyword>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, keyword, tag FROM keywords ORDER BY id")?;
        let rows = stmt
            .query_map([], row_to_keyword)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn delete_keyword(&mut self, id: KeywordId) -> Result<Keyword> {
        let existing = self
            .conn
            .query_row(
                "SELECT id, keyword, tag FROM keywords WHERE id = ?1",
                [id],
                row_to_keyword,
            )
            .optional()?
            .ok_or_else(|| TagbookError::NotFound(format!("keyword {id}")))?;
        self.conn.execute("DELETE FROM keywords WHERE id = ?1", [id])?;
        Ok(existing)
    }

    fn atomically<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        self.conn.execute_batch("BEGIN IMMEDIATE")?;
        let outcome = f(self).and_then(|value| {
            self.conn.execute_batch("COMMIT")?;
            Ok(value)
        });
        // A failed COMMIT (e.g. a deferred constraint) leaves the transaction open.
        if outcome.is_err() && !self.conn.is_autocommit() {
            if let Err(rollback) = self.conn.execute_batch("ROLLBACK") {
                tracing::error!("rollback failed: {rollback}");
            }
        }
        outcome
    }
}
