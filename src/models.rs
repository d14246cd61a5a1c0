use chrono::NaiveDate;

pub type TransactionId = i64;
pub type KeywordId = i64;

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: TransactionId,
    pub date: NaiveDate,
    pub description: String,
    pub amount_spent: f64,
    pub amount_received: f64,
    /// Canonical tag string, see [`crate::tags::canonical`].
    pub tags: String,
}

/// A transaction that has been normalized and tagged but not yet stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub amount_spent: f64,
    pub amount_received: f64,
    pub tags: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Keyword {
    pub id: KeywordId,
    /// Always lowercase.
    pub keyword: String,
    pub tag: String,
}

/// Intermediate representation from the CSV reader before normalization.
///
/// Fields are positional: date, description, amount spent, amount received.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub date: String,
    pub description: String,
    pub amount_spent: String,
    pub amount_received: String,
}

impl RawRow {
    pub fn new(date: &str, description: &str, amount_spent: &str, amount_received: &str) -> Self {
        Self {
            date: date.to_string(),
            description: description.to_string(),
            amount_spent: amount_spent.to_string(),
            amount_received: amount_received.to_string(),
        }
    }
}
