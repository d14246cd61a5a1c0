use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::{Result, TagbookError};
use crate::models::Transaction;
use crate::tags::{self, UNTAGGED};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    Daily,
    Monthly,
    Yearly,
}

impl Grouping {
    /// Zero-padded bucket key, so sorting keys as strings is chronological.
    pub fn period_key(self, date: NaiveDate) -> String {
        match self {
            Self::Daily => date.format("%Y-%m-%d").to_string(),
            Self::Monthly => date.format("%Y-%m").to_string(),
            Self::Yearly => format!("{:04}", date.year()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartPayload {
    pub labels: Vec<String>,
    #[serde(rename = "spending_data")]
    pub spending: Vec<f64>,
    #[serde(rename = "income_data")]
    pub income: Vec<f64>,
    #[serde(rename = "tag_data")]
    pub tag_totals: BTreeMap<String, f64>,
}

pub fn aggregate(transactions: &[Transaction], grouping: Grouping) -> ChartPayload {
    let mut by_period: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    let mut tag_totals: BTreeMap<String, f64> = BTreeMap::new();

    for txn in transactions {
        let totals = by_period
            .entry(grouping.period_key(txn.date))
            .or_insert((0.0, 0.0));
        totals.0 += txn.amount_spent;
        totals.1 += txn.amount_received;

        if txn.amount_spent > 0.0 {
            add_tag_spending(&mut tag_totals, &txn.tags, txn.amount_spent);
        }
    }

    let mut payload = ChartPayload {
        tag_totals,
        ..Default::default()
    };
    for (label, (spent, received)) in by_period {
        payload.labels.push(label);
        payload.spending.push(spent);
        payload.income.push(received);
    }
    payload
}

/// Split `amount` evenly across the stored tags, or book it all as untagged.
fn add_tag_spending(totals: &mut BTreeMap<String, f64>, stored_tags: &str, amount: f64) {
    let tags = tags::split(stored_tags);
    if tags.is_empty() {
        *totals.entry(UNTAGGED.to_string()).or_default() += amount;
        return;
    }
    let share = amount / tags.len() as f64;
    for tag in tags {
        *totals.entry(tag.to_string()).or_default() += share;
    }
}

// ---------------------------------------------------------------------------
// Scopes
// ---------------------------------------------------------------------------

/// Which slice of history a chart covers. Each scope is drawn one level
/// finer than itself: a month by day, a year by month, everything by year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartScope {
    Month { year: i32, month: u32 },
    Year { year: i32 },
    AllTime,
}

impl ChartScope {
    pub fn grouping(self) -> Grouping {
        match self {
            Self::Month { .. } => Grouping::Daily,
            Self::Year { .. } => Grouping::Monthly,
            Self::AllTime => Grouping::Yearly,
        }
    }

    /// Inclusive date range to filter on; `None` means no filter.
    pub fn date_range(self) -> Result<Option<(NaiveDate, NaiveDate)>> {
        match self {
            Self::Month { year, month } => {
                let invalid = || TagbookError::InvalidMonth(format!("{year}-{month:02}"));
                let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
                let last = first
                    .checked_add_months(chrono::Months::new(1))
                    .and_then(|d| d.pred_opt())
                    .ok_or_else(invalid)?;
                Ok(Some((first, last)))
            }
            Self::Year { year } => {
                let first = NaiveDate::from_ymd_opt(year, 1, 1);
                let last = NaiveDate::from_ymd_opt(year, 12, 31);
                match first.zip(last) {
                    Some(range) => Ok(Some(range)),
                    None => Err(TagbookError::InvalidDate(year.to_string())),
                }
            }
            Self::AllTime => Ok(None),
        }
    }

    pub fn title(self) -> String {
        match self {
            Self::Month { year, month } => format!("{year:04}-{month:02}"),
            Self::Year { year } => format!("{year:04}"),
            Self::AllTime => "All time".to_string(),
        }
    }
}
