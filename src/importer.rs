use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::error::{Result, TagbookError};
use crate::keywords::KeywordIndex;
use crate::models::{NewTransaction, RawRow};
use crate::store::Store;
use crate::tags;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Parse a calendar date, dropping any time-of-day component.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let s = raw.trim();
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
    {
        return Ok(date);
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
    {
        return Ok(dt.date());
    }
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.date_naive())
        .map_err(|_| TagbookError::InvalidDate(raw.to_string()))
}

fn thousands_grouped() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[+-]?\d{1,3}(,\d{3})+(\.\d+)?$").expect("valid pattern"))
}

/// Parse a currency amount. Blank means 0.0; anything else must be a finite
/// number once `$` and quotes are stripped. Commas are only accepted as
/// thousands separators, so `12,5` is rejected rather than read as 125.
pub fn parse_amount(raw: &str) -> Result<f64> {
    let invalid = || TagbookError::InvalidAmount(raw.to_string());
    let s = raw.replace(['"', '$'], "");
    let s = s.trim();
    if s.is_empty() {
        return Ok(0.0);
    }
    let s = if s.contains(',') {
        if !thousands_grouped().is_match(s) {
            return Err(invalid());
        }
        s.replace(',', "")
    } else {
        s.to_string()
    };
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(invalid()),
    }
}

/// Normalize one raw row and tag it against the current keyword set.
pub fn normalize_row(row: &RawRow, index: &KeywordIndex) -> Result<NewTransaction> {
    let date = parse_date(&row.date)?;
    let amount_spent = parse_amount(&row.amount_spent)?;
    let amount_received = parse_amount(&row.amount_received)?;
    Ok(NewTransaction {
        date,
        description: row.description.clone(),
        amount_spent,
        amount_received,
        tags: tags::canonical(index.match_tags(&row.description)),
    })
}

// ---------------------------------------------------------------------------
// ingest
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct RowFailure {
    /// 1-based position of the row within the batch.
    pub row: usize,
    pub error: TagbookError,
}

#[derive(Debug, Default)]
pub struct IngestResult {
    pub created: usize,
    pub skipped: usize,
    pub failures: Vec<RowFailure>,
}

/// Store every row that normalizes cleanly. A bad row is logged, recorded
/// in the result and skipped; it never aborts the rest of the batch.
pub fn ingest<S, I>(store: &mut S, index: &KeywordIndex, rows: I) -> IngestResult
where
    S: Store,
    I: IntoIterator<Item = RawRow>,
{
    let result = rows
        .into_iter()
        .enumerate()
        .fold(IngestResult::default(), |mut acc, (i, row)| {
            let outcome = normalize_row(&row, index).and_then(|txn| store.insert_transaction(txn));
            match outcome {
                Ok(txn) => {
                    tracing::debug!(id = txn.id, date = %txn.date, tags = %txn.tags, "transaction created");
                    acc.created += 1;
                }
                Err(error) => {
                    tracing::warn!(line = i + 1, "skipping row {row:?}: {error}");
                    acc.skipped += 1;
                    acc.failures.push(RowFailure { row: i + 1, error });
                }
            }
            acc
        });

    tracing::info!(
        created = result.created,
        skipped = result.skipped,
        "ingestion finished"
    );
    result
}
