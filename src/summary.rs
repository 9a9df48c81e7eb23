//! Monthly income/expense summaries.

use chrono::TimeZone;

use crate::error::Result;
use crate::models::{MonthBucket, MonthSummary};
use crate::months::month_buckets;
use crate::store::LedgerStore;

/// Totals for a single month bucket.
pub fn summarize_bucket<S: LedgerStore + ?Sized>(store: &S, bucket: MonthBucket) -> Result<MonthSummary> {
    let totals = store.totals_between(bucket.start, bucket.end)?;
    Ok(MonthSummary { bucket, totals })
}

/// One summary per month that has at least one transaction, newest month
/// first. Fails as a whole if any month's totals cannot be read.
pub fn monthly_summaries<S, Tz>(store: &S, tz: &Tz) -> Result<Vec<MonthSummary>>
where
    S: LedgerStore + ?Sized,
    Tz: TimeZone,
{
    let transactions = store.transactions_newest_first()?;
    tracing::debug!(count = transactions.len(), "loaded transactions for summary");

    let summaries = month_buckets(&transactions, tz)
        .map(|bucket| summarize_bucket(store, bucket))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(months = summaries.len(), "built monthly summaries");
    Ok(summaries)
}
