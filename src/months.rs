//! Calendar-month bucketing of dated records.

use std::collections::HashSet;

use chrono::{DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone};

use crate::models::{Dated, MonthBucket};

/// Lazily yields one [MonthBucket] per distinct (month, year) seen in `records`,
/// in the order the months are first encountered.
pub fn month_buckets<'a, I, T, Tz>(records: I, tz: &'a Tz) -> MonthBuckets<'a, I::IntoIter, Tz>
where
    I: IntoIterator<Item = &'a T>,
    T: Dated + 'a,
    Tz: TimeZone,
{
    MonthBuckets {
        records: records.into_iter(),
        tz,
        seen: HashSet::new(),
    }
}

pub struct MonthBuckets<'a, I, Tz: TimeZone> {
    records: I,
    tz: &'a Tz,
    seen: HashSet<(i32, u32)>,
}

impl<'a, I, T, Tz> Iterator for MonthBuckets<'a, I, Tz>
where
    I: Iterator<Item = &'a T>,
    T: Dated + 'a,
    Tz: TimeZone,
{
    type Item = MonthBucket;

    fn next(&mut self) -> Option<MonthBucket> {
        for record in self.records.by_ref() {
            let ts = record.timestamp();
            let Some(local) = self.tz.timestamp_opt(ts, 0).earliest() else {
                tracing::warn!(timestamp = ts, "skipping record with out-of-range date");
                continue;
            };
            let key = (local.year(), local.month());
            if self.seen.contains(&key) {
                continue;
            }
            match bucket_for(self.tz, key.0, key.1) {
                Some(bucket) => {
                    self.seen.insert(key);
                    return Some(bucket);
                }
                None => {
                    tracing::warn!(year = key.0, month = key.1, "could not resolve month bounds");
                }
            }
        }
        None
    }
}

/// The bounds and label of one calendar month in `tz`.
pub fn bucket_for<Tz: TimeZone>(tz: &Tz, year: i32, month: u32) -> Option<MonthBucket> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let last = last_day_of_month(year, month)?;

    let start = resolve_local(tz, first.and_hms_opt(0, 0, 0)?, Duration::hours(1))?;
    let end = resolve_local(tz, last.and_hms_opt(23, 59, 59)?, Duration::hours(-1))?;

    Some(MonthBucket {
        start: start.timestamp(),
        end: end.timestamp(),
        label: first.format("%B %Y").to_string(),
    })
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

// A local time inside a DST gap does not exist; step by `nudge` until it does.
// Ambiguous times pick the instant that keeps the month widest.
fn resolve_local<Tz: TimeZone>(
    tz: &Tz,
    mut local: NaiveDateTime,
    nudge: Duration,
) -> Option<DateTime<Tz>> {
    for _ in 0..3 {
        match tz.from_local_datetime(&local) {
            LocalResult::Single(dt) => return Some(dt),
            LocalResult::Ambiguous(early, late) => {
                return Some(if nudge > Duration::zero() { early } else { late });
            }
            LocalResult::None => local = local.checked_add_signed(nudge)?,
        }
    }
    None
}
