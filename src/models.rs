use std::fmt;
use std::str::FromStr;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

use crate::error::PurseError;

/// Whether money came in or went out. Stored as `"Expense"` / `"Income"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    Expense,
    Income,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Expense => "Expense",
            EntryType::Income => "Income",
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = PurseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "expense" => Ok(EntryType::Expense),
            "income" => Ok(EntryType::Income),
            _ => Err(PurseError::InvalidEntryType(s.to_string())),
        }
    }
}

impl ToSql for EntryType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for EntryType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        text.parse()
            .map_err(|e: PurseError| FromSqlError::Other(Box::new(e)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub entry_type: EntryType,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: i64,
    pub amount: f64,
    pub description: String,
    pub category_id: i64,
    /// Unix epoch seconds.
    pub date: i64,
    pub entry_type: EntryType,
}

/// A transaction that has not been written to the store yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub amount: f64,
    pub description: String,
    pub category_id: i64,
    pub date: i64,
    pub entry_type: EntryType,
}

/// Anything carrying an epoch-second timestamp can be bucketed by month.
pub trait Dated {
    fn timestamp(&self) -> i64;
}

impl Dated for Transaction {
    fn timestamp(&self) -> i64 {
        self.date
    }
}

/// One calendar month in local time, with inclusive epoch-second bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthBucket {
    pub start: i64,
    pub end: i64,
    pub label: String,
}

impl MonthBucket {
    #[cfg(test)]
    pub fn contains(&self, timestamp: i64) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }
}

/// Income and expense totals for a time range. Both default to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expenses: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthSummary {
    pub bucket: MonthBucket,
    pub totals: Totals,
}

impl MonthSummary {
    pub fn savings(&self) -> f64 {
        self.totals.income - self.totals.expenses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_type_parses_case_insensitively() {
        assert_eq!("expense".parse::<EntryType>().unwrap(), EntryType::Expense);
        assert_eq!("Income".parse::<EntryType>().unwrap(), EntryType::Income);
        assert_eq!(" INCOME ".parse::<EntryType>().unwrap(), EntryType::Income);
    }

    #[test]
    fn test_entry_type_rejects_unknown() {
        let err = "transfer".parse::<EntryType>().unwrap_err();
        assert!(matches!(err, PurseError::InvalidEntryType(s) if s == "transfer"));
    }

    #[test]
    fn test_savings_can_go_negative() {
        let summary = MonthSummary {
            bucket: MonthBucket { start: 0, end: 10, label: "January 1970".into() },
            totals: Totals { income: 50.0, expenses: 80.0 },
        };
        assert_eq!(summary.savings(), -30.0);
    }

    #[test]
    fn test_bucket_bounds_are_inclusive() {
        let bucket = MonthBucket { start: 100, end: 200, label: String::new() };
        assert!(bucket.contains(100));
        assert!(bucket.contains(200));
        assert!(!bucket.contains(201));
        assert!(!bucket.contains(99));
    }
}
