use chrono::{Local, NaiveDate, TimeZone};

use crate::cli::open_ledger;
use crate::error::{PurseError, Result};
use crate::fmt::money;
use crate::models::EntryType;
use crate::registry::{register_transaction, TransactionDraft};
use crate::settings::load_settings;
use crate::store::SqliteStore;

pub fn run(
    amount: &str,
    entry_type: EntryType,
    category: Option<&str>,
    description: &str,
    date: Option<&str>,
) -> Result<()> {
    let settings = load_settings();
    let conn = open_ledger(&settings)?;
    let store = SqliteStore::new(&conn);

    let timestamp = match date {
        Some(d) => local_noon(d)?,
        None => Local::now().timestamp(),
    };

    let (txn, cat) = register_transaction(
        &store,
        &TransactionDraft {
            amount,
            description,
            category,
            entry_type,
            date: timestamp,
        },
    )?;

    println!(
        "Added {} of {} to {}",
        txn.entry_type.as_str().to_lowercase(),
        money(txn.amount, &settings.currency_symbol),
        cat.name
    );
    Ok(())
}

/// Noon local time on the given `YYYY-MM-DD`, clear of any DST transition.
pub(crate) fn local_noon(date: &str) -> Result<i64> {
    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| PurseError::Other(format!("Invalid date: {date} (expected YYYY-MM-DD)")))?;
    let noon = day
        .and_hms_opt(12, 0, 0)
        .and_then(|dt| Local.from_local_datetime(&dt).earliest())
        .ok_or_else(|| PurseError::Other(format!("Invalid date: {date}")))?;
    Ok(noon.timestamp())
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn test_local_noon() {
        let ts = local_noon("2024-03-15").unwrap();
        let dt = Local.timestamp_opt(ts, 0).unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day(), dt.hour()), (2024, 3, 15, 12));
    }

    #[test]
    fn test_local_noon_rejects_garbage() {
        assert!(local_noon("15/03/2024").is_err());
        assert!(local_noon("2024-02-30").is_err());
    }
}
