use regex::Regex;

use crate::error::{PurseError, Result};
use crate::models::{Category, EntryType, NewTransaction, Transaction};
use crate::store::LedgerStore;

#[derive(Debug, Clone, PartialEq)]
pub enum CategoryOutcome {
    Created(Category),
    /// A category with this exact name already exists for the type.
    Duplicate,
}

/// Add a category unless one with the same name (case-sensitive) already
/// exists among the categories of the same type.
pub fn register_category<S: LedgerStore + ?Sized>(
    store: &S,
    name: &str,
    entry_type: EntryType,
) -> Result<CategoryOutcome> {
    if name.trim().is_empty() {
        return Err(PurseError::Other("Category name is required".into()));
    }
    let existing = store.categories_by_type(entry_type)?;
    if existing.iter().any(|c| c.name == name) {
        tracing::info!(name, %entry_type, "rejected duplicate category");
        return Ok(CategoryOutcome::Duplicate);
    }
    let category = store.insert_category(name, entry_type)?;
    Ok(CategoryOutcome::Created(category))
}

/// Leading currency symbols accepted in front of an amount.
const CURRENCY_SYMBOLS: &[char] = &['₹', '$', '€', '£', '¥'];

// Plain digits with an optional fraction, or digits grouped in threes by commas.
const AMOUNT_PATTERN: &str = r"^(\d+(\.\d*)?|\.\d+|\d{1,3}(,\d{3})+(\.\d*)?)$";

/// Parse user-entered money such as `12.50` or `₹1,250.00`.
///
/// Surrounding whitespace, one leading currency symbol and well-placed
/// thousands separators are accepted. Anything else (signs, exponents,
/// letters, misplaced commas) is rejected, as is a value that is not
/// strictly positive.
pub fn parse_amount(input: &str) -> Result<f64> {
    let invalid = || PurseError::InvalidAmount(input.to_string());

    let trimmed = input.trim();
    let unsigned = trimmed.strip_prefix(CURRENCY_SYMBOLS).unwrap_or(trimmed).trim_start();

    let re = Regex::new(AMOUNT_PATTERN).map_err(|e| PurseError::Other(e.to_string()))?;
    if !re.is_match(unsigned) {
        return Err(invalid());
    }

    match unsigned.replace(',', "").parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(invalid()),
    }
}

/// Pick the category a new transaction is filed under: the named one within
/// `entry_type`, or the first category of that type when no name is given.
pub fn resolve_category<S: LedgerStore + ?Sized>(
    store: &S,
    entry_type: EntryType,
    name: Option<&str>,
) -> Result<Category> {
    let categories = store.categories_by_type(entry_type)?;
    let found = match name {
        Some(n) => categories.into_iter().find(|c| c.name == n),
        None => categories.into_iter().next(),
    };
    found.ok_or_else(|| {
        PurseError::UnknownCategory(match name {
            Some(n) => format!("{n} ({entry_type})"),
            None => format!("no {entry_type} categories exist"),
        })
    })
}

pub struct TransactionDraft<'a> {
    pub amount: &'a str,
    pub description: &'a str,
    pub category: Option<&'a str>,
    pub entry_type: EntryType,
    /// Unix epoch seconds.
    pub date: i64,
}

pub fn register_transaction<S: LedgerStore + ?Sized>(
    store: &S,
    draft: &TransactionDraft<'_>,
) -> Result<(Transaction, Category)> {
    let amount = parse_amount(draft.amount)?;
    let category = resolve_category(store, draft.entry_type, draft.category)?;
    let txn = store.insert_transaction(&NewTransaction {
        amount,
        description: draft.description.to_string(),
        category_id: category.id,
        date: draft.date,
        entry_type: draft.entry_type,
    })?;
    tracing::info!(id = txn.id, category = %category.name, "recorded transaction");
    Ok((txn, category))
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use super::*;
    use crate::db::{get_connection, init_db, DB_FILE};
    use crate::store::SqliteStore;

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join(DB_FILE)).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    #[test]
    fn test_duplicate_name_same_type_is_rejected() {
        let (_dir, conn) = test_db();
        let store = SqliteStore::new(&conn);
        let outcome = register_category(&store, "Food", EntryType::Expense).unwrap();
        assert_eq!(outcome, CategoryOutcome::Duplicate);
        let foods = store
            .categories_by_type(EntryType::Expense)
            .unwrap()
            .into_iter()
            .filter(|c| c.name == "Food")
            .count();
        assert_eq!(foods, 1);
    }

    #[test]
    fn test_same_name_other_type_is_accepted() {
        let (_dir, conn) = test_db();
        let store = SqliteStore::new(&conn);
        let outcome = register_category(&store, "Food", EntryType::Income).unwrap();
        match outcome {
            CategoryOutcome::Created(cat) => {
                assert_eq!(cat.name, "Food");
                assert_eq!(cat.entry_type, EntryType::Income);
            }
            CategoryOutcome::Duplicate => panic!("expected Food/Income to be created"),
        }
    }

    #[test]
    fn test_category_match_is_case_sensitive() {
        let (_dir, conn) = test_db();
        let store = SqliteStore::new(&conn);
        let outcome = register_category(&store, "food", EntryType::Expense).unwrap();
        assert!(matches!(outcome, CategoryOutcome::Created(_)));
    }

    #[test]
    fn test_blank_category_name_is_an_error() {
        let (_dir, conn) = test_db();
        let store = SqliteStore::new(&conn);
        assert!(register_category(&store, "   ", EntryType::Expense).is_err());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("42").unwrap(), 42.0);
        assert_eq!(parse_amount("12.50").unwrap(), 12.5);
        assert_eq!(parse_amount("₹1,250.00").unwrap(), 1250.0);
        assert_eq!(parse_amount(" 7 ").unwrap(), 7.0);
        assert_eq!(parse_amount("$ 3.").unwrap(), 3.0);
        assert_eq!(parse_amount(".5").unwrap(), 0.5);
        assert_eq!(parse_amount("1,000,000").unwrap(), 1_000_000.0);
    }

    #[test]
    fn test_parse_amount_rejects_bad_input() {
        for bad in [
            "", "abc", "0", "0.00", "1.2.3", ".", "-", "-5", "+5", "5-", "1e3", "1,5", "12abc",
            "1,2345", ",100", "₹₹5", "5₹", "inf", "NaN",
        ] {
            assert!(
                matches!(parse_amount(bad), Err(PurseError::InvalidAmount(_))),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_register_transaction_defaults_to_first_category() {
        let (_dir, conn) = test_db();
        let store = SqliteStore::new(&conn);
        let (txn, category) = register_transaction(
            &store,
            &TransactionDraft {
                amount: "3000",
                description: "March pay",
                category: None,
                entry_type: EntryType::Income,
                date: 1_700_000_000,
            },
        )
        .unwrap();
        assert_eq!(category.name, "Salary");
        assert_eq!(txn.category_id, category.id);
        assert_eq!(txn.amount, 3000.0);
        assert_eq!(txn.entry_type, EntryType::Income);
        assert_eq!(store.transactions_newest_first().unwrap(), vec![txn]);
    }

    #[test]
    fn test_register_transaction_unknown_category() {
        let (_dir, conn) = test_db();
        let store = SqliteStore::new(&conn);
        let err = register_transaction(
            &store,
            &TransactionDraft {
                amount: "5",
                description: "",
                category: Some("Salary"),
                entry_type: EntryType::Expense,
                date: 0,
            },
        )
        .unwrap_err();
        assert!(matches!(err, PurseError::UnknownCategory(_)));
    }

    #[test]
    fn test_invalid_amount_writes_nothing() {
        let (_dir, conn) = test_db();
        let store = SqliteStore::new(&conn);
        let res = register_transaction(
            &store,
            &TransactionDraft {
                amount: "",
                description: "",
                category: None,
                entry_type: EntryType::Expense,
                date: 0,
            },
        );
        assert!(res.is_err());
        assert!(store.transactions_newest_first().unwrap().is_empty());
    }
}
