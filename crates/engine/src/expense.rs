use std::collections::HashMap;

use api_types::expense::{PaidBy, StoredExpense};
use chrono::{DateTime, Utc};

/// Canonical in-memory expense.
///
/// `paid_by` is always the map form, whatever shape the record was stored
/// in. All downstream logic (balances, display) consumes this shape only.
#[derive(Clone, Debug, PartialEq)]
pub struct Expense {
    pub id: String,
    pub description: String,
    pub amount: f64,
    /// Profile id to the amount that profile contributed. The values summing
    /// to `amount` is a soft invariant enforced at entry time only.
    pub paid_by: HashMap<String, f64>,
    /// Profiles sharing the cost equally.
    pub split_between: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub category: Option<String>,
    pub created_by: Option<String>,
}

impl From<StoredExpense> for Expense {
    /// Normalizes a raw stored record.
    ///
    /// - legacy scalar payer: singleton map `{id: amount}` using the record's
    ///   total amount
    /// - map payer: taken as-is
    /// - absent payer or split: empty map / empty vec
    ///
    /// Malformed input never errors; it degrades to the empty cases so old
    /// records keep loading.
    fn from(stored: StoredExpense) -> Self {
        let paid_by = match stored.paid_by {
            Some(PaidBy::Single(id)) => HashMap::from([(id, stored.amount)]),
            Some(PaidBy::Shares(shares)) => shares,
            None => HashMap::new(),
        };

        Expense {
            id: stored.id,
            description: stored.description,
            amount: stored.amount,
            paid_by,
            split_between: stored.split_between.unwrap_or_default(),
            created_at: stored.created_at,
            category: stored.category,
            created_by: stored.created_by,
        }
    }
}
