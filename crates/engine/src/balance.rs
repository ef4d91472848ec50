use std::collections::HashMap;

use crate::{Expense, Friend};

/// Net balance per friend id. Positive means the friend owes the acting
/// user, negative means the acting user owes the friend.
pub type Balances = HashMap<String, f64>;

/// Computes the acting user's signed net balance against every friend.
///
/// One zero-initialized entry is produced per non-self friend, so a friend
/// untouched by any expense reports exactly `0.0`. Expenses between two
/// third parties are skipped: only debts directly involving the acting user
/// are surfaced, so the result is a per-friend view, not a full pairwise
/// ledger.
///
/// Recomputed from scratch on every call; idempotent and order-independent
/// up to floating-point rounding.
pub fn compute_balances(expenses: &[Expense], friends: &[Friend], user_id: &str) -> Balances {
    let mut balances: Balances = friends
        .iter()
        .filter(|friend| !friend.is_me)
        .map(|friend| (friend.profile.id.clone(), 0.0))
        .collect();

    for expense in expenses {
        // An empty split would divide by zero; it contributes nothing.
        if expense.split_between.is_empty() {
            continue;
        }
        let cost_per_person = expense.amount / expense.split_between.len() as f64;

        for (payer_id, paid) in &expense.paid_by {
            // The payer's fractional share of the total bill. A zero-amount
            // expense attributes nothing to its payers.
            let weight = if expense.amount == 0.0 {
                0.0
            } else {
                paid / expense.amount
            };
            if weight == 0.0 {
                continue;
            }

            for consumer_id in &expense.split_between {
                let chunk = cost_per_person * weight;
                if payer_id == user_id && consumer_id != user_id {
                    if let Some(balance) = balances.get_mut(consumer_id) {
                        *balance += chunk;
                    }
                } else if consumer_id == user_id && payer_id != user_id {
                    if let Some(balance) = balances.get_mut(payer_id) {
                        *balance -= chunk;
                    }
                }
            }
        }
    }

    balances
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_types::profile::Profile;

    fn profile(id: &str) -> Profile {
        Profile {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            display_name: id.to_uppercase(),
            avatar: None,
            created_at: None,
        }
    }

    fn friends(me: &str, others: &[&str]) -> Vec<Friend> {
        let mut out = vec![Friend {
            profile: profile(me),
            is_me: true,
        }];
        out.extend(others.iter().map(|id| Friend {
            profile: profile(id),
            is_me: false,
        }));
        out
    }

    fn expense(amount: f64, paid_by: &[(&str, f64)], split: &[&str]) -> Expense {
        Expense {
            id: "e".to_string(),
            description: String::new(),
            amount,
            paid_by: paid_by
                .iter()
                .map(|(id, paid)| (id.to_string(), *paid))
                .collect(),
            split_between: split.iter().map(|id| id.to_string()).collect(),
            created_at: None,
            category: None,
            created_by: None,
        }
    }

    #[test]
    fn single_payer_three_way_split() {
        let expenses = vec![expense(300.0, &[("a", 300.0)], &["a", "b", "c"])];
        let balances = compute_balances(&expenses, &friends("a", &["b", "c"]), "a");
        assert_eq!(balances["b"], 100.0);
        assert_eq!(balances["c"], 100.0);
    }

    #[test]
    fn acting_user_as_consumer_goes_negative() {
        let expenses = vec![expense(200.0, &[("b", 200.0)], &["a", "b"])];
        let balances = compute_balances(&expenses, &friends("a", &["b"]), "a");
        assert_eq!(balances["b"], -100.0);
    }

    #[test]
    fn offsetting_expenses_net_to_zero() {
        let expenses = vec![
            expense(200.0, &[("a", 200.0)], &["a", "b"]),
            expense(200.0, &[("b", 200.0)], &["a", "b"]),
        ];
        let balances = compute_balances(&expenses, &friends("a", &["b"]), "a");
        assert!(balances["b"].abs() < 0.01);
    }

    #[test]
    fn multi_payer_attribution_is_proportional() {
        // b paid 2/3 of the bill, so a's 100 share owes b ~66.67 and c ~33.33.
        let expenses = vec![expense(300.0, &[("b", 200.0), ("c", 100.0)], &["a", "b", "c"])];
        let balances = compute_balances(&expenses, &friends("a", &["b", "c"]), "a");
        assert!((balances["b"] + 200.0 / 3.0).abs() < 1e-9);
        assert!((balances["c"] + 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn untouched_friend_reports_exact_zero() {
        let expenses = vec![expense(300.0, &[("a", 300.0)], &["a", "b"])];
        let balances = compute_balances(&expenses, &friends("a", &["b", "d"]), "a");
        assert_eq!(balances["d"], 0.0);
        assert!(balances["d"].is_finite());
    }

    #[test]
    fn empty_split_contributes_nothing() {
        let expenses = vec![expense(300.0, &[("a", 300.0)], &[])];
        let balances = compute_balances(&expenses, &friends("a", &["b"]), "a");
        assert_eq!(balances["b"], 0.0);
    }

    #[test]
    fn zero_amount_expense_contributes_nothing() {
        let expenses = vec![expense(0.0, &[("a", 0.0)], &["a", "b"])];
        let balances = compute_balances(&expenses, &friends("a", &["b"]), "a");
        assert_eq!(balances["b"], 0.0);
        assert!(balances["b"].is_finite());
    }

    #[test]
    fn third_party_debts_are_skipped() {
        // b and c split a bill paid by b; a is uninvolved.
        let expenses = vec![expense(100.0, &[("b", 100.0)], &["b", "c"])];
        let balances = compute_balances(&expenses, &friends("a", &["b", "c"]), "a");
        assert_eq!(balances["b"], 0.0);
        assert_eq!(balances["c"], 0.0);
    }

    #[test]
    fn recomputation_is_idempotent() {
        let expenses = vec![
            expense(300.0, &[("a", 300.0)], &["a", "b", "c"]),
            expense(90.0, &[("b", 60.0), ("c", 30.0)], &["a", "b", "c"]),
        ];
        let friend_set = friends("a", &["b", "c"]);
        let first = compute_balances(&expenses, &friend_set, "a");
        let second = compute_balances(&expenses, &friend_set, "a");
        assert_eq!(first, second);
    }
}
