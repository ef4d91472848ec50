use std::collections::HashMap;

use api_types::expense::ExpenseNew;
use api_types::extraction::ExtractionGuess;

use crate::{EngineError, Friend, encode_paid_by};

/// A user-editable expense draft.
///
/// Produced either by the manual entry form or from an extraction guess, and
/// turned into an insert payload once validated.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: f64,
    pub paid_by: HashMap<String, f64>,
    pub split_between: Vec<String>,
    pub category: Option<String>,
}

impl ExpenseDraft {
    /// Draft with the acting user paying the full amount, split across the
    /// given ids. The common single-payer entry path.
    pub fn single_payer(
        description: &str,
        amount: f64,
        split_between: Vec<String>,
        user_id: &str,
    ) -> Self {
        ExpenseDraft {
            description: description.to_string(),
            amount,
            paid_by: HashMap::from([(user_id.to_string(), amount)]),
            split_between,
            category: None,
        }
    }

    /// Builds a complete draft from a best-effort extraction guess.
    ///
    /// The guess is advisory only. Fallbacks for absent or useless fields:
    /// - description: the raw input text
    /// - amount: 0 (the form requires the user to fill it in)
    /// - split: every friend, acting user included; guessed ids not in the
    ///   friend list are dropped first
    /// - payers: the acting user as sole payer of the full amount
    pub fn from_guess(
        guess: ExtractionGuess,
        raw_description: &str,
        friends: &[Friend],
        user_id: &str,
    ) -> Self {
        let amount = guess
            .amount
            .filter(|amount| amount.is_finite() && *amount > 0.0)
            .unwrap_or(0.0);

        let description = guess
            .description
            .filter(|description| !description.trim().is_empty())
            .unwrap_or_else(|| raw_description.to_string());

        let split_between = {
            let known: Vec<String> = guess
                .split_between
                .unwrap_or_default()
                .into_iter()
                .filter(|id| friends.iter().any(|friend| friend.profile.id == *id))
                .collect();
            if known.is_empty() {
                friends
                    .iter()
                    .map(|friend| friend.profile.id.clone())
                    .collect()
            } else {
                known
            }
        };

        let paid_by = match guess.paid_by {
            Some(pairs) if !pairs.is_empty() => pairs
                .into_iter()
                .filter(|(_, paid)| paid.is_finite())
                .collect(),
            _ => HashMap::from([(user_id.to_string(), amount)]),
        };

        ExpenseDraft {
            description,
            amount,
            paid_by,
            split_between,
            category: None,
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(EngineError::InvalidAmount(format!(
                "amount must be positive, got {}",
                self.amount
            )));
        }
        if self.split_between.is_empty() {
            return Err(EngineError::EmptySplit);
        }
        Ok(())
    }

    /// Validates and encodes the draft into the insert payload, routing the
    /// payer map through the submission encoder.
    pub fn into_new(self, created_by: &str) -> Result<ExpenseNew, EngineError> {
        self.validate()?;
        Ok(ExpenseNew {
            paid_by: encode_paid_by(&self.paid_by, self.amount),
            description: self.description,
            amount: self.amount,
            split_between: self.split_between,
            category: self.category,
            created_by: created_by.to_string(),
            idempotency_key: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_types::expense::PaidBy;
    use api_types::profile::Profile;

    fn friend(id: &str, is_me: bool) -> Friend {
        Friend {
            profile: Profile {
                id: id.to_string(),
                email: format!("{id}@example.com"),
                display_name: id.to_uppercase(),
                avatar: None,
                created_at: None,
            },
            is_me,
        }
    }

    fn friend_set() -> Vec<Friend> {
        vec![friend("a", true), friend("b", false), friend("c", false)]
    }

    #[test]
    fn empty_guess_falls_back_to_defaults() {
        let draft =
            ExpenseDraft::from_guess(ExtractionGuess::default(), "pizza night", &friend_set(), "a");
        assert_eq!(draft.description, "pizza night");
        assert_eq!(draft.amount, 0.0);
        assert_eq!(
            draft.split_between,
            vec!["a".to_string(), "b".to_string(), "c".to_string()]
        );
        assert_eq!(draft.paid_by, HashMap::from([("a".to_string(), 0.0)]));
    }

    #[test]
    fn guessed_fields_are_kept_when_usable() {
        let guess = ExtractionGuess {
            amount: Some(42.5),
            description: Some("pizza".to_string()),
            split_between: Some(vec!["a".to_string(), "b".to_string()]),
            paid_by: Some(HashMap::from([("b".to_string(), 42.5)])),
        };
        let draft = ExpenseDraft::from_guess(guess, "ignored", &friend_set(), "a");
        assert_eq!(draft.amount, 42.5);
        assert_eq!(draft.description, "pizza");
        assert_eq!(draft.split_between, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(draft.paid_by, HashMap::from([("b".to_string(), 42.5)]));
    }

    #[test]
    fn unknown_guessed_split_ids_are_dropped() {
        let guess = ExtractionGuess {
            split_between: Some(vec!["b".to_string(), "stranger".to_string()]),
            ..ExtractionGuess::default()
        };
        let draft = ExpenseDraft::from_guess(guess, "lunch", &friend_set(), "a");
        assert_eq!(draft.split_between, vec!["b".to_string()]);
    }

    #[test]
    fn all_unknown_split_ids_fall_back_to_full_friend_list() {
        let guess = ExtractionGuess {
            split_between: Some(vec!["stranger".to_string()]),
            ..ExtractionGuess::default()
        };
        let draft = ExpenseDraft::from_guess(guess, "lunch", &friend_set(), "a");
        assert_eq!(draft.split_between.len(), 3);
    }

    #[test]
    fn validate_rejects_zero_amount_and_empty_split() {
        let mut draft = ExpenseDraft::single_payer("x", 0.0, vec!["a".to_string()], "a");
        assert!(matches!(
            draft.validate(),
            Err(EngineError::InvalidAmount(_))
        ));

        draft.amount = 10.0;
        draft.split_between.clear();
        assert_eq!(draft.validate(), Err(EngineError::EmptySplit));
    }

    #[test]
    fn into_new_routes_single_full_payer_to_scalar() {
        let draft =
            ExpenseDraft::single_payer("dinner", 300.0, vec!["a".to_string(), "b".to_string()], "a");
        let payload = draft.into_new("a").unwrap();
        assert_eq!(payload.paid_by, PaidBy::Single("a".to_string()));
        assert_eq!(payload.created_by, "a");
    }

    #[test]
    fn into_new_keeps_multi_payer_map() {
        let draft = ExpenseDraft {
            description: "dinner".to_string(),
            amount: 300.0,
            paid_by: HashMap::from([("a".to_string(), 150.0), ("b".to_string(), 150.0)]),
            split_between: vec!["a".to_string(), "b".to_string()],
            category: None,
        };
        let payload = draft.clone().into_new("a").unwrap();
        assert_eq!(payload.paid_by, PaidBy::Shares(draft.paid_by));
    }
}
