use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod profile {
    use super::*;

    /// A user identity as stored by the backend.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct Profile {
        pub id: String,
        /// Unique, compared case-insensitively. Clients lower-case before
        /// sending lookups.
        pub email: String,
        pub display_name: String,
        /// Opaque image reference (URL) or an inline base64 data string.
        #[serde(default)]
        pub avatar: Option<String>,
        #[serde(default)]
        pub created_at: Option<DateTime<Utc>>,
    }

    /// Partial update of the caller's own profile.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProfileUpdate {
        pub display_name: Option<String>,
        pub avatar: Option<String>,
    }

    /// Request body for fetching a batch of profiles by id.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProfilesLookup {
        pub ids: Vec<String>,
    }

    /// Request body for looking a profile up by email.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ProfileByEmail {
        pub email: String,
    }
}

pub mod auth {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Credentials {
        pub email: String,
        pub password: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SignUp {
        pub email: String,
        pub password: String,
        pub display_name: String,
    }

    /// Response body of a successful sign-in.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct SessionResponse {
        pub user_id: String,
        pub email: String,
        pub access_token: String,
    }
}

pub mod friend {
    use super::*;

    /// Directed friend-request edge between two profiles.
    ///
    /// A pair of users is "friends" exactly when an accepted edge exists in
    /// either direction; the backend enforces at most one edge per unordered
    /// pair.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct FriendRequest {
        pub id: String,
        pub sender_id: String,
        pub receiver_id: String,
        pub status: FriendRequestStatus,
        #[serde(default)]
        pub created_at: Option<DateTime<Utc>>,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum FriendRequestStatus {
        Pending,
        Accepted,
    }

    /// Request body for sending a friend request by email.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct FriendRequestSend {
        pub receiver_email: String,
    }

    /// Request body for listing edges touching a user.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RequestsTouching {
        pub user_id: String,
    }

    /// Request body for removing the edge (in either direction) with another
    /// user.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct Unfriend {
        pub other_user_id: String,
    }
}

pub mod expense {
    use super::*;

    /// The persisted shape of the payer field.
    ///
    /// Old records store a bare profile id meaning "this profile paid the
    /// full amount"; newer records store a map from profile id to the amount
    /// that profile contributed. The ambiguity is resolved into the canonical
    /// map at the normalizer boundary and never leaks past it.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    #[serde(untagged)]
    pub enum PaidBy {
        Single(String),
        Shares(HashMap<String, f64>),
    }

    /// A raw expense record as returned by the backend.
    ///
    /// Historical data may be inconsistent; every field a record can lack is
    /// optional or defaulted so decoding never fails on old rows.
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct StoredExpense {
        pub id: String,
        #[serde(default)]
        pub description: String,
        #[serde(default)]
        pub amount: f64,
        #[serde(default)]
        pub paid_by: Option<PaidBy>,
        #[serde(default)]
        pub split_between: Option<Vec<String>>,
        #[serde(default)]
        pub created_at: Option<DateTime<Utc>>,
        #[serde(default)]
        pub category: Option<String>,
        #[serde(default)]
        pub created_by: Option<String>,
    }

    /// Insert payload for a new expense.
    ///
    /// `paid_by` carries whichever storage form the submission encoder
    /// chose (legacy scalar or structured map).
    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    pub struct ExpenseNew {
        pub description: String,
        pub amount: f64,
        pub paid_by: PaidBy,
        pub split_between: Vec<String>,
        pub category: Option<String>,
        pub created_by: String,
        /// Optional idempotency key for safely retrying the same insert.
        pub idempotency_key: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseCreated {
        pub id: String,
    }

    /// Request body for listing the expenses visible to a user.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpensesVisible {
        pub user_id: String,
    }
}

pub mod extraction {
    use super::*;

    /// A friend candidate handed to the extraction service so it can map
    /// names in the text to profile ids.
    #[derive(Clone, Debug, Serialize, Deserialize)]
    pub struct CandidateFriend {
        pub id: String,
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExtractionRequest {
        pub description: String,
        pub friends: Vec<CandidateFriend>,
        pub user_id: String,
    }

    /// Best-effort structured guess returned by the extraction service.
    ///
    /// Advisory input only: every field may be absent or nonsensical and the
    /// caller falls back to its own defaults.
    #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
    pub struct ExtractionGuess {
        #[serde(default)]
        pub amount: Option<f64>,
        #[serde(default)]
        pub description: Option<String>,
        #[serde(default)]
        pub split_between: Option<Vec<String>>,
        #[serde(default)]
        pub paid_by: Option<HashMap<String, f64>>,
    }
}
