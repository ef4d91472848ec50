use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use engine::{Balances, Expense, Friend, PendingRequests, compute_balances, derive_friends,
             pending_requests};
use tokio::sync::Mutex;

use crate::api::{ApiClient, ApiError};
use crate::session::Session;

/// One consistent view of the acting user's data, rebuilt on every refresh.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub friends: Vec<Friend>,
    pub pending: PendingRequests,
    pub expenses: Vec<Expense>,
    pub balances: Balances,
    pub refreshed_at: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("own profile {0} missing from backend response")]
    MissingOwnProfile(String),
}

/// Fetches, normalizes and snapshots the acting user's graph.
///
/// A failed refresh leaves the previous snapshot untouched; the snapshot is
/// only swapped once the whole fetch-normalize-compute pipeline succeeded.
/// Writes are never applied optimistically: an insert or delete only shows
/// up through the next successful refresh.
#[derive(Clone)]
pub struct Store {
    api: ApiClient,
    snapshot: Arc<Mutex<Option<Snapshot>>>,
}

impl Store {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            snapshot: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn latest(&self) -> Option<Snapshot> {
        self.snapshot.lock().await.clone()
    }

    pub async fn refresh(&self, session: &Session) -> Result<Snapshot, StoreError> {
        let user_id = session.user_id.as_str();

        let requests = self.api.friend_requests_touching(session, user_id).await?;

        let mut ids: HashSet<String> = HashSet::from([user_id.to_string()]);
        for request in &requests {
            ids.insert(request.sender_id.clone());
            ids.insert(request.receiver_id.clone());
        }
        let profiles = self
            .api
            .profiles_for(session, ids.into_iter().collect())
            .await?;

        let me = profiles
            .iter()
            .find(|profile| profile.id == user_id)
            .cloned()
            .ok_or_else(|| StoreError::MissingOwnProfile(user_id.to_string()))?;

        let friends = derive_friends(&me, &profiles, &requests);
        let pending = pending_requests(user_id, &requests);

        let stored = self.api.expenses_visible_to(session, user_id).await?;
        let expenses: Vec<Expense> = stored.into_iter().map(Expense::from).collect();
        let balances = compute_balances(&expenses, &friends, user_id);

        let snapshot = Snapshot {
            friends,
            pending,
            expenses,
            balances,
            refreshed_at: Utc::now(),
        };

        tracing::debug!(
            friends = snapshot.friends.len(),
            expenses = snapshot.expenses.len(),
            "refreshed snapshot"
        );

        let mut guard = self.snapshot.lock().await;
        *guard = Some(snapshot.clone());
        Ok(snapshot)
    }
}
