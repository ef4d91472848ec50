use api_types::auth::SessionResponse;
use tokio::sync::watch;

/// An established auth session against the backend.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub access_token: String,
}

impl From<SessionResponse> for Session {
    fn from(resp: SessionResponse) -> Self {
        Session {
            user_id: resp.user_id,
            email: resp.email,
            access_token: resp.access_token,
        }
    }
}

/// Process-wide session state with an explicit lifecycle: established at
/// sign-in, cleared at sign-out, observed by the presentation layer through
/// [`SessionStore::subscribe`].
///
/// Core logic never reads this store; the acting-user id is always passed as
/// a parameter.
#[derive(Clone)]
pub struct SessionStore {
    tx: watch::Sender<Option<Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    pub fn establish(&self, session: Session) {
        let _ = self.tx.send(Some(session));
    }

    pub fn clear(&self) {
        let _ = self.tx.send(None);
    }

    pub fn current(&self) -> Option<Session> {
        self.tx.borrow().clone()
    }

    /// Watch the session lifecycle. Receivers see every establish/clear.
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.tx.subscribe()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(user_id: &str) -> Session {
        Session {
            user_id: user_id.to_string(),
            email: format!("{user_id}@example.com"),
            access_token: "token".to_string(),
        }
    }

    #[tokio::test]
    async fn establish_and_clear_are_observable() {
        let store = SessionStore::new();
        let mut rx = store.subscribe();
        assert_eq!(store.current(), None);

        store.establish(session("a"));
        rx.changed().await.unwrap();
        assert_eq!(
            rx.borrow().as_ref().map(|s| s.user_id.clone()),
            Some("a".to_string())
        );

        store.clear();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
        assert_eq!(store.current(), None);
    }
}
