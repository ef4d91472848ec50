use api_types::auth::{Credentials, SessionResponse, SignUp};
use api_types::expense::{ExpenseCreated, ExpenseNew, ExpensesVisible, StoredExpense};
use api_types::friend::{FriendRequest, FriendRequestSend, RequestsTouching, Unfriend};
use api_types::profile::{Profile, ProfileByEmail, ProfileUpdate, ProfilesLookup};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use engine::normalize_email;

use crate::session::Session;

/// HTTP client for the persistence/identity backend.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("{status}: {message}")]
    Server { status: StatusCode, message: String },
}

impl ApiClient {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn post_json<TReq: serde::Serialize + ?Sized, TResp: for<'de> serde::Deserialize<'de>>(
        &self,
        token: Option<&str>,
        path: &str,
        body: &TReq,
    ) -> Result<TResp, ApiError> {
        let mut req = self.client.post(self.url(path)).json(body);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp.json::<TResp>().await?);
        }

        let message = match resp.json::<ErrorBody>().await {
            Ok(err) => err.error,
            Err(_) => "server error".to_string(),
        };
        Err(ApiError::Server { status, message })
    }

    async fn post_json_unit<TReq: serde::Serialize + ?Sized>(
        &self,
        token: Option<&str>,
        path: &str,
        body: &TReq,
    ) -> Result<(), ApiError> {
        let mut req = self.client.post(self.url(path)).json(body);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let message = match resp.json::<ErrorBody>().await {
            Ok(err) => err.error,
            Err(_) => "server error".to_string(),
        };
        Err(ApiError::Server { status, message })
    }

    // Auth.

    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Session, ApiError> {
        let resp: SessionResponse = self
            .post_json(
                None,
                "/auth/sign_up",
                &SignUp {
                    email: normalize_email(email),
                    password: password.to_string(),
                    display_name: display_name.to_string(),
                },
            )
            .await?;
        Ok(Session::from(resp))
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let resp: SessionResponse = self
            .post_json(
                None,
                "/auth/sign_in",
                &Credentials {
                    email: normalize_email(email),
                    password: password.to_string(),
                },
            )
            .await?;
        Ok(Session::from(resp))
    }

    pub async fn sign_out(&self, session: &Session) -> Result<(), ApiError> {
        self.post_json_unit(
            Some(&session.access_token),
            "/auth/sign_out",
            &serde_json::json!({}),
        )
        .await
    }

    // Profiles.

    pub async fn profiles_for(
        &self,
        session: &Session,
        ids: Vec<String>,
    ) -> Result<Vec<Profile>, ApiError> {
        self.post_json(
            Some(&session.access_token),
            "/profiles/lookup",
            &ProfilesLookup { ids },
        )
        .await
    }

    pub async fn profile_by_email(
        &self,
        session: &Session,
        email: &str,
    ) -> Result<Profile, ApiError> {
        self.post_json(
            Some(&session.access_token),
            "/profiles/by_email",
            &ProfileByEmail {
                email: normalize_email(email),
            },
        )
        .await
    }

    /// Updates the caller's own display name and/or avatar.
    pub async fn update_profile(
        &self,
        session: &Session,
        display_name: Option<String>,
        avatar: Option<String>,
    ) -> Result<Profile, ApiError> {
        self.post_json(
            Some(&session.access_token),
            "/profiles/update",
            &ProfileUpdate {
                display_name,
                avatar,
            },
        )
        .await
    }

    // Friend requests.

    pub async fn friend_requests_touching(
        &self,
        session: &Session,
        user_id: &str,
    ) -> Result<Vec<FriendRequest>, ApiError> {
        self.post_json(
            Some(&session.access_token),
            "/friend_requests/touching",
            &RequestsTouching {
                user_id: user_id.to_string(),
            },
        )
        .await
    }

    pub async fn send_friend_request(
        &self,
        session: &Session,
        receiver_email: &str,
    ) -> Result<FriendRequest, ApiError> {
        self.post_json(
            Some(&session.access_token),
            "/friend_requests/send",
            &FriendRequestSend {
                receiver_email: normalize_email(receiver_email),
            },
        )
        .await
    }

    pub async fn accept_friend_request(
        &self,
        session: &Session,
        request_id: &str,
    ) -> Result<(), ApiError> {
        self.post_json_unit(
            Some(&session.access_token),
            &format!("/friend_requests/{request_id}/accept"),
            &serde_json::json!({}),
        )
        .await
    }

    /// Removes the friend edge with another user, whichever direction it was
    /// created in.
    pub async fn unfriend(&self, session: &Session, other_user_id: &str) -> Result<(), ApiError> {
        self.post_json_unit(
            Some(&session.access_token),
            "/friend_requests/unfriend",
            &Unfriend {
                other_user_id: other_user_id.to_string(),
            },
        )
        .await
    }

    // Expenses.

    pub async fn expenses_visible_to(
        &self,
        session: &Session,
        user_id: &str,
    ) -> Result<Vec<StoredExpense>, ApiError> {
        self.post_json(
            Some(&session.access_token),
            "/expenses/visible",
            &ExpensesVisible {
                user_id: user_id.to_string(),
            },
        )
        .await
    }

    pub async fn insert_expense(
        &self,
        session: &Session,
        mut expense: ExpenseNew,
    ) -> Result<ExpenseCreated, ApiError> {
        if expense.idempotency_key.is_none() {
            expense.idempotency_key = Some(uuid::Uuid::new_v4().to_string());
        }
        self.post_json(Some(&session.access_token), "/expenses", &expense)
            .await
    }

    pub async fn delete_expense(&self, session: &Session, expense_id: &str) -> Result<(), ApiError> {
        let req = self
            .client
            .delete(self.url(&format!("/expenses/{expense_id}")))
            .bearer_auth(&session.access_token);

        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let message = match resp.json::<ErrorBody>().await {
            Ok(err) => err.error,
            Err(_) => "server error".to_string(),
        };
        Err(ApiError::Server { status, message })
    }
}
