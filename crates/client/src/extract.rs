use api_types::extraction::{CandidateFriend, ExtractionGuess, ExtractionRequest};
use engine::{ExpenseDraft, Friend};
use reqwest::Client;

use crate::api::ApiError;

/// Client for the free-text extraction service.
///
/// The service's output is advisory only: any failure or partial response
/// degrades to the engine's documented defaults, so the worst case is a
/// blank draft for manual entry.
#[derive(Clone, Debug)]
pub struct ExtractionClient {
    client: Client,
    base_url: String,
}

impl ExtractionClient {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Turns a free-text description into a complete expense draft.
    pub async fn draft_from_text(
        &self,
        description: &str,
        friends: &[Friend],
        user_id: &str,
    ) -> ExpenseDraft {
        let guess = match self.request_guess(description, friends, user_id).await {
            Ok(guess) => guess,
            Err(err) => {
                tracing::warn!("extraction failed, falling back to a manual draft: {err}");
                ExtractionGuess::default()
            }
        };
        ExpenseDraft::from_guess(guess, description, friends, user_id)
    }

    async fn request_guess(
        &self,
        description: &str,
        friends: &[Friend],
        user_id: &str,
    ) -> Result<ExtractionGuess, ApiError> {
        let request = ExtractionRequest {
            description: description.to_string(),
            friends: friends
                .iter()
                .map(|friend| CandidateFriend {
                    id: friend.profile.id.clone(),
                    name: friend.profile.display_name.clone(),
                })
                .collect(),
            user_id: user_id.to_string(),
        };

        let resp = self
            .client
            .post(format!("{}/extract", self.base_url.trim_end_matches('/')))
            .json(&request)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Server {
                status,
                message: "extraction service error".to_string(),
            });
        }

        // Every guess field is optional, so a partial answer still decodes;
        // a completely unparseable body counts as no guess at all.
        Ok(resp.json::<ExtractionGuess>().await.unwrap_or_default())
    }
}
