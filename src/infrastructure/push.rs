use crate::domain::push::{MulticastOutcome, PushMessage, PushProvider};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Errors that mean the token will never be deliverable again
const INVALID_TOKEN_ERRORS: &[&str] = &["NotRegistered", "InvalidRegistration", "MismatchSenderId"];

/// Multicast client for an FCM-compatible HTTP push endpoint
#[derive(Clone)]
pub struct HttpPushClient {
    http_client: reqwest::Client,
    api_url: String,
    server_key: String,
}

#[derive(Serialize)]
struct MulticastRequest<'a> {
    registration_ids: &'a [String],
    notification: PushNotificationBody<'a>,
    data: &'a BTreeMap<String, String>,
}

#[derive(Serialize)]
struct PushNotificationBody<'a> {
    title: &'a str,
    body: &'a str,
}

#[derive(Debug, Deserialize)]
struct MulticastResponse {
    #[serde(default)]
    success: usize,
    #[serde(default)]
    failure: usize,
    #[serde(default)]
    results: Vec<MulticastResult>,
}

#[derive(Debug, Deserialize)]
struct MulticastResult {
    error: Option<String>,
}

impl HttpPushClient {
    pub fn new(api_url: String, server_key: String) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build push HTTP client: {}", e))?;

        Ok(Self {
            http_client,
            api_url,
            server_key,
        })
    }
}

fn outcome_from_response(tokens: &[String], response: MulticastResponse) -> MulticastOutcome {
    let invalid_tokens = tokens
        .iter()
        .zip(response.results.iter())
        .filter(|(_, result)| {
            result
                .error
                .as_deref()
                .is_some_and(|e| INVALID_TOKEN_ERRORS.contains(&e))
        })
        .map(|(token, _)| token.clone())
        .collect();

    MulticastOutcome {
        success_count: response.success,
        failure_count: response.failure,
        invalid_tokens,
    }
}

#[async_trait]
impl PushProvider for HttpPushClient {
    #[tracing::instrument(skip(self, message), fields(recipients = message.tokens.len()))]
    async fn send_multicast(
        &self,
        message: &PushMessage,
    ) -> Result<MulticastOutcome, anyhow::Error> {
        let request = MulticastRequest {
            registration_ids: &message.tokens,
            notification: PushNotificationBody {
                title: &message.title,
                body: &message.body,
            },
            data: &message.data,
        };

        let response = self
            .http_client
            .post(&self.api_url)
            .header("Authorization", format!("key={}", self.server_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to reach push provider: {}", e))?
            .error_for_status()
            .map_err(|e| anyhow::anyhow!("Push provider returned error: {}", e))?
            .json::<MulticastResponse>()
            .await
            .map_err(|e| anyhow::anyhow!("Invalid push provider response: {}", e))?;

        Ok(outcome_from_response(&message.tokens, response))
    }
}

/// Used when no push credentials are configured; only logs
#[derive(Clone, Default)]
pub struct LogPushProvider;

#[async_trait]
impl PushProvider for LogPushProvider {
    async fn send_multicast(
        &self,
        message: &PushMessage,
    ) -> Result<MulticastOutcome, anyhow::Error> {
        tracing::info!(
            recipients = message.tokens.len(),
            title = %message.title,
            "Push provider not configured, skipping send"
        );

        Ok(MulticastOutcome {
            success_count: message.tokens.len(),
            ..Default::default()
        })
    }
}
