//! HTTP client for the subscriptions endpoint.

use async_trait::async_trait;
use log::debug;
use log::info;
use reqwest::Response;
use reqwest::StatusCode;
use serde_json::Value;

use crate::api::SubscriptionBackend;
use crate::api::error::ApiError;
use crate::api::model::ListResponse;
use crate::api::model::Subscription;
use crate::api::model::SubscriptionDraft;

/// Client for the `/subscriptions` collection of the tracker API.
///
/// Every call is a single request with no retries and no client-side cache;
/// callers re-fetch the collection whenever they need a fresh view.
#[derive(Clone)]
pub struct SubscriptionApi {
    client: reqwest::Client,
    base_url: String,
}

impl SubscriptionApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/subscriptions", self.base_url)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/subscriptions/{}", self.base_url, id)
    }

    /// Maps a non-2xx response to an `ApiError`.
    ///
    /// The server reports validation failures as `{"errors": [...]}` and
    /// everything else as `{"error": "..."}`; bodies that match neither shape
    /// collapse into `UnexpectedStatus`.
    async fn error_from_response(resp: Response) -> ApiError {
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            return ApiError::Unauthorized;
        }

        let body = resp.json::<Value>().await.ok();
        Self::error_from_body(status.as_u16(), body)
    }

    fn error_from_body(status: u16, body: Option<Value>) -> ApiError {
        if let Some(body) = body {
            if let Some(errors) = body.get("errors").and_then(|v| v.as_array()) {
                let messages: Vec<String> = errors
                    .iter()
                    .filter_map(|v| v.as_str())
                    .map(String::from)
                    .collect();
                if !messages.is_empty() {
                    return ApiError::Validation { messages };
                }
            }

            if let Some(message) = body.get("error").and_then(|v| v.as_str()) {
                return ApiError::Server {
                    message: message.to_string(),
                };
            }
        }

        ApiError::UnexpectedStatus { status }
    }

    async fn parse_body<T: serde::de::DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
        let text = resp.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[async_trait]
impl SubscriptionBackend for SubscriptionApi {
    async fn list(&self) -> Result<Vec<Subscription>, ApiError> {
        debug!("Fetching subscription list");

        let resp = self.client.get(self.collection_url()).send().await?;
        if !resp.status().is_success() {
            return Err(Self::error_from_response(resp).await);
        }

        let data: ListResponse = Self::parse_body(resp).await?;
        debug!("Fetched {} subscriptions", data.subscriptions.len());
        Ok(data.subscriptions)
    }

    async fn get(&self, id: i64) -> Result<Subscription, ApiError> {
        debug!("Fetching subscription {id}");

        let resp = self.client.get(self.item_url(id)).send().await?;
        if !resp.status().is_success() {
            return Err(Self::error_from_response(resp).await);
        }

        Self::parse_body(resp).await
    }

    async fn create(&self, draft: &SubscriptionDraft) -> Result<Subscription, ApiError> {
        let resp = self
            .client
            .post(self.collection_url())
            .json(draft)
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(Self::error_from_response(resp).await);
        }

        let created: Subscription = Self::parse_body(resp).await?;
        info!("Created subscription {} ({})", created.id, created.name);
        Ok(created)
    }

    async fn update(&self, id: i64, draft: &SubscriptionDraft) -> Result<Subscription, ApiError> {
        let resp = self.client.put(self.item_url(id)).json(draft).send().await?;
        if !resp.status().is_success() {
            return Err(Self::error_from_response(resp).await);
        }

        let updated: Subscription = Self::parse_body(resp).await?;
        info!("Updated subscription {id}");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> Result<(), ApiError> {
        let resp = self.client.delete(self.item_url(id)).send().await?;
        if !resp.status().is_success() {
            return Err(Self::error_from_response(resp).await);
        }

        info!("Deleted subscription {id}");
        Ok(())
    }
}
