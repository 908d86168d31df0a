// src/output/webhook.rs
//! Discord-style webhook publishing.

use crate::constants::{
    DIGEST_EMBED_COLOR, DIGEST_TITLE, EMBED_DESCRIPTION_MAX_CHARS, HTTP_REQUEST_TIMEOUT_SECS,
};
use crate::error::{preview_body, AppError};
use crate::types::{RenderedDigest, ValidatedUrl};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Webhook request body: an empty plain-text message with one embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub content: String,
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
}

impl WebhookPayload {
    /// Wraps a digest in the single-embed envelope.
    pub fn for_digest(digest: &RenderedDigest) -> Self {
        Self {
            content: String::new(),
            embeds: vec![Embed {
                title: DIGEST_TITLE.to_string(),
                description: fit_description(digest.as_str()),
                color: DIGEST_EMBED_COLOR,
            }],
        }
    }
}

/// Cuts a description down to the embed limit, marking the cut with `…`.
fn fit_description(text: &str) -> String {
    if text.chars().count() <= EMBED_DESCRIPTION_MAX_CHARS {
        return text.to_string();
    }
    log::warn!(
        "Digest exceeds {} characters, truncating embed description",
        EMBED_DESCRIPTION_MAX_CHARS
    );
    let mut cut: String = text.chars().take(EMBED_DESCRIPTION_MAX_CHARS - 1).collect();
    cut.push('…');
    cut
}

/// Posts digests to a webhook URL.
#[derive(Clone)]
pub struct WebhookPublisher {
    client: Client,
}

impl WebhookPublisher {
    pub fn new() -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client })
    }

    /// Posts the digest once. Any non-success status is an error.
    pub async fn publish(
        &self,
        url: &ValidatedUrl,
        digest: &RenderedDigest,
    ) -> Result<StatusCode, AppError> {
        let payload = WebhookPayload::for_digest(digest);
        log::debug!("POST webhook ({} chars)", digest.as_str().chars().count());

        let response = self
            .client
            .post(url.as_str())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::WebhookRejected {
                status,
                body: preview_body(&body),
            });
        }

        Ok(status)
    }
}
