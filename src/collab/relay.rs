//! Client side of the model relay.
//!
//! The relay accepts a messages request, attaches credentials and forwards it
//! upstream, then returns the upstream JSON verbatim. From here it is just:
//! prompt plus image in, reply text or an error out.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::artwork::EncodedImage;
use crate::config::RelayConfig;

/// One round trip to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayRequest {
    pub prompt: String,
    pub image: EncodedImage,
    pub max_tokens: u32,
}

/// Errors returned by the relay boundary.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("API request failed with status: {status}")]
    Status { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API Error: {0}")]
    Upstream(String),

    #[error("Unexpected response format: {0}")]
    UnexpectedFormat(String),

    #[error("Invalid JSON in response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Abstraction over the relay so the orchestrator can be driven by fakes in tests.
#[async_trait]
pub trait Relay: Send + Sync {
    async fn complete(&self, request: RelayRequest) -> Result<String, RelayError>;
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: [ContentBlock<'a>; 2],
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum ContentBlock<'a> {
    Text { text: &'a str },
    Image { source: ImageBlockSource<'a> },
}

#[derive(Serialize)]
struct ImageBlockSource<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    media_type: &'a str,
    data: &'a str,
}

/// Builds the body posted to the relay.
fn request_body<'a>(model: &'a str, request: &'a RelayRequest) -> MessagesRequest<'a> {
    MessagesRequest {
        model,
        max_tokens: request.max_tokens,
        messages: [Message {
            role: "user",
            content: [
                ContentBlock::Text {
                    text: &request.prompt,
                },
                ContentBlock::Image {
                    source: ImageBlockSource {
                        kind: "base64",
                        media_type: &request.image.media_type,
                        data: &request.image.data,
                    },
                },
            ],
        }],
    }
}

/// Interprets a relay reply: the first content block's text on success.
pub fn interpret_response(status: u16, body: &str) -> Result<String, RelayError> {
    if !(200..300).contains(&status) {
        return Err(RelayError::Status {
            status,
            body: body.to_string(),
        });
    }

    let data: Value = serde_json::from_str(body)?;
    if let Some(text) = data
        .get("content")
        .and_then(|content| content.get(0))
        .and_then(|block| block.get("text"))
        .and_then(Value::as_str)
    {
        return Ok(text.to_string());
    }

    match data.get("error") {
        Some(error) => Err(RelayError::Upstream(error.to_string())),
        None => Err(RelayError::UnexpectedFormat(data.to_string())),
    }
}

/// Relay client speaking HTTP.
pub struct HttpRelay {
    http_client: reqwest::Client,
    url: String,
    model: String,
}

impl HttpRelay {
    pub fn new(config: &RelayConfig) -> Result<Self, RelayError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http_client,
            url: config.url.clone(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl Relay for HttpRelay {
    async fn complete(&self, request: RelayRequest) -> Result<String, RelayError> {
        let body = request_body(&self.model, &request);
        log::info!(
            "Sending request to {} ({} prompt bytes, {} image bytes)",
            self.url,
            request.prompt.len(),
            request.image.data.len()
        );

        let response = self.http_client.post(&self.url).json(&body).send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        log::debug!(
            "Relay response status {status}: {}...",
            text.chars().take(200).collect::<String>()
        );

        interpret_response(status, &text)
    }
}
