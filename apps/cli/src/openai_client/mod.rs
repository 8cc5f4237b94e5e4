/// OpenAI Client — the single point of entry for all OpenAI API calls.
///
/// ARCHITECTURAL RULE: No other module may call the OpenAI API directly.
/// All embedding and completion requests MUST go through this module.
///
/// Models are hardcoded — do not make configurable to prevent drift.
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::letter::CompletionProvider;
use crate::ranking::EmbeddingProvider;

const EMBEDDINGS_URL: &str = "https://api.openai.com/v1/embeddings";
const CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
/// The embedding model used for all similarity ranking.
pub const EMBEDDING_MODEL: &str = "text-embedding-3-large";
/// The chat model used for cover-letter generation.
pub const CHAT_MODEL: &str = "gpt-4o-mini";
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum OpenAiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("API returned no embedding data")]
    EmptyEmbedding,

    #[error("API returned empty completion content")]
    EmptyContent,
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiApiError {
    error: OpenAiApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiApiErrorBody {
    message: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The single OpenAI client used by both the ranker and the letter generator.
/// Wraps the embeddings and chat-completions endpoints with retry logic.
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Embeds a single text into a fixed-length vector.
    pub async fn embed(&self, text: &str) -> Result<Vec<f32>, OpenAiError> {
        let request_body = EmbeddingRequest {
            model: EMBEDDING_MODEL,
            input: text,
        };

        let response: EmbeddingResponse = self.post_json(EMBEDDINGS_URL, &request_body).await?;

        let vector = response
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or(OpenAiError::EmptyEmbedding)?;

        debug!("Embedded {} chars into {} dimensions", text.len(), vector.len());
        Ok(vector)
    }

    /// Sends a single-turn chat completion and returns the response text.
    pub async fn complete(&self, prompt: &str, system: &str) -> Result<String, OpenAiError> {
        let request_body = ChatRequest {
            model: CHAT_MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response: ChatResponse = self.post_json(CHAT_COMPLETIONS_URL, &request_body).await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(OpenAiError::EmptyContent)
    }

    /// Makes a POST request to the OpenAI API, deserializing the JSON response.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    async fn post_json<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        url: &str,
        request_body: &Req,
    ) -> Result<Resp, OpenAiError> {
        let mut last_error: Option<OpenAiError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "OpenAI call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(url)
                .bearer_auth(&self.api_key)
                .json(request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(OpenAiError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("OpenAI API returned {}: {}", status, body);
                last_error = Some(OpenAiError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                // Try to parse the structured error message
                let message = serde_json::from_str::<OpenAiApiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(OpenAiError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            return Ok(response.json().await?);
        }

        Err(last_error.unwrap_or(OpenAiError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for OpenAiClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, AppError> {
        OpenAiClient::embed(self, text)
            .await
            .map_err(|e| AppError::Embedding(e.to_string()))
    }
}

#[async_trait::async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, AppError> {
        OpenAiClient::complete(self, prompt, system)
            .await
            .map_err(|e| AppError::Generation(e.to_string()))
    }
}
