use crate::domain::error::TranslateError;
use crate::domain::model::{ChatMessage, TranslateOptions};
use crate::domain::traits::CompletionBackend;
use crate::infrastructure::config::BackendConfig;
use crate::infrastructure::network::http::create_client;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

// OpenAI-compatible chat completion wire format
#[derive(Serialize, Debug)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Deserialize, Debug)]
struct ResponseMessage {
    content: Option<String>,
}

/// Chat-completion backend for OpenRouter and other OpenAI-compatible endpoints
pub struct OpenRouterBackend {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl OpenRouterBackend {
    pub fn new(client: Client, endpoint: String, api_key: String) -> Result<Self, TranslateError> {
        if api_key.trim().is_empty() {
            return Err(TranslateError::Configuration(
                "API key is empty".to_string(),
            ));
        }
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    /// Build from config, reading the key from the configured environment variable.
    ///
    /// Fails before any request is made when the variable is unset or empty.
    pub fn from_config(config: &BackendConfig) -> Result<Self, TranslateError> {
        let api_key = std::env::var(&config.api_key_env).unwrap_or_default();
        if api_key.trim().is_empty() {
            return Err(TranslateError::Configuration(format!(
                "{} is not set. Export it in your environment.",
                config.api_key_env
            )));
        }
        let client = create_client(config.http_proxy.as_deref())?;
        Self::new(client, config.endpoint.clone(), api_key)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CompletionBackend for OpenRouterBackend {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &TranslateOptions,
    ) -> Result<String, TranslateError> {
        let body = ChatCompletionRequest {
            model: &options.model,
            messages,
            temperature: options.temperature,
        };

        debug!("POST {} (model {})", self.endpoint, options.model);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header("Content-Type", "application/json")
            .timeout(options.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Chat completion request failed: {}", e);
                TranslateError::from(e)
            })?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            error!("Chat completion endpoint returned {}", status);
            return Err(TranslateError::BackendError {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&text)
            .map_err(|e| TranslateError::MalformedResponse {
                reason: e.to_string(),
                body: text.clone(),
            })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .map(|content| content.trim().to_string())
            .ok_or(TranslateError::MalformedResponse {
                reason: "missing choices[0].message.content".to_string(),
                body: text,
            })
    }
}
