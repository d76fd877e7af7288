//! GeminiBrain implementation using the Gemini REST API.

use brain_core::{async_trait, hash_prompt, Brain, BrainError, Role, Turn};
use reqwest::{Client, StatusCode};
use tracing::{debug, info, warn};

use crate::api_types::{
    ApiError, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
};
use crate::config::GeminiBrainConfig;

/// A brain implementation backed by Google's Gemini API.
///
/// GeminiBrain is stateless: the full conversation is sent on every call and
/// nothing is remembered between calls.
pub struct GeminiBrain {
    client: Client,
    config: GeminiBrainConfig,
    name: String,
    system_prompt_hash: Option<String>,
}

impl GeminiBrain {
    /// Create a new GeminiBrain with the given configuration.
    pub fn new(config: GeminiBrainConfig) -> Result<Self, BrainError> {
        Self::named("GeminiBrain", config)
    }

    /// Create a GeminiBrain with a custom name (used in logs).
    pub fn named(name: impl Into<String>, config: GeminiBrainConfig) -> Result<Self, BrainError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BrainError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        let name = name.into();
        let system_prompt_hash = config.system_prompt.as_deref().map(hash_prompt);

        if let Some(ref hash) = system_prompt_hash {
            info!(brain = %name, "system prompt fingerprint: {}", hash);
        }

        info!(brain = %name, "GeminiBrain initialized with model: {}", config.model);

        Ok(Self {
            client,
            config,
            name,
            system_prompt_hash,
        })
    }

    /// Get the system prompt fingerprint, if configured.
    pub fn system_prompt_hash(&self) -> Option<&str> {
        self.system_prompt_hash.as_deref()
    }

    /// Build the request body for a conversation.
    ///
    /// System turns are folded into the system instruction after the
    /// configured prompt; user and assistant turns become `user` / `model`
    /// contents.
    fn build_request(&self, turns: &[Turn]) -> GenerateContentRequest {
        let mut instructions = Vec::new();
        if let Some(ref prompt) = self.config.system_prompt {
            instructions.push(prompt.clone());
        }

        let mut contents = Vec::new();
        for turn in turns {
            match turn.role {
                Role::System => instructions.push(turn.content.clone()),
                Role::User => contents.push(Content::user(turn.content.clone())),
                Role::Assistant => contents.push(Content::model(turn.content.clone())),
            }
        }

        let system_instruction = if instructions.is_empty() {
            None
        } else {
            Some(Content::instruction(instructions.join("\n\n")))
        };

        let generation_config = if self.config.max_tokens.is_none() && self.config.temperature.is_none() {
            None
        } else {
            Some(GenerationConfig {
                max_output_tokens: self.config.max_tokens,
                temperature: self.config.temperature,
            })
        };

        GenerateContentRequest {
            contents,
            system_instruction,
            generation_config,
        }
    }

    /// Call `generateContent`.
    async fn generate_content(
        &self,
        request: GenerateContentRequest,
    ) -> Result<GenerateContentResponse, BrainError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_url.trim_end_matches('/'),
            self.config.model
        );

        debug!(brain = %self.name, contents = request.contents.len(), "Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    BrainError::Timeout
                } else {
                    BrainError::Network(format!("Failed to send request: {}", e))
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ApiError>(&error_text)
                .map(|api_error| api_error.error.message)
                .unwrap_or(error_text);
            return Err(map_status_error(status, detail));
        }

        let completion: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| BrainError::ProcessingFailed(format!("Failed to parse response: {}", e)))?;

        debug!(brain = %self.name, "Received response from Gemini API: {:?}", completion);

        Ok(completion)
    }
}

#[async_trait]
impl Brain for GeminiBrain {
    async fn generate(&self, mut turns: Vec<Turn>) -> Result<Vec<Turn>, BrainError> {
        if !self.config.has_api_key() {
            return Err(BrainError::Configuration("GEMINI_API_KEY not set".to_string()));
        }

        let request = self.build_request(&turns);
        if request.contents.is_empty() {
            return Err(BrainError::ProcessingFailed(
                "no user or assistant turns to send".to_string(),
            ));
        }

        let completion = self.generate_content(request).await?;

        let reply = completion.first_text().unwrap_or_else(|| {
            let reason = completion
                .candidates
                .first()
                .and_then(|c| c.finish_reason.as_deref())
                .unwrap_or("no candidates");
            warn!(brain = %self.name, finish_reason = reason, "No content in response");
            String::new()
        });

        if let Some(usage) = completion.usage_metadata {
            debug!(
                "Token usage - prompt: {}, completion: {}, total: {}",
                usage.prompt_token_count, usage.candidates_token_count, usage.total_token_count
            );
        }

        turns.push(Turn::assistant(reply));
        Ok(turns)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Map a non-success HTTP status to a brain error.
fn map_status_error(status: StatusCode, detail: String) -> BrainError {
    let message = format!("API error ({}): {}", status.as_u16(), detail);
    match status {
        StatusCode::TOO_MANY_REQUESTS | StatusCode::SERVICE_UNAVAILABLE => {
            BrainError::Unavailable(message)
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => BrainError::Configuration(message),
        StatusCode::GATEWAY_TIMEOUT => BrainError::Timeout,
        _ => BrainError::ProcessingFailed(message),
    }
}
