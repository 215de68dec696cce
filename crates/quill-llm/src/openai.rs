//! OpenAI LLM provider implementation.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use tracing::debug;

use quill_core::error::{ErrorCode, QuillError, QuillResult};
use quill_core::traits::{GenerationOptions, Llm, LlmConfig, LlmResponse, TokenUsage};
use quill_core::types::{Message, MessageRole};

#[cfg(feature = "openai")]
use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestAssistantMessage, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessage, ChatCompletionRequestUserMessage,
        CreateChatCompletionRequest,
    },
    Client,
};

/// OpenAI chat-completion provider.
pub struct OpenAIProvider {
    #[cfg(feature = "openai")]
    client: Client<OpenAIConfig>,
    config: LlmConfig,
}

impl OpenAIProvider {
    /// Create a new OpenAI LLM provider.
    ///
    /// The credential comes from the config; the provider never reads the
    /// environment itself.
    pub fn new(config: LlmConfig) -> QuillResult<Self> {
        let api_key = config.api_key.as_ref().ok_or_else(|| {
            QuillError::Configuration(
                "OpenAI API key not found. Set OPENAI_API_KEY environment variable.".to_string(),
            )
        })?;

        #[cfg(feature = "openai")]
        let openai_config = if let Some(ref base_url) = config.base_url {
            OpenAIConfig::new()
                .with_api_key(api_key.expose_secret())
                .with_api_base(base_url)
        } else {
            OpenAIConfig::new().with_api_key(api_key.expose_secret())
        };

        #[cfg(not(feature = "openai"))]
        let _ = api_key.expose_secret();

        #[cfg(feature = "openai")]
        let client = Client::with_config(openai_config);

        let mut config = config;
        if config.model.is_empty() {
            config.model = quill_core::traits::DEFAULT_MODEL.to_string();
        }

        Ok(Self {
            #[cfg(feature = "openai")]
            client,
            config,
        })
    }

    #[cfg(feature = "openai")]
    fn message_to_openai(msg: &Message) -> ChatCompletionRequestMessage {
        match msg.role {
            MessageRole::System => {
                ChatCompletionRequestMessage::System(ChatCompletionRequestSystemMessage {
                    content: async_openai::types::ChatCompletionRequestSystemMessageContent::Text(
                        msg.content.clone(),
                    ),
                    name: None,
                })
            }
            MessageRole::User => {
                ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                    content: async_openai::types::ChatCompletionRequestUserMessageContent::Text(
                        msg.content.clone(),
                    ),
                    name: None,
                })
            }
            MessageRole::Assistant => {
                ChatCompletionRequestMessage::Assistant(ChatCompletionRequestAssistantMessage {
                    content: Some(
                        async_openai::types::ChatCompletionRequestAssistantMessageContent::Text(
                            msg.content.clone(),
                        ),
                    ),
                    name: None,
                    ..Default::default()
                })
            }
        }
    }

    #[cfg(feature = "openai")]
    fn map_error(err: OpenAIError) -> QuillError {
        match err {
            OpenAIError::Reqwest(e) => {
                let code = if e.is_timeout() {
                    ErrorCode::NetTimeout
                } else {
                    ErrorCode::NetConnectionFailed
                };
                QuillError::Network {
                    message: format!("OpenAI request failed: {}", e),
                    code,
                    source: Some(Box::new(e)),
                }
            }
            OpenAIError::ApiError(api) => Self::map_api_error(api.code.as_deref(), &api.message),
            other => QuillError::llm(format!("OpenAI API error: {}", other)),
        }
    }

    /// Classify an error body returned by the API by its `code` field.
    #[cfg(feature = "openai")]
    fn map_api_error(code: Option<&str>, message: &str) -> QuillError {
        match code {
            Some("invalid_api_key") => QuillError::authentication(message),
            Some("rate_limit_exceeded") => QuillError::rate_limit(message),
            _ => QuillError::llm(format!("OpenAI API error: {}", message)),
        }
    }
}

#[async_trait]
impl Llm for OpenAIProvider {
    #[cfg(feature = "openai")]
    async fn generate(
        &self,
        messages: &[Message],
        options: Option<GenerationOptions>,
    ) -> QuillResult<LlmResponse> {
        let chat_messages: Vec<ChatCompletionRequestMessage> =
            messages.iter().map(Self::message_to_openai).collect();

        let options = options.unwrap_or_default();

        let request = CreateChatCompletionRequest {
            model: self.config.model.clone(),
            messages: chat_messages,
            temperature: Some(options.temperature.unwrap_or(self.config.temperature)),
            max_tokens: options.max_tokens.or(self.config.max_tokens),
            ..Default::default()
        };

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(Self::map_error)?;

        let choice = response
            .choices
            .first()
            .ok_or_else(|| QuillError::llm("No response choices returned"))?;

        let content = choice.message.content.clone();

        let usage = response.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });
        if let Some(ref u) = usage {
            debug!(
                model = %self.config.model,
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                "Chat completion finished"
            );
        }

        Ok(LlmResponse { content, usage })
    }

    #[cfg(not(feature = "openai"))]
    async fn generate(
        &self,
        _messages: &[Message],
        _options: Option<GenerationOptions>,
    ) -> QuillResult<LlmResponse> {
        Err(QuillError::Configuration(
            "OpenAI feature not enabled. Enable the 'openai' feature.".to_string(),
        ))
    }

    fn model_name(&self) -> String {
        self.config.model.clone()
    }
}
