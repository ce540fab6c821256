//! HTTP suggestion providers: OpenAI-compatible chat completions and Ollama

use crate::config::SuggestionConfig;
use crate::error::{Result, ResumeMatchError};
use crate::llm::parser::ResponseParser;
use crate::llm::prompts::PromptTemplates;
use crate::llm::provider::{AiSuggestions, SuggestionProvider, SuggestionRequest};
use async_trait::async_trait;
use log::info;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

fn build_http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ResumeMatchError::Configuration(format!("Failed to build HTTP client: {}", e)))
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ResumeMatchError::ExternalSuggestionFailure(format!(
        "API error (status {}): {}",
        status.as_u16(),
        body.chars().take(300).collect::<String>()
    )))
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
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

/// Client for any OpenAI-compatible `/chat/completions` endpoint.
pub struct ChatCompletionsClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    templates: PromptTemplates,
    parser: ResponseParser,
}

impl ChatCompletionsClient {
    pub fn new(config: &SuggestionConfig, api_key: String) -> Result<Self> {
        Ok(Self {
            client: build_http_client(config.timeout())?,
            base_url: config.base_url().to_string(),
            api_key,
            model: config.model().to_string(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            templates: PromptTemplates::default(),
            parser: ResponseParser::new(),
        })
    }
}

#[async_trait]
impl SuggestionProvider for ChatCompletionsClient {
    fn name(&self) -> String {
        format!("chat:{}", self.model)
    }

    async fn suggest(&self, request: &SuggestionRequest) -> Result<AiSuggestions> {
        let start_time = Instant::now();
        let prompt = self.templates.render_suggestions(request);

        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &self.templates.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            response_format: ResponseFormat { kind: "json_object" },
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let chat: ChatResponse = ensure_success(response).await?.json().await?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ResumeMatchError::ExternalSuggestionFailure("Empty completion".to_string()))?;

        info!("Chat suggestions from {}: {}ms", self.model, start_time.elapsed().as_millis());
        self.parser.parse(&content, request.match_percentage)
    }
}

#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f32,
    num_predict: u32,
    top_p: f32,
    top_k: u32,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
}

/// Client for a local Ollama server's `/api/generate` endpoint.
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    templates: PromptTemplates,
    parser: ResponseParser,
}

impl OllamaClient {
    pub fn new(config: &SuggestionConfig) -> Result<Self> {
        Ok(Self {
            client: build_http_client(config.timeout())?,
            base_url: config.base_url().to_string(),
            model: config.model().to_string(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            templates: PromptTemplates::default(),
            parser: ResponseParser::new(),
        })
    }
}

#[async_trait]
impl SuggestionProvider for OllamaClient {
    fn name(&self) -> String {
        format!("ollama:{}", self.model)
    }

    async fn suggest(&self, request: &SuggestionRequest) -> Result<AiSuggestions> {
        let start_time = Instant::now();
        let prompt = self.templates.render_suggestions(request);

        let body = OllamaRequest {
            model: &self.model,
            prompt: &prompt,
            system: &self.templates.system,
            stream: false,
            options: OllamaOptions {
                temperature: self.temperature,
                num_predict: self.max_tokens,
                top_p: 0.8,
                top_k: 20,
            },
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&body)
            .send()
            .await?;
        let generated: OllamaResponse = ensure_success(response).await?.json().await?;

        info!("Ollama suggestions from {}: {}ms", self.model, start_time.elapsed().as_millis());
        self.parser.parse(&generated.response, request.match_percentage)
    }
}
