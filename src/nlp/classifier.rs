//! Client for the local text-generation endpoint that labels comments.

use futures::future::BoxFuture;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Settings;

/// Response substituted whenever the endpoint cannot be used.
pub const FALLBACK_RESPONSE: &str = "positivos: nenhum, negativos: nenhum";

/// Anything able to turn a comment into a raw `positivos/negativos` answer.
///
/// Implementations never fail: transport problems degrade to
/// [`FALLBACK_RESPONSE`] so a batch keeps going.
pub trait Classifier: Send + Sync {
    fn classify<'a>(&'a self, comment: &'a str) -> BoxFuture<'a, String>;
}

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("request to classifier failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("classifier answered {status}: {body}")]
    Status { status: StatusCode, body: String },
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Build the instruction prompt sent for a single comment.
pub fn build_prompt(comment: &str) -> String {
    format!(
        r#"
Você é um especialista técnico em carros elétricos.
Seu papel é analisar comentários e identificar aspectos técnicos **específicos** sobre **funcionamento**, **tecnologia** ou **características reais** dos veículos elétricos.

Responda no formato (em uma linha, sem aspas):

positivos: aspecto1, aspecto2
negativos: aspecto3, aspecto4

Responda apenas com NENHUM em qualquer outro caso de falta de conhecimento, ou se não possuir informações específicas ou aspectos técnicos, ou linguagem ofensiva .

Frase: "{comment}"
"#
    )
}

/// Ollama `/api/generate` client with non-streaming responses.
#[derive(Debug, Clone)]
pub struct OllamaClassifier {
    client: Client,
    endpoint: String,
    model: String,
}

impl OllamaClassifier {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Result<Self, ClassifierError> {
        let client = Client::builder()
            .user_agent("ev-aspects/0.1")
            .gzip(true)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ClassifierError> {
        Self::new(settings.ollama_url.clone(), settings.model.clone())
    }

    /// One request, no retry; the answer is trimmed and lower-cased.
    pub async fn generate(&self, comment: &str) -> Result<String, ClassifierError> {
        let body = GenerateRequest {
            model: &self.model,
            prompt: build_prompt(comment),
            stream: false,
        };
        let resp = self.client.post(&self.endpoint).json(&body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClassifierError::Status { status, body });
        }
        let payload: GenerateResponse = resp.json().await?;
        Ok(payload.response.trim().to_lowercase())
    }
}

impl Classifier for OllamaClassifier {
    fn classify<'a>(&'a self, comment: &'a str) -> BoxFuture<'a, String> {
        Box::pin(async move {
            match self.generate(comment).await {
                Ok(answer) => {
                    debug!(model = %self.model, chars = answer.len(), "classifier answered");
                    answer
                }
                Err(err) => {
                    warn!(%err, endpoint = %self.endpoint, "classifier unavailable, using fallback");
                    FALLBACK_RESPONSE.to_string()
                }
            }
        })
    }
}
