//! Gemini client behind the `RewriteModel` trait.

use async_trait::async_trait;
use ce_core::{Error, ReferenceArticle, Result, RewriteModel};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::prompt;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const MODEL: &str = "gemini-2.5-flash-lite";

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

pub struct GeminiModel {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiModel {
    pub fn new(api_key: Option<String>) -> Result<Self> {
        let api_key = match api_key {
            Some(key) if !key.is_empty() => key,
            _ => return Err(Error::Llm("GEMINI_API_KEY is required".to_string())),
        };
        Ok(Self {
            client: Client::new(),
            api_key,
            base_url: BASE_URL.to_string(),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(std::env::var("GEMINI_API_KEY").ok())
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(format!("{}/models/{}:generateContent", self.base_url, MODEL))
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Llm(format!("Gemini API returned {}: {}", status, body)));
        }

        let response: GenerateResponse = response.json().await?;
        let text = response
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.clone())
            .unwrap_or_default();

        if text.is_empty() {
            return Err(Error::Llm("Gemini returned no candidates".to_string()));
        }
        Ok(text)
    }
}

// Keep the key out of logs.
impl fmt::Debug for GeminiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiModel")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl RewriteModel for GeminiModel {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn rewrite_article(
        &self,
        title: &str,
        original_content: &str,
        references: &[ReferenceArticle],
    ) -> Result<String> {
        let prompt = prompt::build_prompt(title, original_content, references);
        self.generate(&prompt).await
    }

    async fn check_connection(&self) -> Result<()> {
        let reply = self
            .generate("Say \"Hello, I am working!\" in one sentence.")
            .await?;
        tracing::debug!("LLM connection test reply: {}", reply);
        Ok(())
    }
}
