// src/providers/huggingface.rs
//! Hugging Face Inference API: single generation call, fixed-shape result, no chat.

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use super::registry::ProviderDescriptor;
use super::Provider;
use crate::analysis::Sections;
use crate::article::Article;
use crate::config::GenerationParams;

const CONTENT_CHARS: usize = 500;
const SUMMARY_CHARS: usize = 200;
/// Upper bound for the inference API's `max_length`.
pub const HF_MAX_LENGTH: u32 = 500;

pub const HF_KEY_POINTS: &str = "• Análise via Hugging Face\n• Conteúdo processado automaticamente\n• Relevante para IA e tecnologia";
pub const HF_RELEVANCE: &str = "Médio - Análise automática via Hugging Face";

pub struct HuggingFaceProvider {
    http: reqwest::Client,
    url: String,
    api_key: String,
    params: GenerationParams,
}

#[derive(Deserialize)]
struct Generated {
    #[serde(default)]
    generated_text: String,
}

impl HuggingFaceProvider {
    pub fn new(
        descriptor: &ProviderDescriptor,
        params: GenerationParams,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(4))
            .timeout(timeout)
            .build()
            .context("building http client")?;
        Ok(Self {
            http,
            url: format!(
                "{}/{}",
                descriptor.endpoint.trim_end_matches('/'),
                descriptor.model_id
            ),
            api_key: descriptor.credential.clone().unwrap_or_default(),
            params,
        })
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = serde_json::json!({
            "inputs": prompt,
            "parameters": { "max_length": max_length(self.params) },
        });
        let out: Vec<Generated> = self
            .http
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("huggingface request")?
            .error_for_status()
            .context("huggingface non-2xx")?
            .json()
            .await
            .context("huggingface malformed body")?;
        out.into_iter()
            .next()
            .map(|g| g.generated_text)
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| anyhow!("huggingface returned an empty answer"))
    }
}

fn max_length(params: GenerationParams) -> u32 {
    params.max_tokens.min(HF_MAX_LENGTH)
}

fn short_prompt(article: &Article) -> String {
    let content: String = article.body().chars().take(CONTENT_CHARS).collect();
    format!("Analise esta notícia de IA: {}. {}", article.title, content)
}

fn clip(text: &str) -> String {
    if text.chars().count() > SUMMARY_CHARS {
        let head: String = text.chars().take(SUMMARY_CHARS).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}

#[async_trait]
impl Provider for HuggingFaceProvider {
    fn name(&self) -> &'static str {
        "huggingface"
    }

    fn supports_chat(&self) -> bool {
        false
    }

    fn analysis_params(&self) -> GenerationParams {
        self.params
    }

    async fn complete(&self, _system: &str, _user: &str, _params: GenerationParams) -> Result<String> {
        bail!("huggingface backend does not accept chat requests")
    }

    async fn analyze(&self, article: &Article) -> Result<Sections> {
        let text = self.generate(&short_prompt(article)).await?;
        Ok(Sections {
            executive_summary: clip(text.trim()),
            key_points: HF_KEY_POINTS.to_string(),
            relevance_level: HF_RELEVANCE.to_string(),
        })
    }
}
