// src/providers/openai_compat.rs
//! OpenAI-compatible chat completion backend (Ollama, OpenRouter, Groq, Together).

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::debug;

use super::registry::ProviderDescriptor;
use super::Provider;
use crate::config::GenerationParams;

/// Bearer token sent to the local backend, which ignores it.
const LOCAL_BEARER: &str = "ollama";

pub struct OpenAiCompatProvider {
    name: &'static str,
    local: bool,
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    params: GenerationParams,
}

impl OpenAiCompatProvider {
    /// Build a client with a bounded request timeout.
    pub fn new(
        descriptor: &ProviderDescriptor,
        params: GenerationParams,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("ai-news-analyzer/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(4))
            .timeout(timeout)
            .build()
            .context("building http client")?;
        let local = descriptor.kind.is_local();
        let api_key = if local {
            LOCAL_BEARER.to_string()
        } else {
            descriptor.credential.clone().unwrap_or_default()
        };
        Ok(Self {
            name: descriptor.name(),
            local,
            http,
            base_url: descriptor.endpoint.trim_end_matches('/').to_string(),
            api_key,
            model: descriptor.model_id.clone(),
            params,
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[derive(Serialize)]
struct Msg<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct Req<'a> {
    model: &'a str,
    messages: Vec<Msg<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct Resp {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMsg,
}

#[derive(Deserialize)]
struct ChoiceMsg {
    #[serde(default)]
    content: Option<String>,
}

#[async_trait]
impl Provider for OpenAiCompatProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    fn is_local(&self) -> bool {
        self.local
    }

    fn analysis_params(&self) -> GenerationParams {
        self.params
    }

    async fn complete(&self, system: &str, user: &str, params: GenerationParams) -> Result<String> {
        let req = Req {
            model: &self.model,
            messages: vec![
                Msg {
                    role: "system",
                    content: system,
                },
                Msg {
                    role: "user",
                    content: user,
                },
            ],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        let t0 = Instant::now();
        let body: Resp = self
            .http
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .await
            .with_context(|| format!("{} chat request", self.name))?
            .error_for_status()
            .with_context(|| format!("{} non-2xx", self.name))?
            .json()
            .await
            .with_context(|| format!("{} malformed completion body", self.name))?;
        debug!(
            target: "providers",
            provider = self.name,
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "chat completion finished"
        );

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        if content.trim().is_empty() {
            bail!("{} returned an empty completion", self.name);
        }
        Ok(content)
    }
}
