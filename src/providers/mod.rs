// src/providers/mod.rs
//! Text-generation backends: registry, liveness probe, concrete call shapes and the
//! ordered chain of usable providers.

pub mod chain;
pub mod health;
pub mod huggingface;
pub mod openai_compat;
pub mod registry;

use anyhow::Result;
use async_trait::async_trait;

use crate::analysis::Sections;
use crate::analyze::parser::parse_response;
use crate::analyze::prompt::{build_analysis_prompt, ANALYST_PERSONA};
use crate::article::Article;
use crate::config::GenerationParams;

pub use chain::ProviderChain;
pub use health::{health_url, probe_local_backend};
pub use huggingface::HuggingFaceProvider;
pub use openai_compat::OpenAiCompatProvider;
pub use registry::{registry, ProviderDescriptor, ProviderKind, PLACEHOLDER_CREDENTIAL};

/// One interchangeable backend. The orchestrator only sees this trait.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Registry name, also reported as `provider_used`.
    fn name(&self) -> &'static str;

    /// Locally hosted backend: translation is skipped for latency.
    fn is_local(&self) -> bool {
        false
    }

    /// Whether free-form chat instructions (e.g. translation) are accepted.
    fn supports_chat(&self) -> bool {
        true
    }

    /// Parameters used for the main analysis call.
    fn analysis_params(&self) -> GenerationParams;

    /// Single chat completion with a system + user message.
    async fn complete(&self, system: &str, user: &str, params: GenerationParams) -> Result<String>;

    /// Prompt → completion → section parse.
    async fn analyze(&self, article: &Article) -> Result<Sections> {
        let prompt = build_analysis_prompt(article);
        let raw = self
            .complete(ANALYST_PERSONA, &prompt, self.analysis_params())
            .await?;
        Ok(parse_response(&raw))
    }
}
