// src/providers/registry.rs
//! Static registry of every known backend, each with a fixed priority.

use crate::config::{AnalysisConfig, BackendSettings};

/// Sentinel left in example `.env` files; treated as "no credential".
pub const PLACEHOLDER_CREDENTIAL: &str = "your_api_key_here";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// Locally hosted (Ollama), OpenAI-compatible.
    Ollama,
    OpenRouter,
    Groq,
    Together,
    /// Hosted inference API with its own call shape.
    HuggingFace,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 5] = [
        ProviderKind::Ollama,
        ProviderKind::OpenRouter,
        ProviderKind::Groq,
        ProviderKind::Together,
        ProviderKind::HuggingFace,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ProviderKind::Ollama => "ollama",
            ProviderKind::OpenRouter => "openrouter",
            ProviderKind::Groq => "groq",
            ProviderKind::Together => "together",
            ProviderKind::HuggingFace => "huggingface",
        }
    }

    pub fn is_local(self) -> bool {
        matches!(self, ProviderKind::Ollama)
    }
}

/// Immutable configuration of one backend.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderDescriptor {
    pub kind: ProviderKind,
    pub credential: Option<String>,
    pub endpoint: String,
    pub model_id: String,
    /// Lower = tried earlier; ties keep declaration order.
    pub priority: u8,
    pub requires_health_check: bool,
}

impl std::fmt::Debug for ProviderDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderDescriptor")
            .field("kind", &self.kind)
            .field("credential", &self.credential.as_ref().map(|_| "<set>"))
            .field("endpoint", &self.endpoint)
            .field("model_id", &self.model_id)
            .field("priority", &self.priority)
            .field("requires_health_check", &self.requires_health_check)
            .finish()
    }
}

impl ProviderDescriptor {
    fn from_settings(kind: ProviderKind, priority: u8, s: &BackendSettings) -> Self {
        Self {
            kind,
            credential: s.api_key.clone(),
            endpoint: s.base_url.clone(),
            model_id: s.model.clone(),
            priority,
            requires_health_check: kind.is_local(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Present, non-blank and not the placeholder sentinel.
    pub fn has_usable_credential(&self) -> bool {
        self.credential
            .as_deref()
            .map(str::trim)
            .is_some_and(|c| !c.is_empty() && c != PLACEHOLDER_CREDENTIAL)
    }
}

/// All five descriptors in declaration order, priorities 1..=5.
pub fn registry(cfg: &AnalysisConfig) -> Vec<ProviderDescriptor> {
    ProviderKind::ALL
        .iter()
        .zip(1u8..)
        .map(|(&kind, priority)| {
            let settings = match kind {
                ProviderKind::Ollama => &cfg.ollama,
                ProviderKind::OpenRouter => &cfg.openrouter,
                ProviderKind::Groq => &cfg.groq,
                ProviderKind::Together => &cfg.together,
                ProviderKind::HuggingFace => &cfg.huggingface,
            };
            ProviderDescriptor::from_settings(kind, priority, settings)
        })
        .collect()
}
