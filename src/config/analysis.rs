// src/config/analysis.rs
//! Environment-sourced backend configuration, read once at startup.

use std::collections::HashMap;

pub const ENV_ANALYSIS_ENABLED: &str = "ANALYSIS_ENABLED";

pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434/v1";
pub const DEFAULT_OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_TOGETHER_BASE_URL: &str = "https://api.together.xyz/v1";
pub const DEFAULT_HUGGINGFACE_BASE_URL: &str = "https://api-inference.huggingface.co/models";

/// Settings for one backend. `api_key` is `None` when the variable is unset or blank.
#[derive(Clone, PartialEq, Eq)]
pub struct BackendSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
}

// Never print credentials; only whether one is present.
impl std::fmt::Debug for BackendSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<set>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisConfig {
    /// `false` routes every article straight to the local analyzer.
    pub enabled: bool,
    pub ollama: BackendSettings,
    pub openrouter: BackendSettings,
    pub groq: BackendSettings,
    pub together: BackendSettings,
    pub huggingface: BackendSettings,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AnalysisConfig {
    /// Read the process environment. The binary loads `.env` into it beforehand.
    pub fn from_env() -> Self {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    /// Build from an explicit key/value map (tests, embedding).
    pub fn from_map(vars: &HashMap<String, String>) -> Self {
        Self::from_lookup(|k| vars.get(k).cloned())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |k: &str| {
            lookup(k)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let or = |k: &str, default: &str| non_blank(k).unwrap_or_else(|| default.to_string());

        let enabled = non_blank(ENV_ANALYSIS_ENABLED)
            .map(|v| v.to_lowercase() == "true")
            .unwrap_or(true);

        Self {
            enabled,
            ollama: BackendSettings {
                api_key: None,
                base_url: or("OLLAMA_BASE_URL", DEFAULT_OLLAMA_BASE_URL),
                model: or("OLLAMA_MODEL", "llama3:latest"),
            },
            openrouter: BackendSettings {
                api_key: non_blank("OPENROUTER_API_KEY"),
                base_url: or("OPENROUTER_BASE_URL", DEFAULT_OPENROUTER_BASE_URL),
                model: or("DEFAULT_MODEL", "meta-llama/llama-3.3-70b-instruct:free"),
            },
            groq: BackendSettings {
                api_key: non_blank("GROQ_API_KEY"),
                base_url: or("GROQ_BASE_URL", DEFAULT_GROQ_BASE_URL),
                model: or("GROQ_MODEL", "llama3-8b-8192"),
            },
            together: BackendSettings {
                api_key: non_blank("TOGETHER_API_KEY"),
                base_url: or("TOGETHER_BASE_URL", DEFAULT_TOGETHER_BASE_URL),
                model: or("TOGETHER_MODEL", "meta-llama/Llama-2-7b-chat-hf"),
            },
            huggingface: BackendSettings {
                api_key: non_blank("HUGGINGFACE_API_KEY"),
                base_url: or("HUGGINGFACE_BASE_URL", DEFAULT_HUGGINGFACE_BASE_URL),
                model: or("HUGGINGFACE_MODEL", "microsoft/DialoGPT-medium"),
            },
        }
    }
}
