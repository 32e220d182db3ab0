// src/config/pipeline.rs
//! Pipeline tuning (timeouts, generation parameters, translation routing) from TOML.
//!
//! Lookup order:
//! 1) $PIPELINE_CONFIG_PATH (must exist)
//! 2) config/pipeline.toml
//! 3) built-in defaults

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_PIPELINE_CONFIG_PATH: &str = "PIPELINE_CONFIG_PATH";
pub const DEFAULT_PIPELINE_CONFIG_PATH: &str = "config/pipeline.toml";

/// Upper bound for the local-backend liveness probe.
pub const MAX_HEALTH_CHECK_SECS: u64 = 5;

/// Sampling parameters sent with a chat completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl GenerationParams {
    pub const fn new(max_tokens: u32, temperature: f32) -> Self {
        Self {
            max_tokens,
            temperature,
        }
    }
}

/// Which backend performs the translation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationRoute {
    /// First usable backend in the chain, whatever analyses the article.
    #[default]
    First,
    /// The backend about to run the analysis.
    Analysis,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineTuning {
    pub health_check_timeout: Duration,
    pub generation_timeout: Duration,
    pub local: GenerationParams,
    pub hosted: GenerationParams,
    pub translation: GenerationParams,
    pub translation_route: TranslationRoute,
}

impl Default for PipelineTuning {
    fn default() -> Self {
        Self {
            health_check_timeout: Duration::from_secs(MAX_HEALTH_CHECK_SECS),
            generation_timeout: Duration::from_secs(30),
            local: GenerationParams::new(1500, 0.5),
            hosted: GenerationParams::new(2000, 0.7),
            translation: GenerationParams::new(1000, 0.3),
            translation_route: TranslationRoute::First,
        }
    }
}

/* ----------------------------
File schema (all optional)
---------------------------- */

#[derive(Debug, Default, Deserialize)]
struct TuningFile {
    #[serde(default)]
    timeouts: TimeoutsFile,
    #[serde(default)]
    generation: GenerationFile,
    #[serde(default)]
    translation: TranslationFile,
}

#[derive(Debug, Default, Deserialize)]
struct TimeoutsFile {
    health_check_secs: Option<u64>,
    generation_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct GenerationFile {
    #[serde(default)]
    local: ParamsFile,
    #[serde(default)]
    hosted: ParamsFile,
    #[serde(default)]
    translation: ParamsFile,
}

#[derive(Debug, Default, Deserialize)]
struct ParamsFile {
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
struct TranslationFile {
    provider: Option<TranslationRoute>,
}

impl ParamsFile {
    fn merge_into(&self, base: GenerationParams) -> GenerationParams {
        let mut out = base;
        if let Some(n) = self.max_tokens.filter(|n| *n > 0) {
            out.max_tokens = n;
        }
        if let Some(t) = self.temperature {
            // Sanitize: out-of-range values keep the default
            if (0.0..=2.0).contains(&t) {
                out.temperature = t;
            }
        }
        out
    }
}

impl PipelineTuning {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let file: TuningFile = toml::from_str(s).context("parsing pipeline tuning toml")?;
        let d = Self::default();

        let health = file
            .timeouts
            .health_check_secs
            .unwrap_or(MAX_HEALTH_CHECK_SECS)
            .clamp(1, MAX_HEALTH_CHECK_SECS);
        let generation = file
            .timeouts
            .generation_secs
            .filter(|s| *s > 0)
            .map(Duration::from_secs)
            .unwrap_or(d.generation_timeout);

        Ok(Self {
            health_check_timeout: Duration::from_secs(health),
            generation_timeout: generation,
            local: file.generation.local.merge_into(d.local),
            hosted: file.generation.hosted.merge_into(d.hosted),
            translation: file.generation.translation.merge_into(d.translation),
            translation_route: file.translation.provider.unwrap_or_default(),
        })
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading pipeline tuning from {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Env path first, then the default file, then built-in defaults.
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_PIPELINE_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from(&pb);
            }
            return Err(anyhow!(
                "PIPELINE_CONFIG_PATH points to non-existent path: {}",
                pb.display()
            ));
        }
        let default_p = PathBuf::from(DEFAULT_PIPELINE_CONFIG_PATH);
        if default_p.exists() {
            return Self::load_from(&default_p);
        }
        Ok(Self::default())
    }
}
