// src/providers/chain.rs
//! Ordered list of usable providers, built once per analyzer lifetime.

use std::fmt;
use tracing::{info, warn};

use super::health::probe_local_backend;
use super::huggingface::HuggingFaceProvider;
use super::openai_compat::OpenAiCompatProvider;
use super::registry::{registry, ProviderDescriptor, ProviderKind};
use super::Provider;
use crate::config::{AnalysisConfig, PipelineTuning};

/// Read-only after construction; an empty chain means pure local analysis.
pub struct ProviderChain {
    providers: Vec<Box<dyn Provider>>,
}

impl fmt::Debug for ProviderChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderChain")
            .field("providers", &self.names())
            .finish()
    }
}

impl ProviderChain {
    /// Registry → priority sort → credential / health gating → instantiate.
    pub async fn build(cfg: &AnalysisConfig, tuning: &PipelineTuning) -> Self {
        Self::from_descriptors(registry(cfg), tuning).await
    }

    pub async fn from_descriptors(
        mut descriptors: Vec<ProviderDescriptor>,
        tuning: &PipelineTuning,
    ) -> Self {
        // Stable sort: ties keep declaration order.
        descriptors.sort_by_key(|d| d.priority);

        let probe_client = reqwest::Client::new();
        let mut providers: Vec<Box<dyn Provider>> = Vec::with_capacity(descriptors.len());

        for d in &descriptors {
            let usable = if d.requires_health_check {
                probe_local_backend(&probe_client, &d.endpoint, tuning.health_check_timeout).await
            } else {
                d.has_usable_credential()
            };
            if !usable {
                let reason = if d.requires_health_check {
                    "health_check_failed"
                } else {
                    "missing_credential"
                };
                warn!(
                    target: "providers",
                    provider = d.name(),
                    priority = d.priority,
                    reason,
                    "provider excluded"
                );
                continue;
            }

            match instantiate(d, tuning) {
                Ok(p) => {
                    info!(target: "providers", provider = d.name(), priority = d.priority, "provider configured");
                    providers.push(p);
                }
                Err(e) => {
                    warn!(target: "providers", provider = d.name(), error = ?e, "provider setup failed");
                }
            }
        }

        let chain = Self { providers };
        if chain.is_empty() {
            warn!(target: "providers", "no LLM provider configured; using local analysis");
        } else {
            info!(
                target: "providers",
                count = chain.len(),
                primary = chain.providers[0].name(),
                order = ?chain.names(),
                "provider chain ready"
            );
        }
        chain
    }

    /// Wrap already-built providers (kept in the given order).
    pub fn from_providers(providers: Vec<Box<dyn Provider>>) -> Self {
        Self { providers }
    }

    pub fn empty() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn first(&self) -> Option<&dyn Provider> {
        self.providers.first().map(|p| p.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Provider> {
        self.providers.iter().map(|p| p.as_ref())
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }
}

fn instantiate(d: &ProviderDescriptor, tuning: &PipelineTuning) -> anyhow::Result<Box<dyn Provider>> {
    let params = if d.kind.is_local() {
        tuning.local
    } else {
        tuning.hosted
    };
    let provider: Box<dyn Provider> = match d.kind {
        ProviderKind::HuggingFace => Box::new(HuggingFaceProvider::new(
            d,
            params,
            tuning.generation_timeout,
        )?),
        _ => Box::new(OpenAiCompatProvider::new(
            d,
            params,
            tuning.generation_timeout,
        )?),
    };
    Ok(provider)
}
