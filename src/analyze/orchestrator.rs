// src/analyze/orchestrator.rs
//! Public entry point: walk the provider chain for one article, fall back to the
//! local analyzer when analysis is disabled or every provider fails.

use metrics::{counter, histogram};
use std::time::Instant;
use tracing::{error, info, warn};

use crate::analysis::AnalysisResult;
use crate::analyze::local::LocalAnalyzer;
use crate::analyze::translate::Translator;
use crate::article::Article;
use crate::config::{AnalysisConfig, PipelineTuning, TranslationRoute};
use crate::providers::{Provider, ProviderChain};

/// Outcome of one provider attempt.
#[derive(Debug)]
enum Attempt {
    Success(AnalysisResult),
    /// Provider answered but no section could be parsed.
    Empty,
    RateLimited(anyhow::Error),
    Failed(anyhow::Error),
}

/// Rate-limit signal: HTTP 429 anywhere in the chain, or "429"/"rate" in the message.
pub fn is_rate_limited(err: &anyhow::Error) -> bool {
    let status_429 = err.chain().any(|cause| {
        cause
            .downcast_ref::<reqwest::Error>()
            .and_then(|e| e.status())
            .is_some_and(|s| s == reqwest::StatusCode::TOO_MANY_REQUESTS)
    });
    if status_429 {
        return true;
    }
    let msg = format!("{err:#}").to_lowercase();
    msg.contains("429") || msg.contains("rate")
}

pub struct NewsAnalyzer {
    chain: ProviderChain,
    enabled: bool,
    translator: Translator,
    translation_route: TranslationRoute,
    local: LocalAnalyzer,
}

impl NewsAnalyzer {
    /// Build the provider chain once (health checks included) and keep it for the analyzer's lifetime.
    pub async fn from_config(cfg: &AnalysisConfig, tuning: &PipelineTuning) -> Self {
        let chain = ProviderChain::build(cfg, tuning).await;
        Self::new(chain, cfg.enabled, tuning)
    }

    pub fn new(chain: ProviderChain, enabled: bool, tuning: &PipelineTuning) -> Self {
        Self {
            chain,
            enabled,
            translator: Translator::new(tuning.translation),
            translation_route: tuning.translation_route,
            local: LocalAnalyzer::new(),
        }
    }

    pub fn with_translator(mut self, translator: Translator) -> Self {
        self.translator = translator;
        self
    }

    pub fn chain(&self) -> &ProviderChain {
        &self.chain
    }

    /// Total: always returns a result, worst case the local analysis.
    pub async fn analyze(&self, article: &Article) -> AnalysisResult {
        let t0 = Instant::now();
        let article_id = article.log_id();
        info!(target: "analysis", %article_id, source = %article.source, "analysis started");

        let result = if !self.enabled {
            info!(target: "analysis", %article_id, "llm analysis disabled; using local analysis");
            counter!("analysis_local_fallback_total", "reason" => "disabled").increment(1);
            self.local.analyze(article)
        } else {
            match self.walk_chain(article, &article_id).await {
                Some(r) => r,
                None => {
                    let reason = if self.chain.is_empty() {
                        "no_providers"
                    } else {
                        "exhausted"
                    };
                    warn!(target: "analysis", %article_id, reason, "all providers failed; using local analysis");
                    counter!("analysis_local_fallback_total", "reason" => reason).increment(1);
                    self.local.analyze(article)
                }
            }
        };

        histogram!("analysis_duration_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
        result
    }

    async fn walk_chain(&self, article: &Article, article_id: &str) -> Option<AnalysisResult> {
        let total = self.chain.len();
        for (i, provider) in self.chain.iter().enumerate() {
            let name = provider.name();
            info!(target: "analysis", %article_id, provider = name, attempt = i + 1, total, "trying provider");
            counter!("analysis_provider_attempts_total", "provider" => name).increment(1);

            match self.attempt(provider, article).await {
                Attempt::Success(result) => {
                    info!(target: "analysis", %article_id, provider = name, "analysis completed");
                    return Some(result);
                }
                Attempt::Empty => {
                    counter!("analysis_provider_failures_total", "provider" => name, "kind" => "empty").increment(1);
                    warn!(target: "analysis", %article_id, provider = name, "no sections in response; trying next");
                }
                Attempt::RateLimited(e) => {
                    counter!("analysis_provider_failures_total", "provider" => name, "kind" => "rate_limit").increment(1);
                    warn!(target: "analysis", %article_id, provider = name, error = %format!("{e:#}"), "rate limited; trying next");
                }
                Attempt::Failed(e) => {
                    counter!("analysis_provider_failures_total", "provider" => name, "kind" => "error").increment(1);
                    error!(target: "analysis", %article_id, provider = name, error = %format!("{e:#}"), "provider error; trying next");
                }
            }
        }
        None
    }

    async fn attempt(&self, provider: &dyn Provider, article: &Article) -> Attempt {
        // Local backend: no translation (latency). Inference-only backend: cannot translate.
        let input = if provider.is_local() || !provider.supports_chat() {
            article.clone()
        } else {
            let translator_backend = match self.translation_route {
                TranslationRoute::First => self.chain.first().unwrap_or(provider),
                TranslationRoute::Analysis => provider,
            };
            self.translator.translate(article, translator_backend).await
        };

        match provider.analyze(&input).await {
            Ok(sections) if sections.is_empty() => Attempt::Empty,
            Ok(sections) => Attempt::Success(AnalysisResult::from_provider(
                sections,
                &input,
                provider.name(),
            )),
            Err(e) if is_rate_limited(&e) => Attempt::RateLimited(e),
            Err(e) => Attempt::Failed(e),
        }
    }
}
