// src/analysis.rs
//! Output records of the pipeline.

use serde::{Deserialize, Serialize};

use crate::article::Article;

/// Placeholder used when an article carries no summary at all.
pub const MISSING_SUMMARY: &str = "Resumo não disponível";

/// How a result was produced. Downstream consumers flag `Local` as lower confidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMethod {
    Llm,
    Local,
}

/// The three sections extracted from a model response (or produced locally).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sections {
    pub executive_summary: String,
    pub key_points: String,
    pub relevance_level: String,
}

impl Sections {
    /// True when no section carries any text.
    pub fn is_empty(&self) -> bool {
        self.executive_summary.is_empty()
            && self.key_points.is_empty()
            && self.relevance_level.is_empty()
    }
}

/// Final per-article analysis. Every field is always present (possibly empty).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub executive_summary: String,
    pub key_points: String,
    pub relevance_level: String,
    pub translated_title: String,
    pub translated_summary: String,
    /// Backend that produced the result; `None` for local analysis.
    pub provider_used: Option<String>,
    pub analysis_method: AnalysisMethod,
}

impl AnalysisResult {
    /// Result produced by a backend. `input` is the (possibly translated) article fed to it.
    pub fn from_provider(sections: Sections, input: &Article, provider: &str) -> Self {
        Self {
            executive_summary: sections.executive_summary,
            key_points: sections.key_points,
            relevance_level: sections.relevance_level,
            translated_title: input.title.clone(),
            translated_summary: summary_or_missing(&input.summary),
            provider_used: Some(provider.to_string()),
            analysis_method: AnalysisMethod::Llm,
        }
    }

    /// Result of the rule-based analyzer: translated fields carry the originals.
    pub fn local(sections: Sections, article: &Article) -> Self {
        Self {
            executive_summary: sections.executive_summary,
            key_points: sections.key_points,
            relevance_level: sections.relevance_level,
            translated_title: article.title.clone(),
            translated_summary: summary_or_missing(&article.summary),
            provider_used: None,
            analysis_method: AnalysisMethod::Local,
        }
    }

    pub fn is_local(&self) -> bool {
        self.analysis_method == AnalysisMethod::Local
    }

    /// Provider name, or `"local"` for the rule-based path.
    pub fn method_label(&self) -> &str {
        self.provider_used.as_deref().unwrap_or("local")
    }
}

fn summary_or_missing(summary: &str) -> String {
    if summary.trim().is_empty() {
        MISSING_SUMMARY.to_string()
    } else {
        summary.to_string()
    }
}
