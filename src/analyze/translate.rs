// src/analyze/translate.rs
//! Best-effort translation of title/summary into Brazilian Portuguese.
//!
//! One call, one provider, no retries: any failure passes the article through unchanged.

use metrics::counter;
use tracing::{debug, warn};

use crate::article::Article;
use crate::config::GenerationParams;
use crate::providers::Provider;

pub const TRANSLATOR_PERSONA: &str = "Você é um tradutor. Traduza para português brasileiro.";
pub const LABEL_TITLE: &str = "TÍTULO_TRADUZIDO:";
pub const LABEL_SUMMARY: &str = "RESUMO_TRADUZIDO:";

/// Common Portuguese function words used by [`FunctionWordDetector`].
pub const PORTUGUESE_FUNCTION_WORDS: &[&str] = &[
    "de", "da", "do", "dos", "das", "para", "com", "em", "no", "na", "nos", "nas", "por", "uma",
    "um", "que", "não", "são", "como", "mais", "sobre", "pela", "pelo", "ao", "é",
];

/// Decides whether text is already in the target language.
pub trait LanguageDetector: Send + Sync {
    fn is_target_language(&self, text: &str) -> bool;
}

/// Counts function words among lowercase whitespace tokens.
/// Target language when `hits >= min_hits` or the text is shorter than `min_tokens`.
#[derive(Debug, Clone)]
pub struct FunctionWordDetector {
    pub words: &'static [&'static str],
    pub min_hits: usize,
    pub min_tokens: usize,
}

impl Default for FunctionWordDetector {
    fn default() -> Self {
        Self {
            words: PORTUGUESE_FUNCTION_WORDS,
            min_hits: 2,
            min_tokens: 5,
        }
    }
}

impl LanguageDetector for FunctionWordDetector {
    fn is_target_language(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        let tokens: Vec<&str> = lower.split_whitespace().collect();
        let hits = tokens.iter().filter(|t| self.words.contains(*t)).count();
        hits >= self.min_hits || tokens.len() < self.min_tokens
    }
}

pub struct Translator {
    detector: Box<dyn LanguageDetector>,
    params: GenerationParams,
}

impl Translator {
    pub fn new(params: GenerationParams) -> Self {
        Self::with_detector(Box::new(FunctionWordDetector::default()), params)
    }

    pub fn with_detector(detector: Box<dyn LanguageDetector>, params: GenerationParams) -> Self {
        Self { detector, params }
    }

    /// Title + summary judged together.
    pub fn needs_translation(&self, article: &Article) -> bool {
        let combined = format!("{} {}", article.title, article.summary);
        !self.detector.is_target_language(&combined)
    }

    /// Translate with `provider`; returns the original on skip or failure.
    pub async fn translate(&self, article: &Article, provider: &dyn Provider) -> Article {
        if !self.needs_translation(article) {
            debug!(target: "analysis", article_id = %article.log_id(), "already in target language");
            return article.clone();
        }
        if !provider.supports_chat() {
            return article.clone();
        }

        let prompt = translation_prompt(article);
        match provider
            .complete(TRANSLATOR_PERSONA, &prompt, self.params)
            .await
        {
            Ok(text) => {
                counter!("translation_calls_total", "outcome" => "ok").increment(1);
                let (title, summary) = parse_translation(&text, &article.title, &article.summary);
                Article {
                    title,
                    summary,
                    ..article.clone()
                }
            }
            Err(e) => {
                counter!("translation_calls_total", "outcome" => "error").increment(1);
                warn!(
                    target: "analysis",
                    provider = provider.name(),
                    error = %format!("{e:#}"),
                    "translation failed; keeping original text"
                );
                article.clone()
            }
        }
    }
}

pub fn translation_prompt(article: &Article) -> String {
    format!(
        "
Traduza para português brasileiro:

TÍTULO: {}
RESUMO: {}

Responda apenas:
{LABEL_TITLE} [título em português]
{LABEL_SUMMARY} [resumo em português]
",
        article.title, article.summary
    )
}

/// Scan for the two labelled lines; a missing or empty label keeps the original value.
pub fn parse_translation(text: &str, title: &str, summary: &str) -> (String, String) {
    let mut out_title = title.to_string();
    let mut out_summary = summary.to_string();
    for line in text.lines() {
        let line = line.trim_start();
        if let Some(rest) = line.strip_prefix(LABEL_TITLE) {
            let v = rest.trim();
            if !v.is_empty() {
                out_title = v.to_string();
            }
        } else if let Some(rest) = line.strip_prefix(LABEL_SUMMARY) {
            let v = rest.trim();
            if !v.is_empty() {
                out_summary = v.to_string();
            }
        }
    }
    (out_title, out_summary)
}
