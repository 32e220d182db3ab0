// src/analyze/local.rs
//! Rule-based fallback analyzer: zero network, fully deterministic.
//!
//! Keywords are matched case-insensitively at the start of a word, so inflections
//! (`robotics`, `businesses`, `fixes`) count while `ai` does not fire inside `said`
//! and `api` not inside `capital`.
//! Each tier counts how many distinct keywords of that tier occur.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::analysis::{AnalysisResult, Sections};
use crate::analyze::prompt::MISSING_FIELD;
use crate::article::Article;

/// Major-lab names and funding/acquisition language.
pub const HIGH_IMPACT_KEYWORDS: &[&str] = &[
    "openai",
    "chatgpt",
    "claude",
    "gemini",
    "breakthrough",
    "revolutionary",
    "billion",
    "funding",
    "ipo",
    "acquisition",
];

/// Generic ML/AI vocabulary.
pub const AI_DOMAIN_KEYWORDS: &[&str] = &[
    "ai",
    "artificial intelligence",
    "machine learning",
    "deep learning",
    "neural",
    "algorithm",
    "automation",
    "robot",
];

/// Maintenance / patch language.
pub const MAINTENANCE_KEYWORDS: &[&str] = &["update", "minor", "patch", "bug", "fix"];

pub const RELEVANCE_HIGH: &str = "Alto - Contém múltiplas palavras-chave de alta relevância";
pub const RELEVANCE_MODERATE: &str = "Médio - Relevância moderada para o setor de IA";
pub const RELEVANCE_AI_RELATED: &str = "Médio - Relacionado à inteligência artificial";
pub const RELEVANCE_LOW: &str = "Baixo - Relevância limitada para IA";

const CLOSING_RECOMMENDATION: &str =
    "Recomenda-se acompanhamento para avaliar oportunidades de aplicação em negócios e desenvolvimento.";

const GENERIC_KEY_POINTS: [&str; 3] = [
    "• Notícia relacionada à inteligência artificial",
    "• Potencial impacto no setor de tecnologia",
    "• Relevante para acompanhamento do mercado",
];

struct KeywordSet {
    patterns: Vec<Regex>,
}

impl KeywordSet {
    fn new(words: &[&str]) -> Self {
        let patterns = words
            .iter()
            .map(|w| {
                Regex::new(&format!(r"(?i)\b{}", regex::escape(w))).expect("keyword regex")
            })
            .collect();
        Self { patterns }
    }

    /// Number of distinct keywords present.
    fn count(&self, text: &str) -> usize {
        self.patterns.iter().filter(|re| re.is_match(text)).count()
    }

    fn any(&self, text: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(text))
    }
}

static HIGH: Lazy<KeywordSet> = Lazy::new(|| KeywordSet::new(HIGH_IMPACT_KEYWORDS));
static MEDIUM: Lazy<KeywordSet> = Lazy::new(|| KeywordSet::new(AI_DOMAIN_KEYWORDS));
static LOW: Lazy<KeywordSet> = Lazy::new(|| KeywordSet::new(MAINTENANCE_KEYWORDS));

/// Topical triggers, checked in this order; every match contributes one bullet.
static KEY_POINT_TRIGGERS: Lazy<Vec<(KeywordSet, &'static str)>> = Lazy::new(|| {
    vec![
        (
            KeywordSet::new(&["openai", "chatgpt"]),
            "• Desenvolvimento em OpenAI/ChatGPT",
        ),
        (
            KeywordSet::new(&["google", "gemini"]),
            "• Inovação do Google em IA",
        ),
        (KeywordSet::new(&["microsoft"]), "• Iniciativa da Microsoft"),
        (
            KeywordSet::new(&["funding", "investment"]),
            "• Movimentação de investimentos",
        ),
        (
            KeywordSet::new(&["enterprise", "business"]),
            "• Aplicação empresarial",
        ),
        (
            KeywordSet::new(&["developer", "api"]),
            "• Ferramentas para desenvolvedores",
        ),
    ]
});

/// Distinct-keyword counts per tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeywordTally {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl KeywordTally {
    pub fn of(text: &str) -> Self {
        Self {
            high: HIGH.count(text),
            medium: MEDIUM.count(text),
            low: LOW.count(text),
        }
    }

    /// Relevance label, first matching rule wins.
    pub fn relevance(&self) -> &'static str {
        if self.high >= 2 {
            RELEVANCE_HIGH
        } else if self.high >= 1 || self.medium >= 3 {
            RELEVANCE_MODERATE
        } else if self.medium >= 1 {
            RELEVANCE_AI_RELATED
        } else {
            RELEVANCE_LOW
        }
    }

    fn summary_clause(&self) -> &'static str {
        if self.high > 0 {
            "Esta notícia apresenta desenvolvimentos significativos em IA com potencial impacto no mercado."
        } else if self.medium > 0 {
            "Esta notícia aborda temas relevantes de inteligência artificial."
        } else {
            "Esta notícia tem conexão com tecnologia e pode ser de interesse."
        }
    }
}

/// Bullets for every trigger present, or the generic trio when none fires.
pub fn key_points(text: &str) -> Vec<&'static str> {
    let hits: Vec<&'static str> = KEY_POINT_TRIGGERS
        .iter()
        .filter(|(set, _)| set.any(text))
        .map(|(_, bullet)| *bullet)
        .collect();
    if hits.is_empty() {
        GENERIC_KEY_POINTS.to_vec()
    } else {
        hits
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalAnalyzer;

impl LocalAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn sections(&self, article: &Article) -> Sections {
        let title = if article.title.trim().is_empty() {
            MISSING_FIELD
        } else {
            article.title.as_str()
        };
        let text = format!("{} {}", title, article.body()).to_lowercase();
        let tally = KeywordTally::of(&text);
        debug!(
            target: "analysis",
            high = tally.high,
            medium = tally.medium,
            low = tally.low,
            "local keyword tally"
        );

        Sections {
            executive_summary: format!(
                "Análise local da notícia: {title}. {} {CLOSING_RECOMMENDATION}",
                tally.summary_clause()
            ),
            key_points: key_points(&text).join("\n"),
            relevance_level: tally.relevance().to_string(),
        }
    }

    pub fn analyze(&self, article: &Article) -> AnalysisResult {
        AnalysisResult::local(self.sections(article), article)
    }
}
