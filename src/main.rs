//! AI News Analyzer binary entrypoint.
//! Reads crawler output, analyzes every article through the provider chain and prints
//! the consolidated report as JSON on stdout. Logs go to stderr.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ai_news_analyzer::{AnalysisConfig, AnalysisResult, Article, NewsAnalyzer, PipelineTuning};

pub const ENV_NEWS_INPUT_PATH: &str = "NEWS_INPUT_PATH";
pub const DEFAULT_NEWS_INPUT_PATH: &str = "news_data/articles.json";

/// Either a bare array or the crawler's consolidated `{"news": [...]}` file.
#[derive(Deserialize)]
#[serde(untagged)]
enum Input {
    List(Vec<Article>),
    Envelope { news: Vec<Article> },
}

impl Input {
    fn into_articles(self) -> Vec<Article> {
        match self {
            Input::List(v) | Input::Envelope { news: v } => v,
        }
    }
}

#[derive(Serialize)]
struct AnalyzedArticle<'a> {
    #[serde(flatten)]
    article: &'a Article,
    analysis: AnalysisResult,
}

#[derive(Serialize)]
struct Report<'a> {
    timestamp: String,
    total_news: usize,
    sources: Vec<&'a str>,
    news: Vec<AnalyzedArticle<'a>>,
}

/// stderr logging; `LOG_FORMAT=json` switches to structured lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ai_news_analyzer=info,warn"));

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

fn input_path() -> PathBuf {
    std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os(ENV_NEWS_INPUT_PATH).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_NEWS_INPUT_PATH))
}

fn read_articles(path: &Path) -> Result<Vec<Article>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading articles from {}", path.display()))?;
    let input: Input = serde_json::from_str(&raw)
        .with_context(|| format!("parsing articles JSON {}", path.display()))?;
    Ok(input.into_articles())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = AnalysisConfig::from_env();
    let tuning = PipelineTuning::load_default().context("loading pipeline tuning")?;

    let path = input_path();
    let articles = read_articles(&path)?;
    info!(target: "analysis", path = %path.display(), count = articles.len(), "articles loaded");

    let analyzer = NewsAnalyzer::from_config(&cfg, &tuning).await;

    let mut news = Vec::with_capacity(articles.len());
    for article in &articles {
        let analysis = analyzer.analyze(article).await;
        news.push(AnalyzedArticle { article, analysis });
    }

    let sources: BTreeSet<&str> = articles
        .iter()
        .map(|a| a.source.as_str())
        .filter(|s| !s.is_empty())
        .collect();
    let local = news.iter().filter(|n| n.analysis.is_local()).count();
    info!(target: "analysis", total = news.len(), local, "analysis run finished");

    let report = Report {
        timestamp: chrono::Utc::now().to_rfc3339(),
        total_news: news.len(),
        sources: sources.into_iter().collect(),
        news,
    };
    let out = serde_json::to_string_pretty(&report).context("serializing report")?;
    println!("{out}");
    Ok(())
}
