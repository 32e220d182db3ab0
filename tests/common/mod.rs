// tests/common/mod.rs
// Scripted providers shared by the integration tests.
#![allow(dead_code)]

use ai_news_analyzer::analysis::Sections;
use ai_news_analyzer::config::GenerationParams;
use ai_news_analyzer::Provider;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Clone, Copy, Debug)]
pub enum Script {
    Ok,
    Fail,
    RateLimit,
    Garbage,
}

/// Provider with canned behavior and shared call counters.
pub struct Scripted {
    pub name: &'static str,
    pub script: Script,
    pub local: bool,
    pub chat: bool,
    pub analyze_calls: Arc<AtomicUsize>,
    pub complete_calls: Arc<AtomicUsize>,
    /// Answer returned for translation requests.
    pub translation: Result<String, String>,
}

impl Scripted {
    pub fn new(name: &'static str, script: Script) -> Self {
        Self {
            name,
            script,
            local: false,
            chat: true,
            analyze_calls: Arc::new(AtomicUsize::new(0)),
            complete_calls: Arc::new(AtomicUsize::new(0)),
            translation: Ok("TÍTULO_TRADUZIDO: Título traduzido\nRESUMO_TRADUZIDO: Resumo traduzido".into()),
        }
    }

    pub fn local(mut self) -> Self {
        self.local = true;
        self
    }

    pub fn failing_translation(mut self) -> Self {
        self.translation = Err("translation backend down".into());
        self
    }

    pub fn counters(&self) -> (Arc<AtomicUsize>, Arc<AtomicUsize>) {
        (self.analyze_calls.clone(), self.complete_calls.clone())
    }
}

pub const WELL_FORMED: &str = "\
## RESUMO EXECUTIVO
Resumo gerado.

## PONTOS-CHAVE
• Ponto 1
• Ponto 2

## NÍVEL DE RELEVÂNCIA
Alto - impacto amplo
";

#[async_trait]
impl Provider for Scripted {
    fn name(&self) -> &'static str {
        self.name
    }

    fn is_local(&self) -> bool {
        self.local
    }

    fn supports_chat(&self) -> bool {
        self.chat
    }

    fn analysis_params(&self) -> GenerationParams {
        GenerationParams::new(100, 0.1)
    }

    async fn complete(&self, _system: &str, _user: &str, _params: GenerationParams) -> Result<String> {
        self.complete_calls.fetch_add(1, Ordering::SeqCst);
        self.translation.clone().map_err(|e| anyhow!(e))
    }

    async fn analyze(&self, _article: &ai_news_analyzer::Article) -> Result<Sections> {
        self.analyze_calls.fetch_add(1, Ordering::SeqCst);
        match self.script {
            Script::Ok => Ok(ai_news_analyzer::analyze::parse_response(WELL_FORMED)),
            Script::Fail => Err(anyhow!("connection reset by peer")),
            Script::RateLimit => Err(anyhow!("HTTP 429 Too Many Requests")),
            Script::Garbage => Ok(ai_news_analyzer::analyze::parse_response("no headings here at all")),
        }
    }
}

pub fn calls(c: &Arc<AtomicUsize>) -> usize {
    c.load(Ordering::SeqCst)
}
