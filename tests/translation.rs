// tests/translation.rs
mod common;

use ai_news_analyzer::analyze::{LanguageDetector, Translator};
use ai_news_analyzer::config::{GenerationParams, TranslationRoute};
use ai_news_analyzer::{Article, NewsAnalyzer, PipelineTuning, ProviderChain};
use common::{calls, Script, Scripted};

const PARAMS: GenerationParams = GenerationParams::new(1000, 0.3);

fn english() -> Article {
    Article::new(
        "OpenAI announces a new model for enterprise customers",
        "The release targets large companies that want private deployments.",
    )
}

#[tokio::test]
async fn portuguese_title_issues_zero_calls() {
    let p = Scripted::new("alpha", Script::Ok);
    let (_, complete) = p.counters();
    let a = Article::new("Relatório de IA no mercado brasileiro", "");

    let out = Translator::new(PARAMS).translate(&a, &p).await;
    assert_eq!(out, a);
    assert_eq!(calls(&complete), 0);
}

#[tokio::test]
async fn english_article_is_translated_from_labels() {
    let p = Scripted::new("alpha", Script::Ok);
    let (_, complete) = p.counters();

    let out = Translator::new(PARAMS).translate(&english(), &p).await;
    assert_eq!(calls(&complete), 1);
    assert_eq!(out.title, "Título traduzido");
    assert_eq!(out.summary, "Resumo traduzido");
    assert_eq!(out.content, english().content);
}

#[tokio::test]
async fn failed_translation_returns_article_unchanged() {
    let p = Scripted::new("alpha", Script::Ok).failing_translation();
    let out = Translator::new(PARAMS).translate(&english(), &p).await;
    assert_eq!(out, english());
}

struct AlwaysForeign;

impl LanguageDetector for AlwaysForeign {
    fn is_target_language(&self, _text: &str) -> bool {
        false
    }
}

#[tokio::test]
async fn detector_is_pluggable() {
    let p = Scripted::new("alpha", Script::Ok);
    let (_, complete) = p.counters();
    let t = Translator::with_detector(Box::new(AlwaysForeign), PARAMS);
    // Short text would normally be treated as already translated.
    let _ = t.translate(&Article::new("Oi", ""), &p).await;
    assert_eq!(calls(&complete), 1);
}

#[tokio::test]
async fn local_backend_skips_translation() {
    let p = Scripted::new("ollama", Script::Ok).local();
    let (analyze, complete) = p.counters();
    let an = NewsAnalyzer::new(
        ProviderChain::from_providers(vec![Box::new(p)]),
        true,
        &PipelineTuning::default(),
    );
    let r = an.analyze(&english()).await;
    assert_eq!(r.provider_used.as_deref(), Some("ollama"));
    assert_eq!(r.translated_title, english().title);
    assert_eq!(calls(&analyze), 1);
    assert_eq!(calls(&complete), 0);
}

#[tokio::test]
async fn translation_failure_does_not_block_analysis() {
    let p = Scripted::new("groq", Script::Ok).failing_translation();
    let an = NewsAnalyzer::new(
        ProviderChain::from_providers(vec![Box::new(p)]),
        true,
        &PipelineTuning::default(),
    );
    let r = an.analyze(&english()).await;
    assert_eq!(r.provider_used.as_deref(), Some("groq"));
    assert_eq!(r.translated_title, english().title);
}

#[tokio::test]
async fn routing_first_vs_analysis() {
    // alpha fails analysis but translates; beta analyses.
    let build = |route| {
        let a = Scripted::new("alpha", Script::Fail);
        let b = Scripted::new("beta", Script::Ok);
        let (_, a_complete) = a.counters();
        let (_, b_complete) = b.counters();
        let tuning = PipelineTuning {
            translation_route: route,
            ..PipelineTuning::default()
        };
        let an = NewsAnalyzer::new(
            ProviderChain::from_providers(vec![Box::new(a), Box::new(b)]),
            true,
            &tuning,
        );
        (an, a_complete, b_complete)
    };

    let (an, a_complete, b_complete) = build(TranslationRoute::First);
    an.analyze(&english()).await;
    assert_eq!((calls(&a_complete), calls(&b_complete)), (2, 0));

    let (an, a_complete, b_complete) = build(TranslationRoute::Analysis);
    an.analyze(&english()).await;
    assert_eq!((calls(&a_complete), calls(&b_complete)), (1, 1));
}

#[tokio::test]
async fn analyzer_uses_injected_translator() {
    let p = Scripted::new("groq", Script::Ok);
    let (_, complete) = p.counters();
    let an = NewsAnalyzer::new(
        ProviderChain::from_providers(vec![Box::new(p)]),
        true,
        &PipelineTuning::default(),
    )
    .with_translator(Translator::with_detector(Box::new(AlwaysForeign), PARAMS));

    // Too short for the default detector to translate.
    let r = an.analyze(&Article::new("Oi", "")).await;
    assert_eq!(calls(&complete), 1);
    assert_eq!(r.translated_title, "Título traduzido");
    assert_eq!(r.provider_used.as_deref(), Some("groq"));
}
