// tests/chain_health.rs
use ai_news_analyzer::config::AnalysisConfig;
use ai_news_analyzer::providers::{probe_local_backend, registry, PLACEHOLDER_CREDENTIAL};
use ai_news_analyzer::{PipelineTuning, ProviderChain};
use mockito::Server;
use serde_json::json;
use std::collections::HashMap;
use std::time::Duration;

fn cfg(pairs: &[(&str, &str)]) -> AnalysisConfig {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    AnalysisConfig::from_map(&vars)
}

fn fast_tuning() -> PipelineTuning {
    PipelineTuning {
        health_check_timeout: Duration::from_secs(1),
        ..PipelineTuning::default()
    }
}

#[tokio::test]
async fn running_backend_without_models_is_excluded() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/api/tags")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "models": [] }).to_string())
        .create_async()
        .await;

    let base = format!("{}/v1", server.url());
    let chain = ProviderChain::build(&cfg(&[("OLLAMA_BASE_URL", base.as_str())]), &fast_tuning()).await;
    assert!(chain.is_empty());
}

#[tokio::test]
async fn backend_with_models_leads_the_chain() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/api/tags")
        .with_status(200)
        .with_body(json!({ "models": [{ "name": "llama3:latest" }] }).to_string())
        .create_async()
        .await;

    let base = format!("{}/v1", server.url());
    let chain = ProviderChain::build(
        &cfg(&[("OLLAMA_BASE_URL", base.as_str()), ("GROQ_API_KEY", "gsk_test")]),
        &fast_tuning(),
    )
    .await;
    assert_eq!(chain.names(), vec!["ollama", "groq"]);
    assert!(chain.first().is_some_and(|p| p.is_local()));
}

#[tokio::test]
async fn non_2xx_probe_reports_unavailable() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/api/tags")
        .with_status(500)
        .create_async()
        .await;

    let http = reqwest::Client::new();
    let ok = probe_local_backend(&http, &server.url(), Duration::from_secs(1)).await;
    assert!(!ok);
}

#[tokio::test]
async fn hosted_backends_follow_priority_and_skip_placeholders() {
    let unreachable = "http://127.0.0.1:9/v1";
    let config = cfg(&[
        ("OLLAMA_BASE_URL", unreachable),
        ("HUGGINGFACE_API_KEY", "hf_test"),
        ("TOGETHER_API_KEY", "tk_test"),
        ("GROQ_API_KEY", PLACEHOLDER_CREDENTIAL),
        ("OPENROUTER_API_KEY", "   "),
    ]);

    let chain = ProviderChain::build(&config, &fast_tuning()).await;
    assert_eq!(chain.names(), vec!["together", "huggingface"]);
    assert!(chain.iter().all(|p| !p.is_local()));
}

#[tokio::test]
async fn priority_sort_is_stable_on_ties() {
    let config = cfg(&[
        ("OLLAMA_BASE_URL", "http://127.0.0.1:9/v1"),
        ("OPENROUTER_API_KEY", "or"),
        ("GROQ_API_KEY", "gq"),
        ("TOGETHER_API_KEY", "tg"),
    ]);
    let mut descriptors = registry(&config);
    for d in descriptors.iter_mut() {
        d.priority = match d.name() {
            "together" => 1,
            _ => 2,
        };
    }
    let chain = ProviderChain::from_descriptors(descriptors, &fast_tuning()).await;
    assert_eq!(chain.names(), vec!["together", "openrouter", "groq"]);
}
