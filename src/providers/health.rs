// src/providers/health.rs
//! Liveness probe for the locally hosted backend (`GET {base}/api/tags`).

use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<serde_json::Value>,
}

/// `http://host:11434/v1` → `http://host:11434/api/tags`.
pub fn health_url(base_url: &str) -> String {
    let trimmed = base_url.trim().trim_end_matches('/');
    let root = trimmed.strip_suffix("/v1").unwrap_or(trimmed);
    format!("{root}/api/tags")
}

/// True iff the call succeeds with 2xx AND at least one model is installed.
/// Never fails: transport errors, timeouts and bad bodies all report `false`.
pub async fn probe_local_backend(http: &reqwest::Client, base_url: &str, timeout: Duration) -> bool {
    let url = health_url(base_url);
    let resp = match http.get(&url).timeout(timeout).send().await {
        Ok(r) => r,
        Err(e) => {
            debug!(target: "providers", %url, error = %e, "local backend unreachable");
            return false;
        }
    };
    if !resp.status().is_success() {
        debug!(target: "providers", %url, status = %resp.status(), "local backend non-2xx");
        return false;
    }
    match resp.json::<TagsResponse>().await {
        Ok(tags) if !tags.models.is_empty() => {
            info!(target: "providers", models = tags.models.len(), "local backend available");
            true
        }
        Ok(_) => {
            warn!(target: "providers", "local backend running but no models installed");
            false
        }
        Err(e) => {
            debug!(target: "providers", error = %e, "local backend returned unreadable tag list");
            false
        }
    }
}
