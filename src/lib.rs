// src/lib.rs
// Public library surface for the binary and integration tests.

pub mod analysis;
pub mod analyze;
pub mod article;
pub mod config;
pub mod providers;

// ---- Re-exports for stable public API ----
pub use crate::analysis::{AnalysisMethod, AnalysisResult, Sections};
pub use crate::analyze::NewsAnalyzer;
pub use crate::article::Article;
pub use crate::config::{AnalysisConfig, PipelineTuning};
pub use crate::providers::{Provider, ProviderChain};
