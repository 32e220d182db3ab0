// src/analyze/mod.rs
//! Analysis pipeline: translation → prompt → provider → section parse, with the
//! rule-based analyzer as the terminal fallback.

pub mod local;
pub mod orchestrator;
pub mod parser;
pub mod prompt;
pub mod translate;

// Re-export convenient types.
pub use crate::analyze::local::{KeywordTally, LocalAnalyzer};
pub use crate::analyze::orchestrator::{is_rate_limited, NewsAnalyzer};
pub use crate::analyze::parser::{parse_response, ResponseParser, Section};
pub use crate::analyze::prompt::build_analysis_prompt;
pub use crate::analyze::translate::{FunctionWordDetector, LanguageDetector, Translator};
