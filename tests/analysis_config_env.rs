// tests/analysis_config_env.rs
use ai_news_analyzer::config::AnalysisConfig;
use std::{env, fs};

#[serial_test::serial]
#[test]
fn from_env_reads_process_env_but_not_dotenv_file() {
    // Isolate CWD with a .env that must stay unread.
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();
    fs::write(tmp.path().join(".env"), "TOGETHER_API_KEY=from_dotenv_file\n").unwrap();

    env::remove_var("TOGETHER_API_KEY");
    env::set_var("GROQ_API_KEY", "gsk_process");
    env::set_var("ANALYSIS_ENABLED", "FALSE");

    let cfg = AnalysisConfig::from_env();
    assert_eq!(cfg.groq.api_key.as_deref(), Some("gsk_process"));
    assert_eq!(cfg.together.api_key, None);
    assert!(!cfg.enabled);

    env::remove_var("GROQ_API_KEY");
    env::remove_var("ANALYSIS_ENABLED");
    env::set_current_dir(&old).unwrap();
}
