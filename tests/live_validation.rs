use std::env;

use student_records::{
    config::{Config, DEFAULT_OLLAMA_HOST},
    records::StudentRecord,
    summarization::{SummaryGenerator, SummaryMode},
};

fn live_config() -> Config {
    Config {
        ollama_host: env::var("OLLAMA_HOST").unwrap_or_else(|_| DEFAULT_OLLAMA_HOST.to_string()),
        summary_model: env::var("SUMMARY_MODEL").unwrap_or_else(|_| "llama2".to_string()),
        ..Config::default()
    }
}

#[tokio::test]
#[ignore = "Requires live Ollama"]
async fn live_ollama_summary_roundtrip() {
    let generator = SummaryGenerator::probe(&live_config()).await;
    assert_eq!(
        generator.mode(),
        SummaryMode::Remote,
        "Ollama should be reachable at the configured host"
    );

    let record = StudentRecord::new(12_345_678, "Ada", 30, "ada@x.com");
    let summary = generator
        .generate(&record)
        .await
        .expect("failed to generate summary from live Ollama");
    assert!(!summary.trim().is_empty());
}
