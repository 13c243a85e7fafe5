use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use student_records::{
    api, config, logging,
    service::StudentService,
    summarization::SummaryGenerator,
};
use tokio::net::TcpListener;

/// In-memory student records API with profile summaries.
#[derive(Parser)]
#[command(name = "student-records", version)]
struct Cli {
    /// Port to listen on (overrides `PORT`).
    #[arg(long)]
    port: Option<u16>,
    /// Base URL of the Ollama runtime (overrides `OLLAMA_HOST`).
    #[arg(long)]
    ollama_host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::init_config(config::Overrides {
        port: cli.port,
        ollama_host: cli.ollama_host,
    })
    .context("failed to load configuration")?;
    logging::init_tracing(config.log_file.as_deref());

    // Decided once; never re-probed while serving.
    let summaries = SummaryGenerator::probe(config).await;
    let app = api::create_router(Arc::new(StudentService::in_memory(summaries)));

    let listener = bind_listener(config.server_port).await?;
    tracing::info!("Server starting on port {}", config.server_port);
    axum::serve(listener, app)
        .await
        .context("HTTP server terminated unexpectedly")?;
    Ok(())
}

async fn bind_listener(port: u16) -> Result<TcpListener> {
    use std::net::Ipv4Addr;

    TcpListener::bind((Ipv4Addr::UNSPECIFIED, port))
        .await
        .with_context(|| format!("failed to bind port {port}"))
}
