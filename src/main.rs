use anyhow::Result;

use nutrition_advisor::config::Config;
use nutrition_advisor::session::ChatSession;
use nutrition_advisor::{repl, server};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so the terminal chat stays readable on stdout
    tracing_subscriber::fmt()
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::load();
    let session = ChatSession::from_config(&config)?;

    // Choose surface: terminal chat (default) or the single-page web UI
    let surface = std::env::var("ADVISOR_UI").unwrap_or_else(|_| "repl".to_string());
    match surface.as_str() {
        "http" | "web" => server::serve(session, &config.server.bind).await?,
        _ => repl::run(session).await?,
    }

    Ok(())
}
