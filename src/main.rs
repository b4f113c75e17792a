use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};

use inbox_pilot::auth::{CommandTokenProvider, EnvTokenProvider, TokenProvider};
use inbox_pilot::backend::HttpBackend;
use inbox_pilot::config::PopupConfig;
use inbox_pilot::popup::{PopupOrchestrator, TerminalSurface};
use inbox_pilot::session::UiPhase;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = PopupConfig::from_env();

    eprintln!("📮 Inbox Pilot v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Backend: {}", config.api_url);

    // Token provider: a helper command when configured, otherwise the
    // token environment variable.
    let provider: Arc<dyn TokenProvider> = match std::env::var("INBOX_PILOT_TOKEN_CMD") {
        Ok(line) => {
            let provider = CommandTokenProvider::from_command_line(&line)
                .context("INBOX_PILOT_TOKEN_CMD is set but empty")?;
            eprintln!("   Token: via helper command");
            Arc::new(provider)
        }
        Err(_) => {
            eprintln!("   Token: from INBOX_PILOT_TOKEN");
            Arc::new(EnvTokenProvider::default())
        }
    };

    let backend = Arc::new(HttpBackend::new(&config).context("failed to build HTTP client")?);

    // Informational startup ping; the popup works (or fails) the same
    // way regardless.
    match backend.health().await {
        Ok(health) => tracing::info!(
            status = %health.status,
            api_key_configured = health.api_key_configured,
            "backend is reachable"
        ),
        Err(e) => tracing::warn!(error = %e, "backend health check failed"),
    }

    if let Some(path) = &config.html_snapshot {
        eprintln!("   Snapshot: {}", path.display());
    }
    eprintln!();

    let surface = TerminalSurface::new(config.html_snapshot.clone());
    let suggested = config.suggested_questions.clone();
    let mut popup = PopupOrchestrator::new(config, provider, backend, Box::new(surface));

    popup.run().await;
    print_help(&suggested, popup.phase());

    // Command loop — the stand-in for the popup's click handlers.
    let stdin = tokio::io::stdin();
    let reader = BufReader::new(stdin);
    let mut lines = reader.lines();

    eprint!("> ");
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "" => {}
            "quit" | "exit" => break,
            "help" => print_help(&suggested, popup.phase()),
            "refresh" => {
                popup.run().await;
            }
            _ => {
                if let Some(id) = line.strip_prefix("read ") {
                    popup.mark_read(id.trim()).await;
                } else if let Ok(n) = line.parse::<usize>() {
                    match suggested.get(n.checked_sub(1).unwrap_or(usize::MAX)) {
                        Some(question) => popup.ask(question).await,
                        None => eprintln!("No suggested question #{n}"),
                    }
                } else {
                    popup.ask(line).await;
                }
            }
        }
        eprint!("> ");
    }

    Ok(())
}

fn print_help(suggested: &[String], phase: UiPhase) {
    eprintln!("Commands: refresh | read <id> | quit | help");
    if phase == UiPhase::ShowingEmails {
        eprintln!("Ask a question by typing it, or pick a suggestion:");
        for (i, q) in suggested.iter().enumerate() {
            eprintln!("  {}. {q}", i + 1);
        }
    }
}
