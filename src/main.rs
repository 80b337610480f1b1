//! Pronoun Chat - terminal chat with a scripted bot

use clap::Parser;
use pronoun_chat::{app::ChatApp, config::AppConfig, log_info, logging, ui};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Pronoun-friendly chat
#[derive(Parser, Debug)]
#[command(name = "pronoun-chat")]
#[command(version)]
#[command(about = "Pronoun-friendly chat with a scripted bot", long_about = None)]
struct Args {
    /// Configuration file path (overrides defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Database path (default: ./chat.db)
    #[arg(long)]
    db_path: Option<PathBuf>,

    /// Chat log path (default: ./chat_log.txt)
    #[arg(long)]
    chat_log: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Skip the TUI and read one action per line from stdin
    #[arg(long)]
    simple: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(path) = args.db_path {
        config.db_path = path;
    }
    if let Some(path) = args.chat_log {
        config.chat_log_path = path;
    }
    config.validate()?;

    let simple = args.simple || !std::io::stdout().is_terminal();
    init_logging(&config, args.verbose, !simple);

    let mut app = ChatApp::initialize(&config.db_path, &config.chat_log_path).await;

    if simple {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        let mut stderr = std::io::stderr();
        ui::run_simple(&mut app, stdin.lock(), &mut stdout, &mut stderr).await?;
        app.shutdown().await;
    } else {
        let mut tui = ui::ChatTui::new(app)?;
        tui.run().await?;
        tui.app().shutdown().await;
    }

    log_info!("Session ended");
    Ok(())
}

/// Initialize logging
fn init_logging(config: &AppConfig, verbose: bool, tui_mode: bool) {
    // The TUI owns the terminal, so diagnostics go to a file
    if tui_mode {
        if let Err(e) = logging::init_logger(&config.diagnostics_log_path) {
            eprintln!(
                "Could not open diagnostics log {}: {}",
                config.diagnostics_log_path.display(),
                e
            );
        }
        return;
    }

    let filter = if verbose || config.debug {
        "pronoun_chat=debug,info"
    } else {
        "pronoun_chat=info,warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
