use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::Parser;
use futures_util::StreamExt;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use playground::clipboard::StdoutClipboard;
use playground::commands::{Command, HELP};
use playground::render::render_text;
use playground::{Playground, PlaygroundCfg, PlaygroundError, Vibe};

/// Mocked image-generation playground driven from stdin.
#[derive(Parser, Debug)]
#[command(name = "playground", version)]
struct Cli {
    /// YAML config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Artificial generation delay in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,
    /// Seed for reproducible picks
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_enum)]
    vibe: Option<Vibe>,
    /// Starting prompt
    #[arg(long)]
    prompt: Option<String>,
    /// Print events as JSON lines instead of rendering the session
    #[arg(long)]
    json: bool,
}

async fn load_cfg(cli: &Cli) -> Result<PlaygroundCfg> {
    let mut cfg = match &cli.config {
        Some(path) => PlaygroundCfg::load(path).await?,
        None => PlaygroundCfg::default(),
    };
    cfg.apply_env();
    if let Some(v) = cli.delay_ms { cfg.delay_ms = v; }
    if let Some(v) = cli.seed { cfg.seed = Some(v); }
    if let Some(v) = cli.vibe { cfg.default_vibe = v; }
    if let Some(v) = &cli.prompt { cfg.default_prompt = v.clone(); }
    cfg.validate();
    Ok(cfg)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("playground=info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = load_cfg(&cli).await?;
    tracing::info!(delay_ms = cfg.delay_ms, seed = ?cfg.seed, history_limit = cfg.history_limit, "starting playground");

    let pg = Playground::from_cfg(&cfg, Arc::new(StdoutClipboard));

    if cli.json {
        let mut events = Box::pin(pg.events());
        tokio::spawn(async move {
            while let Some(evt) = events.next().await {
                match serde_json::to_string(&evt) {
                    Ok(line) => println!("{line}"),
                    Err(e) => tracing::warn!(session = evt.session_id(), error = %e, "failed to encode event"),
                }
            }
        });
    } else {
        println!("{}", render_text(&pg.snapshot().await));
        println!("type `help` for commands");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let cmd = match Command::parse(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };
        if cmd == Command::Quit {
            break;
        }
        if let Err(e) = run_command(&pg, cmd, cli.json).await {
            // Validation failures already show up as the status line.
            if !matches!(e, PlaygroundError::EmptyPrompt) {
                eprintln!("{e}");
            }
        }
        if !cli.json {
            println!("{}", render_text(&pg.snapshot().await));
        }
    }

    Ok(())
}

async fn run_command(pg: &Playground, cmd: Command, json: bool) -> Result<(), PlaygroundError> {
    match cmd {
        Command::Prompt(text) => pg.set_prompt(text).await,
        Command::Vibe(vibe) => pg.select_vibe(vibe).await,
        Command::Submit => {
            if !json {
                println!("Generating…");
            }
            pg.submit().await?;
        }
        Command::Pick(n) => {
            pg.select_history(n - 1).await?;
        }
        Command::Copy => pg.copy_prompt().await?,
        Command::Show => {
            if json {
                match serde_json::to_string(&pg.snapshot().await) {
                    Ok(line) => println!("{line}"),
                    Err(e) => tracing::warn!(error = %e, "failed to encode snapshot"),
                }
            }
        }
        Command::Vibes => {
            let names: Vec<&str> = Vibe::ALL.iter().map(Vibe::as_str).collect();
            println!("{}", names.join(", "));
        }
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
    Ok(())
}
