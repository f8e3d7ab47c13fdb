// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! lb - Lockbot from the terminal

mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{lock, token, Requester};
use lb_core::LockbotConfig;
use output::OutputFormat;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lb", version, about = "Lockbot - shared resource locks with a waitlist")]
struct Cli {
    /// Config file (TOML)
    #[arg(long, global = true, env = "LOCKBOT_CONFIG")]
    config: Option<PathBuf>,

    /// Team the channel belongs to
    #[arg(long, global = true, env = "LOCKBOT_TEAM")]
    team: Option<String>,

    /// Channel whose locks to act on
    #[arg(long, global = true, env = "LOCKBOT_CHANNEL")]
    channel: Option<String>,

    /// Who is asking
    #[arg(long, global = true, env = "USER")]
    user: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a lock, or join the line for it
    Lock(lock::LockArgs),
    /// Release a lock or leave its line
    Unlock(lock::UnlockArgs),
    /// List active locks in the channel
    Locks,
    /// Issue an API token for this channel
    Token(token::TokenArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging();

    let config = LockbotConfig::load(cli.config.as_deref())
        .context("failed to load config")?
        .with_env(|name| std::env::var(name).ok());
    let requester = Requester {
        team: cli.team.context("no team given; pass --team or set LOCKBOT_TEAM")?,
        channel: cli
            .channel
            .context("no channel given; pass --channel or set LOCKBOT_CHANNEL")?,
        user: cli.user.context("no user given; pass --user or set USER")?,
    };
    let bot = commands::open(&config)?;

    let response = match cli.command {
        Commands::Lock(args) => lock::lock(&bot, &requester, args).await?,
        Commands::Unlock(args) => lock::unlock(&bot, &requester, args).await?,
        Commands::Locks => lock::locks(&bot, &requester).await?,
        Commands::Token(args) => token::token(&bot, &requester, &config, args).await?,
    };

    output::print_response(&response, cli.format);
    Ok(())
}

/// Log to stderr so stdout carries only responses
fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
