mod cli;
mod commands;
mod input;
mod render;
mod shutdown;

use std::process::ExitCode;
use std::thread;

use anyhow::Result;
use clap::Parser;
use cli::{Args, Command};
use commands::Session;
use sightline_core::config::timing::FATAL_EXIT_DELAY;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("sightline_cli=info,sightline_core=info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            thread::sleep(FATAL_EXIT_DELAY);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    if let Some(Command::InitOffsets { force }) = args.command {
        return commands::init_offsets::run(&args.offsets, force);
    }

    let settings = commands::load_settings(&args);
    let session = Session::connect(&args)?;
    info!(
        "Viewport {}x{}",
        session.viewport.width, session.viewport.height
    );

    match args.command {
        Some(Command::Watch { json }) => commands::watch::run(&session, settings, json),
        Some(Command::Snapshot { summary }) => commands::snapshot::run(&session, &settings, summary),
        Some(Command::Status { json }) => commands::status::run(&session, json),
        Some(Command::InitOffsets { .. }) | None => commands::watch::run(&session, settings, false),
    }
}
