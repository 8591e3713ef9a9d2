//! CLI argument definitions for sightline.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sightline_core::process::provider::{DEFAULT_MODULE_NAME, DEFAULT_PROCESS_NAME};

#[derive(Parser)]
#[command(name = "sightline")]
#[command(about = "Entity table reader and screen projector", version)]
pub struct Args {
    /// Offsets file (JSON)
    #[arg(long, value_name = "FILE", default_value = "offsets.json")]
    pub offsets: PathBuf,

    /// Settings file (JSON, optional)
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Target executable name
    #[arg(long, default_value = DEFAULT_PROCESS_NAME, env = "SIGHTLINE_PROCESS")]
    pub process: String,

    /// Module the global offsets are relative to
    #[arg(long, default_value = DEFAULT_MODULE_NAME)]
    pub module: String,

    /// Viewport width in pixels (default: primary screen)
    #[arg(long, requires = "height")]
    pub width: Option<u32>,

    /// Viewport height in pixels (default: primary screen)
    #[arg(long, requires = "width")]
    pub height: Option<u32>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the frame loop until Esc, q or Ctrl+C
    Watch {
        /// Print one JSON line per frame
        #[arg(long)]
        json: bool,
    },
    /// Run a single pass and print the entities as JSON
    Snapshot {
        /// Only print rect, team, health and name
        #[arg(long)]
        summary: bool,
    },
    /// Show attach and offset status
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write an offsets file with every key present and set to zero
    InitOffsets {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
