//! CLI command implementations.

pub mod init_offsets;
pub mod snapshot;
pub mod status;
pub mod watch;

use anyhow::{Result, bail};
use sightline_core::process::ProcessHandle;
use sightline_core::{
    AttachTarget, AttachedProcess, OffsetTable, Settings, SystemLocator, Viewport, attach,
    load_offsets,
};
use tracing::{info, warn};

use crate::cli::Args;

/// Everything resolved once at startup.
pub struct Session {
    pub process: AttachedProcess<ProcessHandle>,
    pub offsets: OffsetTable,
    pub viewport: Viewport,
}

impl Session {
    pub fn connect(args: &Args) -> Result<Self> {
        let offsets = match load_offsets(&args.offsets) {
            Ok(offsets) => {
                info!("Loaded offsets from {:?}", args.offsets);
                offsets
            }
            Err(e) => bail!("Failed to load offsets from {:?}: {}", args.offsets, e),
        };

        let viewport = match (args.width, args.height) {
            (Some(width), Some(height)) => Viewport::new(width as f32, height as f32),
            _ => Viewport::primary_screen()?,
        };

        let target = AttachTarget {
            process: args.process.clone(),
            module: args.module.clone(),
        };
        let process = attach(&SystemLocator, &target)?;

        Ok(Self {
            process,
            offsets,
            viewport,
        })
    }
}

/// Settings from `--settings`, or defaults if absent or unreadable.
pub fn load_settings(args: &Args) -> Settings {
    let Some(path) = &args.settings else {
        return Settings::default();
    };

    match Settings::load(path) {
        Ok(settings) => {
            info!("Loaded settings from {:?}", path);
            settings
        }
        Err(e) => {
            warn!("Failed to load settings: {}, using defaults", e);
            Settings::default()
        }
    }
}
