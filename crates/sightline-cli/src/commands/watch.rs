//! Frame loop command.

use std::sync::Arc;

use anyhow::Result;
use sightline_core::{EntitySummary, EntityWalker, MemoryReader, Settings, SharedSettings};
use tracing::{debug, info};

use super::Session;
use crate::input;
use crate::render;
use crate::shutdown::ShutdownSignal;

pub fn run(session: &Session, settings: Settings, json: bool) -> Result<()> {
    let shutdown = Arc::new(ShutdownSignal::new());

    let shutdown_ctrlc = Arc::clone(&shutdown);
    ctrlc::set_handler(move || {
        render::print_lines("\nShutting down...");
        shutdown_ctrlc.trigger();
    })?;

    let shared = SharedSettings::new(settings);
    let raw_mode = input::RawModeGuard::try_enable();
    let keyboard = input::spawn_keyboard_monitor(Arc::clone(&shutdown), shared.clone());

    if !json {
        render::print_lines(&render::format_menu(&shared.snapshot()));
    }

    let reader = MemoryReader::new(&session.process.handle);
    let walker = EntityWalker::new(&reader, session.process.module_base, &session.offsets);

    let mut frames: u64 = 0;
    let mut last_frame = String::new();

    while !shutdown.is_shutdown() {
        let settings = shared.snapshot();
        let entities = walker.walk_or_empty(&settings, &session.viewport);
        frames += 1;

        if json {
            let summaries: Vec<EntitySummary> = entities.iter().map(|e| e.summary()).collect();
            render::print_lines(&serde_json::to_string(&summaries)?);
        } else {
            // Redraw only when something visible changed
            let frame = render::format_frame(&entities, &settings);
            if frame != last_frame {
                render::print_lines(&frame);
                last_frame = frame;
            }
        }

        if shutdown.wait(settings.frame_delay()) {
            break;
        }
    }

    if keyboard.join().is_err() {
        debug!("Keyboard monitor panicked");
    }
    drop(raw_mode);
    info!("Stopped after {} frames", frames);
    println!("Shutdown complete.");
    Ok(())
}
