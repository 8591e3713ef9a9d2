//! Single-pass snapshot command.

use anyhow::Result;
use sightline_core::{EntitySummary, EntityWalker, MemoryReader, Settings};

use super::Session;

pub fn run(session: &Session, settings: &Settings, summary: bool) -> Result<()> {
    let reader = MemoryReader::new(&session.process.handle);
    let walker = EntityWalker::new(&reader, session.process.module_base, &session.offsets);

    let entities = walker.walk(settings, &session.viewport)?;

    if summary {
        let summaries: Vec<EntitySummary> = entities.iter().map(|e| e.summary()).collect();
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        println!("{}", serde_json::to_string_pretty(&entities)?);
    }

    Ok(())
}
