//! Status command implementation.

use anyhow::Result;
use owo_colors::OwoColorize;
use serde_json::json;

use super::Session;

pub fn run(session: &Session, json: bool) -> Result<()> {
    let process = &session.process;
    let missing = session.offsets.missing();

    if json {
        let status = json!({
            "pid": process.pid,
            "module_base": process.module_base.address(),
            "viewport": session.viewport,
            "missing_offsets": missing,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    let current_version = env!("CARGO_PKG_VERSION");
    println!("Sightline {} - Status", current_version);
    println!();
    println!("PID:         {}", process.pid);
    println!("Module base: {}", process.module_base);
    println!(
        "Viewport:    {}x{}",
        session.viewport.width, session.viewport.height
    );
    println!();

    if session.offsets.is_complete() {
        println!("Offsets:     {}", "complete".green());
    } else {
        println!("Offsets:     {} missing", missing.len().red());
        for name in &missing {
            println!("  {}", name);
        }
    }

    Ok(())
}
