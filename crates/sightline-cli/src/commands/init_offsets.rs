//! Offsets template command.
//!
//! Writes every offset key with a zero value so the file only needs filling
//! in from a current dump.

use std::path::Path;

use anyhow::{Result, bail};
use sightline_core::{OffsetTable, save_offsets};
use tracing::info;

pub fn run(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{:?} already exists (use --force to overwrite)", path);
    }

    let template = OffsetTable::default();
    save_offsets(path, &template)?;
    info!("Wrote offsets template to {:?}", path);

    println!("Offsets template saved to: {}", path.display());
    println!("Fill in: {}", template.missing().join(", "));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sightline_core::load_offsets;

    #[test]
    fn test_writes_loadable_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("offsets.json");

        run(&path, false).unwrap();

        let loaded = load_offsets(&path).unwrap();
        assert_eq!(loaded, OffsetTable::default());
        assert_eq!(loaded.missing().len(), 13);
    }

    #[test]
    fn test_existing_file_needs_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("offsets.json");
        std::fs::write(&path, r#"{"dwViewMatrix": "0x10"}"#).unwrap();

        assert!(run(&path, false).is_err());
        assert_eq!(load_offsets(&path).unwrap().view_matrix, 0x10);

        run(&path, true).unwrap();
        assert_eq!(load_offsets(&path).unwrap().view_matrix, 0);
    }
}
