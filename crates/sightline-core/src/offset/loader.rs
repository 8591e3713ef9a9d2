use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::offset::OffsetTable;

/// Load an offset table from a JSON file.
pub fn load_offsets<P: AsRef<Path>>(path: P) -> Result<OffsetTable> {
    let content = fs::read_to_string(&path)?;
    let offsets: OffsetTable = serde_json::from_str(&content)?;

    debug!(
        "Loaded offsets from {}: view_matrix={:#x}, entity_list={:#x}, local_player_pawn={:#x}",
        path.as_ref().display(),
        offsets.view_matrix,
        offsets.entity_list,
        offsets.local_player_pawn
    );
    let missing = offsets.missing();
    if !missing.is_empty() {
        warn!("Offsets not set (reads through them will fail): {}", missing.join(", "));
    }

    Ok(offsets)
}

pub fn save_offsets<P: AsRef<Path>>(path: P, offsets: &OffsetTable) -> Result<()> {
    let content = serde_json::to_string_pretty(offsets)?;
    fs::write(path, content)?;
    Ok(())
}

/// Parse a hex value with an optional `0x`/`0X` prefix.
pub fn parse_hex_value(value: &str) -> Result<u64> {
    let value = value.trim();
    // Strip hex prefix (case-insensitive), only once
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);

    u64::from_str_radix(digits, 16)
        .map_err(|e| Error::InvalidOffset(format!("Failed to parse '{}': {}", value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_value() {
        assert_eq!(parse_hex_value("0x1A2B").unwrap(), 0x1A2B);
        assert_eq!(parse_hex_value("0X1a2b").unwrap(), 0x1A2B);
        assert_eq!(parse_hex_value(" ff ").unwrap(), 0xFF);
        assert!(parse_hex_value("0x").is_err());
        assert!(parse_hex_value("0x0xFF").is_err());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("offsets.json");

        let offsets = OffsetTable {
            view_matrix: 0x1A33E30,
            entity_list: 0x18C2D58,
            bone_array: 0x80,
            ..Default::default()
        };
        save_offsets(&path, &offsets).unwrap();

        let loaded = load_offsets(&path).unwrap();
        assert_eq!(loaded, offsets);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_offsets(dir.path().join("nope.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_load_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("offsets.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(load_offsets(&path), Err(Error::Json(_))));
    }
}
