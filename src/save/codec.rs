use anyhow::{Context, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD};

use super::GridSnapshot;

pub fn snapshot_to_json_string(snapshot: &GridSnapshot) -> Result<String> {
    serde_json::to_string(snapshot).context("failed to serialize grid snapshot to JSON")
}

/// Parses a snapshot and rejects versions newer than [`super::SNAPSHOT_VERSION`].
pub fn snapshot_from_json_string(json: &str) -> Result<GridSnapshot> {
    snapshot_from_json_bytes(json.as_bytes())
}

pub fn export_to_base64(snapshot: &GridSnapshot) -> Result<String> {
    let json = serde_json::to_vec(snapshot).context("failed to serialize grid snapshot to JSON")?;
    Ok(STANDARD.encode(json))
}

/// Decodes an [`export_to_base64`] string; surrounding whitespace is ignored.
pub fn import_from_base64(encoded: &str) -> Result<GridSnapshot> {
    let json = STANDARD
        .decode(encoded.trim())
        .context("failed to decode base64 grid snapshot")?;
    snapshot_from_json_bytes(&json)
}

fn snapshot_from_json_bytes(json: &[u8]) -> Result<GridSnapshot> {
    let snapshot: GridSnapshot =
        serde_json::from_slice(json).context("failed to parse grid snapshot JSON")?;
    snapshot.ensure_supported()?;
    Ok(snapshot)
}
