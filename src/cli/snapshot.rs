//! Loading and saving view snapshots for the CLI

use crate::cli::commands::SnapshotFormat;
use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Read a snapshot written by [`save`]
pub fn load<V: DeserializeOwned, P: AsRef<Path>>(path: P, format: SnapshotFormat) -> Result<V> {
    let bytes = std::fs::read(path.as_ref())?;
    debug!(path = %path.as_ref().display(), bytes = bytes.len(), ?format, "loading snapshot");
    let view = match format {
        SnapshotFormat::Json => serde_json::from_slice(&bytes)?,
        SnapshotFormat::Bincode => bincode::deserialize(&bytes)?,
    };
    Ok(view)
}

/// Write a snapshot, replacing any existing file
pub fn save<V: Serialize, P: AsRef<Path>>(path: P, format: SnapshotFormat, view: &V) -> Result<()> {
    let bytes = match format {
        SnapshotFormat::Json => serde_json::to_vec_pretty(view)?,
        SnapshotFormat::Bincode => bincode::serialize(view)?,
    };
    std::fs::write(path.as_ref(), &bytes)?;
    debug!(path = %path.as_ref().display(), bytes = bytes.len(), ?format, "snapshot saved");
    Ok(())
}
