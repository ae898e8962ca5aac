//! Loading and saving the store as a JSON snapshot file.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use barky_core::{ResourceStore, StoreSnapshot};
use tracing::info;

use crate::error::GatewayError;

fn persistence(path: &Path) -> impl FnOnce(std::io::Error) -> GatewayError + '_ {
    move |source| GatewayError::Persistence {
        path: path.to_owned(),
        source,
    }
}

/// Rebuild the store from `path`. A missing file yields an empty store.
///
/// # Errors
/// Returns [`GatewayError::Persistence`] if the file cannot be read,
/// [`GatewayError::Snapshot`] if it is not a valid snapshot, and
/// [`GatewayError::Store`] if the records break a store invariant.
pub async fn load_store(path: &Path) -> Result<ResourceStore, GatewayError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(path = %path.display(), "no snapshot found, starting empty");
            return Ok(ResourceStore::new());
        }
        Err(e) => return Err(persistence(path)(e)),
    };
    let snapshot: StoreSnapshot = serde_json::from_slice(&bytes)?;
    Ok(ResourceStore::from_snapshot(snapshot)?)
}

/// Write the store to `path`, replacing any previous snapshot atomically.
///
/// # Errors
/// Returns [`GatewayError::Persistence`] if the file cannot be written.
pub async fn save_store(path: &Path, store: &ResourceStore) -> Result<(), GatewayError> {
    let bytes = serde_json::to_vec_pretty(&store.snapshot())?;
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    tokio::fs::write(&tmp, bytes).await.map_err(persistence(&tmp))?;
    tokio::fs::rename(&tmp, path).await.map_err(persistence(path))?;
    info!(path = %path.display(), "snapshot written");
    Ok(())
}
