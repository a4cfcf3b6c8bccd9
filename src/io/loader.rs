use super::Storage;
use log::warn;
use std::path::Path;

/// Read a whole archive into memory.
///
/// Returns `None` when the file does not exist or cannot be read; both cases
/// are logged, never returned as errors. No retry is attempted.
pub async fn load_bytes<S: Storage + ?Sized>(storage: &S, path: &Path) -> Option<Vec<u8>> {
    if !storage.exists(path).await {
        warn!("Archive not found: {}", path.display());
        return None;
    }

    match storage.read_all(path).await {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            warn!("Failed to read archive {}: {}", path.display(), e);
            None
        }
    }
}
