use log::{debug, error, warn};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use crate::archive::{ArchiveDecoder, ArchiveEntry, ArchiveSession, open_session};
use crate::config::{ImageExtensions, ParserConfig};
use crate::error::{DecodeError, ExtractError};
use crate::io::{LocalStorage, Storage, load_bytes};
use crate::zip::ZipDecoder;

/// First entry, in the given order, whose extension is a recognized image
/// type. Position is all that counts; names are not inspected otherwise.
pub fn select_cover_entry<'a, H>(
    entries: &'a [ArchiveEntry<H>],
    extensions: &ImageExtensions,
) -> Option<&'a ArchiveEntry<H>> {
    entries.iter().find(|entry| extensions.matches(&entry.name))
}

#[derive(Debug, Error)]
enum CoverError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("entry not found in archive")]
    MissingEntry,

    #[error("entry has no data")]
    NoData,
}

/// Copies one entry of a comic archive to disk
pub struct CoverExtractor<D: ArchiveDecoder, S: Storage = LocalStorage> {
    decoder: D,
    storage: S,
}

impl CoverExtractor<ZipDecoder, LocalStorage> {
    /// Extractor for ZIP-based archives on the local filesystem.
    pub fn new(config: &ParserConfig) -> Self {
        Self::with_parts(
            ZipDecoder::new().with_max_entry_size(config.max_entry_size),
            LocalStorage,
        )
    }
}

impl<D: ArchiveDecoder, S: Storage> CoverExtractor<D, S> {
    pub fn with_parts(decoder: D, storage: S) -> Self {
        Self { decoder, storage }
    }

    /// Write the raw bytes of `entry_name` from the archive at
    /// `archive_path` to `output_path`.
    ///
    /// Returns `true` only once the write has completed. Every failure is
    /// logged with the archive, entry and output paths and reported as
    /// `false`; nothing is retried.
    pub async fn extract_cover(
        &self,
        archive_path: &Path,
        entry_name: &str,
        output_path: &Path,
    ) -> bool {
        let Some(bytes) = load_bytes(&self.storage, archive_path).await else {
            warn!(
                "Cannot extract cover {} from {}: archive unavailable",
                entry_name,
                archive_path.display()
            );
            return false;
        };

        let data = match self.read_entry(Arc::from(bytes), entry_name).await {
            Ok(data) => data,
            Err(e) => {
                error!(
                    "Failed to extract cover {} from {} to {}: {}",
                    entry_name,
                    archive_path.display(),
                    output_path.display(),
                    e
                );
                return false;
            }
        };

        match self.storage.write_all(output_path, &data).await {
            Ok(()) => {
                debug!(
                    "Wrote cover {} ({} bytes) from {} to {}",
                    entry_name,
                    data.len(),
                    archive_path.display(),
                    output_path.display()
                );
                true
            }
            Err(e) => {
                error!(
                    "Failed to write cover {} from {} to {}: {}",
                    entry_name,
                    archive_path.display(),
                    output_path.display(),
                    e
                );
                false
            }
        }
    }

    /// The session is closed when the guard drops, before this returns.
    async fn read_entry(&self, bytes: Arc<[u8]>, entry_name: &str) -> Result<Vec<u8>, CoverError> {
        let session = open_session(&self.decoder, bytes).await?;
        let entries = session.list_entries().await?;
        let entry = entries
            .iter()
            .find(|entry| entry.name == entry_name)
            .ok_or(CoverError::MissingEntry)?;

        match session.extract(&entry.handle).await? {
            Some(data) if !data.is_empty() => Ok(data),
            _ => Err(CoverError::NoData),
        }
    }
}
