use log::{debug, error, warn};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::cover::select_cover_entry;
use super::info::{ComicInfoXml, XmlDecoder};
use super::metadata::{ComicInfoNormalizer, ComicMetadata, MetadataNormalizer};
use super::sidecar::{find_sidecar, read_sidecar};
use crate::archive::{ArchiveDecoder, list_sorted_entries, open_session};
use crate::config::ParserConfig;
use crate::io::{LocalStorage, Storage, load_bytes};
use crate::zip::ZipDecoder;

/// Container format tag supplied by the caller and passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComicFormat {
    Cbz,
    Cbr,
    Cb7,
    Cbt,
    Zip,
    Other(String),
}

impl ComicFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_tag(&ext)
    }

    /// Parse a format tag such as `cbz`; unknown tags are kept lowercased.
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim().trim_start_matches('.').to_ascii_lowercase();
        match tag.as_str() {
            "cbz" => ComicFormat::Cbz,
            "cbr" => ComicFormat::Cbr,
            "cb7" => ComicFormat::Cb7,
            "cbt" => ComicFormat::Cbt,
            "zip" => ComicFormat::Zip,
            _ => ComicFormat::Other(tag),
        }
    }
}

impl fmt::Display for ComicFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComicFormat::Cbz => write!(f, "cbz"),
            ComicFormat::Cbr => write!(f, "cbr"),
            ComicFormat::Cb7 => write!(f, "cb7"),
            ComicFormat::Cbt => write!(f, "cbt"),
            ComicFormat::Zip => write!(f, "zip"),
            ComicFormat::Other(tag) => write!(f, "{tag}"),
        }
    }
}

/// A comic file handed in by the scan pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComicFile {
    pub path: PathBuf,
    pub format: ComicFormat,
}

impl ComicFile {
    pub fn new(path: impl Into<PathBuf>, format: ComicFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// Describe `path`, deriving the format from its extension.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = ComicFormat::from_path(&path);
        Self { path, format }
    }
}

/// Result of parsing one comic archive.
///
/// `metadata` and `cover_entry_name` are independent: either may be missing
/// while the other is present.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedComic {
    pub path: PathBuf,
    pub format: ComicFormat,
    pub metadata: Option<ComicMetadata>,
    /// Path inside the archive of the first page image.
    pub cover_entry_name: Option<String>,
}

/// Reads metadata and the cover candidate out of comic archives
pub struct ComicParser<D: ArchiveDecoder, S: Storage = LocalStorage> {
    decoder: D,
    storage: S,
    config: ParserConfig,
    xml: Box<dyn XmlDecoder>,
    normalizer: Box<dyn MetadataNormalizer>,
}

impl ComicParser<ZipDecoder, LocalStorage> {
    /// Parser for ZIP-based archives on the local filesystem.
    pub fn new(config: ParserConfig) -> Self {
        let decoder = ZipDecoder::new().with_max_entry_size(config.max_entry_size);
        Self::with_parts(decoder, LocalStorage, config)
    }
}

impl<D: ArchiveDecoder, S: Storage> ComicParser<D, S> {
    pub fn with_parts(decoder: D, storage: S, config: ParserConfig) -> Self {
        Self {
            decoder,
            storage,
            config,
            xml: Box::new(ComicInfoXml),
            normalizer: Box::new(ComicInfoNormalizer),
        }
    }

    pub fn with_xml_decoder(mut self, xml: impl XmlDecoder + 'static) -> Self {
        self.xml = Box::new(xml);
        self
    }

    pub fn with_normalizer(mut self, normalizer: impl MetadataNormalizer + 'static) -> Self {
        self.normalizer = Box::new(normalizer);
        self
    }

    /// Parse one comic archive.
    ///
    /// Returns `None` only if the file cannot be read or the archive cannot
    /// be opened and listed. A bad sidecar or a missing page image degrades
    /// the corresponding field instead. The archive session is closed
    /// before this returns, whatever the outcome.
    pub async fn parse(&self, file: &ComicFile) -> Option<ParsedComic> {
        let bytes = load_bytes(&self.storage, &file.path).await?;

        let session = match open_session(&self.decoder, Arc::from(bytes)).await {
            Ok(session) => session,
            Err(e) => {
                error!("Failed to open archive {}: {}", file.path.display(), e);
                return None;
            }
        };

        let entries = match list_sorted_entries(&*session).await {
            Ok(entries) => entries,
            Err(e) => {
                error!("Failed to list archive {}: {}", file.path.display(), e);
                return None;
            }
        };
        debug!("{}: {} entries", file.path.display(), entries.len());

        let metadata = match find_sidecar(&entries, &self.config.sidecar_name) {
            Some(entry) => {
                read_sidecar(
                    &*session,
                    entry,
                    self.xml.as_ref(),
                    self.normalizer.as_ref(),
                )
                .await
            }
            None => {
                debug!(
                    "{}: no {} found",
                    file.path.display(),
                    self.config.sidecar_name
                );
                None
            }
        };

        let cover_entry_name = select_cover_entry(&entries, &self.config.image_extensions)
            .map(|entry| entry.name.clone());
        if cover_entry_name.is_none() {
            warn!("{}: no page image found for a cover", file.path.display());
        }

        session.close();

        Some(ParsedComic {
            path: file.path.clone(),
            format: file.format.clone(),
            metadata,
            cover_entry_name,
        })
    }
}
