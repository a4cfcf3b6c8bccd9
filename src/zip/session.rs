use async_trait::async_trait;
use flate2::read::DeflateDecoder;
use log::debug;
use std::io::Read;
use std::sync::Arc;

use crate::archive::{ArchiveDecoder, ArchiveEntry, ArchiveSession};
use crate::config::DEFAULT_MAX_ENTRY_SIZE;
use crate::error::{DecodeError, ExtractError};
use crate::io::MemoryReader;

use super::parser::ZipParser;
use super::structures::{CompressionMethod, ZipFileEntry};

/// Opens ZIP (CBZ) archives held in memory
#[derive(Debug, Clone)]
pub struct ZipDecoder {
    max_entry_size: u64,
}

impl ZipDecoder {
    pub fn new() -> Self {
        Self {
            max_entry_size: DEFAULT_MAX_ENTRY_SIZE,
        }
    }

    /// Refuse to extract entries whose uncompressed size exceeds `limit`.
    pub fn with_max_entry_size(mut self, limit: u64) -> Self {
        self.max_entry_size = limit;
        self
    }
}

impl Default for ZipDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArchiveDecoder for ZipDecoder {
    type Session = ZipSession;

    /// Reads the Central Directory up front, so anything that is not a
    /// listable ZIP fails here rather than at first use.
    async fn open(&self, bytes: Arc<[u8]>) -> Result<ZipSession, DecodeError> {
        let parser = ZipParser::new(Arc::new(MemoryReader::new(bytes)));
        let entries = parser.list_files().await?;
        debug!("Opened ZIP archive with {} entries", entries.len());

        Ok(ZipSession {
            parser: Some(parser),
            entries,
            max_entry_size: self.max_entry_size,
        })
    }
}

/// An open ZIP archive
pub struct ZipSession {
    parser: Option<ZipParser<MemoryReader>>,
    entries: Vec<ZipFileEntry>,
    max_entry_size: u64,
}

impl ZipSession {
    fn parser(&self) -> Result<&ZipParser<MemoryReader>, DecodeError> {
        self.parser.as_ref().ok_or(DecodeError::SessionClosed)
    }

    /// Decompress one entry, bounded by its declared size and verified
    /// against its CRC-32.
    async fn extract_to_memory(&self, entry: &ZipFileEntry) -> Result<Vec<u8>, ExtractError> {
        let parser = self.parser()?;

        if entry.is_encrypted() {
            return Err(ExtractError::Encrypted);
        }
        if entry.uncompressed_size > self.max_entry_size {
            return Err(ExtractError::TooLarge {
                size: entry.uncompressed_size,
                limit: self.max_entry_size,
            });
        }

        let data_offset = parser.get_data_offset(entry).await?;
        let raw = parser.read_raw(data_offset, entry.compressed_size).await?;

        let data = match entry.compression_method {
            CompressionMethod::Stored => {
                if entry.compressed_size != entry.uncompressed_size {
                    return Err(ExtractError::Corrupt(format!(
                        "stored entry {} has mismatched sizes",
                        entry.file_name
                    )));
                }
                raw
            }
            CompressionMethod::Deflate => inflate(&raw, entry.uncompressed_size)?,
            CompressionMethod::Unknown(method) => {
                return Err(ExtractError::UnsupportedMethod(method));
            }
        };

        let actual = crc32fast::hash(&data);
        if actual != entry.crc32 {
            return Err(ExtractError::CrcMismatch {
                expected: entry.crc32,
                actual,
            });
        }

        Ok(data)
    }
}

/// Inflate `raw`, producing exactly `expected` bytes or failing.
fn inflate(raw: &[u8], expected: u64) -> Result<Vec<u8>, ExtractError> {
    let mut data = Vec::with_capacity(expected as usize);
    // One byte of slack detects streams that inflate past the declared size
    DeflateDecoder::new(raw)
        .take(expected + 1)
        .read_to_end(&mut data)?;

    if data.len() as u64 != expected {
        return Err(ExtractError::Corrupt(format!(
            "inflated {} bytes, expected {}",
            data.len(),
            expected
        )));
    }
    Ok(data)
}

#[async_trait]
impl ArchiveSession for ZipSession {
    type Handle = ZipFileEntry;

    async fn list_entries(&self) -> Result<Vec<ArchiveEntry<ZipFileEntry>>, DecodeError> {
        self.parser()?;

        Ok(self
            .entries
            .iter()
            .map(|entry| ArchiveEntry {
                name: entry.file_name.clone(),
                handle: entry.clone(),
            })
            .collect())
    }

    async fn extract(&self, handle: &ZipFileEntry) -> Result<Option<Vec<u8>>, ExtractError> {
        self.parser()?;
        if handle.is_directory {
            return Ok(None);
        }
        self.extract_to_memory(handle).await.map(Some)
    }

    fn close(&mut self) {
        self.parser = None;
        self.entries.clear();
    }
}
