//! # comicmeta
//!
//! Extract `ComicInfo.xml` metadata and a cover image from comic book
//! archives (CBZ and other ZIP-based containers).
//!
//! Archives are read fully into memory and opened through an
//! [`ArchiveDecoder`]. Entries are sorted in natural order (`page9.jpg`
//! before `page10.jpg`), the sidecar is decoded and normalized into
//! [`ComicMetadata`], and the first page image becomes the cover candidate.
//! Sessions are closed on every exit path.
//!
//! ## Features
//!
//! - ZIP and ZIP64 archives with STORED and DEFLATE entries
//! - Bounded, CRC-checked entry extraction from untrusted archives
//! - `ComicInfo.xml` decoding and normalization (credits, dates, pages, ...)
//! - Pluggable decoder, storage, XML decoder and normalizer for testing
//!   or other container formats
//!
//! ## Example
//!
//! ```no_run
//! use std::path::Path;
//! use comicmeta::{ComicFile, ComicParser, CoverExtractor, ParserConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ParserConfig::default();
//!     let parser = ComicParser::new(config.clone());
//!
//!     let file = ComicFile::from_path("library/saga-001.cbz");
//!     if let Some(parsed) = parser.parse(&file).await {
//!         if let Some(meta) = &parsed.metadata {
//!             println!("{:?} #{:?}", meta.series, meta.number);
//!         }
//!         if let Some(cover) = &parsed.cover_entry_name {
//!             let extractor = CoverExtractor::new(&config);
//!             extractor
//!                 .extract_cover(&parsed.path, cover, Path::new("covers/saga-001.jpg"))
//!                 .await;
//!         }
//!     }
//! }
//! ```

pub mod archive;
pub mod cli;
pub mod comic;
pub mod config;
pub mod error;
pub mod io;
pub mod zip;

pub use archive::{ArchiveDecoder, ArchiveEntry, ArchiveSession, SessionGuard, natural_cmp};
pub use cli::Cli;
pub use comic::{
    ComicFile, ComicFormat, ComicInfo, ComicMetadata, ComicParser, CoverExtractor, ParsedComic,
};
pub use config::{ImageExtensions, ParserConfig};
pub use error::{DecodeError, ExtractError};
pub use io::{LocalStorage, MemoryReader, ReadAt, Storage};
pub use zip::{ZipDecoder, ZipFileEntry};
