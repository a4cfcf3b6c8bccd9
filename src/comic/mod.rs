//! Comic book metadata and cover extraction.
//!
//! [`ComicParser`] is the entry point for scanning a comic archive: it
//! decodes the `ComicInfo.xml` sidecar and picks the first page image as the
//! cover candidate. [`CoverExtractor`] later copies that entry's bytes out of
//! the archive.

mod cover;
mod info;
mod metadata;
mod parser;
mod sidecar;

pub use cover::{CoverExtractor, select_cover_entry};
pub use info::{ComicInfo, ComicInfoXml, XmlDecoder};
pub use metadata::{
    ComicInfoNormalizer, ComicMetadata, Credits, Manga, MetadataNormalizer, PageInfo,
    PublicationDate,
};
pub use parser::{ComicFile, ComicFormat, ComicParser, ParsedComic};
pub use sidecar::{find_sidecar, read_sidecar};

#[cfg(test)]
pub(crate) mod fake;
