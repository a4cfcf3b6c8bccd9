//! ZIP (CBZ) archive decoding.
//!
//! This module provides the [`ZipDecoder`] implementation of
//! [`ArchiveDecoder`](crate::archive::ArchiveDecoder), supporting both the
//! standard ZIP format and ZIP64 extensions for large archives.
//!
//! ## Architecture
//!
//! - [`structures`]: Data structures representing ZIP format elements (EOCD, file headers, etc.)
//! - [`parser`]: Low-level parsing of ZIP structures from raw bytes
//! - [`session`]: The decoder and the open-archive session built on the parser
//!
//! ## ZIP Format Overview
//!
//! A ZIP file consists of:
//! 1. Local file headers and compressed data for each file
//! 2. Central Directory with metadata for all files
//! 3. End of Central Directory (EOCD) record at the end
//!
//! The EOCD is read first (from the end of the file), then the Central
//! Directory, which lists every entry without touching entry data.
//!
//! ## Supported Features
//!
//! - Standard ZIP format (PKZIP APPNOTE 6.3.x compatible)
//! - ZIP64 extensions for files > 4GB
//! - STORED (no compression) method
//! - DEFLATE compression method
//! - CRC-32 verification of extracted data
//!
//! ## Limitations
//!
//! - No encryption support
//! - No multi-disk archive support
//! - No BZIP2, LZMA, or other compression methods

mod parser;
mod session;
mod structures;
#[cfg(test)]
pub(crate) mod testutil;

pub use parser::ZipParser;
pub use session::{ZipDecoder, ZipSession};
pub use structures::*;
