//! Storage access and random-access readers.
//!
//! [`Storage`] is the filesystem seam used by the parser and the cover
//! extractor; [`ReadAt`] is what the ZIP decoder reads archive bytes through.

mod loader;
mod local;
mod memory;

pub use loader::load_bytes;
pub use local::LocalStorage;
pub use memory::MemoryReader;

use async_trait::async_trait;
use std::io;
use std::path::Path;

/// Trait for random access reading from a data source
#[async_trait]
pub trait ReadAt: Send + Sync {
    /// Read data at the specified offset into the buffer
    async fn read_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<usize>;

    /// Get the total size of the data source
    fn size(&self) -> u64;
}

/// Whole-file storage primitives
#[async_trait]
pub trait Storage: Send + Sync {
    async fn exists(&self, path: &Path) -> bool;

    async fn read_all(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Write `data` to `path`, replacing any existing file.
    async fn write_all(&self, path: &Path, data: &[u8]) -> io::Result<()>;
}
