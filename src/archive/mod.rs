//! Archive decoder interface and session lifecycle.
//!
//! An [`ArchiveDecoder`] turns archive bytes into an [`ArchiveSession`],
//! which lists entries and extracts them one at a time. Sessions are always
//! held through a [`SessionGuard`], which closes them exactly once on every
//! exit path, including early returns and unwinding.

mod guard;
mod sort;

pub use guard::{SessionGuard, open_session};
pub use sort::{list_sorted_entries, natural_cmp, sort_entries};

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::{DecodeError, ExtractError};

/// One named item inside an open archive.
///
/// The handle is only meaningful to the session that listed it.
#[derive(Debug, Clone)]
pub struct ArchiveEntry<H> {
    pub name: String,
    pub handle: H,
}

/// Opens archive bytes into a session
#[async_trait]
pub trait ArchiveDecoder: Send + Sync {
    type Session: ArchiveSession;

    /// Fails with [`DecodeError`] when `bytes` is not a readable archive.
    async fn open(&self, bytes: Arc<[u8]>) -> Result<Self::Session, DecodeError>;
}

/// A live handle over an opened archive
#[async_trait]
pub trait ArchiveSession: Send + Sync {
    type Handle: Send + Sync;

    /// List every entry in archive order.
    async fn list_entries(&self) -> Result<Vec<ArchiveEntry<Self::Handle>>, DecodeError>;

    /// Extract one entry. `Ok(None)` means the entry carries no data.
    async fn extract(&self, handle: &Self::Handle) -> Result<Option<Vec<u8>>, ExtractError>;

    /// Release decoder resources. Calling it more than once is a no-op.
    fn close(&mut self);
}
