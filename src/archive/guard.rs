use log::debug;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use super::{ArchiveDecoder, ArchiveSession};
use crate::error::DecodeError;

/// Owns an open session and closes it when dropped.
pub struct SessionGuard<S: ArchiveSession> {
    session: S,
    closed: bool,
}

impl<S: ArchiveSession> SessionGuard<S> {
    pub fn new(session: S) -> Self {
        Self {
            session,
            closed: false,
        }
    }

    /// Close the session now instead of at drop.
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if !self.closed {
            self.closed = true;
            self.session.close();
            debug!("Archive session closed");
        }
    }
}

impl<S: ArchiveSession> Deref for SessionGuard<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.session
    }
}

impl<S: ArchiveSession> DerefMut for SessionGuard<S> {
    fn deref_mut(&mut self) -> &mut S {
        &mut self.session
    }
}

impl<S: ArchiveSession> Drop for SessionGuard<S> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Open `bytes` with `decoder`. A guard exists only if the open succeeded,
/// so a failed open never leads to a `close()`.
pub async fn open_session<D: ArchiveDecoder + ?Sized>(
    decoder: &D,
    bytes: Arc<[u8]>,
) -> Result<SessionGuard<D::Session>, DecodeError> {
    let session = decoder.open(bytes).await?;
    Ok(SessionGuard::new(session))
}
