//! Close-counting decoder double for exercising failure paths.

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::archive::{ArchiveDecoder, ArchiveEntry, ArchiveSession};
use crate::error::{DecodeError, ExtractError};

#[derive(Debug, Clone)]
pub enum FakeEntry {
    Data(Vec<u8>),
    NoData,
    Fail,
}

#[derive(Clone, Default)]
pub struct FakeDecoder {
    entries: Vec<(String, FakeEntry)>,
    fail_open: bool,
    fail_list: bool,
    pub opens: Arc<AtomicUsize>,
    pub closes: Arc<AtomicUsize>,
}

impl FakeDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(mut self, name: &str, entry: FakeEntry) -> Self {
        self.entries.push((name.to_string(), entry));
        self
    }

    pub fn data(self, name: &str, data: &[u8]) -> Self {
        self.entry(name, FakeEntry::Data(data.to_vec()))
    }

    pub fn failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub fn open_count(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub fn close_count(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ArchiveDecoder for FakeDecoder {
    type Session = FakeSession;

    async fn open(&self, _bytes: Arc<[u8]>) -> Result<FakeSession, DecodeError> {
        if self.fail_open {
            return Err(DecodeError::NotAnArchive);
        }
        self.opens.fetch_add(1, Ordering::SeqCst);
        Ok(FakeSession {
            entries: self.entries.clone(),
            fail_list: self.fail_list,
            closes: self.closes.clone(),
            closed: false,
        })
    }
}

pub struct FakeSession {
    entries: Vec<(String, FakeEntry)>,
    fail_list: bool,
    closes: Arc<AtomicUsize>,
    closed: bool,
}

impl FakeSession {
    pub fn from_entries(entries: Vec<(&str, Option<Vec<u8>>)>) -> Self {
        let decoder = entries
            .into_iter()
            .fold(FakeDecoder::new(), |decoder, (name, payload)| match payload {
                Some(data) => decoder.entry(name, FakeEntry::Data(data)),
                None => decoder.entry(name, FakeEntry::NoData),
            });
        FakeSession {
            entries: decoder.entries,
            fail_list: false,
            closes: decoder.closes,
            closed: false,
        }
    }
}

#[async_trait]
impl ArchiveSession for FakeSession {
    type Handle = usize;

    async fn list_entries(&self) -> Result<Vec<ArchiveEntry<usize>>, DecodeError> {
        if self.closed {
            return Err(DecodeError::SessionClosed);
        }
        if self.fail_list {
            return Err(DecodeError::Malformed("forced listing failure".into()));
        }
        Ok(self
            .entries
            .iter()
            .enumerate()
            .map(|(i, (name, _))| ArchiveEntry {
                name: name.clone(),
                handle: i,
            })
            .collect())
    }

    async fn extract(&self, handle: &usize) -> Result<Option<Vec<u8>>, ExtractError> {
        if self.closed {
            return Err(ExtractError::SessionClosed);
        }
        match &self.entries[*handle].1 {
            FakeEntry::Data(data) => Ok(Some(data.clone())),
            FakeEntry::NoData => Ok(None),
            FakeEntry::Fail => Err(ExtractError::Corrupt("forced extraction failure".into())),
        }
    }

    /// Counts every call, so a double close shows up in tests.
    fn close(&mut self) {
        self.closed = true;
        self.closes.fetch_add(1, Ordering::SeqCst);
    }
}
