//! In-memory ZIP writer for building test fixtures.

use byteorder::{LittleEndian, WriteBytesExt};
use flate2::Compression;
use flate2::write::DeflateEncoder;
use std::io::Write;

use super::structures::FLAG_ENCRYPTED;

const ZIP64_SENTINEL: u32 = 0xFFFFFFFF;

struct Member {
    name: String,
    method: u16,
    flags: u16,
    crc: u32,
    uncompressed_size: u64,
    payload: Vec<u8>,
}

#[derive(Default)]
pub struct ZipBuilder {
    members: Vec<Member>,
    comment: Vec<u8>,
    zip64: bool,
}

impl ZipBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stored(self, name: &str, data: &[u8]) -> Self {
        self.stored_with_crc(name, data, crc32fast::hash(data))
    }

    pub fn stored_with_crc(self, name: &str, data: &[u8], crc: u32) -> Self {
        self.push(name, 0, crc, data.len() as u64, data.to_vec())
    }

    pub fn deflated(self, name: &str, data: &[u8]) -> Self {
        self.deflated_with_size(name, data, data.len() as u64)
    }

    /// Deflate `data` but declare `declared_size` as its uncompressed size.
    pub fn deflated_with_size(self, name: &str, data: &[u8], declared_size: u64) -> Self {
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        let payload = encoder.finish().unwrap();
        self.push(name, 8, crc32fast::hash(data), declared_size, payload)
    }

    /// Store `data` verbatim but label it with an arbitrary method id.
    pub fn with_method(self, name: &str, data: &[u8], method: u16) -> Self {
        let crc = crc32fast::hash(data);
        self.push(name, method, crc, data.len() as u64, data.to_vec())
    }

    /// Store `data` with the encryption flag set.
    pub fn encrypted(mut self, name: &str, data: &[u8]) -> Self {
        self = self.stored(name, data);
        if let Some(member) = self.members.last_mut() {
            member.flags |= FLAG_ENCRYPTED;
        }
        self
    }

    pub fn directory(self, name: &str) -> Self {
        self.push(name, 0, 0, 0, Vec::new())
    }

    pub fn comment(mut self, comment: &[u8]) -> Self {
        self.comment = comment.to_vec();
        self
    }

    /// Write sizes and offsets through ZIP64 records instead of the
    /// 32-bit header fields.
    pub fn zip64(mut self) -> Self {
        self.zip64 = true;
        self
    }

    fn push(mut self, name: &str, method: u16, crc: u32, size: u64, payload: Vec<u8>) -> Self {
        self.members.push(Member {
            name: name.to_string(),
            method,
            flags: 0,
            crc,
            uncompressed_size: size,
            payload,
        });
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut out = Vec::new();
        let mut offsets = Vec::with_capacity(self.members.len());

        for m in &self.members {
            offsets.push(out.len() as u64);
            out.extend_from_slice(b"PK\x03\x04");
            put_u16(&mut out, 45);
            put_u16(&mut out, m.flags);
            put_u16(&mut out, m.method);
            put_u16(&mut out, 0);
            put_u16(&mut out, 0x21);
            put_u32(&mut out, m.crc);
            if self.zip64 {
                put_u32(&mut out, ZIP64_SENTINEL);
                put_u32(&mut out, ZIP64_SENTINEL);
                put_u16(&mut out, m.name.len() as u16);
                put_u16(&mut out, 20);
                out.extend_from_slice(m.name.as_bytes());
                put_u16(&mut out, 0x0001);
                put_u16(&mut out, 16);
                put_u64(&mut out, m.uncompressed_size);
                put_u64(&mut out, m.payload.len() as u64);
            } else {
                put_u32(&mut out, m.payload.len() as u32);
                put_u32(&mut out, m.uncompressed_size as u32);
                put_u16(&mut out, m.name.len() as u16);
                put_u16(&mut out, 0);
                out.extend_from_slice(m.name.as_bytes());
            }
            out.extend_from_slice(&m.payload);
        }

        let cd_offset = out.len() as u64;
        for (m, &offset) in self.members.iter().zip(&offsets) {
            out.extend_from_slice(b"PK\x01\x02");
            put_u16(&mut out, 45);
            put_u16(&mut out, 45);
            put_u16(&mut out, m.flags);
            put_u16(&mut out, m.method);
            put_u16(&mut out, 0);
            put_u16(&mut out, 0x21);
            put_u32(&mut out, m.crc);
            if self.zip64 {
                put_u32(&mut out, ZIP64_SENTINEL);
                put_u32(&mut out, ZIP64_SENTINEL);
            } else {
                put_u32(&mut out, m.payload.len() as u32);
                put_u32(&mut out, m.uncompressed_size as u32);
            }
            put_u16(&mut out, m.name.len() as u16);
            put_u16(&mut out, if self.zip64 { 28 } else { 0 });
            put_u16(&mut out, 0);
            put_u16(&mut out, 0);
            put_u16(&mut out, 0);
            put_u32(&mut out, 0);
            let lfh_offset = if self.zip64 {
                ZIP64_SENTINEL
            } else {
                offset as u32
            };
            put_u32(&mut out, lfh_offset);
            out.extend_from_slice(m.name.as_bytes());
            if self.zip64 {
                put_u16(&mut out, 0x0001);
                put_u16(&mut out, 24);
                put_u64(&mut out, m.uncompressed_size);
                put_u64(&mut out, m.payload.len() as u64);
                put_u64(&mut out, offset);
            }
        }
        let cd_size = out.len() as u64 - cd_offset;
        let count = self.members.len() as u64;

        if self.zip64 {
            let eocd64_offset = out.len() as u64;
            out.extend_from_slice(b"PK\x06\x06");
            put_u64(&mut out, 44);
            put_u16(&mut out, 45);
            put_u16(&mut out, 45);
            put_u32(&mut out, 0);
            put_u32(&mut out, 0);
            put_u64(&mut out, count);
            put_u64(&mut out, count);
            put_u64(&mut out, cd_size);
            put_u64(&mut out, cd_offset);

            out.extend_from_slice(b"PK\x06\x07");
            put_u32(&mut out, 0);
            put_u64(&mut out, eocd64_offset);
            put_u32(&mut out, 1);
        }

        out.extend_from_slice(b"PK\x05\x06");
        put_u16(&mut out, 0);
        put_u16(&mut out, 0);
        if self.zip64 {
            put_u16(&mut out, 0xFFFF);
            put_u16(&mut out, 0xFFFF);
            put_u32(&mut out, ZIP64_SENTINEL);
            put_u32(&mut out, ZIP64_SENTINEL);
        } else {
            put_u16(&mut out, count as u16);
            put_u16(&mut out, count as u16);
            put_u32(&mut out, cd_size as u32);
            put_u32(&mut out, cd_offset as u32);
        }
        put_u16(&mut out, self.comment.len() as u16);
        out.extend_from_slice(&self.comment);

        out
    }
}

fn put_u16(out: &mut Vec<u8>, value: u16) {
    out.write_u16::<LittleEndian>(value).unwrap();
}

fn put_u32(out: &mut Vec<u8>, value: u32) {
    out.write_u32::<LittleEndian>(value).unwrap();
}

fn put_u64(out: &mut Vec<u8>, value: u64) {
    out.write_u64::<LittleEndian>(value).unwrap();
}
