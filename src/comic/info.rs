//! Raw `ComicInfo.xml` decoding.
//!
//! The document is read SAX-style with `quick-xml` into a [`ComicInfo`]:
//! top-level element text keyed by element name, plus the attribute maps of
//! each `<Page>` under `<Pages>`. No interpretation happens here; see
//! [`MetadataNormalizer`](super::MetadataNormalizer) for that.

use log::debug;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::{BTreeMap, HashMap};

const ROOT: &[u8] = b"ComicInfo";
const PAGES: &[u8] = b"Pages";
const PAGE: &[u8] = b"Page";

/// Structured, un-normalized content of a `ComicInfo.xml` document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComicInfo {
    pub fields: HashMap<String, String>,
    pub pages: Vec<BTreeMap<String, String>>,
}

impl ComicInfo {
    /// Text of a top-level element, if present.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }
}

/// Converts sidecar text into a structured object
pub trait XmlDecoder: Send + Sync {
    /// Returns `None` when `text` is not a usable `ComicInfo` document.
    fn xml_to_object(&self, text: &str) -> Option<ComicInfo>;
}

/// [`XmlDecoder`] backed by `quick-xml`
#[derive(Debug, Clone, Copy, Default)]
pub struct ComicInfoXml;

impl XmlDecoder for ComicInfoXml {
    fn xml_to_object(&self, text: &str) -> Option<ComicInfo> {
        match parse_comic_info(text) {
            Ok(info) => Some(info),
            Err(reason) => {
                debug!("Rejected ComicInfo document: {reason}");
                None
            }
        }
    }
}

fn parse_comic_info(text: &str) -> Result<ComicInfo, String> {
    // Whitespace is kept so mixed content joins as written; the
    // normalizer trims field values.
    let mut reader = Reader::from_str(text);

    let mut info = ComicInfo::default();
    // Open element names, root first
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut text_buf = String::new();
    let mut saw_root = false;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| format!("at byte {}: {e}", reader.buffer_position()))?;

        match event {
            Event::Start(e) => {
                let name = e.name().as_ref().to_vec();
                if stack.is_empty() {
                    check_root(&name, &mut saw_root)?;
                } else if is_page(&stack, &name) {
                    info.pages.push(page_attributes(&e)?);
                }
                // Markup nested inside a field keeps accumulating its text
                if stack.len() == 1 {
                    text_buf.clear();
                }
                stack.push(name);
            }
            Event::Empty(e) => {
                let name = e.name().as_ref().to_vec();
                if stack.is_empty() {
                    check_root(&name, &mut saw_root)?;
                } else if is_page(&stack, &name) {
                    info.pages.push(page_attributes(&e)?);
                }
            }
            Event::Text(t) if in_field(&stack) => {
                let unescaped = t.unescape().map_err(|e| e.to_string())?;
                text_buf.push_str(&unescaped);
            }
            Event::CData(c) if in_field(&stack) => {
                text_buf.push_str(&String::from_utf8_lossy(&c));
            }
            Event::End(_) => {
                let name = stack.pop().ok_or("unbalanced end tag")?;
                if stack.len() == 1 && name != PAGES {
                    let key = String::from_utf8_lossy(&name).into_owned();
                    info.fields.insert(key, std::mem::take(&mut text_buf));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err("no ComicInfo root element".into());
    }
    if !stack.is_empty() {
        return Err("document ended inside an element".into());
    }
    Ok(info)
}

fn check_root(name: &[u8], saw_root: &mut bool) -> Result<(), String> {
    if name != ROOT {
        return Err(format!(
            "unexpected root element <{}>",
            String::from_utf8_lossy(name)
        ));
    }
    if *saw_root {
        return Err("multiple root elements".into());
    }
    *saw_root = true;
    Ok(())
}

/// Inside a top-level field other than `<Pages>`, at any depth.
fn in_field(stack: &[Vec<u8>]) -> bool {
    stack.len() >= 2 && stack[1] != PAGES
}

fn is_page(stack: &[Vec<u8>], name: &[u8]) -> bool {
    stack.len() == 2 && stack[1] == PAGES && name == PAGE
}

fn page_attributes(e: &BytesStart<'_>) -> Result<BTreeMap<String, String>, String> {
    let mut attrs = BTreeMap::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(|e| e.to_string())?;
        attrs.insert(key, value.into_owned());
    }
    Ok(attrs)
}
