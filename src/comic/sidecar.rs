use log::{debug, warn};

use super::info::XmlDecoder;
use super::metadata::{ComicMetadata, MetadataNormalizer};
use crate::archive::{ArchiveEntry, ArchiveSession};

/// First entry named exactly `sidecar_name`, in the given order.
///
/// Later duplicates of the name are ignored.
pub fn find_sidecar<'a, H>(
    entries: &'a [ArchiveEntry<H>],
    sidecar_name: &str,
) -> Option<&'a ArchiveEntry<H>> {
    entries.iter().find(|entry| entry.name == sidecar_name)
}

/// Extract, decode and normalize the sidecar entry.
///
/// Every failure is logged and turns into `None`; none of them abort the
/// surrounding parse.
pub async fn read_sidecar<S: ArchiveSession + ?Sized>(
    session: &S,
    entry: &ArchiveEntry<S::Handle>,
    xml: &dyn XmlDecoder,
    normalizer: &dyn MetadataNormalizer,
) -> Option<ComicMetadata> {
    let data = match session.extract(&entry.handle).await {
        Ok(Some(data)) if !data.is_empty() => data,
        Ok(_) => {
            warn!("Sidecar {} is empty", entry.name);
            return None;
        }
        Err(e) => {
            warn!("Failed to extract sidecar {}: {}", entry.name, e);
            return None;
        }
    };

    let text = match String::from_utf8(data) {
        Ok(text) => text,
        Err(e) => {
            warn!("Sidecar {} is not valid UTF-8: {}", entry.name, e);
            return None;
        }
    };
    // Editors on Windows like to prepend a byte order mark
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

    let Some(info) = xml.xml_to_object(text) else {
        warn!("Sidecar {} could not be parsed as ComicInfo", entry.name);
        return None;
    };

    debug!(
        "Decoded sidecar {} with {} fields",
        entry.name,
        info.fields.len()
    );
    Some(normalizer.normalize(info))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comic::fake::FakeSession;
    use crate::comic::{ComicInfoNormalizer, ComicInfoXml};

    fn entries(names: &[&str]) -> Vec<ArchiveEntry<usize>> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| ArchiveEntry {
                name: name.to_string(),
                handle: i,
            })
            .collect()
    }

    #[test]
    fn matches_name_exactly() {
        let list = entries(&["comicinfo.xml", "meta/ComicInfo.xml", "ComicInfo.xml"]);
        let found = find_sidecar(&list, "ComicInfo.xml").map(|e| e.handle);
        assert_eq!(found, Some(2));

        let list = entries(&["comicinfo.xml", "ComicInfo.XML"]);
        assert!(find_sidecar(&list, "ComicInfo.xml").is_none());
    }

    #[test]
    fn first_duplicate_wins() {
        let list = entries(&["ComicInfo.xml", "ComicInfo.xml"]);
        let found = find_sidecar(&list, "ComicInfo.xml").map(|e| e.handle);
        assert_eq!(found, Some(0));
    }

    async fn read(payload: Option<Vec<u8>>) -> Option<ComicMetadata> {
        let session = FakeSession::from_entries(vec![("ComicInfo.xml", payload)]);
        let list = session.list_entries().await.unwrap();
        read_sidecar(&session, &list[0], &ComicInfoXml, &ComicInfoNormalizer).await
    }

    #[tokio::test]
    async fn decodes_utf8_with_bom() {
        let meta = read(Some(
            "\u{feff}<ComicInfo><Title>Watchmen</Title></ComicInfo>".as_bytes().to_vec(),
        ))
        .await
        .unwrap();
        assert_eq!(meta.title.as_deref(), Some("Watchmen"));
    }

    #[tokio::test]
    async fn empty_or_missing_payload_is_absent() {
        assert_eq!(read(Some(Vec::new())).await, None);
        assert_eq!(read(None).await, None);
    }

    #[tokio::test]
    async fn invalid_utf8_is_absent() {
        assert_eq!(read(Some(vec![0x3c, 0xff, 0xfe, 0x3e])).await, None);
    }

    #[tokio::test]
    async fn malformed_xml_is_absent() {
        assert_eq!(read(Some(b"<ComicInfo><Title>".to_vec())).await, None);
    }
}
