//! Immutable configuration injected into the parser and the cover extractor.

use std::collections::BTreeSet;

/// Image extensions recognized as page images by default.
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Reserved name of the metadata sidecar inside a comic archive.
pub const DEFAULT_SIDECAR_NAME: &str = "ComicInfo.xml";

/// Largest entry (uncompressed) that will be read into memory: 256 MiB.
pub const DEFAULT_MAX_ENTRY_SIZE: u64 = 256 * 1024 * 1024;

/// Set of file extensions that identify page images.
///
/// Extensions are stored lowercase without a leading dot and matched
/// case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageExtensions {
    extensions: BTreeSet<String>,
}

impl ImageExtensions {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions = extensions
            .into_iter()
            .map(|ext| normalize_extension(ext.as_ref()))
            .filter(|ext| !ext.is_empty())
            .collect();
        Self { extensions }
    }

    /// Returns `true` if the extension (without dot) is in the set.
    pub fn contains(&self, extension: &str) -> bool {
        self.extensions.contains(&extension.to_ascii_lowercase())
    }

    /// Returns `true` if `name` ends in `.<ext>` for a recognized extension.
    ///
    /// The extension is everything after the last `.`; names without a dot
    /// never match.
    pub fn matches(&self, name: &str) -> bool {
        match name.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => self.contains(ext),
            _ => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }
}

impl Default for ImageExtensions {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_EXTENSIONS)
    }
}

/// `" .JPG "` becomes `"jpg"`.
fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_ascii_lowercase()
}

/// Settings shared by [`ComicParser`](crate::ComicParser) and
/// [`CoverExtractor`](crate::CoverExtractor).
#[derive(Debug, Clone)]
pub struct ParserConfig {
    pub image_extensions: ImageExtensions,
    /// Exact, case-sensitive entry name of the metadata sidecar.
    pub sidecar_name: String,
    pub max_entry_size: u64,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            image_extensions: ImageExtensions::default(),
            sidecar_name: DEFAULT_SIDECAR_NAME.to_string(),
            max_entry_size: DEFAULT_MAX_ENTRY_SIZE,
        }
    }
}
