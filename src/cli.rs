use clap::Parser;
use std::path::PathBuf;

use crate::comic::ComicFormat;
use crate::config::{
    DEFAULT_IMAGE_EXTENSIONS, DEFAULT_SIDECAR_NAME, ImageExtensions, ParserConfig,
};

#[derive(Parser, Debug)]
#[command(name = "comicmeta")]
#[command(version)]
#[command(about = "Read ComicInfo metadata and covers from comic archives", long_about = None)]
#[command(after_help = "Examples:\n  \
  comicmeta saga-001.cbz                  show metadata and cover entry\n  \
  comicmeta saga-001.cbz -c cover.jpg     also extract the cover image\n  \
  comicmeta book.zip --ext jpg --ext avif only treat jpg/avif as pages")]
pub struct Cli {
    /// Comic archive path
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Extract the cover image to this path
    #[arg(short = 'c', long = "cover", value_name = "OUT")]
    pub cover: Option<PathBuf>,

    /// Format tag to report (default: derived from the file extension)
    #[arg(short = 'f', long = "format", value_name = "TAG")]
    pub format: Option<String>,

    /// Recognized page image extension (repeatable)
    #[arg(long = "ext", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Name of the metadata sidecar entry
    #[arg(long = "sidecar", value_name = "NAME", default_value = DEFAULT_SIDECAR_NAME)]
    pub sidecar: String,

    /// Largest entry to extract, in bytes
    #[arg(long = "max-entry-size", value_name = "BYTES")]
    pub max_entry_size: Option<u64>,

    /// Quiet mode, only report errors
    #[arg(short = 'q', action = clap::ArgAction::Count)]
    pub quiet: u8,
}

impl Cli {
    pub fn is_quiet(&self) -> bool {
        self.quiet > 0
    }

    pub fn comic_format(&self) -> ComicFormat {
        match &self.format {
            Some(tag) => ComicFormat::from_tag(tag),
            None => ComicFormat::from_path(&self.file),
        }
    }

    pub fn parser_config(&self) -> ParserConfig {
        let defaults = ParserConfig::default();
        let image_extensions = if self.extensions.is_empty() {
            ImageExtensions::new(DEFAULT_IMAGE_EXTENSIONS)
        } else {
            ImageExtensions::new(&self.extensions)
        };

        ParserConfig {
            image_extensions,
            sidecar_name: self.sidecar.clone(),
            max_entry_size: self.max_entry_size.unwrap_or(defaults.max_entry_size),
        }
    }
}
