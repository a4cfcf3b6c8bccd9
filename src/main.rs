//! Main entry point for the comicmeta CLI application.
//!
//! Parses one comic archive, prints what was found, and optionally
//! extracts the cover image.

use anyhow::{Result, bail};
use clap::Parser;

use comicmeta::comic::{ComicMetadata, Credits};
use comicmeta::{Cli, ComicFile, ComicParser, CoverExtractor, ParsedComic};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.parser_config();

    let file = ComicFile::new(cli.file.clone(), cli.comic_format());
    let parser = ComicParser::new(config.clone());

    let Some(parsed) = parser.parse(&file).await else {
        bail!("Could not read comic archive {}", cli.file.display());
    };

    if !cli.is_quiet() {
        print_summary(&parsed);
    }

    if let Some(output) = &cli.cover {
        let Some(entry) = &parsed.cover_entry_name else {
            bail!("No cover image found in {}", cli.file.display());
        };

        let extractor = CoverExtractor::new(&config);
        if !extractor.extract_cover(&parsed.path, entry, output).await {
            bail!("Failed to extract cover {} to {}", entry, output.display());
        }

        if !cli.is_quiet() {
            println!("  extracted: {} -> {}", entry, output.display());
        }
    }

    Ok(())
}

/// Print the parse result, skipping metadata fields that are absent.
fn print_summary(parsed: &ParsedComic) {
    println!("{:>12}  {}", "File", parsed.path.display());
    println!("{:>12}  {}", "Format", parsed.format);
    println!(
        "{:>12}  {}",
        "Cover",
        parsed.cover_entry_name.as_deref().unwrap_or("-")
    );

    match &parsed.metadata {
        Some(meta) => print_metadata(meta),
        None => println!("{:>12}  -", "Metadata"),
    }
}

fn print_metadata(meta: &ComicMetadata) {
    let field = |label: &str, value: Option<String>| {
        if let Some(value) = value {
            println!("{:>12}  {}", label, value);
        }
    };
    let list = |label: &str, values: &[String]| {
        if !values.is_empty() {
            println!("{:>12}  {}", label, values.join(", "));
        }
    };

    field("Title", meta.title.clone());
    field("Series", meta.series.clone());
    field("Number", meta.number.clone());
    field("Volume", meta.volume.map(|v| v.to_string()));
    field("Count", meta.count.map(|c| c.to_string()));
    field(
        "Date",
        meta.date.map(|d| match (d.month, d.day) {
            (Some(m), Some(day)) => format!("{:04}-{:02}-{:02}", d.year, m, day),
            (Some(m), None) => format!("{:04}-{:02}", d.year, m),
            _ => format!("{:04}", d.year),
        }),
    );
    field("Publisher", meta.publisher.clone());
    field("Imprint", meta.imprint.clone());
    print_credits(&meta.credits, &list);
    list("Genres", &meta.genres);
    list("Characters", &meta.characters);
    field("Language", meta.language.clone());
    field("Pages", meta.page_count.map(|p| p.to_string()));
    field("Manga", meta.manga.map(|m| format!("{:?}", m)));
    field("Age rating", meta.age_rating.clone());
    field("Summary", meta.summary.clone());
}

fn print_credits(credits: &Credits, list: &impl Fn(&str, &[String])) {
    list("Writer", &credits.writers);
    list("Penciller", &credits.pencillers);
    list("Inker", &credits.inkers);
    list("Colorist", &credits.colorists);
    list("Letterer", &credits.letterers);
    list("Cover art", &credits.cover_artists);
    list("Editor", &credits.editors);
}
