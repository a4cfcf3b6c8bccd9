//! Canonical comic metadata and its normalization from [`ComicInfo`].

use super::info::ComicInfo;

/// Whether a book is manga, and its reading direction if so.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Manga {
    Yes,
    YesAndRightToLeft,
    No,
}

impl Manga {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "yes" => Some(Manga::Yes),
            "yesandrighttoleft" => Some(Manga::YesAndRightToLeft),
            "no" => Some(Manga::No),
            _ => None,
        }
    }
}

/// Publication date; month and day are optional in `ComicInfo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublicationDate {
    pub year: i32,
    pub month: Option<u8>,
    pub day: Option<u8>,
}

/// Creator credits, one list per role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credits {
    pub writers: Vec<String>,
    pub pencillers: Vec<String>,
    pub inkers: Vec<String>,
    pub colorists: Vec<String>,
    pub letterers: Vec<String>,
    pub cover_artists: Vec<String>,
    pub editors: Vec<String>,
}

/// One `<Page>` entry of the sidecar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub image: u32,
    pub kind: Option<String>,
    pub double_page: bool,
}

/// Normalized metadata for one comic book.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComicMetadata {
    pub title: Option<String>,
    pub series: Option<String>,
    /// Issue number as written; numbers like `1.5` or `½` are common.
    pub number: Option<String>,
    pub count: Option<u32>,
    pub volume: Option<u32>,
    pub alternate_series: Option<String>,
    pub alternate_number: Option<String>,
    pub alternate_count: Option<u32>,
    pub summary: Option<String>,
    pub notes: Option<String>,
    pub date: Option<PublicationDate>,
    pub credits: Credits,
    pub publisher: Option<String>,
    pub imprint: Option<String>,
    pub genres: Vec<String>,
    pub tags: Vec<String>,
    pub web: Option<String>,
    pub page_count: Option<u32>,
    pub language: Option<String>,
    pub format: Option<String>,
    pub black_and_white: Option<bool>,
    pub manga: Option<Manga>,
    pub characters: Vec<String>,
    pub teams: Vec<String>,
    pub locations: Vec<String>,
    pub scan_information: Option<String>,
    pub story_arc: Option<String>,
    pub series_group: Option<String>,
    pub age_rating: Option<String>,
    pub community_rating: Option<f32>,
    pub pages: Vec<PageInfo>,
}

impl ComicMetadata {
    /// Image index the sidecar marks as the front cover, if any.
    pub fn front_cover_page(&self) -> Option<u32> {
        self.pages
            .iter()
            .find(|p| p.kind.as_deref() == Some("FrontCover"))
            .map(|p| p.image)
    }
}

/// Maps a decoded [`ComicInfo`] onto [`ComicMetadata`]
pub trait MetadataNormalizer: Send + Sync {
    fn normalize(&self, info: ComicInfo) -> ComicMetadata;
}

/// Default normalization rules.
///
/// Strings are trimmed and empty values dropped; list fields split on `,`
/// and `;`; numeric fields that fail to parse are dropped individually.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComicInfoNormalizer;

impl MetadataNormalizer for ComicInfoNormalizer {
    fn normalize(&self, info: ComicInfo) -> ComicMetadata {
        let text = |field: &str| info.get(field).and_then(clean);
        let list = |field: &str| info.get(field).map(split_list).unwrap_or_default();
        let number = |field: &str| text(field).and_then(|v| v.parse::<u32>().ok());

        ComicMetadata {
            title: text("Title"),
            series: text("Series"),
            number: text("Number"),
            // ComicRack writes -1 for "unknown"
            count: number("Count"),
            volume: number("Volume"),
            alternate_series: text("AlternateSeries"),
            alternate_number: text("AlternateNumber"),
            alternate_count: number("AlternateCount"),
            summary: text("Summary"),
            notes: text("Notes"),
            date: publication_date(&info),
            credits: Credits {
                writers: list("Writer"),
                pencillers: list("Penciller"),
                inkers: list("Inker"),
                colorists: list("Colorist"),
                letterers: list("Letterer"),
                cover_artists: list("CoverArtist"),
                editors: list("Editor"),
            },
            publisher: text("Publisher"),
            imprint: text("Imprint"),
            genres: list("Genre"),
            tags: list("Tags"),
            web: text("Web"),
            page_count: number("PageCount").filter(|&n| n > 0),
            language: text("LanguageISO"),
            format: text("Format"),
            black_and_white: text("BlackAndWhite").and_then(|v| parse_yes_no(&v)),
            manga: text("Manga").and_then(|v| Manga::parse(&v)),
            characters: list("Characters"),
            teams: list("Teams"),
            locations: list("Locations"),
            scan_information: text("ScanInformation"),
            story_arc: text("StoryArc"),
            series_group: text("SeriesGroup"),
            age_rating: text("AgeRating").filter(|v| v != "Unknown"),
            community_rating: text("CommunityRating")
                .and_then(|v| v.parse::<f32>().ok())
                .filter(|r| (0.0..=5.0).contains(r)),
            pages: info.pages.iter().filter_map(page_info).collect(),
        }
    }
}

fn clean(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn split_list(value: &str) -> Vec<String> {
    value.split([',', ';']).filter_map(clean).collect()
}

fn parse_yes_no(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "yes" | "true" => Some(true),
        "no" | "false" => Some(false),
        _ => None,
    }
}

fn publication_date(info: &ComicInfo) -> Option<PublicationDate> {
    let year = info.get("Year")?.trim().parse::<i32>().ok()?;
    if year <= 0 {
        return None;
    }
    let month = info
        .get("Month")
        .and_then(|m| m.trim().parse::<u8>().ok())
        .filter(|m| (1..=12).contains(m));
    // A day without a month means nothing
    let day = month.and_then(|_| {
        info.get("Day")
            .and_then(|d| d.trim().parse::<u8>().ok())
            .filter(|d| (1..=31).contains(d))
    });

    Some(PublicationDate { year, month, day })
}

fn page_info(attrs: &std::collections::BTreeMap<String, String>) -> Option<PageInfo> {
    let image = attrs.get("Image")?.trim().parse().ok()?;
    Some(PageInfo {
        image,
        kind: attrs.get("Type").and_then(|t| clean(t)),
        double_page: attrs
            .get("DoublePage")
            .and_then(|v| parse_yes_no(v.trim()))
            .unwrap_or(false),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn info(fields: &[(&str, &str)]) -> ComicInfo {
        ComicInfo {
            fields: fields
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            pages: Vec::new(),
        }
    }

    #[test]
    fn trims_and_drops_empty_strings() {
        let meta = ComicInfoNormalizer.normalize(info(&[
            ("Title", "  Saga  "),
            ("Series", "   "),
            ("Number", "1.5"),
        ]));

        assert_eq!(meta.title.as_deref(), Some("Saga"));
        assert_eq!(meta.series, None);
        assert_eq!(meta.number.as_deref(), Some("1.5"));
    }

    #[test]
    fn splits_credit_and_list_fields() {
        let meta = ComicInfoNormalizer.normalize(info(&[
            ("Writer", "Alan Moore, Neil Gaiman"),
            ("CoverArtist", "Dave Gibbons;"),
            ("Genre", "Horror; Fantasy"),
            ("Characters", ""),
        ]));

        assert_eq!(meta.credits.writers, vec!["Alan Moore", "Neil Gaiman"]);
        assert_eq!(meta.credits.cover_artists, vec!["Dave Gibbons"]);
        assert_eq!(meta.genres, vec!["Horror", "Fantasy"]);
        assert!(meta.characters.is_empty());
        assert!(meta.credits.pencillers.is_empty());
    }

    #[test]
    fn unparseable_numbers_are_dropped() {
        let meta = ComicInfoNormalizer.normalize(info(&[
            ("Count", "-1"),
            ("Volume", "2"),
            ("PageCount", "0"),
            ("CommunityRating", "7.5"),
        ]));

        assert_eq!(meta.count, None);
        assert_eq!(meta.volume, Some(2));
        assert_eq!(meta.page_count, None);
        assert_eq!(meta.community_rating, None);
    }

    #[test]
    fn builds_partial_dates() {
        let full = ComicInfoNormalizer.normalize(info(&[
            ("Year", "2012"),
            ("Month", "3"),
            ("Day", "14"),
        ]));
        let expected = PublicationDate {
            year: 2012,
            month: Some(3),
            day: Some(14),
        };
        assert_eq!(full.date, Some(expected));

        let day_only = ComicInfoNormalizer.normalize(info(&[("Year", "2012"), ("Day", "14")]));
        let expected = PublicationDate {
            year: 2012,
            month: None,
            day: None,
        };
        assert_eq!(day_only.date, Some(expected));

        let no_year = ComicInfoNormalizer.normalize(info(&[("Month", "3")]));
        assert_eq!(no_year.date, None);
    }

    #[test]
    fn parses_flags() {
        let meta = ComicInfoNormalizer.normalize(info(&[
            ("Manga", "YesAndRightToLeft"),
            ("BlackAndWhite", "Yes"),
            ("AgeRating", "Unknown"),
        ]));

        assert_eq!(meta.manga, Some(Manga::YesAndRightToLeft));
        assert_eq!(meta.black_and_white, Some(true));
        assert_eq!(meta.age_rating, None);

        let meta = ComicInfoNormalizer.normalize(info(&[("Manga", "Unknown")]));
        assert_eq!(meta.manga, None);
    }

    #[test]
    fn reads_pages_and_front_cover() {
        let mut raw = info(&[]);
        raw.pages = vec![
            BTreeMap::from([("Image".to_string(), "0".to_string())]),
            BTreeMap::from([
                ("Image".to_string(), "1".to_string()),
                ("Type".to_string(), "FrontCover".to_string()),
                ("DoublePage".to_string(), "True".to_string()),
            ]),
            BTreeMap::from([("Type".to_string(), "Story".to_string())]),
        ];

        let meta = ComicInfoNormalizer.normalize(raw);
        assert_eq!(meta.pages.len(), 2);
        assert!(meta.pages[1].double_page);
        assert_eq!(meta.front_cover_page(), Some(1));
    }
}
