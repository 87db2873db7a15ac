/// Per-kind mapping tables: which raw fields land where in the fixture,
/// and through which formatter.
///
/// The tables are declarative data so the export engine is written once
/// and knows nothing about media kinds. Destination field names are the
/// `ivi_*` properties of the ontology under test (INI keys cannot carry
/// the `ivi:` prefix, so `:` becomes `_`).
use crate::formatters::Formatter;
use crate::media_kind::MediaKind;

/// How a rule locates its raw source field within the source section.
#[derive(Debug, Clone, Copy)]
pub enum SourceField {
    /// A single fixed field name.
    Fixed(&'static str),
    /// Field name depends on the file's extension. Covers the image
    /// creation-date tag, which PNG and JPEG writers store under
    /// different names.
    ByExtension {
        png: &'static str,
        jpg: &'static str,
        fallback: &'static str,
    },
}

impl SourceField {
    /// Resolve to a concrete field name for a file with the given
    /// lowercased extension.
    pub fn resolve(&self, extension: &str) -> &'static str {
        match self {
            SourceField::Fixed(name) => name,
            SourceField::ByExtension { png, jpg, fallback } => match extension {
                "png" => png,
                "jpg" | "jpeg" => jpg,
                _ => fallback,
            },
        }
    }
}

/// One source-field to destination-field binding.
#[derive(Debug, Clone, Copy)]
pub struct MappingRule {
    pub source_section: &'static str,
    pub source_field: SourceField,
    pub dest_section: &'static str,
    pub dest_field: &'static str,
    pub formatter: Formatter,
}

/// The full mapping for one media kind.
#[derive(Debug, Clone)]
pub struct MappingTable {
    pub kind: MediaKind,
    /// Where the raw store keeps the probed file's path, used to populate
    /// `TestFile.Filename`.
    pub filename_section: &'static str,
    pub filename_field: &'static str,
    /// The mandatory title/name rule. Its absence fails the whole export
    /// regardless of policy.
    pub primary: MappingRule,
    /// Optional rules, in fixture output order.
    pub optional: Vec<MappingRule>,
}

/// All three tables, built once at startup.
#[derive(Debug, Clone)]
pub struct MappingTables {
    audio: MappingTable,
    video: MappingTable,
    image: MappingTable,
}

impl MappingTables {
    pub fn new() -> Self {
        Self {
            audio: audio_table(),
            video: video_table(),
            image: image_table(),
        }
    }

    pub fn for_kind(&self, kind: MediaKind) -> &MappingTable {
        match kind {
            MediaKind::Audio => &self.audio,
            MediaKind::Video => &self.video,
            MediaKind::Image => &self.image,
        }
    }
}

impl Default for MappingTables {
    fn default() -> Self {
        Self::new()
    }
}

const METADATA: &str = "Metadata";

fn rule(
    source_section: &'static str,
    source_field: SourceField,
    dest_field: &'static str,
    formatter: Formatter,
) -> MappingRule {
    MappingRule {
        source_section,
        source_field,
        dest_section: METADATA,
        dest_field,
        formatter,
    }
}

fn audio_table() -> MappingTable {
    let tags = "format.tags";
    MappingTable {
        kind: MediaKind::Audio,
        filename_section: "format",
        filename_field: "filename",
        primary: rule(tags, SourceField::Fixed("title"), "ivi_trackname", Formatter::Identity),
        optional: vec![
            rule(
                tags,
                SourceField::Fixed("artist"),
                "ivi_trackartist",
                Formatter::UriIdentifier("artist"),
            ),
            rule(tags, SourceField::Fixed("album"), "ivi_albumname", Formatter::Identity),
            rule(
                tags,
                SourceField::Fixed("album_artist"),
                "ivi_albumalbumartist",
                Formatter::UriIdentifier("artist"),
            ),
            rule(
                tags,
                SourceField::Fixed("genre"),
                "ivi_trackgenre",
                Formatter::GenreCorrection,
            ),
            rule(
                tags,
                SourceField::Fixed("track"),
                "ivi_tracktracknumber",
                Formatter::Identity,
            ),
            rule(tags, SourceField::Fixed("date"), "ivi_filecreated", Formatter::YearOnly),
        ],
    }
}

fn video_table() -> MappingTable {
    let tags = "format.tags";
    MappingTable {
        kind: MediaKind::Video,
        filename_section: "format",
        filename_field: "filename",
        primary: rule(tags, SourceField::Fixed("title"), "ivi_videotitle", Formatter::Identity),
        optional: vec![rule(
            tags,
            SourceField::Fixed("creation_time"),
            "ivi_filecreated",
            Formatter::ProbeDate,
        )],
    }
}

fn image_table() -> MappingTable {
    let exif = "exif";
    MappingTable {
        kind: MediaKind::Image,
        filename_section: "exif",
        filename_field: "SourceFile",
        primary: rule(exif, SourceField::Fixed("Title"), "ivi_imagetitle", Formatter::Identity),
        optional: vec![
            rule(
                exif,
                SourceField::Fixed("Artist"),
                "ivi_imagecreator",
                Formatter::UriIdentifier("artist"),
            ),
            rule(
                exif,
                SourceField::Fixed("ImageWidth"),
                "ivi_imagewidth",
                Formatter::Identity,
            ),
            rule(
                exif,
                SourceField::Fixed("ImageHeight"),
                "ivi_imageheight",
                Formatter::Identity,
            ),
            rule(
                exif,
                SourceField::ByExtension {
                    png: "CreationTime",
                    jpg: "CreateDate",
                    fallback: "Date",
                },
                "ivi_imagedate",
                Formatter::ImageDate,
            ),
            rule(exif, SourceField::Fixed("Flash"), "ivi_flash", Formatter::FlashState),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_exist_for_every_kind() {
        let tables = MappingTables::new();
        assert_eq!(tables.for_kind(MediaKind::Audio).primary.dest_field, "ivi_trackname");
        assert_eq!(tables.for_kind(MediaKind::Video).primary.dest_field, "ivi_videotitle");
        assert_eq!(tables.for_kind(MediaKind::Image).primary.dest_field, "ivi_imagetitle");
    }

    #[test]
    fn test_image_date_tag_follows_extension() {
        let source = SourceField::ByExtension {
            png: "CreationTime",
            jpg: "CreateDate",
            fallback: "Date",
        };
        assert_eq!(source.resolve("png"), "CreationTime");
        assert_eq!(source.resolve("jpg"), "CreateDate");
        assert_eq!(source.resolve("jpeg"), "CreateDate");
        assert_eq!(source.resolve("gif"), "Date");
    }

    #[test]
    fn test_fixed_source_ignores_extension() {
        assert_eq!(SourceField::Fixed("title").resolve("png"), "title");
    }
}
