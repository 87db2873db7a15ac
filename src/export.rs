/// The export engine: applies a mapping table to a raw metadata store and
/// assembles the expectation document.
use std::path::Path;
use tracing::warn;

use crate::document::ExpectationDocument;
use crate::errors::ExportError;
use crate::mapping::{MappingRule, MappingTable};
use crate::raw_store::RawMetadataStore;

/// How optional-field results fold into the overall success signal.
///
/// The primary title/name field is exempt: it is required under both
/// policies, and its absence aborts the export outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuccessPolicy {
    /// The document is valid once the primary field mapped; optional
    /// fields may be missing. The default.
    #[default]
    Any,
    /// Picky mode: every rule in the table must map successfully.
    All,
}

/// Result of a successful (non-aborted) export.
#[derive(Debug)]
pub struct Export {
    pub document: ExpectationDocument,
    pub success: bool,
}

/// Apply `table` to `store` for a file with the given lowercased
/// extension.
///
/// Aborts with an error if the store carries no filename or the primary
/// field is missing or unformattable. Optional-field failures are logged
/// and folded into `success` according to `policy`.
pub fn export(
    store: &RawMetadataStore,
    table: &MappingTable,
    extension: &str,
    policy: SuccessPolicy,
) -> Result<Export, ExportError> {
    let mut document = ExpectationDocument::new();

    let path = store
        .get(table.filename_section, table.filename_field)
        .ok_or_else(|| ExportError::MissingFilename {
            section: table.filename_section.to_string(),
            field: table.filename_field.to_string(),
        })?;
    document.set("TestFile", "Filename", basename(path));

    // The primary field is required regardless of policy; a present but
    // unformattable value cannot satisfy it either.
    if !apply_rule(store, &table.primary, extension, &mut document) {
        return Err(ExportError::MissingPrimaryField {
            section: table.primary.source_section.to_string(),
            field: table.primary.source_field.resolve(extension).to_string(),
        });
    }

    let mut all_succeeded = true;
    for rule in &table.optional {
        if !apply_rule(store, rule, extension, &mut document) {
            all_succeeded = false;
        }
    }

    let success = match policy {
        SuccessPolicy::Any => true,
        SuccessPolicy::All => all_succeeded,
    };

    Ok(Export { document, success })
}

/// Attempt one rule. Returns whether the field ended up in the document;
/// a missing source field or a formatter failure is a diagnostic, not an
/// error.
fn apply_rule(
    store: &RawMetadataStore,
    rule: &MappingRule,
    extension: &str,
    document: &mut ExpectationDocument,
) -> bool {
    let field = rule.source_field.resolve(extension);
    let Some(value) = store.get(rule.source_section, field) else {
        warn!("Missing source field [{}] {}", rule.source_section, field);
        return false;
    };
    match rule.formatter.apply(value) {
        Ok(formatted) => {
            document.set(rule.dest_section, rule.dest_field, &formatted);
            true
        }
        Err(e) => {
            warn!("Could not format [{}] {}: {}", rule.source_section, field, e);
            false
        }
    }
}

fn basename(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::MappingTables;
    use crate::media_kind::MediaKind;

    fn audio_store(body: &str) -> RawMetadataStore {
        let text = format!(
            "[format]\nfilename=/media/music/song.mp3\n\n[format.tags]\n{}",
            body
        );
        RawMetadataStore::parse(&text)
    }

    fn audio_table() -> MappingTable {
        MappingTables::new().for_kind(MediaKind::Audio).clone()
    }

    #[test]
    fn test_title_only_succeeds_under_any_policy() {
        let store = audio_store("title=Song\n");
        let export = export(&store, &audio_table(), "mp3", SuccessPolicy::Any).unwrap();
        assert!(export.success);
        assert_eq!(export.document.get("TestFile", "Filename"), Some("song.mp3"));
        assert_eq!(export.document.get("Metadata", "ivi_trackname"), Some("Song"));
    }

    #[test]
    fn test_title_only_fails_under_all_policy() {
        let store = audio_store("title=Song\n");
        let export = export(&store, &audio_table(), "mp3", SuccessPolicy::All).unwrap();
        assert!(!export.success);
    }

    #[test]
    fn test_missing_title_aborts_regardless_of_policy() {
        let store = audio_store("artist=Jane Doe\n");
        for policy in [SuccessPolicy::Any, SuccessPolicy::All] {
            let err = export(&store, &audio_table(), "mp3", policy).unwrap_err();
            assert!(matches!(err, ExportError::MissingPrimaryField { .. }));
        }
    }

    #[test]
    fn test_missing_filename_aborts() {
        let store = RawMetadataStore::parse("[format.tags]\ntitle=Song\n");
        let err = export(&store, &audio_table(), "mp3", SuccessPolicy::Any).unwrap_err();
        assert!(matches!(err, ExportError::MissingFilename { .. }));
    }

    #[test]
    fn test_all_fields_succeed_under_all_policy() {
        let store = audio_store(
            "title=Song\nartist=Jane Doe\nalbum=Album\nalbum_artist=Jane Doe\n\
             genre=Jazz\ntrack=3\ndate=1999\n",
        );
        let export = export(&store, &audio_table(), "mp3", SuccessPolicy::All).unwrap();
        assert!(export.success);
        assert_eq!(
            export.document.get("Metadata", "ivi_filecreated"),
            Some("1999-01-01T00:00:00Z")
        );
        assert_eq!(export.document.get("Metadata", "ivi_tracktracknumber"), Some("3"));
    }

    #[test]
    fn test_unformattable_optional_counts_against_all_policy() {
        let store = audio_store(
            "title=Song\nartist=Jane Doe\nalbum=A\nalbum_artist=Jane Doe\n\
             genre=Jazz\ntrack=1\ndate=sometime\n",
        );
        let export = export(&store, &audio_table(), "mp3", SuccessPolicy::All).unwrap();
        assert!(!export.success);
        // The bad date never reaches the document.
        assert_eq!(export.document.get("Metadata", "ivi_filecreated"), None);

        let export = super::export(&store, &audio_table(), "mp3", SuccessPolicy::Any).unwrap();
        assert!(export.success);
    }

    #[test]
    fn test_image_date_source_depends_on_extension() {
        let tables = MappingTables::new();
        let table = tables.for_kind(MediaKind::Image);
        let store = RawMetadataStore::parse(
            "[exif]\nSourceFile=/pics/shot.png\nTitle=Holiday\nCreationTime=2014:03:02\n",
        );
        let export = export(&store, table, "png", SuccessPolicy::Any).unwrap();
        assert_eq!(
            export.document.get("Metadata", "ivi_imagedate"),
            Some("2014-03-02T00:00:00")
        );

        // Same store probed as a jpg looks for CreateDate instead.
        let export = super::export(&store, table, "jpg", SuccessPolicy::Any).unwrap();
        assert_eq!(export.document.get("Metadata", "ivi_imagedate"), None);
    }

    #[test]
    fn test_end_to_end_audio_scenario() {
        let store = audio_store("title=Song\nartist=Jane Doe\n");
        let export = export(&store, &audio_table(), "mp3", SuccessPolicy::Any).unwrap();
        assert!(export.success);
        assert_eq!(export.document.get("TestFile", "Filename"), Some("song.mp3"));
        assert_eq!(export.document.get("Metadata", "ivi_trackname"), Some("Song"));
        assert_eq!(
            export.document.get("Metadata", "ivi_trackartist"),
            Some("<urn:artist:Jane%20Doe>")
        );
    }
}
