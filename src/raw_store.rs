/// In-memory store of the raw key/value metadata emitted by a probe tool.
///
/// The accepted grammar is the INI-like dump avprobe produces with
/// `-of ini`: `[section]` headers followed by `key=value` lines. Exiftool
/// output is normalized into the same shape by the probe module before it
/// reaches this parser. Keys are case-sensitive; sections this tool never
/// maps from are kept but simply never queried.
use std::collections::HashMap;

/// Section -> field -> value. Built once per input file, read-only after.
#[derive(Debug, Default)]
pub struct RawMetadataStore {
    sections: HashMap<String, HashMap<String, String>>,
}

impl RawMetadataStore {
    /// Parse probe output into a store.
    ///
    /// Blank lines and `;`/`#` comment lines are ignored. A `key=value`
    /// line before any section header lands in an unnamed section that no
    /// mapping rule ever reads. Duplicate keys keep the last value seen.
    pub fn parse(text: &str) -> Self {
        let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut current = String::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }
            if line.starts_with('[') && line.ends_with(']') {
                current = line[1..line.len() - 1].to_string();
                sections.entry(current.clone()).or_default();
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                sections
                    .entry(current.clone())
                    .or_default()
                    .insert(key.trim().to_string(), value.trim().to_string());
            }
        }

        Self { sections }
    }

    pub fn has(&self, section: &str, field: &str) -> bool {
        self.get(section, field).is_some()
    }

    pub fn get(&self, section: &str, field: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|fields| fields.get(field))
            .map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AVPROBE_OUTPUT: &str = "\
[format]
filename=/media/music/song.mp3
nb_streams=1

[format.tags]
title=Some Song
artist=Jane Doe
";

    #[test]
    fn test_parse_sections_and_fields() {
        let store = RawMetadataStore::parse(AVPROBE_OUTPUT);
        assert!(store.has("format", "filename"));
        assert_eq!(store.get("format.tags", "title"), Some("Some Song"));
        assert_eq!(store.get("format.tags", "artist"), Some("Jane Doe"));
    }

    #[test]
    fn test_missing_field_and_section() {
        let store = RawMetadataStore::parse(AVPROBE_OUTPUT);
        assert!(!store.has("format.tags", "album"));
        assert!(!store.has("streams", "width"));
        assert_eq!(store.get("format.tags", "album"), None);
    }

    #[test]
    fn test_keys_are_case_sensitive() {
        let store = RawMetadataStore::parse(AVPROBE_OUTPUT);
        assert!(store.has("format.tags", "title"));
        assert!(!store.has("format.tags", "Title"));
    }

    #[test]
    fn test_value_may_contain_equals_sign() {
        let store = RawMetadataStore::parse("[s]\nk=a=b\n");
        assert_eq!(store.get("s", "k"), Some("a=b"));
    }

    #[test]
    fn test_comments_and_blank_lines_ignored() {
        let store = RawMetadataStore::parse("; comment\n\n[s]\n# note\nk=v\n");
        assert_eq!(store.get("s", "k"), Some("v"));
    }

    #[test]
    fn test_duplicate_key_keeps_last_value() {
        let store = RawMetadataStore::parse("[s]\nk=first\nk=second\n");
        assert_eq!(store.get("s", "k"), Some("second"));
    }

    #[test]
    fn test_unknown_sections_are_preserved() {
        let store = RawMetadataStore::parse("[streams.stream.0]\nwidth=640\n");
        assert_eq!(store.get("streams.stream.0", "width"), Some("640"));
    }
}
