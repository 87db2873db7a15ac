/// Media kind classification by filename extension.
///
/// The probe tool and the mapping table are both chosen per kind, so this
/// is the first decision made for every input file. Files whose extension
/// matches none of the configured sets are skipped, not failed.
use std::path::Path;
use tracing::debug;

use crate::config::Config;

/// The three media families this tool knows how to build fixtures for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
    Image,
}

/// Matches filenames against three disjoint extension sets.
///
/// Built once from [`Config`]; the sets are lowercased at construction so
/// classification is case-insensitive (`.MP3` and `.mp3` are the same).
#[derive(Debug, Clone)]
pub struct MediaKindClassifier {
    audio: Vec<String>,
    video: Vec<String>,
    image: Vec<String>,
}

impl MediaKindClassifier {
    pub fn new(config: &Config) -> Self {
        Self {
            audio: config.audio_extensions.clone(),
            video: config.video_extensions.clone(),
            image: config.image_extensions.clone(),
        }
    }

    /// Classify a filename, or `None` if the extension is unrecognized.
    pub fn classify(&self, filename: &str) -> Option<MediaKind> {
        let extension = file_extension(filename)?;

        if self.audio.contains(&extension) {
            Some(MediaKind::Audio)
        } else if self.video.contains(&extension) {
            Some(MediaKind::Video)
        } else if self.image.contains(&extension) {
            Some(MediaKind::Image)
        } else {
            debug!("No media kind for extension '{}'", extension);
            None
        }
    }
}

/// Lowercased final extension of a filename, without the dot.
pub fn file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> MediaKindClassifier {
        MediaKindClassifier::new(&Config::from_env().unwrap())
    }

    #[test]
    fn test_classify_known_extensions() {
        let c = classifier();
        assert_eq!(c.classify("song.mp3"), Some(MediaKind::Audio));
        assert_eq!(c.classify("clip.mkv"), Some(MediaKind::Video));
        assert_eq!(c.classify("shot.png"), Some(MediaKind::Image));
        assert_eq!(c.classify("shot.jpeg"), Some(MediaKind::Image));
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        let c = classifier();
        assert_eq!(c.classify("SONG.MP3"), Some(MediaKind::Audio));
        assert_eq!(c.classify("Clip.Avi"), Some(MediaKind::Video));
    }

    #[test]
    fn test_unrecognized_extension_is_none() {
        let c = classifier();
        assert_eq!(c.classify("notes.txt"), None);
        assert_eq!(c.classify("no_extension"), None);
    }

    #[test]
    fn test_extension_uses_last_suffix_only() {
        let c = classifier();
        assert_eq!(c.classify("archive.tar.mp3"), Some(MediaKind::Audio));
    }
}
