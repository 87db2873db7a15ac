use anyhow::Result;
use std::env;

/// Immutable runtime configuration, built once at startup and passed
/// explicitly to the components that need it.
#[derive(Clone, Debug)]
pub struct Config {
    pub avprobe_path: String,
    pub exiftool_path: String,
    pub audio_extensions: Vec<String>,
    pub video_extensions: Vec<String>,
    pub image_extensions: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            avprobe_path: env::var("AVPROBE_PATH")
                .unwrap_or_else(|_| "avprobe".to_string()),
            exiftool_path: env::var("EXIFTOOL_PATH")
                .unwrap_or_else(|_| "exiftool".to_string()),
            audio_extensions: extension_list("AUDIO_EXTENSIONS", "mp3,ogg,flac"),
            video_extensions: extension_list("VIDEO_EXTENSIONS", "avi,mkv,rm,wmv,mp4"),
            image_extensions: extension_list("IMAGE_EXTENSIONS", "png,jpg,jpeg,gif"),
        })
    }
}

fn extension_list(var: &str, default: &str) -> Vec<String> {
    env::var(var)
        .unwrap_or_else(|_| default.to_string())
        .split(',')
        .map(|s| s.trim().trim_start_matches('.').to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
