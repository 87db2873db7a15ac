/// External probe invocation: shells out to the configured tag-extraction
/// tool and hands back raw text in the section/key=value grammar.
///
/// Audio and video go through avprobe, whose `-of ini` writer already
/// emits that grammar. Images go through exiftool, whose flat
/// `Key : value` dump is normalized here before the core ever sees it.
use std::path::Path;
use std::process::Command;
use tracing::debug;

use crate::config::Config;
use crate::errors::ProbeError;
use crate::media_kind::MediaKind;

#[derive(Debug, Clone)]
pub struct MetadataProber {
    avprobe: String,
    exiftool: String,
}

impl MetadataProber {
    pub fn new(config: &Config) -> Self {
        Self {
            avprobe: config.avprobe_path.clone(),
            exiftool: config.exiftool_path.clone(),
        }
    }

    /// Probe a file, returning text ready for `RawMetadataStore::parse`.
    pub fn probe(&self, path: &Path, kind: MediaKind) -> Result<String, ProbeError> {
        match kind {
            MediaKind::Audio | MediaKind::Video => self.run_avprobe(path),
            MediaKind::Image => self.run_exiftool(path),
        }
    }

    fn run_avprobe(&self, path: &Path) -> Result<String, ProbeError> {
        debug!("Probing {:?} with {}", path, self.avprobe);
        let output = Command::new(&self.avprobe)
            .args(["-v", "0", "-show_streams", "-show_format", "-of", "ini"])
            .arg(path)
            .output()
            .map_err(|source| ProbeError::Spawn {
                tool: self.avprobe.clone(),
                source,
            })?;
        capture_stdout(&self.avprobe, output)
    }

    fn run_exiftool(&self, path: &Path) -> Result<String, ProbeError> {
        debug!("Probing {:?} with {}", path, self.exiftool);
        let output = Command::new(&self.exiftool)
            .arg("-s")
            .arg(path)
            .output()
            .map_err(|source| ProbeError::Spawn {
                tool: self.exiftool.clone(),
                source,
            })?;
        let text = capture_stdout(&self.exiftool, output)?;
        Ok(normalize_exiftool_output(&text, path))
    }
}

fn capture_stdout(tool: &str, output: std::process::Output) -> Result<String, ProbeError> {
    if !output.status.success() {
        return Err(ProbeError::Failed {
            tool: tool.to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    String::from_utf8(output.stdout).map_err(|_| ProbeError::InvalidUtf8 {
        tool: tool.to_string(),
    })
}

/// Rewrite exiftool's `Tag : value` lines into an `[exif]` section of
/// `Tag=value` pairs, injecting the probed path as `SourceFile` so the
/// export engine can populate `TestFile.Filename` uniformly.
fn normalize_exiftool_output(text: &str, path: &Path) -> String {
    let mut out = String::from("[exif]\n");
    out.push_str(&format!("SourceFile={}\n", path.display()));
    for line in text.lines() {
        if let Some((key, value)) = line.split_once(':') {
            let key = key.trim();
            let value = value.trim();
            if !key.is_empty() {
                out.push_str(key);
                out.push('=');
                out.push_str(value);
                out.push('\n');
            }
        }
    }
    out
}
