/// Pure value transforms applied to raw metadata fields during export.
///
/// Every formatter is total over the values its source tool can emit for
/// the field it is bound to; a malformed-but-present value yields a
/// [`FormatError`], which the export engine treats as a per-field failure,
/// never a crash.
use chrono::{NaiveDate, NaiveDateTime};

use crate::errors::FormatError;

/// The formatter bound to a mapping rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formatter {
    /// Pass-through, for plain text fields.
    Identity,
    /// Percent-encode and wrap as `<urn:{prefix}:{value}>`.
    UriIdentifier(&'static str),
    /// Fix the known vocabulary mismatches in tagged genres.
    GenreCorrection,
    /// avprobe `YYYY-MM-DD HH:MM:SS` stamp -> ISO-8601 UTC.
    ProbeDate,
    /// exiftool `YYYY:MM:DD` stamp -> ISO-8601 local, no zone marker.
    /// The missing `Z` is intentional: the image tools record local wall
    /// clock time, the probe tool records UTC.
    ImageDate,
    /// Bare year -> start-of-year ISO-8601 UTC stamp.
    YearOnly,
    /// EXIF flash description -> boolean text.
    FlashState,
}

impl Formatter {
    pub fn apply(&self, value: &str) -> Result<String, FormatError> {
        match self {
            Formatter::Identity => Ok(value.to_string()),
            Formatter::UriIdentifier(prefix) => Ok(uri_identifier(prefix, value)),
            Formatter::GenreCorrection => Ok(correct_genre(value).to_string()),
            Formatter::ProbeDate => probe_date(value),
            Formatter::ImageDate => image_date(value),
            Formatter::YearOnly => year_only(value),
            Formatter::FlashState => flash_state(value),
        }
    }
}

/// Wrap a value as a URN identifier, e.g. `<urn:artist:Jane%20Doe>`.
///
/// Commas and apostrophes stay unescaped; they are common in artist names
/// and the downstream comparison expects them literal.
fn uri_identifier(prefix: &str, value: &str) -> String {
    let encoded = urlencoding::encode(value)
        .replace("%2C", ",")
        .replace("%27", "'");
    format!("<urn:{}:{}>", prefix, encoded)
}

/// Correct the known mismatches between ID3 genre spellings and the
/// canonical vocabulary. Anything else passes through unchanged.
fn correct_genre(value: &str) -> &str {
    match value {
        "Psychadelic" => "Psychedelic",
        "AlternRock" => "Alt. Rock",
        "Gangsta" => "Gangsta Rap",
        other => other,
    }
}

fn probe_date(value: &str) -> Result<String, FormatError> {
    let parsed = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S")
        .map_err(|_| FormatError::InvalidDate {
            value: value.to_string(),
        })?;
    Ok(parsed.format("%Y-%m-%dT%H:%M:%SZ").to_string())
}

fn image_date(value: &str) -> Result<String, FormatError> {
    let parsed = NaiveDate::parse_from_str(value, "%Y:%m:%d")
        .map_err(|_| FormatError::InvalidDate {
            value: value.to_string(),
        })?;
    Ok(parsed.format("%Y-%m-%dT00:00:00").to_string())
}

fn year_only(value: &str) -> Result<String, FormatError> {
    let year: i32 = value.trim().parse().map_err(|_| FormatError::InvalidDate {
        value: value.to_string(),
    })?;
    NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(|| FormatError::InvalidDate {
        value: value.to_string(),
    })?;
    Ok(format!("{:04}-01-01T00:00:00Z", year))
}

fn flash_state(value: &str) -> Result<String, FormatError> {
    match value {
        "Fired" => Ok("True".to_string()),
        "No Flash" => Ok("False".to_string()),
        other => Err(FormatError::UnknownFlashState {
            value: other.to_string(),
        }),
    }
}
