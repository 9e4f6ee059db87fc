//! Frontmatter parsing for content documents.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{CoreError, Result};

/// Frontmatter metadata for content documents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Frontmatter {
    /// Document title.
    #[serde(default)]
    pub title: String,

    /// Publication date, kept as written and parsed by [`Frontmatter::published_at`].
    #[serde(default)]
    pub date: Option<String>,

    /// Whether this is a draft.
    #[serde(default)]
    pub draft: bool,

    /// Description for meta tags and gallery captions.
    #[serde(default)]
    pub description: Option<String>,

    /// Gallery thumbnail. Its presence opts the document into the gallery,
    /// even with an empty value.
    #[serde(default, deserialize_with = "deserialize_preview")]
    pub gallery_preview: Option<GalleryPreview>,
}

/// A present key always yields `Some`; an empty value becomes a placeholder.
fn deserialize_preview<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<GalleryPreview>, D::Error>
where
    D: Deserializer<'de>,
{
    GalleryPreview::deserialize(deserializer).map(Some)
}

/// Value of the `gallery_preview` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GalleryPreview {
    /// Path or URL of the preview image.
    Image(String),
    /// Listed in the gallery without an image (e.g. `gallery_preview: true`).
    Placeholder(serde_yaml::Value),
}

impl GalleryPreview {
    /// Image reference, if one was given.
    pub fn image(&self) -> Option<&str> {
        match self {
            Self::Image(src) => Some(src),
            Self::Placeholder(_) => None,
        }
    }
}

/// Delimiter types for frontmatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    /// YAML frontmatter delimited by `---`.
    Yaml,
    /// TOML frontmatter delimited by `+++`.
    Toml,
}

impl FrontmatterFormat {
    /// Get the delimiter string for this format.
    pub fn delimiter(&self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Split content into frontmatter and body.
pub fn split_frontmatter(content: &str) -> Option<(FrontmatterFormat, &str, &str)> {
    let content = content.trim_start();

    let format = if content.starts_with("---") {
        FrontmatterFormat::Yaml
    } else if content.starts_with("+++") {
        FrontmatterFormat::Toml
    } else {
        return None;
    };

    let delimiter = format.delimiter();

    let after_first = &content[delimiter.len()..];
    let closing_pos = after_first.find(delimiter)?;

    let frontmatter = after_first[..closing_pos].trim();
    let body = after_first[closing_pos + delimiter.len()..].trim_start();

    Some((format, frontmatter, body))
}

/// Parse frontmatter from a document. `origin` names the document in errors.
pub fn parse_frontmatter(content: &str, origin: &str) -> Result<(Frontmatter, String)> {
    let Some((format, fm_str, body)) = split_frontmatter(content) else {
        return Ok((Frontmatter::default(), content.to_string()));
    };

    let frontmatter: Frontmatter = match format {
        FrontmatterFormat::Yaml => serde_yaml::from_str(fm_str)
            .map_err(|e| CoreError::frontmatter(origin, e.to_string()))?,
        FrontmatterFormat::Toml => {
            toml::from_str(fm_str).map_err(|e| CoreError::frontmatter(origin, e.to_string()))?
        }
    };

    Ok((frontmatter, body.to_string()))
}

impl Frontmatter {
    /// Parse the `date` field.
    ///
    /// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` with an optional `±HHMM`
    /// offset, and bare `YYYY-MM-DD` (midnight UTC).
    pub fn published_at(&self, origin: &str) -> Result<Option<DateTime<Utc>>> {
        let Some(raw) = self.date.as_deref().map(str::trim) else {
            return Ok(None);
        };

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Some(dt.with_timezone(&Utc)));
        }
        if let Ok(dt) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S %z") {
            return Ok(Some(dt.with_timezone(&Utc)));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
            return Ok(Some(naive.and_utc()));
        }
        if let Some(naive) = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
        {
            return Ok(Some(naive.and_utc()));
        }

        Err(CoreError::frontmatter(
            origin,
            format!("unrecognized date {raw:?}"),
        ))
    }

}
