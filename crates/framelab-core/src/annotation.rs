//! Annotation data model
//!
//! Frame styles, the ordered label/value fields rendered onto a composed
//! image, and the composition result handed back to the caller.

use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

/// Named border frame style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameStyle {
    Classic,
    Modern,
    Vintage,
}

impl FrameStyle {
    /// Solid border color for this style
    pub fn border_color(self) -> Rgba<u8> {
        match self {
            FrameStyle::Classic => Rgba([0, 0, 0, 255]),
            FrameStyle::Modern => Rgba([255, 255, 255, 255]),
            FrameStyle::Vintage => Rgba([165, 42, 42, 255]),
        }
    }
}

impl FromStr for FrameStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "classic" => Ok(FrameStyle::Classic),
            "modern" => Ok(FrameStyle::Modern),
            "vintage" => Ok(FrameStyle::Vintage),
            other => Err(format!(
                "unknown frame style: {} (expected classic, modern, or vintage)",
                other
            )),
        }
    }
}

impl fmt::Display for FrameStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameStyle::Classic => write!(f, "Classic"),
            FrameStyle::Modern => write!(f, "Modern"),
            FrameStyle::Vintage => write!(f, "Vintage"),
        }
    }
}

/// Ordered label/value pairs rendered as literal multi-line text
///
/// Fields are optional by contract: empty values and unparseable numeric
/// values are dropped here, never surfaced as errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnotationFields {
    fields: Vec<(String, String)>,
}

impl AnnotationFields {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a field, keeping the value verbatim. Blank values are skipped.
    pub fn push(&mut self, label: impl Into<String>, value: impl Into<String>) {
        let value = value.into();
        if value.trim().is_empty() {
            return;
        }
        self.fields.push((label.into(), value));
    }

    /// Add a field whose value must parse as a non-negative number.
    /// Values that do not parse (or are negative) are skipped.
    pub fn push_numeric(&mut self, label: impl Into<String>, raw: impl Into<String>) {
        let raw = raw.into();
        match raw.trim().parse::<f64>() {
            Ok(n) if n >= 0.0 => self.fields.push((label.into(), raw)),
            _ => {
                tracing::debug!(value = %raw, "Skipping non-numeric annotation field");
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Look up a field value by label, case-insensitively
    pub fn get(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(l, _)| l.eq_ignore_ascii_case(label))
            .map(|(_, v)| v.as_str())
    }

    /// Render fields as "Label: value" lines, in insertion order
    pub fn lines(&self) -> Vec<String> {
        self.fields
            .iter()
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect()
    }
}

/// Result of a composition: the final canvas plus its lossless encoding
#[derive(Debug, Clone)]
pub struct ComposedImage {
    /// Final composed canvas
    pub canvas: RgbaImage,
    pub width: u32,
    pub height: u32,
    /// PNG encoding of the canvas, ready for display or download
    pub png: Bytes,
    /// Value of the "Tag" field, when one was rendered
    pub tag: Option<String>,
}

impl ComposedImage {
    /// Download filename for the composed image
    pub fn suggested_filename(&self) -> String {
        match &self.tag {
            Some(tag) => format!("{}_customized_image.png", tag),
            None => "framed_image.png".to_string(),
        }
    }
}
