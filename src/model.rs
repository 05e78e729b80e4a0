use serde::{Deserialize, Deserializer, Serialize};

/// Page size and margins as found in `w:sectPr`, in twips.
///
/// `None` means the value was absent or could not be read as a number;
/// non-positive values are kept as-is and rejected when resolving.
#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
pub struct RawPageGeometry {
    #[serde(default, deserialize_with = "lenient_twips")]
    pub page_width: Option<f32>,
    #[serde(default, deserialize_with = "lenient_twips")]
    pub page_height: Option<f32>,
    #[serde(default, deserialize_with = "lenient_twips")]
    pub margin_top: Option<f32>,
    #[serde(default, deserialize_with = "lenient_twips")]
    pub margin_bottom: Option<f32>,
    #[serde(default, deserialize_with = "lenient_twips")]
    pub margin_left: Option<f32>,
    #[serde(default, deserialize_with = "lenient_twips")]
    pub margin_right: Option<f32>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

fn lenient_twips<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f32>, D::Error> {
    Ok(match Option::<RawValue>::deserialize(deserializer)? {
        Some(RawValue::Number(n)) => Some(n as f32),
        Some(RawValue::Text(s)) => s.trim().parse::<f32>().ok(),
        Some(RawValue::Other(_)) | None => None,
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Margins {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

/// Recoverable anomalies met while resolving page geometry.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GeometryWarnings {
    /// Fields that were absent or invalid and got the A4 default.
    pub defaulted_fields: Vec<&'static str>,
    /// Margins left no horizontal room; content width was floored.
    pub degenerate_width: bool,
    /// Margins left no vertical room; content height was floored.
    pub degenerate_height: bool,
}

impl GeometryWarnings {
    pub fn is_empty(&self) -> bool {
        self.defaulted_fields.is_empty() && !self.degenerate_width && !self.degenerate_height
    }
}

/// Resolved page geometry in points. Immutable for the document it belongs to.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margins: Margins,
    pub content_width: f32,
    pub content_height: f32,
    #[serde(skip_serializing_if = "GeometryWarnings::is_empty")]
    pub warnings: GeometryWarnings,
}

/// Attributes shared by every text-bearing element.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextBlock {
    /// Length of the visible text in characters.
    pub text_length: usize,
    /// Nominal font size in points, if known.
    pub font_size: Option<f32>,
    pub word_count: usize,
    pub sentence_count: usize,
    /// Has letters and none of them lowercase.
    pub all_caps: bool,
}

/// Which list a list item belongs to (`w:numPr`).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ListMembership {
    pub num_id: Option<String>,
    pub level: u8,
}

/// One structural block of a flowed document, in document order.
#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    TextParagraph(TextBlock),
    Heading(TextBlock),
    ListItem(TextBlock, ListMembership),
    Image {
        /// Vertical extent in EMU (`wp:extent/@cy`).
        extent_emu: Option<i64>,
    },
    Table {
        /// Declared row heights in points; `None` for rows sized by content.
        row_heights: Vec<Option<f32>>,
    },
    EmptyParagraph {
        font_size: Option<f32>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    TextParagraph,
    Heading,
    ListItem,
    Image,
    Table,
    EmptyParagraph,
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::TextParagraph(_) => ElementKind::TextParagraph,
            Element::Heading(_) => ElementKind::Heading,
            Element::ListItem(..) => ElementKind::ListItem,
            Element::Image { .. } => ElementKind::Image,
            Element::Table { .. } => ElementKind::Table,
            Element::EmptyParagraph { .. } => ElementKind::EmptyParagraph,
        }
    }

    pub fn text(&self) -> Option<&TextBlock> {
        match self {
            Element::TextParagraph(text) | Element::Heading(text) | Element::ListItem(text, _) => {
                Some(text)
            }
            _ => None,
        }
    }

    pub fn list(&self) -> Option<&ListMembership> {
        match self {
            Element::ListItem(_, list) => Some(list),
            _ => None,
        }
    }
}

/// Page assignment for one document.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct PaginationResult {
    /// 1-based page per element index.
    pub element_pages: Vec<u32>,
    /// Estimated height per element index, in points.
    pub element_heights: Vec<f32>,
    /// Elements moved forward to stay with the element after them.
    pub relocated: Vec<usize>,
    /// Zero for an empty document.
    pub page_count: u32,
}

impl PaginationResult {
    /// Indices of elements that open pages 2..=page_count.
    pub fn page_breaks(&self) -> Vec<usize> {
        self.element_pages
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| pair[1] != pair[0])
            .map(|(i, _)| i + 1)
            .collect()
    }
}
