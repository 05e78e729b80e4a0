use std::path::Path;

use serde::Deserialize;

use crate::error::Error;

/// Tunables for height estimation and the overflow threshold.
///
/// All ratios are calibrated against a proportional body font; recalibrate
/// them per font family or target renderer rather than editing the
/// accumulator.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Average glyph advance as a fraction of the font size.
    pub char_width_ratio: f32,
    /// Line height as a multiple of the font size.
    pub line_spacing: f32,
    /// Fraction of the content height treated as the practical page capacity.
    pub threshold_fraction: f32,
    /// Spacing added below every text-like paragraph, in points.
    pub paragraph_padding: f32,
    /// Spacing added per table row (cell margins, borders), in points.
    pub table_row_padding: f32,
    /// Font size used when an element has none or an invalid one, in points.
    pub default_font_size: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            char_width_ratio: 0.6,
            line_spacing: 1.5,
            threshold_fraction: 0.75,
            paragraph_padding: 2.0,
            table_row_padding: 2.0,
            default_font_size: 11.0,
        }
    }
}

impl LayoutConfig {
    /// Clamp a possibly missing or nonsensical font size to something usable.
    pub fn font_size_or_default(&self, font_size: Option<f32>) -> f32 {
        match font_size {
            Some(size) if size.is_finite() && size > 0.0 => size,
            _ => self.default_font_size,
        }
    }

    pub fn line_height(&self, font_size: Option<f32>) -> f32 {
        self.font_size_or_default(font_size) * self.line_spacing
    }

    /// One line at the default font size; the smallest extent anything gets.
    pub fn default_line_height(&self) -> f32 {
        self.line_height(None)
    }

    /// Reject tunables the estimator cannot clamp its way around.
    pub fn validate(&self) -> Result<(), Error> {
        let positive = [
            ("char_width_ratio", self.char_width_ratio),
            ("line_spacing", self.line_spacing),
            ("default_font_size", self.default_font_size),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(name, value, "a finite number > 0"));
            }
        }
        let padding = [
            ("paragraph_padding", self.paragraph_padding),
            ("table_row_padding", self.table_row_padding),
        ];
        for (name, value) in padding {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(name, value, "a finite number >= 0"));
            }
        }
        if !(self.threshold_fraction > 0.0 && self.threshold_fraction <= 1.0) {
            return Err(invalid(
                "threshold_fraction",
                self.threshold_fraction,
                "in (0, 1]",
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, value: impl std::fmt::Display, expected: &str) -> Error {
    Error::InvalidConfig(format!("{field} = {value}, expected {expected}"))
}

const DEFAULT_ABBREVIATIONS: &[&str] = &[
    "PT", "CV", "UD", "Tbk", "Ltd", "Inc", "Corp", "Dr", "dr", "Prof", "Ir", "Drs", "Dra", "ST",
    "SE", "SH", "MM", "M.Si", "M.Kom", "M.Pd", "S.Kom", "S.E", "S.H", "Hj", "H", "KH", "No",
    "Nomor", "Tel", "Telp", "Fax", "Hp", "Jl", "Jln", "Gg", "Kec", "Kel", "Kab", "Prov", "RT",
    "RW", "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agt", "Sep", "Okt", "Nov", "Des",
];

/// Criteria for telling body paragraphs, headings and list items apart.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// A block with at least this many sentences is a body paragraph.
    pub min_sentences: usize,
    /// A block with at least this many words is a body paragraph.
    pub min_words: usize,
    /// Share of uppercase letters above which a level-0 list item reads as a heading.
    pub heading_uppercase_ratio: f32,
    /// Lists with at least this many items are reported as long lists.
    pub long_list_min_items: usize,
    /// Abbreviations whose trailing period does not end a sentence.
    pub abbreviations: Vec<String>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_sentences: 2,
            min_words: 15,
            heading_uppercase_ratio: 0.5,
            long_list_min_items: 4,
            abbreviations: DEFAULT_ABBREVIATIONS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ClassifierConfig {
    pub fn validate(&self) -> Result<(), Error> {
        let ratio = self.heading_uppercase_ratio;
        if !(0.0..=1.0).contains(&ratio) {
            return Err(invalid("heading_uppercase_ratio", ratio, "in [0, 1]"));
        }
        if self.long_list_min_items == 0 {
            return Err(invalid("long_list_min_items", 0, "at least 1"));
        }
        Ok(())
    }
}

/// On-disk configuration: both sections optional.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub classifier: ClassifierConfig,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), Error> {
        self.layout.validate()?;
        self.classifier.validate()
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
