use crate::config::LayoutConfig;
use crate::model::{Element, PageGeometry, TextBlock};
use crate::units::emu_to_points;

/// Estimates how tall each element will be once a renderer lays it out.
///
/// Works at element granularity: no line breaking, no font metrics beyond
/// the nominal size. Every estimate is strictly positive.
pub struct HeightEstimator<'a> {
    config: &'a LayoutConfig,
    content_width: f32,
}

impl<'a> HeightEstimator<'a> {
    pub fn new(config: &'a LayoutConfig, geometry: &PageGeometry) -> Self {
        Self {
            config,
            content_width: geometry.content_width,
        }
    }

    pub fn chars_per_line(&self, font_size: Option<f32>) -> f32 {
        let char_width = self.config.font_size_or_default(font_size) * self.config.char_width_ratio;
        if char_width > 0.0 {
            (self.content_width / char_width).max(1.0)
        } else {
            1.0
        }
    }

    pub fn line_count(&self, text: &TextBlock) -> u32 {
        let per_line = self.chars_per_line(text.font_size);
        ((text.text_length as f32 / per_line).ceil() as u32).max(1)
    }

    fn text_height(&self, text: &TextBlock) -> f32 {
        self.line_count(text) as f32 * self.config.line_height(text.font_size)
            + self.config.paragraph_padding
    }

    pub fn estimate(&self, element: &Element) -> f32 {
        let line_h = self.config.default_line_height();
        let height = match element {
            Element::TextParagraph(text) | Element::Heading(text) | Element::ListItem(text, _) => {
                self.text_height(text)
            }
            Element::Image { extent_emu } => match extent_emu {
                Some(emu) if *emu > 0 => emu_to_points(*emu as f32),
                _ => line_h,
            },
            Element::Table { row_heights } if row_heights.is_empty() => line_h,
            Element::Table { row_heights } => row_heights
                .iter()
                .map(|h| match h {
                    Some(h) if h.is_finite() && *h > 0.0 => *h,
                    _ => line_h,
                })
                .sum::<f32>()
                + row_heights.len() as f32 * self.config.table_row_padding,
            Element::EmptyParagraph { font_size } => self.config.line_height(*font_size),
        };
        // Degenerate tunables (zero spacing, zero padding) must not yield a
        // zero-height element.
        if height.is_finite() && height > 0.0 {
            height
        } else {
            line_h.max(1.0)
        }
    }
}
