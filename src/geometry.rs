use crate::config::LayoutConfig;
use crate::model::{GeometryWarnings, Margins, PageGeometry, RawPageGeometry};
use crate::units::twips_to_points;

/// A4 portrait with the margins of the reference template, in twips.
pub const DEFAULT_PAGE_WIDTH_TWIPS: f32 = 11906.0;
pub const DEFAULT_PAGE_HEIGHT_TWIPS: f32 = 16838.0;
pub const DEFAULT_MARGIN_TOP_TWIPS: f32 = 1559.0;
pub const DEFAULT_MARGIN_BOTTOM_TWIPS: f32 = 737.0;
pub const DEFAULT_MARGIN_LEFT_TWIPS: f32 = 1531.0;
pub const DEFAULT_MARGIN_RIGHT_TWIPS: f32 = 1418.0;

fn resolve_field(
    raw: Option<f32>,
    default_twips: f32,
    name: &'static str,
    warnings: &mut GeometryWarnings,
) -> f32 {
    match raw {
        Some(v) if v.is_finite() && v > 0.0 => twips_to_points(v),
        _ => {
            warnings.defaulted_fields.push(name);
            twips_to_points(default_twips)
        }
    }
}

/// Turn raw `w:sectPr` values into usable content dimensions.
///
/// Absent or non-positive fields get the A4 default for that field. If the
/// margins swallow a whole axis, the content extent on that axis is floored
/// at one default line so the result is always strictly positive.
pub fn resolve(raw: &RawPageGeometry, config: &LayoutConfig) -> PageGeometry {
    let mut warnings = GeometryWarnings::default();

    let mut field = |value: Option<f32>, default_twips: f32, name: &'static str| {
        resolve_field(value, default_twips, name, &mut warnings)
    };
    let page_width = field(raw.page_width, DEFAULT_PAGE_WIDTH_TWIPS, "page_width");
    let page_height = field(raw.page_height, DEFAULT_PAGE_HEIGHT_TWIPS, "page_height");
    let margins = Margins {
        top: field(raw.margin_top, DEFAULT_MARGIN_TOP_TWIPS, "margin_top"),
        bottom: field(raw.margin_bottom, DEFAULT_MARGIN_BOTTOM_TWIPS, "margin_bottom"),
        left: field(raw.margin_left, DEFAULT_MARGIN_LEFT_TWIPS, "margin_left"),
        right: field(raw.margin_right, DEFAULT_MARGIN_RIGHT_TWIPS, "margin_right"),
    };

    let floor = config.default_line_height().max(1.0);

    let mut content_width = page_width - margins.left - margins.right;
    if content_width <= 0.0 {
        warnings.degenerate_width = true;
        content_width = floor;
    }
    let mut content_height = page_height - margins.top - margins.bottom;
    if content_height <= 0.0 {
        warnings.degenerate_height = true;
        content_height = floor;
    }

    if !warnings.defaulted_fields.is_empty() {
        log::warn!(
            "Page geometry: substituted A4 defaults for {}",
            warnings.defaulted_fields.join(", ")
        );
    }
    if warnings.degenerate_width || warnings.degenerate_height {
        log::warn!(
            "Page geometry: margins consume the page ({:.1}x{:.1}pt), content area floored to {:.1}x{:.1}pt",
            page_width,
            page_height,
            content_width,
            content_height,
        );
    }

    PageGeometry {
        page_width,
        page_height,
        margins,
        content_width,
        content_height,
        warnings,
    }
}
