use crate::config::LayoutConfig;
use crate::model::ElementKind;

/// How the accumulator must treat one element at a page boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Threshold {
    /// Cumulative height above which the element starts a new page.
    pub limit: f32,
    /// The element must share a page with the start of the next one.
    pub keep_with_next: bool,
}

/// Overflow boundary: a fixed fraction of the usable height, leaving slack
/// for widows, orphans and split paragraphs the estimator cannot see.
pub struct ThresholdPolicy {
    limit: f32,
}

impl ThresholdPolicy {
    pub fn new(config: &LayoutConfig, content_height: f32) -> Self {
        Self {
            limit: content_height * config.threshold_fraction,
        }
    }

    pub fn limit(&self) -> f32 {
        self.limit
    }

    /// Placement is always whole-element, so tables and images are never
    /// split; only headings carry an extra obligation.
    pub fn for_kind(&self, kind: ElementKind) -> Threshold {
        Threshold {
            limit: self.limit,
            keep_with_next: kind == ElementKind::Heading,
        }
    }
}
