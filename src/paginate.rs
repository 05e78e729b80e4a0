use crate::config::LayoutConfig;
use crate::estimate::HeightEstimator;
use crate::model::{Element, PageGeometry, PaginationResult};
use crate::policy::ThresholdPolicy;

/// Transient per-run state. Never shared between documents.
#[derive(Default)]
struct AccumulatorState {
    cumulative_height: f32,
    current_page: u32,
    /// Elements already placed on `current_page`.
    page_len: usize,
    /// Trailing keep-with-next elements on `current_page` still waiting for
    /// their successor.
    pending: Vec<usize>,
}

/// Walks the element sequence in document order and decides where pages
/// begin.
///
/// An element that would push the running height past the threshold opens a
/// new page, unless it is the first element on the current page: an element
/// taller than a page still has to go somewhere, so it sits alone and
/// overflows. Hitting the threshold exactly keeps the element on the current
/// page. Keep-with-next elements (headings) stranded at the bottom of a page
/// are carried to the new page together with the element that overflowed,
/// provided they are not all the page holds.
pub struct Paginator<'a> {
    estimator: HeightEstimator<'a>,
    policy: ThresholdPolicy,
}

impl<'a> Paginator<'a> {
    pub fn new(config: &'a LayoutConfig, geometry: &PageGeometry) -> Self {
        Self {
            estimator: HeightEstimator::new(config, geometry),
            policy: ThresholdPolicy::new(config, geometry.content_height),
        }
    }

    pub fn threshold(&self) -> f32 {
        self.policy.limit()
    }

    pub fn estimator(&self) -> &HeightEstimator<'a> {
        &self.estimator
    }

    pub fn run(&self, elements: &[Element]) -> PaginationResult {
        let mut result = PaginationResult {
            element_pages: Vec::with_capacity(elements.len()),
            element_heights: Vec::with_capacity(elements.len()),
            relocated: Vec::new(),
            page_count: 0,
        };
        if elements.is_empty() {
            return result;
        }

        let mut state = AccumulatorState {
            current_page: 1,
            ..Default::default()
        };

        for (index, element) in elements.iter().enumerate() {
            let height = self.estimator.estimate(element);
            let threshold = self.policy.for_kind(element.kind());

            let overflows = state.cumulative_height + height > threshold.limit;
            if overflows && state.page_len > 0 {
                // Carry stranded keep-with-next elements along, unless doing
                // so would leave the page they came from empty.
                let carried = if state.pending.len() < state.page_len {
                    std::mem::take(&mut state.pending)
                } else {
                    state.pending.clear();
                    Vec::new()
                };

                state.current_page += 1;
                state.cumulative_height = 0.0;
                state.page_len = 0;
                log::debug!(
                    "Page {} starts at element {} ({:?}, {:.1}pt)",
                    state.current_page,
                    carried.first().copied().unwrap_or(index),
                    element.kind(),
                    height,
                );

                for &moved in &carried {
                    log::debug!(
                        "Element {} moved to page {} to stay with element {}",
                        moved,
                        state.current_page,
                        index,
                    );
                    result.element_pages[moved] = state.current_page;
                    result.relocated.push(moved);
                    state.cumulative_height += result.element_heights[moved];
                    state.page_len += 1;
                }
                state.pending = carried;
            }

            state.cumulative_height += height;
            state.page_len += 1;
            result.element_pages.push(state.current_page);
            result.element_heights.push(height);

            if threshold.keep_with_next {
                state.pending.push(index);
            } else {
                state.pending.clear();
            }
        }

        result.page_count = state.current_page;
        result
    }
}
