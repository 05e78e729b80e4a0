use std::ops::Range;

use serde::Serialize;

use crate::classify::{BlockKind, block_kind, extract_groups, list_runs};
use crate::config::ClassifierConfig;
use crate::model::{Element, ElementKind, PageGeometry, PaginationResult};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Placement {
    pub index: usize,
    pub kind: ElementKind,
    pub block: BlockKind,
    /// Estimated height in points.
    pub height: f32,
    pub page: u32,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub relocated: bool,
}

/// Page span of a run of elements that read as one unit.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpanPlacement {
    pub start: usize,
    pub len: usize,
    pub first_page: u32,
    pub last_page: u32,
    /// The unit straddles a page boundary.
    pub split: bool,
}

impl SpanPlacement {
    fn new(indices: &Range<usize>, pages: &[u32]) -> Self {
        let first_page = pages[indices.start];
        let last_page = pages[indices.end - 1];
        Self {
            start: indices.start,
            len: indices.len(),
            first_page,
            last_page,
            split: first_page != last_page,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GroupPlacement {
    pub pattern: &'static str,
    #[serde(flatten)]
    pub span: SpanPlacement,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ListPlacement {
    pub num_id: Option<String>,
    /// Elements that close the list or one of its sublists.
    pub level_ends: Vec<usize>,
    /// At least `long_list_min_items` items.
    pub long: bool,
    #[serde(flatten)]
    pub span: SpanPlacement,
}

/// Everything known about one pagination run, ready to serialize.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PaginationReport {
    #[serde(flatten)]
    pub geometry: PageGeometry,
    /// Overflow threshold in points.
    pub threshold: f32,
    pub page_count: u32,
    pub element_pages: Vec<u32>,
    /// Elements a synthetic page break would be inserted before.
    pub page_breaks: Vec<usize>,
    pub placements: Vec<Placement>,
    pub groups: Vec<GroupPlacement>,
    pub lists: Vec<ListPlacement>,
}

#[derive(Serialize)]
pub struct ReportSummary<'a> {
    #[serde(flatten)]
    pub geometry: &'a PageGeometry,
    pub page_count: u32,
    pub page_breaks: &'a [usize],
}

impl PaginationReport {
    pub fn build(
        geometry: PageGeometry,
        threshold: f32,
        elements: &[Element],
        result: &PaginationResult,
        classifier: &ClassifierConfig,
    ) -> Self {
        let pages = &result.element_pages;
        let kinds: Vec<BlockKind> = elements.iter().map(|e| block_kind(e, classifier)).collect();
        let mut relocated = vec![false; elements.len()];
        for &index in &result.relocated {
            relocated[index] = true;
        }

        let placements = elements
            .iter()
            .enumerate()
            .map(|(index, element)| Placement {
                index,
                kind: element.kind(),
                block: kinds[index],
                height: result.element_heights[index],
                page: pages[index],
                relocated: relocated[index],
            })
            .collect();

        let groups = extract_groups(&kinds)
            .into_iter()
            .map(|g| GroupPlacement {
                pattern: g.pattern,
                span: SpanPlacement::new(&g.indices, pages),
            })
            .collect();

        let lists = list_runs(elements)
            .into_iter()
            .map(|run| ListPlacement {
                span: SpanPlacement::new(&run.indices, pages),
                long: run.len() >= classifier.long_list_min_items,
                num_id: run.num_id,
                level_ends: run.level_ends,
            })
            .collect();

        Self {
            geometry,
            threshold,
            page_count: result.page_count,
            element_pages: pages.clone(),
            page_breaks: result.page_breaks(),
            placements,
            groups,
            lists,
        }
    }

    pub fn summary(&self) -> ReportSummary<'_> {
        ReportSummary {
            geometry: &self.geometry,
            page_count: self.page_count,
            page_breaks: &self.page_breaks,
        }
    }

    pub fn split_groups(&self) -> impl Iterator<Item = &GroupPlacement> {
        self.groups.iter().filter(|g| g.span.split)
    }
}
