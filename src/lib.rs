mod classify;
mod config;
mod docx;
mod error;
mod estimate;
mod geometry;
mod input;
mod model;
mod paginate;
mod policy;
mod report;
pub mod units;

pub use classify::{
    BlockKind, GROUP_PATTERNS, Group, GroupPattern, ListRun, SentenceCounter, block_kind,
    extract_groups, list_runs, looks_like_numbered_heading,
};
pub use config::{ClassifierConfig, Config, LayoutConfig};
pub use error::Error;
pub use estimate::HeightEstimator;
pub use geometry::resolve as resolve_geometry;
pub use input::{DocumentInput, ElementRecord};
pub use model::{
    Element, ElementKind, GeometryWarnings, ListMembership, Margins, PageGeometry,
    PaginationResult, RawPageGeometry, TextBlock,
};
pub use paginate::Paginator;
pub use policy::{Threshold, ThresholdPolicy};
pub use report::{
    GroupPlacement, ListPlacement, PaginationReport, Placement, ReportSummary, SpanPlacement,
};

use std::path::Path;
use std::time::Instant;

/// Assign a page to every element. Pure: same inputs, same result.
pub fn paginate(
    geometry: &PageGeometry,
    elements: &[Element],
    layout: &LayoutConfig,
) -> PaginationResult {
    Paginator::new(layout, geometry).run(elements)
}

/// Resolve geometry, paginate, and gather the report.
pub fn build_report(
    raw: &RawPageGeometry,
    elements: &[Element],
    config: &Config,
) -> PaginationReport {
    let geometry = geometry::resolve(raw, &config.layout);
    let paginator = Paginator::new(&config.layout, &geometry);
    let result = paginator.run(elements);
    let threshold = paginator.threshold();
    PaginationReport::build(geometry, threshold, elements, &result, &config.classifier)
}

/// Paginate an element list produced by an external extractor.
pub fn paginate_input(input: &DocumentInput, config: &Config) -> Result<PaginationReport, Error> {
    config.validate()?;
    let counter = SentenceCounter::new(&config.classifier)?;
    let elements = input.elements(&counter)?;
    Ok(build_report(&input.geometry, &elements, config))
}

fn paginate_extracted(
    t0: Instant,
    doc: docx::ExtractedDocument,
    config: &Config,
) -> PaginationReport {
    let t_extract = t0.elapsed();
    let report = build_report(&doc.geometry, &doc.elements, config);
    let t_total = t0.elapsed();

    log::info!(
        "Timing: extract={:.1}ms, paginate={:.1}ms, total={:.1}ms ({} elements, {} pages)",
        t_extract.as_secs_f64() * 1000.0,
        (t_total - t_extract).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
        doc.elements.len(),
        report.page_count,
    );
    report
}

pub fn paginate_docx(input: &Path, config: &Config) -> Result<PaginationReport, Error> {
    config.validate()?;
    let t0 = Instant::now();
    let doc = docx::parse(input, &config.classifier)?;
    Ok(paginate_extracted(t0, doc, config))
}

pub fn paginate_docx_bytes(input: &[u8], config: &Config) -> Result<PaginationReport, Error> {
    config.validate()?;
    let t0 = Instant::now();
    let doc = docx::parse_bytes(input, &config.classifier)?;
    Ok(paginate_extracted(t0, doc, config))
}
