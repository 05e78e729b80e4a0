mod styles;

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use crate::classify::{SentenceCounter, looks_like_numbered_heading};
use crate::config::ClassifierConfig;
use crate::error::Error;
use crate::model::{Element, ListMembership, RawPageGeometry};
use crate::units::{half_points_to_points, twips_to_points};

use styles::{StylesInfo, parse_styles};

pub(super) const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const WPD_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";

/// `w:outlineLvl` value 9 means body text.
const BODY_TEXT_OUTLINE_LEVEL: u8 = 9;

/// What the extractor hands to the paginator: raw section geometry and the
/// body blocks in document order.
pub struct ExtractedDocument {
    pub geometry: RawPageGeometry,
    pub elements: Vec<Element>,
}

pub(super) fn wml<'a>(
    node: roxmltree::Node<'a, 'a>,
    name: &str,
) -> Option<roxmltree::Node<'a, 'a>> {
    node.children()
        .find(|n| n.tag_name().name() == name && n.tag_name().namespace() == Some(WML_NS))
}

pub(super) fn wml_attr<'a>(node: roxmltree::Node<'a, 'a>, child: &str) -> Option<&'a str> {
    wml(node, child).and_then(|n| n.attribute((WML_NS, "val")))
}

fn is_wml(node: roxmltree::Node, name: &str) -> bool {
    node.tag_name().name() == name && node.tag_name().namespace() == Some(WML_NS)
}

pub(super) fn outline_level(ppr: roxmltree::Node) -> Option<u8> {
    wml_attr(ppr, "outlineLvl")
        .and_then(|v| v.parse::<u8>().ok())
        .filter(|lvl| *lvl < BODY_TEXT_OUTLINE_LEVEL)
}

pub(super) fn read_zip_text<R: Read + Seek>(
    zip: &mut zip::ZipArchive<R>,
    name: &str,
) -> Option<String> {
    let mut content = String::new();
    zip.by_name(name).ok()?.read_to_string(&mut content).ok()?;
    Some(content)
}

/// Flatten SDT wrappers: descend into w:sdtContent and collect effective children.
fn collect_block_nodes<'a>(parent: roxmltree::Node<'a, 'a>) -> Vec<roxmltree::Node<'a, 'a>> {
    let mut nodes = Vec::new();
    for child in parent.children() {
        if is_wml(child, "sdt") {
            if let Some(content) = wml(child, "sdtContent") {
                nodes.extend(collect_block_nodes(content));
            }
        } else {
            nodes.push(child);
        }
    }
    nodes
}

/// Raw twips; text that is not a number counts as absent.
fn raw_twips(node: Option<roxmltree::Node>, attr: &str) -> Option<f32> {
    node.and_then(|n| n.attribute((WML_NS, attr)))
        .and_then(|v| v.trim().parse::<f32>().ok())
}

fn section_geometry(sect: Option<roxmltree::Node>) -> RawPageGeometry {
    let pg_sz = sect.and_then(|n| wml(n, "pgSz"));
    let pg_mar = sect.and_then(|n| wml(n, "pgMar"));
    RawPageGeometry {
        page_width: raw_twips(pg_sz, "w"),
        page_height: raw_twips(pg_sz, "h"),
        margin_top: raw_twips(pg_mar, "top"),
        margin_bottom: raw_twips(pg_mar, "bottom"),
        margin_left: raw_twips(pg_mar, "left"),
        margin_right: raw_twips(pg_mar, "right"),
    }
}

fn paragraph_text(para: roxmltree::Node) -> String {
    para.descendants()
        .filter(|n| is_wml(*n, "t"))
        .filter_map(|n| n.text())
        .collect()
}

fn run_font_size(rpr: roxmltree::Node) -> Option<f32> {
    wml_attr(rpr, "sz")
        .and_then(|v| v.parse::<f32>().ok())
        .filter(|v| *v > 0.0)
        .map(half_points_to_points)
}

/// First run's size, then the paragraph mark's, then the style chain.
fn paragraph_font_size(
    para: roxmltree::Node,
    style_id: Option<&str>,
    styles: &StylesInfo,
) -> Option<f32> {
    let first_run = para
        .descendants()
        .find(|n| is_wml(*n, "r") && n.descendants().any(|d| is_wml(d, "t")))
        .and_then(|r| wml(r, "rPr"))
        .and_then(run_font_size);
    let mark = wml(para, "pPr")
        .and_then(|ppr| wml(ppr, "rPr"))
        .and_then(run_font_size);
    first_run.or(mark).or_else(|| styles.font_size(style_id))
}

/// Tallest `wp:extent/@cy` among the paragraph's drawings, in EMU.
fn drawing_extent(para: roxmltree::Node) -> Option<i64> {
    para.descendants()
        .filter(|n| is_wml(*n, "drawing"))
        .flat_map(|d| d.descendants())
        .filter(|n| n.tag_name().name() == "extent" && n.tag_name().namespace() == Some(WPD_NS))
        .filter_map(|n| n.attribute("cy").and_then(|v| v.parse::<i64>().ok()))
        .max()
}

fn list_membership(ppr: Option<roxmltree::Node>) -> Option<ListMembership> {
    let num_pr = ppr.and_then(|n| wml(n, "numPr"))?;
    let num_id = wml_attr(num_pr, "numId").map(|s| s.to_string());
    // numId 0 explicitly removes numbering inherited from a style.
    if num_id.as_deref() == Some("0") {
        return None;
    }
    let level = wml_attr(num_pr, "ilvl")
        .and_then(|v| v.parse::<u8>().ok())
        .unwrap_or(0);
    Some(ListMembership { num_id, level })
}

struct BlockParser<'a> {
    styles: &'a StylesInfo,
    counter: &'a SentenceCounter,
    classifier: &'a ClassifierConfig,
}

impl BlockParser<'_> {
    fn paragraph(&self, para: roxmltree::Node) -> Element {
        let ppr = wml(para, "pPr");
        let style_id = ppr.and_then(|n| wml_attr(n, "pStyle"));
        let font_size = paragraph_font_size(para, style_id, self.styles);

        let has_drawing = para.descendants().any(|n| is_wml(n, "drawing"));
        if has_drawing {
            return Element::Image {
                extent_emu: drawing_extent(para),
            };
        }

        let text = paragraph_text(para);
        if text.trim().is_empty() {
            return Element::EmptyParagraph { font_size };
        }

        let list = list_membership(ppr);
        let block = self.counter.text_block(&text, font_size);

        let numbered_title = list
            .as_ref()
            .is_some_and(|l| l.level == 0 && looks_like_numbered_heading(&text, self.classifier));
        let heading = self.styles.is_heading(style_id)
            || ppr.and_then(outline_level).is_some()
            || numbered_title;

        match (heading, list) {
            (true, _) => Element::Heading(block),
            (false, Some(list)) => Element::ListItem(block, list),
            (false, None) => Element::TextParagraph(block),
        }
    }

    fn table(&self, tbl: roxmltree::Node) -> Element {
        let row_heights = collect_block_nodes(tbl)
            .into_iter()
            .filter(|n| is_wml(*n, "tr"))
            .map(|tr| {
                wml(tr, "trPr")
                    .and_then(|pr| wml(pr, "trHeight"))
                    .and_then(|h| h.attribute((WML_NS, "val")))
                    .and_then(|v| v.parse::<f32>().ok())
                    .filter(|v| *v > 0.0)
                    .map(twips_to_points)
            })
            .collect();
        Element::Table { row_heights }
    }
}

fn parse_archive<R: Read + Seek>(
    mut zip: zip::ZipArchive<R>,
    classifier: &ClassifierConfig,
) -> Result<ExtractedDocument, Error> {
    let styles = parse_styles(&mut zip);
    let counter = SentenceCounter::new(classifier)?;

    let mut xml_content = String::new();
    zip.by_name("word/document.xml")
        .map_err(|_| Error::InvalidDocx("missing word/document.xml (is this a DOCX file?)".into()))?
        .read_to_string(&mut xml_content)?;

    let xml = roxmltree::Document::parse(&xml_content)?;
    let root = xml.root_element();
    let body = wml(root, "body").ok_or_else(|| Error::InvalidDocx("missing w:body".into()))?;

    let parser = BlockParser {
        styles: &styles,
        counter: &counter,
        classifier,
    };

    let mut elements = Vec::new();
    let mut sect_pr = None;
    for node in collect_block_nodes(body) {
        if node.tag_name().namespace() != Some(WML_NS) {
            continue;
        }
        match node.tag_name().name() {
            "p" => elements.push(parser.paragraph(node)),
            "tbl" => elements.push(parser.table(node)),
            "sectPr" => sect_pr = Some(node),
            _ => {}
        }
    }

    if sect_pr.is_none() {
        log::warn!("Document has no body-level w:sectPr, page geometry falls back to defaults");
    }
    log::debug!("Extracted {} block elements", elements.len());

    Ok(ExtractedDocument {
        geometry: section_geometry(sect_pr),
        elements,
    })
}

pub fn parse(path: &Path, classifier: &ClassifierConfig) -> Result<ExtractedDocument, Error> {
    let file = std::fs::File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => Error::Io(
            std::io::Error::new(e.kind(), format!("{}: {}", e, path.display())),
        ),
        _ => Error::Io(e),
    })?;

    let zip = zip::ZipArchive::new(file)
        .map_err(|_| Error::InvalidDocx("file is not a ZIP archive".into()))?;
    parse_archive(zip, classifier)
}

pub fn parse_bytes(
    bytes: &[u8],
    classifier: &ClassifierConfig,
) -> Result<ExtractedDocument, Error> {
    let zip = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|_| Error::InvalidDocx("data is not a ZIP archive".into()))?;
    parse_archive(zip, classifier)
}
