#![allow(dead_code)]

use std::io::{Cursor, Write};

use docx_paginate::{Element, LayoutConfig, ListMembership, RawPageGeometry, TextBlock};
use zip::write::SimpleFileOptions;

pub const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
pub const WPD_NS: &str = "http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing";

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn approx(actual: f32, expected: f32, tol: f32) -> bool {
    (actual - expected).abs() < tol
}

/// Page whose content area is exactly 468 x 400 pt (threshold 300 pt with
/// the default 0.75 fraction).
pub fn square_page() -> RawPageGeometry {
    RawPageGeometry {
        page_width: Some(12240.0),
        page_height: Some(10880.0),
        margin_top: Some(1440.0),
        margin_bottom: Some(1440.0),
        margin_left: Some(1440.0),
        margin_right: Some(1440.0),
    }
}

pub fn reference_a4() -> RawPageGeometry {
    RawPageGeometry {
        page_width: Some(11906.0),
        page_height: Some(16838.0),
        margin_top: Some(1559.0),
        margin_bottom: Some(737.0),
        margin_left: Some(1531.0),
        margin_right: Some(1418.0),
    }
}

pub fn text(len: usize) -> TextBlock {
    TextBlock {
        text_length: len,
        font_size: Some(11.0),
        ..Default::default()
    }
}

pub fn paragraph(len: usize) -> Element {
    Element::TextParagraph(text(len))
}

pub fn heading(len: usize) -> Element {
    Element::Heading(text(len))
}

pub fn list_item(len: usize, num_id: &str) -> Element {
    Element::ListItem(
        text(len),
        ListMembership {
            num_id: Some(num_id.to_string()),
            level: 0,
        },
    )
}

/// An image exactly `points` tall.
pub fn image_pt(points: u32) -> Element {
    Element::Image {
        extent_emu: Some(points as i64 * 12700),
    }
}

pub fn table(rows: &[Option<f32>]) -> Element {
    Element::Table {
        row_heights: rows.to_vec(),
    }
}

pub fn layout() -> LayoutConfig {
    LayoutConfig::default()
}

/// Minimal in-memory DOCX: `word/document.xml` plus optional styles.
pub struct DocxBuilder {
    body: String,
    styles: Option<String>,
}

impl DocxBuilder {
    pub fn new() -> Self {
        Self {
            body: String::new(),
            styles: None,
        }
    }

    pub fn raw(mut self, xml: &str) -> Self {
        self.body.push_str(xml);
        self
    }

    pub fn paragraph(self, text: &str) -> Self {
        self.raw(&format!(r#"<w:p><w:r><w:t xml:space="preserve">{text}</w:t></w:r></w:p>"#))
    }

    pub fn styled(self, style: &str, text: &str) -> Self {
        self.raw(&format!(
            r#"<w:p><w:pPr><w:pStyle w:val="{style}"/></w:pPr><w:r><w:t>{text}</w:t></w:r></w:p>"#
        ))
    }

    pub fn sized(self, half_points: u32, text: &str) -> Self {
        self.raw(&format!(
            r#"<w:p><w:r><w:rPr><w:sz w:val="{half_points}"/></w:rPr><w:t>{text}</w:t></w:r></w:p>"#
        ))
    }

    pub fn empty(self) -> Self {
        self.raw("<w:p/>")
    }

    pub fn list_item(self, num_id: u32, level: u8, text: &str) -> Self {
        self.raw(&format!(
            r#"<w:p><w:pPr><w:numPr><w:ilvl w:val="{level}"/><w:numId w:val="{num_id}"/></w:numPr></w:pPr><w:r><w:t>{text}</w:t></w:r></w:p>"#
        ))
    }

    pub fn image(self, cy: i64) -> Self {
        self.raw(&format!(
            r#"<w:p><w:r><w:drawing><wp:inline><wp:extent cx="914400" cy="{cy}"/></wp:inline></w:drawing></w:r></w:p>"#
        ))
    }

    /// One row per entry; `Some(twips)` declares `w:trHeight`.
    pub fn table(self, rows: &[Option<u32>]) -> Self {
        let mut xml = String::from("<w:tbl><w:tblGrid><w:gridCol w:w=\"9000\"/></w:tblGrid>");
        for row in rows {
            xml.push_str("<w:tr>");
            if let Some(h) = row {
                xml.push_str(&format!(r#"<w:trPr><w:trHeight w:val="{h}"/></w:trPr>"#));
            }
            xml.push_str("<w:tc><w:p><w:r><w:t>cell</w:t></w:r></w:p></w:tc></w:tr>");
        }
        xml.push_str("</w:tbl>");
        self.raw(&xml)
    }

    pub fn section(self, raw: &RawPageGeometry) -> Self {
        let v = |x: Option<f32>| x.map(|x| x.to_string()).unwrap_or_default();
        self.raw(&format!(
            r#"<w:sectPr><w:pgSz w:w="{}" w:h="{}"/><w:pgMar w:top="{}" w:bottom="{}" w:left="{}" w:right="{}"/></w:sectPr>"#,
            v(raw.page_width),
            v(raw.page_height),
            v(raw.margin_top),
            v(raw.margin_bottom),
            v(raw.margin_left),
            v(raw.margin_right),
        ))
    }

    pub fn styles(mut self, xml: &str) -> Self {
        self.styles = Some(format!(r#"<w:styles xmlns:w="{WML_NS}">{xml}</w:styles>"#));
        self
    }

    pub fn document_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="{WML_NS}" xmlns:wp="{WPD_NS}"><w:body>{}</w:body></w:document>"#,
            self.body
        )
    }

    pub fn build(&self) -> Vec<u8> {
        let mut files = vec![("word/document.xml", self.document_xml())];
        if let Some(styles) = &self.styles {
            files.push(("word/styles.xml", styles.clone()));
        }
        zip_bytes(&files)
    }
}

pub fn zip_bytes(files: &[(&str, String)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in files {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .expect("start zip entry");
        writer.write_all(content.as_bytes()).expect("write zip entry");
    }
    writer.finish().expect("finish zip").into_inner()
}
