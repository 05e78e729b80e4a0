use std::collections::HashMap;
use std::io::{Read, Seek};

use crate::units::half_points_to_points;

use super::{WML_NS, outline_level, read_zip_text, wml, wml_attr};

pub(super) struct ParagraphStyle {
    pub(super) font_size: Option<f32>,
    pub(super) outline_level: Option<u8>,
    pub(super) heading_name: bool,
    pub(super) based_on: Option<String>,
}

pub(super) struct StylesInfo {
    pub(super) default_font_size: Option<f32>,
    /// Paragraph style marked `w:default="1"`, applied to unstyled paragraphs.
    pub(super) default_style: Option<String>,
    pub(super) paragraph_styles: HashMap<String, ParagraphStyle>,
}

impl StylesInfo {
    /// Font size of a paragraph style after inheritance, falling back to
    /// the document defaults.
    pub(super) fn font_size(&self, style_id: Option<&str>) -> Option<f32> {
        let style_id = style_id
            .or(self.default_style.as_deref())
            .unwrap_or("Normal");
        self.paragraph_styles
            .get(style_id)
            .and_then(|s| s.font_size)
            .or(self.default_font_size)
    }

    /// Undeclared style ids still count when their name says heading.
    pub(super) fn is_heading(&self, style_id: Option<&str>) -> bool {
        let Some(style_id) = style_id else {
            return false;
        };
        match self.paragraph_styles.get(style_id) {
            Some(s) => s.heading_name || s.outline_level.is_some(),
            None => is_heading_name(style_id),
        }
    }
}

fn is_heading_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    lower == "title" || lower.starts_with("heading")
}

fn half_points(node: roxmltree::Node) -> Option<f32> {
    wml_attr(node, "sz")
        .and_then(|v| v.parse::<f32>().ok())
        .filter(|v| *v > 0.0)
        .map(half_points_to_points)
}

pub(super) fn parse_styles<R: Read + Seek>(zip: &mut zip::ZipArchive<R>) -> StylesInfo {
    let mut info = StylesInfo {
        default_font_size: None,
        default_style: None,
        paragraph_styles: HashMap::new(),
    };

    let Some(xml_content) = read_zip_text(zip, "word/styles.xml") else {
        return info;
    };
    let Ok(xml) = roxmltree::Document::parse(&xml_content) else {
        log::warn!("word/styles.xml is not well-formed, ignoring styles");
        return info;
    };

    let root = xml.root_element();

    info.default_font_size = wml(root, "docDefaults")
        .and_then(|n| wml(n, "rPrDefault"))
        .and_then(|n| wml(n, "rPr"))
        .and_then(half_points);

    for style_node in root.children() {
        if style_node.tag_name().name() != "style"
            || style_node.tag_name().namespace() != Some(WML_NS)
        {
            continue;
        }
        if style_node.attribute((WML_NS, "type")) != Some("paragraph") {
            continue;
        }
        let Some(style_id) = style_node.attribute((WML_NS, "styleId")) else {
            continue;
        };

        if style_node.attribute((WML_NS, "default")) == Some("1") {
            info.default_style = Some(style_id.to_string());
        }

        let name = wml_attr(style_node, "name").unwrap_or("");
        let font_size = wml(style_node, "rPr").and_then(half_points);
        let outline_level = wml(style_node, "pPr").and_then(outline_level);
        let based_on = wml_attr(style_node, "basedOn").map(|s| s.to_string());

        info.paragraph_styles.insert(
            style_id.to_string(),
            ParagraphStyle {
                font_size,
                outline_level,
                heading_name: is_heading_name(style_id) || is_heading_name(name),
                based_on,
            },
        );
    }

    resolve_based_on(&mut info.paragraph_styles);
    info
}

fn resolve_based_on(styles: &mut HashMap<String, ParagraphStyle>) {
    let ids: Vec<String> = styles.keys().cloned().collect();
    for id in ids {
        let mut chain: Vec<String> = Vec::new();
        let mut current = id.clone();
        loop {
            if chain.contains(&current) {
                break;
            }
            chain.push(current.clone());
            match styles.get(&current).and_then(|s| s.based_on.clone()) {
                Some(parent) => current = parent,
                None => break,
            }
        }

        // Closest ancestor wins.
        let mut font_size = None;
        let mut outline = None;
        for ancestor_id in chain.iter().skip(1) {
            if let Some(s) = styles.get(ancestor_id) {
                font_size = font_size.or(s.font_size);
                outline = outline.or(s.outline_level);
            }
        }

        if let Some(s) = styles.get_mut(&id) {
            s.font_size = s.font_size.or(font_size);
            s.outline_level = s.outline_level.or(outline);
        }
    }
}
