use serde::Deserialize;

use crate::classify::SentenceCounter;
use crate::error::Error;
use crate::model::{Element, ListMembership, RawPageGeometry, TextBlock};

/// A document handed over by an external extractor as JSON.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DocumentInput {
    #[serde(default)]
    pub geometry: RawPageGeometry,
    #[serde(default)]
    pub elements: Vec<ElementRecord>,
}

impl DocumentInput {
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate every record, rejecting the first one of an unknown type.
    pub fn elements(&self, counter: &SentenceCounter) -> Result<Vec<Element>, Error> {
        self.elements
            .iter()
            .enumerate()
            .map(|(index, record)| record.to_element(index, counter))
            .collect()
    }
}

/// One element as described by the extractor. Only the fields relevant to
/// `kind` are read.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ElementRecord {
    pub kind: String,
    /// Visible text; when given, length and word/sentence counts derive from it.
    pub text: Option<String>,
    pub text_length: Option<usize>,
    pub font_size: Option<f32>,
    pub extent_emu: Option<i64>,
    /// Row heights in points; `null` for rows sized by their content.
    #[serde(default)]
    pub row_heights: Vec<Option<f32>>,
    pub num_id: Option<String>,
    #[serde(default)]
    pub level: u8,
}

impl ElementRecord {
    fn text_block(&self, counter: &SentenceCounter) -> TextBlock {
        match &self.text {
            Some(text) => counter.text_block(text, self.font_size),
            None => TextBlock {
                text_length: self.text_length.unwrap_or(0),
                font_size: self.font_size,
                ..Default::default()
            },
        }
    }

    pub fn to_element(&self, index: usize, counter: &SentenceCounter) -> Result<Element, Error> {
        let element = match self.kind.as_str() {
            "paragraph" | "text_paragraph" | "text" => {
                Element::TextParagraph(self.text_block(counter))
            }
            "heading" => Element::Heading(self.text_block(counter)),
            "list_item" | "list" => Element::ListItem(
                self.text_block(counter),
                ListMembership {
                    num_id: self.num_id.clone(),
                    level: self.level,
                },
            ),
            "image" => Element::Image {
                extent_emu: self.extent_emu,
            },
            "table" => Element::Table {
                row_heights: self.row_heights.clone(),
            },
            "empty_paragraph" | "empty" => Element::EmptyParagraph {
                font_size: self.font_size,
            },
            other => {
                return Err(Error::UnrecognizedElement {
                    index,
                    kind: other.to_string(),
                });
            }
        };
        Ok(element)
    }
}
