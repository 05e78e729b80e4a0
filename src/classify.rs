//! Coarse block classification and grouping of adjacent blocks that read
//! as one unit (a heading and the paragraph under it, a heading and its list).

use std::ops::Range;

use regex::Regex;
use serde::Serialize;

use crate::config::ClassifierConfig;
use crate::error::Error;
use crate::model::{Element, TextBlock};

/// Counts sentences while ignoring periods that close known abbreviations.
pub struct SentenceCounter {
    abbreviation: Option<Regex>,
    sentence_end: Regex,
}

impl SentenceCounter {
    pub fn new(config: &ClassifierConfig) -> Result<Self, Error> {
        let abbreviation = if config.abbreviations.is_empty() {
            None
        } else {
            let alternatives: Vec<String> =
                config.abbreviations.iter().map(|a| regex::escape(a)).collect();
            Some(Regex::new(&format!(r"(?i)\b({})\.", alternatives.join("|")))?)
        };
        Ok(Self {
            abbreviation,
            sentence_end: Regex::new(r"[.!?]+(?:\s+[A-Z]|$)")?,
        })
    }

    pub fn count(&self, text: &str) -> usize {
        let masked = match &self.abbreviation {
            Some(re) => re.replace_all(text, "${1}<ABBREV>"),
            None => text.into(),
        };
        let count = self.sentence_end.find_iter(&masked).count();
        if count == 0 && !text.trim().is_empty() {
            1
        } else {
            count
        }
    }

    /// Measure a block of visible text.
    pub fn text_block(&self, text: &str, font_size: Option<f32>) -> TextBlock {
        TextBlock {
            text_length: text.chars().count(),
            font_size,
            word_count: text.split_whitespace().count(),
            sentence_count: self.count(text),
            all_caps: text.chars().any(char::is_alphabetic)
                && !text.chars().any(char::is_lowercase),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Heading,
    /// Body text long enough to stand on its own.
    Paragraph,
    List,
    Other,
}

pub fn block_kind(element: &Element, config: &ClassifierConfig) -> BlockKind {
    let substantial = |text: &TextBlock| {
        text.sentence_count >= config.min_sentences || text.word_count >= config.min_words
    };
    match element {
        Element::Heading(_) => BlockKind::Heading,
        Element::TextParagraph(text) | Element::ListItem(text, _) if substantial(text) => {
            BlockKind::Paragraph
        }
        Element::ListItem(..) => BlockKind::List,
        _ => BlockKind::Other,
    }
}

/// Uppercase share among the letters after the first word (the list
/// number), used to spot numbered section titles typed in capitals.
pub fn looks_like_numbered_heading(text: &str, config: &ClassifierConfig) -> bool {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() < 2 {
        return false;
    }
    let (upper, alpha) = words[1..]
        .iter()
        .flat_map(|w| w.chars())
        .filter(|c| c.is_alphabetic())
        .fold((0usize, 0usize), |(upper, alpha), c| {
            (upper + c.is_uppercase() as usize, alpha + 1)
        });
    alpha > 0 && upper as f32 / alpha as f32 > config.heading_uppercase_ratio
}

pub struct GroupPattern {
    pub name: &'static str,
    pub kinds: &'static [BlockKind],
}

pub const GROUP_PATTERNS: &[GroupPattern] = &[
    GroupPattern {
        name: "heading+paragraph",
        kinds: &[BlockKind::Heading, BlockKind::Paragraph],
    },
    GroupPattern {
        name: "paragraph",
        kinds: &[BlockKind::Paragraph],
    },
    GroupPattern {
        name: "heading+list",
        kinds: &[BlockKind::Heading, BlockKind::List],
    },
];

#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    pub pattern: &'static str,
    pub indices: Range<usize>,
}

/// Slide a window over the block kinds, longest window first at each
/// position, and record every window that exactly matches a pattern.
/// Windows may overlap: a heading+paragraph group also yields the
/// paragraph group one position later.
pub fn extract_groups(kinds: &[BlockKind]) -> Vec<Group> {
    let longest = GROUP_PATTERNS.iter().map(|p| p.kinds.len()).max().unwrap_or(0);
    let mut groups = Vec::new();
    for start in 0..kinds.len() {
        for len in (1..=longest).rev() {
            let Some(window) = kinds.get(start..start + len) else {
                continue;
            };
            if let Some(pattern) = GROUP_PATTERNS.iter().find(|p| p.kinds == window) {
                groups.push(Group {
                    pattern: pattern.name,
                    indices: start..start + len,
                });
            }
        }
    }
    groups
}

/// A maximal run of adjacent list items sharing one numbering definition.
#[derive(Clone, Debug, PartialEq)]
pub struct ListRun {
    pub num_id: Option<String>,
    pub indices: Range<usize>,
    /// Items that close the list or one of its sublists (the next item sits
    /// at a shallower level). All-caps items read as titles and never close.
    pub level_ends: Vec<usize>,
}

impl ListRun {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Index of the item that closes the list.
    pub fn last(&self) -> usize {
        self.indices.end - 1
    }
}

fn list_level(element: &Element) -> u8 {
    element.list().map_or(0, |l| l.level)
}

pub fn list_runs(elements: &[Element]) -> Vec<ListRun> {
    let mut runs: Vec<ListRun> = Vec::new();
    for (index, element) in elements.iter().enumerate() {
        let Some(list) = element.list() else {
            continue;
        };
        match runs.last_mut() {
            Some(run) if run.indices.end == index && run.num_id == list.num_id => {
                run.indices.end = index + 1;
            }
            _ => runs.push(ListRun {
                num_id: list.num_id.clone(),
                indices: index..index + 1,
                level_ends: Vec::new(),
            }),
        }
    }

    for run in &mut runs {
        let last = run.last();
        run.level_ends = run
            .indices
            .clone()
            .filter(|&i| !elements[i].text().is_some_and(|t| t.all_caps))
            .filter(|&i| i == last || list_level(&elements[i + 1]) < list_level(&elements[i]))
            .collect();
    }
    runs
}
