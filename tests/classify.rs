use std::ops::Range;

use docx_paginate::{
    BlockKind, ClassifierConfig, Element, ListMembership, SentenceCounter, TextBlock, block_kind,
    extract_groups, list_runs, looks_like_numbered_heading,
};

fn counter() -> SentenceCounter {
    SentenceCounter::new(&ClassifierConfig::default()).unwrap()
}

#[test]
fn counts_terminated_sentences() {
    let c = counter();
    assert_eq!(c.count("One. Two! Three?"), 3);
    assert_eq!(c.count("no terminator here"), 1);
    assert_eq!(c.count("   "), 0);
    assert_eq!(c.count(""), 0);
}

#[test]
fn abbreviations_do_not_end_sentences() {
    let c = counter();
    assert_eq!(c.count("Signed by Dr. Smith at PT. Maju Jaya."), 1);
    assert_eq!(c.count("See No. 5 on Jl. Merdeka. Then Turn left."), 2);
}

#[test]
fn lowercase_continuation_is_not_a_new_sentence() {
    assert_eq!(counter().count("version 1.2 is out. more soon"), 1);
}

#[test]
fn text_block_measures_text() {
    let block = counter().text_block("GENERAL TERMS. Second part here.", Some(12.0));
    assert_eq!(block.text_length, 32);
    assert_eq!(block.word_count, 5);
    assert_eq!(block.sentence_count, 2);
    assert!(!block.all_caps);
    assert!(counter().text_block("ANNEX 1", None).all_caps);
    assert!(!counter().text_block("2024", None).all_caps);
}

#[test]
fn numbered_heading_detection() {
    let config = ClassifierConfig::default();
    assert!(looks_like_numbered_heading("1. GENERAL PROVISIONS", &config));
    assert!(!looks_like_numbered_heading("1. General provisions", &config));
    assert!(!looks_like_numbered_heading("INTRODUCTION", &config));
}

#[test]
fn block_kinds_follow_text_criteria() {
    let config = ClassifierConfig::default();
    let c = counter();
    let long = c.text_block("First sentence here. Second sentence here.", None);
    let short = c.text_block("A short line", None);
    let list = ListMembership::default();

    let kind = |e: Element| block_kind(&e, &config);
    assert_eq!(kind(Element::TextParagraph(long.clone())), BlockKind::Paragraph);
    assert_eq!(kind(Element::TextParagraph(short.clone())), BlockKind::Other);
    assert_eq!(kind(Element::ListItem(short, list.clone())), BlockKind::List);
    assert_eq!(kind(Element::ListItem(long, list)), BlockKind::Paragraph);
    assert_eq!(kind(Element::Table { row_heights: vec![] }), BlockKind::Other);
}

#[test]
fn groups_may_overlap() {
    use BlockKind::*;
    let groups = extract_groups(&[Heading, Paragraph, Other, Heading, List, Paragraph]);
    let found: Vec<(&str, Range<usize>)> =
        groups.into_iter().map(|g| (g.pattern, g.indices)).collect();
    assert_eq!(
        found,
        vec![
            ("heading+paragraph", 0..2),
            ("paragraph", 1..2),
            ("heading+list", 3..5),
            ("paragraph", 5..6),
        ]
    );
}

fn item(num: &str, level: u8) -> Element {
    Element::ListItem(
        TextBlock::default(),
        ListMembership {
            num_id: Some(num.to_string()),
            level,
        },
    )
}

#[test]
fn list_runs_split_on_numbering_and_gaps() {
    let elements = vec![
        item("1", 0),
        item("1", 0),
        item("2", 0),
        Element::EmptyParagraph { font_size: None },
        item("2", 0),
    ];
    let runs = list_runs(&elements);
    assert_eq!(runs.len(), 3);
    assert_eq!(runs[0].indices, 0..2);
    assert_eq!(runs[0].last(), 1);
    assert_eq!(runs[0].level_ends, vec![1]);
    assert_eq!(runs[1].indices, 2..3);
    assert_eq!(runs[2].indices, 4..5);
}

#[test]
fn sublists_close_when_the_level_rises() {
    let elements = vec![
        item("7", 0),
        item("7", 1),
        item("7", 2),
        item("7", 1),
        item("7", 0),
        item("7", 1),
    ];
    let runs = list_runs(&elements);
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].len(), 6);
    assert_eq!(runs[0].level_ends, vec![2, 3, 5]);
}

#[test]
fn all_caps_items_never_close_a_list() {
    let shouting = Element::ListItem(
        counter().text_block("SCHEDULE A", None),
        ListMembership {
            num_id: Some("3".into()),
            level: 0,
        },
    );
    let runs = list_runs(&[item("3", 0), shouting]);
    assert_eq!(runs[0].len(), 2);
    assert!(runs[0].level_ends.is_empty());
}
