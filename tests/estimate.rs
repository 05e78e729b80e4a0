mod common;

use common::{approx, heading, image_pt, layout, list_item, paragraph, reference_a4, table, text};
use docx_paginate::{Element, HeightEstimator, LayoutConfig, TextBlock, resolve_geometry};

fn estimate_with(config: &LayoutConfig, element: &Element) -> f32 {
    let geometry = resolve_geometry(&reference_a4(), config);
    HeightEstimator::new(config, &geometry).estimate(element)
}

fn estimate(element: &Element) -> f32 {
    estimate_with(&layout(), element)
}

#[test]
fn long_paragraph_with_default_ratio() {
    // 447.85pt / (11pt * 0.6) = 67.86 chars per line -> 15 lines
    assert!(approx(estimate(&paragraph(1000)), 15.0 * 16.5 + 2.0, 1e-3));
}

#[test]
fn long_paragraph_with_six_point_characters() {
    let config = LayoutConfig {
        char_width_ratio: 6.0 / 11.0,
        ..LayoutConfig::default()
    };
    let geometry = resolve_geometry(&reference_a4(), &config);
    let estimator = HeightEstimator::new(&config, &geometry);
    assert!(approx(estimator.chars_per_line(Some(11.0)), 74.65, 0.05));
    assert_eq!(estimator.line_count(&text(1000)), 14);
    assert!(approx(estimator.estimate(&paragraph(1000)), 233.0, 1e-3));
}

#[test]
fn empty_text_is_still_one_line() {
    assert!(approx(estimate(&paragraph(0)), 18.5, 1e-4));
}

#[test]
fn bad_font_sizes_use_the_default() {
    let baseline = estimate(&paragraph(300));
    for font_size in [None, Some(-3.0), Some(0.0), Some(f32::NAN)] {
        let element = Element::TextParagraph(TextBlock {
            text_length: 300,
            font_size,
            ..Default::default()
        });
        assert_eq!(estimate(&element), baseline, "{font_size:?}");
    }
}

#[test]
fn larger_fonts_take_more_room() {
    let small = estimate(&paragraph(500));
    let large = estimate(&Element::TextParagraph(TextBlock {
        text_length: 500,
        font_size: Some(16.0),
        ..Default::default()
    }));
    assert!(large > small);
}

#[test]
fn headings_and_list_items_use_the_paragraph_formula() {
    let p = estimate(&paragraph(150));
    assert_eq!(estimate(&heading(150)), p);
    assert_eq!(estimate(&list_item(150, "1")), p);
}

#[test]
fn image_height_comes_from_its_extent() {
    assert!(approx(estimate(&image_pt(50)), 50.0, 1e-4));
    assert!(approx(estimate(&Element::Image { extent_emu: None }), 16.5, 1e-4));
    assert!(approx(estimate(&Element::Image { extent_emu: Some(0) }), 16.5, 1e-4));
    assert!(approx(estimate(&Element::Image { extent_emu: Some(-10) }), 16.5, 1e-4));
}

#[test]
fn table_height_sums_rows_plus_padding() {
    let element = table(&[Some(20.0), None, Some(30.0)]);
    assert!(approx(estimate(&element), 20.0 + 16.5 + 30.0 + 3.0 * 2.0, 1e-4));
}

#[test]
fn empty_table_is_one_line() {
    assert!(approx(estimate(&table(&[])), 16.5, 1e-4));
}

#[test]
fn empty_paragraph_is_one_line_of_its_font() {
    assert!(approx(estimate(&Element::EmptyParagraph { font_size: None }), 16.5, 1e-4));
    assert!(approx(estimate(&Element::EmptyParagraph { font_size: Some(20.0) }), 30.0, 1e-4));
}

#[test]
fn degenerate_tunables_still_give_positive_heights() {
    let config = LayoutConfig {
        line_spacing: 0.0,
        paragraph_padding: 0.0,
        table_row_padding: 0.0,
        ..LayoutConfig::default()
    };
    for element in [paragraph(10), table(&[]), Element::EmptyParagraph { font_size: None }] {
        assert!(estimate_with(&config, &element) > 0.0);
    }
}
