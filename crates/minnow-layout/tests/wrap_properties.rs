//! Property tests for the greedy packer.

use minnow_dom::{AttributesMap, DomTree, ElementData, NodeType};
use minnow_layout::{Layout, TextMeasurer, WordMetricsCache};
use quickcheck_macros::quickcheck;

const CHAR_WIDTH: u32 = 7;
const WRAP_WIDTH: u32 = 100;

/// Every character is CHAR_WIDTH pixels wide; words up to 15 characters
/// long (max 105px) can individually overflow the 100px wrap width.
struct FixedCharMeasurer;

impl TextMeasurer for FixedCharMeasurer {
    fn measure(&self, text: &str) -> (u32, u32) {
        let count = text.chars().count() as u32;
        (count * CHAR_WIDTH, if count == 0 { 0 } else { 13 })
    }
}

fn words_to_text(lengths: &[u8]) -> String {
    lengths
        .iter()
        .map(|&l| "x".repeat(usize::from(l % 16)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn doc_from_text(text: &str) -> DomTree {
    let mut dom = DomTree::new();
    let body = dom.alloc(NodeType::Element(ElementData {
        tag_name: "body".to_string(),
        attrs: AttributesMap::new(),
    }));
    dom.append_child(dom.root(), body);
    let node = dom.alloc(NodeType::Text(text.to_string()));
    dom.append_child(body, node);
    dom
}

fn lay_out(text: &str, width: u32) -> Layout {
    let cache = WordMetricsCache::shared(Box::new(FixedCharMeasurer));
    let mut layout = Layout::new(cache);
    layout.set_width(width);
    layout.construct_from_document(&doc_from_text(text));
    layout
}

#[quickcheck]
fn no_box_exceeds_wrap_width_except_single_word_overflow(lengths: Vec<u8>) -> bool {
    let text = words_to_text(&lengths);
    let layout = lay_out(&text, WRAP_WIDTH);

    layout.boxes().iter().all(|b| {
        let lone_overwide_word = b.words().len() == 1
            && b.words()[0].chars().count() as u32 * CHAR_WIDTH > WRAP_WIDTH;
        b.width() <= WRAP_WIDTH || lone_overwide_word
    })
}

#[quickcheck]
fn concatenated_box_words_reproduce_the_source(lengths: Vec<u8>) -> bool {
    let text = words_to_text(&lengths);
    let layout = lay_out(&text, WRAP_WIDTH);

    let expected: Vec<&str> = text.split(' ').collect();
    let actual: Vec<&str> = layout
        .boxes()
        .iter()
        .flat_map(|b| b.words().iter().map(String::as_str))
        .collect();
    expected == actual
}

#[quickcheck]
fn box_count_is_monotone_in_wrap_width(lengths: Vec<u8>, w1: u8, w2: u8) -> bool {
    let text = words_to_text(&lengths);
    let narrow = u32::from(w1.min(w2));
    let wide = u32::from(w1.max(w2));

    let at_narrow = lay_out(&text, narrow).boxes().len();
    let at_wide = lay_out(&text, wide).boxes().len();
    at_narrow >= at_wide
}
