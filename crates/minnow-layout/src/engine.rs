//! The layout engine: tree walk, greedy packing, bounds, culling.

use crate::geometry::View;
use crate::line_box::LineBox;
use crate::metrics::{SPACE, SharedMetricsCache};
use minnow_dom::{DomTree, NodeId};

/// Vertical gap opened below a line when a paragraph boundary closes it.
pub const PARAGRAPH_BREAK_PADDING: u32 = 10;

/// Greedy single-column layout over a document tree.
///
/// The engine walks the document depth-first, splits text nodes into
/// words, measures each word through the shared metrics cache, and packs
/// words left-to-right into [`LineBox`]es no wider than the wrap width.
/// At most one box is open at any time; it is always the last one in the
/// list. A word that fails to fit closes the current box and opens a new
/// one at the cursor; a paragraph boundary additionally moves the cursor
/// down by [`PARAGRAPH_BREAK_PADDING`].
///
/// The engine keeps a copy of the document it laid out so [`Layout::update`]
/// can rebuild from scratch after a resize; there is no incremental
/// re-layout.
pub struct Layout {
    cursor_x: u32,
    cursor_y: u32,
    width: u32,
    boxes: Vec<LineBox>,
    is_last_box_finalized: bool,
    document: DomTree,
    view: View,
    cache: SharedMetricsCache,
}

impl Layout {
    /// Create an engine over a shared metrics cache.
    ///
    /// The wrap width starts at zero; call [`Layout::set_width`] before
    /// the first layout pass or every word lands on its own line.
    #[must_use]
    pub fn new(cache: SharedMetricsCache) -> Self {
        Layout {
            cursor_x: 0,
            cursor_y: 0,
            width: 0,
            boxes: Vec::new(),
            is_last_box_finalized: false,
            document: DomTree::new(),
            view: View::default(),
            cache,
        }
    }

    /// Run a full layout pass over `doc`.
    ///
    /// Clears all previous boxes, resets the cursor to the origin, stores
    /// a copy of the document for later [`Layout::update`] calls, and
    /// walks the tree.
    pub fn construct_from_document(&mut self, doc: &DomTree) {
        self.boxes.clear();
        self.cursor_x = 0;
        self.cursor_y = 0;
        self.is_last_box_finalized = false;
        self.document = doc.clone();

        self.process_node(doc, doc.root());
    }

    /// Depth-first, pre-order walk over `id`'s children.
    ///
    /// Text nodes feed their words to the packer. A paragraph node closes
    /// the current line and opens a vertical gap, but only once at least
    /// one box exists (a boundary at the very start of the document would
    /// otherwise produce a leading blank gap) - when no box exists yet it
    /// is treated like any other container. Everything else recurses.
    fn process_node(&mut self, doc: &DomTree, id: NodeId) {
        for &child in doc.children(id) {
            if let Some(text) = doc.as_text(child) {
                self.add_string(text);
            } else if doc.is_paragraph_node(child) && !self.boxes.is_empty() {
                self.break_paragraph();
            } else if !doc.children(child).is_empty() {
                self.process_node(doc, child);
            }
        }
    }

    /// Split a text run on the space character and place each token.
    ///
    /// Plain `split(' ')` is deliberate: leading, trailing, and
    /// consecutive spaces produce empty tokens, which are placed as
    /// zero-width words that still occupy a slot in their line. Word
    /// order across all boxes therefore reproduces the source text
    /// exactly.
    fn add_string(&mut self, text: &str) {
        for word in text.split(' ') {
            self.add_word(word);
        }
    }

    /// Place one word: extend the open box if there is one, else start a
    /// new box at the cursor.
    fn add_word(&mut self, word: &str) {
        let (word_width, word_height) = self.measure(word);

        if !self.boxes.is_empty() && !self.is_last_box_finalized {
            self.extend_current_box(word, word_width, word_height);
        } else {
            self.start_new_box(word, word_width, word_height);
        }
    }

    /// Try to append `word` to the open box.
    ///
    /// The word continues the line, so its advance is the space width
    /// plus its own width. The fit comparison is `<=`: a word that
    /// exactly fills the remaining width stays on the line. On overflow
    /// the box is closed without any vertical cursor movement (unlike a
    /// paragraph boundary) and the word seeds a fresh box at the cursor.
    fn extend_current_box(&mut self, word: &str, word_width: u32, word_height: u32) {
        let space_width = self.measure(SPACE).0;
        let advance = space_width + word_width;
        let current_width = self.boxes.last().map_or(0, LineBox::width);

        if self.fits_within_width(current_width + advance) {
            if let Some(current) = self.boxes.last_mut() {
                current.extend(word, advance, word_height);
            }
        } else {
            self.finalize_current_box();
            self.start_new_box(word, word_width, word_height);
        }
    }

    fn fits_within_width(&self, length: u32) -> bool {
        self.cursor_x + length <= self.width
    }

    /// Open a new box at the cursor seeded with `word`.
    ///
    /// A single word wider than the wrap width still lands here, alone on
    /// its own overflowing line; nothing is ever truncated or hyphenated.
    fn start_new_box(&mut self, word: &str, word_width: u32, word_height: u32) {
        let mut line = LineBox::new(self.cursor_x, self.cursor_y);
        line.extend(word, word_width, word_height);
        self.boxes.push(line);
        self.is_last_box_finalized = false;
    }

    /// Close the open box to further appends. Width overflow path: the
    /// cursor does not move.
    fn finalize_current_box(&mut self) {
        self.is_last_box_finalized = true;
    }

    /// Close the open box and move the cursor down by the paragraph gap.
    fn break_paragraph(&mut self) {
        self.is_last_box_finalized = true;
        self.cursor_y += PARAGRAPH_BREAK_PADDING;
    }

    /// Measure a word through the shared cache.
    ///
    /// Mutex poisoning aborts the pass; a poisoned cache means another
    /// engine panicked mid-measurement and no further layout is sound.
    fn measure(&self, word: &str) -> (u32, u32) {
        self.cache.lock().unwrap().measure(word)
    }

    /// Rebuild the layout from the stored document, then recompute every
    /// box's visibility against the current view.
    ///
    /// A box is visible when its rectangle intersects the view bounds;
    /// edge contact counts as intersecting.
    pub fn update(&mut self) {
        let doc = self.document.clone();
        self.construct_from_document(&doc);

        let viewport = self.view.bounds();
        for line in &mut self.boxes {
            let visible = viewport.intersects(&line.bounds());
            line.set_visible(visible);
        }
    }

    /// All line boxes produced so far, in top-to-bottom order.
    #[must_use]
    pub fn boxes(&self) -> &[LineBox] {
        &self.boxes
    }

    /// Widest line, or `None` before any layout pass has produced boxes.
    #[must_use]
    pub fn max_width(&self) -> Option<u32> {
        self.boxes.iter().map(LineBox::width).max()
    }

    /// Overall content extent: the y of the box reaching furthest down
    /// plus the height of the tallest box.
    ///
    /// Those may be two different boxes; the sum is a bounding estimate
    /// of the content height, not any single box's extent, and is kept
    /// as-is for compatibility with existing consumers. Ties resolve to
    /// the first qualifying box. `None` before any boxes exist.
    #[must_use]
    pub fn max_height(&self) -> Option<u32> {
        let anchor = first_max_by_key(&self.boxes, |b| b.origin().1 + b.height())?;
        let tallest = first_max_by_key(&self.boxes, LineBox::height)?;
        Some(anchor.origin().1 + tallest.height())
    }

    /// Change the wrap width used by subsequent layout passes. Existing
    /// boxes are not re-wrapped until the next pass.
    pub fn set_width(&mut self, new_width: u32) {
        self.width = new_width;
    }

    /// Replace the viewport used for culling on the next [`Layout::update`].
    pub fn set_view(&mut self, new_view: View) {
        self.view = new_view;
    }
}

/// First element attaining the maximum key, or `None` on an empty slice.
fn first_max_by_key<K: Ord>(
    boxes: &[LineBox],
    key: impl Fn(&LineBox) -> K,
) -> Option<&LineBox> {
    let mut iter = boxes.iter();
    let mut best = iter.next()?;
    let mut best_key = key(best);

    for line in iter {
        let candidate = key(line);
        if candidate > best_key {
            best = line;
            best_key = candidate;
        }
    }
    Some(best)
}
