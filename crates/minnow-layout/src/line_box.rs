//! Line boxes: one visually wrapped line of words.

use crate::geometry::Rect;
use serde::Serialize;

/// One laid-out line.
///
/// A line box is created at a fixed origin, accumulates words while it is
/// the engine's current line, and becomes immutable the instant a later
/// word fails to fit or a paragraph boundary closes it (the engine then
/// opens a new box; nothing ever appends to a closed one). Width grows by
/// the advance of each appended word, height is the tallest word seen so
/// far, and the word list preserves reading order.
///
/// The box enforces no width limit itself; deciding whether a word fits
/// is entirely the layout engine's job.
#[derive(Debug, Clone, Serialize)]
pub struct LineBox {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    words: Vec<String>,
    visible: bool,
}

impl LineBox {
    /// Create an empty line box at a fixed origin.
    #[must_use]
    pub fn new(x: u32, y: u32) -> Self {
        LineBox {
            x,
            y,
            width: 0,
            height: 0,
            words: Vec::new(),
            visible: false,
        }
    }

    /// Append a word.
    ///
    /// `advance` is the horizontal space the word consumes: its bare
    /// measured width for the first word on the line, or the space width
    /// plus its measured width when it continues an existing line. The
    /// caller has already validated the fit.
    pub fn extend(&mut self, word: &str, advance: u32, height: u32) {
        self.words.push(word.to_string());
        self.width += advance;
        self.height = self.height.max(height);
    }

    /// Accumulated width in pixels, inter-word spacing included.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the tallest word on this line.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Top-left origin in document pixel space.
    #[must_use]
    pub fn origin(&self) -> (u32, u32) {
        (self.x, self.y)
    }

    /// Words on this line, insertion order = reading order.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Whether the last culling pass found this line inside the viewport.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Set the visibility flag. Only the engine's culling pass calls this.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// The rectangle this line occupies, for culling.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect {
            x: self.x as f32,
            y: self.y as f32,
            width: self.width as f32,
            height: self.height as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extend_accumulates_width_and_max_height() {
        let mut line = LineBox::new(0, 20);
        line.extend("Hello", 40, 12);
        line.extend("World", 50, 9);

        assert_eq!(line.width(), 90);
        assert_eq!(line.height(), 12);
        assert_eq!(line.origin(), (0, 20));
        assert_eq!(line.words(), ["Hello", "World"]);
    }

    #[test]
    fn zero_width_word_still_occupies_a_slot() {
        let mut line = LineBox::new(0, 0);
        line.extend("a", 10, 16);
        line.extend("", 10, 0);

        assert_eq!(line.words(), ["a", ""]);
        assert_eq!(line.width(), 20);
        assert_eq!(line.height(), 16);
    }

    #[test]
    fn bounds_mirror_origin_and_size() {
        let mut line = LineBox::new(3, 7);
        line.extend("x", 11, 5);

        let b = line.bounds();
        assert_eq!((b.x, b.y, b.width, b.height), (3.0, 7.0, 11.0, 5.0));
    }
}
