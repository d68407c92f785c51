//! Word measurement and the process-wide metrics cache.
//!
//! Every distinct word is measured once per font configuration and the
//! result is memoized forever: for a fixed font and character size a word
//! always maps to the same pixel size, so the cache is append-only with
//! no eviction. The cache is an explicitly owned object shared between
//! layout engines behind a mutex rather than ambient global state, which
//! keeps tests isolated and multi-engine use straightforward.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// The distinguished single-space word.
///
/// It is never placed in a line box; its measured width defines the
/// inter-word spacing, so it is pre-seeded at cache construction time to
/// guarantee spacing has a defined width before any content is measured.
pub const SPACE: &str = " ";

/// Text-measurement backend interface.
///
/// Implementors report the bounding-box width and height of a string in
/// integer pixels at their configured font and character size. This is a
/// pure interface: a call must not leave observable state behind, and
/// callers may not rely on any backend state between calls.
pub trait TextMeasurer {
    /// Measure `text`, returning `(width, height)` in pixels.
    ///
    /// Any string is measurable; the empty string measures to `(0, 0)`
    /// or whatever minimal bounds the backend defines.
    fn measure(&self, text: &str) -> (u32, u32);
}

/// Fixed-ratio approximate measurement.
///
/// Without real font data, the average advance of Latin glyphs in a
/// proportional face is roughly 0.6x the character size, and a line is
/// roughly 1.2x. Used as a fallback when no font can be loaded, and in
/// tests.
#[derive(Debug, Clone, Copy)]
pub struct ApproximateTextMeasurer {
    /// Character size in pixels the ratios are applied to.
    pub char_size: f32,
}

impl TextMeasurer for ApproximateTextMeasurer {
    fn measure(&self, text: &str) -> (u32, u32) {
        const CHAR_WIDTH_RATIO: f32 = 0.6;
        const LINE_HEIGHT_RATIO: f32 = 1.2;

        let count = text.chars().count();
        if count == 0 {
            return (0, 0);
        }
        let width = count as f32 * self.char_size * CHAR_WIDTH_RATIO;
        (width as u32, (self.char_size * LINE_HEIGHT_RATIO) as u32)
    }
}

/// Memoized word sizes for one font configuration.
///
/// Keys are exact character sequences; a lookup hit performs zero backend
/// calls. Entries are only ever inserted, never rewritten, so sharing the
/// cache between engines needs nothing stronger than a single lock around
/// each lookup.
pub struct WordMetricsCache {
    measurer: Box<dyn TextMeasurer + Send>,
    sizes: HashMap<String, (u32, u32)>,
}

/// Handle to a cache shared by every layout engine in the process.
pub type SharedMetricsCache = Arc<Mutex<WordMetricsCache>>;

impl WordMetricsCache {
    /// Create a cache over `measurer`, pre-seeding the space word.
    #[must_use]
    pub fn new(measurer: Box<dyn TextMeasurer + Send>) -> Self {
        let mut cache = WordMetricsCache {
            measurer,
            sizes: HashMap::new(),
        };
        let _ = cache.measure(SPACE);
        cache
    }

    /// Wrap a fresh cache in the shared handle layout engines take.
    #[must_use]
    pub fn shared(measurer: Box<dyn TextMeasurer + Send>) -> SharedMetricsCache {
        Arc::new(Mutex::new(WordMetricsCache::new(measurer)))
    }

    /// Measure `word`, memoizing the backend's answer on first sight.
    ///
    /// `word` must not contain the ordinary space character, the one the
    /// engine splits on; the space word itself is the sanctioned
    /// exception. Other whitespace (non-breaking spaces in particular)
    /// is a word character and passes through untouched.
    pub fn measure(&mut self, word: &str) -> (u32, u32) {
        debug_assert!(
            word == SPACE || !word.contains(' '),
            "words must not contain the split character: {word:?}"
        );

        if let Some(&size) = self.sizes.get(word) {
            return size;
        }

        let size = self.measurer.measure(word);
        self.sizes.insert(word.to_string(), size);
        size
    }

    /// The memoized size of the space word (seeded at construction).
    #[must_use]
    pub fn space_size(&self) -> (u32, u32) {
        self.sizes[SPACE]
    }

    /// Number of distinct words measured so far (including the space).
    #[must_use]
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// Whether the cache holds no entries. Never true after construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Backend that counts how many times it is actually invoked.
    struct CountingMeasurer {
        calls: Arc<AtomicUsize>,
    }

    impl TextMeasurer for CountingMeasurer {
        fn measure(&self, text: &str) -> (u32, u32) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (text.chars().count() as u32 * 10, 16)
        }
    }

    #[test]
    fn space_is_seeded_at_construction() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = WordMetricsCache::new(Box::new(CountingMeasurer {
            calls: Arc::clone(&calls),
        }));

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.space_size(), (10, 16));
    }

    #[test]
    fn second_measurement_hits_the_cache() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut cache = WordMetricsCache::new(Box::new(CountingMeasurer {
            calls: Arc::clone(&calls),
        }));

        let first = cache.measure("hello");
        let backend_calls = calls.load(Ordering::SeqCst);
        let second = cache.measure("hello");

        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), backend_calls);
    }

    #[test]
    fn non_breaking_space_is_a_word_character() {
        let mut cache = WordMetricsCache::new(Box::new(ApproximateTextMeasurer {
            char_size: 14.0,
        }));
        // U+00A0 comes out of &nbsp; decoding and must measure like any
        // other three-character word.
        let size = cache.measure("a\u{00a0}b");
        assert_eq!(size, cache.measure("abc"));
    }

    #[test]
    fn empty_word_measures_to_zero() {
        let mut cache = WordMetricsCache::new(Box::new(ApproximateTextMeasurer {
            char_size: 14.0,
        }));
        assert_eq!(cache.measure(""), (0, 0));
    }
}
