//! Text measurement backed by fontdue glyph metrics.

use fontdue::{Font, FontSettings};
use minnow_layout::TextMeasurer;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Why a font could not be turned into a measurer.
///
/// A failed load is fatal for the engine instance that needed it: all
/// measurement depends on the font, so the caller must not proceed to
/// lay anything out. Loads are never retried.
#[derive(Debug, Error)]
pub enum FontError {
    /// The font file could not be read.
    #[error("failed to read font file '{path}': {source}")]
    Io {
        /// Path that was attempted.
        path: String,
        /// Underlying filesystem error.
        #[source]
        source: std::io::Error,
    },
    /// The file was read but is not a usable font face.
    #[error("failed to parse font '{path}': {reason}")]
    Parse {
        /// Path that was attempted.
        path: String,
        /// fontdue's parse failure message.
        reason: &'static str,
    },
}

/// [`TextMeasurer`] over a loaded font face at a fixed character size.
///
/// Width is the sum of per-glyph advance widths, matching how a renderer
/// would advance a cursor while drawing the same string; height is the
/// tallest glyph bitmap in the string. Both are truncated to whole
/// pixels. `Font::metrics` is used rather than `Font::rasterize` so no
/// bitmaps are generated just to measure.
pub struct FontTextMeasurer {
    font: Font,
    char_size: f32,
}

impl FontTextMeasurer {
    /// Load the font at `path` and measure at `char_size` pixels.
    ///
    /// # Errors
    /// Returns a [`FontError`] if the file cannot be read or parsed.
    pub fn from_path(path: &Path, char_size: f32) -> Result<Self, FontError> {
        let bytes = fs::read(path).map_err(|source| FontError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let font =
            Font::from_bytes(bytes, FontSettings::default()).map_err(|reason| FontError::Parse {
                path: path.display().to_string(),
                reason,
            })?;
        Ok(FontTextMeasurer { font, char_size })
    }

    /// Wrap an already-loaded font.
    #[must_use]
    pub fn new(font: Font, char_size: f32) -> Self {
        FontTextMeasurer { font, char_size }
    }
}

impl TextMeasurer for FontTextMeasurer {
    fn measure(&self, text: &str) -> (u32, u32) {
        let mut width = 0.0f32;
        let mut height = 0usize;

        for ch in text.chars().filter(|c| !c.is_control()) {
            let metrics = self.font.metrics(ch, self.char_size);
            width += metrics.advance_width;
            height = height.max(metrics.height);
        }

        (width as u32, height as u32)
    }
}
