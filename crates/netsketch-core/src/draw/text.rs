//! Text style for layer labels.
//!
//! Labels are positioned at fixed offsets below each glyph, so no text
//! measurement happens here; a [`TextDefinition`] only carries what the SVG
//! `<text>` element needs.

use crate::color::Color;

/// Defines the visual style for label text.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Font family | `"monospace"` |
/// | Font size | `10` |
/// | Text color | `None` (SVG default, typically black) |
///
/// # Examples
///
/// ```
/// # use netsketch_core::draw::TextDefinition;
/// # use netsketch_core::color::Color;
/// let mut style = TextDefinition::new();
/// style.set_font_family("Helvetica");
/// style.set_font_size(12);
/// style.set_color(Some(Color::new("navy").unwrap()));
/// assert_eq!(style.font_size(), 12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TextDefinition {
    font_family: String,
    font_size: u16,
    color: Option<Color>,
}

impl TextDefinition {
    /// Creates a new text definition with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the font size in points.
    pub fn set_font_size(&mut self, size: u16) {
        self.font_size = size;
    }

    /// Sets the font family (e.g., "Arial", "monospace").
    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    /// Sets the text color. `None` leaves the SVG default (black).
    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn color(&self) -> Option<&Color> {
        self.color.as_ref()
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: "monospace".to_string(),
            font_size: 10,
            color: None,
        }
    }
}
