//! Strokes for glyph outlines, unit wiring and connectors.
//!
//! A [`StrokeDefinition`] maps onto the SVG `stroke*` attributes through
//! [`apply_stroke!`](crate::apply_stroke!):
//!
//! | Field | SVG attribute |
//! |-------|---------------|
//! | `color` | `stroke`, `stroke-opacity` |
//! | `width` | `stroke-width` |
//! | `style` | `stroke-dasharray` |
//! | `cap` | `stroke-linecap` |

use std::str::FromStr;

use crate::color::Color;

/// Line pattern.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeStyle {
    #[default]
    Solid,
    /// 5px dash, 5px gap. Dropped dropout units use it.
    Dashed,
    /// 2px dot, 3px gap.
    Dotted,
}

impl FromStr for StrokeStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solid" => Ok(Self::Solid),
            "dashed" => Ok(Self::Dashed),
            "dotted" => Ok(Self::Dotted),
            _ => Err(format!(
                "invalid stroke style `{s}`, valid values: solid, dashed, dotted"
            )),
        }
    }
}

impl StrokeStyle {
    /// The `stroke-dasharray` value; `None` for solid lines.
    pub fn dasharray(self) -> Option<&'static str> {
        match self {
            Self::Solid => None,
            Self::Dashed => Some("5,5"),
            Self::Dotted => Some("2,3"),
        }
    }
}

/// Line endings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeCap {
    #[default]
    Butt,
    /// Connectors use round caps so joined segments meet cleanly.
    Round,
}

impl StrokeCap {
    pub fn linecap(self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
        }
    }
}

/// Color, width, pattern and cap of a line.
///
/// ```
/// use netsketch_core::{color::Color, draw::{StrokeCap, StrokeDefinition, StrokeStyle}};
///
/// let wire = StrokeDefinition::default();
/// assert_eq!(wire.width(), 1.0);
///
/// let connector = StrokeDefinition::new(Color::default(), 1.0)
///     .with_style("dotted".parse().unwrap())
///     .with_cap(StrokeCap::Round);
/// assert_eq!(connector.style(), StrokeStyle::Dotted);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    style: StrokeStyle,
    cap: StrokeCap,
}

impl StrokeDefinition {
    /// A solid, butt-capped stroke.
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            style: StrokeStyle::Solid,
            cap: StrokeCap::Butt,
        }
    }

    pub fn dashed(color: Color, width: f32) -> Self {
        Self::new(color, width).with_style(StrokeStyle::Dashed)
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    pub fn cap(&self) -> StrokeCap {
        self.cap
    }

    pub fn with_style(mut self, style: StrokeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_cap(mut self, cap: StrokeCap) -> Self {
        self.cap = cap;
        self
    }
}

/// Black, 1px, solid.
impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::new(Color::default(), 1.0)
    }
}

/// Sets the `stroke*` attributes of an SVG element from a [`StrokeDefinition`].
///
/// ```
/// use netsketch_core::draw::StrokeDefinition;
/// use svg::node::element as svg_element;
///
/// let line = svg_element::Line::new().set("x1", 0).set("x2", 40);
/// let line = netsketch_core::apply_stroke!(line, &StrokeDefinition::default());
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let stroke = $stroke;
        let mut elem = $element
            .set("stroke", stroke.color().to_string())
            .set("stroke-opacity", stroke.color().alpha())
            .set("stroke-width", stroke.width())
            .set("stroke-linecap", stroke.cap().linecap());

        if let Some(dasharray) = stroke.style().dasharray() {
            elem = elem.set("stroke-dasharray", dasharray);
        }

        elem
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_black_hairline() {
        let stroke = StrokeDefinition::default();
        assert_eq!(stroke.width(), 1.0);
        assert_eq!(stroke.color().to_string(), "black");
        assert_eq!(stroke.style(), StrokeStyle::Solid);
        assert_eq!(stroke.cap(), StrokeCap::Butt);
    }

    #[test]
    fn test_dashed() {
        let stroke = StrokeDefinition::dashed(Color::new("red").unwrap(), 1.5);
        assert_eq!(stroke.style(), StrokeStyle::Dashed);
        assert_eq!(stroke.style().dasharray(), Some("5,5"));
        assert_eq!(stroke.width(), 1.5);
    }

    #[test]
    fn test_style_from_str() {
        assert_eq!("solid".parse::<StrokeStyle>(), Ok(StrokeStyle::Solid));
        assert_eq!("dotted".parse::<StrokeStyle>(), Ok(StrokeStyle::Dotted));
        let err = "wavy".parse::<StrokeStyle>().unwrap_err();
        assert!(err.contains("invalid stroke style"));
    }

    #[test]
    fn test_round_cap() {
        let stroke = StrokeDefinition::default().with_cap(StrokeCap::Round);
        assert_eq!(stroke.cap().linecap(), "round");
        assert_eq!(StrokeStyle::Solid.dasharray(), None);
    }
}
