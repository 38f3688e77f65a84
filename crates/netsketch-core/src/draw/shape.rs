//! Layer glyphs and the [`Shape`] wrapper that places them.
//!
//! Each layer kind has a [`GlyphDefinition`] that knows how to draw itself
//! at a horizontal cursor inside the vertical band `[BAND_TOP, BAND_BOTTOM]`
//! and which anchor points it exposes for connectors. A [`Shape`] pairs one
//! definition with a name, the cursor it was placed at and the active
//! palette. Its extent (end of the glyph and its anchors) only exists once
//! [`Shape::draw`] has run.
//!
//! # Example
//!
//! ```
//! # use netsketch_core::color::Color;
//! # use netsketch_core::draw::{Canvas, DenseDefinition, LabelMode, Shape, CANVAS_HEIGHT};
//! # use netsketch_core::palette::Palette;
//! let palette = Palette::default();
//! let mut canvas = Canvas::new(200.0, CANVAS_HEIGHT, Color::white());
//!
//! let mut shape = Shape::new("dense", Box::new(DenseDefinition::new()), 80.0, &palette);
//! assert!(shape.anchors().is_none());
//!
//! let end_x = shape.draw(&mut canvas, LabelMode::Name);
//! assert_eq!(end_x, 160.0);
//! assert_eq!(shape.anchors().map(|a| a.to().len()), Some(2));
//! ```

use std::{fmt, str::FromStr};

use log::trace;
use serde::Deserialize;

use crate::{
    draw::{Canvas, TextDefinition},
    geometry::{Bounds, Point},
    palette::Palette,
};

mod activation;
mod dense;
mod dropout;
mod embedding;
mod flatten;
mod generic;
mod input;
mod normalization;
mod recurrent;
mod stack;

pub use activation::ActivationDefinition;
pub use dense::DenseDefinition;
pub use dropout::DropoutDefinition;
pub use embedding::EmbeddingDefinition;
pub use flatten::FlattenDefinition;
pub use generic::GenericDefinition;
pub use input::InputDefinition;
pub use normalization::NormalizationDefinition;
pub use recurrent::RecurrentDefinition;
pub use stack::{StackDefinition, StackKind};

/// Top of the vertical band every glyph is drawn in.
pub const BAND_TOP: f32 = 40.0;
/// Bottom of the vertical band every glyph is drawn in.
pub const BAND_BOTTOM: f32 = 240.0;
/// Fixed canvas height; the space below the band holds labels.
pub const CANVAS_HEIGHT: f32 = 320.0;

const LABEL_TOP: f32 = 258.0;
const LABEL_LINE_HEIGHT: f32 = 12.0;

/// What is printed under each glyph.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelMode {
    /// No text at all.
    #[default]
    None,
    /// The layer name.
    Name,
    /// The layer name followed by its property lines.
    Properties,
}

impl LabelMode {
    fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Name => "name",
            Self::Properties => "properties",
        }
    }
}

impl fmt::Display for LabelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LabelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "name" => Ok(Self::Name),
            "properties" => Ok(Self::Properties),
            _ => Err(format!(
                "invalid label mode `{s}`, valid values: none, name, properties"
            )),
        }
    }
}

/// Connection points of a drawn glyph.
///
/// `to` points sit on the leading (left) edge and receive connectors from the
/// previous shape; `from` points sit on the trailing (right) edge. Pairing
/// between consecutive shapes is positional.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorPoints {
    from: Vec<Point>,
    to: Vec<Point>,
}

impl AnchorPoints {
    pub fn new(from: Vec<Point>, to: Vec<Point>) -> Self {
        Self { from, to }
    }

    /// Exit points on the trailing edge.
    pub fn from(&self) -> &[Point] {
        &self.from
    }

    /// Entry points on the leading edge.
    pub fn to(&self) -> &[Point] {
        &self.to
    }
}

/// What a glyph reports after drawing itself.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphExtent {
    pub end_x: f32,
    pub anchors: AnchorPoints,
}

/// A per-kind glyph procedure.
///
/// Implementations are stateless with respect to placement: everything is
/// computed from `start_x`, the attributes captured at construction and the
/// palette. Drawing the same definition twice at the same cursor records the
/// same primitives.
pub trait GlyphDefinition: fmt::Debug + Send + Sync {
    /// Short name of the glyph, used in logs and error messages.
    fn kind_name(&self) -> &'static str;

    /// Draws the glyph with its leading edge at `start_x`.
    ///
    /// The returned `end_x` is always greater than `start_x`.
    fn render(&self, canvas: &mut Canvas, start_x: f32, palette: &Palette) -> GlyphExtent;

    /// Horizontal offset of the label column relative to `start_x`.
    fn label_offset(&self) -> f32 {
        0.0
    }
}

/// A glyph placed at a cursor position with a name and property lines.
#[derive(Debug)]
pub struct Shape<'a> {
    name: String,
    properties: Vec<String>,
    definition: Box<dyn GlyphDefinition>,
    start_x: f32,
    palette: &'a Palette,
    extent: Option<GlyphExtent>,
}

impl<'a> Shape<'a> {
    pub fn new(
        name: impl Into<String>,
        definition: Box<dyn GlyphDefinition>,
        start_x: f32,
        palette: &'a Palette,
    ) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
            definition,
            start_x,
            palette,
            extent: None,
        }
    }

    /// Sets the lines printed under the name in [`LabelMode::Properties`].
    pub fn with_properties(mut self, properties: Vec<String>) -> Self {
        self.properties = properties;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind_name(&self) -> &'static str {
        self.definition.kind_name()
    }

    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    pub fn start_x(&self) -> f32 {
        self.start_x
    }

    /// Right edge of the drawn glyph, `None` before [`Shape::draw`].
    pub fn end_x(&self) -> Option<f32> {
        self.extent.as_ref().map(|extent| extent.end_x)
    }

    /// Anchor points of the drawn glyph, `None` before [`Shape::draw`].
    pub fn anchors(&self) -> Option<&AnchorPoints> {
        self.extent.as_ref().map(|extent| &extent.anchors)
    }

    pub fn is_drawn(&self) -> bool {
        self.extent.is_some()
    }

    /// Draws the glyph and its labels, returning the new cursor.
    pub fn draw(&mut self, canvas: &mut Canvas, labels: LabelMode) -> f32 {
        let extent = self.definition.render(canvas, self.start_x, self.palette);

        trace!(
            name = self.name.as_str(),
            kind = self.definition.kind_name(),
            from_anchors = extent.anchors.from().len(),
            to_anchors = extent.anchors.to().len();
            "Glyph anchors computed"
        );

        self.draw_labels(canvas, labels);

        let end_x = extent.end_x;
        self.extent = Some(extent);
        end_x
    }

    fn draw_labels(&self, canvas: &mut Canvas, labels: LabelMode) {
        let lines: Vec<&str> = match labels {
            LabelMode::None => return,
            LabelMode::Name => vec![self.name.as_str()],
            LabelMode::Properties => std::iter::once(self.name.as_str())
                .chain(self.properties.iter().map(String::as_str))
                .collect(),
        };

        let style = TextDefinition::default();
        let x = self.start_x + self.definition.label_offset();
        for (i, line) in lines.into_iter().enumerate() {
            let y = LABEL_TOP + i as f32 * LABEL_LINE_HEIGHT;
            canvas.text(Point::new(x, y), line, &style);
        }
    }
}

/// Axis-aligned box between two corners given as raw coordinates.
fn corners(x0: f32, y0: f32, x1: f32, y1: f32) -> Bounds {
    Bounds::from_corners(Point::new(x0, y0), Point::new(x1, y1))
}

/// Bounding box of a circle.
fn circle(cx: f32, cy: f32, r: f32) -> Bounds {
    corners(cx - r, cy - r, cx + r, cy + r)
}

fn points(coords: &[(f32, f32)]) -> Vec<Point> {
    coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
}
