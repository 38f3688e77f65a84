//! Drawing primitives, glyphs and connectors.
//!
//! Everything a layer diagram is made of is recorded onto a [`Canvas`] as
//! [`Primitive`]s tagged with a [`RenderLayer`]. Glyphs implement
//! [`GlyphDefinition`] and are placed through the [`Shape`] wrapper, which
//! owns the horizontal cursor and the anchor points computed while drawing.
//! The [`ConnectorRouter`] joins consecutive shapes.
//!
//! # Layer-Based Rendering
//!
//! Primitives are grouped by [`RenderLayer`] when the canvas is turned into
//! an SVG document, so connectors always sit above glyphs and labels above
//! both, regardless of drawing order.

mod canvas;
mod connector;
mod layer;
mod shape;
mod stroke;
mod text;

pub use canvas::{Canvas, Paint, Primitive};
pub use connector::{ConnectorError, ConnectorRouter};
pub use layer::{LayeredOutput, RenderLayer, SvgNode};
pub use shape::{
    ActivationDefinition, AnchorPoints, DenseDefinition, DropoutDefinition,
    EmbeddingDefinition, FlattenDefinition, GenericDefinition, GlyphDefinition, GlyphExtent,
    InputDefinition, LabelMode, NormalizationDefinition, RecurrentDefinition, Shape,
    StackDefinition, StackKind, BAND_BOTTOM, BAND_TOP, CANVAS_HEIGHT,
};
pub use stroke::{StrokeCap, StrokeDefinition, StrokeStyle};
pub use text::TextDefinition;
