//! The recording drawing surface.
//!
//! A [`Canvas`] has a fixed size and background and records every drawing
//! call as a [`Primitive`] on a [`RenderLayer`]. Two canvases built from
//! the same calls compare equal. Export turns the recording into an SVG
//! document; rasterization happens downstream.
//!
//! # Example
//!
//! ```
//! # use netsketch_core::color::Color;
//! # use netsketch_core::draw::{Canvas, Paint, RenderLayer, StrokeDefinition};
//! # use netsketch_core::geometry::{Bounds, Point};
//! let mut canvas = Canvas::new(200.0, 320.0, Color::white());
//! canvas.rectangle(
//!     RenderLayer::Glyph,
//!     Bounds::from_corners(Point::new(20.0, 40.0), Point::new(40.0, 60.0)),
//!     Paint::filled(Color::new("#98c1d9").unwrap()),
//! );
//! canvas.line(
//!     RenderLayer::Connector,
//!     Point::new(40.0, 50.0),
//!     Point::new(100.0, 50.0),
//!     StrokeDefinition::default(),
//! );
//!
//! assert_eq!(canvas.primitives_on(RenderLayer::Connector).count(), 1);
//! assert!(canvas.to_svg_string().contains("<line"));
//! ```

use svg::{Document, node::Text as SvgText, node::element as svg_element};

use crate::{
    color::Color,
    draw::{LayeredOutput, RenderLayer, StrokeDefinition, SvgNode, TextDefinition},
    geometry::{Bounds, Point, Size},
};

/// Fill and outline of a closed primitive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paint {
    fill: Option<Color>,
    outline: Option<StrokeDefinition>,
}

impl Paint {
    /// A fill with the default 1px black outline.
    pub fn filled(color: Color) -> Self {
        Self {
            fill: Some(color),
            outline: Some(StrokeDefinition::default()),
        }
    }

    /// An outline with no fill.
    pub fn outlined(stroke: StrokeDefinition) -> Self {
        Self {
            fill: None,
            outline: Some(stroke),
        }
    }

    /// Replaces the outline.
    pub fn with_outline(mut self, stroke: StrokeDefinition) -> Self {
        self.outline = Some(stroke);
        self
    }

    /// Removes the outline.
    pub fn without_outline(mut self) -> Self {
        self.outline = None;
        self
    }

    pub fn fill(&self) -> Option<Color> {
        self.fill
    }

    pub fn outline(&self) -> Option<&StrokeDefinition> {
        self.outline.as_ref()
    }
}

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line {
        from: Point,
        to: Point,
        stroke: StrokeDefinition,
    },
    Rectangle {
        bounds: Bounds,
        radius: f32,
        paint: Paint,
    },
    Ellipse {
        bounds: Bounds,
        paint: Paint,
    },
    Polygon {
        points: Vec<Point>,
        paint: Paint,
    },
    Text {
        position: Point,
        content: String,
        style: TextDefinition,
    },
}

macro_rules! apply_paint {
    ($element:expr, $paint:expr) => {{
        let mut elem = match $paint.fill() {
            Some(fill) => $element
                .set("fill", fill.to_string())
                .set("fill-opacity", fill.alpha()),
            None => $element.set("fill", "none"),
        };

        if let Some(outline) = $paint.outline() {
            elem = crate::apply_stroke!(elem, outline);
        }

        elem
    }};
}

impl Primitive {
    /// Converts this primitive into an SVG node.
    pub fn to_svg_node(&self) -> SvgNode {
        match self {
            Self::Line { from, to, stroke } => {
                let line = svg_element::Line::new()
                    .set("x1", from.x())
                    .set("y1", from.y())
                    .set("x2", to.x())
                    .set("y2", to.y());
                Box::new(crate::apply_stroke!(line, stroke))
            }
            Self::Rectangle {
                bounds,
                radius,
                paint,
            } => {
                let mut rect = svg_element::Rectangle::new()
                    .set("x", bounds.min_x())
                    .set("y", bounds.min_y())
                    .set("width", bounds.width())
                    .set("height", bounds.height());
                if *radius > 0.0 {
                    rect = rect.set("rx", *radius);
                }
                Box::new(apply_paint!(rect, paint))
            }
            Self::Ellipse { bounds, paint } => {
                let center = bounds.center();
                let ellipse = svg_element::Ellipse::new()
                    .set("cx", center.x())
                    .set("cy", center.y())
                    .set("rx", bounds.width() / 2.0)
                    .set("ry", bounds.height() / 2.0);
                Box::new(apply_paint!(ellipse, paint))
            }
            Self::Polygon { points, paint } => {
                let points = points
                    .iter()
                    .map(|point| format!("{},{}", point.x(), point.y()))
                    .collect::<Vec<_>>()
                    .join(" ");
                let polygon = svg_element::Polygon::new().set("points", points);
                Box::new(apply_paint!(polygon, paint))
            }
            Self::Text {
                position,
                content,
                style,
            } => {
                let mut text = svg_element::Text::new("")
                    .set("x", position.x())
                    .set("y", position.y())
                    .set("dominant-baseline", "hanging")
                    .set("font-family", style.font_family())
                    .set("font-size", style.font_size());

                if let Some(color) = style.color() {
                    text = text
                        .set("fill", color.to_string())
                        .set("fill-opacity", color.alpha());
                }

                Box::new(text.add(SvgText::new(content.as_str())))
            }
        }
    }
}

/// A fixed-size drawing surface that records primitives by layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    size: Size,
    background: Color,
    items: Vec<(RenderLayer, Primitive)>,
}

impl Canvas {
    /// Creates an empty canvas of the given dimensions.
    pub fn new(width: f32, height: f32, background: Color) -> Self {
        Self {
            size: Size::new(width, height),
            background,
            items: Vec::new(),
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> f32 {
        self.size.width()
    }

    pub fn height(&self) -> f32 {
        self.size.height()
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Records a primitive on `layer`.
    pub fn draw(&mut self, layer: RenderLayer, primitive: Primitive) {
        self.items.push((layer, primitive));
    }

    pub fn line(&mut self, layer: RenderLayer, from: Point, to: Point, stroke: StrokeDefinition) {
        self.draw(layer, Primitive::Line { from, to, stroke });
    }

    pub fn rectangle(&mut self, layer: RenderLayer, bounds: Bounds, paint: Paint) {
        self.rounded_rectangle(layer, bounds, 0.0, paint);
    }

    pub fn rounded_rectangle(
        &mut self,
        layer: RenderLayer,
        bounds: Bounds,
        radius: f32,
        paint: Paint,
    ) {
        self.draw(
            layer,
            Primitive::Rectangle {
                bounds,
                radius,
                paint,
            },
        );
    }

    /// Records an ellipse inscribed in `bounds`.
    pub fn ellipse(&mut self, layer: RenderLayer, bounds: Bounds, paint: Paint) {
        self.draw(layer, Primitive::Ellipse { bounds, paint });
    }

    pub fn polygon(&mut self, layer: RenderLayer, points: Vec<Point>, paint: Paint) {
        self.draw(layer, Primitive::Polygon { points, paint });
    }

    /// Records a single line of text whose top-left corner is `position`.
    /// Text always lands on [`RenderLayer::Text`].
    pub fn text(&mut self, position: Point, content: impl Into<String>, style: &TextDefinition) {
        self.draw(
            RenderLayer::Text,
            Primitive::Text {
                position,
                content: content.into(),
                style: style.clone(),
            },
        );
    }

    /// Returns every recorded primitive in drawing order.
    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        self.items.iter().map(|(_, primitive)| primitive)
    }

    /// Returns the primitives recorded on `layer`, in drawing order.
    pub fn primitives_on(&self, layer: RenderLayer) -> impl Iterator<Item = &Primitive> {
        self.items
            .iter()
            .filter(move |(item_layer, _)| *item_layer == layer)
            .map(|(_, primitive)| primitive)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Collects the background and all primitives into layered SVG nodes.
    pub fn to_layered_output(&self) -> LayeredOutput {
        let mut output = LayeredOutput::new();

        let background = svg_element::Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", self.width())
            .set("height", self.height())
            .set("fill", self.background.to_string())
            .set("fill-opacity", self.background.alpha());
        output.add_to_layer(RenderLayer::Background, Box::new(background));

        for (layer, primitive) in &self.items {
            output.add_to_layer(*layer, primitive.to_svg_node());
        }

        output
    }

    /// Builds an SVG document with the exact canvas dimensions.
    pub fn to_svg_document(&self) -> Document {
        let mut doc = Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", self.width(), self.height()),
            )
            .set("width", self.width())
            .set("height", self.height());

        for node in self.to_layered_output().render() {
            doc = doc.add(node);
        }

        doc
    }

    /// Serializes the canvas as SVG text.
    pub fn to_svg_string(&self) -> String {
        self.to_svg_document().to_string()
    }
}
