//! Straight connectors between consecutive shapes.
//!
//! A connector group joins the exit anchors of one shape to the entry
//! anchors of the next, pairing them by position. After the last shape an
//! optional terminal marker draws every exit anchor into a single point
//! followed by a double arrowhead.

use log::trace;
use thiserror::Error;

use crate::{
    color::Color,
    draw::{AnchorPoints, Canvas, Paint, RenderLayer, Shape, StrokeCap, StrokeDefinition},
    geometry::Point,
};

const TIP_DISTANCE: f32 = 15.0;
const HEAD_LENGTH: f32 = 8.0;
const HEAD_HALF_WIDTH: f32 = 6.0;

/// Errors raised while routing connectors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectorError {
    #[error(
        "cannot connect `{from_shape}` ({from_kind}, {from_count} exit anchors) to `{to_shape}` ({to_kind}, {to_count} entry anchors)"
    )]
    ArityMismatch {
        from_shape: String,
        from_kind: &'static str,
        from_count: usize,
        to_shape: String,
        to_kind: &'static str,
        to_count: usize,
    },

    #[error("shape `{name}` has not been drawn yet")]
    NotDrawn { name: String },

    #[error("shape `{name}` has no exit anchors to terminate")]
    NoExitAnchors { name: String },
}

/// Draws connector lines using a shared stroke.
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorRouter {
    stroke: StrokeDefinition,
}

impl ConnectorRouter {
    pub fn new(stroke: StrokeDefinition) -> Self {
        Self { stroke }
    }

    pub fn stroke(&self) -> &StrokeDefinition {
        &self.stroke
    }

    /// Connects every exit anchor of `a` to the entry anchor of `b` at the
    /// same position and returns the number of lines drawn.
    ///
    /// # Errors
    ///
    /// - [`ConnectorError::NotDrawn`] if either shape has no anchors yet.
    /// - [`ConnectorError::ArityMismatch`] if the anchor counts differ.
    ///   Nothing is drawn in that case.
    pub fn connect(
        &self,
        canvas: &mut Canvas,
        a: &Shape<'_>,
        b: &Shape<'_>,
    ) -> Result<usize, ConnectorError> {
        let from = drawn_anchors(a)?.from();
        let to = drawn_anchors(b)?.to();

        if from.len() != to.len() {
            return Err(ConnectorError::ArityMismatch {
                from_shape: a.name().to_string(),
                from_kind: a.kind_name(),
                from_count: from.len(),
                to_shape: b.name().to_string(),
                to_kind: b.kind_name(),
                to_count: to.len(),
            });
        }

        for (start, end) in from.iter().zip(to) {
            canvas.line(RenderLayer::Connector, *start, *end, self.stroke.clone());
        }

        trace!(from = a.name(), to = b.name(), lines = from.len(); "Connected shapes");
        Ok(from.len())
    }

    /// Draws the terminal marker after the last shape.
    ///
    /// Every exit anchor is joined to a tip placed past the rightmost anchor
    /// at their mean height; two chevrons follow the tip.
    ///
    /// # Errors
    ///
    /// - [`ConnectorError::NotDrawn`] if `last` has no anchors yet.
    /// - [`ConnectorError::NoExitAnchors`] if it has no exit anchors.
    pub fn terminate(&self, canvas: &mut Canvas, last: &Shape<'_>) -> Result<(), ConnectorError> {
        let from = drawn_anchors(last)?.from();
        let centroid = Point::centroid(from).ok_or_else(|| ConnectorError::NoExitAnchors {
            name: last.name().to_string(),
        })?;
        let max_x = from.iter().map(|p| p.x()).fold(f32::MIN, f32::max);
        let tip = Point::new(max_x + TIP_DISTANCE, centroid.y());

        for anchor in from {
            canvas.line(RenderLayer::Connector, *anchor, tip, self.stroke.clone());
        }

        let head_color = self.stroke.color();
        for i in 0..2 {
            let base_x = tip.x() + i as f32 * HEAD_LENGTH;
            canvas.polygon(
                RenderLayer::Connector,
                vec![
                    Point::new(base_x, tip.y() - HEAD_HALF_WIDTH),
                    Point::new(base_x + HEAD_LENGTH, tip.y()),
                    Point::new(base_x, tip.y() + HEAD_HALF_WIDTH),
                ],
                Paint::filled(head_color).with_outline(self.stroke.clone()),
            );
        }

        trace!(name = last.name(), tip_x = tip.x(), tip_y = tip.y(); "Terminal marker drawn");
        Ok(())
    }
}

impl Default for ConnectorRouter {
    fn default() -> Self {
        Self::new(StrokeDefinition::new(Color::default(), 1.0).with_cap(StrokeCap::Round))
    }
}

fn drawn_anchors<'s>(shape: &'s Shape<'_>) -> Result<&'s AnchorPoints, ConnectorError> {
    shape.anchors().ok_or_else(|| ConnectorError::NotDrawn {
        name: shape.name().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{
        draw::{
            ActivationDefinition, CANVAS_HEIGHT, DenseDefinition, GlyphDefinition, LabelMode,
            Primitive, RecurrentDefinition,
        },
        palette::Palette,
    };

    fn drawn<'a>(
        canvas: &mut Canvas,
        palette: &'a Palette,
        name: &str,
        definition: Box<dyn GlyphDefinition>,
        start_x: f32,
    ) -> Shape<'a> {
        let mut shape = Shape::new(name, definition, start_x, palette);
        shape.draw(canvas, LabelMode::None);
        shape
    }

    fn canvas() -> Canvas {
        Canvas::new(500.0, CANVAS_HEIGHT, Color::white())
    }

    #[test]
    fn test_connect_dense_to_activation() {
        let palette = Palette::default();
        let mut canvas = canvas();
        let dense = drawn(&mut canvas, &palette, "dense", Box::new(DenseDefinition::new()), 80.0);
        let act = drawn(
            &mut canvas,
            &palette,
            "relu",
            Box::new(ActivationDefinition::new()),
            160.0,
        );

        let lines = ConnectorRouter::default()
            .connect(&mut canvas, &dense, &act)
            .unwrap();

        assert_eq!(lines, 2);
        assert_eq!(canvas.primitives_on(RenderLayer::Connector).count(), 2);

        let first = canvas.primitives_on(RenderLayer::Connector).next();
        match first {
            Some(Primitive::Line { from, to, .. }) => {
                assert_eq!(*from, Point::new(140.0, 100.0));
                assert_eq!(*to, Point::new(170.0, 125.0));
            }
            other => panic!("Expected a line, got {other:?}"),
        }
    }

    #[test]
    fn test_connect_arity_mismatch() {
        let palette = Palette::default();
        let mut canvas = canvas();
        let dense = drawn(&mut canvas, &palette, "dense", Box::new(DenseDefinition::new()), 0.0);
        let lstm = drawn(
            &mut canvas,
            &palette,
            "lstm",
            Box::new(RecurrentDefinition::new(false)),
            80.0,
        );

        let err = ConnectorRouter::default()
            .connect(&mut canvas, &dense, &lstm)
            .unwrap_err();

        assert_eq!(
            err,
            ConnectorError::ArityMismatch {
                from_shape: "dense".to_string(),
                from_kind: "dense",
                from_count: 2,
                to_shape: "lstm".to_string(),
                to_kind: "recurrent",
                to_count: 3,
            }
        );
        assert_eq!(canvas.primitives_on(RenderLayer::Connector).count(), 0);
        assert!(err.to_string().contains("2 exit anchors"));
    }

    #[test]
    fn test_connect_requires_drawn_shapes() {
        let palette = Palette::default();
        let mut canvas = canvas();
        let dense = drawn(&mut canvas, &palette, "dense", Box::new(DenseDefinition::new()), 0.0);
        let pending = Shape::new("later", Box::new(DenseDefinition::new()), 80.0, &palette);

        let err = ConnectorRouter::default()
            .connect(&mut canvas, &dense, &pending)
            .unwrap_err();
        assert_eq!(
            err,
            ConnectorError::NotDrawn {
                name: "later".to_string()
            }
        );
    }

    #[test]
    fn test_terminate_draws_lines_and_double_arrowhead() {
        let palette = Palette::default();
        let mut canvas = canvas();
        let dense = drawn(&mut canvas, &palette, "dense", Box::new(DenseDefinition::new()), 0.0);

        ConnectorRouter::default()
            .terminate(&mut canvas, &dense)
            .unwrap();

        let connectors: Vec<_> = canvas.primitives_on(RenderLayer::Connector).collect();
        let lines = connectors
            .iter()
            .filter(|p| matches!(p, Primitive::Line { .. }))
            .count();
        let heads: Vec<_> = connectors
            .iter()
            .filter_map(|p| match p {
                Primitive::Polygon { points, .. } => Some(points.clone()),
                _ => None,
            })
            .collect();

        assert_eq!(lines, 2);
        assert_eq!(heads.len(), 2);
        // Exit anchors at x=60, y=100 and y=180
        assert_approx_eq!(f32, heads[0][0].x(), 75.0);
        assert_approx_eq!(f32, heads[0][1].y(), 140.0);
        assert_approx_eq!(f32, heads[1][1].x(), 91.0);
    }
}
