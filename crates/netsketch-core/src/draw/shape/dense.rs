use super::{AnchorPoints, GlyphDefinition, GlyphExtent, circle, corners, points};
use crate::{
    draw::{Canvas, Paint, RenderLayer, StrokeDefinition},
    geometry::Point,
    palette::Palette,
};

/// A rounded container holding three neurons, with two synapse ticks on
/// each side.
#[derive(Debug, Clone, Default)]
pub struct DenseDefinition;

impl DenseDefinition {
    pub fn new() -> Self {
        Self
    }
}

impl GlyphDefinition for DenseDefinition {
    fn kind_name(&self) -> &'static str {
        "dense"
    }

    fn render(&self, canvas: &mut Canvas, start_x: f32, palette: &Palette) -> GlyphExtent {
        let s = start_x;

        canvas.rounded_rectangle(
            RenderLayer::Glyph,
            corners(s + 10.0, 70.0, s + 50.0, 210.0),
            10.0,
            Paint::filled(palette.main()),
        );

        for cy in [100.0, 140.0, 180.0] {
            canvas.ellipse(
                RenderLayer::Glyph,
                circle(s + 30.0, cy, 14.0),
                Paint::filled(palette.secondary()),
            );
        }

        for (x0, x1) in [(s, s + 10.0), (s + 50.0, s + 60.0)] {
            for y in [100.0, 180.0] {
                canvas.line(
                    RenderLayer::Glyph,
                    Point::new(x0, y),
                    Point::new(x1, y),
                    StrokeDefinition::default(),
                );
            }
        }

        GlyphExtent {
            end_x: s + 80.0,
            anchors: AnchorPoints::new(
                points(&[(s + 60.0, 100.0), (s + 60.0, 180.0)]),
                points(&[(s, 100.0), (s, 180.0)]),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{
        color::Color,
        draw::{CANVAS_HEIGHT, Primitive},
    };

    #[test]
    fn test_dense_geometry() {
        let mut canvas = Canvas::new(200.0, CANVAS_HEIGHT, Color::white());
        let extent = DenseDefinition::new().render(&mut canvas, 80.0, &Palette::default());

        assert_approx_eq!(f32, extent.end_x, 160.0);
        let ellipses = canvas
            .primitives()
            .filter(|p| matches!(p, Primitive::Ellipse { .. }))
            .count();
        let ticks = canvas
            .primitives()
            .filter(|p| matches!(p, Primitive::Line { .. }))
            .count();
        assert_eq!(ellipses, 3);
        assert_eq!(ticks, 4);
        assert_eq!(extent.anchors.to(), &[Point::new(80.0, 100.0), Point::new(80.0, 180.0)]);
        assert_eq!(
            extent.anchors.from(),
            &[Point::new(140.0, 100.0), Point::new(140.0, 180.0)]
        );
    }
}
