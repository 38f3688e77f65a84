use super::{AnchorPoints, GlyphDefinition, GlyphExtent, corners, points};
use crate::{
    color::Color,
    draw::{Canvas, Paint, RenderLayer, StrokeDefinition},
    geometry::Point,
    palette::Palette,
};

/// A folded tape: front face, slanted cap and side fold, with a direction
/// arrow on the face. Bidirectional layers get a second, opposing arrow.
#[derive(Debug, Clone, Default)]
pub struct RecurrentDefinition {
    bidirectional: bool,
}

impl RecurrentDefinition {
    pub fn new(bidirectional: bool) -> Self {
        Self { bidirectional }
    }

    pub fn is_bidirectional(&self) -> bool {
        self.bidirectional
    }
}

/// Horizontal arrow from `tail_x` towards `tip_x` at height `y`.
fn arrow(canvas: &mut Canvas, tail_x: f32, tip_x: f32, y: f32) {
    let direction = (tip_x - tail_x).signum();
    let head_base = tip_x - 10.0 * direction;

    canvas.line(
        RenderLayer::Glyph,
        Point::new(tail_x, y),
        Point::new(head_base, y),
        StrokeDefinition::default(),
    );
    canvas.polygon(
        RenderLayer::Glyph,
        points(&[(head_base, y - 6.0), (tip_x, y), (head_base, y + 6.0)]),
        Paint::filled(Color::default()),
    );
}

impl GlyphDefinition for RecurrentDefinition {
    fn kind_name(&self) -> &'static str {
        if self.bidirectional {
            "bidirectional"
        } else {
            "recurrent"
        }
    }

    fn render(&self, canvas: &mut Canvas, start_x: f32, palette: &Palette) -> GlyphExtent {
        let s = start_x;

        canvas.rectangle(
            RenderLayer::Glyph,
            corners(s + 20.0, 90.0, s + 100.0, 190.0),
            Paint::filled(palette.main()),
        );
        canvas.polygon(
            RenderLayer::Glyph,
            points(&[
                (s + 20.0, 90.0),
                (s + 35.0, 70.0),
                (s + 115.0, 70.0),
                (s + 100.0, 90.0),
            ]),
            Paint::filled(palette.main()),
        );
        canvas.polygon(
            RenderLayer::Glyph,
            points(&[
                (s + 100.0, 90.0),
                (s + 115.0, 70.0),
                (s + 115.0, 170.0),
                (s + 100.0, 190.0),
            ]),
            Paint::filled(palette.secondary()),
        );

        if self.bidirectional {
            arrow(canvas, s + 35.0, s + 90.0, 125.0);
            arrow(canvas, s + 85.0, s + 30.0, 155.0);
        } else {
            arrow(canvas, s + 35.0, s + 90.0, 140.0);
        }

        GlyphExtent {
            end_x: s + 140.0,
            anchors: AnchorPoints::new(
                points(&[(s + 115.0, 90.0), (s + 115.0, 120.0), (s + 115.0, 150.0)]),
                points(&[(s + 20.0, 110.0), (s + 20.0, 140.0), (s + 20.0, 170.0)]),
            ),
        }
    }

    fn label_offset(&self) -> f32 {
        20.0
    }
}
