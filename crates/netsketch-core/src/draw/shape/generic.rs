use super::{AnchorPoints, GlyphDefinition, GlyphExtent, circle, corners, points};
use crate::{
    color::Color,
    draw::{Canvas, Paint, RenderLayer},
    palette::Palette,
};

/// Fallback glyph for layers without a dedicated drawing: a rounded box
/// with three dots.
#[derive(Debug, Clone, Default)]
pub struct GenericDefinition;

impl GenericDefinition {
    pub fn new() -> Self {
        Self
    }
}

impl GlyphDefinition for GenericDefinition {
    fn kind_name(&self) -> &'static str {
        "generic"
    }

    fn render(&self, canvas: &mut Canvas, start_x: f32, palette: &Palette) -> GlyphExtent {
        let s = start_x;

        canvas.rounded_rectangle(
            RenderLayer::Glyph,
            corners(s + 10.0, 80.0, s + 50.0, 200.0),
            8.0,
            Paint::filled(palette.regular()),
        );

        for cy in [105.0, 140.0, 175.0] {
            canvas.ellipse(
                RenderLayer::Glyph,
                circle(s + 30.0, cy, 10.0),
                Paint::filled(Color::white()),
            );
        }

        GlyphExtent {
            end_x: s + 80.0,
            anchors: AnchorPoints::new(
                points(&[(s + 50.0, 100.0), (s + 50.0, 180.0)]),
                points(&[(s + 10.0, 100.0), (s + 10.0, 180.0)]),
            ),
        }
    }
}
