use super::{AnchorPoints, GlyphDefinition, GlyphExtent, corners, points};
use crate::{
    draw::{Canvas, Paint, RenderLayer},
    palette::Palette,
};

/// A tall bar feeding two wedges that narrow towards the exit.
#[derive(Debug, Clone, Default)]
pub struct FlattenDefinition;

impl FlattenDefinition {
    pub fn new() -> Self {
        Self
    }
}

impl GlyphDefinition for FlattenDefinition {
    fn kind_name(&self) -> &'static str {
        "flatten"
    }

    fn render(&self, canvas: &mut Canvas, start_x: f32, palette: &Palette) -> GlyphExtent {
        let s = start_x;

        canvas.rectangle(
            RenderLayer::Glyph,
            corners(s + 10.0, 70.0, s + 30.0, 210.0),
            Paint::filled(palette.main()),
        );
        canvas.polygon(
            RenderLayer::Glyph,
            points(&[(s + 30.0, 70.0), (s + 60.0, 125.0), (s + 30.0, 140.0)]),
            Paint::filled(palette.secondary()),
        );
        canvas.polygon(
            RenderLayer::Glyph,
            points(&[(s + 30.0, 140.0), (s + 60.0, 155.0), (s + 30.0, 210.0)]),
            Paint::filled(palette.secondary()),
        );

        GlyphExtent {
            end_x: s + 80.0,
            anchors: AnchorPoints::new(
                points(&[(s + 60.0, 125.0), (s + 60.0, 155.0)]),
                points(&[(s + 10.0, 100.0), (s + 10.0, 180.0)]),
            ),
        }
    }
}
