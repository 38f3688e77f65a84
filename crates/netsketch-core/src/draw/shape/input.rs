use super::{AnchorPoints, BAND_TOP, GlyphDefinition, GlyphExtent, corners, points};
use crate::{
    draw::{Canvas, Paint, RenderLayer},
    palette::Palette,
};

const CELL: f32 = 20.0;
const CELLS: usize = 10;

/// A column of ten square cells spanning the whole band.
///
/// The input glyph only exposes exit anchors; nothing connects into it.
#[derive(Debug, Clone, Default)]
pub struct InputDefinition;

impl InputDefinition {
    pub fn new() -> Self {
        Self
    }
}

impl GlyphDefinition for InputDefinition {
    fn kind_name(&self) -> &'static str {
        "input"
    }

    fn render(&self, canvas: &mut Canvas, start_x: f32, palette: &Palette) -> GlyphExtent {
        let s = start_x;
        for i in 0..CELLS {
            let top = BAND_TOP + i as f32 * CELL;
            canvas.rectangle(
                RenderLayer::Glyph,
                corners(s, top, s + CELL, top + CELL),
                Paint::filled(palette.main()),
            );
        }

        GlyphExtent {
            end_x: s + 60.0,
            anchors: AnchorPoints::new(points(&[(s + CELL, 50.0), (s + CELL, 230.0)]), Vec::new()),
        }
    }

    fn label_offset(&self) -> f32 {
        -10.0
    }
}
