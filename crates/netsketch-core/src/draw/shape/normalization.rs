use super::{AnchorPoints, GlyphDefinition, GlyphExtent, corners, points};
use crate::{
    color::Color,
    draw::{Canvas, Paint, RenderLayer},
    palette::Palette,
};

const NEUTRAL: &str = "#edebd8";
const RINGS: usize = 4;
const RING_STEP: f32 = 6.0;

/// Concentric rectangles alternating between the main color and a fixed
/// neutral tone.
#[derive(Debug, Clone, Default)]
pub struct NormalizationDefinition;

impl NormalizationDefinition {
    pub fn new() -> Self {
        Self
    }
}

impl GlyphDefinition for NormalizationDefinition {
    fn kind_name(&self) -> &'static str {
        "normalization"
    }

    fn render(&self, canvas: &mut Canvas, start_x: f32, palette: &Palette) -> GlyphExtent {
        let s = start_x;
        let neutral = Color::new(NEUTRAL).expect("neutral tone is a valid CSS color");

        for i in 0..RINGS {
            let inset = i as f32 * RING_STEP;
            let fill = if i % 2 == 0 { palette.main() } else { neutral };
            canvas.rectangle(
                RenderLayer::Glyph,
                corners(s + 10.0 + inset, 90.0 + inset, s + 60.0 - inset, 190.0 - inset),
                Paint::filled(fill),
            );
        }

        GlyphExtent {
            end_x: s + 80.0,
            anchors: AnchorPoints::new(
                points(&[(s + 60.0, 100.0), (s + 60.0, 180.0)]),
                points(&[(s + 10.0, 100.0), (s + 10.0, 180.0)]),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::draw::{CANVAS_HEIGHT, Primitive};

    #[test]
    fn test_normalization_alternates_fills() {
        let mut canvas = Canvas::new(200.0, CANVAS_HEIGHT, Color::white());
        let palette = Palette::default();
        let extent = NormalizationDefinition::new().render(&mut canvas, 0.0, &palette);

        let fills: Vec<_> = canvas
            .primitives()
            .filter_map(|p| match p {
                Primitive::Rectangle { paint, .. } => paint.fill(),
                _ => None,
            })
            .collect();

        let neutral = Color::new(NEUTRAL).unwrap();
        assert_eq!(fills, vec![palette.main(), neutral, palette.main(), neutral]);
        assert_approx_eq!(f32, extent.end_x, 80.0);
    }
}
