use super::{AnchorPoints, GlyphDefinition, GlyphExtent, circle, corners, points};
use crate::{
    draw::{Canvas, Paint, RenderLayer, StrokeDefinition},
    palette::Palette,
};

const GRID: usize = 3;
const UNIT_RADIUS: f32 = 5.0;
/// Grid cells in the order they are dropped, centre first then corners.
const DROP_ORDER: [usize; GRID * GRID] = [4, 0, 8, 2, 6, 1, 7, 3, 5];

/// A rounded frame holding a 3x3 grid of units, some drawn as dropped.
#[derive(Debug, Clone, Default)]
pub struct DropoutDefinition {
    rate: f32,
}

impl DropoutDefinition {
    /// `rate` is clamped into `[0, 1]`.
    pub fn new(rate: f32) -> Self {
        Self {
            rate: rate.clamp(0.0, 1.0),
        }
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// `round(rate * 9)`.
    pub fn dropped_count(&self) -> usize {
        ((self.rate * (GRID * GRID) as f32).round() as usize).min(GRID * GRID)
    }
}

impl GlyphDefinition for DropoutDefinition {
    fn kind_name(&self) -> &'static str {
        "dropout"
    }

    fn render(&self, canvas: &mut Canvas, start_x: f32, palette: &Palette) -> GlyphExtent {
        let s = start_x;

        canvas.rounded_rectangle(
            RenderLayer::Glyph,
            corners(s + 10.0, 80.0, s + 50.0, 200.0),
            8.0,
            Paint::filled(palette.regular()),
        );

        let dropped = &DROP_ORDER[..self.dropped_count()];
        for cell in 0..GRID * GRID {
            let cx = s + 18.0 + (cell % GRID) as f32 * 12.0;
            let cy = 110.0 + (cell / GRID) as f32 * 30.0;
            let paint = if dropped.contains(&cell) {
                Paint::outlined(StrokeDefinition::dashed(palette.drop(), 1.0))
            } else {
                Paint::filled(palette.main())
            };
            canvas.ellipse(RenderLayer::Glyph, circle(cx, cy, UNIT_RADIUS), paint);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        color::Color,
        draw::{CANVAS_HEIGHT, Primitive},
    };

    fn hollow_units(rate: f32) -> usize {
        let mut canvas = Canvas::new(200.0, CANVAS_HEIGHT, Color::white());
        DropoutDefinition::new(rate).render(&mut canvas, 0.0, &Palette::default());
        canvas
            .primitives()
            .filter(|p| matches!(p, Primitive::Ellipse { paint, .. } if paint.fill().is_none()))
            .count()
    }

    #[test]
    fn test_dropped_units_follow_rate() {
        assert_eq!(hollow_units(0.0), 0);
        assert_eq!(hollow_units(0.5), 5);
        assert_eq!(hollow_units(0.2), 2);
        assert_eq!(hollow_units(1.0), 9);
    }

    #[test]
    fn test_rate_is_clamped() {
        assert_eq!(DropoutDefinition::new(3.0).rate(), 1.0);
        assert_eq!(DropoutDefinition::new(-1.0).dropped_count(), 0);
    }
}
