use super::{AnchorPoints, GlyphDefinition, GlyphExtent, corners, points};
use crate::{
    color::Color,
    draw::{Canvas, Paint, RenderLayer},
    palette::Palette,
};

/// A small square with an inscribed white circle.
#[derive(Debug, Clone, Default)]
pub struct ActivationDefinition;

impl ActivationDefinition {
    pub fn new() -> Self {
        Self
    }
}

impl GlyphDefinition for ActivationDefinition {
    fn kind_name(&self) -> &'static str {
        "activation"
    }

    fn render(&self, canvas: &mut Canvas, start_x: f32, palette: &Palette) -> GlyphExtent {
        let s = start_x;

        canvas.rectangle(
            RenderLayer::Glyph,
            corners(s + 10.0, 120.0, s + 50.0, 160.0),
            Paint::filled(palette.main()),
        );
        canvas.ellipse(
            RenderLayer::Glyph,
            corners(s + 15.0, 125.0, s + 45.0, 155.0),
            Paint::filled(Color::white()),
        );

        GlyphExtent {
            end_x: s + 70.0,
            anchors: AnchorPoints::new(
                points(&[(s + 50.0, 125.0), (s + 50.0, 155.0)]),
                points(&[(s + 10.0, 125.0), (s + 10.0, 155.0)]),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::draw::CANVAS_HEIGHT;

    #[test]
    fn test_activation_geometry() {
        let mut canvas = Canvas::new(200.0, CANVAS_HEIGHT, Color::white());
        let extent = ActivationDefinition::new().render(&mut canvas, 160.0, &Palette::default());

        assert_approx_eq!(f32, extent.end_x, 230.0);
        assert_eq!(canvas.len(), 2);
        assert_eq!(extent.anchors.from().len(), 2);
        assert_eq!(extent.anchors.to().len(), 2);
    }
}
