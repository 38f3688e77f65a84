use super::{AnchorPoints, GlyphDefinition, GlyphExtent, corners, points};
use crate::{
    draw::{Canvas, Paint, RenderLayer},
    palette::Palette,
};

const CELL: f32 = 20.0;

/// Two interleaved columns of rounded cells in a checkerboard pattern.
#[derive(Debug, Clone, Default)]
pub struct EmbeddingDefinition;

impl EmbeddingDefinition {
    pub fn new() -> Self {
        Self
    }
}

impl GlyphDefinition for EmbeddingDefinition {
    fn kind_name(&self) -> &'static str {
        "embedding"
    }

    fn render(&self, canvas: &mut Canvas, start_x: f32, palette: &Palette) -> GlyphExtent {
        let s = start_x;
        // (left edge, first row top, row count); the second column is shifted
        // half a cell down.
        let columns = [(s + 10.0, 60.0, 8), (s + 30.0, 70.0, 7)];

        for (column, (left, top, rows)) in columns.into_iter().enumerate() {
            for row in 0..rows {
                let y = top + row as f32 * CELL;
                let fill = if (row + column) % 2 == 0 {
                    palette.main()
                } else {
                    palette.secondary()
                };
                canvas.rounded_rectangle(
                    RenderLayer::Glyph,
                    corners(left, y, left + CELL, y + CELL),
                    3.0,
                    Paint::filled(fill),
                );
            }
        }

        GlyphExtent {
            end_x: s + 80.0,
            anchors: AnchorPoints::new(
                points(&[(s + 50.0, 90.0), (s + 50.0, 140.0), (s + 50.0, 190.0)]),
                points(&[(s + 10.0, 80.0), (s + 10.0, 200.0)]),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;
    use crate::{color::Color, draw::CANVAS_HEIGHT};

    #[test]
    fn test_embedding_geometry() {
        let mut canvas = Canvas::new(200.0, CANVAS_HEIGHT, Color::white());
        let extent = EmbeddingDefinition::new().render(&mut canvas, 0.0, &Palette::default());

        assert_eq!(canvas.len(), 15);
        assert_approx_eq!(f32, extent.end_x, 80.0);
        assert_eq!(extent.anchors.to().len(), 2);
        assert_eq!(extent.anchors.from().len(), 3);
    }
}
