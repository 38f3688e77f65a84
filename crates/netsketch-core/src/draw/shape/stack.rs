//! Stacked feature-map glyph shared by convolution, pooling and
//! convolutional-recurrent layers.
//!
//! The number of rectangles grows with the logarithm of the channel count
//! and their size with the spatial extent of the input. Both are capped at
//! ten steps so that very wide layers stay readable.

use std::num::NonZeroU32;

use super::{AnchorPoints, GlyphDefinition, GlyphExtent, corners, points};
use crate::{
    draw::{Canvas, Paint, RenderLayer},
    geometry::Point,
    palette::Palette,
};

const MAX_STEPS: u32 = 10;
const OFFSET: f32 = 5.0;
const CENTER_Y: f32 = 140.0;

/// Which layer family a stack glyph stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackKind {
    Convolution,
    Pooling,
    ConvRecurrent,
}

impl StackKind {
    fn name(self) -> &'static str {
        match self {
            Self::Convolution => "conv",
            Self::Pooling => "pooling",
            Self::ConvRecurrent => "conv_recurrent",
        }
    }
}

/// Diagonally offset rectangles, one per doubling of the channel count.
///
/// The channel count is non-zero by construction, so the logarithm is
/// always defined.
#[derive(Debug, Clone)]
pub struct StackDefinition {
    kind: StackKind,
    depth_source: NonZeroU32,
    spatial_extent: u32,
}

impl StackDefinition {
    /// Creates a stack glyph.
    ///
    /// `depth_source` is the filter count (convolutions) or channel count
    /// (pooling); `spatial_extent` is the largest known spatial dimension of
    /// the layer input, 0 when unknown.
    pub fn new(kind: StackKind, depth_source: NonZeroU32, spatial_extent: u32) -> Self {
        Self {
            kind,
            depth_source,
            spatial_extent,
        }
    }

    pub fn kind(&self) -> StackKind {
        self.kind
    }

    /// `min(floor(log2(n)), 10)`; 0 for a single channel.
    pub fn depth(&self) -> u32 {
        self.depth_source.ilog2().min(MAX_STEPS)
    }

    /// `min(floor(spatial / 100), 10)`.
    pub fn spatial_steps(&self) -> u32 {
        (self.spatial_extent / 100).min(MAX_STEPS)
    }

    /// Number of rectangles actually drawn; at least one.
    pub fn drawn_count(&self) -> u32 {
        self.depth().max(1)
    }

    fn rect_size(&self) -> (f32, f32) {
        let sp = self.spatial_steps() as f32;
        (40.0 + 4.0 * sp, 60.0 + 8.0 * sp)
    }
}

impl GlyphDefinition for StackDefinition {
    fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    fn render(&self, canvas: &mut Canvas, start_x: f32, palette: &Palette) -> GlyphExtent {
        let count = self.drawn_count();
        let (width, height) = self.rect_size();
        let spread = (count - 1) as f32 * OFFSET;
        let left0 = start_x + 10.0;
        let top0 = CENTER_Y - height / 2.0 - spread / 2.0;

        for i in 0..count {
            let step = i as f32 * OFFSET;
            let fill = if i % 2 == 0 {
                palette.main()
            } else {
                palette.secondary()
            };
            canvas.rectangle(
                RenderLayer::Glyph,
                corners(left0 + step, top0 + step, left0 + step + width, top0 + step + height),
                Paint::filled(fill),
            );
        }

        let last_right = left0 + spread + width;
        let last_top = top0 + spread;

        GlyphExtent {
            end_x: last_right + 20.0,
            anchors: AnchorPoints::new(
                vec![
                    Point::new(last_right, last_top + 10.0),
                    Point::new(last_right, last_top + height - 10.0),
                ],
                points(&[(left0, top0 + 10.0), (left0, top0 + height - 10.0)]),
            ),
        }
    }

    fn label_offset(&self) -> f32 {
        match self.kind {
            StackKind::Convolution => 10.0,
            StackKind::Pooling | StackKind::ConvRecurrent => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::{color::Color, draw::CANVAS_HEIGHT};

    fn stack(n: u32, spatial: u32) -> StackDefinition {
        StackDefinition::new(StackKind::Convolution, NonZeroU32::new(n).unwrap(), spatial)
    }

    #[test]
    fn test_depth_is_log_scaled_and_capped() {
        assert_eq!(stack(1024, 28).depth(), 10);
        assert_eq!(stack(1 << 20, 28).depth(), 10);
        assert_eq!(stack(2, 28).depth(), 1);
        assert_eq!(stack(32, 28).depth(), 5);
        assert_eq!(stack(1, 28).depth(), 0);
    }

    #[test]
    fn test_single_channel_still_draws_one_rectangle() {
        let mut canvas = Canvas::new(300.0, CANVAS_HEIGHT, Color::white());
        stack(1, 0).render(&mut canvas, 0.0, &Palette::default());
        assert_eq!(canvas.len(), 1);
    }

    #[test]
    fn test_spatial_steps() {
        assert_eq!(stack(8, 28).spatial_steps(), 0);
        assert_eq!(stack(8, 224).spatial_steps(), 2);
        assert_eq!(stack(8, 5000).spatial_steps(), 10);
    }

    #[test]
    fn test_end_x_follows_last_rectangle() {
        let mut canvas = Canvas::new(300.0, CANVAS_HEIGHT, Color::white());
        // 32 filters: 5 rectangles, 40 wide, offset 5 => last right edge 10 + 20 + 40
        let extent = stack(32, 28).render(&mut canvas, 0.0, &Palette::default());
        assert_eq!(canvas.len(), 5);
        assert_approx_eq!(f32, extent.end_x, 90.0);
        assert_approx_eq!(f32, extent.anchors.from()[0].x(), 70.0);
        assert_approx_eq!(f32, extent.anchors.to()[0].x(), 10.0);
    }

    #[test]
    fn test_stack_kind_names() {
        let pooling = StackDefinition::new(StackKind::Pooling, NonZeroU32::MIN, 0);
        assert_eq!(pooling.kind_name(), "pooling");
        assert_eq!(stack(4, 0).kind_name(), "conv");
    }

    proptest! {
        #[test]
        fn stack_stays_in_band(n in 1u32..u32::MAX, spatial in 0u32..100_000) {
            let mut canvas = Canvas::new(400.0, CANVAS_HEIGHT, Color::white());
            let extent = stack(n, spatial).render(&mut canvas, 20.0, &Palette::default());
            prop_assert!(extent.end_x > 20.0);
            prop_assert!(canvas.len() >= 1 && canvas.len() <= 10);
            for anchor in extent.anchors.to().iter().chain(extent.anchors.from()) {
                prop_assert!(anchor.y() >= crate::draw::BAND_TOP);
                prop_assert!(anchor.y() <= crate::draw::BAND_BOTTOM);
            }
        }
    }
}
