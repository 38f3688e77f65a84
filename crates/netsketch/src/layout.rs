//! Canvas width estimation.
//!
//! The width of a diagram is a pure function of the ordered kind tags of its
//! layers. Each kind contributes a nominal width; a fixed base stands in for
//! the input column and a fixed trailing term leaves room for the output
//! marker. Attributes never influence the estimate, so a stack glyph drawn
//! for a very wide convolution can overflow its nominal slot. The canvas is
//! not grown to fit it.

use crate::model::KindTag;

/// Width reserved for the input column and the left margin.
pub const BASE_WIDTH: u32 = 60;
/// Width reserved after the last glyph.
pub const TRAILING_WIDTH: u32 = 60;

/// Nominal width of one non-leading layer.
pub fn contribution(tag: KindTag) -> u32 {
    match tag {
        KindTag::Activation => 70,
        KindTag::Conv | KindTag::Pooling | KindTag::ConvRecurrent => 180,
        KindTag::Recurrent | KindTag::Flatten => 140,
        KindTag::Input
        | KindTag::Dense
        | KindTag::Embedding
        | KindTag::Normalization
        | KindTag::Dropout
        | KindTag::Generic => 80,
    }
}

/// Estimates the canvas width for a sequence of kind tags.
///
/// A leading Input is excluded because [`BASE_WIDTH`] already accounts for
/// it. An empty sequence yields `BASE_WIDTH + TRAILING_WIDTH`.
///
/// ```
/// # use netsketch::{layout::estimate, model::KindTag};
/// assert_eq!(estimate([KindTag::Input, KindTag::Conv]), 300);
/// assert_eq!(estimate([KindTag::Input, KindTag::Dense]), 200);
/// assert_eq!(estimate([]), 120);
/// ```
pub fn estimate(tags: impl IntoIterator<Item = KindTag>) -> u32 {
    let mut tags = tags.into_iter().peekable();
    if tags.peek() == Some(&KindTag::Input) {
        tags.next();
    }
    BASE_WIDTH + tags.map(contribution).sum::<u32>() + TRAILING_WIDTH
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::model::{LayerDescriptor, LayerKind, TensorShape};

    #[test]
    fn test_known_widths() {
        assert_eq!(estimate([KindTag::Input, KindTag::Conv]), 300);
        assert_eq!(estimate([KindTag::Input, KindTag::Dense]), 200);
        assert_eq!(estimate([KindTag::Input, KindTag::Pooling]), 300);
        assert_eq!(
            estimate([KindTag::Input, KindTag::Dense, KindTag::Activation]),
            270
        );
    }

    #[test]
    fn test_empty_sequence() {
        assert_eq!(estimate(std::iter::empty()), 120);
    }

    #[test]
    fn test_only_leading_input_is_excluded() {
        assert_eq!(estimate([KindTag::Input]), 120);
        assert_eq!(estimate([KindTag::Dense, KindTag::Input]), 60 + 80 + 80 + 60);
        assert_eq!(estimate([KindTag::Input, KindTag::Input]), 200);
    }

    #[test]
    fn test_first_non_input_is_counted() {
        assert_eq!(estimate([KindTag::Recurrent]), 260);
    }

    fn kind_strategy() -> impl Strategy<Value = LayerKind> {
        prop_oneof![
            (1u32..4096).prop_map(|units| LayerKind::Dense {
                units,
                activation: None
            }),
            (1u32..4096, 1u32..8).prop_map(|(filters, k)| LayerKind::Conv {
                filters,
                kernel_size: vec![k, k],
                activation: None,
            }),
            (1u32..4).prop_map(|p| LayerKind::Pooling {
                pool_size: vec![p],
                padding: None,
            }),
            (1u32..512, any::<bool>()).prop_map(|(units, bidirectional)| LayerKind::Recurrent {
                units,
                activation: None,
                bidirectional,
            }),
            (0.0f32..=1.0).prop_map(|rate| LayerKind::Dropout { rate }),
            Just(LayerKind::Flatten),
            Just(LayerKind::Activation { activation: None }),
            Just(LayerKind::Normalization),
        ]
    }

    fn tag_only(kind: &LayerKind) -> LayerKind {
        match kind.tag() {
            KindTag::Dense => LayerKind::Dense {
                units: 1,
                activation: None,
            },
            KindTag::Conv => LayerKind::Conv {
                filters: 1,
                kernel_size: Vec::new(),
                activation: None,
            },
            KindTag::Pooling => LayerKind::Pooling {
                pool_size: Vec::new(),
                padding: None,
            },
            KindTag::Recurrent => LayerKind::Recurrent {
                units: 1,
                activation: None,
                bidirectional: false,
            },
            KindTag::Dropout => LayerKind::Dropout { rate: 0.0 },
            _ => kind.clone(),
        }
    }

    proptest! {
        #[test]
        fn estimate_depends_only_on_tags(
            kinds in prop::collection::vec(kind_strategy(), 0..12),
            spatial in 1u32..5000,
        ) {
            let layers: Vec<_> = kinds
                .iter()
                .map(|kind| {
                    LayerDescriptor::new("layer", kind.clone())
                        .with_input_shape(TensorShape::batched(&[spatial, spatial, 3]))
                })
                .collect();
            let stripped: Vec<_> = kinds
                .iter()
                .map(|kind| LayerDescriptor::new("layer", tag_only(kind)))
                .collect();

            prop_assert_eq!(
                estimate(layers.iter().map(LayerDescriptor::tag)),
                estimate(stripped.iter().map(LayerDescriptor::tag))
            );
        }

        #[test]
        fn estimate_is_sum_of_contributions(
            kinds in prop::collection::vec(kind_strategy(), 0..12),
        ) {
            let expected: u32 = kinds.iter().map(|k| contribution(k.tag())).sum();
            prop_assert_eq!(estimate(kinds.iter().map(LayerKind::tag)), 120 + expected);
        }
    }
}
