//! Plain-text layer summary.
//!
//! Lists every layer with its 1-based position, display name and kind,
//! followed by its attribute lines:
//!
//! ```text
//! ================================================
//! Layer 1: conv2d          | conv
//! ------------------------------------------------
//!   filters: 32
//!   kernel: (3, 3)
//! ```

use std::fmt;

use crate::model::LayerDescriptor;

const RULE_WIDTH: usize = 48;
const HEADING_WIDTH: usize = 24;

/// A printable summary borrowing the layer sequence.
#[derive(Debug, Clone, Copy)]
pub struct Summary<'a> {
    layers: &'a [LayerDescriptor],
}

impl<'a> Summary<'a> {
    pub fn new(layers: &'a [LayerDescriptor]) -> Self {
        Self { layers }
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, layer) in self.layers.iter().enumerate() {
            writeln!(f, "{}", "=".repeat(RULE_WIDTH))?;
            let heading = format!("Layer {}: {}", index + 1, layer.name());
            writeln!(f, "{heading:<HEADING_WIDTH$}| {}", layer.tag())?;
            writeln!(f, "{}", "-".repeat(RULE_WIDTH))?;
            let properties = layer.property_lines();
            if properties.is_empty() {
                writeln!(f, "  (no attributes)")?;
            }
            for line in properties {
                writeln!(f, "  {line}")?;
            }
        }
        Ok(())
    }
}

/// Renders the summary of `layers` to a string.
pub fn summarize(layers: &[LayerDescriptor]) -> String {
    Summary::new(layers).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LayerKind, TensorShape};

    #[test]
    fn test_summary_lists_every_layer() {
        let layers = vec![
            LayerDescriptor::new(
                "input_1",
                LayerKind::Input {
                    shape: Some(TensorShape::batched(&[28, 28, 1])),
                },
            ),
            LayerDescriptor::new(
                "dense",
                LayerKind::Dense {
                    units: 64,
                    activation: Some("relu".to_string()),
                },
            ),
            LayerDescriptor::new("flatten", LayerKind::Flatten),
        ];

        let text = summarize(&layers);
        let headings: Vec<_> = text.lines().filter(|l| l.starts_with("Layer ")).collect();
        assert_eq!(headings.len(), 3);
        assert!(headings[0].starts_with("Layer 1: input_1"));
        assert!(headings[1].ends_with("| dense"));
        assert!(text.contains("  units: 64"));
        assert!(text.contains("  activation: relu"));
        assert!(text.contains("  shape: (None, 28, 28, 1)"));
    }

    #[test]
    fn test_heading_is_padded() {
        let layers = [LayerDescriptor::new("flatten", LayerKind::Flatten)];
        let text = summarize(&layers);
        let heading = text.lines().nth(1).unwrap();
        assert_eq!(heading.find('|'), Some(HEADING_WIDTH));
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(summarize(&[]), "");
    }
}
