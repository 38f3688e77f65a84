use std::fmt;

use thiserror::Error;

/// Errors found while validating a layer descriptor.
///
/// Every variant names the position of the layer in the sequence and its
/// display name.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DescriptorError {
    #[error("layer {index} (`{name}`): {attribute} must be positive, got {value}")]
    NonPositive {
        index: usize,
        name: String,
        attribute: &'static str,
        value: i64,
    },

    #[error("layer {index} (`{name}`): {attribute} {value} is too large")]
    TooLarge {
        index: usize,
        name: String,
        attribute: &'static str,
        value: i64,
    },

    #[error("layer {index} (`{name}`): dropout rate {rate} is outside [0, 1]")]
    RateOutOfRange {
        index: usize,
        name: String,
        rate: f32,
    },

    #[error("layer {index} (`{name}`): missing required attribute `{attribute}`")]
    MissingAttribute {
        index: usize,
        name: String,
        attribute: &'static str,
    },

    #[error("layer {index} (`{name}`): a bidirectional wrapper must hold a recurrent layer, found {found}")]
    InvalidWrapper {
        index: usize,
        name: String,
        found: KindTag,
    },
}

/// Ordered tensor dimensions; `None` marks an unknown (batch) dimension.
///
/// ```
/// # use netsketch::model::TensorShape;
/// let shape = TensorShape::new(vec![None, Some(28), Some(28), Some(1)]);
/// assert_eq!(shape.to_string(), "(None, 28, 28, 1)");
/// assert_eq!(shape.max_spatial(), 28);
/// assert_eq!(shape.channels(), Some(1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TensorShape(Vec<Option<u32>>);

impl TensorShape {
    pub fn new(dims: Vec<Option<u32>>) -> Self {
        Self(dims)
    }

    /// A batched shape: an unknown leading dimension followed by `dims`.
    pub fn batched(dims: &[u32]) -> Self {
        Self(std::iter::once(None).chain(dims.iter().copied().map(Some)).collect())
    }

    pub fn dims(&self) -> &[Option<u32>] {
        &self.0
    }

    pub fn rank(&self) -> usize {
        self.0.len()
    }

    /// The last dimension, which holds the channel count.
    pub fn channels(&self) -> Option<u32> {
        self.0.last().copied().flatten()
    }

    /// Largest known dimension between the batch and channel axes, 0 if none.
    pub fn max_spatial(&self) -> u32 {
        if self.0.len() <= 2 {
            return 0;
        }
        self.0[1..self.0.len() - 1]
            .iter()
            .flatten()
            .copied()
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for TensorShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, dim) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match dim {
                Some(value) => write!(f, "{value}")?,
                None => f.write_str("None")?,
            }
        }
        // A single-element tuple keeps its trailing comma
        if self.0.len() == 1 {
            f.write_str(",")?;
        }
        f.write_str(")")
    }
}

/// Fieldless tag of a layer kind.
///
/// A bidirectional wrapper is tagged as [`KindTag::Recurrent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindTag {
    Input,
    Dense,
    Conv,
    Pooling,
    Embedding,
    Recurrent,
    ConvRecurrent,
    Activation,
    Flatten,
    Normalization,
    Dropout,
    Generic,
}

impl KindTag {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Dense => "dense",
            Self::Conv => "conv",
            Self::Pooling => "pooling",
            Self::Embedding => "embedding",
            Self::Recurrent => "recurrent",
            Self::ConvRecurrent => "conv_recurrent",
            Self::Activation => "activation",
            Self::Flatten => "flatten",
            Self::Normalization => "normalization",
            Self::Dropout => "dropout",
            Self::Generic => "generic",
        }
    }
}

impl fmt::Display for KindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of a layer with the attributes that kind carries.
#[derive(Debug, Clone, PartialEq)]
pub enum LayerKind {
    Input {
        shape: Option<TensorShape>,
    },
    Dense {
        units: u32,
        activation: Option<String>,
    },
    Conv {
        filters: u32,
        kernel_size: Vec<u32>,
        activation: Option<String>,
    },
    Pooling {
        pool_size: Vec<u32>,
        padding: Option<String>,
    },
    Embedding {
        input_dim: Option<u32>,
        output_dim: Option<u32>,
    },
    Recurrent {
        units: u32,
        activation: Option<String>,
        bidirectional: bool,
    },
    ConvRecurrent {
        filters: u32,
        kernel_size: Vec<u32>,
        activation: Option<String>,
    },
    Activation {
        activation: Option<String>,
    },
    Flatten,
    Normalization,
    Dropout {
        rate: f32,
    },
    Generic {
        class: String,
    },
    /// Wraps exactly one recurrent layer and runs it in both directions.
    Bidirectional(Box<LayerDescriptor>),
}

impl LayerKind {
    pub fn tag(&self) -> KindTag {
        match self {
            Self::Input { .. } => KindTag::Input,
            Self::Dense { .. } => KindTag::Dense,
            Self::Conv { .. } => KindTag::Conv,
            Self::Pooling { .. } => KindTag::Pooling,
            Self::Embedding { .. } => KindTag::Embedding,
            Self::Recurrent { .. } | Self::Bidirectional(_) => KindTag::Recurrent,
            Self::ConvRecurrent { .. } => KindTag::ConvRecurrent,
            Self::Activation { .. } => KindTag::Activation,
            Self::Flatten => KindTag::Flatten,
            Self::Normalization => KindTag::Normalization,
            Self::Dropout { .. } => KindTag::Dropout,
            Self::Generic { .. } => KindTag::Generic,
        }
    }
}

/// One layer of a sequential model.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerDescriptor {
    name: String,
    kind: LayerKind,
    input_shape: Option<TensorShape>,
    output_shape: Option<TensorShape>,
}

impl LayerDescriptor {
    pub fn new(name: impl Into<String>, kind: LayerKind) -> Self {
        Self {
            name: name.into(),
            kind,
            input_shape: None,
            output_shape: None,
        }
    }

    pub fn with_input_shape(mut self, shape: TensorShape) -> Self {
        self.input_shape = Some(shape);
        self
    }

    pub fn with_output_shape(mut self, shape: TensorShape) -> Self {
        self.output_shape = Some(shape);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &LayerKind {
        &self.kind
    }

    pub fn tag(&self) -> KindTag {
        self.kind.tag()
    }

    pub fn input_shape(&self) -> Option<&TensorShape> {
        self.input_shape.as_ref()
    }

    pub fn output_shape(&self) -> Option<&TensorShape> {
        self.output_shape.as_ref()
    }

    /// Checks the attributes a glyph depends on.
    ///
    /// # Errors
    ///
    /// Returns a [`DescriptorError`] for a zero unit, filter or channel
    /// count, a dropout rate outside `[0, 1]`, or a bidirectional wrapper
    /// around anything but a recurrent layer.
    pub fn validate(&self, index: usize) -> Result<(), DescriptorError> {
        let non_positive = |attribute: &'static str, value: u32| {
            if value == 0 {
                Err(DescriptorError::NonPositive {
                    index,
                    name: self.name.clone(),
                    attribute,
                    value: i64::from(value),
                })
            } else {
                Ok(())
            }
        };

        match &self.kind {
            LayerKind::Dense { units, .. } | LayerKind::Recurrent { units, .. } => {
                non_positive("units", *units)
            }
            LayerKind::Conv { filters, .. } | LayerKind::ConvRecurrent { filters, .. } => {
                non_positive("filters", *filters)
            }
            LayerKind::Pooling { .. } => match self.input_shape.as_ref().and_then(TensorShape::channels) {
                Some(channels) => non_positive("channel count", channels),
                None => Ok(()),
            },
            LayerKind::Dropout { rate } => {
                if (0.0..=1.0).contains(rate) {
                    Ok(())
                } else {
                    Err(DescriptorError::RateOutOfRange {
                        index,
                        name: self.name.clone(),
                        rate: *rate,
                    })
                }
            }
            LayerKind::Bidirectional(inner) => match inner.kind() {
                LayerKind::Recurrent { .. } => inner.validate(index),
                other => Err(DescriptorError::InvalidWrapper {
                    index,
                    name: self.name.clone(),
                    found: other.tag(),
                }),
            },
            LayerKind::Input { .. }
            | LayerKind::Embedding { .. }
            | LayerKind::Activation { .. }
            | LayerKind::Flatten
            | LayerKind::Normalization
            | LayerKind::Generic { .. } => Ok(()),
        }
    }

    /// Kind-specific lines printed under the name in properties mode.
    ///
    /// Attributes that are unknown are left out.
    pub fn property_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let input = self.input_shape.as_ref().map(|s| format!("input: {s}"));
        let output = self.output_shape.as_ref().map(|s| format!("output: {s}"));
        let activation = |activation: &Option<String>| {
            activation.as_ref().map(|a| format!("activation: {a}"))
        };

        match &self.kind {
            LayerKind::Input { shape } => lines.push(match shape {
                Some(shape) => format!("shape: {shape}"),
                None => "shape: unknown".to_string(),
            }),
            LayerKind::Dense { units, activation: act } => {
                lines.push(format!("units: {units}"));
                lines.extend(activation(act));
                lines.extend(input);
                lines.extend(output);
            }
            LayerKind::Conv {
                filters,
                kernel_size,
                activation: act,
            }
            | LayerKind::ConvRecurrent {
                filters,
                kernel_size,
                activation: act,
            } => {
                lines.push(format!("filters: {filters}"));
                if !kernel_size.is_empty() {
                    lines.push(format!("kernel: {}", format_sizes(kernel_size)));
                }
                lines.extend(activation(act));
                lines.extend(input);
                lines.extend(output);
            }
            LayerKind::Pooling { pool_size, padding } => {
                if !pool_size.is_empty() {
                    lines.push(format!("pool size: {}", format_sizes(pool_size)));
                }
                lines.extend(padding.as_ref().map(|p| format!("padding: {p}")));
                lines.extend(input);
                lines.extend(output);
            }
            LayerKind::Embedding {
                input_dim,
                output_dim,
            } => {
                lines.extend(input_dim.map(|d| format!("input dim: {d}")));
                lines.extend(output_dim.map(|d| format!("output dim: {d}")));
                lines.extend(input);
                lines.extend(output);
            }
            LayerKind::Recurrent {
                units,
                activation: act,
                ..
            } => {
                lines.push(format!("units: {units}"));
                lines.extend(activation(act));
            }
            LayerKind::Activation { activation: act } => lines.extend(activation(act)),
            LayerKind::Flatten => {
                lines.extend(input);
                lines.extend(output);
            }
            LayerKind::Normalization => lines.extend(output),
            LayerKind::Dropout { rate } => lines.push(format!("rate: {rate}")),
            LayerKind::Generic { .. } => {}
            LayerKind::Bidirectional(inner) => return inner.property_lines(),
        }

        lines
    }
}

fn format_sizes(sizes: &[u32]) -> String {
    let inner = sizes
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    if sizes.len() == 1 {
        format!("({inner},)")
    } else {
        format!("({inner})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dense(units: u32) -> LayerDescriptor {
        LayerDescriptor::new(
            "dense",
            LayerKind::Dense {
                units,
                activation: Some("relu".to_string()),
            },
        )
    }

    fn lstm(units: u32) -> LayerDescriptor {
        LayerDescriptor::new(
            "lstm",
            LayerKind::Recurrent {
                units,
                activation: Some("tanh".to_string()),
                bidirectional: false,
            },
        )
    }

    #[test]
    fn test_tensor_shape_display() {
        assert_eq!(TensorShape::batched(&[28, 28, 1]).to_string(), "(None, 28, 28, 1)");
        assert_eq!(TensorShape::new(vec![Some(10)]).to_string(), "(10,)");
        assert_eq!(TensorShape::default().to_string(), "()");
    }

    #[test]
    fn test_tensor_shape_spatial_and_channels() {
        let image = TensorShape::batched(&[224, 112, 3]);
        assert_eq!(image.max_spatial(), 224);
        assert_eq!(image.channels(), Some(3));

        let flat = TensorShape::batched(&[784]);
        assert_eq!(flat.max_spatial(), 0);

        let unknown = TensorShape::new(vec![None, None, None, Some(8)]);
        assert_eq!(unknown.max_spatial(), 0);
        assert_eq!(TensorShape::new(vec![None, Some(4), None]).channels(), None);
    }

    #[test]
    fn test_bidirectional_tags_as_recurrent() {
        let bi = LayerDescriptor::new("bi", LayerKind::Bidirectional(Box::new(lstm(32))));
        assert_eq!(bi.tag(), KindTag::Recurrent);
    }

    #[test]
    fn test_validate_rejects_zero_counts() {
        assert!(dense(64).validate(0).is_ok());
        assert_eq!(
            dense(0).validate(3),
            Err(DescriptorError::NonPositive {
                index: 3,
                name: "dense".to_string(),
                attribute: "units",
                value: 0,
            })
        );

        let conv = LayerDescriptor::new(
            "conv",
            LayerKind::Conv {
                filters: 0,
                kernel_size: vec![3, 3],
                activation: None,
            },
        );
        assert!(matches!(
            conv.validate(1),
            Err(DescriptorError::NonPositive { attribute: "filters", .. })
        ));
    }

    #[test]
    fn test_validate_pooling_channels() {
        let pooling = |shape: TensorShape| {
            LayerDescriptor::new(
                "pool",
                LayerKind::Pooling {
                    pool_size: vec![2, 2],
                    padding: None,
                },
            )
            .with_input_shape(shape)
        };
        assert!(pooling(TensorShape::batched(&[28, 28, 8])).validate(0).is_ok());
        assert!(pooling(TensorShape::batched(&[28, 28, 0])).validate(0).is_err());
        assert!(pooling(TensorShape::new(vec![None, None])).validate(0).is_ok());
    }

    #[test]
    fn test_validate_dropout_rate() {
        let dropout = |rate| LayerDescriptor::new("drop", LayerKind::Dropout { rate });
        assert!(dropout(0.0).validate(0).is_ok());
        assert!(dropout(1.0).validate(0).is_ok());
        assert!(dropout(1.5).validate(0).is_err());
        assert!(dropout(f32::NAN).validate(0).is_err());
    }

    #[test]
    fn test_validate_bidirectional_inner() {
        let ok = LayerDescriptor::new("bi", LayerKind::Bidirectional(Box::new(lstm(16))));
        assert!(ok.validate(2).is_ok());

        let zero = LayerDescriptor::new("bi", LayerKind::Bidirectional(Box::new(lstm(0))));
        assert!(zero.validate(2).is_err());

        let wrong = LayerDescriptor::new("bi", LayerKind::Bidirectional(Box::new(dense(4))));
        assert_eq!(
            wrong.validate(2),
            Err(DescriptorError::InvalidWrapper {
                index: 2,
                name: "bi".to_string(),
                found: KindTag::Dense,
            })
        );
    }

    #[test]
    fn test_property_lines_dense() {
        let layer = dense(64)
            .with_input_shape(TensorShape::batched(&[784]))
            .with_output_shape(TensorShape::batched(&[64]));
        assert_eq!(
            layer.property_lines(),
            vec![
                "units: 64",
                "activation: relu",
                "input: (None, 784)",
                "output: (None, 64)",
            ]
        );
    }

    #[test]
    fn test_property_lines_conv() {
        let layer = LayerDescriptor::new(
            "conv2d",
            LayerKind::Conv {
                filters: 32,
                kernel_size: vec![3, 3],
                activation: None,
            },
        );
        assert_eq!(layer.property_lines(), vec!["filters: 32", "kernel: (3, 3)"]);
    }

    #[test]
    fn test_property_lines_small_kinds() {
        let input = LayerDescriptor::new(
            "input",
            LayerKind::Input {
                shape: Some(TensorShape::batched(&[28, 28, 1])),
            },
        );
        assert_eq!(input.property_lines(), vec!["shape: (None, 28, 28, 1)"]);

        let dropout = LayerDescriptor::new("dropout", LayerKind::Dropout { rate: 0.25 });
        assert_eq!(dropout.property_lines(), vec!["rate: 0.25"]);

        let generic = LayerDescriptor::new(
            "reshape",
            LayerKind::Generic {
                class: "Reshape".to_string(),
            },
        );
        assert!(generic.property_lines().is_empty());

        let bi = LayerDescriptor::new("bi", LayerKind::Bidirectional(Box::new(lstm(8))));
        assert_eq!(bi.property_lines(), vec!["units: 8", "activation: tanh"]);
    }
}
