//! Model description files.
//!
//! A model description lists the layers of a sequential model as loosely
//! typed records: a class name plus whatever attributes that class has.
//! Records are classified into [`LayerDescriptor`]s by class family; a class
//! outside every family becomes [`LayerKind::Generic`].
//!
//! ```toml
//! [[layers]]
//! class = "InputLayer"
//! shape = ["None", 28, 28, 1]
//!
//! [[layers]]
//! class = "Conv2D"
//! filters = 32
//! kernel_size = [3, 3]
//! activation = "relu"
//! ```
//!
//! TOML has no null, so unknown dimensions are written as the strings
//! `"None"` or `"?"`. JSON files may use `null` as well.

use std::{fmt, path::Path};

use serde::{
    Deserialize, Deserializer,
    de::{self, Visitor},
};
use thiserror::Error;

use super::{DescriptorError, LayerDescriptor, LayerKind, TensorShape};

const ACTIVATIONS: &[&str] = &[
    "Activation",
    "Softmax",
    "ELU",
    "ReLU",
    "PReLU",
    "LeakyReLU",
    "ThresholdedReLU",
];
const CONVOLUTIONS: &[&str] = &[
    "Conv1D",
    "Conv2D",
    "Conv3D",
    "SeparableConv1D",
    "SeparableConv2D",
    "SeparableConv3D",
    "DepthwiseConv2D",
    "Conv1DTranspose",
    "Conv2DTranspose",
    "Conv3DTranspose",
];
const POOLINGS: &[&str] = &[
    "MaxPooling1D",
    "MaxPooling2D",
    "MaxPooling3D",
    "AveragePooling1D",
    "AveragePooling2D",
    "AveragePooling3D",
    "GlobalMaxPooling1D",
    "GlobalMaxPooling2D",
    "GlobalMaxPooling3D",
    "GlobalAveragePooling1D",
    "GlobalAveragePooling2D",
    "GlobalAveragePooling3D",
];
const RECURRENTS: &[&str] = &["LSTM", "GRU", "RNN", "SimpleRNN"];
const CONV_RECURRENTS: &[&str] = &["ConvLSTM1D", "ConvLSTM2D", "ConvLSTM3D"];
const DROPOUTS: &[&str] = &[
    "Dropout",
    "SpatialDropout1D",
    "SpatialDropout2D",
    "SpatialDropout3D",
    "GaussianDropout",
    "AlphaDropout",
];
const NORMALIZATIONS: &[&str] = &[
    "BatchNormalization",
    "LayerNormalization",
    "GroupNormalization",
    "UnitNormalization",
];

/// Errors raised while reading a model description.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid TOML model description: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid JSON model description: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Descriptor(#[from] DescriptorError),

    #[error("unsupported model description format `{0}`, expected .toml or .json")]
    UnknownFormat(String),
}

/// Serialization format of a model description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    Toml,
    Json,
}

impl ModelFormat {
    /// Picks the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        match extension.to_ascii_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            _ => Err(ModelError::UnknownFormat(extension.to_string())),
        }
    }
}

/// One tensor dimension as written in a model description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dim(pub Option<u32>);

impl<'de> Deserialize<'de> for Dim {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DimVisitor;

        impl<'de> Visitor<'de> for DimVisitor {
            type Value = Dim;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a non-negative dimension, null, \"None\" or \"?\"")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Dim, E> {
                u32::try_from(value)
                    .map(|v| Dim(Some(v)))
                    .map_err(|_| E::custom(format!("dimension {value} is too large")))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Dim, E> {
                u64::try_from(value)
                    .map_err(|_| E::custom(format!("dimension {value} is negative")))
                    .and_then(|v| self.visit_u64(v))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Dim, E> {
                match value {
                    "None" | "none" | "null" | "?" => Ok(Dim(None)),
                    other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
                }
            }

            fn visit_none<E: de::Error>(self) -> Result<Dim, E> {
                Ok(Dim(None))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Dim, E> {
                Ok(Dim(None))
            }
        }

        deserializer.deserialize_any(DimVisitor)
    }
}

/// A size attribute given either as one number or one per axis.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SizeSpec {
    Scalar(u32),
    PerAxis(Vec<u32>),
}

impl SizeSpec {
    fn into_vec(self) -> Vec<u32> {
        match self {
            Self::Scalar(value) => vec![value],
            Self::PerAxis(values) => values,
        }
    }
}

/// A layer as written in a model description.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LayerRecord {
    pub class: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub units: Option<i64>,
    #[serde(default)]
    pub filters: Option<i64>,
    #[serde(default)]
    pub kernel_size: Option<SizeSpec>,
    #[serde(default)]
    pub pool_size: Option<SizeSpec>,
    #[serde(default)]
    pub padding: Option<String>,
    #[serde(default)]
    pub input_dim: Option<i64>,
    #[serde(default)]
    pub output_dim: Option<i64>,
    #[serde(default)]
    pub activation: Option<String>,
    #[serde(default)]
    pub rate: Option<f64>,
    #[serde(default, alias = "batch_shape", alias = "batch_input_shape")]
    pub shape: Option<Vec<Dim>>,
    #[serde(default)]
    pub input_shape: Option<Vec<Dim>>,
    #[serde(default)]
    pub output_shape: Option<Vec<Dim>>,
    /// The wrapped layer of a `Bidirectional` record.
    #[serde(default)]
    pub layer: Option<Box<LayerRecord>>,
}

fn to_shape(dims: Option<Vec<Dim>>) -> Option<TensorShape> {
    dims.map(|dims| TensorShape::new(dims.into_iter().map(|Dim(d)| d).collect()))
}

impl LayerRecord {
    /// Display name: the explicit name, or the class name.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.class)
    }

    /// Classifies this record into a typed descriptor.
    ///
    /// `index` is the position of the record in the model and is only used
    /// for error messages.
    ///
    /// # Errors
    ///
    /// Returns [`DescriptorError::MissingAttribute`] when a count the glyph
    /// needs is absent, [`DescriptorError::NonPositive`] when it is
    /// negative and [`DescriptorError::TooLarge`] when it does not fit in
    /// a `u32`. Zero counts pass through and are rejected by
    /// [`LayerDescriptor::validate`].
    pub fn into_descriptor(self, index: usize) -> Result<LayerDescriptor, DescriptorError> {
        let name = self.display_name().to_string();
        let class = self.class.as_str();

        let count = |attribute: &'static str, value: Option<i64>| match value {
            None => Err(DescriptorError::MissingAttribute {
                index,
                name: name.clone(),
                attribute,
            }),
            Some(v) if v < 0 => Err(DescriptorError::NonPositive {
                index,
                name: name.clone(),
                attribute,
                value: v,
            }),
            Some(v) => u32::try_from(v).map_err(|_| DescriptorError::TooLarge {
                index,
                name: name.clone(),
                attribute,
                value: v,
            }),
        };
        let dim = |value: Option<i64>| value.and_then(|v| u32::try_from(v).ok());
        let sizes = |spec: Option<SizeSpec>| spec.map(SizeSpec::into_vec).unwrap_or_default();

        let kind = if class == "Input" || class == "InputLayer" {
            LayerKind::Input {
                shape: to_shape(self.shape.clone()).or_else(|| to_shape(self.input_shape.clone())),
            }
        } else if class == "Dense" {
            LayerKind::Dense {
                units: count("units", self.units)?,
                activation: self.activation.clone(),
            }
        } else if class == "Flatten" {
            LayerKind::Flatten
        } else if class == "Embedding" {
            LayerKind::Embedding {
                input_dim: dim(self.input_dim),
                output_dim: dim(self.output_dim),
            }
        } else if ACTIVATIONS.contains(&class) {
            LayerKind::Activation {
                activation: if class == "Activation" {
                    self.activation.clone()
                } else {
                    None
                },
            }
        } else if CONVOLUTIONS.contains(&class) {
            LayerKind::Conv {
                filters: count("filters", self.filters)?,
                kernel_size: sizes(self.kernel_size.clone()),
                activation: self.activation.clone(),
            }
        } else if POOLINGS.contains(&class) {
            LayerKind::Pooling {
                pool_size: sizes(self.pool_size.clone()),
                padding: self.padding.clone(),
            }
        } else if RECURRENTS.contains(&class) {
            LayerKind::Recurrent {
                units: count("units", self.units)?,
                activation: self.activation.clone(),
                bidirectional: false,
            }
        } else if class == "Bidirectional" {
            let inner = self.layer.clone().ok_or_else(|| DescriptorError::MissingAttribute {
                index,
                name: name.clone(),
                attribute: "layer",
            })?;
            LayerKind::Bidirectional(Box::new(inner.into_descriptor(index)?))
        } else if CONV_RECURRENTS.contains(&class) {
            LayerKind::ConvRecurrent {
                filters: count("filters", self.filters)?,
                kernel_size: sizes(self.kernel_size.clone()),
                activation: self.activation.clone(),
            }
        } else if DROPOUTS.contains(&class) {
            let rate = self.rate.ok_or_else(|| DescriptorError::MissingAttribute {
                index,
                name: name.clone(),
                attribute: "rate",
            })?;
            LayerKind::Dropout { rate: rate as f32 }
        } else if NORMALIZATIONS.contains(&class) {
            LayerKind::Normalization
        } else {
            LayerKind::Generic {
                class: self.class.clone(),
            }
        };

        let mut descriptor = LayerDescriptor::new(name, kind);
        if let Some(shape) = to_shape(self.input_shape) {
            descriptor = descriptor.with_input_shape(shape);
        }
        if let Some(shape) = to_shape(self.output_shape) {
            descriptor = descriptor.with_output_shape(shape);
        }
        Ok(descriptor)
    }
}

/// The top level of a model description file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ModelFile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub layers: Vec<LayerRecord>,
}

impl ModelFile {
    /// Parses a model description in the given format.
    pub fn parse(source: &str, format: ModelFormat) -> Result<Self, ModelError> {
        match format {
            ModelFormat::Toml => Ok(toml::from_str(source)?),
            ModelFormat::Json => Ok(serde_json::from_str(source)?),
        }
    }

    /// Classifies every record, in order.
    pub fn into_descriptors(self) -> Result<Vec<LayerDescriptor>, ModelError> {
        self.layers
            .into_iter()
            .enumerate()
            .map(|(index, record)| record.into_descriptor(index).map_err(ModelError::from))
            .collect()
    }
}
