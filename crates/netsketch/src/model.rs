//! The layer model a diagram is drawn from.
//!
//! - [`LayerDescriptor`] / [`LayerKind`]: one typed layer, carrying only the
//!   attributes its kind needs.
//! - [`KindTag`]: the fieldless tag used for width estimation.
//! - [`TensorShape`]: a shape whose dimensions may be unknown.
//! - [`LayerRecord`] / [`ModelFile`]: the loosely typed form found in model
//!   description files, classified into descriptors by class name.

mod descriptor;
mod record;

pub use descriptor::{DescriptorError, KindTag, LayerDescriptor, LayerKind, TensorShape};
pub use record::{Dim, LayerRecord, ModelError, ModelFile, ModelFormat, SizeSpec};
