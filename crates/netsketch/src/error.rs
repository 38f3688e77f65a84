//! Error types for netsketch operations.
//!
//! [`NetsketchError`] is the single error type at the library boundary. It
//! wraps the narrower errors raised by the layer model, the connector
//! router, palette lookup and export.

use std::io;

use thiserror::Error;

use netsketch_core::{draw::ConnectorError, palette::PaletteError};

use crate::model::{DescriptorError, ModelError};

/// The main error type for netsketch operations.
#[derive(Debug, Error)]
pub enum NetsketchError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("nothing to render: the model has no layers")]
    EmptyModel,

    #[error("Invalid layer: {0}")]
    Descriptor(#[from] DescriptorError),

    #[error("{0}")]
    UnknownPalette(#[from] PaletteError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Connector error: {0}")]
    Connector(#[from] ConnectorError),

    #[error("Model description error: {0}")]
    Model(ModelError),

    #[error("Export error: {0}")]
    Export(#[from] crate::export::Error),
}

impl From<ModelError> for NetsketchError {
    fn from(error: ModelError) -> Self {
        match error {
            ModelError::Descriptor(err) => Self::Descriptor(err),
            other => Self::Model(other),
        }
    }
}
