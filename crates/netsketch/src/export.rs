//! Export of rendered diagrams.
//!
//! This module provides the [`Exporter`] trait, the final stage of a
//! rendering pass:
//!
//! ```text
//! Model description
//!     ↓ classify
//! Layer descriptors
//!     ↓ compose
//! Canvas (recorded primitives)
//!     ↓ export (this module)
//! Output bytes
//! ```
//!
//! # Available Backends
//!
//! - [`svg::SvgExporter`]: SVG text of exactly the canvas dimensions
//! - [`png::PngExporter`]: PNG raster through `resvg`, using system fonts
//!
//! Writing the bytes to disk is left to the caller.

pub mod png;
pub mod svg;

use std::path::Path;

use thiserror::Error;

use netsketch_core::draw::Canvas;

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// Encodes a canvas in the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the canvas cannot be converted.
    fn export(&self, canvas: &Canvas) -> Result<Vec<u8>, Error>;
}

/// Errors that can occur during diagram export.
#[derive(Debug, Error)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    #[error("Render error: {0}")]
    Render(String),

    #[error("unsupported output format `{0}`, expected .svg or .png")]
    UnsupportedFormat(String),
}

/// Output formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Svg,
    Png,
}

impl ExportFormat {
    /// Picks the format from the extension of `path`.
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        match extension.to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            _ => Err(Error::UnsupportedFormat(extension.to_string())),
        }
    }

    /// Returns the exporter for this format.
    pub fn exporter(self) -> Box<dyn Exporter> {
        match self {
            Self::Svg => Box::new(svg::SvgExporter),
            Self::Png => Box::new(png::PngExporter::default()),
        }
    }
}
