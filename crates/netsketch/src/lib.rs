//! Netsketch - layer diagrams for sequential neural-network models.
//!
//! A model is an ordered list of layers. Each layer is drawn as a glyph
//! chosen by its kind, left to right, optionally joined by connector lines
//! and labelled with its name or attributes. The result is exported as SVG
//! or PNG.

pub mod config;
pub mod export;
pub mod layout;
pub mod model;
pub mod summary;

mod compose;
mod error;

pub use netsketch_core::{color, draw, geometry, palette};

pub use compose::{Diagram, DiagramComposer, INPUT_START_X, Placement, RenderOptions, Stage};
pub use error::NetsketchError;

use log::{debug, info, trace};

use config::AppConfig;
use export::{Exporter, png::PngExporter, svg::SvgExporter};
use model::{LayerDescriptor, ModelFile, ModelFormat};

/// Builder for loading and rendering layer diagrams.
///
/// # Examples
///
/// ```rust
/// use netsketch::{DiagramBuilder, config::AppConfig, model::ModelFormat};
///
/// let source = r#"
///     [[layers]]
///     class = "InputLayer"
///     shape = [28, 28, 1]
///
///     [[layers]]
///     class = "Dense"
///     units = 64
/// "#;
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let layers = builder.load_model(source, ModelFormat::Toml).unwrap();
/// let svg = builder.render_svg(&layers).unwrap();
/// assert!(svg.starts_with("<svg"));
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parses a model description and classifies its layers.
    ///
    /// # Errors
    ///
    /// Returns [`NetsketchError::Model`] for malformed input and
    /// [`NetsketchError::Descriptor`] for a record that cannot be classified.
    pub fn load_model(
        &self,
        source: &str,
        format: ModelFormat,
    ) -> Result<Vec<LayerDescriptor>, NetsketchError> {
        info!(format:?; "Loading model description");

        let model = ModelFile::parse(source, format)?;
        let name = model.name.clone();
        let layers = model.into_descriptors()?;

        debug!(name:?, layers = layers.len(); "Model loaded");
        trace!(layers:?; "Layer descriptors");
        Ok(layers)
    }

    /// Runs one rendering pass over `layers`.
    ///
    /// # Errors
    ///
    /// Returns [`NetsketchError`] for invalid configuration, an empty or
    /// invalid layer sequence, or a connector mismatch under the failing
    /// policy.
    pub fn compose(&self, layers: &[LayerDescriptor]) -> Result<Diagram, NetsketchError> {
        let options = RenderOptions::from_config(&self.config)?;
        info!(
            palette:% = options.palette().name(),
            labels:% = options.labels();
            "Rendering diagram"
        );
        DiagramComposer::new(options).compose(layers)
    }

    /// Renders `layers` to an SVG string.
    ///
    /// # Errors
    ///
    /// See [`DiagramBuilder::compose`].
    pub fn render_svg(&self, layers: &[LayerDescriptor]) -> Result<String, NetsketchError> {
        let diagram = self.compose(layers)?;
        let svg = SvgExporter.render(diagram.canvas());
        info!("SVG rendered successfully");
        Ok(svg)
    }

    /// Renders `layers` to PNG bytes.
    ///
    /// # Errors
    ///
    /// See [`DiagramBuilder::compose`]; rasterization failures are returned
    /// as [`NetsketchError::Export`].
    pub fn render_png(&self, layers: &[LayerDescriptor]) -> Result<Vec<u8>, NetsketchError> {
        let diagram = self.compose(layers)?;
        let png = PngExporter::default().export(diagram.canvas())?;
        info!(bytes = png.len(); "PNG rendered successfully");
        Ok(png)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_builder_is_send_sync() {
        assert_send_sync::<DiagramBuilder>();
        assert_send_sync::<Diagram>();
    }
}
