//! PNG export backend.
//!
//! The canvas is first serialized to SVG, then parsed and rasterized with
//! `resvg`. Labels need fonts, so the system font database is loaded once
//! per export.

use log::debug;
use resvg::{
    tiny_skia::{Pixmap, Transform},
    usvg,
};

use netsketch_core::draw::Canvas;

use super::{Error, Exporter};

/// Rasterizes a canvas to PNG at a given scale.
#[derive(Debug, Clone, Copy)]
pub struct PngExporter {
    scale: f32,
}

impl PngExporter {
    /// Creates an exporter; `scale` multiplies the canvas dimensions.
    pub fn new(scale: f32) -> Self {
        Self { scale }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }
}

impl Default for PngExporter {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Exporter for PngExporter {
    fn export(&self, canvas: &Canvas) -> Result<Vec<u8>, Error> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(Error::Render(format!("invalid PNG scale {}", self.scale)));
        }

        let mut opts = usvg::Options::default();
        opts.fontdb_mut().load_system_fonts();

        let svg = canvas.to_svg_string();
        let tree = usvg::Tree::from_str(&svg, &opts)
            .map_err(|err| Error::Render(format!("failed to parse SVG: {err}")))?;

        let width = (tree.size().width() * self.scale).ceil() as u32;
        let height = (tree.size().height() * self.scale).ceil() as u32;
        let mut pixmap = Pixmap::new(width, height)
            .ok_or_else(|| Error::Render(format!("cannot allocate a {width}x{height} pixmap")))?;

        resvg::render(
            &tree,
            Transform::from_scale(self.scale, self.scale),
            &mut pixmap.as_mut(),
        );

        let png = pixmap
            .encode_png()
            .map_err(|err| Error::Render(format!("failed to encode PNG: {err}")))?;
        debug!(width, height, bytes = png.len(); "PNG rendered");
        Ok(png)
    }
}

#[cfg(test)]
mod tests {
    use netsketch_core::color::Color;

    use super::*;

    const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

    #[test]
    fn test_png_export_has_signature() {
        let canvas = Canvas::new(120.0, 320.0, Color::white());
        let bytes = PngExporter::default().export(&canvas).unwrap();
        assert!(bytes.starts_with(PNG_SIGNATURE));
    }

    #[test]
    fn test_png_export_rejects_bad_scale() {
        let canvas = Canvas::new(120.0, 320.0, Color::white());
        assert!(PngExporter::new(0.0).export(&canvas).is_err());
        assert!(PngExporter::new(f32::NAN).export(&canvas).is_err());
    }
}
