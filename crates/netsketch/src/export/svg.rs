//! SVG export backend.

use log::debug;

use netsketch_core::draw::Canvas;

use super::{Error, Exporter};

/// Serializes the recorded canvas as an SVG document.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgExporter;

impl SvgExporter {
    /// Returns the SVG text of `canvas`.
    pub fn render(&self, canvas: &Canvas) -> String {
        let svg = canvas.to_svg_string();
        debug!(bytes = svg.len(); "SVG document rendered");
        svg
    }
}

impl Exporter for SvgExporter {
    fn export(&self, canvas: &Canvas) -> Result<Vec<u8>, Error> {
        let mut bytes = Vec::new();
        svg::write(&mut bytes, &canvas.to_svg_document())
            .map_err(|err| Error::Render(format!("failed to write SVG: {err}")))?;
        debug!(bytes = bytes.len(); "SVG document written");
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use netsketch_core::color::Color;

    use super::*;

    #[test]
    fn test_svg_export_is_utf8_document() {
        let canvas = Canvas::new(120.0, 320.0, Color::white());
        let bytes = SvgExporter.export(&canvas).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("<svg"));
        assert!(text.contains("viewBox=\"0 0 120 320\""));
    }
}
