//! Configuration types for netsketch rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file; every field has a default, so an empty file is a valid
//! configuration.
//!
//! - [`AppConfig`] - Top-level configuration combining style and display settings.
//! - [`StyleConfig`] - Background color and palette.
//! - [`DisplayConfig`] - Labels, connectors and the output marker.
//!
//! # Example
//!
//! ```
//! # use netsketch::config::AppConfig;
//! let config: AppConfig = toml::from_str(r##"
//!     [style]
//!     background_color = "#fafafa"
//!     palette = "blue"
//!
//!     [display]
//!     show_connectors = true
//!     labels = "name"
//! "##).unwrap();
//!
//! assert!(config.display().show_connectors());
//! assert!(config.style().background_color().unwrap().is_some());
//! ```

use serde::Deserialize;

use netsketch_core::{
    color::Color,
    draw::{LabelMode, StrokeStyle},
    palette::{Palette, PaletteError, PaletteName},
};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,

    /// Display configuration section.
    #[serde(default)]
    display: DisplayConfig,
}

impl AppConfig {
    pub fn new(style: StyleConfig, display: DisplayConfig) -> Self {
        Self { style, display }
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut StyleConfig {
        &mut self.style
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut DisplayConfig {
        &mut self.display
    }
}

/// Visual styling configuration.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background [`Color`] as a CSS color string; white when unset.
    #[serde(default)]
    background_color: Option<String>,

    /// Palette applied to every glyph.
    #[serde(default)]
    palette: PaletteName,
}

impl StyleConfig {
    pub fn new(background_color: Option<String>, palette: PaletteName) -> Self {
        Self {
            background_color,
            palette,
        }
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    pub fn set_background_color(&mut self, color: impl Into<String>) {
        self.background_color = Some(color.into());
    }

    pub fn palette_name(&self) -> PaletteName {
        self.palette
    }

    pub fn set_palette_name(&mut self, palette: PaletteName) {
        self.palette = palette;
    }

    /// Resolves the configured palette.
    pub fn palette(&self) -> Result<Palette, PaletteError> {
        Palette::named(self.palette)
    }
}

/// What happens when two consecutive glyphs expose different anchor counts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MismatchPolicy {
    /// Abort the rendering pass with a connector error.
    #[default]
    Fail,
    /// Log a warning and leave that pair unconnected.
    Skip,
}

/// Annotation and connector settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    show_connectors: bool,

    #[serde(default)]
    labels: LabelMode,

    /// Draw the terminal arrowhead after the last glyph. Only takes effect
    /// together with `show_connectors`.
    #[serde(default)]
    output_marker: bool,

    #[serde(default)]
    connector_mismatch: MismatchPolicy,

    /// Line style of connectors: `solid`, `dashed` or `dotted`.
    #[serde(default)]
    connector_style: Option<String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_connectors: false,
            labels: LabelMode::None,
            output_marker: false,
            connector_mismatch: MismatchPolicy::Fail,
            connector_style: None,
        }
    }
}

impl DisplayConfig {
    pub fn show_connectors(&self) -> bool {
        self.show_connectors
    }

    pub fn set_show_connectors(&mut self, show: bool) {
        self.show_connectors = show;
    }

    pub fn labels(&self) -> LabelMode {
        self.labels
    }

    pub fn set_labels(&mut self, labels: LabelMode) {
        self.labels = labels;
    }

    pub fn output_marker(&self) -> bool {
        self.output_marker
    }

    pub fn set_output_marker(&mut self, marker: bool) {
        self.output_marker = marker;
    }

    pub fn connector_mismatch(&self) -> MismatchPolicy {
        self.connector_mismatch
    }

    pub fn set_connector_mismatch(&mut self, policy: MismatchPolicy) {
        self.connector_mismatch = policy;
    }

    /// Returns the parsed connector [`StrokeStyle`], solid when unset.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown style name.
    pub fn connector_style(&self) -> Result<StrokeStyle, String> {
        self.connector_style
            .as_deref()
            .map(str::parse::<StrokeStyle>)
            .transpose()
            .map(Option::unwrap_or_default)
    }
}
