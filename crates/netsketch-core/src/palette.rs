//! Named four-color palettes.
//!
//! A [`Palette`] is the theme applied uniformly to every glyph of one
//! rendering pass. Palettes are looked up by [`PaletteName`]; parsing an
//! unknown name fails with [`PaletteError::Unknown`].
//!
//! # Example
//!
//! ```
//! # use netsketch_core::palette::{Palette, PaletteName};
//! let palette = Palette::named(PaletteName::Blue).unwrap();
//! assert_ne!(palette.main(), palette.secondary());
//!
//! let name: PaletteName = "green".parse().unwrap();
//! assert_eq!(name, PaletteName::Green);
//! assert!("teal".parse::<PaletteName>().is_err());
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::color::Color;

/// Errors raised while selecting a palette.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    #[error("unknown palette `{name}`, valid palettes: {valid}")]
    Unknown { name: String, valid: String },

    #[error("palette `{name}` has an invalid color: {reason}")]
    InvalidColor { name: &'static str, reason: String },
}

/// The fixed set of palette names.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaletteName {
    #[default]
    Default,
    Brown,
    Blue,
    Gray,
    Red,
    Green,
    Yellow,
    Purple,
}

/// `(name, main, secondary, regular, drop)`
const PALETTE_TABLE: &[(PaletteName, &str, &str, &str, &str)] = &[
    (PaletteName::Default, "#adb5bd", "#ced4da", "#dee2e6", "#495057"),
    (PaletteName::Brown, "#ddb892", "#b08968", "#e6ccb2", "#7f5539"),
    (PaletteName::Blue, "#1965a0", "#2476b1", "#4893c6", "#003a70"),
    (PaletteName::Gray, "#495057", "#adb5bd", "#dee2e6", "#212529"),
    (PaletteName::Red, "#cd0000", "#ef2b2b", "#e56b6b", "#aa0000"),
    (PaletteName::Green, "#97a97c", "#87a08b", "#d2d6a8", "#3a5335"),
    (PaletteName::Yellow, "#ffcf33", "#ffd95c", "#ffe285", "#ffc60a"),
    (PaletteName::Purple, "#3e2248", "#5b3f64", "#775c7f", "#22052d"),
];

impl PaletteName {
    /// All palette names, in table order.
    pub const ALL: [PaletteName; 8] = [
        Self::Default,
        Self::Brown,
        Self::Blue,
        Self::Gray,
        Self::Red,
        Self::Green,
        Self::Yellow,
        Self::Purple,
    ];

    /// Returns the lowercase name used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Brown => "brown",
            Self::Blue => "blue",
            Self::Gray => "gray",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Purple => "purple",
        }
    }

    fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(|name| name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for PaletteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaletteName {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| PaletteError::Unknown {
                name: s.to_string(),
                valid: Self::valid_names(),
            })
    }
}

impl<'de> Deserialize<'de> for PaletteName {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// An immutable four-color theme.
///
/// - `main`: primary glyph fill
/// - `secondary`: alternating fill for stacked glyphs
/// - `regular`: fill for generic and regularization glyphs
/// - `drop`: accent for dropped units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    name: PaletteName,
    main: Color,
    secondary: Color,
    regular: Color,
    drop: Color,
}

impl Palette {
    /// Looks up the palette with the given name.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::InvalidColor`] if a table entry fails to parse.
    pub fn named(name: PaletteName) -> Result<Self, PaletteError> {
        let &(_, main, secondary, regular, drop) = PALETTE_TABLE
            .iter()
            .find(|entry| entry.0 == name)
            .ok_or_else(|| PaletteError::Unknown {
                name: name.to_string(),
                valid: PaletteName::valid_names(),
            })?;

        let parse = |value: &str| {
            Color::new(value).map_err(|reason| PaletteError::InvalidColor {
                name: name.as_str(),
                reason,
            })
        };

        Ok(Self {
            name,
            main: parse(main)?,
            secondary: parse(secondary)?,
            regular: parse(regular)?,
            drop: parse(drop)?,
        })
    }

    /// Parses `name` and looks up the palette.
    pub fn from_name(name: &str) -> Result<Self, PaletteError> {
        Self::named(name.parse()?)
    }

    pub fn name(&self) -> PaletteName {
        self.name
    }

    pub fn main(&self) -> Color {
        self.main
    }

    pub fn secondary(&self) -> Color {
        self.secondary
    }

    pub fn regular(&self) -> Color {
        self.regular
    }

    pub fn drop(&self) -> Color {
        self.drop
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::named(PaletteName::Default).expect("default palette colors are valid")
    }
}
