//! Command-line argument definitions for the netsketch CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the model and output files, the
//! configuration file and logging verbosity. The remaining flags override
//! values from the configuration file.

use clap::Parser;

use netsketch::{draw::LabelMode, palette::PaletteName};

/// Command-line arguments for the netsketch diagram tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the model description (.toml or .json)
    #[arg(help = "Path to the input model file")]
    pub input: String,

    /// Path to the output file; the extension selects SVG or PNG
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Color palette
    #[arg(long)]
    pub palette: Option<PaletteName>,

    /// Background color as a CSS color string
    #[arg(long)]
    pub background: Option<String>,

    /// Draw connector lines between consecutive layers
    #[arg(long)]
    pub connectors: bool,

    /// Text printed under each glyph (none, name, properties)
    #[arg(long)]
    pub labels: Option<LabelMode>,

    /// Draw the terminal arrowhead after the last layer
    #[arg(long)]
    pub output_marker: bool,

    /// Leave mismatched layer pairs unconnected instead of failing
    #[arg(long)]
    pub skip_mismatched: bool,

    /// Print a text summary of the layers to stdout
    #[arg(long)]
    pub summary: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["netsketch", "model.toml"]).unwrap();
        assert_eq!(args.input, "model.toml");
        assert_eq!(args.output, "out.svg");
        assert_eq!(args.log_level, "info");
        assert!(args.palette.is_none());
        assert!(!args.connectors);
        assert!(!args.summary);
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "netsketch",
            "model.json",
            "-o",
            "model.png",
            "--palette",
            "green",
            "--labels",
            "properties",
            "--connectors",
            "--output-marker",
            "--skip-mismatched",
        ])
        .unwrap();
        assert_eq!(args.output, "model.png");
        assert_eq!(args.palette, Some(PaletteName::Green));
        assert_eq!(args.labels, Some(LabelMode::Properties));
        assert!(args.connectors);
        assert!(args.output_marker);
        assert!(args.skip_mismatched);
    }

    #[test]
    fn test_unknown_palette_is_rejected() {
        assert!(Args::try_parse_from(["netsketch", "m.toml", "--palette", "teal"]).is_err());
    }
}
