//! CLI logic for the netsketch diagram tool.
//!
//! Reads a model description, applies configuration and command-line
//! overrides, renders the diagram and writes it in the format selected by
//! the output extension.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{fs, path::Path};

use log::info;

use netsketch::{
    DiagramBuilder, NetsketchError,
    export::{ExportFormat, Exporter},
    model::ModelFormat,
    summary::summarize,
};

/// Run the netsketch CLI application
///
/// # Errors
///
/// Returns `NetsketchError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed or invalid model descriptions
/// - Connector mismatches
/// - Export errors
pub fn run(args: &Args) -> Result<(), NetsketchError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing model"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    config::apply_overrides(&mut app_config, args);

    let model_format = ModelFormat::from_path(Path::new(&args.input))?;
    let export_format = ExportFormat::from_path(Path::new(&args.output))?;

    let source = fs::read_to_string(&args.input)?;

    let builder = DiagramBuilder::new(app_config);
    let layers = builder.load_model(&source, model_format)?;

    if args.summary {
        print!("{}", summarize(&layers));
    }

    let diagram = builder.compose(&layers)?;
    let bytes = export_format.exporter().export(diagram.canvas())?;

    fs::write(&args.output, bytes)?;

    info!(output_file = args.output, format:? = export_format; "Diagram exported successfully");

    Ok(())
}
