//! Error adapter for converting NetsketchError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Every error gets
//! a stable code; the common ones also get a hint on how to fix them.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use netsketch::{NetsketchError, model::DescriptorError};

/// Adapter for [`NetsketchError`].
pub struct ErrorAdapter<'a>(pub &'a NetsketchError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            NetsketchError::Io(_) => "netsketch::io",
            NetsketchError::EmptyModel => "netsketch::empty_model",
            NetsketchError::Descriptor(_) => "netsketch::descriptor",
            NetsketchError::UnknownPalette(_) => "netsketch::palette",
            NetsketchError::Config(_) => "netsketch::config",
            NetsketchError::Connector(_) => "netsketch::connector",
            NetsketchError::Model(_) => "netsketch::model",
            NetsketchError::Export(_) => "netsketch::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            NetsketchError::EmptyModel => "add at least one [[layers]] entry to the model file",
            NetsketchError::Descriptor(DescriptorError::MissingAttribute { attribute, .. }) => {
                return Some(Box::new(format!("set `{attribute}` on this layer")));
            }
            NetsketchError::Descriptor(DescriptorError::RateOutOfRange { .. }) => {
                "dropout rates must lie between 0 and 1"
            }
            NetsketchError::Connector(_) => {
                "pass --skip-mismatched to leave incompatible layer pairs unconnected"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Convert a [`NetsketchError`] into a list of reportable errors.
pub fn to_reportables(err: &NetsketchError) -> Vec<ErrorAdapter<'_>> {
    vec![ErrorAdapter(err)]
}
