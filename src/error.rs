//! The [`KaryopypeError`] `enum` definition and error messages.
//!
use crate::file::FileError;
use crate::Position;
use genomap::GenomeMapError;
use std::convert::Infallible;
use std::io;
use thiserror::Error;

/// The standard set of errors passed back to the user.
#[derive(Error, Debug)]
pub enum KaryopypeError {
    // Input shape errors
    #[error("Invalid input: {0}")]
    InvalidInputKind(String),
    #[error("Species '{0}' not yet supported, please provide a chromosome sizes file")]
    UnknownSpecies(String),

    // IO and parsing errors
    #[error("IO error: {0}")]
    IOError(#[from] io::Error),
    #[error("File reading error: {0}")]
    FileError(#[from] FileError),
    #[error("Table parsing error: {0}")]
    TableParsingError(#[from] csv::Error),
    #[error("Failed to parse a column: {0}")]
    ParseError(String),
    #[error("Region table has too few columns. The first three columns must be chromosome name, and start and end positions.\nRow: {0}")]
    TooFewColumns(String),
    #[error("Chromosome sizes table is invalid: {0}")]
    InvalidSizesTable(String),

    // Region errors
    #[error("Region invalid: start ({1}) must not be greater than end ({2}) on {0}")]
    InvalidInterval(String, Position, Position),
    #[error("GenomeMap Error: error updating GenomeMap")]
    GenomeMapError(#[from] GenomeMapError),

    // Rendering errors
    #[error("Invalid color '{0}'")]
    InvalidColor(String),
    #[error("Invalid track geometry: {0}")]
    InvalidGeometry(String),
    #[error("Unsupported image format for '{0}' (expected .png or .svg)")]
    UnsupportedImageFormat(String),
    #[error("Plotting error: {0}")]
    PlotError(String),
}

impl From<Infallible> for KaryopypeError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}
