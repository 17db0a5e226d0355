use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Too many document sources")]
    TooManySources,

    #[error("Unknown option {0}")]
    UnknownOption(String),

    #[error("Option {0} requires a value")]
    MissingValue(String),

    #[error("Option {0} is not supported")]
    UnsupportedOption(String),

    #[error("No document source was provided")]
    NoSource,

    #[error("Unable to resolve document source {0}")]
    InvalidSource(String),

    #[error("Unsupported URL scheme {0}")]
    UnsupportedScheme(String),

    #[error("Unable to fetch document: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Server returned status {status} for {url}")]
    HttpStatus {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Unable to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error parsing service description: {0}")]
    Parse(#[from] wsdlgen_wsdl::error::Error),

    #[error(transparent)]
    Codegen(#[from] wsdlgen_codegen::Error),

    #[error("Unable to write output file {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
