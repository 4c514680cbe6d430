use std::{io, path::PathBuf};

use quick_xml::events::attributes::AttrError;
use thiserror::Error;

/// Errors raised while reading a single ResX container.
#[derive(Debug, Error)]
pub enum ResxError {
    #[error("Malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed XML attribute: {0}")]
    Attribute(#[from] AttrError),

    #[error("Resource file is not valid UTF-8")]
    NotUtf8,

    #[error("Resource file is not valid UTF-16")]
    NotUtf16,

    #[error("Not a ResX document (root element is {0:?}, expected \"root\")")]
    NotResx(String),

    #[error("Unsupported resource header {name} = {value:?}")]
    UnsupportedHeader { name: String, value: String },

    #[error("<data> element is missing its name attribute")]
    MissingName,

    #[error("Resource key {0:?} is defined more than once")]
    DuplicateKey(String),

    #[error("Resource {key:?} has unsupported type {type_name:?}")]
    UnsupportedType { key: String, type_name: String },

    #[error("Resource {key:?} has an invalid {kind} value: {details}")]
    InvalidValue {
        key: String,
        kind: &'static str,
        details: String,
    },

    #[error("Resource {key:?} has a malformed file reference {value:?}")]
    InvalidFileRef { key: String, value: String },

    #[error("Unable to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ResxError {
    pub(crate) fn invalid_value(key: &str, kind: &'static str, details: impl ToString) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            kind,
            details: details.to_string(),
        }
    }
}

/// Errors that abort a conversion run.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Unable to derive an output file name from {}", .0.display())]
    InvalidResourcePath(PathBuf),

    #[error("Unable to read resources from {}: {source}", .path.display())]
    Resource {
        path: PathBuf,
        #[source]
        source: ResxError,
    },

    #[error("Unable to serialise {} to JSON: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unable to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
