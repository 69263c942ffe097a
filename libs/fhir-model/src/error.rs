//! Error types for the FHIR model
//!
//! Every variant describes a caller defect detected synchronously while a node is
//! being built. None of them is transient, so none of them is worth retrying.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Missing required element: '{0}'")]
    MissingRequiredField(String),

    #[error("Required repeating element: '{0}' must contain at least one value")]
    EmptyRequiredSequence(String),

    #[error("Invalid type: {supplied} for choice element: '{field}' must be one of: [{}]", .allowed.join(", "))]
    InvalidChoiceType {
        field: String,
        supplied: String,
        allowed: Vec<String>,
    },

    #[error("Invalid containment: {0}")]
    InvalidContainment(String),

    #[error("Invalid type: {supplied} for element: '{field}' must be: {expected}")]
    InvalidElementType {
        field: String,
        supplied: String,
        expected: String,
    },

    #[error("Element: '{element}' is not defined on type: {type_name}")]
    UnknownElement { type_name: String, element: String },

    #[error("Unknown type: {0}")]
    UnknownType(String),

    #[error("Type: {0} is abstract and cannot be instantiated")]
    AbstractType(String),

    #[error("Cardinality mismatch for element: '{field}': {message}")]
    CardinalityMismatch { field: String, message: String },

    #[error("Invalid {type_name} value: {message}")]
    InvalidValue { type_name: String, message: String },

    #[error("Invalid reference for element: '{field}': {message}")]
    InvalidReferenceType { field: String, message: String },

    #[error("ele-1: All FHIR elements must have a @value or children ({0})")]
    EmptyElement(String),

    #[error("Unrecognized modifier extension: '{url}' at {path}")]
    UnrecognizedModifierExtension { path: String, url: String },

    #[error("Invalid schema: {0}")]
    Schema(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl Error {
    /// Name of the element the error is about, when there is one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Error::MissingRequiredField(field) | Error::EmptyRequiredSequence(field) => {
                Some(field)
            }
            Error::InvalidChoiceType { field, .. }
            | Error::InvalidElementType { field, .. }
            | Error::CardinalityMismatch { field, .. }
            | Error::InvalidReferenceType { field, .. } => Some(field),
            Error::UnknownElement { element, .. } => Some(element),
            _ => None,
        }
    }
}
