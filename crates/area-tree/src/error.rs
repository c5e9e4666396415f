//! Error type shared by the loader, exporters and area-list reader.

use thiserror::Error;

/// Errors produced while loading coordinates, reading area lists or
/// writing partition output.
#[derive(Debug, Error)]
pub enum AreaError {
    /// The document is not well-formed XML.
    #[error("xml syntax error: {0}")]
    Xml(#[from] roxmltree::Error),

    /// The root element has no `dimensions` attribute.
    #[error("root element <{element}> has no dimensions attribute")]
    MissingDimensions { element: String },

    /// A dimension count of zero was declared or requested.
    #[error("dimension count must be greater than zero")]
    ZeroDimensions,

    /// A coordinate does not have the expected number of components.
    #[error("node {index} has {found} coordinates, expected {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    /// A coordinate is NaN or infinite.
    #[error("node {index} has a non-finite coordinate in dimension {dim}")]
    NonFiniteCoordinate { index: usize, dim: usize },

    /// A point lies outside the `[-field_size, field_size]` root box.
    #[error("node {index} lies outside the field of half extent {field_size}")]
    PointOutsideField { index: usize, field_size: f64 },

    /// A numeric field could not be parsed.
    #[error("invalid number '{text}' in {context}")]
    InvalidNumber { context: String, text: String },

    /// An `<area>` element is missing a bound or its prefix.
    #[error("area {index} is malformed: {reason}")]
    MalformedArea { index: usize, reason: String },

    /// The partition configuration cannot be used.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Plot output exists only for 2D and 3D partitions.
    #[error("plot output is only available for 2 or 3 dimensions, got {0}")]
    UnsupportedPlotDimensions(usize),

    /// Reading or writing failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AreaError>;
