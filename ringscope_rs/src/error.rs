//! Error types shared by the engine, the upload path and the CLI.

use std::path::PathBuf;

use thiserror::Error;

/// The analysis response could not be turned into an [`crate::types::AnalysisResult`].
#[derive(Debug, Error)]
pub enum PayloadError {
    /// Not JSON, or a required field is missing or mistyped.
    #[error("malformed analysis payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// The request/response cycle with the analysis service failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection, timeout or protocol failure.
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },
    /// The server answered with a non-success status.
    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },
    /// The server has no analysis to hand out yet.
    #[error("no analysis results available on the server")]
    NoResults,
    /// The file to upload could not be read.
    #[error("cannot read {path}: {message}")]
    File { path: PathBuf, message: String },
}

/// The layout engine could not take the styled graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("layout engine rejected the graph: {0}")]
    Rejected(String),
}

/// Reading or writing the theme preference failed.
#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("preference file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("preference file {path} is not a JSON object: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("preference store unavailable: {0}")]
    Unavailable(String),
}

/// Failure while handling a dashboard event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("submit did not issue an upload sequence number")]
    NoUploadIssued,
}
