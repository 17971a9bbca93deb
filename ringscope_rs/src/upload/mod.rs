//! Upload orchestration.
//!
//! [`AnalysisTransport`] is the network seam: it sends one CSV file and
//! returns the raw response body. The orchestrator drives the dashboard
//! around it (loader on, request, decode, store, render, settle).

use std::future::Future;
use std::path::Path;

use crate::error::TransportError;

#[cfg(feature = "client")]
mod http;
#[cfg(feature = "client")]
mod orchestrator;

#[cfg(feature = "client")]
pub use http::HttpTransport;
#[cfg(feature = "client")]
pub use orchestrator::{SubmitReport, UploadOrchestrator, run_settle_timers};

/// One file queued for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, TransportError> {
        let bytes = std::fs::read(path).map_err(|e| TransportError::File {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.csv".to_string());
        Ok(Self { file_name, bytes })
    }
}

/// Sends a file to the analysis service.
pub trait AnalysisTransport: Send + Sync {
    /// Response body of a successful exchange.
    fn upload(&self, file: &UploadFile) -> impl Future<Output = Result<String, TransportError>> + Send;
}
