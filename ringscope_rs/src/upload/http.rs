//! reqwest-backed transport for the analysis service.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

use super::{AnalysisTransport, UploadFile};
use crate::config::ServerConfig;
use crate::error::TransportError;

/// Body the service sends from the download endpoint when nothing was analyzed yet.
const NO_DATA_BODY: &str = "No data available";

/// Multipart field the service reads the CSV from.
const FILE_FIELD: &str = "file";

#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    upload_url: String,
    download_url: String,
}

impl HttpTransport {
    pub fn new(
        upload_url: impl Into<String>,
        download_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let upload_url = upload_url.into();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| request_error(&upload_url, &e))?;
        Ok(Self {
            client,
            upload_url,
            download_url: download_url.into(),
        })
    }

    pub fn from_config(server: &ServerConfig) -> Result<Self, TransportError> {
        Self::new(server.upload_url(), server.download_url(), server.timeout())
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }

    /// Fetch the last analysis as JSON text.
    pub async fn download(&self) -> Result<String, TransportError> {
        let url = self.download_url.clone();
        debug!(%url, "downloading analysis");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| request_error(&url, &e))?;
        let body = read_body(&url, response).await?;
        if body.trim() == NO_DATA_BODY {
            return Err(TransportError::NoResults);
        }
        Ok(body)
    }
}

impl AnalysisTransport for HttpTransport {
    fn upload(
        &self,
        file: &UploadFile,
    ) -> impl Future<Output = Result<String, TransportError>> + Send {
        let client = self.client.clone();
        let url = self.upload_url.clone();
        let file_name = file.file_name.clone();
        let bytes = file.bytes.clone();

        async move {
            let part = Part::bytes(bytes)
                .file_name(file_name.clone())
                .mime_str("text/csv")
                .map_err(|e| request_error(&url, &e))?;
            let form = Form::new().part(FILE_FIELD, part);

            info!(%url, file = %file_name, "uploading transactions");
            let response = client
                .post(&url)
                .multipart(form)
                .send()
                .await
                .map_err(|e| request_error(&url, &e))?;
            read_body(&url, response).await
        }
    }
}

async fn read_body(url: &str, response: reqwest::Response) -> Result<String, TransportError> {
    let status = response.status();
    if !status.is_success() {
        return Err(TransportError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    response.text().await.map_err(|e| request_error(url, &e))
}

fn request_error(url: &str, err: &reqwest::Error) -> TransportError {
    TransportError::Request {
        url: url.to_string(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_from_config() {
        let transport = HttpTransport::from_config(&ServerConfig::default()).expect("client");
        assert_eq!(transport.upload_url(), "http://127.0.0.1:5000/upload");
    }

    #[tokio::test]
    async fn unreachable_server_is_request_error() {
        // Port 9 (discard) is essentially never listening on loopback
        let transport = HttpTransport::new(
            "http://127.0.0.1:9/upload",
            "http://127.0.0.1:9/download",
            Duration::from_secs(2),
        )
        .expect("client");
        let err = transport
            .upload(&UploadFile::new("t.csv", b"a,b\n".to_vec()))
            .await
            .expect_err("nothing listens");
        assert!(matches!(err, TransportError::Request { .. }));
    }
}
