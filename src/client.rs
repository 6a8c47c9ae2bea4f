/// HTTP client for the scene analysis service
///
/// One call, one POST: the image goes up as a multipart form and the
/// interpretation comes back as JSON.
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::config::AnalyzerConfig;
use crate::state::data::AnalysisResult;
use crate::state::selection::SelectedImage;

/// Errors from an analyze call.
///
/// These cross the UI message boundary, so they carry rendered text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AnalyzeError {
    #[error("could not read upload: {0}")]
    ReadFile(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("service error (status {status}): {message}")]
    Status { status: u16, message: String },

    #[error("malformed response: {0}")]
    Shape(String),
}

/// Everything needed to upload one selection, detached from the preview
#[derive(Debug, Clone)]
pub struct Upload {
    pub path: PathBuf,
    pub file_name: String,
    pub mime: &'static str,
}

impl From<&SelectedImage> for Upload {
    fn from(selected: &SelectedImage) -> Self {
        Self {
            path: selected.path.clone(),
            file_name: selected.file_name.clone(),
            mime: selected.mime,
        }
    }
}

/// Error body the service sends alongside a 500
#[derive(Debug, Deserialize)]
struct ServiceError {
    message: String,
}

#[derive(Debug, Clone)]
pub struct AnalysisClient {
    http: Client,
    endpoint: String,
    field_name: &'static str,
}

impl AnalysisClient {
    pub fn new(config: &AnalyzerConfig) -> Self {
        Self {
            http: Client::new(),
            endpoint: config.endpoint(),
            field_name: config.field_name,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Upload the image and parse the interpretation.
    pub async fn analyze(&self, upload: Upload) -> Result<AnalysisResult, AnalyzeError> {
        let bytes = tokio::fs::read(&upload.path)
            .await
            .map_err(|e| AnalyzeError::ReadFile(e.to_string()))?;

        tracing::info!(
            "📤 Uploading {} ({} bytes) to {}",
            upload.file_name,
            bytes.len(),
            self.endpoint
        );

        let part = Part::bytes(bytes)
            .file_name(upload.file_name)
            .mime_str(upload.mime)
            .map_err(|e| AnalyzeError::Transport(e.to_string()))?;
        let form = Form::new().part(self.field_name, part);

        let response = self
            .http
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AnalyzeError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AnalyzeError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ServiceError>(&body)
                .map(|e| e.message)
                .unwrap_or_else(|_| body.chars().take(200).collect());
            return Err(AnalyzeError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let result: AnalysisResult =
            serde_json::from_str(&body).map_err(|e| AnalyzeError::Shape(e.to_string()))?;

        tracing::info!(
            "📥 Scene '{}' with {} objects, {} relations",
            result.scene_type,
            result.object_count,
            result.spatial_data.len()
        );

        Ok(result)
    }
}

/// Minimal HTTP server for exercising the client, shared with the app tests
#[cfg(test)]
pub(crate) mod mock {
    use std::net::SocketAddr;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one canned response and hand back the raw request
    pub async fn serve_once(status: &'static str, body: String) -> (SocketAddr, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let request = read_request(&mut stream).await;

            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
            request
        });

        (addr, handle)
    }

    /// An address nothing listens on
    pub async fn closed_addr() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        addr
    }

    async fn read_request(stream: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        loop {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    });

                match content_length {
                    Some(len) if buf.len() >= header_end + 4 + len => break,
                    None if text.ends_with("--\r\n") || text.ends_with("\r\n0\r\n\r\n") => break,
                    _ => {}
                }
            }
        }

        String::from_utf8_lossy(&buf).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const KITCHEN: &str = r#"{"status":"success","scene_type":"kitchen","object_count":3,"narrative":"A kitchen scene.","spatial_data":["cup is on table"],"image_data":"data:image/jpeg;base64,aGVsbG8="}"#;

    fn upload_in(dir: &Path) -> Upload {
        let path = dir.join("photo.jpg");
        std::fs::write(&path, b"jpeg bytes").unwrap();
        Upload {
            path,
            file_name: "photo.jpg".to_string(),
            mime: "image/jpeg",
        }
    }

    fn client_for(addr: std::net::SocketAddr) -> AnalysisClient {
        AnalysisClient::new(&AnalyzerConfig::with_base_url(format!("http://{addr}")))
    }

    #[test]
    fn test_client_endpoint() {
        let client = AnalysisClient::new(&AnalyzerConfig::default());
        assert_eq!(client.endpoint(), "http://127.0.0.1:8000/analyze");
    }

    #[tokio::test]
    async fn test_analyze_success() {
        let dir = tempfile::tempdir().unwrap();
        let (addr, server) = mock::serve_once("200 OK", KITCHEN.to_string()).await;

        let result = client_for(addr).analyze(upload_in(dir.path())).await.unwrap();
        assert_eq!(result.scene_type, "kitchen");
        assert_eq!(result.object_count, 3);
        assert_eq!(result.narrative, "A kitchen scene.");

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /analyze HTTP/1.1"));
        assert!(request.contains("multipart/form-data"));
        assert!(request.contains("name=\"file\""));
        assert!(request.contains("filename=\"photo.jpg\""));
        assert!(request.contains("jpeg bytes"));
    }

    #[tokio::test]
    async fn test_server_error_carries_message() {
        let dir = tempfile::tempdir().unwrap();
        let body = r#"{"status":"error","message":"model not loaded"}"#.to_string();
        let (addr, _server) = mock::serve_once("500 Internal Server Error", body).await;

        let err = client_for(addr).analyze(upload_in(dir.path())).await.unwrap_err();
        assert_eq!(
            err,
            AnalyzeError::Status {
                status: 500,
                message: "model not loaded".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_wrong_shape_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (addr, _server) = mock::serve_once("200 OK", r#"{"scene_type":"kitchen"}"#.to_string()).await;

        let err = client_for(addr).analyze(upload_in(dir.path())).await.unwrap_err();
        assert!(matches!(err, AnalyzeError::Shape(_)));
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        let dir = tempfile::tempdir().unwrap();
        let addr = mock::closed_addr().await;

        let err = client_for(addr).analyze(upload_in(dir.path())).await.unwrap_err();
        assert!(matches!(err, AnalyzeError::Transport(_)));
    }

    #[tokio::test]
    async fn test_missing_upload_file() {
        let upload = Upload {
            path: PathBuf::from("/nonexistent/photo.jpg"),
            file_name: "photo.jpg".to_string(),
            mime: "image/jpeg",
        };
        let client = AnalysisClient::new(&AnalyzerConfig::default());

        let err = client.analyze(upload).await.unwrap_err();
        assert!(matches!(err, AnalyzeError::ReadFile(_)));
    }
}
