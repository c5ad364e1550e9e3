use std::time::Duration;

use coeus_logging::{coeus_debug, coeus_info, coeus_warn};
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use url::Url;

use crate::wire::{
    backend_message, CreateUserBody, CreateUserResponse, IngestionResponse, UploadResponse,
};
use crate::{ApiError, FailureKind, IngestionCounts, RegisteredUser, UploadReceipt, UploadRequest};

const API_PREFIX: [&str; 2] = ["api", "v1"];

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: Url,
    pub connect_timeout: Duration,
    /// Applies to registration and upload.
    pub request_timeout: Duration,
    /// Ingestion runs the whole server-side pipeline, so it gets its own budget.
    pub ingest_timeout: Duration,
}

impl ClientSettings {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            ingest_timeout: Duration::from_secs(600),
        }
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::new(
                FailureKind::InvalidUrl,
                format!("{base_url} cannot be used as a base url"),
            ));
        }
        Ok(Self::new(base_url))
    }
}

/// The three backend calls the upload flow depends on.
#[async_trait::async_trait]
pub trait CoeusApi: Send + Sync {
    async fn register(&self, display_name: &str) -> Result<RegisteredUser, ApiError>;

    async fn upload_pdf(&self, request: &UploadRequest) -> Result<UploadReceipt, ApiError>;

    async fn run_ingestion(
        &self,
        job_id: &str,
        user_id: &str,
        user_name: &str,
    ) -> Result<IngestionCounts, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestApi {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestApi {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    /// Builds `{base}/api/v1/{segments...}` with each segment percent-encoded.
    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Result<Url, ApiError> {
        let mut url = self.settings.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                ApiError::new(FailureKind::InvalidUrl, "base url cannot carry a path")
            })?;
            path.pop_if_empty();
            path.extend(API_PREFIX);
            path.extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        fallback: &str,
    ) -> Result<Vec<u8>, ApiError> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        if !status.is_success() {
            let message = backend_message(&body, fallback);
            coeus_warn!("backend answered {}: {}", status, message);
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }
        Ok(body.to_vec())
    }
}

#[async_trait::async_trait]
impl CoeusApi for ReqwestApi {
    async fn register(&self, display_name: &str) -> Result<RegisteredUser, ApiError> {
        // Trailing empty segment keeps the route's trailing slash.
        let url = self.endpoint(&["users", ""], &[])?;
        let body = serde_json::to_vec(&CreateUserBody {
            user_name: display_name,
            user_pdf_name: None,
        })
        .map_err(|err| ApiError::new(FailureKind::MalformedResponse, err.to_string()))?;
        coeus_debug!("POST {}", url);

        let request = self
            .client
            .post(url)
            .timeout(self.settings.request_timeout)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        let bytes = self.send(request, "Failed to connect to Coeus.").await?;
        let parsed: CreateUserResponse = parse_json(&bytes)?;

        let user_id = parsed
            .user
            .and_then(|user| user.id_string())
            .ok_or_else(|| {
                ApiError::new(
                    FailureKind::MalformedResponse,
                    "Registration succeeded but user.id was missing from response.",
                )
            })?;
        coeus_info!("registered user_id={}", user_id);
        Ok(RegisteredUser { user_id })
    }

    async fn upload_pdf(&self, request: &UploadRequest) -> Result<UploadReceipt, ApiError> {
        let bytes = tokio::fs::read(&request.path).await.map_err(|err| {
            ApiError::new(
                FailureKind::UnreadableFile,
                format!("Could not read {}: {err}", request.file_name),
            )
        })?;
        let byte_len = bytes.len();
        let part = Part::bytes(bytes)
            .file_name(request.file_name.clone())
            .mime_str(&request.media_type)
            .map_err(|err| ApiError::new(FailureKind::UnreadableFile, err.to_string()))?;
        let form = Form::new().part("file", part);

        let url = self.endpoint(
            &["ingest", "upload"],
            &[
                ("user_id", request.user_id.as_str()),
                ("user_name", request.user_name.as_str()),
            ],
        )?;
        coeus_debug!("POST {} bytes={}", url, byte_len);

        let http = self
            .client
            .post(url)
            .timeout(self.settings.request_timeout)
            .multipart(form);
        let body = self.send(http, "Failed to upload. Check your server.").await?;
        let parsed: UploadResponse = parse_json(&body)?;

        let job_id = parsed
            .job_id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                ApiError::new(
                    FailureKind::MalformedResponse,
                    "Upload succeeded but job_id was missing from response.",
                )
            })?;
        coeus_info!(
            "uploaded file={} bytes={} job_id={}",
            request.file_name,
            byte_len,
            job_id
        );
        Ok(UploadReceipt {
            job_id,
            file_name: parsed.filename,
        })
    }

    async fn run_ingestion(
        &self,
        job_id: &str,
        user_id: &str,
        user_name: &str,
    ) -> Result<IngestionCounts, ApiError> {
        let url = self.endpoint(
            &["ingest", job_id, "run"],
            &[("user_id", user_id), ("user_name", user_name)],
        )?;
        coeus_debug!("POST {}", url);

        let request = self
            .client
            .post(url)
            .timeout(self.settings.ingest_timeout);
        let body = self.send(request, "Ingestion failed.").await?;
        let parsed: IngestionResponse = parse_json(&body)?;

        let counts = IngestionCounts {
            vectors_stored: parsed.vectors_stored.unwrap_or(0),
            docs_indexed: parsed.docs_indexed.unwrap_or(0),
        };
        coeus_info!(
            "ingested job_id={} vectors_stored={} docs_indexed={}",
            job_id,
            counts.vectors_stored,
            counts.docs_indexed
        );
        Ok(counts)
    }
}

fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|err| {
        ApiError::new(
            FailureKind::MalformedResponse,
            format!("Unexpected response from server: {err}"),
        )
    })
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, "The server took too long to answer.");
    }
    ApiError::new(FailureKind::Network, format!("Server connection failed: {err}"))
}
