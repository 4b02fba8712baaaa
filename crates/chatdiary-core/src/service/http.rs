//! reqwest-backed diary service client.

use reqwest::{multipart, Client, Request, Response};

use super::{DiaryService, ROUTE_DIARIES, ROUTE_DIARY, ROUTE_GENERATED_LIST, ROUTE_IMAGE};
use crate::config::ClientConfig;
use crate::models::{decode_envelope, DiaryEntry, DiarySummary};
use crate::upload::ImageUpload;
use crate::util::{compact_text, normalize_base_url};
use crate::{Error, Result};

/// HTTP client for the diary service.
#[derive(Debug, Clone)]
pub struct HttpDiaryService {
    base_url: String,
    client: Client,
}

impl HttpDiaryService {
    /// Builds a client from resolved configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Self::with_client(&config.api_base_url, config.build_http_client()?)
    }

    /// Builds a client for an explicit base URL around an existing reqwest client.
    pub fn with_client(base_url: &str, client: Client) -> Result<Self> {
        let base_url = normalize_base_url(base_url).map_err(Error::Config)?;
        Ok(Self { base_url, client })
    }

    /// Returns the normalized base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, route: &str) -> String {
        format!("{}{}", self.base_url, route)
    }

    fn build_list_request(&self) -> Result<Request> {
        Ok(self
            .client
            .get(self.endpoint(ROUTE_DIARIES))
            .header(reqwest::header::ACCEPT, "application/json")
            .build()?)
    }

    fn build_create_request(&self, entry: &DiaryEntry) -> Result<Request> {
        Ok(self
            .client
            .post(self.endpoint(ROUTE_DIARY))
            .json(entry)
            .build()?)
    }

    fn build_upload_request(&self, upload: ImageUpload) -> Result<Request> {
        let mut form = multipart::Form::new()
            .text("type", upload.kind.as_str())
            .text("position", upload.position)
            .text("content", upload.content);

        for image in upload.images {
            let part = multipart::Part::bytes(image.bytes)
                .file_name(image.file_name)
                .mime_str(&image.mime_type)?;
            form = form.part("image", part);
        }

        Ok(self
            .client
            .post(self.endpoint(ROUTE_IMAGE))
            .multipart(form)
            .build()?)
    }

    fn build_summaries_request(&self, count: i64) -> Result<Request> {
        Ok(self
            .client
            .get(self.endpoint(ROUTE_GENERATED_LIST))
            .query(&[("number", count)])
            .header(reqwest::header::ACCEPT, "application/json")
            .build()?)
    }

    async fn execute(&self, request: Request) -> Result<Response> {
        tracing::debug!("{} {}", request.method(), request.url());
        let response = self.client.execute(request).await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status,
                body: compact_text(&body),
            });
        }
        Ok(response)
    }
}

impl DiaryService for HttpDiaryService {
    async fn list_diaries(&self) -> Result<Vec<DiaryEntry>> {
        let response = self.execute(self.build_list_request()?).await?;
        let body = response.text().await?;
        decode_envelope(&body)
    }

    async fn create_diary(&self, entry: &DiaryEntry) -> Result<()> {
        self.execute(self.build_create_request(entry)?).await?;
        Ok(())
    }

    async fn upload_images(&self, upload: ImageUpload) -> Result<()> {
        let image_count = upload.images.len();
        self.execute(self.build_upload_request(upload)?).await?;
        tracing::info!("Uploaded {image_count} image(s)");
        Ok(())
    }

    async fn generated_summaries(&self, count: i64) -> Result<Vec<DiarySummary>> {
        let response = self.execute(self.build_summaries_request(count)?).await?;
        let body = response.text().await?;
        decode_envelope(&body)
    }
}
