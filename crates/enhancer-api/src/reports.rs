//! Report endpoints

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use url::Url;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{ApiResponse, Report, ReportDetail, ReportUpload, SummaryResponse};
use crate::Result;

/// Multipart field the backend reads the uploaded document from.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Clone)]
pub struct ReportApi {
    client: ApiClient,
}

impl ReportApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// `GET /api/v1/reports`
    pub async fn get_reports(&self) -> Result<ApiResponse<Vec<Report>>> {
        let url = self.client.endpoint(&["api", "v1", "reports"])?;
        self.client
            .send(self.client.request(Method::GET, url))
            .await
    }

    /// `GET /api/v1/report/{id}`
    pub async fn get_report_by_id(&self, report_id: &str) -> Result<ApiResponse<ReportDetail>> {
        let url = self.report_url(report_id, None)?;
        self.client
            .send(self.client.request(Method::GET, url))
            .await
    }

    /// `POST /api/v1/report/{id}/summary`
    pub async fn generate_summary(&self, report_id: &str) -> Result<ApiResponse<SummaryResponse>> {
        let url = self.report_url(report_id, Some("summary"))?;
        tracing::info!(report_id = %report_id, "Requesting summary generation");
        self.client
            .send(self.client.request(Method::POST, url))
            .await
    }

    /// URL of the report's PDF. Built from the base URL and the ID only; no
    /// request is made.
    pub fn report_pdf_url(&self, report_id: &str) -> Result<String> {
        Ok(self.report_url(report_id, Some("pdf"))?.to_string())
    }

    /// `POST /api/v1/reports/upload` as `multipart/form-data`.
    pub async fn upload_report(&self, upload: ReportUpload) -> Result<ApiResponse<Report>> {
        let url = self.client.endpoint(&["api", "v1", "reports", "upload"])?;

        tracing::info!(
            file_name = %upload.file_name,
            size = upload.bytes.len(),
            "Uploading report"
        );

        let mut part = Part::bytes(upload.bytes).file_name(upload.file_name);
        if let Some(mime_type) = upload.mime_type.as_deref() {
            part = part.mime_str(mime_type)?;
        }
        let form = Form::new().part(UPLOAD_FIELD, part);

        self.client
            .send(self.client.request(Method::POST, url).multipart(form))
            .await
    }

    pub(crate) fn client(&self) -> &ApiClient {
        &self.client
    }

    pub(crate) fn report_url(&self, report_id: &str, action: Option<&str>) -> Result<Url> {
        if report_id.trim().is_empty() {
            return Err(ApiError::InvalidReportId(report_id.to_string()));
        }

        match action {
            Some(action) => self
                .client
                .endpoint(&["api", "v1", "report", report_id, action]),
            None => self.client.endpoint(&["api", "v1", "report", report_id]),
        }
    }
}
