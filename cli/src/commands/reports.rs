//! Report commands
use std::path::Path;

use enhancer_core::{PdfDownload, Report, ReportDetail, SummaryResponse};

use super::CommandResult;
use crate::state::AppState;

pub async fn list(state: &AppState) -> CommandResult<Vec<Report>> {
    state.client().reports().await.into()
}

pub async fn detail(state: &AppState, report_id: &str) -> CommandResult<ReportDetail> {
    state.client().report(report_id).await.into()
}

pub async fn summary(state: &AppState, report_id: &str) -> CommandResult<SummaryResponse> {
    let result = state.client().generate_summary(report_id).await;
    if let Err(e) = &result {
        tracing::warn!(report_id = %report_id, error = %e, "Summary generation failed");
    }
    result.into()
}

pub fn pdf_url(state: &AppState, report_id: &str) -> CommandResult<String> {
    state
        .with_client(|client| client.report_pdf_url(report_id))
        .into()
}

pub async fn download(
    state: &AppState,
    report_id: &str,
    dir: Option<&Path>,
) -> CommandResult<PdfDownload> {
    state.client().download_report_pdf(report_id, dir).await.into()
}

pub async fn upload(state: &AppState, path: &Path) -> CommandResult<Report> {
    state.client().upload_report(path).await.into()
}
