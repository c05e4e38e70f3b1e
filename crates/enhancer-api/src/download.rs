//! Report PDF download

use futures_util::StreamExt;
use reqwest::{Method, Response};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

use crate::reports::ReportApi;
use crate::Result;

/// A report PDF written to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfDownload {
    pub report_id: String,
    pub file_path: PathBuf,
    pub content_type: Option<String>,
    pub bytes: u64,
    /// Lowercase hex SHA-256 of the file contents
    pub sha256: String,
}

impl ReportApi {
    /// Stream `GET /api/v1/report/{id}/pdf` into `dir`.
    ///
    /// The file name comes from the response's `Content-Disposition` when
    /// present, otherwise `<id>.pdf`. The body goes to `<name>.part` and is
    /// renamed into place once complete; a failed transfer leaves any
    /// earlier copy untouched.
    pub async fn download_report_pdf(&self, report_id: &str, dir: &Path) -> Result<PdfDownload> {
        let url = self.report_url(report_id, Some("pdf"))?;
        let client = self.client();
        let response = client.send_raw(client.request(Method::GET, url)).await?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let file_name = response
            .headers()
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(disposition_file_name)
            .map(|name| sanitize_file_name(&name, report_id))
            .unwrap_or_else(|| format!("{}.pdf", sanitize_file_name(report_id, "report")));

        tokio::fs::create_dir_all(dir).await?;
        let file_path = dir.join(&file_name);
        let part_path = dir.join(format!("{}.part", file_name));

        let (written, sha256) = match write_body(response, &part_path).await {
            Ok(done) => done,
            Err(err) => {
                if let Err(cleanup) = tokio::fs::remove_file(&part_path).await {
                    tracing::debug!(file = %part_path.display(), error = %cleanup, "Failed to remove partial download");
                }
                tracing::warn!(report_id = %report_id, error = %err, "Report PDF download failed");
                return Err(err);
            }
        };

        tokio::fs::rename(&part_path, &file_path).await?;

        tracing::info!(
            report_id = %report_id,
            file = %file_path.display(),
            bytes = written,
            "Downloaded report PDF"
        );

        Ok(PdfDownload {
            report_id: report_id.to_string(),
            file_path,
            content_type,
            bytes: written,
            sha256,
        })
    }
}

/// Stream the body into `path`, returning the byte count and hex SHA-256.
async fn write_body(response: Response, path: &Path) -> Result<(u64, String)> {
    let mut file = tokio::fs::File::create(path).await?;

    let mut hasher = Sha256::new();
    let mut written: u64 = 0;
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        hasher.update(&chunk);
        file.write_all(&chunk).await?;
        written = written.saturating_add(chunk.len() as u64);
    }

    file.flush().await?;

    Ok((written, hex_digest(&hasher.finalize())))
}

/// Extract `filename` from a Content-Disposition value, quoted or not.
fn disposition_file_name(value: &str) -> Option<String> {
    value.split(';').map(str::trim).find_map(|param| {
        let (key, raw) = param.split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("filename") {
            return None;
        }
        let name = raw.trim().trim_matches('"').trim();
        if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        }
    })
}

/// Keep only the final path component so a hostile header cannot escape
/// the download directory.
fn sanitize_file_name(file_name: &str, fallback: &str) -> String {
    let name = Path::new(file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(fallback)
        .trim();

    if name.is_empty() || name == "." || name == ".." {
        fallback.to_string()
    } else {
        name.to_string()
    }
}

fn hex_digest(digest: &[u8]) -> String {
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
