//! Reports API
//!
//! Report generation, listing, download, and the optional email side-call.
//! The PDF itself is rendered by the backend; the client fetches the bytes
//! and hands them to the browser as a download.

use wasm_bindgen::JsCast;

use crate::api::client;
use crate::model::{Report, ReportPeriod};

/// How long a download may run before it is aborted
const DOWNLOAD_TIMEOUT_MS: u32 = 15_000;

#[derive(Debug, serde::Deserialize)]
struct ReportListData {
    reports: Vec<Report>,
}

/// Ask the backend to generate a report for the given period
pub async fn generate_report(period: ReportPeriod) -> Result<Report, String> {
    #[derive(serde::Serialize)]
    struct GenerateRequest {
        period: String,
    }

    client::post_json(
        "/reports",
        &GenerateRequest {
            period: period.as_str().to_string(),
        },
    )
    .await
}

/// Fetch previously generated reports
pub async fn fetch_reports() -> Result<Vec<Report>, String> {
    let data: ReportListData = client::get_json("/reports").await?;
    Ok(data.reports)
}

/// Download a generated report and hand it to the browser. The fetch is
/// aborted if the backend takes longer than the timeout.
pub async fn download_report(report: &Report) -> Result<(), String> {
    let bytes =
        client::get_binary_with_timeout(&format!("/reports/{}/download", report.id), DOWNLOAD_TIMEOUT_MS)
            .await?;

    let name = report
        .file_name
        .clone()
        .unwrap_or_else(|| format!("sacco-report-{}.pdf", report.id));
    save_blob(&name, &bytes, "application/pdf")
}

/// Ask the backend to email a generated report
pub async fn email_report(id: u32, recipient: &str) -> Result<(), String> {
    #[derive(serde::Serialize)]
    struct EmailRequest {
        recipient: String,
    }

    client::post_json::<serde_json::Value, _>(
        &format!("/reports/{}/email", id),
        &EmailRequest {
            recipient: recipient.to_string(),
        },
    )
    .await
    .map(|_| ())
}

/// Offer a client-assembled CSV as a download
pub fn save_csv(file_name: &str, csv: &str) -> Result<(), String> {
    save_text_blob(file_name, csv)
}

fn save_blob(file_name: &str, bytes: &[u8], mime: &str) -> Result<(), String> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::of1(&array);

    let props = web_sys::BlobPropertyBag::new();
    props.set_type(mime);

    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &props)
        .map_err(|e| format!("Blob error: {:?}", e))?;
    trigger_download(file_name, &blob)
}

fn save_text_blob(file_name: &str, text: &str) -> Result<(), String> {
    let parts = js_sys::Array::of1(&text.into());
    let blob = web_sys::Blob::new_with_str_sequence(&parts)
        .map_err(|e| format!("Blob error: {:?}", e))?;
    trigger_download(file_name, &blob)
}

/// Create an object URL for the blob and click a transient anchor at it
fn trigger_download(file_name: &str, blob: &web_sys::Blob) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window")?;
    let document = window.document().ok_or("No document")?;

    let url = web_sys::Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("URL error: {:?}", e))?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("DOM error: {:?}", e))?;
    let _ = anchor.set_attribute("href", &url);
    let _ = anchor.set_attribute("download", file_name);
    if let Some(element) = anchor.dyn_ref::<web_sys::HtmlElement>() {
        element.click();
    }
    let _ = web_sys::Url::revoke_object_url(&url);

    Ok(())
}
