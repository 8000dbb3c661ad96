//! Wire formats for the status and download endpoints, plus export naming.

use serde::Deserialize;

use crate::error::LoadError;
use crate::types::RawSlice;

const WATERFALL: &str = "waterfall";
const COMPLETED: &str = "completed";

#[derive(Clone, Debug, Deserialize)]
pub struct ProcessingStatus {
    pub processing_type: String,
    pub processing_status: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StatusBody {
    List(Vec<ProcessingStatus>),
    Paged { results: Vec<ProcessingStatus> },
}

/// Check the status response for a completed waterfall entry.
pub fn check_status(body: &str) -> Result<(), LoadError> {
    let entries = match serde_json::from_str::<StatusBody>(body)? {
        StatusBody::List(entries) => entries,
        StatusBody::Paged { results } => results,
    };
    let ready = entries
        .iter()
        .any(|e| e.processing_type == WATERFALL && e.processing_status == COMPLETED);
    if ready {
        Ok(())
    } else {
        Err(LoadError::MissingWaterfall)
    }
}

/// Parse the download response: slice objects ordered oldest to newest.
/// Only the outer array has to be well formed; each entry is read on its
/// own and a malformed one is left for the decoder to skip.
pub fn parse_slices(body: &str) -> Result<Vec<RawSlice>, LoadError> {
    let entries: Vec<serde_json::Value> = serde_json::from_str(body)?;
    Ok(entries.iter().map(RawSlice::from_value).collect())
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "error", alias = "message")]
    detail: String,
}

/// Build the error for a non-OK response, preferring the server's own
/// `detail` text over the HTTP status text.
pub fn http_error(status: u16, status_text: &str, body: &str) -> LoadError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.detail)
        .ok()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            if status_text.is_empty() {
                format!("Request failed with status {status}")
            } else {
                status_text.to_string()
            }
        });
    LoadError::Http { status, message }
}

/// `waterfall_<captureId>_<timestamp>.png`, with `:` and `.` in the
/// ISO-8601 timestamp replaced so the name is filesystem safe.
pub fn export_filename(capture_id: &str, iso_timestamp: &str) -> String {
    let stamp: String = iso_timestamp
        .chars()
        .map(|c| if c == ':' || c == '.' { '-' } else { c })
        .collect();
    format!("waterfall_{capture_id}_{stamp}.png")
}
