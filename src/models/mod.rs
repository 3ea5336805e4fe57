//! Wire format of the backend and the rows it serves.
//!
//! - `ApiEnvelope`/`PageData`: the `{ status_code, message, data }` wrapper
//!   every endpoint answers with
//! - `domain`: activities, participants and accounts
//! - `fields`: the sortable and filterable field sets of each list

mod domain;
mod fields;
pub mod serde_utils;

pub use domain::*;
pub use fields::*;

use serde::{Deserialize, Serialize};

/// Response wrapper used by every endpoint.
///
/// Generic fields carry no `#[serde(default)]`: a missing `Option` already
/// reads as `None`, and `default` would demand `T: Default` from every row type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// Page of results inside a list response.
///
/// Missing or null counters fall back the same way the list pages do:
/// `total_pages` to 1 (a zero count also reads as 1) and `total_elements` to 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageData<T> {
    pub results: Option<Vec<T>>,
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub total_elements: Option<u64>,
}

impl<T> PageData<T> {
    pub fn into_results(self) -> Vec<T> {
        self.results.unwrap_or_default()
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages.filter(|n| *n > 0).unwrap_or(1)
    }

    pub fn total_elements(&self) -> u64 {
        self.total_elements.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults_apply_to_missing_fields() {
        let envelope: ApiEnvelope<PageData<serde_json::Value>> =
            serde_json::from_str(r#"{"status_code": 200, "data": {}}"#).unwrap();
        let page = envelope.data.unwrap();
        assert_eq!(page.total_pages(), 1);
        assert_eq!(page.total_elements(), 0);
        assert!(page.into_results().is_empty());
    }

    #[test]
    fn zero_total_pages_reads_as_one() {
        let page: PageData<u32> =
            serde_json::from_str(r#"{"results": [], "total_pages": 0}"#).unwrap();
        assert_eq!(page.total_pages(), 1);
    }

    // Row types need not implement Default.
    #[derive(Debug, Deserialize)]
    struct Row {
        id: u32,
    }

    fn decode<D: serde::de::DeserializeOwned>(body: &str) -> ApiEnvelope<PageData<D>> {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn rows_without_default_decode() {
        let envelope = decode::<Row>(
            r#"{"status_code": 200, "data": {"results": [{"id": 4}], "total_pages": 2}}"#,
        );
        let page = envelope.data.unwrap();
        assert_eq!(page.total_pages(), 2);
        assert_eq!(page.into_results()[0].id, 4);

        let empty = decode::<Row>(r#"{"status_code": 200, "data": {}}"#);
        assert!(empty.data.unwrap().into_results().is_empty());
    }

    #[test]
    fn envelope_without_data_parses() {
        let envelope: ApiEnvelope<PageData<u32>> =
            serde_json::from_str(r#"{"status_code": 403, "message": "Forbidden"}"#).unwrap();
        assert_eq!(envelope.status_code, 403);
        assert_eq!(envelope.message.as_deref(), Some("Forbidden"));
        assert!(envelope.data.is_none());
    }
}
