use std::io::Write;

use chrono::{TimeZone, Utc};
use serde_json::json;

use super::PageParams;
use super::test_support::{Backend, client, page};
use crate::cli::commands::activity::*;
use crate::controllers::{AlwaysConfirm, MockConfirm, SortDirection};
use crate::models::ActivitySort;

fn activities_page() -> serde_json::Value {
    page(
        json!([
            {
                "id": 1,
                "activityName": "Blood donation drive",
                "activityStatus": "IN_FUTURE",
                "startDate": "2026-11-02T08:00:00",
                "capacityLimit": 120,
                "currentParticipants": 45,
                "organizationName": "Youth Union"
            },
            {"id": "2", "activityName": "Chess night"}
        ]),
        3,
        24,
    )
}

fn json_file(body: serde_json::Value) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{}", body).unwrap();
    file
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_activities_table() {
    let backend = Backend::new().on("GET", "/api/activities", 200, activities_page());
    let url = backend.spawn().await;
    let api_client = client(&url, "tok");

    let output = list_activities(&api_client, ActivityQuery::default(), PageParams::default(), "table")
        .await
        .unwrap();

    assert!(output.contains("Blood donation drive"));
    assert!(output.contains("45/120"));
    assert!(output.contains("Page 1 of 3 (24 total)"));

    let seen = backend.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].authorization.as_deref(), Some("Bearer tok"));
    assert_eq!(seen[0].query.get("page").map(String::as_str), Some("0"));
    assert_eq!(seen[0].query.get("size").map(String::as_str), Some("10"));
    assert_eq!(seen[0].query.get("sort").map(String::as_str), Some("startDate,desc"));
    assert!(!seen[0].query.contains_key("search"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_activities_sends_filters_and_page() {
    let backend = Backend::new().on("GET", "/api/activities", 200, activities_page());
    let url = backend.spawn().await;
    let api_client = client(&url, "tok");

    let query = ActivityQuery {
        search: Some("blood".to_string()),
        status: Some("IN_FUTURE".to_string()),
        from: Some(Utc.with_ymd_and_hms(2026, 11, 1, 0, 0, 0).unwrap()),
        to: None,
        approved: true,
        sort: Some(ActivitySort::ActivityName),
    };
    let params = PageParams {
        page: 3,
        size: 5,
        direction: SortDirection::Asc,
    };

    let output = list_activities(&api_client, query, params, "json").await.unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 2);

    let seen = backend.seen();
    assert_eq!(seen.len(), 1, "one fetch for the requested page");
    let query = &seen[0].query;
    assert_eq!(query["page"], "2");
    assert_eq!(query["size"], "5");
    assert_eq!(query["sort"], "activityName,asc");
    assert_eq!(query["search"], "blood");
    assert_eq!(query["activityStatus"], "IN_FUTURE");
    assert_eq!(query["startDate"], "2026-11-01T00:00:00Z");
    assert_eq!(query["isApproved"], "true");
    assert!(!query.contains_key("endDate"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_activities_backend_failure() {
    let backend = Backend::new().on(
        "GET",
        "/api/activities",
        403,
        json!({"status_code": 403, "message": "Access denied"}),
    );
    let url = backend.spawn().await;
    let api_client = client(&url, "tok");

    let err = list_activities(&api_client, ActivityQuery::default(), PageParams::default(), "table")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Failed to load activities: Access denied");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_activities_empty() {
    let backend = Backend::new().on("GET", "/api/activities", 200, page(json!([]), 0, 0));
    let url = backend.spawn().await;
    let api_client = client(&url, "tok");

    let output = list_activities(&api_client, ActivityQuery::default(), PageParams::default(), "table")
        .await
        .unwrap();
    assert_eq!(output, "No activities found.");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_activity_posts_document() {
    let backend = Backend::new().on(
        "POST",
        "/api/activities",
        200,
        json!({"status_code": 201, "data": {"id": 9}}),
    );
    let url = backend.spawn().await;
    let api_client = client(&url, "tok");
    let file = json_file(json!({
        "activityName": "Tree planting",
        "capacityLimit": 40,
        "contactEmail": "green@uni.edu"
    }));

    let output = create_activity(&api_client, file.path()).await.unwrap();
    assert!(output.contains("Created activity"));

    let seen = backend.seen();
    assert_eq!(seen[0].method, "POST");
    assert_eq!(seen[0].body.as_ref().unwrap()["activityName"], "Tree planting");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_activity_rejects_invalid_form() {
    let backend = Backend::new();
    let url = backend.spawn().await;
    let api_client = client(&url, "tok");
    let file = json_file(json!({
        "activityName": "",
        "capacityLimit": 0,
        "contactEmail": "not-an-email"
    }));

    let err = create_activity(&api_client, file.path()).await.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("activityName: This field is required"));
    assert!(message.contains("capacityLimit: Must be at least 1"));
    assert!(message.contains("contactEmail: Please enter a valid email address"));
    assert!(backend.seen().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_activity_missing_file() {
    let api_client = client("http://unused/api", "tok");
    let err = create_activity(&api_client, std::path::Path::new("/nonexistent/activity.json"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Failed to read"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_activity_uses_post_with_id() {
    let backend = Backend::new().on("POST", "/api/activities/5", 200, json!({"status_code": 200}));
    let url = backend.spawn().await;
    let api_client = client(&url, "tok");
    let file = json_file(json!({"activityName": "Renamed fair", "id": "999"}));

    update_activity(&api_client, "5", file.path()).await.unwrap();

    let seen = backend.seen();
    assert_eq!(seen[0].method, "POST");
    assert_eq!(seen[0].path, "/api/activities/5");
    assert_eq!(seen[0].body.as_ref().unwrap()["id"], "5");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_update_activity_surfaces_server_message() {
    let backend = Backend::new().on(
        "POST",
        "/api/activities/5",
        200,
        json!({"status_code": 409, "message": "Activity already started"}),
    );
    let url = backend.spawn().await;
    let api_client = client(&url, "tok");
    let file = json_file(json!({"activityName": "Renamed fair"}));

    let err = update_activity(&api_client, "5", file.path()).await.unwrap_err();
    assert_eq!(err.to_string(), "Activity already started");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_activity_declined() {
    let backend = Backend::new();
    let url = backend.spawn().await;
    let api_client = client(&url, "tok");

    let mut confirm = MockConfirm::new();
    confirm
        .expect_confirm()
        .withf(|message: &str| message == "Are you sure you want to delete activity 7?")
        .times(1)
        .return_const(false);

    let output = delete_activity(&api_client, "7", false, confirm).await.unwrap();
    assert_eq!(output, "Delete cancelled.");
    assert!(backend.seen().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_activity_forced() {
    let backend = Backend::new().on("DELETE", "/api/activities/7", 200, json!({"status_code": 200}));
    let url = backend.spawn().await;
    let api_client = client(&url, "tok");

    let mut confirm = MockConfirm::new();
    confirm.expect_confirm().times(0);

    let output = delete_activity(&api_client, "7", true, confirm).await.unwrap();
    assert!(output.contains("Deleted activity: 7"));

    let seen = backend.seen();
    assert_eq!(seen[0].method, "DELETE");
    assert_eq!(seen[0].path, "/api/activities/7");
    assert_eq!(seen[0].content_type.as_deref(), Some("application/json"));
    assert!(seen[0].body.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_activity_not_found() {
    let backend = Backend::new();
    let url = backend.spawn().await;
    let api_client = client(&url, "tok");

    let err = delete_activity(&api_client, "404", true, AlwaysConfirm)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Not found");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_change_status() {
    let backend = Backend::new().on(
        "POST",
        "/api/activities/3/change-status",
        200,
        json!({"status_code": 200}),
    );
    let url = backend.spawn().await;
    let api_client = client(&url, "tok");

    let output = change_status(&api_client, "3", "CANCELLED").await.unwrap();
    assert!(output.contains("now CANCELLED"));

    let seen = backend.seen();
    assert_eq!(seen[0].path, "/api/activities/3/change-status");
    assert_eq!(seen[0].body, Some(json!({"status": "CANCELLED"})));
}

#[test]
fn test_activity_form_accepts_optional_fields_empty() {
    let mut form = activity_form();
    form.set_value(crate::models::ActivityFormField::ActivityName, "Book club");
    assert!(form.validate_form());
}
