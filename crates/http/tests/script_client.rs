//! Endpoint client tests against a mock scripting endpoint.

use coachdesk_core::{
    list_classes, load_class, submit_session, DeskConfig, DeskError, EditBuffer, FieldKey,
    SessionAssembler,
};
use coachdesk_http::ScriptClient;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ScriptClient {
    ScriptClient::new(format!("{}/exec", server.uri())).unwrap()
}

fn class_grid() -> serde_json::Value {
    json!([
        ["", "", "Coach Lee", ""],
        ["Date", "Field", "Alice", "Bob"],
        ["5/1/2024", "Specialization", "Scratch", "Khan Academy"],
        ["", "Homework", "Done", "In progress"],
        ["4/1/2024", "Level", "Rookie", "Trainee"]
    ])
}

#[tokio::test]
async fn test_fetch_class_grid() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/exec"))
        .and(query_param("action", "getClassData"))
        .and(query_param("className", "Monday A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "rawData": class_grid() })))
        .expect(1)
        .mount(&server)
        .await;

    let sheet = client(&server).fetch_class_grid("Monday A").await.unwrap();

    assert_eq!(sheet.name(), "Monday A");
    assert_eq!(sheet.row_count(), 5);
    assert_eq!(sheet.cell(4, 3).as_str(), "Trainee");
}

#[tokio::test]
async fn test_load_class_through_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("action", "getClassData"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "rawData": class_grid() })))
        .mount(&server)
        .await;

    let data = load_class(&client(&server), "Monday A").await.unwrap();

    assert_eq!(data.students.len(), 2);
    assert_eq!(data.dates[0].row_start, 2);
    assert_eq!(data.dates[1].value("Bob", FieldKey::Level), "Trainee");
}

#[tokio::test]
async fn test_remote_error_field() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "error": "Sheet not found: Nope" })),
        )
        .mount(&server)
        .await;

    let client = client(&server);
    let result = client.fetch_class_grid("Nope").await;
    assert!(matches!(result, Err(DeskError::Remote(msg)) if msg.contains("Nope")));

    // The core sees a failed fetch only as missing data.
    assert!(load_class(&client, "Nope").await.is_none());
}

#[tokio::test]
async fn test_http_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let result = client(&server).fetch_sheet_names().await;
    assert!(matches!(result, Err(DeskError::Http(msg)) if msg.starts_with("HTTP 503")));
}

#[tokio::test]
async fn test_missing_raw_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .mount(&server)
        .await;

    let result = client(&server).fetch_class_grid("Monday A").await;
    assert!(matches!(result, Err(DeskError::Remote(msg)) if msg.contains("rawData")));
}

#[tokio::test]
async fn test_list_classes_from_metadata() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("action", "getMetadata"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sheets": ["Instruction Guide", "Monday A", "Point Data", "Saturday C"]
        })))
        .mount(&server)
        .await;

    let ignored = DeskConfig::default().ignored_tabs;
    let classes = list_classes(&client(&server), &ignored).await.unwrap();

    assert_eq!(classes, vec!["Monday A", "Saturday C"]);
}

#[tokio::test]
async fn test_save_posts_plain_text_payload() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/exec"))
        .and(query_param("action", "saveClassData"))
        .and(header("content-type", "text/plain;charset=utf-8"))
        .and(body_json(json!({
            "action": "saveClassData",
            "className": "Monday A",
            "date": "5/1/2024",
            "rowStart": 2,
            "data": {
                "Alice": {
                    "specialization": "Scratch",
                    "level": "Trainee",
                    "finishedLessons": "",
                    "homework": "Done",
                    "performance": ""
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "success" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let sheet = coachdesk_sheet::Sheet::from_json_rows(&class_grid()).unwrap();
    let data = coachdesk_core::parse_class_data(&sheet);

    let mut edits = EditBuffer::new();
    edits.set("5/1/2024", "Alice", FieldKey::Level, "Trainee");
    let payload =
        SessionAssembler::assemble_for("Monday A", "5/1/2024", &data.students[..1], &data, &edits);

    let outcome = submit_session(&client, &payload).await;
    assert!(outcome.saved, "{:?}", outcome.message);
}

#[tokio::test]
async fn test_save_failure_outcome() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "status": "error", "error": "Date row mismatch" })),
        )
        .mount(&server)
        .await;

    let payload = SessionAssembler::assemble("Monday A", "5/1/2024", &[], |_, _| String::new(), 7);
    let outcome = submit_session(&client(&server), &payload).await;

    assert!(!outcome.saved);
    assert_eq!(outcome.message.as_deref(), Some("Remote error: Date row mismatch"));
}
