//! Load, edit and save through the collaborator traits.

use async_trait::async_trait;
use coachdesk_core::{
    list_classes, load_class, submit_session, visible_students, ClassDirectory, DeskError,
    DeskResult, EditBuffer, FieldKey, GridSource, SavePayload, SessionAssembler, Sheet, Viewer,
    WriteSink, UNSAVED_ROW,
};
use std::sync::Mutex;

struct FixedGrid(Option<Sheet>);

#[async_trait]
impl GridSource for FixedGrid {
    async fn fetch_grid(&self, class_name: &str) -> DeskResult<Sheet> {
        self.0
            .clone()
            .ok_or_else(|| DeskError::Remote(format!("Sheet not found: {class_name}")))
    }
}

#[derive(Default)]
struct RecordingSink {
    fail: bool,
    saved: Mutex<Vec<SavePayload>>,
}

#[async_trait]
impl WriteSink for RecordingSink {
    async fn write(&self, payload: &SavePayload) -> DeskResult<()> {
        if self.fail {
            return Err(DeskError::Http("HTTP 500 - Internal Server Error".to_string()));
        }
        self.saved.lock().unwrap().push(payload.clone());
        Ok(())
    }
}

struct Tabs(Vec<&'static str>);

#[async_trait]
impl ClassDirectory for Tabs {
    async fn sheet_names(&self) -> DeskResult<Vec<String>> {
        Ok(self.0.iter().map(|s| (*s).to_string()).collect())
    }
}

fn class_sheet() -> Sheet {
    Sheet::from_data(vec![
        vec!["", "", "Coach Lee", "", "Coach Kim"],
        vec!["Date", "Field", "Alice", "Bob", "Cy"],
        vec!["5/1/2024", "Specialization", "Scratch", "Khan Academy", "App Lab"],
        vec!["", "Level", "Rookie", "Trainee", "Boss"],
        vec!["", "Upcoming Lessons", "x", "y", "z"],
        vec!["4/1/2024", "Level", "NEW RECRUIT", "Rookie", "Master"],
    ])
}

#[tokio::test]
async fn test_row_start_round_trips_into_payload() {
    let data = load_class(&FixedGrid(Some(class_sheet())), "Monday A")
        .await
        .expect("class should load");

    for entry in &data.dates {
        let payload = SessionAssembler::assemble_for(
            "Monday A",
            &entry.date,
            &data.students,
            &data,
            &EditBuffer::new(),
        );
        assert_eq!(payload.row_start, entry.row_start);
    }
}

#[tokio::test]
async fn test_coach_edit_and_save() {
    let data = load_class(&FixedGrid(Some(class_sheet())), "Monday A")
        .await
        .unwrap();
    let visible = visible_students(&data.students, &Viewer::coach("Lee"));

    let mut edits = EditBuffer::new();
    edits.set("5/1/2024", "Bob", FieldKey::Level, "Apprentice");
    edits.set("5/1/2024", "Bob", FieldKey::UpcomingLessons, "ignored");

    let payload = SessionAssembler::assemble_for("Monday A", "5/1/2024", &visible, &data, &edits);
    let sink = RecordingSink::default();
    let outcome = submit_session(&sink, &payload).await;

    assert!(outcome.saved);
    assert_eq!(outcome.message, None);

    let saved = sink.saved.lock().unwrap();
    let sent = &saved[0];
    assert_eq!(sent.row_start, 2);
    assert_eq!(sent.data.keys().collect::<Vec<_>>(), vec!["Alice", "Bob"]);
    assert_eq!(sent.data["Alice"].level, "Rookie");
    assert_eq!(sent.data["Bob"].level, "Apprentice");
    assert_eq!(sent.data["Bob"].specialization, "Khan Academy");

    let json = serde_json::to_value(sent).unwrap();
    assert!(json["data"]["Bob"].get("upcomingLessons").is_none());
}

#[tokio::test]
async fn test_new_session_is_inserted() {
    let data = load_class(&FixedGrid(Some(class_sheet())), "Monday A")
        .await
        .unwrap();
    let mut edits = EditBuffer::new();
    edits.set("19/10/2026", "Cy", FieldKey::Homework, "Done");

    let payload =
        SessionAssembler::assemble_for("Monday A", "19/10/2026", &data.students, &data, &edits);

    assert_eq!(payload.row_start, UNSAVED_ROW);
    assert_eq!(payload.data["Cy"].homework, "Done");
    assert_eq!(payload.data["Alice"].level, "");
}

#[tokio::test]
async fn test_fetch_failure_is_no_data() {
    assert!(load_class(&FixedGrid(None), "Missing").await.is_none());
}

#[tokio::test]
async fn test_failed_save_carries_message() {
    let sink = RecordingSink {
        fail: true,
        ..RecordingSink::default()
    };
    let payload = SessionAssembler::assemble("C", "d", &[], |_, _| String::new(), UNSAVED_ROW);
    let outcome = submit_session(&sink, &payload).await;
    assert!(!outcome.saved);
    assert!(outcome.message.unwrap().contains("500"));
}

#[tokio::test]
async fn test_list_classes_skips_ignored_tabs() {
    let tabs = Tabs(vec!["Instruction Guide", "Monday A", "Coach Name", "Tuesday B"]);
    let ignored = coachdesk_core::DeskConfig::default().ignored_tabs;
    let classes = list_classes(&tabs, &ignored).await.unwrap();
    assert_eq!(classes, vec!["Monday A", "Tuesday B"]);
}
