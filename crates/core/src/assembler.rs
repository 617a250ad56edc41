//! Save path: turns on-screen values into the endpoint's save payload.

use crate::edits::EditBuffer;
use crate::field::FieldKey;
use crate::model::{ClassData, StudentInfo};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The fields the session editor submits for each student.
///
/// The model carries more fields than this; upcoming lessons, homework
/// links, credentials and comments are read-only on this path.
pub const SUBMITTED_FIELDS: [FieldKey; 5] = [
    FieldKey::Specialization,
    FieldKey::Level,
    FieldKey::FinishedLessons,
    FieldKey::Homework,
    FieldKey::Performance,
];

/// Per-student values in a save request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionFields {
    pub specialization: String,
    pub level: String,
    pub finished_lessons: String,
    pub homework: String,
    pub performance: String,
}

/// Request body for `saveClassData`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePayload {
    pub class_name: String,
    pub date: String,
    /// Block start for an in-place update, `-1` to insert a new block.
    pub row_start: i64,
    pub data: IndexMap<String, SessionFields>,
}

/// Builds [`SavePayload`]s.
pub struct SessionAssembler;

impl SessionAssembler {
    /// Assemble a payload from a value lookup.
    ///
    /// `lookup(student, field)` must return the effective value shown to the
    /// user: an unsaved edit if one exists, else the parsed value, else "".
    pub fn assemble<F>(
        class_name: &str,
        date: &str,
        visible: &[StudentInfo],
        lookup: F,
        row_start: i64,
    ) -> SavePayload
    where
        F: Fn(&str, FieldKey) -> String,
    {
        let data = visible
            .iter()
            .map(|student| {
                let name = student.name.as_str();
                let fields = SessionFields {
                    specialization: lookup(name, FieldKey::Specialization),
                    level: lookup(name, FieldKey::Level),
                    finished_lessons: lookup(name, FieldKey::FinishedLessons),
                    homework: lookup(name, FieldKey::Homework),
                    performance: lookup(name, FieldKey::Performance),
                };
                (student.name.clone(), fields)
            })
            .collect();

        SavePayload {
            class_name: class_name.to_string(),
            date: date.to_string(),
            row_start,
            data,
        }
    }

    /// Assemble against a parsed class and its pending edits.
    ///
    /// `row_start` comes from the block whose date matches, or `-1`.
    pub fn assemble_for(
        class_name: &str,
        date: &str,
        visible: &[StudentInfo],
        class_data: &ClassData,
        edits: &EditBuffer,
    ) -> SavePayload {
        let entry = class_data.entry_or_new(date);
        Self::assemble(
            class_name,
            date,
            visible,
            |student, field| edits.value_of(&entry, student, field),
            entry.row_start,
        )
    }
}
