//! Canonical progress fields and the free-text label mapper.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One tracked attribute of a student's progress for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    Specialization,
    Level,
    FinishedLessons,
    UpcomingLessons,
    Homework,
    HomeworkLink,
    Username,
    Password,
    Comments,
    Performance,
}

impl FieldKey {
    /// Every field, in display order.
    pub const ALL: [FieldKey; 10] = [
        FieldKey::Specialization,
        FieldKey::Level,
        FieldKey::FinishedLessons,
        FieldKey::UpcomingLessons,
        FieldKey::Homework,
        FieldKey::HomeworkLink,
        FieldKey::Username,
        FieldKey::Password,
        FieldKey::Comments,
        FieldKey::Performance,
    ];

    /// The identifier used on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKey::Specialization => "specialization",
            FieldKey::Level => "level",
            FieldKey::FinishedLessons => "finishedLessons",
            FieldKey::UpcomingLessons => "upcomingLessons",
            FieldKey::Homework => "homework",
            FieldKey::HomeworkLink => "homeworkLink",
            FieldKey::Username => "username",
            FieldKey::Password => "password",
            FieldKey::Comments => "comments",
            FieldKey::Performance => "performance",
        }
    }

    /// Human label, as the sheet's column B would show it.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FieldKey::Specialization => "Specialization",
            FieldKey::Level => "Level",
            FieldKey::FinishedLessons => "Finished Lessons",
            FieldKey::UpcomingLessons => "Upcoming Lessons",
            FieldKey::Homework => "Homework",
            FieldKey::HomeworkLink => "Homework Link",
            FieldKey::Username => "Username",
            FieldKey::Password => "Password",
            FieldKey::Comments => "Comments",
            FieldKey::Performance => "Performance",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKey {
    type Err = String;

    /// Accepts the wire identifier, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKey::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown field: {s}"))
    }
}

/// Map a free-text row label to its field.
///
/// Rules are checked in order and the first hit wins. "homework link" must
/// be tested before the bare "homework" rule.
#[must_use]
pub fn map_field_label(label: &str) -> Option<FieldKey> {
    if label.is_empty() {
        return None;
    }
    let l = label.to_lowercase();

    if l.contains("homework link") {
        Some(FieldKey::HomeworkLink)
    } else if l.contains("homework") && !l.contains("link") {
        Some(FieldKey::Homework)
    } else if l.contains("finish") {
        Some(FieldKey::FinishedLessons)
    } else if l.contains("upcoming") {
        Some(FieldKey::UpcomingLessons)
    } else if l.contains("specialization") {
        Some(FieldKey::Specialization)
    } else if l.contains("level") {
        Some(FieldKey::Level)
    } else if l.contains("username") {
        Some(FieldKey::Username)
    } else if l.contains("password") {
        Some(FieldKey::Password)
    } else if l.contains("performance") {
        Some(FieldKey::Performance)
    } else {
        None
    }
}
