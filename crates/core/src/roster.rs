//! Which students a viewer may see, and how they are grouped on screen.

use crate::model::StudentInfo;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Coach,
}

/// The signed-in user as far as the roster cares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    pub name: String,
    pub role: Role,
}

impl Viewer {
    pub fn admin(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: Role::Admin,
        }
    }

    pub fn coach(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: Role::Coach,
        }
    }

    /// Whether this viewer coaches a student attributed to `coach`.
    ///
    /// Matching is loose because header cells and account names differ:
    /// "Coach Lee" matches viewer "Lee" and viewer "Lee Wong".
    #[must_use]
    pub fn coaches(&self, coach: &str) -> bool {
        let viewer = self.name.to_lowercase();
        let coach = coach.to_lowercase();

        if coach.contains(&viewer) {
            return true;
        }
        let bare = coach.replacen("coach", "", 1);
        let bare = bare.trim();
        !bare.is_empty() && viewer.contains(bare)
    }
}

/// Students the viewer is allowed to see, in column order.
#[must_use]
pub fn visible_students(students: &[StudentInfo], viewer: &Viewer) -> Vec<StudentInfo> {
    match viewer.role {
        Role::Admin => students.to_vec(),
        Role::Coach => students
            .iter()
            .filter(|s| viewer.coaches(&s.coach))
            .cloned()
            .collect(),
    }
}

/// A run of adjacent students sharing a coach.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoachGroup {
    pub coach: String,
    pub students: Vec<StudentInfo>,
}

/// Group adjacent students by coach, keeping column order.
///
/// A coach whose students are not contiguous appears once per run.
#[must_use]
pub fn group_by_coach(students: &[StudentInfo]) -> Vec<CoachGroup> {
    let mut groups: Vec<CoachGroup> = Vec::new();
    for student in students {
        match groups.last_mut() {
            Some(group) if group.coach == student.coach => group.students.push(student.clone()),
            _ => groups.push(CoachGroup {
                coach: student.coach.clone(),
                students: vec![student.clone()],
            }),
        }
    }
    groups
}
