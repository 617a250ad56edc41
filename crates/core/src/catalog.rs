//! Allowed values for the constrained session fields.

use crate::error::{DeskError, DeskResult};
use crate::field::FieldKey;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Option lists offered by the session editor.
///
/// Built once (from defaults or configuration) and passed to whoever needs
/// it; there is no process-wide instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionCatalog {
    pub specializations: Vec<String>,
    pub levels: Vec<String>,
    /// Lesson choices per specialization, in lookup order.
    pub lessons: IndexMap<String, Vec<String>>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl Default for OptionCatalog {
    fn default() -> Self {
        let specializations = owned(&[
            "Scratch",
            "Coding Scratch",
            "Khan Academy",
            "Trinket io",
            "Electronic Arduino",
            "Robotics Arduino",
            "App Lab",
            "TinkerCAD",
        ]);
        let levels = owned(&[
            "NEW RECRUIT",
            "Rookie",
            "Ro-Tinkercad2",
            "Trainee",
            "Tr-Touch Type",
            "Apprentice",
            "Enthusiast",
            "Professional",
            "Master",
            "Boss",
            "The Goat",
        ]);

        let mut lessons = IndexMap::new();
        for (spec, list) in [
            (
                "Scratch",
                &["Setting a Scene", "Setting a Scene Done", "Choose it yourself"][..],
            ),
            ("Coding Scratch", &["Setting a Scene", "Setting a Scene Done"][..]),
            ("Khan Academy", &["JS3"][..]),
            ("Trinket io", &["My Python"][..]),
            ("Electronic Arduino", &["New Spark"][..]),
            ("Robotics Arduino", &["Light up that car"][..]),
            ("App Lab", &["App beginner"][..]),
            ("TinkerCAD", &["3rd Dimension"][..]),
            ("General", &["CSS everywhere"][..]),
        ] {
            lessons.insert(spec.to_string(), owned(list));
        }

        Self {
            specializations,
            levels,
            lessons,
        }
    }
}

impl OptionCatalog {
    /// Lesson choices for a specialization.
    ///
    /// Uses the first catalog key contained in `specialization`, so
    /// "Coding Scratch" resolves to the earlier "Scratch" entry.
    #[must_use]
    pub fn lessons_for(&self, specialization: &str) -> &[String] {
        if specialization.is_empty() {
            return &[];
        }
        self.lessons
            .iter()
            .find(|(key, _)| specialization.contains(key.as_str()))
            .map(|(_, list)| list.as_slice())
            .unwrap_or(&[])
    }

    /// Check an edit against the catalog.
    ///
    /// Clearing a field is always allowed, and fields without an option
    /// list accept free text. `specialization` is the student's effective
    /// specialization, used to validate finished lessons.
    pub fn check(&self, field: FieldKey, value: &str, specialization: &str) -> DeskResult<()> {
        if value.is_empty() {
            return Ok(());
        }
        let allowed: &[String] = match field {
            FieldKey::Specialization => &self.specializations,
            FieldKey::Level => &self.levels,
            FieldKey::FinishedLessons => self.lessons_for(specialization),
            _ => return Ok(()),
        };
        if allowed.iter().any(|option| option == value) {
            Ok(())
        } else {
            Err(DeskError::invalid_option(field, value))
        }
    }
}
