//! # coachdesk-core
//!
//! Turns a human-edited class tab into typed progress records and back.
//!
//! This crate provides:
//! - The field-label mapper and progress model
//! - The grid parser that rebuilds students and session blocks
//! - The session assembler producing save payloads
//! - Edit buffering, roster filtering, the option catalog and configuration
//! - Traits for the grid source and write sink collaborators

/// Option lists for constrained fields.
pub mod catalog;
/// Configuration loading.
pub mod config;
/// Pending edits and session dates.
pub mod edits;
/// Error types and result aliases.
pub mod error;
/// Field identifiers and label mapping.
pub mod field;
/// Parsed class model.
pub mod model;
/// Grid parser.
pub mod parser;
/// Collaborator traits and flows.
pub mod ports;
/// Viewer filtering and coach grouping.
pub mod roster;

mod assembler;

pub use assembler::{SavePayload, SessionAssembler, SessionFields, SUBMITTED_FIELDS};
pub use catalog::OptionCatalog;
pub use config::DeskConfig;
pub use edits::{new_session_date, EditBuffer, FieldEdit};
pub use error::{DeskError, DeskResult};
pub use field::{map_field_label, FieldKey};
pub use model::{
    ClassData, ClassDateEntry, StudentDailyProgress, StudentInfo, UNKNOWN_COACH, UNSAVED_ROW,
};
pub use parser::parse_class_data;
pub use ports::{
    list_classes, load_class, submit_session, ClassDirectory, GridSource, SaveOutcome, WriteSink,
};
pub use roster::{group_by_coach, visible_students, CoachGroup, Role, Viewer};

/// Re-export the grid types the parser consumes.
pub use coachdesk_sheet::{CellValue, Sheet};
