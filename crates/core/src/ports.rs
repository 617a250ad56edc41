//! Collaborator seams: where grids come from and where saves go.

use crate::assembler::SavePayload;
use crate::error::DeskResult;
use crate::model::ClassData;
use crate::parser::parse_class_data;
use async_trait::async_trait;
use coachdesk_sheet::Sheet;

/// Supplies the used range of a class tab.
#[async_trait]
pub trait GridSource: Send + Sync {
    async fn fetch_grid(&self, class_name: &str) -> DeskResult<Sheet>;
}

/// Persists a session save.
#[async_trait]
pub trait WriteSink: Send + Sync {
    async fn write(&self, payload: &SavePayload) -> DeskResult<()>;
}

/// Lists the workbook's tabs.
#[async_trait]
pub trait ClassDirectory: Send + Sync {
    async fn sheet_names(&self) -> DeskResult<Vec<String>>;
}

/// Coarse result of a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub saved: bool,
    pub message: Option<String>,
}

/// Fetch and parse a class. Any fetch failure reads as "no data".
pub async fn load_class(source: &dyn GridSource, class_name: &str) -> Option<ClassData> {
    match source.fetch_grid(class_name).await {
        Ok(sheet) => Some(parse_class_data(&sheet)),
        Err(e) => {
            tracing::warn!(class = class_name, error = %e, "could not load class data");
            None
        }
    }
}

/// Send a payload; the sink's error, if any, becomes the message.
pub async fn submit_session(sink: &dyn WriteSink, payload: &SavePayload) -> SaveOutcome {
    match sink.write(payload).await {
        Ok(()) => {
            tracing::info!(
                class = %payload.class_name,
                date = %payload.date,
                row_start = payload.row_start,
                students = payload.data.len(),
                "session saved"
            );
            SaveOutcome {
                saved: true,
                message: None,
            }
        }
        Err(e) => {
            tracing::warn!(class = %payload.class_name, error = %e, "session save failed");
            SaveOutcome {
                saved: false,
                message: Some(e.to_string()),
            }
        }
    }
}

/// Class tabs: every sheet name except the ignored ones, order kept.
pub async fn list_classes(
    directory: &dyn ClassDirectory,
    ignored: &[String],
) -> DeskResult<Vec<String>> {
    let names = directory.sheet_names().await?;
    Ok(names
        .into_iter()
        .filter(|name| !ignored.iter().any(|i| i == name))
        .collect())
}
