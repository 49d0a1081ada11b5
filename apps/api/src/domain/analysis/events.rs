use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::entity::AnalysisResult;

/// Items emitted on the analysis stream.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum AnalysisEvent {
    /// A partial or final result for one image.
    Snapshot { result: Box<AnalysisResult> },
    /// Every image in the run has reached a terminal stage.
    Done { run_id: Uuid, images: usize },
}

impl AnalysisEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Snapshot { .. } => "snapshot",
            Self::Done { .. } => "done",
        }
    }
}
