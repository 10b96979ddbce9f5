//! What the widget shows once an export resolves.

use std::future::Future;

use dioxus::logger::tracing::error;

use super::state::ViewState;
use crate::export::{ExportError, ExportOutcome, PngFile};
use crate::t;

#[derive(Clone, Debug, PartialEq)]
pub enum ExportStatus {
    Idle,
    Working,
    /// Saved path on native builds, `None` when the browser took the download.
    Done(Option<String>),
    Error,
}

/// Result of a finished export: the status line plus an optional blocking notice.
#[derive(Clone, Debug, PartialEq)]
pub struct Settled {
    pub status: ExportStatus,
    pub notice: Option<String>,
}

impl Settled {
    fn quiet(status: ExportStatus) -> Self {
        Self {
            status,
            notice: None,
        }
    }

    fn failed() -> Self {
        Self {
            status: ExportStatus::Error,
            notice: Some(t!("export-failed")),
        }
    }

    /// Free the export slot and return the status to display.
    pub fn release(self, state: &mut ViewState) -> ExportStatus {
        state.finish_export();
        self.status
    }
}

/// Hand a captured file to `deliver` and map every outcome to what the user sees.
pub async fn settle<D, Fut>(outcome: ExportOutcome, deliver: D) -> Settled
where
    D: FnOnce(PngFile) -> Fut,
    Fut: Future<Output = Result<Option<String>, ExportError>>,
{
    match outcome {
        ExportOutcome::Skipped => Settled::quiet(ExportStatus::Idle),
        ExportOutcome::Saved(file) => match deliver(file).await {
            Ok(path) => Settled::quiet(ExportStatus::Done(path)),
            Err(err) => {
                error!("Export delivery failed: {err}");
                Settled::failed()
            }
        },
        // Already logged by the pipeline.
        ExportOutcome::Failed(_) => Settled::failed(),
    }
}
