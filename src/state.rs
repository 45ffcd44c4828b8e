use crate::color::RatingPalette;
use crate::model::artifact::ModelSlot;
use crate::pipeline::RunReport;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Outcome of the most recent upload (None until the first one).
    pub run: Option<RunReport>,

    /// Once-per-process model memoization.
    pub model: ModelSlot,

    /// Colours for the model's rating classes, built on first successful load.
    pub rating_colors: Option<RatingPalette>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            run: None,
            model: ModelSlot::default(),
            rating_colors: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a finished pipeline run and refresh the derived UI state.
    pub fn set_run(&mut self, report: RunReport) {
        self.status_message = report.outcome.as_ref().err().map(|e| e.to_string());

        if self.rating_colors.is_none() {
            if let ModelSlot::Ready(forest) = &self.model {
                self.rating_colors = Some(RatingPalette::new(&forest.classes));
            }
        }

        self.run = Some(report);
    }

    /// The result table of the last run, if it produced one.
    pub fn result(&self) -> Option<&crate::data::table::ResultTable> {
        self.run.as_ref().and_then(|r| r.outcome.as_ref().ok())
    }
}
