use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use std::sync::Arc;

use flate2::read::GzDecoder;
use thiserror::Error;

use super::forest::RatingForest;

/// Fixed artifact filename, expected in the process working directory.
pub const MODEL_FILENAME: &str = "model_rf.json.gz";

// ---------------------------------------------------------------------------
// Artifact errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ModelError {
    #[error("model file '{0}' not found in the working directory")]
    NotFound(String),
    #[error("failed to load model '{path}': {reason}")]
    Corrupt { path: String, reason: String },
}

// ---------------------------------------------------------------------------
// Artifact loading
// ---------------------------------------------------------------------------

/// Read and deserialize the gzip-compressed JSON forest at `path`.
pub fn load_artifact(path: &Path) -> Result<RatingForest, ModelError> {
    let shown = path.display().to_string();

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(ModelError::NotFound(shown));
        }
        Err(e) => {
            return Err(ModelError::Corrupt {
                path: shown,
                reason: e.to_string(),
            });
        }
    };

    let gz = GzDecoder::new(BufReader::new(file));
    let forest: RatingForest = serde_json::from_reader(gz).map_err(|e| ModelError::Corrupt {
        path: shown.clone(),
        reason: e.to_string(),
    })?;

    forest
        .check()
        .map_err(|reason| ModelError::Corrupt { path: shown, reason })?;

    Ok(forest)
}

// ---------------------------------------------------------------------------
// ModelSlot – once-per-process memoization
// ---------------------------------------------------------------------------

/// Holds the outcome of the single load attempt made per process.
///
/// The first upload that needs the model triggers the load; every later
/// upload reuses the stored outcome, success or failure. A redeploy of the
/// artifact therefore requires a restart, in exchange for never paying the
/// load twice.
#[derive(Debug, Default)]
pub enum ModelSlot {
    #[default]
    Unloaded,
    Ready(Arc<RatingForest>),
    Failed(ModelError),
}

impl ModelSlot {
    /// Return the loaded forest, attempting the load only on first call.
    pub fn get_or_load(&mut self, path: &Path) -> Result<Arc<RatingForest>, ModelError> {
        match self {
            ModelSlot::Unloaded => match load_artifact(path) {
                Ok(forest) => {
                    log::info!(
                        "Loaded model '{}' ({} trees, classes {:?})",
                        path.display(),
                        forest.trees.len(),
                        forest.classes
                    );
                    let forest = Arc::new(forest);
                    *self = ModelSlot::Ready(forest.clone());
                    Ok(forest)
                }
                Err(e) => {
                    log::error!("Model load failed: {e}");
                    *self = ModelSlot::Failed(e.clone());
                    Err(e)
                }
            },
            ModelSlot::Ready(forest) => Ok(forest.clone()),
            ModelSlot::Failed(e) => Err(e.clone()),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ModelSlot::Ready(_))
    }
}
