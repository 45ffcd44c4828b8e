use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::data::encode::{self, EncodeSummary};
use crate::data::loader;
use crate::data::schema;
use crate::data::table::{FeatureMatrix, ResultTable, FEATURE_COLUMNS};
use crate::model::artifact::{ModelError, ModelSlot};

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Everything that can stop an upload from producing a result table.
/// Each variant is caught at the upload boundary and shown in the UI;
/// nothing is retried and the process keeps accepting uploads.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to read file: {0:#}")]
    Workbook(anyhow::Error),

    #[error("the first worksheet is missing the following required columns: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("prediction failed at row {row}, column '{column}': value '{value}' is not numeric")]
    NonNumericFeature {
        row: usize,
        column: String,
        value: String,
    },
}

// ---------------------------------------------------------------------------
// RunReport – what one upload produced
// ---------------------------------------------------------------------------

/// Outcome of a single upload, kept around for the run-summary panel.
#[derive(Debug)]
pub struct RunReport {
    pub source: PathBuf,
    /// Parsed data rows (header excluded).
    pub rows: usize,
    /// Parsed column count, features and extras alike.
    pub columns: usize,
    /// Present once validation has passed.
    pub encode: Option<EncodeSummary>,
    pub outcome: Result<ResultTable, PipelineError>,
}

impl RunReport {
    fn failed(source: &Path, rows: usize, columns: usize, error: PipelineError) -> Self {
        RunReport {
            source: source.to_path_buf(),
            rows,
            columns,
            encode: None,
            outcome: Err(error),
        }
    }

    /// Short file name for the UI.
    pub fn file_name(&self) -> String {
        self.source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.source.display().to_string())
    }

    pub fn validated(&self) -> bool {
        self.encode.is_some()
    }
}

// ---------------------------------------------------------------------------
// The upload pipeline
// ---------------------------------------------------------------------------

/// Run one upload through parse → validate → encode → load → predict.
///
/// The stages run synchronously and stop at the first failure; the model
/// slot is only consulted after validation, so a rejected upload never
/// triggers a model load.
pub fn process_upload(path: &Path, model_path: &Path, model: &mut ModelSlot) -> RunReport {
    let table = match loader::load_file(path) {
        Ok(table) => table,
        Err(e) => return RunReport::failed(path, 0, 0, PipelineError::Workbook(e)),
    };
    let (rows, columns) = (table.len(), table.column_names.len());
    log::info!(
        "Parsed '{}': {rows} rows, {columns} columns",
        path.display()
    );

    if let Err(missing) = schema::validate(&table) {
        return RunReport::failed(path, rows, columns, PipelineError::MissingColumns { missing });
    }

    let (matrix, summary) = encode::encode_features(&table);
    if !summary.unmapped.is_empty() {
        log::warn!(
            "{} department value(s) outside the known set, left unencoded",
            summary.unmapped.len()
        );
    }

    let outcome = (|| {
        let forest = model.get_or_load(model_path)?;
        let numeric = numeric_matrix(&matrix)?;
        let predictions = forest.predict(&numeric);
        let result = ResultTable::from_predictions(matrix, &predictions);
        log::info!("Scored {} employees", result.len());
        Ok(result)
    })();

    RunReport {
        source: path.to_path_buf(),
        rows,
        columns,
        encode: Some(summary),
        outcome,
    }
}

/// Convert the encoded matrix to `f64` rows for the forest. An unmapped
/// department (still a string) or an empty cell fails here, naming the
/// offending row, column, and value.
fn numeric_matrix(matrix: &FeatureMatrix) -> Result<Vec<Vec<f64>>, PipelineError> {
    matrix
        .rows
        .iter()
        .enumerate()
        .map(|(row_no, row)| {
            row.iter()
                .enumerate()
                .map(|(col_no, cell)| {
                    cell.as_f64().ok_or_else(|| PipelineError::NonNumericFeature {
                        row: row_no,
                        column: FEATURE_COLUMNS[col_no].to_string(),
                        value: cell.to_string(),
                    })
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::{CellValue, DEPARTMENT_COLUMN, PREDICTION_COLUMN};
    use crate::model::artifact::MODEL_FILENAME;
    use crate::model::forest::{Node, RatingForest, Tree};
    use flate2::write::GzEncoder;
    use flate2::Compression;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("appraisal-pipe-{}-{name}", std::process::id()))
    }

    /// One stump on EmpEnvironmentSatisfaction: <= 2.5 → rating 2, else 4.
    fn sample_forest() -> RatingForest {
        RatingForest {
            feature_names: FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            classes: vec![2, 3, 4],
            trees: vec![Tree {
                nodes: vec![
                    Node::Split {
                        feature: 1,
                        threshold: 2.5,
                        left: 1,
                        right: 2,
                    },
                    Node::Leaf { class: 0 },
                    Node::Leaf { class: 2 },
                ],
            }],
        }
    }

    fn write_artifact(path: &Path) {
        let file = std::fs::File::create(path).unwrap();
        let mut gz = GzEncoder::new(file, Compression::default());
        serde_json::to_writer(&mut gz, &sample_forest()).unwrap();
        gz.finish().unwrap();
    }

    fn write_csv(path: &Path, departments: &[&str]) {
        let mut body = FEATURE_COLUMNS.join(",");
        for dept in departments {
            body.push_str(&format!("\n{dept},3,15,2,7,4,1,3"));
        }
        std::fs::write(path, body).unwrap();
    }

    #[test]
    fn valid_upload_produces_result_table() {
        let workbook = temp_path("ok.csv");
        let artifact = temp_path("ok-model.json.gz");
        write_csv(&workbook, &["Sales", "Sales"]);
        write_artifact(&artifact);

        let mut slot = ModelSlot::default();
        let report = process_upload(&workbook, &artifact, &mut slot);

        assert_eq!(report.rows, 2);
        assert!(report.validated());
        let result = report.outcome.unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result.column_names.len(), FEATURE_COLUMNS.len() + 1);
        assert_eq!(result.column_names.last().map(String::as_str), Some(PREDICTION_COLUMN));
        // Sales → code 5; satisfaction 3 > 2.5 → rating 4.
        assert_eq!(result.rows[0][0], CellValue::Integer(5));
        assert_eq!(result.rating(0), Some(4));
        // Identical rows, identical predictions.
        assert_eq!(result.rating(0), result.rating(1));

        let _ = std::fs::remove_file(&workbook);
        let _ = std::fs::remove_file(&artifact);
    }

    #[test]
    fn missing_column_skips_encoding_and_model_load() {
        let workbook = temp_path("missing-col.csv");
        let header: Vec<&str> = FEATURE_COLUMNS
            .iter()
            .copied()
            .filter(|c| *c != "EmpWorkLifeBalance")
            .collect();
        std::fs::write(
            &workbook,
            format!("{}\nSales,3,15,7,4,1,3", header.join(",")),
        )
        .unwrap();

        let mut slot = ModelSlot::default();
        let report = process_upload(&workbook, Path::new(MODEL_FILENAME), &mut slot);

        match &report.outcome {
            Err(PipelineError::MissingColumns { missing }) => {
                assert_eq!(missing, &vec!["EmpWorkLifeBalance".to_string()]);
            }
            other => panic!("expected MissingColumns, got {other:?}"),
        }
        assert!(report.encode.is_none());
        // Rejected uploads never touch the model.
        assert!(matches!(slot, ModelSlot::Unloaded));

        let _ = std::fs::remove_file(&workbook);
    }

    #[test]
    fn absent_model_fails_with_filename() {
        let workbook = temp_path("no-model.csv");
        let artifact = temp_path("nowhere/model_rf.json.gz");
        write_csv(&workbook, &["Sales"]);

        let mut slot = ModelSlot::default();
        let report = process_upload(&workbook, &artifact, &mut slot);

        match &report.outcome {
            Err(PipelineError::Model(ModelError::NotFound(shown))) => {
                assert!(shown.contains("model_rf.json.gz"));
            }
            other => panic!("expected Model(NotFound), got {other:?}"),
        }
        // Validation and encoding did run.
        assert!(report.validated());

        let _ = std::fs::remove_file(&workbook);
    }

    #[test]
    fn unmapped_department_fails_inference_not_encoding() {
        let workbook = temp_path("legal.csv");
        let artifact = temp_path("legal-model.json.gz");
        write_csv(&workbook, &["Legal"]);
        write_artifact(&artifact);

        let mut slot = ModelSlot::default();
        let report = process_upload(&workbook, &artifact, &mut slot);

        let summary = report.encode.as_ref().unwrap();
        assert_eq!(summary.unmapped.len(), 1);
        assert_eq!(summary.unmapped[0].value, "Legal");

        match &report.outcome {
            Err(PipelineError::NonNumericFeature { row, column, value }) => {
                assert_eq!(*row, 0);
                assert_eq!(column, DEPARTMENT_COLUMN);
                assert_eq!(value, "Legal");
            }
            other => panic!("expected NonNumericFeature, got {other:?}"),
        }

        let _ = std::fs::remove_file(&workbook);
        let _ = std::fs::remove_file(&artifact);
    }

    #[test]
    fn model_is_loaded_once_across_uploads() {
        let workbook = temp_path("twice.csv");
        let artifact = temp_path("twice-model.json.gz");
        write_csv(&workbook, &["Development"]);
        write_artifact(&artifact);

        let mut slot = ModelSlot::default();
        let first = process_upload(&workbook, &artifact, &mut slot);
        let first_rating = first.outcome.unwrap().rating(0);

        // Remove the artifact between uploads; the memoized model serves.
        std::fs::remove_file(&artifact).unwrap();
        let second = process_upload(&workbook, &artifact, &mut slot);
        let second_rating = second.outcome.unwrap().rating(0);

        assert_eq!(first_rating, second_rating);
        assert!(slot.is_ready());

        let _ = std::fs::remove_file(&workbook);
    }
}
