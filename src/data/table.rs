use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ---------------------------------------------------------------------------
// Column vocabulary
// ---------------------------------------------------------------------------

/// The eight feature columns the model was trained on, in feature order.
/// The feature matrix uses exactly this order.
pub const FEATURE_COLUMNS: [&str; 8] = [
    "EmpDepartment",
    "EmpEnvironmentSatisfaction",
    "EmpLastSalaryHikePercent",
    "EmpWorkLifeBalance",
    "ExperienceYearsAtThisCompany",
    "ExperienceYearsInCurrentRole",
    "YearsSinceLastPromotion",
    "YearsWithCurrManager",
];

/// The categorical column that gets integer-encoded before inference.
pub const DEPARTMENT_COLUMN: &str = "EmpDepartment";

/// Name of the column appended to the result table.
pub const PREDICTION_COLUMN: &str = "Predicted Performance Rating";

// ---------------------------------------------------------------------------
// CellValue – a single spreadsheet cell
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common spreadsheet dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:.2}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, ""),
        }
    }
}

impl CellValue {
    /// Try to interpret the value as an `f64` for the numeric feature matrix.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// EmployeeTable – the parsed worksheet
// ---------------------------------------------------------------------------

/// One data row of the worksheet: column_name → cell value.
pub type Row = BTreeMap<String, CellValue>;

/// The parsed upload. Columns keep the order they appear in the file; rows
/// may span an arbitrary superset of the feature columns.
#[derive(Debug, Clone)]
pub struct EmployeeTable {
    /// Column names in file order.
    pub column_names: Vec<String>,
    /// All data rows (header excluded).
    pub rows: Vec<Row>,
}

impl EmployeeTable {
    pub fn new(column_names: Vec<String>, rows: Vec<Row>) -> Self {
        EmployeeTable { column_names, rows }
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_names.iter().any(|c| c == name)
    }
}

// ---------------------------------------------------------------------------
// FeatureMatrix – the table projected onto the feature columns
// ---------------------------------------------------------------------------

/// The validated, encoded input to the model: one `Vec<CellValue>` per
/// employee, cells ordered as [`FEATURE_COLUMNS`], input row order preserved.
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    pub rows: Vec<Vec<CellValue>>,
}

impl FeatureMatrix {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ResultTable – feature matrix plus the prediction column
// ---------------------------------------------------------------------------

/// What the user sees: the feature columns with the predicted rating
/// appended. Non-feature columns of the upload are not retained.
#[derive(Debug, Clone)]
pub struct ResultTable {
    /// [`FEATURE_COLUMNS`] followed by [`PREDICTION_COLUMN`].
    pub column_names: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl ResultTable {
    /// Merge predictions back into the feature matrix, one per row.
    pub fn from_predictions(matrix: FeatureMatrix, predictions: &[i64]) -> Self {
        let column_names = FEATURE_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(std::iter::once(PREDICTION_COLUMN.to_string()))
            .collect();

        let rows = matrix
            .rows
            .into_iter()
            .zip(predictions.iter())
            .map(|(mut row, &rating)| {
                row.push(CellValue::Integer(rating));
                row
            })
            .collect();

        ResultTable { column_names, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Predicted rating of a row (the last cell).
    pub fn rating(&self, row: usize) -> Option<i64> {
        match self.rows.get(row)?.last()? {
            CellValue::Integer(r) => Some(*r),
            _ => None,
        }
    }

    /// Distinct predicted ratings, sorted.
    pub fn distinct_ratings(&self) -> Vec<i64> {
        let set: BTreeSet<i64> = (0..self.len()).filter_map(|i| self.rating(i)).collect();
        set.into_iter().collect()
    }

    /// Number of rows per predicted rating, for the distribution chart.
    pub fn rating_counts(&self) -> BTreeMap<i64, usize> {
        let mut counts = BTreeMap::new();
        for i in 0..self.len() {
            if let Some(r) = self.rating(i) {
                *counts.entry(r).or_insert(0) += 1;
            }
        }
        counts
    }
}
