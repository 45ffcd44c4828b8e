use super::table::{CellValue, EmployeeTable, FeatureMatrix, DEPARTMENT_COLUMN, FEATURE_COLUMNS};

// ---------------------------------------------------------------------------
// Department – the one categorical feature
// ---------------------------------------------------------------------------

/// The closed set of department names the model was trained on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Department {
    DataScience,
    Development,
    Finance,
    HumanResources,
    ResearchAndDevelopment,
    Sales,
}

impl Department {
    /// Training-time integer code of this department.
    pub fn code(self) -> i64 {
        match self {
            Department::DataScience => 0,
            Department::Development => 1,
            Department::Finance => 2,
            Department::HumanResources => 3,
            Department::ResearchAndDevelopment => 4,
            Department::Sales => 5,
        }
    }

    /// Parse a spreadsheet value. Matching is exact, as in the training data.
    pub fn parse(name: &str) -> Option<Department> {
        match name {
            "Data Science" => Some(Department::DataScience),
            "Development" => Some(Department::Development),
            "Finance" => Some(Department::Finance),
            "Human Resources" => Some(Department::HumanResources),
            "Research & Development" => Some(Department::ResearchAndDevelopment),
            "Sales" => Some(Department::Sales),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Encoding: project onto the feature columns, code the department
// ---------------------------------------------------------------------------

/// A department value the encoder could not map to a code. The original
/// cell is kept unchanged; prediction will refuse it with a typed error.
#[derive(Debug, Clone, PartialEq)]
pub struct UnmappedValue {
    /// Zero-based data row (header excluded).
    pub row: usize,
    pub value: String,
}

/// What the encoder did, for the run summary.
#[derive(Debug, Clone, Default)]
pub struct EncodeSummary {
    /// Rows whose department was replaced by its integer code.
    pub encoded: usize,
    /// Department values outside the known set, kept as-is.
    pub unmapped: Vec<UnmappedValue>,
}

/// Build the feature matrix from a validated table.
///
/// Projects each row onto [`FEATURE_COLUMNS`] in feature order and replaces
/// known department names with their integer codes. Unknown department
/// values pass through unchanged and are recorded in the summary; the
/// encoder itself never fails.
pub fn encode_features(table: &EmployeeTable) -> (FeatureMatrix, EncodeSummary) {
    let mut summary = EncodeSummary::default();

    let rows = table
        .rows
        .iter()
        .enumerate()
        .map(|(row_no, row)| {
            FEATURE_COLUMNS
                .iter()
                .map(|col| {
                    let cell = row.get(*col).cloned().unwrap_or(CellValue::Null);
                    if *col != DEPARTMENT_COLUMN {
                        return cell;
                    }
                    match &cell {
                        CellValue::String(name) => match Department::parse(name) {
                            Some(dept) => {
                                summary.encoded += 1;
                                CellValue::Integer(dept.code())
                            }
                            None => {
                                summary.unmapped.push(UnmappedValue {
                                    row: row_no,
                                    value: name.clone(),
                                });
                                cell
                            }
                        },
                        // Already numeric (pre-encoded input) is left alone.
                        _ => cell,
                    }
                })
                .collect()
        })
        .collect();

    (FeatureMatrix { rows }, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::Row;

    const KNOWN_DEPARTMENTS: [(&str, i64); 6] = [
        ("Data Science", 0),
        ("Development", 1),
        ("Finance", 2),
        ("Human Resources", 3),
        ("Research & Development", 4),
        ("Sales", 5),
    ];

    fn make_table(departments: &[&str]) -> EmployeeTable {
        let rows = departments
            .iter()
            .map(|dept| {
                let mut row: Row = FEATURE_COLUMNS
                    .iter()
                    .map(|c| (c.to_string(), CellValue::Integer(2)))
                    .collect();
                row.insert(
                    DEPARTMENT_COLUMN.to_string(),
                    CellValue::String(dept.to_string()),
                );
                row
            })
            .collect();
        EmployeeTable::new(FEATURE_COLUMNS.iter().map(|c| c.to_string()).collect(), rows)
    }

    #[test]
    fn known_departments_get_their_codes() {
        let names: Vec<&str> = KNOWN_DEPARTMENTS.iter().map(|(n, _)| *n).collect();
        let (matrix, summary) = encode_features(&make_table(&names));

        assert_eq!(summary.encoded, 6);
        assert!(summary.unmapped.is_empty());
        for (i, (_, code)) in KNOWN_DEPARTMENTS.iter().enumerate() {
            assert_eq!(matrix.rows[i][0], CellValue::Integer(*code));
        }
    }

    #[test]
    fn unknown_department_passes_through() {
        let (matrix, summary) = encode_features(&make_table(&["Sales", "Legal"]));

        assert_eq!(matrix.rows[0][0], CellValue::Integer(5));
        assert_eq!(matrix.rows[1][0], CellValue::String("Legal".to_string()));
        assert_eq!(summary.encoded, 1);
        assert_eq!(
            summary.unmapped,
            vec![UnmappedValue {
                row: 1,
                value: "Legal".to_string()
            }]
        );
    }

    #[test]
    fn matching_is_exact() {
        // Case and spacing differences are not recognised.
        let (matrix, summary) = encode_features(&make_table(&["sales", "Research and Development"]));

        assert_eq!(summary.encoded, 0);
        assert_eq!(summary.unmapped.len(), 2);
        assert_eq!(matrix.rows[0][0], CellValue::String("sales".to_string()));
    }

    #[test]
    fn matrix_keeps_feature_order_and_row_order() {
        let (matrix, _) = encode_features(&make_table(&["Finance", "Sales"]));
        assert_eq!(matrix.len(), 2);
        for row in &matrix.rows {
            assert_eq!(row.len(), FEATURE_COLUMNS.len());
        }
        assert_eq!(matrix.rows[0][0], CellValue::Integer(2));
        assert_eq!(matrix.rows[1][0], CellValue::Integer(5));
    }
}
