use super::table::{EmployeeTable, FEATURE_COLUMNS};

// ---------------------------------------------------------------------------
// Required-column validation
// ---------------------------------------------------------------------------

/// Check that the upload carries every feature column the model needs.
///
/// Returns the missing names in feature order. Column matching is exact;
/// the worksheet may contain any number of extra columns.
pub fn validate(table: &EmployeeTable) -> Result<(), Vec<String>> {
    let missing: Vec<String> = FEATURE_COLUMNS
        .iter()
        .filter(|col| !table.has_column(col))
        .map(|col| col.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(missing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::{CellValue, Row};

    fn make_table(columns: &[&str]) -> EmployeeTable {
        let row: Row = columns
            .iter()
            .map(|c| (c.to_string(), CellValue::Integer(1)))
            .collect();
        EmployeeTable::new(columns.iter().map(|c| c.to_string()).collect(), vec![row])
    }

    #[test]
    fn all_columns_present_passes() {
        let table = make_table(&FEATURE_COLUMNS);
        assert!(validate(&table).is_ok());
    }

    #[test]
    fn extra_columns_are_allowed() {
        let mut columns: Vec<&str> = FEATURE_COLUMNS.to_vec();
        columns.push("EmpNumber");
        columns.push("Gender");
        let table = make_table(&columns);
        assert!(validate(&table).is_ok());
    }

    #[test]
    fn missing_column_is_named_exactly() {
        let columns: Vec<&str> = FEATURE_COLUMNS
            .iter()
            .copied()
            .filter(|c| *c != "EmpWorkLifeBalance")
            .collect();
        let table = make_table(&columns);

        let missing = validate(&table).unwrap_err();
        assert_eq!(missing, vec!["EmpWorkLifeBalance".to_string()]);
    }

    #[test]
    fn missing_columns_reported_in_feature_order() {
        let table = make_table(&["EmpDepartment", "YearsWithCurrManager"]);
        let missing = validate(&table).unwrap_err();
        assert_eq!(
            missing,
            vec![
                "EmpEnvironmentSatisfaction",
                "EmpLastSalaryHikePercent",
                "EmpWorkLifeBalance",
                "ExperienceYearsAtThisCompany",
                "ExperienceYearsInCurrentRole",
                "YearsSinceLastPromotion",
            ]
        );
    }
}
