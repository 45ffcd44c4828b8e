/// Data layer: core types, loading, validation, and encoding.
///
/// Architecture:
/// ```text
///  .xlsx / .xls / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → EmployeeTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  schema   │  required feature columns present?
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  encode   │  department names → codes → FeatureMatrix
///   └──────────┘
/// ```

pub mod encode;
pub mod loader;
pub mod schema;
pub mod table;
