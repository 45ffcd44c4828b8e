/// UI layer: menu bar, run-summary panel, results table, rating chart.
pub mod chart;
pub mod panels;
pub mod table;
