use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Results table (central panel)
// ---------------------------------------------------------------------------

/// Render the result table: the feature columns plus the predicted rating,
/// one row per employee, prediction cells tinted by rating colour.
pub fn results_table(ui: &mut Ui, state: &AppState) {
    let Some(result) = state.result() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a workbook to score employees  (File → Open…)");
        });
        return;
    };

    let n_cols = result.column_names.len();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto().at_least(60.0), n_cols)
        .header(22.0, |mut header| {
            for name in &result.column_names {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, result.len(), |mut row| {
                let row_no = row.index();
                for (col_no, cell) in result.rows[row_no].iter().enumerate() {
                    let is_prediction = col_no + 1 == n_cols;
                    row.col(|ui| {
                        if is_prediction {
                            let mut text = RichText::new(cell.to_string()).strong();
                            if let (Some(rating), Some(palette)) =
                                (result.rating(row_no), &state.rating_colors)
                            {
                                text = text.color(palette.color_for(rating));
                            }
                            ui.label(text);
                        } else {
                            ui.label(cell.to_string());
                        }
                    });
                }
            });
        });
}
