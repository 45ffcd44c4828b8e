use std::path::Path;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::model::artifact::{ModelSlot, MODEL_FILENAME};
use crate::pipeline::{self, PipelineError};
use crate::state::AppState;
use crate::ui::chart;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(result) = state.result() {
            ui.label(format!("{} employees scored", result.len()));
            ui.separator();
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Left side panel – run summary
// ---------------------------------------------------------------------------

/// Render the run-summary panel: upload info, validation outcome, encode
/// summary, model status, rating legend, and the distribution chart.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Run summary");
    ui.separator();

    let Some(run) = &state.run else {
        ui.label("No workbook loaded.");
        model_status(ui, &state.model);
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong(run.file_name());
            ui.label(format!("{} rows, {} columns", run.rows, run.columns));
            ui.separator();

            match &run.outcome {
                Err(PipelineError::Workbook(_)) => {
                    ui.colored_label(Color32::RED, "File could not be parsed.");
                }
                Err(PipelineError::MissingColumns { missing }) => {
                    ui.colored_label(Color32::RED, "Missing required columns:");
                    for name in missing {
                        ui.label(RichText::new(format!("• {name}")).color(Color32::RED));
                    }
                }
                _ => {
                    ui.colored_label(Color32::DARK_GREEN, "Required columns present.");
                }
            }

            if let Some(summary) = &run.encode {
                ui.separator();
                ui.label(format!("{} departments encoded", summary.encoded));
                if !summary.unmapped.is_empty() {
                    let title = format!("Unmapped departments ({})", summary.unmapped.len());
                    egui::CollapsingHeader::new(RichText::new(title).color(Color32::RED))
                        .default_open(true)
                        .show(ui, |ui: &mut Ui| {
                            for unmapped in summary.unmapped.iter().take(20) {
                                ui.label(format!(
                                    "row {}: '{}'",
                                    unmapped.row + 1,
                                    unmapped.value
                                ));
                            }
                            if summary.unmapped.len() > 20 {
                                ui.label(format!("…and {} more", summary.unmapped.len() - 20));
                            }
                        });
                }
            }

            ui.separator();
            model_status(ui, &state.model);

            if let Some(palette) = &state.rating_colors {
                if state.result().is_some() {
                    ui.separator();
                    ui.strong("Rating legend");
                    for (rating, color) in palette.legend_entries() {
                        ui.label(RichText::new(format!("■ Rating {rating}")).color(color));
                    }

                    ui.separator();
                    chart::rating_distribution(ui, state);
                }
            }
        });
}

fn model_status(ui: &mut Ui, model: &ModelSlot) {
    match model {
        ModelSlot::Unloaded => {
            ui.label(format!("Model: '{MODEL_FILENAME}' not loaded yet"));
        }
        ModelSlot::Ready(forest) => {
            ui.label(format!(
                "Model: {} trees, ratings {:?}",
                forest.trees.len(),
                forest.classes
            ));
        }
        ModelSlot::Failed(e) => {
            ui.colored_label(Color32::RED, format!("Model: {e}"));
        }
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open employee workbook")
        .add_filter("Supported files", &["xlsx", "xls", "csv"])
        .add_filter("Excel", &["xlsx", "xls"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        let report =
            pipeline::process_upload(&path, Path::new(MODEL_FILENAME), &mut state.model);
        match &report.outcome {
            Ok(result) => {
                log::info!("Scored {} employees from '{}'", result.len(), path.display());
            }
            Err(e) => {
                log::error!("Upload failed: {e}");
            }
        }
        state.set_run(report);
    }
}
