use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Plot};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Rating distribution (side panel)
// ---------------------------------------------------------------------------

/// Bar chart of employees per predicted rating for the last run.
pub fn rating_distribution(ui: &mut Ui, state: &AppState) {
    let Some(result) = state.result() else {
        return;
    };
    let counts = result.rating_counts();
    if counts.is_empty() {
        return;
    }

    ui.strong("Rating distribution");

    let bars: Vec<Bar> = counts
        .iter()
        .map(|(&rating, &count)| {
            let mut bar = Bar::new(rating as f64, count as f64)
                .width(0.6)
                .name(format!("Rating {rating}"));
            if let Some(palette) = &state.rating_colors {
                bar = bar.fill(palette.color_for(rating));
            }
            bar
        })
        .collect();

    Plot::new("rating_distribution")
        .height(160.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_label("Rating")
        .y_axis_label("Employees")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}
