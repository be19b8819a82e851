use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Plot};
use findex_explorer::data::SummaryRow;

// ---------------------------------------------------------------------------
// Bar charts (central panel)
// ---------------------------------------------------------------------------

/// Axis captions and size for one chart.
pub struct ChartSpec<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub x_label: &'a str,
    pub y_label: &'a str,
    pub height: f32,
}

/// Render `rows` as one bar per (label, value) pair, coloured by `color`.
pub fn summary_bar_chart(
    ui: &mut Ui,
    spec: &ChartSpec<'_>,
    rows: &[SummaryRow],
    color: impl Fn(usize, &SummaryRow) -> Color32,
) {
    ui.strong(spec.title);

    let bars: Vec<Bar> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            Bar::new(i as f64, row.value)
                .name(&row.group)
                .fill(color(i, row))
                .width(0.6)
        })
        .collect();

    // Category labels under each bar; nothing between bars.
    let labels: Vec<String> = rows.iter().map(|r| r.group.clone()).collect();

    Plot::new(spec.id)
        .height(spec.height)
        .x_axis_label(spec.x_label)
        .y_axis_label(spec.y_label)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}
