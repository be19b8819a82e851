use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use findex_explorer::analysis::{
    capitalize, Gender, SliceAnalysis, INDICATORS, REGIONAL_VARIABLES,
};
use findex_explorer::data::PipelineError;
use findex_explorer::glossary::{describe, FEATURES, OVERVIEW_INTRO, VARIABLES};

use crate::color::{blue_scale, green_scale};
use crate::state::{AppState, Section};
use crate::ui::plot::{summary_bar_chart, ChartSpec};

const NO_DATA: &str = "No respondents match this selection.";
const OVERVIEW_BARS: usize = 30;

// ---------------------------------------------------------------------------
// Central panel dispatch
// ---------------------------------------------------------------------------

/// Render whichever section the sidebar selects.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    if state.table.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a Findex extract to begin  (File → Open…)");
        });
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match state.section {
            Section::Home => home(ui, state),
            Section::Glossary => glossary(ui),
            Section::Regional => regional(ui, state),
            Section::Income => income(ui, state),
            Section::Gender => gender(ui, state),
        });
}

fn centered_heading(ui: &mut Ui, text: &str) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(RichText::new(text).strong());
    });
    ui.add_space(6.0);
}

/// Empty selections get a neutral notice; anything else is a bug and shows in red.
fn pipeline_error(ui: &mut Ui, err: &PipelineError) {
    if err.is_empty_partition() {
        ui.label(RichText::new(NO_DATA).italics());
    } else {
        ui.label(RichText::new(format!("Error: {err}")).color(Color32::RED));
    }
}

// ---------------------------------------------------------------------------
// Home
// ---------------------------------------------------------------------------

fn home(ui: &mut Ui, state: &AppState) {
    centered_heading(ui, "FINDEX 2021 Data Visualizer");

    match &state.overview {
        Some(Ok(shares)) => {
            let top = &shares[..shares.len().min(OVERVIEW_BARS)];
            let max = top.first().map(|r| r.value).unwrap_or(0.0);
            summary_bar_chart(
                ui,
                &ChartSpec {
                    id: "economy_shares",
                    title: "Share of respondents by economy",
                    x_label: "Economy",
                    y_label: "Participation (%)",
                    height: 360.0,
                },
                top,
                |_, row| {
                    let t = if max > 0.0 { row.value / max } else { 0.0 };
                    green_scale(t as f32)
                },
            );

            egui::CollapsingHeader::new(format!("All {} economies", shares.len()))
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    TableBuilder::new(ui)
                        .striped(true)
                        .column(Column::auto().at_least(200.0))
                        .column(Column::remainder())
                        .header(20.0, |mut header| {
                            header.col(|ui| {
                                ui.strong("Economy");
                            });
                            header.col(|ui| {
                                ui.strong("Percentage");
                            });
                        })
                        .body(|body| {
                            body.rows(18.0, shares.len(), |mut row| {
                                let share = &shares[row.index()];
                                row.col(|ui| {
                                    ui.label(share.group.as_str());
                                });
                                row.col(|ui| {
                                    ui.label(format!("{:.2}%", share.value));
                                });
                            });
                        });
                });
        }
        Some(Err(e)) => pipeline_error(ui, e),
        None => {}
    }

    ui.add_space(12.0);
    ui.label(OVERVIEW_INTRO);
    ui.add_space(4.0);
    ui.label("Key features of this application include:");
    for (title, text) in FEATURES {
        ui.horizontal_wrapped(|ui: &mut Ui| {
            ui.label(RichText::new(format!("• {title}:")).strong());
            ui.label(text);
        });
    }
}

// ---------------------------------------------------------------------------
// Description of variables
// ---------------------------------------------------------------------------

fn glossary(ui: &mut Ui) {
    centered_heading(ui, "Description of Variables");

    TableBuilder::new(ui)
        .striped(true)
        .column(Column::auto().at_least(140.0))
        .column(Column::remainder())
        .header(22.0, |mut header| {
            header.col(|ui| {
                ui.strong("Variable");
            });
            header.col(|ui| {
                ui.strong("Description");
            });
        })
        .body(|mut body| {
            for (name, description) in VARIABLES {
                body.row(20.0, |mut row| {
                    row.col(|ui| {
                        ui.monospace(name);
                    });
                    row.col(|ui| {
                        ui.label(description);
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Regional
// ---------------------------------------------------------------------------

fn regional(ui: &mut Ui, state: &mut AppState) {
    centered_heading(ui, "Regional Analysis");
    ui.label(
        "This section allows you to explore financial trends and behaviors, including savings, \
         borrowing, and digital payments, across various regions. You can compare how access to \
         financial systems differs between regions and examine disparities in financial \
         inclusion globally.",
    );
    ui.add_space(6.0);

    let Some(query) = state.regional.clone() else {
        ui.label(NO_DATA);
        return;
    };

    ui.strong("Select regions to compare");
    let mut toggled = None;
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for region in &state.choices.regions {
            let mut checked = query.regions.contains(region);
            if ui.checkbox(&mut checked, region.to_string()).changed() {
                toggled = Some(region.clone());
            }
        }
    });
    if let Some(region) = toggled {
        state.toggle_region(&region);
    }

    let mut variable = query.variable.clone();
    egui::ComboBox::from_label("Select variable to analyze")
        .selected_text(variable.as_str())
        .show_ui(ui, |ui: &mut Ui| {
            for v in REGIONAL_VARIABLES {
                ui.selectable_value(&mut variable, v.to_string(), v)
                    .on_hover_text(describe(v).unwrap_or_default());
            }
        });
    if variable != query.variable {
        if let Some(q) = &mut state.regional {
            q.variable = variable;
        }
        state.refresh_regional();
    }

    ui.add_space(8.0);
    let Some(query) = &state.regional else { return };
    match &state.regional_result {
        Some(Ok(rows)) => {
            let title = query.chart_title();
            let y_label = query.value_axis_label();
            let colors = state.region_colors.as_ref();
            summary_bar_chart(
                ui,
                &ChartSpec {
                    id: "regional_means",
                    title: &title,
                    x_label: "Region",
                    y_label: &y_label,
                    height: 360.0,
                },
                rows,
                |_, row| {
                    colors
                        .map(|c| c.color_for(&row.group))
                        .unwrap_or(Color32::LIGHT_BLUE)
                },
            );
        }
        Some(Err(e)) => pipeline_error(ui, e),
        None => {}
    }
}

// ---------------------------------------------------------------------------
// Income & gender slices
// ---------------------------------------------------------------------------

/// Checkbox row for the indicator multiselect. Returns the toggled indicator.
fn indicator_picker(ui: &mut Ui, selected: &[String]) -> Option<&'static str> {
    ui.strong("Select Financial Indicators to Analyze:");
    let mut toggled = None;
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for name in INDICATORS {
            let mut checked = selected.iter().any(|s| s == name);
            let response = ui
                .checkbox(&mut checked, name)
                .on_hover_text(describe(name).unwrap_or_default());
            if response.changed() {
                toggled = Some(name);
            }
        }
    });
    toggled
}

/// One chart per indicator, then the summary sentences.
fn slice_report(
    ui: &mut Ui,
    id_prefix: &str,
    analysis: &SliceAnalysis,
    title: impl Fn(&str) -> String,
    sentence: impl Fn(&str, f64) -> String,
) {
    for result in &analysis.indicators {
        ui.add_space(8.0);
        match &result.outcome {
            Ok(breakdown) => {
                let chart_title = title(&result.indicator);
                let x_label = capitalize(&result.indicator);
                let n = breakdown.distribution.len().max(1);
                summary_bar_chart(
                    ui,
                    &ChartSpec {
                        id: &format!("{id_prefix}_{}", result.indicator),
                        title: &chart_title,
                        x_label: &x_label,
                        y_label: "Percentage",
                        height: 240.0,
                    },
                    &breakdown.distribution,
                    |i, _| blue_scale(1.0 - i as f32 / n as f32),
                );
            }
            Err(e) => {
                ui.strong(title(&result.indicator));
                pipeline_error(ui, e);
            }
        }
    }

    ui.add_space(12.0);
    ui.heading("Summary");
    if analysis.respondents == 0 {
        ui.label(NO_DATA);
        return;
    }
    for result in &analysis.indicators {
        if let Ok(breakdown) = &result.outcome {
            ui.label(RichText::new(sentence(&result.indicator, breakdown.affirmative_pct)).strong());
        }
    }
}

fn income(ui: &mut Ui, state: &mut AppState) {
    centered_heading(ui, "Income-Based Analysis");
    ui.label(
        "This section allows you to analyze financial behaviors such as savings, borrowing, and \
         digital payments across different income levels.",
    );
    ui.add_space(6.0);

    let Some(query) = state.income.clone() else {
        ui.label(NO_DATA);
        return;
    };

    let mut quintile = query.quintile.clone();
    egui::ComboBox::from_label("Select Income Quintile")
        .selected_text(quintile.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for q in &state.choices.quintiles {
                ui.selectable_value(&mut quintile, q.clone(), q.to_string());
            }
        });
    if quintile != query.quintile {
        if let Some(q) = &mut state.income {
            q.quintile = quintile;
        }
        state.refresh_income();
    }

    if let Some(name) = indicator_picker(ui, &query.indicators) {
        state.toggle_income_indicator(name);
    }

    let (Some(query), Some(result)) = (&state.income, &state.income_result) else {
        return;
    };
    ui.add_space(6.0);
    ui.heading(query.heading());
    match result {
        Ok(analysis) => slice_report(
            ui,
            "income",
            analysis,
            |indicator| query.chart_title(indicator),
            |indicator, pct| query.summary_sentence(indicator, pct),
        ),
        Err(e) => pipeline_error(ui, e),
    }
}

fn gender(ui: &mut Ui, state: &mut AppState) {
    centered_heading(ui, "Gender-Based Analysis");
    ui.label(
        "Here you can analyze financial behaviors such as savings, borrowing, and digital \
         payments for selected gender and age groups.",
    );
    ui.add_space(6.0);

    let Some(query) = state.gender.clone() else {
        ui.label(NO_DATA);
        return;
    };

    let mut gender = query.gender;
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Select Gender:");
        for g in Gender::ALL {
            ui.radio_value(&mut gender, g, g.label());
        }
    });

    let mut age_group = query.age_group.clone();
    egui::ComboBox::from_label("Select Age Group")
        .selected_text(age_group.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for a in &state.choices.age_groups {
                ui.selectable_value(&mut age_group, a.clone(), a.to_string());
            }
        });

    if gender != query.gender || age_group != query.age_group {
        if let Some(q) = &mut state.gender {
            q.gender = gender;
            q.age_group = age_group;
        }
        state.refresh_gender();
    }

    if let Some(name) = indicator_picker(ui, &query.indicators) {
        state.toggle_gender_indicator(name);
    }

    let (Some(query), Some(result)) = (&state.gender, &state.gender_result) else {
        return;
    };
    ui.add_space(6.0);
    ui.heading(query.heading());
    match result {
        Ok(analysis) => slice_report(
            ui,
            "gender",
            analysis,
            |indicator| query.chart_title(indicator),
            |indicator, pct| query.summary_sentence(indicator, pct),
        ),
        Err(e) => pipeline_error(ui, e),
    }
}
