//! The dashboard's analysis views expressed as plain requests over the data
//! pipeline. Each request takes the current widget selections, runs
//! filter → aggregate against the table, and returns rows ready to chart.
//! Nothing here knows about egui.

use crate::data::aggregate::{group_mean, value_counts, value_percentage};
use crate::data::filter::{filter_rows, FilterSpec};
use crate::data::{PipelineError, Scalar, Statistic, SummaryRow, Table};

pub const ECONOMY: &str = "economy";
pub const REGION: &str = "regionwb";
pub const INCOME_QUINTILE: &str = "inc_q";
pub const FEMALE: &str = "female";
pub const AGE_GROUP: &str = "age_group";

/// Variables offered by the regional comparison.
pub const REGIONAL_VARIABLES: [&str; 8] = [
    "account",
    "saved",
    "borrowed",
    "fin14a",
    "fin44a",
    "mobileowner",
    "internetaccess",
    "anydigpayment",
];

/// Indicators offered by the income and gender panels.
pub const INDICATORS: [&str; 4] = ["account", "saved", "borrowed", "anydigpayment"];

/// The "yes" code of the survey's coded columns.
pub const AFFIRMATIVE: Scalar = Scalar::Integer(1);

/// `"has_account"` → `"Has account"`.
pub fn capitalize(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

// ---------------------------------------------------------------------------
// Home: respondent share per economy
// ---------------------------------------------------------------------------

/// Share of all respondents coming from each economy, rounded to two decimals,
/// largest first.
pub fn economy_shares(table: &Table) -> Result<Vec<SummaryRow>, PipelineError> {
    Ok(value_counts(table, ECONOMY)?
        .into_iter()
        .map(|(economy, pct)| SummaryRow {
            group: economy.to_string(),
            target: ECONOMY.to_string(),
            statistic: Statistic::Percentage,
            value: round_to(pct, 2),
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Regional comparison
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct RegionalQuery {
    /// Regions to compare. Empty compares every region.
    pub regions: Vec<Scalar>,
    pub variable: String,
}

impl RegionalQuery {
    /// Start from the first region in the data, comparing account ownership.
    pub fn default_for(table: &Table) -> Result<Self, PipelineError> {
        Ok(Self {
            regions: table.distinct_values(REGION)?.into_iter().take(1).collect(),
            variable: REGIONAL_VARIABLES[0].to_string(),
        })
    }

    /// Mean of the variable per selected region, in first-seen region order.
    pub fn run(&self, table: &Table) -> Result<Vec<SummaryRow>, PipelineError> {
        let spec = FilterSpec::new().with(REGION, self.regions.iter().cloned());
        let selected = filter_rows(table, &spec)?;
        group_mean(&selected, Some(REGION), &self.variable)
    }

    pub fn chart_title(&self) -> String {
        format!("Comparison of {} Across Selected Regions", self.variable)
    }

    pub fn value_axis_label(&self) -> String {
        format!("Average {}", self.variable)
    }
}

// ---------------------------------------------------------------------------
// Per-indicator breakdown of a demographic slice
// ---------------------------------------------------------------------------

/// Distribution of one indicator inside a slice, plus the share of
/// affirmative answers used by the summary sentence.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorBreakdown {
    pub indicator: String,
    /// One row per response code, labelled by the code, most frequent first.
    pub distribution: Vec<SummaryRow>,
    pub affirmative_pct: f64,
}

impl IndicatorBreakdown {
    pub fn compute(slice: &Table, indicator: &str) -> Result<Self, PipelineError> {
        let distribution = value_counts(slice, indicator)?
            .into_iter()
            .map(|(code, pct)| SummaryRow {
                group: code.to_string(),
                target: indicator.to_string(),
                statistic: Statistic::Percentage,
                value: pct,
            })
            .collect();
        let affirmative_pct = value_percentage(slice, indicator, &AFFIRMATIVE)?;
        Ok(Self {
            indicator: indicator.to_string(),
            distribution,
            affirmative_pct,
        })
    }
}

/// The outcome of one indicator. Failures stay scoped to that indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorResult {
    pub indicator: String,
    pub outcome: Result<IndicatorBreakdown, PipelineError>,
}

/// All requested indicators for one demographic slice.
#[derive(Debug, Clone, PartialEq)]
pub struct SliceAnalysis {
    pub respondents: usize,
    pub indicators: Vec<IndicatorResult>,
}

fn analyse_slice(
    table: &Table,
    spec: &FilterSpec,
    indicators: &[String],
) -> Result<SliceAnalysis, PipelineError> {
    let slice = filter_rows(table, spec)?;
    let indicators = indicators
        .iter()
        .map(|indicator| {
            let outcome = IndicatorBreakdown::compute(&slice, indicator);
            if let Err(e) = &outcome {
                if e.is_empty_partition() {
                    log::debug!("{e}");
                } else {
                    log::error!("indicator '{indicator}' failed: {e}");
                }
            }
            IndicatorResult {
                indicator: indicator.clone(),
                outcome,
            }
        })
        .collect();
    Ok(SliceAnalysis {
        respondents: slice.len(),
        indicators,
    })
}

fn default_indicators() -> Vec<String> {
    vec![INDICATORS[0].to_string()]
}

// ---------------------------------------------------------------------------
// Income quintile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct IncomeQuery {
    pub quintile: Scalar,
    pub indicators: Vec<String>,
}

impl IncomeQuery {
    /// First quintile in the data, account ownership only.
    pub fn default_for(table: &Table) -> Result<Option<Self>, PipelineError> {
        Ok(table
            .distinct_values(INCOME_QUINTILE)?
            .into_iter()
            .next()
            .map(|quintile| Self {
                quintile,
                indicators: default_indicators(),
            }))
    }

    pub fn run(&self, table: &Table) -> Result<SliceAnalysis, PipelineError> {
        let spec = FilterSpec::new().with(INCOME_QUINTILE, [self.quintile.clone()]);
        analyse_slice(table, &spec, &self.indicators)
    }

    pub fn heading(&self) -> String {
        format!("Analysis for Income Quintile {}", self.quintile)
    }

    pub fn chart_title(&self, indicator: &str) -> String {
        format!("{} for Income Quintile {}", capitalize(indicator), self.quintile)
    }

    pub fn summary_sentence(&self, indicator: &str, pct: f64) -> String {
        format!(
            "{pct:.1}% of respondents in Income Quintile {} have {}.",
            self.quintile,
            indicator.replace('_', " ")
        )
    }
}

// ---------------------------------------------------------------------------
// Gender and age group
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gender {
    #[default]
    Female,
    Male,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Female, Gender::Male];

    /// Code used by the `female` column.
    pub fn code(self) -> i64 {
        match self {
            Gender::Female => 1,
            Gender::Male => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Gender::Female => "Female",
            Gender::Male => "Male",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenderQuery {
    pub gender: Gender,
    pub age_group: Scalar,
    pub indicators: Vec<String>,
}

impl GenderQuery {
    pub fn default_for(table: &Table) -> Result<Option<Self>, PipelineError> {
        Ok(table
            .distinct_values(AGE_GROUP)?
            .into_iter()
            .next()
            .map(|age_group| Self {
                gender: Gender::default(),
                age_group,
                indicators: default_indicators(),
            }))
    }

    pub fn run(&self, table: &Table) -> Result<SliceAnalysis, PipelineError> {
        let spec = FilterSpec::new()
            .with(FEMALE, [self.gender.code()])
            .with(AGE_GROUP, [self.age_group.clone()]);
        analyse_slice(table, &spec, &self.indicators)
    }

    pub fn heading(&self) -> String {
        format!(
            "Analysis for {}s in {} Age Group",
            self.gender.label(),
            self.age_group
        )
    }

    pub fn chart_title(&self, indicator: &str) -> String {
        format!(
            "{} for {}s in {} Age Group",
            capitalize(indicator),
            self.gender.label(),
            self.age_group
        )
    }

    pub fn summary_sentence(&self, indicator: &str, pct: f64) -> String {
        format!(
            "{pct:.1}% of {}s in the {} age group have {}.",
            self.gender.label(),
            self.age_group,
            indicator.replace('_', " ")
        )
    }
}
