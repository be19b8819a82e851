use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use findex_explorer::analysis::{
    economy_shares, GenderQuery, IncomeQuery, RegionalQuery, SliceAnalysis, AGE_GROUP,
    INCOME_QUINTILE, REGION,
};
use findex_explorer::data::{DatasetStore, PipelineError, Scalar, SummaryRow, Table};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Sidebar sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Home,
    Glossary,
    Regional,
    Income,
    Gender,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Home,
        Section::Glossary,
        Section::Regional,
        Section::Income,
        Section::Gender,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Home => "Home",
            Section::Glossary => "Description of Variables",
            Section::Regional => "Regional-Based Analysis",
            Section::Income => "Income-Based Analysis",
            Section::Gender => "Gender-Based Analysis",
        }
    }
}

/// Selector options drawn from the loaded table.
#[derive(Debug, Clone, Default)]
pub struct Choices {
    pub regions: Vec<Scalar>,
    pub quintiles: Vec<Scalar>,
    pub age_groups: Vec<Scalar>,
}

/// The full UI state, independent of rendering.
///
/// Widget selections live here; every change re-runs the affected request
/// and stores its result for the next frame to draw.
#[derive(Default)]
pub struct AppState {
    /// Store for the open dataset (None until a file is loaded).
    pub store: Option<DatasetStore>,
    pub table: Option<Arc<Table>>,
    pub choices: Choices,

    pub section: Section,

    pub regional: Option<RegionalQuery>,
    pub income: Option<IncomeQuery>,
    pub gender: Option<GenderQuery>,

    pub overview: Option<Result<Vec<SummaryRow>, PipelineError>>,
    pub regional_result: Option<Result<Vec<SummaryRow>, PipelineError>>,
    pub income_result: Option<Result<SliceAnalysis, PipelineError>>,
    pub gender_result: Option<Result<SliceAnalysis, PipelineError>>,

    /// Stable colours for region bars.
    pub region_colors: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

fn log_failure<T>(what: &str, result: &Result<T, PipelineError>) {
    match result {
        Err(e) if e.is_empty_partition() => log::warn!("{what}: {e}"),
        Err(e) => log::error!("{what}: {e}"),
        Ok(_) => {}
    }
}

impl AppState {
    /// Load `path` through a fresh store and make it the active dataset.
    /// On failure the previous dataset stays in place.
    pub fn open(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        let store = DatasetStore::new(path);
        let table = store
            .load()
            .with_context(|| format!("loading {}", store.path().display()))?;
        self.set_dataset(store, table)
    }

    /// Ingest a loaded dataset: derive selector options and default queries,
    /// then compute every view once.
    pub fn set_dataset(&mut self, store: DatasetStore, table: Arc<Table>) -> Result<()> {
        let choices = Choices {
            regions: table.distinct_values(REGION)?,
            quintiles: table.distinct_values(INCOME_QUINTILE)?,
            age_groups: table.distinct_values(AGE_GROUP)?,
        };
        log::info!(
            "dataset ready: {} respondents, {} regions, {} quintiles, {} age groups",
            table.len(),
            choices.regions.len(),
            choices.quintiles.len(),
            choices.age_groups.len()
        );

        self.region_colors = Some(ColorMap::new(&choices.regions));
        self.regional = Some(RegionalQuery::default_for(&table)?);
        self.income = IncomeQuery::default_for(&table)?;
        self.gender = GenderQuery::default_for(&table)?;
        self.choices = choices;
        self.store = Some(store);
        self.table = Some(table);
        self.status_message = None;

        self.refresh_overview();
        self.refresh_regional();
        self.refresh_income();
        self.refresh_gender();
        Ok(())
    }

    pub fn refresh_overview(&mut self) {
        self.overview = self.table.as_deref().map(|table| {
            let result = economy_shares(table);
            log_failure("overview", &result);
            result
        });
    }

    /// Re-run the regional comparison for the current selections.
    pub fn refresh_regional(&mut self) {
        self.regional_result = match (self.table.as_deref(), &self.regional) {
            (Some(table), Some(query)) => {
                let result = query.run(table);
                log_failure("regional comparison", &result);
                Some(result)
            }
            _ => None,
        };
    }

    pub fn refresh_income(&mut self) {
        self.income_result = match (self.table.as_deref(), &self.income) {
            (Some(table), Some(query)) => {
                let result = query.run(table);
                log_failure("income analysis", &result);
                Some(result)
            }
            _ => None,
        };
    }

    pub fn refresh_gender(&mut self) {
        self.gender_result = match (self.table.as_deref(), &self.gender) {
            (Some(table), Some(query)) => {
                let result = query.run(table);
                log_failure("gender analysis", &result);
                Some(result)
            }
            _ => None,
        };
    }

    /// Add or remove a region from the comparison.
    pub fn toggle_region(&mut self, region: &Scalar) {
        if let Some(query) = &mut self.regional {
            toggle(&mut query.regions, region.clone());
            self.refresh_regional();
        }
    }

    pub fn toggle_income_indicator(&mut self, indicator: &str) {
        if let Some(query) = &mut self.income {
            toggle(&mut query.indicators, indicator.to_string());
            self.refresh_income();
        }
    }

    pub fn toggle_gender_indicator(&mut self, indicator: &str) {
        if let Some(query) = &mut self.gender {
            toggle(&mut query.indicators, indicator.to_string());
            self.refresh_gender();
        }
    }
}

/// Insert `value` if absent, remove it otherwise. Insertion keeps selection order.
fn toggle<T: PartialEq>(selected: &mut Vec<T>, value: T) {
    if let Some(pos) = selected.iter().position(|v| *v == value) {
        selected.remove(pos);
    } else {
        selected.push(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use findex_explorer::data::loader::read_csv;

    const SURVEY: &str = "\
economy,regionwb,inc_q,female,age_group,account,saved,borrowed,anydigpayment
Kenya,Sub-Saharan Africa,1,1,15-24,1,0,1,1
Kenya,Sub-Saharan Africa,2,2,25-34,0,1,0,0
Chile,Latin America & Caribbean,1,1,15-24,1,1,0,1
India,South Asia,5,2,15-24,1,,1,0
";

    fn loaded() -> AppState {
        let table = read_csv(SURVEY.as_bytes()).unwrap();
        let store = DatasetStore::from_table("survey.csv", table);
        let table = store.load().unwrap();
        let mut state = AppState::default();
        state.set_dataset(store, table).unwrap();
        state
    }

    #[test]
    fn defaults_pick_first_seen_values() {
        let state = loaded();

        assert_eq!(
            state.regional.as_ref().unwrap().regions,
            vec![Scalar::from("Sub-Saharan Africa")]
        );
        assert_eq!(state.income.as_ref().unwrap().quintile, Scalar::Integer(1));
        assert_eq!(state.gender.as_ref().unwrap().age_group, Scalar::from("15-24"));
        assert_eq!(state.choices.regions.len(), 3);
    }

    #[test]
    fn toggling_regions_recomputes_the_comparison() {
        let mut state = loaded();
        state.toggle_region(&Scalar::from("South Asia"));

        let rows = state.regional_result.clone().unwrap().unwrap();
        let groups: Vec<_> = rows.iter().map(|r| r.group.as_str()).collect();
        assert_eq!(groups, vec!["Sub-Saharan Africa", "South Asia"]);

        state.toggle_region(&Scalar::from("Sub-Saharan Africa"));
        let rows = state.regional_result.clone().unwrap().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].value, 1.0);
    }

    #[test]
    fn empty_slice_is_reported_per_indicator() {
        let mut state = loaded();
        state.gender.as_mut().unwrap().age_group = Scalar::from("65+");
        state.refresh_gender();

        let analysis = state.gender_result.clone().unwrap().unwrap();
        assert_eq!(analysis.respondents, 0);
        assert!(analysis.indicators[0]
            .outcome
            .as_ref()
            .unwrap_err()
            .is_empty_partition());
    }

    #[test]
    fn failed_open_keeps_previous_dataset() {
        let mut state = loaded();
        assert!(state.open("/nonexistent/other.csv").is_err());
        assert_eq!(state.table.as_ref().unwrap().len(), 4);
    }

    #[test]
    fn indicator_toggle_adds_and_removes() {
        let mut state = loaded();
        state.toggle_income_indicator("saved");
        assert_eq!(
            state.income.as_ref().unwrap().indicators,
            vec!["account".to_string(), "saved".to_string()]
        );
        state.toggle_income_indicator("account");
        assert_eq!(state.income.as_ref().unwrap().indicators, vec!["saved".to_string()]);
    }
}
