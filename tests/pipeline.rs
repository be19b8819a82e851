//! End-to-end tests: load a survey file through the store, then drive the
//! filter / aggregate pipeline and the dashboard requests built on it.

mod common;

use std::sync::Arc;

use arrow::array::{BooleanArray, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use common::{assert_close, temp_file, SURVEY_CSV};
use findex_explorer::analysis::{
    economy_shares, Gender, GenderQuery, IncomeQuery, RegionalQuery, AFFIRMATIVE, REGION,
};
use findex_explorer::data::{
    filter_rows, group_mean, value_counts, value_percentage, ColumnKind, DatasetStore, FilterSpec,
    PipelineError, Scalar, Table,
};

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

fn load_survey() -> Arc<Table> {
    let file = temp_file(SURVEY_CSV, ".csv");
    DatasetStore::new(file.path()).load().unwrap()
}

fn groups_and_values(rows: &[findex_explorer::data::SummaryRow]) -> Vec<(String, f64)> {
    rows.iter().map(|r| (r.group.clone(), r.value)).collect()
}

fn strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

// ============================================================================
// DATASET STORE
// ============================================================================

#[test]
fn test_store_infers_schema() {
    let table = load_survey();

    assert_eq!(table.len(), 12);
    assert_eq!(table.column("regionwb").unwrap().kind, ColumnKind::Categorical);
    assert_eq!(table.column("inc_q").unwrap().kind, ColumnKind::Numeric);
    assert_eq!(table.column("female").unwrap().kind, ColumnKind::CodedBinary);
    assert_eq!(table.column("anydigpayment").unwrap().kind, ColumnKind::CodedBinary);
}

#[test]
fn test_store_serves_cached_table_after_file_is_gone() {
    let file = temp_file(SURVEY_CSV, ".csv");
    let store = DatasetStore::new(file.path());
    let first = store.load().unwrap();

    drop(file);

    let second = store.load().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_ragged_file_fails_to_load() {
    let file = temp_file("economy,account\nKenya,1\nPeru\n", ".csv");
    let store = DatasetStore::new(file.path());

    assert!(store.load().is_err());
    assert!(!store.is_loaded());
}

#[test]
fn test_json_and_csv_agree() {
    let json = r#"[
        {"economy": "Kenya", "regionwb": "Sub-Saharan Africa", "account": 1},
        {"economy": "Kenya", "regionwb": "Sub-Saharan Africa", "account": 0},
        {"economy": "Peru", "regionwb": "Latin America & Caribbean", "account": 1}
    ]"#;
    let file = temp_file(json, ".json");
    let table = DatasetStore::new(file.path()).load().unwrap();

    let rows = group_mean(&table, Some(REGION), "account").unwrap();
    assert_eq!(
        groups_and_values(&rows),
        vec![
            ("Sub-Saharan Africa".to_string(), 0.5),
            ("Latin America & Caribbean".to_string(), 1.0),
        ]
    );
}

#[test]
fn test_parquet_float_codes_are_normalized() {
    let schema = Arc::new(Schema::new(vec![
        Field::new("economy", DataType::Utf8, false),
        Field::new("account", DataType::Int64, true),
        Field::new("female", DataType::Float64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(vec!["Kenya", "Peru", "Chad"])),
            Arc::new(Int64Array::from(vec![Some(1), None, Some(0)])),
            Arc::new(Float64Array::from(vec![1.0, 2.0, 1.0])),
        ],
    )
    .unwrap();

    let file = temp_file("", ".parquet");
    let out = std::fs::File::create(file.path()).unwrap();
    let mut writer = ArrowWriter::try_new(out, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let table = DatasetStore::new(file.path()).load().unwrap();
    assert_eq!(table.value(1, "female").unwrap(), Some(&Scalar::Integer(2)));
    assert_eq!(table.value(1, "account").unwrap(), Some(&Scalar::Null));
    assert_close(value_percentage(&table, "account", &AFFIRMATIVE).unwrap(), 50.0);

    let women = filter_rows(&table, &FilterSpec::new().with("female", [1i64])).unwrap();
    assert_eq!(women.len(), 2);
}

#[test]
fn test_parquet_boolean_indicator_is_a_coded_column() {
    let schema = Arc::new(Schema::new(vec![
        Field::new("regionwb", DataType::Utf8, false),
        Field::new("account", DataType::Boolean, true),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(vec!["South Asia", "South Asia", "Europe & Central Asia"])),
            Arc::new(BooleanArray::from(vec![Some(true), Some(false), Some(true)])),
        ],
    )
    .unwrap();

    let file = temp_file("", ".parquet");
    let out = std::fs::File::create(file.path()).unwrap();
    let mut writer = ArrowWriter::try_new(out, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let table = DatasetStore::new(file.path()).load().unwrap();
    assert_eq!(table.column("account").unwrap().kind, ColumnKind::CodedBinary);

    let rows = group_mean(&table, Some(REGION), "account").unwrap();
    assert_eq!(
        groups_and_values(&rows),
        vec![
            ("South Asia".to_string(), 0.5),
            ("Europe & Central Asia".to_string(), 1.0),
        ]
    );
    let pct = value_percentage(&table, "account", &AFFIRMATIVE).unwrap();
    assert_close(pct, 200.0 / 3.0);
}

#[test]
fn test_counts_and_percentage_agree_on_mixed_number_column() {
    let file = temp_file("x\n1\n1.0\n0.5\n", ".csv");
    let table = DatasetStore::new(file.path()).load().unwrap();

    let counts = value_counts(&table, "x").unwrap();
    let pct = value_percentage(&table, "x", &Scalar::Integer(1)).unwrap();

    assert_eq!(counts.len(), 2);
    assert_eq!(counts[0].0, Scalar::Integer(1));
    assert_close(counts[0].1, pct);
    assert_close(pct, 200.0 / 3.0);
}

// ============================================================================
// FILTER + AGGREGATE
// ============================================================================

#[test]
fn test_unconstrained_filter_returns_whole_table() {
    let table = load_survey();
    let spec = FilterSpec::new()
        .with(REGION, Vec::<Scalar>::new())
        .with("inc_q", Vec::<Scalar>::new());

    assert_eq!(filter_rows(&table, &spec).unwrap(), *table);
}

#[test]
fn test_filter_is_idempotent_on_survey() {
    let table = load_survey();
    let spec = FilterSpec::new()
        .with("female", [2i64])
        .with("age_group", ["15-24", "25-34"]);

    let once = filter_rows(&table, &spec).unwrap();
    assert_eq!(filter_rows(&once, &spec).unwrap(), once);
    assert_eq!(once.len(), 6);
}

#[test]
fn test_grouped_means_are_consistent_with_overall_mean() {
    let table = load_survey();
    let grouped = group_mean(&table, Some(REGION), "saved").unwrap();
    let overall = group_mean(&table, None, "saved").unwrap()[0].value;

    let mut weighted = 0.0;
    let mut total = 0.0;
    for row in &grouped {
        let slice = filter_rows(
            &table,
            &FilterSpec::new().with(REGION, [row.group.as_str()]),
        )
        .unwrap();
        let answered = (0..slice.len())
            .filter(|&i| !slice.value(i, "saved").unwrap().unwrap().is_missing())
            .count() as f64;
        weighted += row.value * answered;
        total += answered;
    }

    assert_close(weighted / total, overall);
    assert_close(overall, 0.4);
}

#[test]
fn test_missing_values_excluded_from_percentage() {
    let table = load_survey();
    let south_asia =
        filter_rows(&table, &FilterSpec::new().with(REGION, ["South Asia"])).unwrap();

    // Two of the four South Asia rows have no answer; one of the other two is yes.
    assert_eq!(south_asia.len(), 4);
    assert_close(
        value_percentage(&south_asia, "anydigpayment", &AFFIRMATIVE).unwrap(),
        50.0,
    );
}

#[test]
fn test_unknown_target_is_invalid_column() {
    let table = load_survey();
    assert_eq!(
        value_percentage(&table, "has_account", &AFFIRMATIVE),
        Err(PipelineError::InvalidColumn("has_account".into()))
    );
}

// ============================================================================
// DASHBOARD REQUESTS
// ============================================================================

#[test]
fn test_overview_shares_by_economy() {
    let table = load_survey();
    let shares = economy_shares(&table).unwrap();

    assert_eq!(shares.len(), 5);
    assert_eq!(shares[0].group, "Peru");
    assert_eq!(shares[0].value, 33.33);
    assert_eq!(shares[1].value, 25.0);
    assert_eq!(shares[4].value, 8.33);
}

#[test]
fn test_regional_comparison_of_selected_regions() {
    let table = load_survey();
    let query = RegionalQuery {
        regions: vec!["South Asia".into(), "Latin America & Caribbean".into()],
        variable: "account".to_string(),
    };

    let rows = query.run(&table).unwrap();
    assert_eq!(
        groups_and_values(&rows),
        vec![
            ("South Asia".to_string(), 0.5),
            ("Latin America & Caribbean".to_string(), 0.75),
        ]
    );
    assert_eq!(query.chart_title(), "Comparison of account Across Selected Regions");
}

#[test]
fn test_regional_with_no_selection_compares_all_regions() {
    let table = load_survey();
    let query = RegionalQuery {
        regions: Vec::new(),
        variable: "account".to_string(),
    };

    let groups: Vec<_> = query.run(&table).unwrap().into_iter().map(|r| r.group).collect();
    assert_eq!(
        groups,
        vec!["Sub-Saharan Africa", "South Asia", "Latin America & Caribbean"]
    );
}

#[test]
fn test_regional_default_is_first_region() {
    let table = load_survey();
    let query = RegionalQuery::default_for(&table).unwrap();

    assert_eq!(query.regions, vec![Scalar::from("Sub-Saharan Africa")]);
    let rows = query.run(&table).unwrap();
    assert_eq!(rows.len(), 1);
    assert_close(rows[0].value, 0.5);
}

#[test]
fn test_income_quintile_breakdown() {
    let table = load_survey();
    let query = IncomeQuery {
        quintile: Scalar::Integer(1),
        indicators: strings(&["account", "saved", "anydigpayment"]),
    };

    let analysis = query.run(&table).unwrap();
    assert_eq!(analysis.respondents, 5);

    let account = analysis.indicators[0].outcome.as_ref().unwrap();
    assert_close(account.affirmative_pct, 40.0);
    assert_eq!(
        groups_and_values(&account.distribution),
        vec![("0".to_string(), 60.0), ("1".to_string(), 40.0)]
    );
    assert_eq!(
        query.summary_sentence("account", account.affirmative_pct),
        "40.0% of respondents in Income Quintile 1 have account."
    );

    let saved = analysis.indicators[1].outcome.as_ref().unwrap();
    assert_close(saved.affirmative_pct, 20.0);

    let digital = analysis.indicators[2].outcome.as_ref().unwrap();
    assert_close(digital.affirmative_pct, 25.0);
}

#[test]
fn test_gender_and_age_breakdown() {
    let table = load_survey();
    let query = GenderQuery {
        gender: Gender::Female,
        age_group: Scalar::from("25-34"),
        indicators: strings(&["account", "anydigpayment"]),
    };

    let analysis = query.run(&table).unwrap();
    assert_eq!(analysis.respondents, 3);

    let account = analysis.indicators[0].outcome.as_ref().unwrap();
    assert_eq!(
        query.summary_sentence("account", account.affirmative_pct),
        "33.3% of Females in the 25-34 age group have account."
    );
    let digital = analysis.indicators[1].outcome.as_ref().unwrap();
    assert_close(digital.affirmative_pct, 50.0);
}

#[test]
fn test_gender_slice_without_respondents() {
    let table = load_survey();
    let query = GenderQuery {
        gender: Gender::Male,
        age_group: Scalar::from("65+"),
        indicators: strings(&["account", "saved"]),
    };

    let analysis = query.run(&table).unwrap();
    assert_eq!(analysis.respondents, 0);
    for result in &analysis.indicators {
        assert!(result.outcome.as_ref().unwrap_err().is_empty_partition());
    }
}

#[test]
fn test_absent_affirmative_code_is_zero_percent() {
    let table = load_survey();
    let query = IncomeQuery {
        quintile: Scalar::Integer(3),
        indicators: strings(&["saved"]),
    };

    // The only quintile-3 respondent did not save.
    let analysis = query.run(&table).unwrap();
    let saved = analysis.indicators[0].outcome.as_ref().unwrap();
    assert_eq!(saved.affirmative_pct, 0.0);
}

#[test]
fn test_empty_region_filter_then_mean_is_empty_partition() {
    let table = load_survey();
    let none = filter_rows(&table, &FilterSpec::new().with(REGION, ["North America"])).unwrap();

    assert!(none.is_empty());
    assert!(group_mean(&none, Some(REGION), "account")
        .unwrap_err()
        .is_empty_partition());
}
