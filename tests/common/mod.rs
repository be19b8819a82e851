//! Fixtures shared by the integration tests.

use std::io::Write;

use tempfile::NamedTempFile;

/// Twelve respondents across three regions. `saved` is missing for two of
/// them and `anydigpayment` for half of the South Asia rows.
pub const SURVEY_CSV: &str = "\
economy,regionwb,inc_q,female,age_group,account,saved,borrowed,anydigpayment
Kenya,Sub-Saharan Africa,1,1,15-24,1,0,1,1
Kenya,Sub-Saharan Africa,1,2,15-24,0,0,0,0
Kenya,Sub-Saharan Africa,2,1,25-34,1,1,0,1
Nigeria,Sub-Saharan Africa,5,2,25-34,0,,1,0
India,South Asia,1,1,15-24,1,1,0,
India,South Asia,3,2,25-34,1,0,1,1
India,South Asia,5,1,25-34,0,,0,
Bangladesh,South Asia,1,2,15-24,0,0,1,0
Peru,Latin America & Caribbean,2,1,15-24,1,1,0,1
Peru,Latin America & Caribbean,5,2,25-34,1,1,1,1
Peru,Latin America & Caribbean,1,1,25-34,0,0,0,0
Peru,Latin America & Caribbean,2,2,15-24,1,0,0,1
";

/// Write `contents` to a temporary file with the given extension.
pub fn temp_file(contents: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("findex")
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write fixture");
    file.flush().expect("flush fixture");
    file
}

/// Approximate float comparison for percentages and means.
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
