use std::collections::{BTreeMap, BTreeSet};

use super::error::PipelineError;
use super::model::{Scalar, Table};

// ---------------------------------------------------------------------------
// Filter predicate: which values are allowed per column
// ---------------------------------------------------------------------------

/// Per-column selection: maps column_name → set of allowed values.
///
/// A row matches when, for every constrained column, its value is in the
/// allowed set. An empty set leaves that column unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    allowed: BTreeMap<String, BTreeSet<Scalar>>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the allowed values for `column`. Values are stored in
    /// canonical form, so `1.0` or `true` select the code `1`.
    pub fn with<I, V>(mut self, column: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Scalar>,
    {
        let values = values
            .into_iter()
            .map(|v| Into::<Scalar>::into(v).canonical())
            .collect();
        self.allowed.insert(column.into(), values);
        self
    }

    /// Constrained column names, in sorted order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.allowed.keys().map(String::as_str)
    }

    /// Whether no column carries an effective constraint.
    pub fn is_unconstrained(&self) -> bool {
        self.allowed.values().all(BTreeSet::is_empty)
    }
}

/// Return the rows of `table` that pass every constraint in `spec`, in their
/// original order. The input table is left untouched.
///
/// A constraint naming a column outside the schema is an error, even when its
/// value set is empty.
pub fn filter_rows(table: &Table, spec: &FilterSpec) -> Result<Table, PipelineError> {
    let mut active: Vec<(usize, &BTreeSet<Scalar>)> = Vec::new();
    for (col, selected) in &spec.allowed {
        let idx = table.column_index(col)?;
        if !selected.is_empty() {
            active.push((idx, selected));
        }
    }

    if active.is_empty() {
        return Ok(table.clone());
    }

    let rows = table
        .rows()
        .iter()
        .filter(|row| active.iter().all(|(idx, selected)| selected.contains(&row[*idx])))
        .cloned()
        .collect();

    let filtered = table.with_rows(rows);
    log::debug!(
        "filter on {:?} kept {} of {} rows",
        spec.columns().collect::<Vec<_>>(),
        filtered.len(),
        table.len()
    );
    Ok(filtered)
}
