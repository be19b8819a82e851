use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use super::error::{LoadError, PipelineError};

/// Floats at or above 2^53 no longer hold every integer exactly.
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

// ---------------------------------------------------------------------------
// Scalar – a single cell of the survey table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring the dtypes a survey extract carries.
/// Used as a `BTreeSet` / `BTreeMap` key downstream, so `Scalar` must be `Ord`.
///
/// Equality, ordering and hashing are per variant. Cells stored in a [`Table`]
/// are in [`Scalar::canonical`] form, so one number has one representation.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// A missing value. Never counted in a numerator or a denominator.
    Null,
}

// -- Manual Eq/Ord so we can put Scalar in BTreeSet --

impl Eq for Scalar {}

impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scalar {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use Scalar::*;
        fn discriminant(v: &Scalar) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Null, Null) => std::cmp::Ordering::Equal,
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for Scalar {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Scalar::String(s) => s.hash(state),
            Scalar::Integer(i) => i.hash(state),
            Scalar::Float(f) => f.to_bits().hash(state),
            Scalar::Bool(b) => b.hash(state),
            Scalar::Null => {}
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(s) => write!(f, "{s}"),
            Scalar::Integer(i) => write!(f, "{i}"),
            Scalar::Float(v) => write!(f, "{v}"),
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Null => write!(f, "<missing>"),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<i64> for Scalar {
    fn from(i: i64) -> Self {
        Scalar::Integer(i)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Float(v)
    }
}

impl Scalar {
    /// Interpret the value as an `f64` for averaging.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Scalar::Float(v) => Some(*v),
            Scalar::Integer(i) => Some(*i as f64),
            Scalar::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// The single representation this value takes inside a table: whole
    /// floats become integers and booleans become the 0/1 codes.
    pub fn canonical(self) -> Scalar {
        match self {
            Scalar::Float(f) if f.fract() == 0.0 && f.abs() < MAX_EXACT_FLOAT => {
                Scalar::Integer(f as i64)
            }
            Scalar::Bool(b) => Scalar::Integer(i64::from(b)),
            other => other,
        }
    }

    pub fn is_missing(&self) -> bool {
        match self {
            Scalar::Null => true,
            Scalar::Float(v) => v.is_nan(),
            _ => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// How a column's values are interpreted by the aggregation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColumnKind {
    /// Free-form labels such as `economy` or `regionwb`.
    Categorical,
    Numeric,
    /// Integer codes drawn from a set of at most two values, e.g. {1, 2} or {0, 1}.
    CodedBinary,
}

impl ColumnKind {
    /// Whether a mean over this column is meaningful.
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnKind::Numeric | ColumnKind::CodedBinary)
    }

    /// Classify a column from its values.
    pub fn infer<'a>(values: impl IntoIterator<Item = &'a Scalar>) -> Self {
        let mut all_integer = true;
        let mut all_numeric = true;
        let mut codes: BTreeSet<i64> = BTreeSet::new();

        for v in values {
            match v {
                _ if v.is_missing() => {}
                Scalar::Integer(_) | Scalar::Bool(_) => {
                    if codes.len() <= 2 {
                        codes.insert(v.as_f64().unwrap_or_default() as i64);
                    }
                }
                Scalar::Float(_) => all_integer = false,
                _ => {
                    all_integer = false;
                    all_numeric = false;
                    break;
                }
            }
        }

        if !all_numeric {
            ColumnKind::Categorical
        } else if all_integer && !codes.is_empty() && codes.len() <= 2 {
            ColumnKind::CodedBinary
        } else {
            ColumnKind::Numeric
        }
    }
}

/// One named column of the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

/// One survey response: a value per schema position.
pub type Row = Arc<[Scalar]>;

// ---------------------------------------------------------------------------
// Table – the immutable in-memory dataset
// ---------------------------------------------------------------------------

/// An immutable table. Every row holds exactly one value per column.
///
/// Rows and schema are reference-counted, so filtered views share storage
/// with the table they were derived from.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Arc<[Column]>,
    rows: Vec<Row>,
}

impl Table {
    /// Build a table, checking that every row matches the schema width and
    /// that column names are unique. Cells are stored in canonical form.
    pub fn new(columns: Vec<Column>, rows: Vec<Vec<Scalar>>) -> Result<Self, LoadError> {
        let mut seen = HashSet::new();
        for col in &columns {
            if !seen.insert(col.name.as_str()) {
                return Err(LoadError::DuplicateColumn(col.name.clone()));
            }
        }

        let width = columns.len();
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                if row.len() == width {
                    Ok(row.into_iter().map(Scalar::canonical).collect::<Row>())
                } else {
                    Err(LoadError::RaggedRow {
                        row: i,
                        expected: width,
                        found: row.len(),
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Table {
            columns: columns.into(),
            rows,
        })
    }

    /// Build a table whose column kinds are inferred from the data.
    pub fn from_records(names: Vec<String>, rows: Vec<Vec<Scalar>>) -> Result<Self, LoadError> {
        let rows: Vec<Vec<Scalar>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(Scalar::canonical).collect())
            .collect();
        let columns = names
            .into_iter()
            .enumerate()
            .map(|(idx, name)| {
                let kind = ColumnKind::infer(rows.iter().filter_map(|r| r.get(idx)));
                log::debug!("column '{name}' inferred as {kind:?}");
                Column { name, kind }
            })
            .collect();
        Table::new(columns, rows)
    }

    /// A table with the same schema and the given subset of rows.
    pub(crate) fn with_rows(&self, rows: Vec<Row>) -> Self {
        Table {
            columns: Arc::clone(&self.columns),
            rows,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Position of `name` in the schema.
    pub fn column_index(&self, name: &str) -> Result<usize, PipelineError> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| PipelineError::InvalidColumn(name.to_string()))
    }

    pub fn column(&self, name: &str) -> Result<&Column, PipelineError> {
        let idx = self.column_index(name)?;
        Ok(&self.columns[idx])
    }

    /// Cell at (`row`, `column`), or `None` if the row is out of range.
    pub fn value(&self, row: usize, column: &str) -> Result<Option<&Scalar>, PipelineError> {
        let idx = self.column_index(column)?;
        Ok(self.rows.get(row).map(|r| &r[idx]))
    }

    /// Distinct non-missing values of `column` in first-seen order.
    pub fn distinct_values(&self, column: &str) -> Result<Vec<Scalar>, PipelineError> {
        let idx = self.column_index(column)?;
        let mut seen = HashSet::new();
        Ok(self
            .rows
            .iter()
            .map(|r| &r[idx])
            .filter(|v| !v.is_missing() && seen.insert(*v))
            .cloned()
            .collect())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Aggregation output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Statistic {
    /// Arithmetic mean, a raw fraction for coded-binary targets.
    Mean,
    /// Share of a value among non-missing responses, 0–100.
    Percentage,
}

/// One summarized value, ready to hand to a chart as a (label, value) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub group: String,
    pub target: String,
    pub statistic: Statistic,
    pub value: f64,
}

impl SummaryRow {
    pub fn label_value(&self) -> (&str, f64) {
        (&self.group, self.value)
    }
}
