use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, AsArray};
use arrow::datatypes::{
    DataType, Float32Type, Float64Type, Int16Type, Int32Type, Int64Type, Int8Type,
};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::LoadError;
use super::model::{Scalar, Table};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a survey table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one respondent per line (the cleaned Findex export)
/// * `.json`    – `[{ "economy": "...", "account": 1, ... }, ...]`
/// * `.parquet` – flat scalar columns
pub fn load_file(path: &Path) -> Result<Table, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    log::info!(
        "loaded {} rows x {} columns from {}",
        table.len(),
        table.columns().len(),
        path.display()
    );
    Ok(table)
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, every following line one
/// respondent. Empty cells are missing values.
fn load_csv(path: &Path) -> Result<Table, LoadError> {
    read_csv(open(path)?)
}

/// Parse CSV from any reader. Row width is checked by [`Table::new`] so the
/// error names the offending row. Dataframe exports write coded columns with
/// gaps as floats (`1.0`, `2.0`); the table stores those as integer codes.
pub fn read_csv<R: std::io::Read>(input: R) -> Result<Table, LoadError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::Malformed("missing header row".to_string()));
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(guess_scalar).collect::<Vec<_>>());
    }

    Table::from_records(headers, rows)
}

fn guess_scalar(s: &str) -> Scalar {
    let s = s.trim();
    if s.is_empty() {
        return Scalar::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Scalar::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return if f.is_nan() { Scalar::Null } else { Scalar::Float(f) };
    }
    if s == "true" || s == "false" {
        return Scalar::Bool(s == "true");
    }
    Scalar::String(s.to_string())
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "economy": "Kenya", "regionwb": "Sub-Saharan Africa", "account": 1 },
///   ...
/// ]
/// ```
///
/// A key absent from a record is a missing value for that respondent.
fn load_json(path: &Path) -> Result<Table, LoadError> {
    let root: JsonValue = serde_json::from_reader(std::io::BufReader::new(open(path)?))?;
    table_from_json(&root)
}

pub fn table_from_json(root: &JsonValue) -> Result<Table, LoadError> {
    let records = root
        .as_array()
        .ok_or_else(|| LoadError::Malformed("expected top-level JSON array".to_string()))?;

    let mut names: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| LoadError::Malformed(format!("record {i} is not a JSON object")))?;
        for key in obj.keys() {
            if !names.contains(key) {
                names.push(key.clone());
            }
        }
    }

    let mut rows = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let mut row = Vec::with_capacity(names.len());
        for name in &names {
            let value = match rec.get(name) {
                Some(v) => json_to_scalar(v).ok_or_else(|| {
                    LoadError::Malformed(format!("record {i}, '{name}': nested values are not supported"))
                })?,
                None => Scalar::Null,
            };
            row.push(value);
        }
        rows.push(row);
    }

    Table::from_records(names, rows)
}

fn json_to_scalar(val: &JsonValue) -> Option<Scalar> {
    let scalar = match val {
        JsonValue::String(s) => Scalar::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                Scalar::Integer(i)
            } else if let Some(f) = n.as_f64() {
                Scalar::Float(f)
            } else {
                Scalar::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => Scalar::Bool(*b),
        JsonValue::Null => Scalar::Null,
        JsonValue::Array(_) | JsonValue::Object(_) => return None,
    };
    Some(scalar)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat scalar column per survey variable.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Table, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let names: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result?;
        for row in 0..batch.num_rows() {
            let values = batch
                .columns()
                .iter()
                .map(|col| extract_scalar(col, row))
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(values);
        }
    }

    Table::from_records(names, rows)
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_scalar(col: &Arc<dyn Array>, row: usize) -> Result<Scalar, LoadError> {
    if col.is_null(row) {
        return Ok(Scalar::Null);
    }
    let value = match col.data_type() {
        DataType::Utf8 => Scalar::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => Scalar::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int8 => Scalar::Integer(col.as_primitive::<Int8Type>().value(row) as i64),
        DataType::Int16 => Scalar::Integer(col.as_primitive::<Int16Type>().value(row) as i64),
        DataType::Int32 => Scalar::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => Scalar::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => {
            let v = col.as_primitive::<Float32Type>().value(row) as f64;
            if v.is_nan() { Scalar::Null } else { Scalar::Float(v) }
        }
        DataType::Float64 => {
            let v = col.as_primitive::<Float64Type>().value(row);
            if v.is_nan() { Scalar::Null } else { Scalar::Float(v) }
        }
        DataType::Boolean => Scalar::Bool(col.as_boolean().value(row)),
        other => {
            return Err(LoadError::Malformed(format!(
                "unsupported parquet column type {other:?}"
            )))
        }
    };
    Ok(value)
}
