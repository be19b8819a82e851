use std::collections::HashMap;

use super::error::PipelineError;
use super::model::{Scalar, Statistic, SummaryRow, Table};

/// Label used for the single partition of an ungrouped request.
pub const ALL_ROWS: &str = "all";

// ---------------------------------------------------------------------------
// group_mean
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Partition {
    key: Scalar,
    sum: f64,
    count: usize,
}

/// Mean of `target` per distinct value of `group_key` (or over the whole
/// table when `group_key` is `None`).
///
/// Partitions come out in first-seen order of their key. Rows with a missing
/// key are left out, as are missing target values. A partition with no
/// target values at all fails the request with
/// [`PipelineError::EmptyPartition`].
pub fn group_mean(
    table: &Table,
    group_key: Option<&str>,
    target: &str,
) -> Result<Vec<SummaryRow>, PipelineError> {
    let target_idx = table.column_index(target)?;
    if !table.columns()[target_idx].kind.is_numeric() {
        return Err(PipelineError::NonNumericTarget(target.to_string()));
    }
    let group_idx = group_key.map(|k| table.column_index(k)).transpose()?;

    let mut partitions: Vec<Partition> = Vec::new();
    let mut slots: HashMap<Scalar, usize> = HashMap::new();

    if group_idx.is_none() {
        partitions.push(Partition {
            key: Scalar::String(ALL_ROWS.to_string()),
            sum: 0.0,
            count: 0,
        });
    }

    for row in table.rows() {
        let slot = match group_idx {
            None => 0,
            Some(idx) => {
                let key = &row[idx];
                if key.is_missing() {
                    continue;
                }
                match slots.get(key) {
                    Some(&slot) => slot,
                    None => {
                        partitions.push(Partition {
                            key: key.clone(),
                            sum: 0.0,
                            count: 0,
                        });
                        slots.insert(key.clone(), partitions.len() - 1);
                        partitions.len() - 1
                    }
                }
            }
        };

        let cell = &row[target_idx];
        if cell.is_missing() {
            continue;
        }
        if let Some(v) = cell.as_f64() {
            let p = &mut partitions[slot];
            p.sum += v;
            p.count += 1;
        }
    }

    if partitions.is_empty() {
        return Err(PipelineError::EmptyPartition {
            group: ALL_ROWS.to_string(),
            target: target.to_string(),
        });
    }

    partitions
        .into_iter()
        .map(|p| {
            let group = p.key.to_string();
            if p.count == 0 {
                return Err(PipelineError::EmptyPartition {
                    group,
                    target: target.to_string(),
                });
            }
            Ok(SummaryRow {
                group,
                target: target.to_string(),
                statistic: Statistic::Mean,
                value: p.sum / p.count as f64,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// value_percentage / value_counts
// ---------------------------------------------------------------------------

/// Share (0–100) of non-missing `target` values equal to `value_of_interest`.
///
/// `value_of_interest` is compared in canonical form, so `1`, `1.0` and
/// `true` all count the code `1`. Returns `0.0` when the value never occurs. Fails with
/// [`PipelineError::EmptyPartition`] when `target` has no non-missing values.
pub fn value_percentage(
    table: &Table,
    target: &str,
    value_of_interest: &Scalar,
) -> Result<f64, PipelineError> {
    let idx = table.column_index(target)?;
    let wanted = value_of_interest.clone().canonical();

    let mut present = 0usize;
    let mut hits = 0usize;
    for row in table.rows() {
        let cell = &row[idx];
        if cell.is_missing() {
            continue;
        }
        present += 1;
        if *cell == wanted {
            hits += 1;
        }
    }

    if present == 0 {
        return Err(PipelineError::EmptyPartition {
            group: ALL_ROWS.to_string(),
            target: target.to_string(),
        });
    }
    Ok(100.0 * hits as f64 / present as f64)
}

/// Normalized distribution of `target`: each distinct non-missing value with
/// its share (0–100) of non-missing responses, most frequent first. Ties keep
/// first-seen order.
pub fn value_counts(table: &Table, target: &str) -> Result<Vec<(Scalar, f64)>, PipelineError> {
    let idx = table.column_index(target)?;

    let mut counts: Vec<(Scalar, usize)> = Vec::new();
    let mut slots: HashMap<&Scalar, usize> = HashMap::new();
    let mut present = 0usize;

    for row in table.rows() {
        let cell = &row[idx];
        if cell.is_missing() {
            continue;
        }
        present += 1;
        match slots.get(cell) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(cell, counts.len());
                counts.push((cell.clone(), 1));
            }
        }
    }

    if present == 0 {
        return Err(PipelineError::EmptyPartition {
            group: ALL_ROWS.to_string(),
            target: target.to_string(),
        });
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(counts
        .into_iter()
        .map(|(value, n)| (value, 100.0 * n as f64 / present as f64))
        .collect())
}
