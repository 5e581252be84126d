//! Parsers for the pipeline's text-table formats.
//!
//! Uploaded files often end with an empty line; it is skipped everywhere.

use std::fs;
use std::path::Path;

use nalgebra::Vector3;

use crate::error::PlaybackError;
use crate::time::MediaTime;

fn parse_fields<F>(input: &str, split: F) -> Result<Vec<Vec<f64>>, PlaybackError>
where
    F: for<'a> Fn(&'a str) -> Vec<&'a str>,
{
    let mut table = Vec::new();
    for (row, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut values = Vec::new();
        for field in split(line) {
            let value: f64 = field.parse().map_err(|_| PlaybackError::MalformedRow {
                row,
                reason: format!("not a number: `{field}`"),
            })?;
            values.push(value);
        }
        table.push(values);
    }
    Ok(table)
}

/// Parse a comma-separated table of floats.
pub fn parse_csv_table(input: &str) -> Result<Vec<Vec<f64>>, PlaybackError> {
    parse_fields(input, |line: &str| {
        line.split(',').map(str::trim).collect()
    })
}

/// Parse a space-separated table of floats.
pub fn parse_space_table(input: &str) -> Result<Vec<Vec<f64>>, PlaybackError> {
    parse_fields(input, |line: &str| line.split_whitespace().collect())
}

/// Parse camera timestamps: a csv file whose first line is a header and
/// whose first column holds nanosecond timestamps. Timestamps are
/// shifted to start near zero and converted to seconds.
pub fn parse_camera_timestamps(input: &str) -> Result<Vec<MediaTime>, PlaybackError> {
    let mut raw = Vec::new();
    for (row, line) in input.lines().enumerate().skip(1) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let field = line.split(',').next().unwrap_or("").trim();
        let value: f64 = field.parse().map_err(|_| PlaybackError::MalformedRow {
            row,
            reason: format!("not a timestamp: `{field}`"),
        })?;
        raw.push(value);
    }
    if raw.is_empty() {
        return Err(PlaybackError::DataNotReady {
            missing: "camera timestamps".to_string(),
            retry_after_ms: 0,
        });
    }
    let origin = raw[0].trunc();
    raw.iter()
        .map(|&nanos| MediaTime::from_seconds((nanos - origin) / 1_000_000_000.0))
        .collect()
}

/// Parse chunk timestamps: two space-separated columns, the timestamp in
/// seconds in the second one. Short lines are skipped.
pub fn parse_chunk_timestamps(input: &str) -> Result<Vec<MediaTime>, PlaybackError> {
    let mut timestamps = Vec::new();
    for (row, line) in input.lines().enumerate() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 2 {
            continue;
        }
        let value: f64 = fields[1].parse().map_err(|_| PlaybackError::MalformedRow {
            row,
            reason: format!("not a timestamp: `{}`", fields[1]),
        })?;
        timestamps.push(MediaTime::from_seconds(value)?);
    }
    Ok(timestamps)
}

/// Convert table rows to translations. The pipeline stores them y-z-x;
/// columns are reordered to x-y-z here.
pub fn translations_from_rows(rows: &[Vec<f64>]) -> Result<Vec<Vector3<f64>>, PlaybackError> {
    rows.iter()
        .enumerate()
        .map(|(row, values)| {
            if values.len() < 3 {
                return Err(PlaybackError::MalformedRow {
                    row,
                    reason: format!("expected 3 columns, got {}", values.len()),
                });
            }
            Ok(Vector3::new(values[2], values[0], values[1]))
        })
        .collect()
}

/// Convert table rows to Euler angle triples in file order.
pub fn euler_rows(rows: &[Vec<f64>]) -> Result<Vec<[f64; 3]>, PlaybackError> {
    rows.iter()
        .enumerate()
        .map(|(row, values)| {
            if values.len() < 3 {
                return Err(PlaybackError::MalformedRow {
                    row,
                    reason: format!("expected 3 columns, got {}", values.len()),
                });
            }
            Ok([values[0], values[1], values[2]])
        })
        .collect()
}

/// Convert table rows to plain 3d points, no reordering.
pub fn points_from_rows(rows: &[Vec<f64>]) -> Result<Vec<[f64; 3]>, PlaybackError> {
    rows.iter()
        .enumerate()
        .map(|(row, values)| {
            if values.len() < 3 {
                return Err(PlaybackError::MalformedRow {
                    row,
                    reason: format!("expected 3 columns, got {}", values.len()),
                });
            }
            Ok([values[0], values[1], values[2]])
        })
        .collect()
}

/// Read and parse a comma-separated table file.
pub fn load_csv_table(path: impl AsRef<Path>) -> Result<Vec<Vec<f64>>, PlaybackError> {
    parse_csv_table(&fs::read_to_string(path)?)
}

/// Read and parse a space-separated table file.
pub fn load_space_table(path: impl AsRef<Path>) -> Result<Vec<Vec<f64>>, PlaybackError> {
    parse_space_table(&fs::read_to_string(path)?)
}

/// Read and parse a camera timestamp file.
pub fn load_camera_timestamps(path: impl AsRef<Path>) -> Result<Vec<MediaTime>, PlaybackError> {
    parse_camera_timestamps(&fs::read_to_string(path)?)
}

/// Read and parse a chunk timestamp file.
pub fn load_chunk_timestamps(path: impl AsRef<Path>) -> Result<Vec<MediaTime>, PlaybackError> {
    parse_chunk_timestamps(&fs::read_to_string(path)?)
}
