//! Loading objective matrices from CSV and JSON files.

use anyhow::{Context, Result, anyhow, bail};
use csv::{ReaderBuilder, Trim};
use ndarray::Array2;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// A matrix read from disk, plus the column names when the file had a header row.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    pub values: Array2<f64>,
    pub header: Option<Vec<String>>,
}

/// Load a matrix; `.json` files are read as JSON, anything else as CSV.
pub fn load_matrix<P: AsRef<Path>>(path: P) -> Result<Matrix> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let loaded = if is_json { load_json(file) } else { load_csv(file) };
    loaded.with_context(|| format!("reading {}", path.display()))
}

/// CSV with an optional header row (detected when the first row is not numeric),
/// `#` comment lines and surrounding whitespace ignored.
pub fn load_csv<R: Read>(reader: R) -> Result<Matrix> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut header = None;
    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let parsed: Result<Vec<f64>, _> = record.iter().map(str::parse::<f64>).collect();
        match parsed {
            Ok(row) => rows.push(row),
            Err(_) if i == 0 => header = Some(record.iter().map(str::to_string).collect()),
            Err(e) => bail!("line {}: {e}", record.position().map_or(i as u64 + 1, |p| p.line())),
        }
    }
    Ok(Matrix {
        values: to_array(rows)?,
        header,
    })
}

/// JSON array of number arrays, e.g. `[[1.0, 2.0], [3.0, 4.0]]`.
pub fn load_json<R: Read>(reader: R) -> Result<Matrix> {
    let rows: Vec<Vec<f64>> = serde_json::from_reader(reader)?;
    Ok(Matrix {
        values: to_array(rows)?,
        header: None,
    })
}

fn to_array(rows: Vec<Vec<f64>>) -> Result<Array2<f64>> {
    let n_cols = rows.first().map_or(0, Vec::len);
    if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_cols) {
        return Err(anyhow!(
            "row {} has {} values, expected {n_cols}",
            i + 1,
            row.len()
        ));
    }
    let n_rows = rows.len();
    Ok(Array2::from_shape_vec(
        (n_rows, n_cols),
        rows.into_iter().flatten().collect(),
    )?)
}
