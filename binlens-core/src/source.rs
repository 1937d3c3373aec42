use arrow::array::{Array, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use binlens_common::{BinlensError, Result};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::ProjectionMask;
use std::io::BufRead;
use std::path::{Path, PathBuf};

const BATCH_SIZE: usize = 65536;

fn is_parquet(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("parquet")
}

/// Whitespace separated numbers, any number per line; blank lines are skipped.
pub fn read_text_values(reader: impl BufRead) -> Result<Vec<f64>> {
    let mut values = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        for token in line.split_whitespace() {
            let v = token.parse::<f64>().map_err(|e| BinlensError::Parse {
                input: token.to_owned(),
                reason: format!("line {}: not a number", lineno + 1),
                source: Some(e),
            })?;
            values.push(v);
        }
    }
    Ok(values)
}

/// Read one numeric column as f64; nulls come back as NaN.
pub fn read_parquet_column(path: &Path, column: &str) -> Result<Vec<f64>> {
    let file = std::fs::File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let idx = schema
        .fields()
        .iter()
        .position(|f| f.name() == column)
        .ok_or_else(|| BinlensError::ColumnNotFound(column.to_owned()))?;
    let data_type = schema.field(idx).data_type();
    if !data_type.is_numeric() {
        return Err(BinlensError::Other(format!(
            "column '{column}' is {data_type}, not numeric"
        )));
    }
    let mask = ProjectionMask::roots(builder.parquet_schema(), [idx]);
    let reader = builder
        .with_projection(mask)
        .with_batch_size(BATCH_SIZE)
        .build()?;
    let mut values = Vec::new();
    for batch in reader {
        let batch = batch?;
        let floats = cast(batch.column(0), &DataType::Float64)?;
        let floats = floats.as_primitive::<Float64Type>();
        values.reserve(floats.len());
        values.extend(floats.iter().map(|v| v.unwrap_or(f64::NAN)));
    }
    Ok(values)
}

fn scan_recursive(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            scan_recursive(&path, out)?;
        } else if is_parquet(&path) {
            out.push(path);
        }
    }
    Ok(())
}

/// Resolve a single file, a directory (recursive, `*.parquet`) or a glob pattern.
pub fn resolve_paths(input: &str) -> Result<Vec<PathBuf>> {
    let path = Path::new(input);
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut results = Vec::new();
    if path.is_dir() {
        scan_recursive(path, &mut results)?;
    } else {
        let entries = glob::glob(input).map_err(|e| BinlensError::Other(e.to_string()))?;
        results.extend(entries.flatten().filter(|p| p.is_file()));
    }
    results.sort();
    Ok(results)
}

/// Load sample values from stdin (`-`), a text file, or Parquet file(s).
pub fn load_values(input: &str, column: Option<&str>) -> Result<Vec<f64>> {
    if input == "-" {
        return read_text_values(std::io::stdin().lock());
    }
    let paths = resolve_paths(input)?;
    if paths.is_empty() {
        return Err(BinlensError::Other(format!("no input found: {input}")));
    }
    if paths.iter().all(|p| is_parquet(p)) {
        let column = column.ok_or_else(|| {
            BinlensError::Other("a column name is required for Parquet input".into())
        })?;
        let mut values = Vec::new();
        for p in &paths {
            values.extend(read_parquet_column(p, column)?);
        }
        return Ok(values);
    }
    let mut values = Vec::new();
    for p in &paths {
        let file = std::fs::File::open(p)?;
        values.extend(read_text_values(std::io::BufReader::new(file))?);
    }
    Ok(values)
}
