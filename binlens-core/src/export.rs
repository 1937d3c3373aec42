use crate::binning::CountTable;
use arrow::array::{ArrayRef, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use binlens_common::{BinlensError, Result};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

fn pct(v: f64) -> String {
    format!("{v:.1}%")
}

fn to_record_batch(table: &CountTable<String>) -> Result<RecordBatch> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("bin", DataType::Utf8, false),
        Field::new("count", DataType::UInt64, false),
        Field::new("pct", DataType::Utf8, false),
        Field::new("pct_cum", DataType::Utf8, false),
    ]));
    let rows = table.rows();
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.key.as_str()))),
        Arc::new(UInt64Array::from_iter_values(rows.iter().map(|r| r.count))),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| pct(r.pct)))),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| pct(r.pct_cum)))),
    ];
    Ok(RecordBatch::try_new(schema, columns)?)
}

/// Boxed text table, plus an `unassigned` line when some values fell in no bin.
pub fn render_table(table: &CountTable<String>) -> Result<String> {
    let batch = to_record_batch(table)?;
    let mut out = pretty_format_batches(&[batch])?.to_string();
    out.push('\n');
    if table.unassigned() > 0 {
        out.push_str(&format!(
            "{:<12} {} ({})\n",
            "unassigned:",
            table.unassigned(),
            pct(table.unassigned_pct())
        ));
    }
    out.push_str(&format!("{:<12} {}\n", "total:", table.total()));
    Ok(out)
}

pub fn to_json(table: &CountTable<String>) -> Result<String> {
    serde_json::to_string_pretty(table).map_err(|e| BinlensError::Other(e.to_string()))
}

pub fn export_json(output_path: &Path, table: &CountTable<String>) -> Result<()> {
    let mut file = std::fs::File::create(output_path)?;
    serde_json::to_writer_pretty(&mut file, table)
        .map_err(|e| BinlensError::Other(e.to_string()))?;
    writeln!(file)?;
    Ok(())
}

fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

pub fn write_csv(mut out: impl Write, table: &CountTable<String>) -> Result<()> {
    writeln!(out, "bin,count,pct,pct_cum")?;
    for row in table.rows() {
        writeln!(out, "{},{},{:.4},{:.4}", csv_escape(&row.key), row.count, row.pct, row.pct_cum)?;
    }
    out.flush()?;
    Ok(())
}

pub fn export_csv(output_path: &Path, table: &CountTable<String>) -> Result<()> {
    let file = std::fs::File::create(output_path)?;
    write_csv(std::io::BufWriter::new(file), table)
}
