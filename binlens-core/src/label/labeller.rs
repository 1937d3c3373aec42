use super::options::{FormatOptions, NumberFormatter};
use crate::binning::{CountTable, Interval};
use binlens_common::{BinlensError, Result};

fn render_bound(
    value: f64,
    formatter: Option<&dyn NumberFormatter>,
    options: &FormatOptions,
) -> Result<String> {
    match formatter {
        Some(f) if value.is_finite() => f
            .format_number(value, options)
            .map_err(|source| BinlensError::Format { value, source }),
        _ => Ok(value.to_string()),
    }
}

/// Human label for a bin, e.g. `"< 0"`, `"[0 - 1)"` or `">= 2"`.
///
/// Finite bounds go through `formatter` when one is given, otherwise they use
/// the plain `f64` display form. Infinite bounds never reach the formatter.
pub fn label_interval(
    interval: &Interval,
    formatter: Option<&dyn NumberFormatter>,
    options: &FormatOptions,
) -> Result<String> {
    let left = render_bound(interval.left, formatter, options)?;
    let right = render_bound(interval.right, formatter, options)?;
    let label = if interval.is_left_open_ended() {
        format!("< {right}")
    } else if interval.is_right_open_ended() {
        format!(">= {left}")
    } else {
        format!("[{left} - {right})")
    };
    Ok(label)
}

/// Relabel every interval key of `table`, keeping counts and row order.
///
/// Only interval-keyed tables can be labelled, so a labelled table cannot be
/// labelled a second time:
///
/// ```compile_fail
/// use binlens_core::{apply_labelling, bin_series, FormatOptions};
///
/// let table = bin_series(&[1.0], &[0.0, 2.0]).unwrap().value_counts();
/// let labelled = apply_labelling(&table, None, &FormatOptions::default()).unwrap();
/// let _twice = apply_labelling(&labelled, None, &FormatOptions::default());
/// ```
pub fn apply_labelling(
    table: &CountTable<Interval>,
    formatter: Option<&dyn NumberFormatter>,
    options: &FormatOptions,
) -> Result<CountTable<String>> {
    table.try_map_keys(|interval| label_interval(interval, formatter, options))
}
