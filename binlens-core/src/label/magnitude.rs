//! Base-10 magnitude abbreviation (`1000` -> `1k`, `2500000` -> `2.5M`).

use super::options::{FormatOptions, FormatResult};

const SUFFIXES: [&str; 6] = ["", "k", "M", "G", "T", "P"];

fn is_zero_digits(s: &str) -> bool {
    s.chars().all(|c| c == '0' || c == '.')
}

fn trim_zero_fraction(body: String) -> String {
    match body.split_once('.') {
        Some((int, frac)) if frac.chars().all(|c| c == '0') => int.to_owned(),
        _ => body,
    }
}

/// Format `value` as `{sign}{prefix}{mantissa}{suffix}{postfix}`.
///
/// The sign goes before the prefix, so `-1000` with prefix `£` renders as
/// `-£1k`. Non-finite values are an error.
pub fn format_to_base_10(value: f64, options: &FormatOptions) -> FormatResult {
    if !value.is_finite() {
        return Err(format!("cannot abbreviate non-finite value {value}").into());
    }
    let p = options.precision;
    let scale = 10f64.powi(p.min(i32::MAX as usize) as i32);
    let mut mantissa = value.abs();
    let mut magnitude = 0;
    while magnitude < SUFFIXES.len() - 1 && (mantissa * scale).round() / scale >= 1000.0 {
        mantissa /= 1000.0;
        magnitude += 1;
    }
    let mut body = format!("{mantissa:.p$}");
    if options.trim_0_decimals {
        body = trim_zero_fraction(body);
    }
    let sign = if value < 0.0 && !is_zero_digits(&body) { "-" } else { "" };
    Ok(format!(
        "{sign}{}{body}{}{}",
        options.prefix, SUFFIXES[magnitude], options.postfix
    ))
}
