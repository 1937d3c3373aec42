use binlens_common::{BinlensError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const ELLIPSIS: &str = "...";
/// Upper bound on interior edges for one range.
pub const MAX_EDGES: usize = 1_000_000;

/// Evenly spaced range, the structured form of a description like `"0 1 ... 5"`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeSpec {
    pub start: f64,
    pub step: f64,
    pub end: f64,
}

fn parse_token(desc: &str, token: &str) -> Result<f64> {
    token.parse::<f64>().map_err(|e| BinlensError::Parse {
        input: desc.to_owned(),
        reason: format!("'{token}' is not a number"),
        source: Some(e),
    })
}

impl RangeSpec {
    pub fn new(start: f64, step: f64, end: f64) -> Result<Self> {
        if !(start.is_finite() && step.is_finite() && end.is_finite()) {
            return Err(BinlensError::InvalidRange(format!(
                "start, step and end must be finite (got {start}, {step}, {end})"
            )));
        }
        if step == 0.0 {
            return Err(BinlensError::InvalidRange("step must not be zero".into()));
        }
        Ok(Self { start, step, end })
    }

    pub fn is_descending(&self) -> bool {
        self.step < 0.0
    }

    /// Number of interior edges, `round((end - start) / step) + 1`.
    pub fn edge_count(&self) -> Result<usize> {
        let count = ((self.end - self.start) / self.step).round() + 1.0;
        if count < 1.0 {
            return Err(BinlensError::InvalidRange(format!(
                "end {} is not reachable from {} with step {}",
                self.end, self.start, self.step
            )));
        }
        if count > MAX_EDGES as f64 {
            return Err(BinlensError::InvalidRange(format!(
                "step {} over {}..{} gives more than {MAX_EDGES} edges",
                self.step, self.start, self.end
            )));
        }
        Ok(count as usize)
    }

    /// Interior edges from `start` to `end` inclusive.
    ///
    /// Values are interpolated rather than accumulated so the last edge is
    /// exactly `end`.
    pub fn interior(&self) -> Result<Vec<f64>> {
        let count = self.edge_count()?;
        if count == 1 {
            return Ok(vec![self.start]);
        }
        let step = (self.end - self.start) / (count - 1) as f64;
        let mut values: Vec<f64> = (0..count).map(|i| self.start + i as f64 * step).collect();
        values[count - 1] = self.end;
        Ok(values)
    }

    /// Interior edges, optionally capped by infinite sentinels.
    ///
    /// Sentinel positions are always left then right; for a descending step
    /// the left sentinel is `+inf` and the right one `-inf`.
    pub fn edges(&self, left_open: bool, right_open: bool) -> Result<Vec<f64>> {
        let (left_sentinel, right_sentinel) = if self.is_descending() {
            (f64::INFINITY, f64::NEG_INFINITY)
        } else {
            (f64::NEG_INFINITY, f64::INFINITY)
        };
        let interior = self.interior()?;
        let mut edges = Vec::with_capacity(interior.len() + 2);
        if left_open {
            edges.push(left_sentinel);
        }
        edges.extend(interior);
        if right_open {
            edges.push(right_sentinel);
        }
        Ok(edges)
    }
}

impl FromStr for RangeSpec {
    type Err = BinlensError;

    fn from_str(desc: &str) -> Result<Self> {
        let parts: Vec<&str> = desc.split_whitespace().collect();
        if parts.len() != 4 {
            return Err(BinlensError::parse(
                desc,
                format!("expected 'start second ... end', got {} tokens", parts.len()),
            ));
        }
        let start = parse_token(desc, parts[0])?;
        let second = parse_token(desc, parts[1])?;
        if parts[2] != ELLIPSIS {
            return Err(BinlensError::parse(
                desc,
                format!("expected '{ELLIPSIS}' as third token, got '{}'", parts[2]),
            ));
        }
        let end = parse_token(desc, parts[3])?;
        RangeSpec::new(start, second - start, end)
    }
}

/// Turn a description such as `"1 2 ... 5"` into `[-inf, 1, 2, 3, 4, 5, inf]`.
pub fn make_bin_edges(desc: &str, left_open: bool, right_open: bool) -> Result<Vec<f64>> {
    desc.parse::<RangeSpec>()?.edges(left_open, right_open)
}

/// Put edges in ascending order, reversing a descending sequence.
pub fn ascending(mut edges: Vec<f64>) -> Vec<f64> {
    if edges.len() > 1 && edges[0] > edges[edges.len() - 1] {
        edges.reverse();
    }
    edges
}
