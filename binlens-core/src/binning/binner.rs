use super::count::CountTable;
use super::interval::Interval;
use binlens_common::{BinlensError, Result};
use serde::{Deserialize, Serialize};

/// Per-value bin assignment against a fixed list of intervals.
///
/// `codes[i]` indexes into `intervals`; `None` marks a value that no interval
/// contains (outside the edges, or NaN).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinnedSeries {
    intervals: Vec<Interval>,
    codes: Vec<Option<usize>>,
}

fn check_ascending(edges: &[f64]) -> Result<()> {
    if edges.len() < 2 {
        return Err(BinlensError::InvalidRange(format!(
            "need at least two bin edges, got {}",
            edges.len()
        )));
    }
    if let Some(i) = edges.iter().position(|e| e.is_nan()) {
        return Err(BinlensError::UnsortedEdges {
            index: i,
            previous: if i > 0 { edges[i - 1] } else { f64::NAN },
            current: edges[i],
        });
    }
    for (i, w) in edges.windows(2).enumerate() {
        if w[0] >= w[1] {
            return Err(BinlensError::UnsortedEdges { index: i + 1, previous: w[0], current: w[1] });
        }
    }
    Ok(())
}

/// Assign each value to the `[E[i], E[i+1])` interval that holds it.
///
/// `edges` must be strictly ascending; descending output from
/// [`make_bin_edges`](super::make_bin_edges) goes through
/// [`ascending`](super::ascending) first.
pub fn bin_series(values: &[f64], edges: &[f64]) -> Result<BinnedSeries> {
    check_ascending(edges)?;
    let intervals: Vec<Interval> = edges.windows(2).map(|w| Interval::new(w[0], w[1])).collect();
    let codes = values
        .iter()
        .map(|&v| {
            if v.is_nan() {
                return None;
            }
            // number of edges <= v; the holding interval starts at the last of them
            let n = edges.partition_point(|&e| e <= v);
            if n == 0 || n == edges.len() {
                None
            } else {
                Some(n - 1)
            }
        })
        .collect();
    Ok(BinnedSeries { intervals, codes })
}

impl BinnedSeries {
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<Interval> {
        self.codes.get(i).copied().flatten().map(|c| self.intervals[c])
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<Interval>> + '_ {
        self.codes.iter().map(|c| c.map(|c| self.intervals[c]))
    }

    pub fn unassigned_count(&self) -> u64 {
        self.codes.iter().filter(|c| c.is_none()).count() as u64
    }

    /// Counts per interval in edge order, zero-count intervals included.
    pub fn value_counts(&self) -> CountTable<Interval> {
        let mut counts = vec![0u64; self.intervals.len()];
        let mut unassigned = 0u64;
        for code in &self.codes {
            match code {
                Some(c) => counts[*c] += 1,
                None => unassigned += 1,
            }
        }
        CountTable::from_counts(self.intervals.iter().copied(), &counts, unassigned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binning::{ascending, make_bin_edges};

    const INF: f64 = f64::INFINITY;

    #[test]
    fn counts_follow_edge_order() {
        let binned = bin_series(&[-100.0, 0.0, 5.0], &[-INF, -1000.0, 0.0, 1000.0]).unwrap();
        assert_eq!(binned.value_counts().counts(), vec![0, 1, 2]);
        assert_eq!(binned.unassigned_count(), 0);
    }

    #[test]
    fn edge_value_goes_right() {
        let edges = [0.0, 1.0, 2.0, 3.0];
        let binned = bin_series(&[1.0, 2.0, 0.0], &edges).unwrap();
        assert_eq!(binned.get(0), Some(Interval::new(1.0, 2.0)));
        assert_eq!(binned.get(1), Some(Interval::new(2.0, 3.0)));
        assert_eq!(binned.get(2), Some(Interval::new(0.0, 1.0)));
    }

    #[test]
    fn every_value_lands_in_unique_holding_interval() {
        let edges = make_bin_edges("-3 -2 ... 3", true, true).unwrap();
        let values: Vec<f64> = (-80..=80).map(|i| i as f64 * 0.05).collect();
        let binned = bin_series(&values, &edges).unwrap();
        for (v, iv) in values.iter().zip(binned.iter()) {
            let iv = iv.unwrap();
            assert!(iv.contains(*v), "{v} not in {iv}");
            let holders = binned.intervals().iter().filter(|i| i.contains(*v)).count();
            assert_eq!(holders, 1);
        }
    }

    #[test]
    fn outside_closed_edges_is_unassigned() {
        let binned = bin_series(&[-1.0, 0.5, 2.0, 9.0], &[0.0, 1.0, 2.0]).unwrap();
        let got: Vec<Option<Interval>> = binned.iter().collect();
        assert_eq!(got, vec![None, Some(Interval::new(0.0, 1.0)), None, None]);
        let vc = binned.value_counts();
        assert_eq!(vc.counts(), vec![1, 0]);
        assert_eq!(vc.unassigned(), 3);
        assert_eq!(vc.total(), 4);
    }

    #[test]
    fn nan_is_unassigned() {
        let binned = bin_series(&[f64::NAN, 1.0], &[-INF, 0.0, INF]).unwrap();
        assert_eq!(binned.get(0), None);
        assert_eq!(binned.get(1), Some(Interval::new(0.0, INF)));
    }

    #[test]
    fn descending_edges_rejected() {
        let edges = make_bin_edges("5 4 ... 0", true, true).unwrap();
        let err = bin_series(&[1.0], &edges).unwrap_err();
        assert!(matches!(err, BinlensError::UnsortedEdges { index: 1, .. }));
        assert!(bin_series(&[1.0], &ascending(edges)).is_ok());
    }

    #[test]
    fn duplicate_edges_rejected() {
        let err = bin_series(&[1.0], &[0.0, 1.0, 1.0]).unwrap_err();
        assert!(matches!(err, BinlensError::UnsortedEdges { index: 2, .. }));
    }

    #[test]
    fn single_edge_is_invalid_range() {
        let err = bin_series(&[1.0], &[0.0]).unwrap_err();
        assert!(matches!(err, BinlensError::InvalidRange(_)));
    }

    #[test]
    fn empty_values() {
        let binned = bin_series(&[], &[0.0, 1.0]).unwrap();
        assert!(binned.is_empty());
        let vc = binned.value_counts();
        assert_eq!(vc.counts(), vec![0]);
        assert_eq!(vc.total(), 0);
    }
}
