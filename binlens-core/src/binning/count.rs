use binlens_common::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountRow<K> {
    pub key: K,
    pub count: u64,
    pub pct: f64,
    pub pct_cum: f64,
}

/// Occurrence counts per key, kept in the order the keys were given.
///
/// Percentages are relative to `total`, which includes values that fell in no
/// row, so the row `pct` values plus the unassigned share sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountTable<K> {
    rows: Vec<CountRow<K>>,
    unassigned: u64,
    total: u64,
}

impl<K> CountTable<K> {
    /// `keys` and `counts` must have the same length.
    pub fn from_counts(keys: impl IntoIterator<Item = K>, counts: &[u64], unassigned: u64) -> Self {
        let keys: Vec<K> = keys.into_iter().collect();
        debug_assert_eq!(keys.len(), counts.len(), "one count per key");
        let total = counts.iter().sum::<u64>() + unassigned;
        let mut running = 0.0;
        let rows = keys
            .into_iter()
            .zip(counts.iter().copied())
            .map(|(key, count)| {
                let pct = if total > 0 {
                    count as f64 / total as f64 * 100.0
                } else {
                    0.0
                };
                running += pct;
                CountRow { key, count, pct, pct_cum: running }
            })
            .collect();
        Self { rows, unassigned, total }
    }

    pub fn rows(&self) -> &[CountRow<K>] {
        &self.rows
    }
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.rows.iter().map(|r| &r.key)
    }
    pub fn counts(&self) -> Vec<u64> {
        self.rows.iter().map(|r| r.count).collect()
    }
    pub fn len(&self) -> usize {
        self.rows.len()
    }
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
    pub fn total(&self) -> u64 {
        self.total
    }
    pub fn unassigned(&self) -> u64 {
        self.unassigned
    }
    pub fn unassigned_pct(&self) -> f64 {
        if self.total > 0 {
            self.unassigned as f64 / self.total as f64 * 100.0
        } else {
            0.0
        }
    }

    /// Replace keys; counts, percentages and row order are left as they are.
    pub fn map_keys<L>(&self, mut f: impl FnMut(&K) -> L) -> CountTable<L> {
        CountTable {
            rows: self
                .rows
                .iter()
                .map(|r| CountRow { key: f(&r.key), count: r.count, pct: r.pct, pct_cum: r.pct_cum })
                .collect(),
            unassigned: self.unassigned,
            total: self.total,
        }
    }

    pub fn try_map_keys<L>(&self, mut f: impl FnMut(&K) -> Result<L>) -> Result<CountTable<L>> {
        let mut rows = Vec::with_capacity(self.rows.len());
        for r in &self.rows {
            rows.push(CountRow { key: f(&r.key)?, count: r.count, pct: r.pct, pct_cum: r.pct_cum });
        }
        Ok(CountTable { rows, unassigned: self.unassigned, total: self.total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages_and_cumulative() {
        let t = CountTable::from_counts(["a", "b", "c"], &[1, 2, 1], 0);
        assert_eq!(t.total(), 4);
        let pcts: Vec<f64> = t.rows().iter().map(|r| r.pct).collect();
        assert_eq!(pcts, vec![25.0, 50.0, 25.0]);
        let cum: Vec<f64> = t.rows().iter().map(|r| r.pct_cum).collect();
        assert_eq!(cum, vec![25.0, 75.0, 100.0]);
    }

    #[test]
    fn unassigned_counts_toward_total() {
        let t = CountTable::from_counts(["a"], &[3], 1);
        assert_eq!(t.total(), 4);
        assert_eq!(t.rows()[0].pct, 75.0);
        assert_eq!(t.unassigned_pct(), 25.0);
    }

    #[test]
    fn empty_input_has_zero_pcts() {
        let t = CountTable::from_counts(["a", "b"], &[0, 0], 0);
        assert!(t.rows().iter().all(|r| r.pct == 0.0 && r.pct_cum == 0.0));
        assert_eq!(t.unassigned_pct(), 0.0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "one count per key")]
    fn mismatched_keys_and_counts_panic_in_debug() {
        let _ = CountTable::from_counts(["a", "b"], &[1, 2, 3], 0);
    }

    #[test]
    fn map_keys_keeps_counts_and_order() {
        let t = CountTable::from_counts([3, 1, 2], &[5, 0, 7], 2);
        let mapped = t.map_keys(|k| format!("k{k}"));
        assert_eq!(mapped.keys().cloned().collect::<Vec<_>>(), vec!["k3", "k1", "k2"]);
        assert_eq!(mapped.counts(), t.counts());
        assert_eq!(mapped.unassigned(), 2);
        for (a, b) in mapped.rows().iter().zip(t.rows()) {
            assert_eq!(a.pct, b.pct);
            assert_eq!(a.pct_cum, b.pct_cum);
        }
    }

    #[test]
    fn try_map_keys_stops_at_first_error() {
        let t = CountTable::from_counts([1, 2], &[1, 1], 0);
        let res: Result<CountTable<i32>> = t.try_map_keys(|k| {
            if *k == 2 { Err(binlens_common::BinlensError::Other("nope".into())) } else { Ok(*k) }
        });
        assert!(res.is_err());
    }
}
