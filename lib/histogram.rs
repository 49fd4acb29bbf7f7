//! Tallies of measurement outcomes over many shots.

use std::fmt;
use itertools::Itertools;
use rustc_hash::FxHashMap as HashMap;
use thiserror::Error;
use crate::bits::BitString;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistogramError {
    #[error("histogram: outcome {0} has width {1}, expected {2}")]
    OutcomeWidth(BitString, usize, usize),

    #[error("histogram: cannot merge histograms of widths {0} and {1}")]
    MergeWidth(usize, usize),
}
pub type HistogramResult<T> = Result<T, HistogramError>;

/// Counts of measurement outcomes, all of the same width.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Histogram {
    width: usize,
    counts: HashMap<BitString, usize>,
    total: usize,
}

impl Histogram {
    /// Create a new, empty histogram over `width`-bit outcomes.
    pub fn new(width: usize) -> Self {
        Self { width, counts: HashMap::default(), total: 0 }
    }

    /// Return the width of the outcomes.
    pub fn width(&self) -> usize { self.width }

    /// Return the total number of recorded shots.
    pub fn total(&self) -> usize { self.total }

    /// Return the number of distinct outcomes seen.
    pub fn len(&self) -> usize { self.counts.len() }

    /// Return `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool { self.counts.is_empty() }

    /// Add one occurrence of `outcome`.
    pub fn record(&mut self, outcome: BitString) -> HistogramResult<()> {
        if outcome.width() != self.width {
            return Err(
                HistogramError::OutcomeWidth(outcome, outcome.width(), self.width)
            );
        }
        *self.counts.entry(outcome).or_insert(0) += 1;
        self.total += 1;
        Ok(())
    }

    /// Return the count for a given outcome.
    pub fn count(&self, outcome: &BitString) -> usize {
        self.counts.get(outcome).copied().unwrap_or(0)
    }

    /// Return the count for an outcome written as a string of `0`s and `1`s.
    ///
    /// Strings that don't parse as a bitstring have count zero.
    pub fn get(&self, outcome: &str) -> usize {
        outcome.parse::<BitString>()
            .map(|b| self.count(&b))
            .unwrap_or(0)
    }

    /// Return `true` if `outcome` has been seen at least once.
    pub fn contains(&self, outcome: &str) -> bool { self.get(outcome) > 0 }

    /// Iterate over `(outcome, count)` pairs in ascending bitstring order.
    pub fn iter(&self) -> impl Iterator<Item = (BitString, usize)> + '_ {
        self.counts.iter()
            .map(|(b, n)| (*b, *n))
            .sorted_by_key(|(b, _)| *b)
    }

    /// Return the empirical probability of each seen outcome, in ascending
    /// bitstring order.
    pub fn probabilities(&self) -> Vec<(BitString, f64)> {
        if self.total == 0 { return Vec::new(); }
        let total = self.total as f64;
        self.iter().map(|(b, n)| (b, n as f64 / total)).collect()
    }

    /// Return the outcome with the highest count, breaking ties in favor of the
    /// lowest bitstring.
    pub fn most_frequent(&self) -> Option<(BitString, usize)> {
        self.iter()
            .fold(None, |best: Option<(BitString, usize)>, (b, n)| {
                match best {
                    Some((_, m)) if m >= n => best,
                    _ => Some((b, n)),
                }
            })
    }

    /// Add all counts in `other` to `self`.
    pub fn merge(&mut self, other: &Self) -> HistogramResult<()> {
        if other.width != self.width {
            return Err(HistogramError::MergeWidth(self.width, other.width));
        }
        for (b, n) in other.counts.iter() {
            *self.counts.entry(*b).or_insert(0) += *n;
        }
        self.total += other.total;
        Ok(())
    }

    /// Like [`merge`][Self::merge], but consuming both.
    pub fn merged(mut self, other: Self) -> HistogramResult<Self> {
        self.merge(&other)?;
        Ok(self)
    }

    /// Render a horizontal bar chart with one row per seen outcome.
    ///
    /// Bars are scaled so that the most frequent outcome spans `max_width`
    /// characters.
    pub fn render_bars(&self, max_width: usize) -> String {
        if self.is_empty() { return "(no shots)".to_string(); }
        let max_count = self.counts.values().copied().max().unwrap_or(1).max(1);
        let count_width = max_count.to_string().len();
        let total = self.total as f64;
        self.iter()
            .map(|(b, n)| {
                let len
                    = ((n * max_width) as f64 / max_count as f64).round() as usize;
                format!(
                    "{} │{:<bw$} {:>cw$} ({:.3})",
                    b,
                    "█".repeat(len),
                    n,
                    n as f64 / total,
                    bw = max_width,
                    cw = count_width,
                )
            })
            .join("\n")
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render_bars(50))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(s: &str) -> BitString { s.parse().unwrap() }

    fn build_simple() -> Histogram {
        let mut hist = Histogram::new(2);
        for s in ["11", "00", "11", "01", "11", "00"] {
            hist.record(bits(s)).unwrap();
        }
        hist
    }

    #[test]
    fn record() {
        let hist = build_simple();
        assert_eq!(hist.total(), 6);
        assert_eq!(hist.len(), 3);
        assert_eq!(hist.get("11"), 3);
        assert_eq!(hist.get("00"), 2);
        assert_eq!(hist.get("01"), 1);
        assert_eq!(hist.get("10"), 0);
        assert_eq!(hist.get("1x"), 0);
        assert!(!hist.contains("10"));

        let mut hist = hist;
        assert_eq!(
            hist.record(bits("011")),
            Err(HistogramError::OutcomeWidth(bits("011"), 3, 2)),
        );
        assert_eq!(hist.total(), 6);
    }

    #[test]
    fn iter_sorted() {
        let hist = build_simple();
        let keys: Vec<String> = hist.iter().map(|(b, _)| b.to_string()).collect();
        assert_eq!(keys, vec!["00", "01", "11"]);
        let probs = hist.probabilities();
        assert!((probs[2].1 - 0.5).abs() < 1e-15);
        assert_eq!(hist.most_frequent(), Some((bits("11"), 3)));
        assert_eq!(Histogram::new(2).most_frequent(), None);
    }

    #[test]
    fn most_frequent_tie() {
        let mut hist = Histogram::new(2);
        hist.record(bits("11")).unwrap();
        hist.record(bits("00")).unwrap();
        assert_eq!(hist.most_frequent(), Some((bits("00"), 1)));
    }

    #[test]
    fn merge() {
        let mut a = build_simple();
        let b = build_simple();
        a.merge(&b).unwrap();
        assert_eq!(a.total(), 12);
        assert_eq!(a.get("11"), 6);
        assert_eq!(
            a.merge(&Histogram::new(3)),
            Err(HistogramError::MergeWidth(2, 3)),
        );
        let c = Histogram::new(2).merged(build_simple()).unwrap();
        assert_eq!(c, build_simple());
    }

    #[test]
    fn render() {
        let hist = build_simple();
        let chart = hist.render_bars(6);
        let rows: Vec<&str> = chart.lines().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], "00 │████   2 (0.333)");
        assert_eq!(rows[2], "11 │██████ 3 (0.500)");
        assert_eq!(Histogram::new(2).render_bars(10), "(no shots)");
    }
}
