//! Article-length distribution
//!
//! Equal-width integer histogram plus summary statistics over the valid
//! page lengths of a set of articles.

use serde::{Deserialize, Serialize};

/// One histogram bucket covering `start..=end` pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: u32,
    pub end: u32,
    pub count: usize,
}

/// Histogram of page lengths
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
    /// Width of every bin in pages
    pub bin_width: u32,
}

impl Histogram {
    /// Bucket `lengths` into at most `max_bins` bins of equal integer width
    /// spanning the observed minimum to maximum.
    pub fn build(lengths: &[u32], max_bins: usize) -> Self {
        let (min, max) = match (lengths.iter().min(), lengths.iter().max()) {
            (Some(&min), Some(&max)) => (min, max),
            _ => return Self { bins: Vec::new(), bin_width: 1 },
        };

        let max_bins = max_bins.max(1) as u64;
        let span = u64::from(max - min) + 1;
        let width = span.div_ceil(max_bins).max(1);
        let bin_count = span.div_ceil(width) as usize;

        let mut bins: Vec<HistogramBin> = (0..bin_count)
            .map(|i| {
                let start = u64::from(min) + i as u64 * width;
                let end = (start + width - 1).min(u64::from(max));
                HistogramBin {
                    start: start as u32,
                    end: end as u32,
                    count: 0,
                }
            })
            .collect();

        for &len in lengths {
            let idx = (u64::from(len - min) / width) as usize;
            bins[idx].count += 1;
        }

        Self {
            bins,
            bin_width: width as u32,
        }
    }

    /// Sum of all bin counts
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    /// Tallest bin
    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

/// Summary statistics over valid page lengths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: u32,
    pub max: u32,
}

impl LengthStats {
    /// `None` when there are no lengths
    pub fn from_lengths(lengths: &[u32]) -> Option<Self> {
        if lengths.is_empty() {
            return None;
        }

        let mut sorted = lengths.to_vec();
        sorted.sort_unstable();
        let n = sorted.len();

        let median = if n % 2 == 1 {
            f64::from(sorted[n / 2])
        } else {
            (f64::from(sorted[n / 2 - 1]) + f64::from(sorted[n / 2])) / 2.0
        };

        Some(Self {
            count: n,
            mean: mean(lengths)?,
            median,
            min: sorted[0],
            max: sorted[n - 1],
        })
    }
}

/// Arithmetic mean, `None` for an empty slice
pub fn mean(lengths: &[u32]) -> Option<f64> {
    if lengths.is_empty() {
        return None;
    }
    let sum: u64 = lengths.iter().map(|&l| u64::from(l)).sum();
    Some(sum as f64 / lengths.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_histogram() {
        let hist = Histogram::build(&[], 30);
        assert!(hist.bins.is_empty());
        assert_eq!(hist.total(), 0);
    }

    #[test]
    fn test_small_span_uses_unit_bins() {
        let hist = Histogram::build(&[3, 4, 4, 7], 30);
        assert_eq!(hist.bin_width, 1);
        assert_eq!(hist.bins.len(), 5);
        assert_eq!(hist.bins[0], HistogramBin { start: 3, end: 3, count: 1 });
        assert_eq!(hist.bins[1].count, 2);
        assert_eq!(hist.bins[4], HistogramBin { start: 7, end: 7, count: 1 });
        assert_eq!(hist.max_count(), 2);
    }

    #[test]
    fn test_wide_span_respects_bin_limit() {
        let lengths: Vec<u32> = (1..=100).collect();
        let hist = Histogram::build(&lengths, 30);
        assert!(hist.bins.len() <= 30);
        assert_eq!(hist.bin_width, 4);
        assert_eq!(hist.total(), 100);
        assert_eq!(hist.bins.last().unwrap().end, 100);
    }

    #[test]
    fn test_stats() {
        let stats = LengthStats::from_lengths(&[6, 30, 10, 2]).unwrap();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean, 12.0);
        assert_eq!(stats.median, 8.0);
        assert_eq!(stats.min, 2);
        assert_eq!(stats.max, 30);

        assert!(LengthStats::from_lengths(&[]).is_none());
        assert_eq!(LengthStats::from_lengths(&[5, 1, 3]).unwrap().median, 3.0);
    }
}
