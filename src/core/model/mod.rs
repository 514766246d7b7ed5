use crate::core::metrics::SampleStats;

/// Smallest run length that enters the histogram and the offset list.
pub const DEFAULT_HIST_MIN_LENGTH: usize = 10;

pub const THRESHOLDS: [usize; 3] = [10, 15, 20];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AnalysisConfig {
    pub hist_min_length: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            hist_min_length: DEFAULT_HIST_MIN_LENGTH,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PolyRun {
    pub start: usize,
    pub len: usize,
}

impl PolyRun {
    /// Distance from the run to the closer end of a read of `read_len` bases.
    pub fn nearest_end_offset(&self, read_len: usize) -> usize {
        let tail = read_len.saturating_sub(self.start + self.len);
        self.start.min(tail)
    }
}

/// `(run length, read count)` pairs, contiguous from the histogram floor.
pub type HistogramSeries = Vec<(usize, u64)>;

#[derive(Clone, Debug)]
pub struct ReportModel {
    pub config: AnalysisConfig,
    pub samples: Vec<SampleStats>,
    pub combined: HistogramSeries,
}

impl ReportModel {
    pub fn new(config: AnalysisConfig, samples: Vec<SampleStats>) -> Self {
        let combined = combine_histograms(&samples, config.hist_min_length);
        Self {
            config,
            samples,
            combined,
        }
    }

    pub fn total_reads(&self) -> u64 {
        self.samples.iter().map(|s| s.total_reads).sum()
    }
}

fn combine_histograms(samples: &[SampleStats], floor: usize) -> HistogramSeries {
    let Some(max_len) = samples.iter().filter_map(|s| s.histogram.max_length()).max() else {
        return Vec::new();
    };
    (floor..=max_len)
        .map(|len| {
            let count = samples.iter().map(|s| s.histogram.count(len)).sum();
            (len, count)
        })
        .collect()
}
