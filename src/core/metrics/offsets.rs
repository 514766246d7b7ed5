/// Mean and median of a sample's nearest-end offsets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OffsetSummary {
    pub detected: usize,
    pub mean: f64,
    pub median: f64,
}

impl OffsetSummary {
    pub fn from_offsets(offsets: &[u64]) -> Self {
        if offsets.is_empty() {
            return Self {
                detected: 0,
                mean: 0.0,
                median: 0.0,
            };
        }
        let n = offsets.len();
        let sum: u64 = offsets.iter().sum();
        let mut sorted = offsets.to_vec();
        sorted.sort_unstable();
        let median = if n % 2 == 1 {
            sorted[n / 2] as f64
        } else {
            (sorted[n / 2 - 1] as f64 + sorted[n / 2] as f64) / 2.0
        };
        Self {
            detected: n,
            mean: sum as f64 / n as f64,
            median,
        }
    }

    /// `[Detected_Runs, Avg, Median]` cells, two decimals for the averages.
    pub fn cells(&self) -> [String; 3] {
        [
            self.detected.to_string(),
            format!("{:.2}", self.mean),
            format!("{:.2}", self.median),
        ]
    }
}
