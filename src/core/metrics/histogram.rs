use crate::core::model::HistogramSeries;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RunHistogram {
    counts: Vec<u64>,
}

impl RunHistogram {
    pub fn add(&mut self, len: usize) {
        if self.counts.len() <= len {
            self.counts.resize(len + 1, 0);
        }
        self.counts[len] += 1;
    }

    pub fn count(&self, len: usize) -> u64 {
        self.counts.get(len).copied().unwrap_or(0)
    }

    pub fn max_length(&self) -> Option<usize> {
        self.counts.iter().rposition(|&c| c > 0)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.max_length().is_none()
    }

    /// Zero-filled series from `floor` to the longest observed length.
    pub fn series(&self, floor: usize) -> HistogramSeries {
        match self.max_length() {
            Some(max_len) if max_len >= floor => {
                (floor..=max_len).map(|len| (len, self.count(len))).collect()
            }
            _ => Vec::new(),
        }
    }
}
