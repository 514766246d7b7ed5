use crate::core::fastq::FastqLines;
use crate::core::model::{AnalysisConfig, THRESHOLDS};
use crate::core::scan;
use anyhow::Result;
use std::io::BufRead;

mod histogram;
mod offsets;

pub use histogram::RunHistogram;
pub use offsets::OffsetSummary;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SampleStats {
    pub sample: String,
    pub total_reads: u64,
    /// Reads whose longest run reaches each of [`THRESHOLDS`].
    pub threshold_counts: [u64; THRESHOLDS.len()],
    pub histogram: RunHistogram,
    pub nearest_end_offsets: Vec<u64>,
    /// Records dropped for an empty sequence line or a truncated tail.
    pub skipped_records: u64,
}

impl SampleStats {
    pub fn percents(&self) -> [String; THRESHOLDS.len()] {
        self.threshold_counts
            .map(|count| format_percent(count, self.total_reads))
    }

        pub fn summary_cells(&self) -> Vec<String> {
        let mut cells = Vec::with_capacity(2 + THRESHOLDS.len() * 2);
        cells.push(self.sample.clone());
        cells.push(self.total_reads.to_string());
        cells.extend(self.threshold_counts.iter().map(|c| c.to_string()));
        cells.extend(self.percents());
        cells
    }

    pub fn offset_summary(&self) -> OffsetSummary {
        OffsetSummary::from_offsets(&self.nearest_end_offsets)
    }
}

pub fn summary_headers() -> Vec<String> {
    let mut headers = vec!["Sample".to_string(), "Total_Reads".to_string()];
    headers.extend(THRESHOLDS.iter().map(|t| format!("PolyA/T_{}+", t)));
    headers.extend(THRESHOLDS.iter().map(|t| format!("Percent_{}+", t)));
    headers
}

/// `100 * count / total` with two decimals; `0.00` when `total` is zero.
pub fn format_percent(count: u64, total: u64) -> String {
    if total == 0 {
        return "0.00".to_string();
    }
    format!("{:.2}", count as f64 * 100.0 / total as f64)
}

pub struct SampleAgg {
    cfg: AnalysisConfig,
    stats: SampleStats,
}

impl SampleAgg {
    pub fn new(sample: impl Into<String>, cfg: AnalysisConfig) -> Self {
        Self {
            cfg,
            stats: SampleStats {
                sample: sample.into(),
                total_reads: 0,
                threshold_counts: [0; THRESHOLDS.len()],
                histogram: RunHistogram::default(),
                nearest_end_offsets: Vec::new(),
                skipped_records: 0,
            },
        }
    }

    pub fn skip(&mut self) {
        self.stats.skipped_records += 1;
    }

    pub fn update(&mut self, seq: &[u8]) {
        if seq.is_empty() {
            self.skip();
            return;
        }
        self.stats.total_reads += 1;
        let Some(run) = scan::longest_run(seq) else {
            return;
        };
        for (count, &threshold) in self.stats.threshold_counts.iter_mut().zip(&THRESHOLDS) {
            if run.len >= threshold {
                *count += 1;
            }
        }
        if run.len >= self.cfg.hist_min_length {
            self.stats.histogram.add(run.len);
            self.stats
                .nearest_end_offsets
                .push(run.nearest_end_offset(seq.len()) as u64);
        }
    }

    pub fn finish(self) -> SampleStats {
        self.stats
    }
}

pub fn aggregate_reader<R: BufRead>(
    sample: &str,
    reader: R,
    cfg: AnalysisConfig,
) -> Result<SampleStats> {
    let mut lines = FastqLines::new(reader);
    let mut agg = SampleAgg::new(sample, cfg);
    while let Some(rec) = lines.next_record()? {
        if !rec.complete {
            log::warn!(
                "{}: truncated record {} at end of file",
                sample,
                String::from_utf8_lossy(rec.id)
            );
            agg.skip();
            continue;
        }
        agg.update(rec.seq);
    }
    Ok(agg.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Cursor;

    fn fastq(seqs: &[&str]) -> Vec<u8> {
        let mut out = String::new();
        for (i, s) in seqs.iter().enumerate() {
            out.push_str(&format!("@r{}\n{}\n+\n{}\n", i, s, "I".repeat(s.len())));
        }
        out.into_bytes()
    }

    fn stats(seqs: &[&str]) -> SampleStats {
        aggregate_reader("s", Cursor::new(fastq(seqs)), AnalysisConfig::default()).unwrap()
    }

    #[test]
    fn single_qualifying_read_scenario() {
        let s = stats(&["AAAAAAAAAA", "GGGGGGGGGG"]);
        assert_eq!(s.total_reads, 2);
        assert_eq!(s.threshold_counts, [1, 0, 0]);
        assert_eq!(s.percents()[0], "50.00");
        assert_eq!(s.histogram.series(10), vec![(10, 1)]);
        assert_eq!(s.nearest_end_offsets, vec![0]);
    }

    #[test]
    fn long_run_increments_every_threshold() {
        let read = format!("CG{}CGCG", "T".repeat(22));
        let s = stats(&[read.as_str()]);
        assert_eq!(s.threshold_counts, [1, 1, 1]);
        assert_eq!(s.histogram.count(22), 1);
        assert_eq!(s.nearest_end_offsets, vec![2]);
    }

    #[test]
    fn short_runs_are_counted_but_not_binned() {
        let s = stats(&["AAAAAAAAA", "ACGT"]);
        assert_eq!(s.total_reads, 2);
        assert_eq!(s.threshold_counts, [0, 0, 0]);
        assert!(s.histogram.is_empty());
        assert!(s.nearest_end_offsets.is_empty());
    }

    #[test]
    fn empty_sequences_are_skipped() {
        let mut input = fastq(&["AAAAAAAAAAAA", ""]);
        input.extend_from_slice(b"@truncated\n");
        let s = aggregate_reader("s", Cursor::new(input), AnalysisConfig::default()).unwrap();
        assert_eq!(s.total_reads, 1);
        assert_eq!(s.skipped_records, 2);
        assert_eq!(s.threshold_counts[0], 1);
    }

    #[test]
    fn record_cut_after_sequence_is_skipped() {
        let input = b"@r1\nACGT\n+\nIIII\n@r2\nAAAAAAAAAAAA\n".to_vec();
        let s = aggregate_reader("s", Cursor::new(input), AnalysisConfig::default()).unwrap();
        assert_eq!(s.total_reads, 1);
        assert_eq!(s.skipped_records, 1);
        assert_eq!(s.threshold_counts, [0, 0, 0]);
        assert!(s.histogram.is_empty());
    }

    #[test]
    fn percent_formatting() {
        assert_eq!(format_percent(0, 0), "0.00");
        assert_eq!(format_percent(1, 4), "25.00");
        assert_eq!(format_percent(1, 3), "33.33");
        assert_eq!(format_percent(7, 7), "100.00");
    }

    #[test]
    fn summary_cells_follow_headers() {
        let s = stats(&["AAAAAAAAAAAAAAAA", "C"]);
        let headers = summary_headers();
        let cells = s.summary_cells();
        assert_eq!(headers.len(), cells.len());
        assert_eq!(
            headers,
            [
                "Sample",
                "Total_Reads",
                "PolyA/T_10+",
                "PolyA/T_15+",
                "PolyA/T_20+",
                "Percent_10+",
                "Percent_15+",
                "Percent_20+"
            ]
        );
        assert_eq!(cells, ["s", "2", "1", "1", "0", "50.00", "50.00", "0.00"]);
    }

    proptest! {
        #[test]
        fn counters_stay_consistent(reads in proptest::collection::vec("[ACGTN]{0,40}", 0..40)) {
            let refs: Vec<&str> = reads.iter().map(String::as_str).collect();
            let s = stats(&refs);
            let [c10, c15, c20] = s.threshold_counts;
            prop_assert!(c20 <= c15 && c15 <= c10 && c10 <= s.total_reads);
            prop_assert_eq!(s.histogram.total(), c10);
            prop_assert_eq!(s.nearest_end_offsets.len() as u64, c10);
            prop_assert_eq!(s.total_reads + s.skipped_records, reads.len() as u64);
        }
    }
}
