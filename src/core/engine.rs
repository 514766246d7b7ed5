use crate::core::error::PolyatError;
use crate::core::io::{self, InputSet};
use crate::core::metrics::{self, SampleStats};
use crate::core::model::{AnalysisConfig, ReportModel, THRESHOLDS};
use anyhow::{Context, Result};
use std::time::Instant;

pub fn collect(inputs: &InputSet, cfg: AnalysisConfig) -> Result<ReportModel> {
    if inputs.files.is_empty() {
        return Err(PolyatError::NoInputFiles {
            dir: inputs.dir.clone(),
        }
        .into());
    }

    let mut samples: Vec<SampleStats> = Vec::with_capacity(inputs.files.len());
    for file in &inputs.files {
        let t = Instant::now();
        let reader = io::open_fastq(&file.path)?;
        let stats = metrics::aggregate_reader(&file.sample, reader, cfg)
            .with_context(|| format!("failed to read {}", file.path.display()))?;
        log::debug!(
            "sample={} file={} time={:.3?}",
            stats.sample,
            file.path.display(),
            t.elapsed()
        );
        log_sample(&stats);
        samples.push(stats);
    }

    Ok(ReportModel::new(cfg, samples))
}

fn log_sample(stats: &SampleStats) {
    log::info!(
        "{}: {} reads, {} with runs >= {} nt ({}%)",
        stats.sample,
        stats.total_reads,
        stats.threshold_counts[0],
        THRESHOLDS[0],
        metrics::format_percent(stats.threshold_counts[0], stats.total_reads)
    );
    if stats.skipped_records > 0 {
        log::warn!(
            "{}: skipped {} record(s) with an empty sequence line",
            stats.sample,
            stats.skipped_records
        );
    }
}
