use crate::core::model::ReportModel;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const FILE_NAME: &str = "polyA_histogram.txt";

pub fn write(path: &Path, model: &ReportModel) -> Result<()> {
    let mut w = BufWriter::new(
        File::create(path).with_context(|| format!("create {} failed", path.display()))?,
    );
    write_to(&mut w, model)?;
    w.flush()?;
    Ok(())
}

/// `(sample, length, count)` rows from the floor to each sample's longest run.
pub fn write_to(w: &mut dyn Write, model: &ReportModel) -> Result<()> {
    writeln!(w, "Sample\tRun_Length\tRead_Count")?;
    for stats in &model.samples {
        for (len, count) in stats.histogram.series(model.config.hist_min_length) {
            writeln!(w, "{}\t{}\t{}", stats.sample, len, count)?;
        }
    }
    Ok(())
}
