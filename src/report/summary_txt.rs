use crate::core::metrics::summary_headers;
use crate::core::model::ReportModel;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const FILE_NAME: &str = "polyA_counts.txt";

pub fn write(path: &Path, model: &ReportModel) -> Result<()> {
    let mut w = BufWriter::new(
        File::create(path).with_context(|| format!("create {} failed", path.display()))?,
    );
    write_to(&mut w, model)?;
    w.flush()?;
    Ok(())
}

pub fn write_to(w: &mut dyn Write, model: &ReportModel) -> Result<()> {
    writeln!(w, "{}", summary_headers().join("\t"))?;
    for stats in &model.samples {
        writeln!(w, "{}", stats.summary_cells().join("\t"))?;
    }
    Ok(())
}
