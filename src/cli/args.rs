use crate::core::model::DEFAULT_HIST_MIN_LENGTH;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "kira-polyat",
    version,
    about = "Quantify poly-A/T stretches (>=10/15/20 nt) across FASTQ reads and summarize counts per sample"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Run(RunArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Directory containing .fastq/.fastq.gz/.fq/.fq.gz files.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Directory where the tables and the HTML report are written.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Shortest run length entering the histogram and offset statistics.
    #[arg(long, default_value_t = DEFAULT_HIST_MIN_LENGTH)]
    pub hist_min_length: usize,
}
