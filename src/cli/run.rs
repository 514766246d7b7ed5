use crate::cli::args::{Cli, Commands, RunArgs};
use crate::core::engine;
use crate::core::io::InputSet;
use crate::core::model::{AnalysisConfig, ReportModel};
use crate::report;
use anyhow::{Context, Result, bail};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

pub fn entry() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.command {
        Commands::Run(args) => run(args),
    }
}

fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    let _ = env_logger::Builder::from_env(env)
        .format_target(false)
        .try_init();
}

#[derive(Clone, Debug)]
pub struct RunOutputs {
    pub summary: PathBuf,
    pub histogram: PathBuf,
    pub html: PathBuf,
}

pub fn run(args: RunArgs) -> Result<()> {
    let t0 = Instant::now();

    let t_preflight = Instant::now();
    if args.hist_min_length == 0 {
        bail!("--hist-min-length must be >= 1");
    }
    let cfg = AnalysisConfig {
        hist_min_length: args.hist_min_length,
    };
    let inputs = InputSet::discover(&args.input)?;
    stage_done("discover", t_preflight);
    log::info!(
        "found {} FASTQ file(s) in {}",
        inputs.files.len(),
        inputs.dir.display()
    );

    let t_mkdir = Instant::now();
    fs::create_dir_all(&args.output)
        .with_context(|| format!("failed to create output dir {}", args.output.display()))?;
    stage_done("mkdir", t_mkdir);

    let t_engine = Instant::now();
    let model = engine::collect(&inputs, cfg)?;
    stage_done("engine", t_engine);

    let outputs = write_reports(&args.output, &model)?;
    log::info!("summary written to {}", outputs.summary.display());
    log::info!("histogram written to {}", outputs.histogram.display());
    log::info!("HTML report written to {}", outputs.html.display());

    log::debug!("stage=total time={}", fmt_dur(t0.elapsed()));
    Ok(())
}

pub fn write_reports(out_dir: &Path, model: &ReportModel) -> Result<RunOutputs> {
    let summary = out_dir.join(report::summary_txt::FILE_NAME);
    let histogram = out_dir.join(report::histogram_txt::FILE_NAME);
    let html = out_dir.join(report::html::FILE_NAME);

    let t_summary = Instant::now();
    report::summary_txt::write(&summary, model)
        .with_context(|| format!("failed to write {}", summary.display()))?;
    stage_done("summary", t_summary);

    let t_hist = Instant::now();
    report::histogram_txt::write(&histogram, model)
        .with_context(|| format!("failed to write {}", histogram.display()))?;
    stage_done("histogram", t_hist);

    let t_html = Instant::now();
    report::html::write(&html, model)
        .with_context(|| format!("failed to write {}", html.display()))?;
    stage_done("html", t_html);
    if log::log_enabled!(log::Level::Debug) {
        let html_size = fs::metadata(&html).map(|m| m.len()).unwrap_or(0);
        log::debug!("output html={} bytes={}", html.display(), html_size);
    }

    Ok(RunOutputs {
        summary,
        histogram,
        html,
    })
}

fn stage_done(name: &str, t: Instant) {
    log::debug!("stage={} time={}", name, fmt_dur(t.elapsed()));
}

fn fmt_dur(d: Duration) -> String {
    if d.as_secs_f64() < 1.0 {
        format!("{}ms", d.as_millis())
    } else {
        format!("{:.3}s", d.as_secs_f64())
    }
}
