use crate::core::error::{PathProblem, PolyatError};
use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

const READ_BUF: usize = 1024 * 1024;

/// Recognised FASTQ suffixes, compressed variants first so they strip whole.
const FASTQ_SUFFIXES: [&str; 4] = [".fastq.gz", ".fq.gz", ".fastq", ".fq"];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputKind {
    Plain,
    Gzip,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FastqFile {
    pub path: PathBuf,
    pub sample: String,
}

#[derive(Clone, Debug)]
pub struct InputSet {
    pub dir: PathBuf,
    pub files: Vec<FastqFile>,
}

impl InputSet {
    /// Validates `dir` and lists its FASTQ files sorted by file name.
    pub fn discover(dir: &Path) -> Result<Self> {
        if !dir.exists() {
            return Err(PolyatError::InvalidInputPath {
                path: dir.to_path_buf(),
                problem: PathProblem::Missing,
            }
            .into());
        }
        if !dir.is_dir() {
            return Err(PolyatError::InvalidInputPath {
                path: dir.to_path_buf(),
                problem: PathProblem::NotADirectory,
            }
            .into());
        }

        let mut files = Vec::new();
        let entries =
            fs::read_dir(dir).with_context(|| format!("failed to list {}", dir.display()))?;
        for entry in entries {
            let entry = entry.with_context(|| format!("failed to list {}", dir.display()))?;
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
                continue;
            };
            if path.is_file() && has_fastq_suffix(name) {
                let sample = sample_name(name).to_string();
                files.push(FastqFile { path, sample });
            }
        }
        files.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));

        Ok(Self {
            dir: dir.to_path_buf(),
            files,
        })
    }
}

pub fn has_fastq_suffix(name: &str) -> bool {
    FASTQ_SUFFIXES.iter().any(|s| name.ends_with(s))
}

/// File name with its FASTQ suffix removed, or unchanged if none matches.
pub fn sample_name(file_name: &str) -> &str {
    FASTQ_SUFFIXES
        .iter()
        .find_map(|s| file_name.strip_suffix(s))
        .unwrap_or(file_name)
}

pub fn detect_input_kind(path: &Path) -> Result<InputKind> {
    if let Some(ext) = path.extension().and_then(|s| s.to_str()) {
        let ext = ext.to_ascii_lowercase();
        if ext == "gz" {
            return Ok(InputKind::Gzip);
        }
    }
    let mut file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut magic = [0u8; 2];
    let n = file
        .read(&mut magic)
        .with_context(|| format!("failed to read magic bytes of {}", path.display()))?;
    if n == 2 && magic == [0x1f, 0x8b] {
        Ok(InputKind::Gzip)
    } else {
        Ok(InputKind::Plain)
    }
}

pub fn open_fastq(path: &Path) -> Result<Box<dyn BufRead>> {
    let kind = detect_input_kind(path)?;
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader: Box<dyn BufRead> = match kind {
        InputKind::Plain => Box::new(BufReader::with_capacity(READ_BUF, file)),
        InputKind::Gzip => Box::new(BufReader::with_capacity(
            READ_BUF,
            MultiGzDecoder::new(BufReader::new(file)),
        )),
    };
    Ok(reader)
}
