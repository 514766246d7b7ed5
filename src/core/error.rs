use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal, user-facing input problems.
#[derive(Debug, Error)]
pub enum PolyatError {
    #[error("input path {problem}: {}", .path.display())]
    InvalidInputPath { path: PathBuf, problem: PathProblem },

    #[error("no FASTQ/FASTQ.GZ files found in {}", .dir.display())]
    NoInputFiles { dir: PathBuf },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PathProblem {
    Missing,
    NotADirectory,
}

impl fmt::Display for PathProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathProblem::Missing => f.write_str("does not exist"),
            PathProblem::NotADirectory => f.write_str("is not a directory"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_path() {
        let err = PolyatError::InvalidInputPath {
            path: PathBuf::from("/data/reads"),
            problem: PathProblem::NotADirectory,
        };
        assert_eq!(
            err.to_string(),
            "input path is not a directory: /data/reads"
        );
        let err = PolyatError::NoInputFiles {
            dir: PathBuf::from("/data/empty"),
        };
        assert_eq!(
            err.to_string(),
            "no FASTQ/FASTQ.GZ files found in /data/empty"
        );
    }
}
