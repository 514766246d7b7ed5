//! End-to-end runs of the `kira-polyat` binary on temporary directories.

use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn write_fastq(path: &Path, seqs: &[&str]) {
    let mut file = File::create(path).unwrap();
    for (i, seq) in seqs.iter().enumerate() {
        writeln!(file, "@read_{}", i).unwrap();
        writeln!(file, "{}", seq).unwrap();
        writeln!(file, "+").unwrap();
        writeln!(file, "{}", "I".repeat(seq.len())).unwrap();
    }
}

fn write_fastq_gz(path: &Path, seqs: &[&str]) {
    let mut enc = GzEncoder::new(File::create(path).unwrap(), Compression::default());
    for (i, seq) in seqs.iter().enumerate() {
        write!(enc, "@read_{}\n{}\n+\n{}\n", i, seq, "I".repeat(seq.len())).unwrap();
    }
    enc.finish().unwrap();
}

fn polyat(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_kira-polyat"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("failed to run kira-polyat")
}

#[test]
fn single_sample_scenario() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("in");
    let output = tmp.path().join("out");
    fs::create_dir(&input).unwrap();
    write_fastq(&input.join("sample1.fastq"), &["AAAAAAAAAA", "GGGGGGGGGG"]);

    let out = polyat(&[
        "run",
        "-i",
        input.to_str().unwrap(),
        "-o",
        output.to_str().unwrap(),
    ]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let summary = fs::read_to_string(output.join("polyA_counts.txt")).unwrap();
    let rows: Vec<&str> = summary.lines().collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1], "sample1\t2\t1\t0\t0\t50.00\t0.00\t0.00");

    let histogram = fs::read_to_string(output.join("polyA_histogram.txt")).unwrap();
    assert_eq!(histogram, "Sample\tRun_Length\tRead_Count\nsample1\t10\t1\n");

    let html = fs::read_to_string(output.join("polyA_report.html")).unwrap();
    assert!(html.contains("<td>sample1</td><td>1</td><td>0.00</td><td>0.00</td>"));
    assert!(html.contains("\"combinedHistogramData\":[[10,1]]"));
}

#[test]
fn mixed_inputs_are_processed_in_name_order() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("in");
    let output = tmp.path().join("nested").join("out");
    fs::create_dir(&input).unwrap();
    let long_t = "T".repeat(25);
    write_fastq_gz(&input.join("b.fq.gz"), &[&long_t, "ACGTACGT"]);
    write_fastq(&input.join("a.fastq"), &["CCCCAAAAAAAAAAAAGG"]);
    fs::write(input.join("readme.txt"), "not fastq").unwrap();

    let out = polyat(&[
        "run",
        "--input",
        input.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
    ]);
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    let summary = fs::read_to_string(output.join("polyA_counts.txt")).unwrap();
    let samples: Vec<&str> = summary
        .lines()
        .skip(1)
        .map(|l| l.split('\t').next().unwrap())
        .collect();
    assert_eq!(samples, ["a", "b"]);
    assert!(summary.contains("b\t2\t1\t1\t1\t50.00\t50.00\t50.00"));

    let histogram = fs::read_to_string(output.join("polyA_histogram.txt")).unwrap();
    assert_eq!(histogram.lines().filter(|l| l.starts_with("a\t")).count(), 3);
    assert_eq!(histogram.lines().filter(|l| l.starts_with("b\t")).count(), 16);
    let mut written: Vec<String> = fs::read_dir(&output)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    written.sort();
    assert_eq!(
        written,
        ["polyA_counts.txt", "polyA_histogram.txt", "polyA_report.html"]
    );
}

#[test]
fn missing_input_dir_fails() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("missing");
    let out = polyat(&[
        "run",
        "-i",
        missing.to_str().unwrap(),
        "-o",
        tmp.path().join("out").to_str().unwrap(),
    ]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("input path does not exist"));
}

#[test]
fn input_file_instead_of_dir_fails() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("reads.fastq");
    write_fastq(&file, &["AAAA"]);
    let out = polyat(&[
        "run",
        "-i",
        file.to_str().unwrap(),
        "-o",
        tmp.path().join("out").to_str().unwrap(),
    ]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("is not a directory"));
}

#[test]
fn directory_without_fastq_fails() {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("in");
    fs::create_dir(&input).unwrap();
    fs::write(input.join("notes.txt"), "hello").unwrap();
    let out = polyat(&[
        "run",
        "-i",
        input.to_str().unwrap(),
        "-o",
        tmp.path().join("out").to_str().unwrap(),
    ]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("no FASTQ/FASTQ.GZ files found"));
}
