use anyhow::Result;
use std::io::BufRead;

#[derive(Clone, Copy, Debug)]
pub struct ReadView<'a> {
    pub id: &'a [u8],
    pub seq: &'a [u8],
    /// False when the input ended before all four lines were read.
    pub complete: bool,
}

pub struct FastqLines<R> {
    reader: R,
    id: Vec<u8>,
    seq: Vec<u8>,
    plus: Vec<u8>,
    qual: Vec<u8>,
}

impl<R: BufRead> FastqLines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            id: Vec::with_capacity(256),
            seq: Vec::with_capacity(1024),
            plus: Vec::with_capacity(16),
            qual: Vec::with_capacity(1024),
        }
    }

    pub fn next_record(&mut self) -> Result<Option<ReadView<'_>>> {
        if read_line(&mut self.reader, &mut self.id)? == 0 {
            return Ok(None);
        }
        let mut complete = read_line(&mut self.reader, &mut self.seq)? > 0;
        complete &= read_line(&mut self.reader, &mut self.plus)? > 0;
        complete &= read_line(&mut self.reader, &mut self.qual)? > 0;
        Ok(Some(ReadView {
            id: self.id.trim_ascii(),
            seq: self.seq.trim_ascii(),
            complete,
        }))
    }
}

fn read_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> Result<usize> {
    buf.clear();
    Ok(reader.read_until(b'\n', buf)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn seqs(input: &str) -> Vec<String> {
        records(input).into_iter().map(|(seq, _)| seq).collect()
    }

    fn records(input: &str) -> Vec<(String, bool)> {
        let mut r = FastqLines::new(Cursor::new(input.as_bytes().to_vec()));
        let mut out = Vec::new();
        while let Some(rec) = r.next_record().unwrap() {
            out.push((String::from_utf8(rec.seq.to_vec()).unwrap(), rec.complete));
        }
        out
    }

    #[test]
    fn reads_four_line_groups() {
        let input = "@r1\nACGT\n+\nIIII\n@r2\nTTTT\n+\nIIII\n";
        assert_eq!(seqs(input), vec!["ACGT", "TTTT"]);
    }

    #[test]
    fn strips_crlf_and_padding() {
        let input = "@r1\r\n  AAAA \r\n+\r\nIIII\r\n";
        assert_eq!(seqs(input), vec!["AAAA"]);
    }

    #[test]
    fn truncated_tail_is_incomplete() {
        let input = "@r1\nACGT\n+\nIIII\n@r2\nAAAAAAAAAAAA\n";
        assert_eq!(
            records(input),
            vec![("ACGT".to_string(), true), ("AAAAAAAAAAAA".to_string(), false)]
        );
        assert!(!records("@r1\nACGT\n+\n")[0].1);
        assert!(!records("@r1\n")[0].1);
    }

    #[test]
    fn empty_sequence_line_is_still_complete() {
        assert_eq!(records("@r1\n\n+\n\n"), vec![(String::new(), true)]);
    }

    #[test]
    fn missing_final_newline_is_fine() {
        let input = "@r1\nACGT\n+\nIIII";
        assert_eq!(seqs(input), vec!["ACGT"]);
    }

    #[test]
    fn exposes_header() {
        let mut r = FastqLines::new(Cursor::new(b"@read one\nAC\n+\n#I\n".to_vec()));
        let rec = r.next_record().unwrap().unwrap();
        assert_eq!(rec.id, b"@read one");
        assert!(rec.complete);
        assert!(r.next_record().unwrap().is_none());
    }
}
