use crate::core::model::PolyRun;

/// Longest run of a single repeated `A` or `T` in `seq`, case-insensitive.
///
/// Any other byte breaks the current run, and so does a switch between `A`
/// and `T`. On ties the earliest run is kept. Returns `None` when the read
/// contains no `A` or `T` at all.
pub fn longest_run(seq: &[u8]) -> Option<PolyRun> {
    let mut best: Option<PolyRun> = None;
    let mut cur_len = 0usize;
    let mut cur_start = 0usize;
    let mut prev = 0u8;

    for (i, &b) in seq.iter().enumerate() {
        let base = b.to_ascii_uppercase();
        if base != b'A' && base != b'T' {
            cur_len = 0;
            prev = 0;
            continue;
        }
        if base == prev {
            cur_len += 1;
        } else {
            cur_len = 1;
            cur_start = i;
            prev = base;
        }
        if cur_len > best.map_or(0, |r| r.len) {
            best = Some(PolyRun {
                start: cur_start,
                len: cur_len,
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn run(start: usize, len: usize) -> Option<PolyRun> {
        Some(PolyRun { start, len })
    }

    fn is_homopolymer_at(window: &[u8]) -> bool {
        window.iter().all(|&b| b == b'A') || window.iter().all(|&b| b == b'T')
    }

    #[test]
    fn empty_and_non_at_reads_have_no_run() {
        assert_eq!(longest_run(b""), None);
        assert_eq!(longest_run(b"CCGGNNCG"), None);
    }

    #[test]
    fn picks_longest_same_base_stretch() {
        assert_eq!(longest_run(b"AAATTTT"), run(3, 4));
    }

    #[test]
    fn alternating_bases_never_extend() {
        assert_eq!(longest_run(b"ATATATAT"), run(0, 1));
    }

    #[test]
    fn first_equal_run_wins() {
        assert_eq!(longest_run(b"AAACCCAAA"), run(0, 3));
        assert_eq!(longest_run(b"GTTTGAAA"), run(1, 3));
    }

    #[test]
    fn case_is_ignored() {
        assert_eq!(longest_run(b"cgaaAAtttG"), run(2, 4));
    }

    #[test]
    fn break_resets_same_base() {
        // An N between two A stretches must not join them.
        assert_eq!(longest_run(b"AAANAAAA"), run(4, 4));
    }

    proptest! {
        #[test]
        fn zero_only_without_a_or_t(seq in "[ACGTN]{0,64}") {
            let has_at = seq.bytes().any(|b| b == b'A' || b == b'T');
            let found = longest_run(seq.as_bytes());
            prop_assert_eq!(found.is_some(), has_at);
            if let Some(r) = found {
                prop_assert!(r.len >= 1);
            }
        }

        #[test]
        fn reported_run_is_homopolymer_and_maximal(seq in "[acgtnACGTN]{1,80}") {
            let bytes = seq.as_bytes();
            if let Some(r) = longest_run(bytes) {
                let upper: Vec<u8> = bytes.iter().map(|b| b.to_ascii_uppercase()).collect();
                prop_assert!(r.start + r.len <= upper.len());
                prop_assert!(is_homopolymer_at(&upper[r.start..r.start + r.len]));
                for s in 0..r.start {
                    prop_assert!(!is_homopolymer_at(&upper[s..s + r.len]));
                }
                for s in 0..upper.len().saturating_sub(r.len) {
                    prop_assert!(!is_homopolymer_at(&upper[s..s + r.len + 1]));
                }
            }
        }
    }
}
