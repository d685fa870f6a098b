//! HTTP Range request parsing module
//!
//! Single-range `bytes=` parsing per RFC 7233 for resumable downloads.

/// A satisfiable byte range with both ends resolved against the file size.
/// `end` is inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

impl ByteRange {
    /// Number of bytes the range covers.
    #[inline]
    pub const fn len(&self) -> usize {
        self.end - self.start + 1
    }
}

/// Outcome of Range header evaluation.
#[derive(Debug)]
pub enum RangeOutcome {
    /// A single satisfiable range; respond 206.
    Partial(ByteRange),
    /// Syntactically valid but unsatisfiable; respond 416.
    Unsatisfiable,
    /// No header, malformed, or multi-range; respond with the full body.
    Full,
}

/// Parse a Range header against the file size.
///
/// Supported forms: `bytes=start-end`, `bytes=start-`, `bytes=-suffix`.
/// Multi-range requests and non-`bytes` units are ignored rather than
/// rejected; the full body is served instead.
pub fn parse_range_header(range_header: Option<&str>, file_size: usize) -> RangeOutcome {
    let Some(rest) = range_header.and_then(|h| h.strip_prefix("bytes=")) else {
        return RangeOutcome::Full;
    };

    if rest.contains(',') {
        return RangeOutcome::Full;
    }

    let Some((start_str, end_str)) = rest.split_once('-') else {
        return RangeOutcome::Full;
    };
    let (start_str, end_str) = (start_str.trim(), end_str.trim());

    if start_str.is_empty() {
        return parse_suffix(end_str, file_size);
    }

    let Ok(start) = start_str.parse::<usize>() else {
        return RangeOutcome::Full;
    };
    if start >= file_size {
        return RangeOutcome::Unsatisfiable;
    }

    let end = if end_str.is_empty() {
        file_size - 1
    } else {
        let Ok(end) = end_str.parse::<usize>() else {
            return RangeOutcome::Full;
        };
        if end < start {
            return RangeOutcome::Unsatisfiable;
        }
        end.min(file_size - 1)
    };

    RangeOutcome::Partial(ByteRange { start, end })
}

/// `bytes=-n`: the last n bytes of the file.
fn parse_suffix(suffix_str: &str, file_size: usize) -> RangeOutcome {
    let Ok(suffix) = suffix_str.parse::<usize>() else {
        return RangeOutcome::Full;
    };
    if suffix == 0 || file_size == 0 {
        return RangeOutcome::Unsatisfiable;
    }

    RangeOutcome::Partial(ByteRange {
        start: file_size.saturating_sub(suffix),
        end: file_size - 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_header_serves_full_body() {
        assert!(matches!(parse_range_header(None, 100), RangeOutcome::Full));
    }

    #[test]
    fn test_fixed_range() {
        match parse_range_header(Some("bytes=0-9"), 100) {
            RangeOutcome::Partial(r) => {
                assert_eq!(r, ByteRange { start: 0, end: 9 });
                assert_eq!(r.len(), 10);
            }
            other => panic!("expected Partial, got {other:?}"),
        }
    }

    #[test]
    fn test_open_ended_range() {
        match parse_range_header(Some("bytes=50-"), 100) {
            RangeOutcome::Partial(r) => assert_eq!(r, ByteRange { start: 50, end: 99 }),
            other => panic!("expected Partial, got {other:?}"),
        }
    }

    #[test]
    fn test_suffix_range() {
        match parse_range_header(Some("bytes=-20"), 100) {
            RangeOutcome::Partial(r) => assert_eq!(r, ByteRange { start: 80, end: 99 }),
            other => panic!("expected Partial, got {other:?}"),
        }
    }

    #[test]
    fn test_suffix_longer_than_file() {
        match parse_range_header(Some("bytes=-500"), 100) {
            RangeOutcome::Partial(r) => assert_eq!(r, ByteRange { start: 0, end: 99 }),
            other => panic!("expected Partial, got {other:?}"),
        }
    }

    #[test]
    fn test_end_clamped_to_file_size() {
        match parse_range_header(Some("bytes=90-500"), 100) {
            RangeOutcome::Partial(r) => assert_eq!(r, ByteRange { start: 90, end: 99 }),
            other => panic!("expected Partial, got {other:?}"),
        }
    }

    #[test]
    fn test_start_past_end_of_file() {
        assert!(matches!(
            parse_range_header(Some("bytes=200-"), 100),
            RangeOutcome::Unsatisfiable
        ));
    }

    #[test]
    fn test_inverted_range() {
        assert!(matches!(
            parse_range_header(Some("bytes=30-10"), 100),
            RangeOutcome::Unsatisfiable
        ));
    }

    #[test]
    fn test_malformed_and_multi_range_ignored() {
        assert!(matches!(
            parse_range_header(Some("bytes=a-b"), 100),
            RangeOutcome::Full
        ));
        assert!(matches!(
            parse_range_header(Some("bytes=0-9,20-29"), 100),
            RangeOutcome::Full
        ));
        assert!(matches!(
            parse_range_header(Some("items=0-9"), 100),
            RangeOutcome::Full
        ));
    }
}
