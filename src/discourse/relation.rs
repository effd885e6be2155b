//! The bracket-relation grammar and the EDU-to-token span table.

use crate::error::{Result, StructuralError};

use super::label::{Nuclearity, decode_label, encode_label};

/// One binary relation between two adjacent EDU ranges, in 0-based EDU
/// indices with inclusive ends. The raw annotation form is 1-based:
///
/// ```text
/// (1:Nucleus=span:3,4:Satellite=Attribution:4)
/// ```
///
/// meaning EDUs 1..=3 are the nucleus of an `Attribution` whose satellite is
/// EDU 4. The two halves must tile a contiguous range, so
/// `left_end + 1 == right_start` always holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EduRelation {
    pub left_start: usize,
    pub left_end: usize,
    pub right_start: usize,
    pub right_end: usize,
    /// Compact label, see [`encode_label`].
    pub label: String,
}

impl EduRelation {
    /// Parse one bracketed relation.
    pub fn parse(text: &str) -> Result<EduRelation> {
        let pattern = regex!(
            r"^\((\d+):(Nucleus|Satellite)=([A-Za-z-]+):(\d+),(\d+):(Nucleus|Satellite)=([A-Za-z-]+):(\d+)\)$"
        );
        let malformed = || StructuralError::MalformedRelation { text: text.to_string() };
        let caps = pattern.captures(text).ok_or_else(malformed)?;

        // 1-based in the raw form; index 0 cannot occur.
        let index = |n: usize| -> Result<usize> {
            let value: usize = caps[n].parse().map_err(|_| malformed())?;
            value.checked_sub(1).ok_or_else(malformed)
        };
        let (left_start, left_end) = (index(1)?, index(4)?);
        let (right_start, right_end) = (index(5)?, index(8)?);
        if left_start > left_end || right_start > right_end {
            return Err(malformed());
        }
        if left_end + 1 != right_start {
            return Err(StructuralError::NonAdjacentRelation { left_end, right_start });
        }
        let label = encode_label(
            Nuclearity::parse(&caps[2])?,
            Nuclearity::parse(&caps[6])?,
            &caps[3],
            &caps[7],
        )?;
        Ok(EduRelation { left_start, left_end, right_start, right_end, label })
    }

    pub(crate) fn boundary(&self) -> (usize, usize, usize, usize) {
        (self.left_start, self.left_end, self.right_start, self.right_end)
    }
}

impl std::fmt::Display for EduRelation {
    /// The 1-based raw form. Inverse of [`EduRelation::parse`].
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (nuc_left, nuc_right, rel_left, rel_right) =
            decode_label(&self.label).map_err(|_| std::fmt::Error)?;
        write!(
            f,
            "({}:{}={}:{},{}:{}={}:{})",
            self.left_start + 1,
            nuc_left,
            rel_left,
            self.left_end + 1,
            self.right_start + 1,
            nuc_right,
            rel_right,
            self.right_end + 1,
        )
    }
}

/// Token span of every EDU, derived from the break table.
///
/// `breaks[i]` is the index of the last token of EDU `i`, so EDU 0 covers
/// `0..=breaks[0]` and EDU `i` covers `breaks[i-1]+1..=breaks[i]`. Spans are
/// stored with inclusive ends, matching the break convention; the resolver
/// shifts to exclusive boundaries when it emits steps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EduSpans {
    spans: Vec<(usize, usize)>,
}

impl EduSpans {
    pub fn from_breaks(breaks: &[usize]) -> Result<EduSpans> {
        let Some(&first) = breaks.first() else {
            return Err(StructuralError::EmptyDocument);
        };
        let mut spans = Vec::with_capacity(breaks.len());
        spans.push((0, first));
        for (position, window) in breaks.windows(2).enumerate() {
            let (previous, value) = (window[0], window[1]);
            if value <= previous {
                return Err(StructuralError::NonMonotonicBreaks {
                    position: position + 1,
                    previous,
                    value,
                });
            }
            spans.push((previous + 1, value));
        }
        Ok(EduSpans { spans })
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Inclusive token span of EDU `index`.
    pub fn get(&self, index: usize) -> Result<(usize, usize)> {
        self.spans
            .get(index)
            .copied()
            .ok_or(StructuralError::EduOutOfRange { index, edus: self.spans.len() })
    }

    /// First token of EDU `index`.
    pub fn start(&self, index: usize) -> Result<usize> {
        Ok(self.get(index)?.0)
    }

    /// Last token of EDU `index`, inclusive.
    pub fn end(&self, index: usize) -> Result<usize> {
        Ok(self.get(index)?.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_through_display() {
        let texts = [
            "(1:Nucleus=span:3,4:Satellite=Attribution:4)",
            "(1:Nucleus=Joint:1,2:Nucleus=Joint:3)",
            "(2:Satellite=Attribution:2,3:Nucleus=span:3)",
        ];
        for text in texts {
            let relation = EduRelation::parse(text).unwrap();
            assert_eq!(relation.to_string(), text);
        }
    }

    #[test]
    fn parse_maps_to_zero_based_indices() {
        let relation = EduRelation::parse("(1:Nucleus=span:3,4:Satellite=Attribution:4)").unwrap();
        assert_eq!(relation.boundary(), (0, 2, 3, 3));
        assert_eq!(relation.label, "Attribution_NS");
    }

    #[test]
    fn parse_rejects_bad_text() {
        // Grammar violations.
        assert!(matches!(
            EduRelation::parse("(1:Nucleus=span:3)"),
            Err(StructuralError::MalformedRelation { .. })
        ));
        // 0 cannot appear in the 1-based form.
        assert!(matches!(
            EduRelation::parse("(0:Nucleus=span:3,4:Satellite=Attribution:4)"),
            Err(StructuralError::MalformedRelation { .. })
        ));
        // Reversed range.
        assert!(matches!(
            EduRelation::parse("(3:Nucleus=span:1,4:Satellite=Attribution:4)"),
            Err(StructuralError::MalformedRelation { .. })
        ));
        // A gap between the halves.
        assert_eq!(
            EduRelation::parse("(1:Nucleus=span:2,4:Satellite=Attribution:4)"),
            Err(StructuralError::NonAdjacentRelation { left_end: 1, right_start: 3 })
        );
        // Unknown nuclearity.
        assert!(EduRelation::parse("(1:Mononucleus=span:3,4:Satellite=Attribution:4)").is_err());
    }

    #[test]
    fn spans_from_breaks() {
        let spans = EduSpans::from_breaks(&[11, 15, 23, 29]).unwrap();
        assert_eq!(spans.len(), 4);
        assert_eq!(spans.get(0).unwrap(), (0, 11));
        assert_eq!(spans.get(1).unwrap(), (12, 15));
        assert_eq!(spans.get(3).unwrap(), (24, 29));
        assert_eq!(
            spans.get(4),
            Err(StructuralError::EduOutOfRange { index: 4, edus: 4 })
        );
    }

    #[test]
    fn spans_reject_bad_breaks() {
        assert_eq!(EduSpans::from_breaks(&[]), Err(StructuralError::EmptyDocument));
        assert_eq!(
            EduSpans::from_breaks(&[11, 11]),
            Err(StructuralError::NonMonotonicBreaks { position: 1, previous: 11, value: 11 })
        );
        assert_eq!(
            EduSpans::from_breaks(&[11, 15, 13]),
            Err(StructuralError::NonMonotonicBreaks { position: 2, previous: 15, value: 13 })
        );
    }
}
