//! The curated one-call surface over the two codecs.
//!
//! The per-pass functions in `constituency` and `discourse` stay public for
//! callers that need a single sequence, but a data pipeline usually wants
//! everything a sentence or document encodes to in one struct. That is what
//! [`encode_constituency`] and [`encode_discourse`] produce.

use crate::constituency::{BinarizeOptions, binarize, factorize, parsing_order_dfs};
use crate::discourse::resolve;
use crate::error::Result;
use crate::tree::Tree;
use crate::{ParsingStep, Span};

pub use crate::discourse::DiscourseEncoding;

/// Chart spans and split order of one sentence, both over the binarized
/// tree with a unary root stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstituencyEncoding {
    pub chart: Vec<Span>,
    pub order: Vec<ParsingStep>,
}

/// Encode a constituency tree into its chart and split-order sequences.
///
/// The tree is binarized first; a unary root is stripped before
/// factorization so the root bracket is implied rather than emitted, which
/// is what `build` expects when it re-adds the skeleton's root label.
/// Trees with fewer than two leaves have no splits to predict and encode
/// to empty sequences.
pub fn encode_constituency(
    tree: &Tree,
    options: &BinarizeOptions,
) -> Result<ConstituencyEncoding> {
    if tree.leaf_count() < 2 {
        return Ok(ConstituencyEncoding { chart: Vec::new(), order: Vec::new() });
    }
    let binarized = binarize(tree, options)?;
    let body = match binarized.children() {
        [only] => only,
        _ => &binarized,
    };
    Ok(ConstituencyEncoding {
        chart: factorize(body, None, None),
        order: parsing_order_dfs(body, None, None),
    })
}

/// One document of a segmented discourse corpus.
///
/// `edu_break` holds the last token index of each EDU, `sent_break` the same
/// per sentence where the corpus provides it. `structure` is the bracketed
/// relation list, one entry per internal tree node; empty for unsegmented
/// single-EDU documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscourseDocument {
    pub edu_break: Vec<usize>,
    pub sent_break: Option<Vec<usize>>,
    pub structure: Vec<String>,
}

/// Resolve a document into its token-level encoding. See
/// [`crate::discourse::resolve`] for the sequence semantics.
pub fn encode_discourse(document: &DiscourseDocument) -> Result<DiscourseEncoding> {
    resolve(&document.structure, &document.edu_break, document.sent_break.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_constituency_strips_the_unary_root() {
        let tree: Tree = "(TOP (S (NP (_ She)) (VP (_ enjoys) (S (VP (_ playing) (NP (_ tennis))))) (_ .)))"
            .parse()
            .unwrap();
        let enc = encode_constituency(&tree, &BinarizeOptions::default()).unwrap();
        assert_eq!(enc.chart.len(), 9);
        assert_eq!(enc.chart[0], Span::new(0, 5, "S"));
        assert_eq!(enc.order[0], ParsingStep::new(0, 4, 5));
    }

    #[test]
    fn short_sentences_encode_to_nothing() {
        let tree: Tree = "(TOP (NP (_ Yes)))".parse().unwrap();
        let enc = encode_constituency(&tree, &BinarizeOptions::default()).unwrap();
        assert!(enc.chart.is_empty());
        assert!(enc.order.is_empty());
    }

    #[test]
    fn encode_discourse_delegates_to_the_resolver() {
        let document = DiscourseDocument {
            edu_break: vec![3, 7],
            sent_break: None,
            structure: vec!["(1:Nucleus=span:1,2:Satellite=Elaboration:2)".to_string()],
        };
        let enc = encode_discourse(&document).unwrap();
        assert_eq!(enc.order_token, vec![ParsingStep::new(0, 4, 8)]);
        assert_eq!(enc.edu_break, vec![4, 8]);
    }
}
