//! Structural errors shared by the codecs.
//!
//! The split between errors and boolean validation follows a simple rule:
//! `dependency::is_tree` / `is_projective` are *classifiers* that degrade to
//! `false` on malformed input, while the codecs (`binarize`, `build`, the
//! discourse resolver) fail hard with a `StructuralError` naming the
//! offending indices. A failed document never leaves partial results behind.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StructuralError>;

/// A tree, span sequence, or relation set violated a structural invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// A node label contains the unary-chain join separator, which would make
    /// the collapsed label ambiguous to decode.
    #[error("label `{label}` contains the chain separator `{separator}`")]
    SeparatorClash { label: String, separator: String },

    /// The span sequence ran out while subtrees were still being decoded.
    #[error("span sequence exhausted after {consumed} spans")]
    SpanUnderflow { consumed: usize },

    /// The span sequence had entries left over after the tree was complete.
    #[error("{remaining} spans left over after decoding finished")]
    SpanOverflow { remaining: usize },

    /// A span referenced a leaf position the skeleton does not have, or the
    /// decoded tree did not consume every leaf.
    #[error("leaf mismatch: expected {expected} leaves, span sequence covers {got}")]
    LeafMismatch { expected: usize, got: usize },

    /// Raw bracket text that does not match the tree grammar.
    #[error("malformed tree text at byte {position}: {reason}")]
    MalformedTree { position: usize, reason: &'static str },

    /// Raw relation text that does not match the bracket-relation grammar.
    #[error("malformed relation `{text}`")]
    MalformedRelation { text: String },

    /// A relation whose halves are not adjacent (`left_end + 1 != right_start`).
    #[error("non-adjacent relation halves: left ends at {left_end}, right starts at {right_start}")]
    NonAdjacentRelation { left_end: usize, right_start: usize },

    /// An invalid nuclearity combination or an unknown relation label.
    #[error("invalid relation label `{label}`")]
    InvalidLabel { label: String },

    /// A well-formed document must carry exactly `edus - 1` relations.
    #[error("{relations} relations cannot form a binary tree over {edus} EDUs")]
    RelationCountMismatch { relations: usize, edus: usize },

    /// No relation spans the whole document.
    #[error("no root relation spanning EDUs 0..={last}")]
    MissingRoot { last: usize },

    /// More than one relation spans the whole document.
    #[error("{count} relations span the whole document")]
    AmbiguousRoot { count: usize },

    /// A child lookup during traversal found no relation with the required
    /// boundaries.
    #[error("no relation covering EDUs {start}..={end}")]
    MissingChild { start: usize, end: usize },

    /// A child lookup during traversal matched more than one relation.
    #[error("{count} relations cover EDUs {start}..={end}")]
    AmbiguousChild { start: usize, end: usize, count: usize },

    /// A discourse document with no EDU breaks at all.
    #[error("document has no EDUs")]
    EmptyDocument,

    /// EDU break offsets must be strictly increasing.
    #[error("EDU break at position {position} is not increasing ({previous} -> {value})")]
    NonMonotonicBreaks { position: usize, previous: usize, value: usize },

    /// A relation referenced an EDU index outside the break table.
    #[error("EDU index {index} out of range for {edus} EDUs")]
    EduOutOfRange { index: usize, edus: usize },
}
