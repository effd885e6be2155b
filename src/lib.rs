extern crate self as chartree;

#[macro_use]
mod macros;
mod api;
mod constituency;
mod dependency;
mod discourse;
mod error;
mod tree;

pub use api::{
    ConstituencyEncoding, DiscourseDocument, DiscourseEncoding, encode_constituency,
    encode_discourse,
};
pub use constituency::{
    BinarizeOptions, Direction, DummyMode, binarize, build, factorize, parsing_order_dfs,
};
pub use dependency::{is_projective, is_tree, nearest_siblings};
pub use discourse::{
    EduRelation, EduSpans, LabeledStep, Nuclearity, RelationIndex, build_gold, build_structure,
    decode_label, encode_label, resolve,
};
pub use error::{Result, StructuralError};
pub use tree::Tree;

// --- Core span types --------------------------------------------------------

/// A labeled constituent span over token positions.
///
/// `start`/`end` are 0-based fenceposts: `0 <= start < end <= n` for a
/// sentence of `n` tokens. Spans produced by [`factorize`] are emitted in
/// pre-order, so a parent span always precedes its children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub label: String,
}

impl Span {
    pub fn new(start: usize, end: usize, label: impl Into<String>) -> Self {
        Span { start, end, label: label.into() }
    }

    /// Width in tokens.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.start, self.end, self.label)
    }
}

/// A binary split point in token coordinates, driving top-down decoding.
///
/// Regular steps satisfy `start < split < end`. A *self-pointing* step has
/// `split == end` and marks a terminal boundary (a leaf EDU, or a sentence
/// with no further splits); decoders treat it as "stop descending here".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParsingStep {
    pub start: usize,
    pub split: usize,
    pub end: usize,
}

impl ParsingStep {
    pub fn new(start: usize, split: usize, end: usize) -> Self {
        ParsingStep { start, split, end }
    }

    /// Self-pointing steps carry no split; they terminate a branch.
    pub fn is_self_pointing(&self) -> bool {
        self.split == self.end
    }
}

impl std::fmt::Display for ParsingStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.start, self.split, self.end)
    }
}
