//! Constituency-tree codec.
//!
//! Turns an n-ary labeled tree into a flat, pre-order span sequence a chart
//! decoder can consume, and back. The encode direction is a pipeline of pure
//! tree-to-tree passes followed by a traversal:
//!
//! ```text
//! tree ── wrap leaf children ──> uniform arity      (binarize.rs)
//!      ── CNF binarize       ──> arity <= 2
//!      ── collapse unary     ──> chain labels
//!                               │
//!                               v
//!                    factorize / parsing_order_dfs  (factorize.rs)
//!                               │
//!                               v
//!                  Vec<Span> / Vec<ParsingStep>
//! ```
//!
//! The decode direction (`build`, build.rs) consumes the span sequence
//! against a flat skeleton of preterminals and is the exact inverse:
//! dummy-suffixed binarization artifacts are unwrapped, chain labels are
//! re-expanded into unary productions. For any tree with at least two
//! leaves, `build(skeleton(t), factorize(binarize(t)))` reproduces `t`.
//!
//! Binarization is configurable in direction (`left` groups the leftmost
//! children deepest, `right` mirrors) and in how the dummy wrapper labels
//! are formed; see [`BinarizeOptions`]. Collapsing a unary chain whose
//! member labels contain the chain separator is rejected, since the decoder
//! could not split the collapsed label back apart.

#[path = "constituency/binarize.rs"]
mod binarize;
#[path = "constituency/build.rs"]
mod build;
#[path = "constituency/factorize.rs"]
mod factorize;
#[cfg(test)]
#[path = "constituency/tests.rs"]
mod tests;

pub use binarize::{BinarizeOptions, DUMMY_SUFFIX, Direction, DummyMode, binarize};
pub use build::build;
pub use factorize::{factorize, parsing_order_dfs};
