//! Rebuilding a constituency tree from its pre-order span sequence.

use super::binarize::{DUMMY_SUFFIX, chain_decode};
use crate::error::{Result, StructuralError};
use crate::tree::Tree;
use crate::Span;

/// Build a constituency tree from a pre-order span sequence.
///
/// `skeleton` supplies the root label and the preterminal leaves in sentence
/// order (typically [`Tree::from_tokens`]). The sequence is consumed front to
/// back: a width-1 span terminates with the corresponding leaf, a wider span
/// consumes its left subtree and then its right. Labels ending in the dummy
/// binarization suffix contribute no node — their children are passed
/// through — and chain labels are re-expanded into unary productions,
/// outermost label first. `join` must match the separator the sequence was
/// encoded with.
///
/// Fails without guessing when the sequence runs out early, has spans left
/// over, or does not cover the skeleton's leaves exactly.
pub fn build(skeleton: &Tree, spans: &[Span], join: &str) -> Result<Tree> {
    let Some(root_label) = skeleton.label() else {
        return Err(StructuralError::MalformedTree {
            position: 0,
            reason: "skeleton root must be an internal node",
        });
    };
    let leaves = skeleton.preterminals();
    let mut iter = spans.iter();
    let mut consumed = 0;
    let children = track(&mut iter, &leaves, &mut consumed, join)?;
    let remaining = iter.len();
    if remaining > 0 {
        return Err(StructuralError::SpanOverflow { remaining });
    }
    let got: usize = children.iter().map(|t| t.leaf_count()).sum();
    if got != leaves.len() {
        return Err(StructuralError::LeafMismatch { expected: leaves.len(), got });
    }
    Ok(Tree::internal(root_label, children))
}

fn track(
    iter: &mut std::slice::Iter<'_, Span>,
    leaves: &[&Tree],
    consumed: &mut usize,
    join: &str,
) -> Result<Vec<Tree>> {
    let Some(span) = iter.next() else {
        return Err(StructuralError::SpanUnderflow { consumed: *consumed });
    };
    *consumed += 1;

    let children = if span.end == span.start + 1 {
        let Some(leaf) = leaves.get(span.start) else {
            return Err(StructuralError::LeafMismatch { expected: leaves.len(), got: span.end });
        };
        vec![(*leaf).clone()]
    } else {
        let mut left = track(iter, leaves, consumed, join)?;
        let right = track(iter, leaves, consumed, join)?;
        left.extend(right);
        left
    };

    if span.label.ends_with(DUMMY_SUFFIX) {
        // Binarization artifact: its children flow to the parent directly.
        return Ok(children);
    }

    let mut chain = chain_decode(&span.label, join);
    let Some(innermost) = chain.pop() else {
        return Ok(children);
    };
    let mut node = Tree::internal(innermost, children);
    for label in chain.into_iter().rev() {
        node = Tree::internal(label, vec![node]);
    }
    Ok(vec![node])
}
