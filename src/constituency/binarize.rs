//! Tree normalization: leaf wrapping, CNF binarization, unary collapse.
//!
//! Each pass takes a tree by reference and produces a new tree, so a subtree
//! is never aliased while the shape above it is being rewritten. The passes
//! compose into [`binarize`], which is idempotent: running it on an already
//! normalized tree is a no-op.

use crate::error::{Result, StructuralError};
use crate::tree::Tree;

/// Suffix marking nodes introduced by the codec itself. `build` unwraps any
/// label ending in this suffix instead of emitting a tree node for it.
pub const DUMMY_SUFFIX: &str = "|<>";

/// Which side of a production gets grouped deepest during binarization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// `(A c1 c2 c3)` becomes `(A (A|<> c1 c2) c3)`.
    #[default]
    Left,
    /// `(A c1 c2 c3)` becomes `(A c1 (A|<> c2 c3))`.
    Right,
}

/// How dummy wrapper/intermediate labels are formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DummyMode {
    /// `<parent-label>|<>` — keeps the parent category visible.
    #[default]
    Parent,
    /// A single universal `|<>` marker.
    Universal,
    /// `UNARY|<>` — universal, but named so the marker survives label
    /// vocabularies that strip empty prefixes.
    UniversalUnary,
}

impl DummyMode {
    fn label(self, parent: &str) -> String {
        match self {
            DummyMode::Parent => format!("{parent}{DUMMY_SUFFIX}"),
            DummyMode::Universal => DUMMY_SUFFIX.to_string(),
            DummyMode::UniversalUnary => format!("UNARY{DUMMY_SUFFIX}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BinarizeOptions {
    pub direction: Direction,
    pub dummy: DummyMode,
    /// Separator for collapsed unary chains. `+` by default; `====` is used
    /// by treebanks whose category names themselves contain `+`.
    pub join: String,
}

impl Default for BinarizeOptions {
    fn default() -> Self {
        BinarizeOptions {
            direction: Direction::Left,
            dummy: DummyMode::Parent,
            join: "+".to_string(),
        }
    }
}

impl BinarizeOptions {
    pub fn with_join(join: impl Into<String>) -> Self {
        BinarizeOptions { join: join.into(), ..Default::default() }
    }
}

// --- Chain-label codec ------------------------------------------------------

/// Encode a root-to-leaf label chain into a single collapsed label.
pub(crate) fn chain_encode(parts: &[String], join: &str) -> String {
    parts.join(join)
}

/// Decode a collapsed label back into its chain, outermost first. The
/// inverse of [`chain_encode`] as long as no chain member contains the
/// separator, which collapsing rejects.
pub(crate) fn chain_decode<'a>(label: &'a str, join: &str) -> Vec<&'a str> {
    label.split(join).collect()
}

// --- Pipeline ---------------------------------------------------------------

/// Normalize a tree into the strictly-binary-or-leaf form the span codec
/// factorizes.
///
/// 1. Wrap every preterminal child of a multi-child node in a dummy unary,
///    so binarization never mixes preterminals with phrase nodes.
/// 2. Chomsky-normal-form binarization in `options.direction`, labeling the
///    intermediate nodes per `options.dummy`.
/// 3. Collapse unary chains of phrase nodes into a single node whose label
///    joins the chain with `options.join`, outermost label first. The root
///    and parents of preterminals are never collapsed.
///
/// Collapsing rejects chains whose member labels contain the join separator
/// (the collapsed label could not be decoded unambiguously); pick the `====`
/// separator for treebanks whose category names contain `+`. Already
/// normalized input passes through unchanged, so `binarize` is a fixed
/// point of itself.
pub fn binarize(tree: &Tree, options: &BinarizeOptions) -> Result<Tree> {
    let wrapped = wrap_leaf_children(tree, options.dummy);
    let cnf = to_cnf(wrapped, options.direction, options.dummy);
    collapse_unary_root(cnf, &options.join)
}

fn wrap_leaf_children(tree: &Tree, dummy: DummyMode) -> Tree {
    match tree {
        Tree::Leaf { .. } => tree.clone(),
        Tree::Internal { label, children } => {
            let multi = children.len() > 1;
            let kids = children
                .iter()
                .map(|child| {
                    let child = wrap_leaf_children(child, dummy);
                    if multi && child.is_preterminal() {
                        Tree::internal(dummy.label(label), vec![child])
                    } else {
                        child
                    }
                })
                .collect();
            Tree::internal(label.clone(), kids)
        }
    }
}

fn to_cnf(tree: Tree, direction: Direction, dummy: DummyMode) -> Tree {
    match tree {
        Tree::Leaf { .. } => tree,
        Tree::Internal { label, children } => {
            let kids: Vec<Tree> =
                children.into_iter().map(|c| to_cnf(c, direction, dummy)).collect();
            let kids = split_children(&label, kids, direction, dummy);
            Tree::internal(label, kids)
        }
    }
}

fn split_children(
    parent: &str,
    mut kids: Vec<Tree>,
    direction: Direction,
    dummy: DummyMode,
) -> Vec<Tree> {
    if kids.len() <= 2 {
        return kids;
    }
    match direction {
        Direction::Left => {
            let Some(last) = kids.pop() else { return kids };
            let inner = split_children(parent, kids, direction, dummy);
            vec![Tree::internal(dummy.label(parent), inner), last]
        }
        Direction::Right => {
            let first = kids.remove(0);
            let inner = split_children(parent, kids, direction, dummy);
            vec![first, Tree::internal(dummy.label(parent), inner)]
        }
    }
}

/// The root itself is never merged into its child, even when unary.
fn collapse_unary_root(tree: Tree, join: &str) -> Result<Tree> {
    match tree {
        Tree::Leaf { .. } => Ok(tree),
        Tree::Internal { label, children } => Ok(Tree::internal(
            label,
            children
                .into_iter()
                .map(|c| collapse_node(c, join))
                .collect::<Result<Vec<_>>>()?,
        )),
    }
}

fn collapse_node(tree: Tree, join: &str) -> Result<Tree> {
    match tree {
        Tree::Leaf { .. } => Ok(tree),
        Tree::Internal { label, mut children } => {
            let mut chain = vec![label];
            // A unary node over a phrase node (not over a preterminal) merges
            // with its child, repeatedly, into one chain-labeled node.
            while children.len() == 1 && starts_phrase(&children[0]) {
                let Tree::Internal { label: inner, children: grandkids } = children.remove(0)
                else {
                    break;
                };
                chain.push(inner);
                children = grandkids;
            }
            if chain.len() > 1 {
                // A member containing the separator would split wrong on decode.
                if let Some(clash) = chain.iter().find(|part| part.contains(join)) {
                    return Err(StructuralError::SeparatorClash {
                        label: clash.clone(),
                        separator: join.to_string(),
                    });
                }
            }
            let label = chain_encode(&chain, join);
            Ok(Tree::internal(
                label,
                children
                    .into_iter()
                    .map(|c| collapse_node(c, join))
                    .collect::<Result<Vec<_>>>()?,
            ))
        }
    }
}

/// True when the node's first child is itself an internal node, i.e. the
/// node is a phrase over phrases rather than a preterminal or a span of raw
/// words.
fn starts_phrase(tree: &Tree) -> bool {
    matches!(tree.children().first(), Some(Tree::Internal { .. }))
}
