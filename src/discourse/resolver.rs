//! From an unordered relation list to pre-order split sequences and back.
//!
//! The gold annotation gives one relation per internal node of the discourse
//! tree, in document order of the left boundary, with no explicit
//! parent/child links. The resolver recovers the tree shape by boundary
//! lookup: a node covering EDUs `a..=d` with split after `b` has children
//! covering `a..=b` and `b+1..=d`, and a well-formed document contains
//! exactly one relation per internal range. Every lookup that finds zero or
//! several candidates fails with the offending boundary instead of guessing.

use std::collections::HashMap;

use crate::error::{Result, StructuralError};
use crate::ParsingStep;

use super::label::decode_label;
use super::relation::{EduRelation, EduSpans};

/// A split point with its relation label, in token or EDU coordinates
/// depending on the producing sequence. `end` is exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabeledStep {
    pub start: usize,
    pub split: usize,
    pub end: usize,
    pub label: String,
}

impl LabeledStep {
    pub fn new(start: usize, split: usize, end: usize, label: impl Into<String>) -> Self {
        LabeledStep { start, split, end, label: label.into() }
    }
}

impl std::fmt::Display for LabeledStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {}, {})", self.start, self.split, self.end, self.label)
    }
}

/// Everything the token-level encoding of one document consists of.
///
/// Break tables are boundary-shifted (last token index + 1). The `label_*`
/// sequences follow document order of the annotation; the `order_*`
/// sequences follow the pre-order traversal. `self_pointing_token`
/// additionally interleaves one self-pointing sentinel per leaf EDU, which
/// is what a parser with joint EDU segmentation trains on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscourseEncoding {
    pub sent_break: Option<Vec<usize>>,
    pub edu_break: Vec<usize>,
    pub label_token: Vec<LabeledStep>,
    pub label_edu: Vec<LabeledStep>,
    pub order_edu: Vec<ParsingStep>,
    pub order_token: Vec<ParsingStep>,
    pub self_pointing_token: Vec<ParsingStep>,
}

/// Read-only lookup of relations by their outer EDU boundary.
pub struct RelationIndex<'a> {
    by_boundary: HashMap<(usize, usize), Vec<&'a EduRelation>>,
}

impl<'a> RelationIndex<'a> {
    pub fn new(relations: &'a [EduRelation]) -> Self {
        let mut by_boundary: HashMap<(usize, usize), Vec<&'a EduRelation>> = HashMap::new();
        for relation in relations {
            by_boundary
                .entry((relation.left_start, relation.right_end))
                .or_default()
                .push(relation);
        }
        RelationIndex { by_boundary }
    }

    /// The unique relation covering EDUs `start..=end`.
    pub fn lookup(&self, start: usize, end: usize) -> Result<&'a EduRelation> {
        match self.by_boundary.get(&(start, end)).map(Vec::as_slice) {
            None | Some([]) => Err(StructuralError::MissingChild { start, end }),
            Some(&[relation]) => Ok(relation),
            Some(candidates) => {
                Err(StructuralError::AmbiguousChild { start, end, count: candidates.len() })
            }
        }
    }

    /// The unique relation covering the whole document, EDUs `0..=last`.
    pub fn root(&self, last: usize) -> Result<&'a EduRelation> {
        match self.lookup(0, last) {
            Err(StructuralError::MissingChild { .. }) => {
                Err(StructuralError::MissingRoot { last })
            }
            Err(StructuralError::AmbiguousChild { count, .. }) => {
                Err(StructuralError::AmbiguousRoot { count })
            }
            other => other,
        }
    }
}

/// Resolve a document's relation list into its token-level encoding.
///
/// `structure` holds one bracketed relation per internal tree node (see
/// [`EduRelation::parse`]); an empty slice means an unsegmented single-EDU
/// document. `edu_break` / `sent_break` are last-token indices per EDU and
/// per sentence.
pub fn resolve(
    structure: &[String],
    edu_break: &[usize],
    sent_break: Option<&[usize]>,
) -> Result<DiscourseEncoding> {
    let spans = EduSpans::from_breaks(edu_break)?;

    if structure.is_empty() {
        // No tree to traverse: the whole document is one leaf.
        let end = spans.end(0)? + 1;
        return Ok(DiscourseEncoding {
            sent_break: sent_break
                .map(|sb| sb.first().map(|&x| vec![x + 1]).unwrap_or_default()),
            edu_break: vec![end],
            label_token: Vec::new(),
            label_edu: Vec::new(),
            order_edu: Vec::new(),
            order_token: Vec::new(),
            self_pointing_token: vec![ParsingStep::new(0, end, end)],
        });
    }

    let relations = structure
        .iter()
        .map(|text| EduRelation::parse(text))
        .collect::<Result<Vec<_>>>()?;
    if relations.len() != spans.len() - 1 {
        return Err(StructuralError::RelationCountMismatch {
            relations: relations.len(),
            edus: spans.len(),
        });
    }

    let index = RelationIndex::new(&relations);
    let traversal = traverse(&index, spans.len() - 1)?;

    let mut order_edu = Vec::new();
    let mut order_token = Vec::new();
    let mut self_pointing_token = Vec::with_capacity(traversal.len());
    for (a, b, c, d) in traversal {
        if a == b && b == c && c == d {
            // Leaf sentinel: one EDU pointing at its own right boundary.
            let (start, end) = spans.get(a)?;
            self_pointing_token.push(ParsingStep::new(start, end + 1, end + 1));
        } else {
            let start = spans.start(a)?;
            let split = spans.start(c)?;
            let end = spans.end(d)? + 1;
            self_pointing_token.push(ParsingStep::new(start, split, end));
            order_token.push(ParsingStep::new(start, split, end));
            order_edu.push(ParsingStep::new(a, c, d + 1));
        }
    }

    let mut label_token = Vec::with_capacity(relations.len());
    let mut label_edu = Vec::with_capacity(relations.len());
    for relation in &relations {
        let start = spans.start(relation.left_start)?;
        let split = spans.start(relation.right_start)?;
        let end = spans.end(relation.right_end)? + 1;
        label_token.push(LabeledStep::new(start, split, end, relation.label.clone()));
        label_edu.push(LabeledStep::new(
            relation.left_start,
            relation.right_start,
            relation.right_end + 1,
            relation.label.clone(),
        ));
    }

    Ok(DiscourseEncoding {
        sent_break: sent_break.map(|sb| sb.iter().map(|&x| x + 1).collect()),
        edu_break: edu_break.iter().map(|&x| x + 1).collect(),
        label_token,
        label_edu,
        order_edu,
        order_token,
        self_pointing_token,
    })
}

/// Pre-order traversal over EDU boundary 4-tuples
/// `(left_start, left_end, right_start, right_end)`, with a degenerate
/// all-equal tuple per leaf EDU. Left subtrees are visited first.
fn traverse(
    index: &RelationIndex<'_>,
    last: usize,
) -> Result<Vec<(usize, usize, usize, usize)>> {
    let debug = std::env::var_os("CHARTREE_DEBUG").is_some();
    let root = index.root(last)?;
    let mut out = Vec::new();
    let mut stack = vec![root.boundary()];
    while let Some(head) = stack.pop() {
        if debug {
            eprintln!("[traverse] head={head:?} depth={}", stack.len() + 1);
        }
        out.push(head);
        let (a, b, c, d) = head;
        if a == b && c == d && b == c {
            // Leaf sentinel, nothing below it.
        } else if a == b && c == d {
            // Both halves are single EDUs.
            stack.push((c, c, c, c));
            stack.push((a, a, a, a));
        } else if a == b {
            stack.push(index.lookup(c, d)?.boundary());
            stack.push((a, a, a, a));
        } else if c == d {
            stack.push((c, c, c, c));
            stack.push(index.lookup(a, b)?.boundary());
        } else {
            stack.push(index.lookup(c, d)?.boundary());
            stack.push(index.lookup(a, b)?.boundary());
        }
    }
    Ok(out)
}

/// Serialize labeled token-level steps back into the bracket grammar.
///
/// Self-pointing and degenerate steps carry no relation and are skipped; an
/// empty result serializes as `NONE`. Inclusive right boundaries reappear in
/// the text, so `(0, 12, 24, "Joint_NN")` prints as
/// `(0:Nucleus=Joint:11,12:Nucleus=Joint:23)`.
pub fn build_structure(steps: &[LabeledStep]) -> Result<String> {
    let mut nodes = Vec::new();
    for step in steps {
        if step.split <= step.start || step.split >= step.end {
            continue;
        }
        let (nuc_left, nuc_right, rel_left, rel_right) = decode_label(&step.label)?;
        nodes.push(format!(
            "({}:{}={}:{},{}:{}={}:{})",
            step.start,
            nuc_left,
            rel_left,
            step.split - 1,
            step.split,
            nuc_right,
            rel_right,
            step.end - 1,
        ));
    }
    if nodes.is_empty() {
        return Ok("NONE".to_string());
    }
    Ok(nodes.join(" "))
}

/// Lift a gold EDU-level relation list to token coordinates.
///
/// Each relation keeps its nuclearity and relation names; its 1-based EDU
/// indices are replaced by 0-based token indices with inclusive ends, the
/// same coordinates [`build_structure`] emits. An empty `structure`
/// serializes as `NONE`.
pub fn build_gold(edu_break: &[usize], structure: &[String]) -> Result<String> {
    if structure.is_empty() {
        return Ok("NONE".to_string());
    }
    let spans = EduSpans::from_breaks(edu_break)?;
    let mut nodes = Vec::with_capacity(structure.len());
    for text in structure {
        let relation = EduRelation::parse(text)?;
        let (nuc_left, nuc_right, rel_left, rel_right) = decode_label(&relation.label)?;
        nodes.push(format!(
            "({}:{}={}:{},{}:{}={}:{})",
            spans.start(relation.left_start)?,
            nuc_left,
            rel_left,
            spans.end(relation.left_end)?,
            spans.start(relation.right_start)?,
            nuc_right,
            rel_right,
            spans.end(relation.right_end)?,
        ));
    }
    Ok(nodes.join(" "))
}
