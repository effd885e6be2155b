//! Pre-order factorization of a (binarized) tree into flat sequences.

use std::collections::{HashMap, HashSet};

use crate::tree::Tree;
use crate::{ParsingStep, Span};

/// Factorize the tree into a pre-order span sequence.
///
/// `delete_labels` applies the EVALB bracket-deletion convention: a deleted
/// preterminal removes the word's contribution to span widths, a deleted
/// non-terminal removes only its own bracket while its children still count.
/// `equal_labels` substitutes a canonical alternative before emission (for
/// scoring label sets that merge categories, e.g. `ADVP` -> `PRT`).
///
/// Every node with a surviving label and nonzero width emits
/// `(start, end, label)` ahead of its children's spans. Width-1 dummy
/// wrappers emit too; [`super::build`] relies on them to place leaves.
pub fn factorize(
    tree: &Tree,
    delete_labels: Option<&HashSet<String>>,
    equal_labels: Option<&HashMap<String, String>>,
) -> Vec<Span> {
    fn track(
        tree: &Tree,
        i: usize,
        delete: Option<&HashSet<String>>,
        equal: Option<&HashMap<String, String>>,
    ) -> (usize, Vec<Span>) {
        let Tree::Internal { label, children } = tree else {
            return (i, Vec::new());
        };
        let label = effective_label(label, delete, equal);
        if children.len() == 1 && children[0].is_leaf() {
            // Preterminal: a deleted tag deletes the word along with it.
            return (if label.is_some() { i + 1 } else { i }, Vec::new());
        }
        let mut j = i;
        let mut spans = Vec::new();
        for child in children {
            let (next, child_spans) = track(child, j, delete, equal);
            j = next;
            spans.extend(child_spans);
        }
        if let Some(label) = label {
            if j > i {
                spans.insert(0, Span::new(i, j, label));
            }
        }
        (j, spans)
    }

    track(tree, 0, delete_labels, equal_labels).1
}

/// Pre-order split points of a binarized tree.
///
/// Emits `(start, first_child_end, end)` for every node with exactly two
/// children, parents before children. Single-child nodes (preterminals and
/// the dummy wrappers a binarized tree puts over them) act as terminals
/// that advance the token cursor; nodes of other arities contribute their
/// boundary but no step.
pub fn parsing_order_dfs(
    tree: &Tree,
    delete_labels: Option<&HashSet<String>>,
    equal_labels: Option<&HashMap<String, String>>,
) -> Vec<ParsingStep> {
    fn track(
        tree: &Tree,
        i: usize,
        delete: Option<&HashSet<String>>,
        equal: Option<&HashMap<String, String>>,
    ) -> (usize, Vec<ParsingStep>) {
        let Tree::Internal { label, children } = tree else {
            return (i, Vec::new());
        };
        let label = effective_label(label, delete, equal);
        if children.len() == 1 {
            return (if label.is_some() { i + 1 } else { i }, Vec::new());
        }
        let mut bounds = vec![i];
        let mut j = i;
        let mut steps = Vec::new();
        for child in children {
            let (next, child_steps) = track(child, j, delete, equal);
            j = next;
            bounds.push(j);
            steps.extend(child_steps);
        }
        if bounds.len() == 3 {
            steps.insert(0, ParsingStep::new(bounds[0], bounds[1], bounds[2]));
        }
        (j, steps)
    }

    track(tree, 0, delete_labels, equal_labels).1
}

fn effective_label<'a>(
    label: &'a str,
    delete: Option<&HashSet<String>>,
    equal: Option<&'a HashMap<String, String>>,
) -> Option<&'a str> {
    if delete.is_some_and(|d| d.contains(label)) {
        return None;
    }
    match equal.and_then(|eq| eq.get(label)) {
        Some(substitute) => Some(substitute.as_str()),
        None => Some(label),
    }
}
