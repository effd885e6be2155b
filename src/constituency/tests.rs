use std::collections::{HashMap, HashSet};

use super::*;
use crate::tree::Tree;
use crate::{ParsingStep, Span, StructuralError};

fn parse(text: &str) -> Tree {
    Tree::from_string(text).unwrap()
}

/// Flat preterminal skeleton with the same tokens and root label.
fn skeleton(tree: &Tree) -> Tree {
    Tree::from_tokens(
        tree.pos().into_iter().map(|(word, tag)| (word, Some(tag))),
        tree.label().unwrap(),
    )
}

const TENNIS: &str =
    "(TOP (S (NP (_ She)) (VP (_ enjoys) (S (VP (_ playing) (NP (_ tennis))))) (_ .)))";

const CAT: &str = "(TOP (S (NP (DT the) (NN cat)) (VP (VBD sat) (PP (IN on) (NP (DT the) (NN mat)))) (. .)))";

#[test]
fn binarize_reference_shape() {
    let tree = parse(TENNIS);
    let bin = binarize(&tree, &BinarizeOptions::default()).unwrap();
    assert_eq!(
        bin.to_string(),
        "(TOP (S (S|<> (NP (_ She)) (VP (VP|<> (_ enjoys)) \
         (S+VP (VP|<> (_ playing)) (NP (_ tennis))))) (S|<> (_ .))))"
    );
}

#[test]
fn binarize_is_idempotent() {
    let opts = BinarizeOptions::default();
    for text in [TENNIS, CAT] {
        let once = binarize(&parse(text), &opts).unwrap();
        let twice = binarize(&once, &opts).unwrap();
        assert_eq!(twice, once, "not a fixed point for {text}");
    }
}

#[test]
fn binarize_right_direction_universal_dummy() {
    let tree = parse("(TOP (A (X x) (Y y) (Z z)))");
    let opts = BinarizeOptions {
        direction: Direction::Right,
        dummy: DummyMode::Universal,
        ..Default::default()
    };
    let bin = binarize(&tree, &opts).unwrap();
    assert_eq!(bin.to_string(), "(TOP (A (|<> (X x)) (|<> (|<> (Y y)) (|<> (Z z)))))");
}

#[test]
fn unary_chain_collapses_and_reexpands() {
    let tree = parse("(TOP (A (B (C (X x) (Y y)))))");
    let bin = binarize(&tree, &BinarizeOptions::default()).unwrap();
    assert_eq!(bin.to_string(), "(TOP (A+B+C (C|<> (X x)) (C|<> (Y y))))");

    let chart = factorize(&bin.children()[0], None, None);
    let rebuilt = build(&skeleton(&tree), &chart, "+").unwrap();
    assert_eq!(rebuilt, tree);
}

#[test]
fn collapse_rejects_separator_clash() {
    // A+B heads a unary chain, so the default separator is ambiguous.
    let tree = parse("(TOP (A+B (C (X x) (Y y))))");
    let err = binarize(&tree, &BinarizeOptions::default()).unwrap_err();
    assert_eq!(
        err,
        StructuralError::SeparatorClash { label: "A+B".into(), separator: "+".into() }
    );
    // The long separator sidesteps it.
    let bin = binarize(&tree, &BinarizeOptions::with_join("====")).unwrap();
    assert_eq!(bin.to_string(), "(TOP (A+B====C (C|<> (X x)) (C|<> (Y y))))");
}

#[test]
fn chart_sequence_fixture() {
    let bin = binarize(&parse(TENNIS), &BinarizeOptions::default()).unwrap();
    let chart = factorize(&bin.children()[0], None, None);
    let expected = [
        (0, 5, "S"),
        (0, 4, "S|<>"),
        (0, 1, "NP"),
        (1, 4, "VP"),
        (1, 2, "VP|<>"),
        (2, 4, "S+VP"),
        (2, 3, "VP|<>"),
        (3, 4, "NP"),
        (4, 5, "S|<>"),
    ];
    let expected: Vec<Span> = expected.iter().map(|&(i, j, l)| Span::new(i, j, l)).collect();
    assert_eq!(chart, expected);
}

#[test]
fn factorize_emits_parents_before_children() {
    let spans = factorize(&parse(TENNIS), None, None);
    let expected = [
        (0, 5, "TOP"),
        (0, 5, "S"),
        (0, 1, "NP"),
        (1, 4, "VP"),
        (2, 4, "S"),
        (2, 4, "VP"),
        (3, 4, "NP"),
    ];
    let expected: Vec<Span> = expected.iter().map(|&(i, j, l)| Span::new(i, j, l)).collect();
    assert_eq!(spans, expected);
}

#[test]
fn deleted_preterminal_removes_the_word() {
    let tree = parse("(TOP (S (NP (PRP She)) (VP (VBZ enjoys) (NP (NN tennis))) (. .)))");
    let delete: HashSet<String> = ["TOP", "."].iter().map(|s| s.to_string()).collect();
    let spans = factorize(&tree, Some(&delete), None);
    let expected = [(0, 3, "S"), (0, 1, "NP"), (1, 3, "VP"), (2, 3, "NP")];
    let expected: Vec<Span> = expected.iter().map(|&(i, j, l)| Span::new(i, j, l)).collect();
    assert_eq!(spans, expected);
}

#[test]
fn equal_labels_substitute_before_emission() {
    let tree = parse("(TOP (S (NP (PRP I)) (VP (VBD ran) (ADVP (RB up)))))");
    let delete: HashSet<String> = HashSet::from(["TOP".to_string()]);
    let equal: HashMap<String, String> = HashMap::from([("ADVP".to_string(), "PRT".to_string())]);
    let spans = factorize(&tree, Some(&delete), Some(&equal));
    let expected = [(0, 3, "S"), (0, 1, "NP"), (1, 3, "VP"), (2, 3, "PRT")];
    let expected: Vec<Span> = expected.iter().map(|&(i, j, l)| Span::new(i, j, l)).collect();
    assert_eq!(spans, expected);
}

#[test]
fn parsing_order_fixture() {
    let bin = binarize(&parse(TENNIS), &BinarizeOptions::default()).unwrap();
    let order = parsing_order_dfs(&bin.children()[0], None, None);
    let expected: Vec<ParsingStep> = [(0, 4, 5), (0, 1, 4), (1, 2, 4), (2, 3, 4)]
        .iter()
        .map(|&(i, k, j)| ParsingStep::new(i, k, j))
        .collect();
    assert_eq!(order, expected);
}

#[test]
fn round_trip_reconstructs_original() {
    let opts = BinarizeOptions::default();
    for text in [TENNIS, CAT, "(TOP (S (NP (NNP Buffalo)) (VP (VBZ buffalo))))"] {
        let tree = parse(text);
        let bin = binarize(&tree, &opts).unwrap();
        let chart = factorize(&bin.children()[0], None, None);
        let rebuilt = build(&skeleton(&tree), &chart, "+").unwrap();
        assert_eq!(rebuilt, tree, "round trip failed for {text}");
    }
}

#[test]
fn build_fails_on_underflow() {
    let skel = Tree::from_tokens([("a", None), ("b", None)], "TOP");
    let err = build(&skel, &[], "+").unwrap_err();
    assert_eq!(err, StructuralError::SpanUnderflow { consumed: 0 });

    // Two-wide span with only one child sequence behind it.
    let spans = [Span::new(0, 2, "S"), Span::new(0, 1, "S|<>")];
    let err = build(&skel, &spans, "+").unwrap_err();
    assert_eq!(err, StructuralError::SpanUnderflow { consumed: 2 });
}

#[test]
fn build_fails_on_overflow() {
    let skel = Tree::from_tokens([("a", None), ("b", None)], "TOP");
    let spans = [
        Span::new(0, 2, "S"),
        Span::new(0, 1, "S|<>"),
        Span::new(1, 2, "S|<>"),
        Span::new(0, 1, "X"),
    ];
    let err = build(&skel, &spans, "+").unwrap_err();
    assert_eq!(err, StructuralError::SpanOverflow { remaining: 1 });
}

#[test]
fn build_fails_on_leaf_mismatch() {
    let skel = Tree::from_tokens([("a", None), ("b", None)], "TOP");
    // Covers one token of two.
    let err = build(&skel, &[Span::new(0, 1, "S|<>")], "+").unwrap_err();
    assert_eq!(err, StructuralError::LeafMismatch { expected: 2, got: 1 });
    // Points past the skeleton.
    let err = build(&skel, &[Span::new(5, 6, "X")], "+").unwrap_err();
    assert_eq!(err, StructuralError::LeafMismatch { expected: 2, got: 6 });
}

#[test]
fn dummy_wrappers_restore_leaves() {
    let skel = Tree::from_tokens([("a", Some("A")), ("b", Some("B"))], "TOP");
    let spans = [Span::new(0, 2, "S"), Span::new(0, 1, "S|<>"), Span::new(1, 2, "S|<>")];
    let rebuilt = build(&skel, &spans, "+").unwrap();
    assert_eq!(rebuilt.to_string(), "(TOP (S (A a) (B b)))");
}
