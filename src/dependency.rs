//! Dependency-graph validators.
//!
//! A sentence of `n` tokens is annotated as a head array `heads[0..n]` where
//! `heads[i]` is the 1-based index of token `i+1`'s governor, `0` marks a
//! root, and `-1` marks an unannotated token (partial annotation). These
//! functions are classifiers, not codecs: they return `bool` / index arrays
//! and degrade to `false` on malformed input instead of erroring, so callers
//! can use them as filters over noisy treebanks.

/// Check if the arcs form a valid dependency tree.
///
/// Fails closed: zero roots, more than one root under `multiroot = false`,
/// self-headed tokens, out-of-range heads, and cycles all yield `false`.
///
/// ```
/// use chartree::is_tree;
/// assert!(is_tree(&[3, 0, 0, 3], true));
/// assert!(!is_tree(&[3, 0, 0, 3], false));
/// ```
pub fn is_tree(heads: &[i32], multiroot: bool) -> bool {
    let n = heads.len();
    if n == 0 {
        return false;
    }
    let n_roots = heads.iter().filter(|&&h| h == 0).count();
    if n_roots == 0 {
        return false;
    }
    if !multiroot && n_roots > 1 {
        return false;
    }
    for (i, &h) in heads.iter().enumerate() {
        if h == i as i32 + 1 || h < 0 || h > n as i32 {
            return false;
        }
    }
    find_cycle(heads).is_none()
}

/// Find a cycle in the functional graph induced by `heads`, if any.
///
/// Every nontrivial SCC of a graph with out-degree <= 1 is a simple cycle,
/// so a path walk with three-state coloring finds it in O(n).
fn find_cycle(heads: &[i32]) -> Option<Vec<usize>> {
    const WHITE: u8 = 0;
    const GRAY: u8 = 1;
    const BLACK: u8 = 2;

    let n = heads.len();
    let mut state = vec![WHITE; n + 1];
    let mut depth = vec![0usize; n + 1];
    for start in 1..=n {
        if state[start] != WHITE {
            continue;
        }
        let mut path = Vec::new();
        let mut v = start;
        loop {
            if state[v] == GRAY {
                return Some(path[depth[v]..].to_vec());
            }
            if state[v] == BLACK {
                break;
            }
            state[v] = GRAY;
            depth[v] = path.len();
            path.push(v);
            let h = heads[v - 1];
            if h <= 0 {
                break;
            }
            v = h as usize;
        }
        for u in path {
            state[u] = BLACK;
        }
    }
    None
}

/// Check if the dependency tree is projective.
///
/// Supports partial annotation: entries with head `-1` are skipped. Besides
/// the obvious crossing-arc test, two extra conditions catch non-projective
/// attachments through a nested endpoint, which matter when the arc that
/// would visibly cross is itself unannotated:
///
/// ```
/// use chartree::is_projective;
/// assert!(!is_projective(&[2, -1, 1]));
/// assert!(!is_projective(&[3, -1, 2]));
/// assert!(is_projective(&[2, 3, 0]));
/// ```
pub fn is_projective(heads: &[i32]) -> bool {
    let pairs: Vec<(i32, i32)> = heads
        .iter()
        .enumerate()
        .filter(|&(_, &h)| h >= 0)
        .map(|(d, &h)| (h, d as i32 + 1))
        .collect();
    for (i, &(hi, di)) in pairs.iter().enumerate() {
        let (li, ri) = (hi.min(di), hi.max(di));
        for &(hj, dj) in &pairs[i + 1..] {
            let (lj, rj) = (hj.min(dj), hj.max(dj));
            if li <= hj && hj <= ri && hi == dj {
                return false;
            }
            if lj <= hi && hi <= rj && hj == di {
                return false;
            }
            if (li < lj && lj < ri || li < rj && rj < ri) && (li - lj) * (ri - rj) > 0 {
                return false;
            }
        }
    }
    true
}

/// Nearest same-direction sibling for every token, or `-1`.
///
/// Two tokens are sibling candidates when they share a head and attach on
/// the same side of it. Scanning pairs in index order, the first candidate
/// pair is fixed immediately: the token that sits closer to the shared head
/// is recorded as the partner of the farther one. Used as an auxiliary
/// training signal alongside the head array.
pub fn nearest_siblings(heads: &[i32]) -> Vec<i32> {
    let padded: Vec<i32> = std::iter::once(0).chain(heads.iter().copied()).collect();
    let mut sibs = vec![-1i32; padded.len()];

    for i in 1..padded.len() {
        let hi = padded[i];
        for j in (i + 1)..padded.len() {
            let hj = padded[j];
            let (di, dj) = (hi - i as i32, hj - j as i32);
            if hi >= 0 && hj >= 0 && hi == hj && di * dj > 0 {
                if di.abs() > dj.abs() {
                    sibs[i] = j as i32;
                } else {
                    sibs[j] = i as i32;
                }
                break;
            }
        }
    }
    sibs[1..].to_vec()
}
