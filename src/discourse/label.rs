//! Compact relation labels.
//!
//! A binary RST relation carries a nuclearity and a relation name on each
//! side, but the two sides are redundant: the nucleus side of a mononuclear
//! relation always holds the placeholder `span`, and a multinuclear relation
//! repeats the same name on both sides. The compact form keeps the one
//! informative name plus a two-letter nuclearity code, so classifier label
//! sets stay small.

use std::collections::HashSet;

use once_cell::sync::Lazy;

use crate::error::{Result, StructuralError};

/// The RST-DT coarse relation inventory. Encoding and decoding reject names
/// outside it, so typos in annotation files surface as errors instead of as
/// phantom label classes.
static RELATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "Attribution",
        "Background",
        "Cause",
        "Comparison",
        "Condition",
        "Contrast",
        "Elaboration",
        "Enablement",
        "Evaluation",
        "Explanation",
        "Joint",
        "Manner-Means",
        "Same-Unit",
        "Summary",
        "Temporal",
        "Textual-Organization",
        "Topic-Change",
        "Topic-Comment",
    ])
});

/// Placeholder relation name on the nucleus side of a mononuclear relation.
pub const SPAN: &str = "span";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nuclearity {
    Nucleus,
    Satellite,
}

impl Nuclearity {
    pub fn parse(text: &str) -> Result<Self> {
        match text {
            "Nucleus" => Ok(Nuclearity::Nucleus),
            "Satellite" => Ok(Nuclearity::Satellite),
            _ => Err(StructuralError::InvalidLabel { label: text.to_string() }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Nuclearity::Nucleus => "Nucleus",
            Nuclearity::Satellite => "Satellite",
        }
    }
}

impl std::fmt::Display for Nuclearity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Collapse the two annotated sides into a compact label.
///
/// `Nucleus/Satellite` keeps the satellite's relation as `<rel>_NS`,
/// `Satellite/Nucleus` mirrors it as `<rel>_SN`, and `Nucleus/Nucleus`
/// requires both sides to agree and yields `<rel>_NN`. The nucleus side of
/// a mononuclear relation must carry the `span` placeholder, and
/// `Satellite/Satellite` has no valid label.
pub fn encode_label(
    left: Nuclearity,
    right: Nuclearity,
    relation_left: &str,
    relation_right: &str,
) -> Result<String> {
    use Nuclearity::*;
    let (kept, code) = match (left, right) {
        (Nucleus, Satellite) => {
            if relation_left != SPAN {
                return Err(StructuralError::InvalidLabel {
                    label: format!("{relation_left}_{relation_right}"),
                });
            }
            (relation_right, "NS")
        }
        (Satellite, Nucleus) => {
            if relation_right != SPAN {
                return Err(StructuralError::InvalidLabel {
                    label: format!("{relation_left}_{relation_right}"),
                });
            }
            (relation_left, "SN")
        }
        (Nucleus, Nucleus) => {
            if relation_left != relation_right {
                return Err(StructuralError::InvalidLabel {
                    label: format!("{relation_left}_{relation_right}"),
                });
            }
            (relation_left, "NN")
        }
        (Satellite, Satellite) => {
            return Err(StructuralError::InvalidLabel {
                label: format!("{relation_left}_{relation_right}"),
            });
        }
    };
    if !RELATIONS.contains(kept) {
        return Err(StructuralError::InvalidLabel { label: kept.to_string() });
    }
    Ok(format!("{kept}_{code}"))
}

/// Expand a compact label back into `(left, right, relation_left,
/// relation_right)`. Exact inverse of [`encode_label`].
pub fn decode_label(label: &str) -> Result<(Nuclearity, Nuclearity, String, String)> {
    use Nuclearity::*;
    let Some((relation, code)) = label.rsplit_once('_') else {
        return Err(StructuralError::InvalidLabel { label: label.to_string() });
    };
    if !RELATIONS.contains(relation) {
        return Err(StructuralError::InvalidLabel { label: label.to_string() });
    }
    let relation = relation.to_string();
    match code {
        "NS" => Ok((Nucleus, Satellite, SPAN.to_string(), relation)),
        "SN" => Ok((Satellite, Nucleus, relation, SPAN.to_string())),
        "NN" => Ok((Nucleus, Nucleus, relation.clone(), relation)),
        _ => Err(StructuralError::InvalidLabel { label: label.to_string() }),
    }
}
