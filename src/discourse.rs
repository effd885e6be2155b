//! Discourse-structure (RST) codec.
//!
//! A document is segmented into elementary discourse units (EDUs); the gold
//! annotation is a list of bracketed binary relations over EDU index ranges,
//! e.g. `(1:Nucleus=span:3,4:Satellite=Attribution:4)`. This module lifts
//! that EDU-level annotation into the token-level split sequences a top-down
//! parser trains on, and serializes such sequences back into the bracket
//! grammar:
//!
//! * label.rs — bijection between `(nuclearity, relation)` pairs and the
//!   compact `<Relation>_<NS|SN|NN>` labels.
//! * relation.rs — the bracket-relation grammar and the EDU-to-token span
//!   table.
//! * resolver.rs — boundary lookups plus the stack traversal that turns the
//!   unordered relation list into pre-order split sequences, and the inverse
//!   serializers.
//!
//! ## Debugging
//!
//! Set `CHARTREE_DEBUG=1` to print the resolver's traversal trace.

#[path = "discourse/label.rs"]
mod label;
#[path = "discourse/relation.rs"]
mod relation;
#[path = "discourse/resolver.rs"]
mod resolver;

pub use label::{Nuclearity, decode_label, encode_label};
pub use relation::{EduRelation, EduSpans};
pub use resolver::{
    DiscourseEncoding, LabeledStep, RelationIndex, build_gold, build_structure, resolve,
};
