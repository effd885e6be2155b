//! Owned, ordered, labeled trees.
//!
//! This is the in-memory form shared by the constituency codec and the tests:
//! internal nodes carry a label and an ordered child list, leaves carry the
//! token text. A *preterminal* is an internal node whose single child is a
//! leaf (a POS tag over a word). Trees are built once and never mutated; all
//! transformations produce new values.

use crate::error::{Result, StructuralError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tree {
    Internal { label: String, children: Vec<Tree> },
    Leaf { word: String },
}

impl Tree {
    pub fn internal(label: impl Into<String>, children: Vec<Tree>) -> Self {
        Tree::Internal { label: label.into(), children }
    }

    pub fn leaf(word: impl Into<String>) -> Self {
        Tree::Leaf { word: word.into() }
    }

    /// A POS tag over a single word.
    pub fn preterminal(tag: impl Into<String>, word: impl Into<String>) -> Self {
        Tree::internal(tag, vec![Tree::leaf(word)])
    }

    /// Convert a token list to a flat tree of preterminals under `root`,
    /// using `_` for missing tags.
    pub fn from_tokens<'a, I>(tokens: I, root: &str) -> Self
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        let children = tokens
            .into_iter()
            .map(|(word, tag)| Tree::preterminal(tag.unwrap_or("_"), word))
            .collect();
        Tree::internal(root, children)
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Tree::Internal { label, .. } => Some(label),
            Tree::Leaf { .. } => None,
        }
    }

    pub fn children(&self) -> &[Tree] {
        match self {
            Tree::Internal { children, .. } => children,
            Tree::Leaf { .. } => &[],
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Tree::Leaf { .. })
    }

    pub fn is_preterminal(&self) -> bool {
        match self {
            Tree::Internal { children, .. } => children.len() == 1 && children[0].is_leaf(),
            Tree::Leaf { .. } => false,
        }
    }

    /// Number of leaves under this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            Tree::Leaf { .. } => 1,
            Tree::Internal { children, .. } => children.iter().map(Tree::leaf_count).sum(),
        }
    }

    /// Preterminal subtrees in left-to-right order.
    pub fn preterminals(&self) -> Vec<&Tree> {
        let mut out = Vec::new();
        self.collect_preterminals(&mut out);
        out
    }

    fn collect_preterminals<'a>(&'a self, out: &mut Vec<&'a Tree>) {
        if self.is_preterminal() {
            out.push(self);
        } else if let Tree::Internal { children, .. } = self {
            for child in children {
                child.collect_preterminals(out);
            }
        }
    }

    /// `(word, tag)` pairs in sentence order.
    pub fn pos(&self) -> Vec<(&str, &str)> {
        self.preterminals()
            .into_iter()
            .filter_map(|pt| match pt {
                Tree::Internal { label, children } => match &children[0] {
                    Tree::Leaf { word } => Some((word.as_str(), label.as_str())),
                    Tree::Internal { .. } => None,
                },
                Tree::Leaf { .. } => None,
            })
            .collect()
    }

    /// Parse bracketed tree text, e.g. `(TOP (NP (_ She)) (_ .))`.
    pub fn from_string(text: &str) -> Result<Tree> {
        Parser { text, pos: 0 }.parse()
    }
}

impl std::str::FromStr for Tree {
    type Err = StructuralError;

    fn from_str(s: &str) -> Result<Tree> {
        Tree::from_string(s)
    }
}

impl std::fmt::Display for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tree::Leaf { word } => write!(f, "{word}"),
            Tree::Internal { label, children } => {
                write!(f, "({label}")?;
                for child in children {
                    write!(f, " {child}")?;
                }
                write!(f, ")")
            }
        }
    }
}

// --- Bracket-text scanner ---------------------------------------------------

struct Parser<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn parse(mut self) -> Result<Tree> {
        self.skip_ws();
        let tree = self.node()?;
        self.skip_ws();
        if self.pos != self.text.len() {
            return Err(self.fail("trailing input after tree"));
        }
        Ok(tree)
    }

    fn node(&mut self) -> Result<Tree> {
        if !self.eat('(') {
            return Err(self.fail("expected `(`"));
        }
        let label = self.token();
        let mut children = Vec::new();
        loop {
            self.skip_ws();
            match self.peek() {
                Some(')') => {
                    self.pos += 1;
                    break;
                }
                Some('(') => children.push(self.node()?),
                Some(_) => {
                    let word = self.token();
                    if word.is_empty() {
                        return Err(self.fail("expected word or subtree"));
                    }
                    children.push(Tree::leaf(word));
                }
                None => return Err(self.fail("unbalanced brackets")),
            }
        }
        if children.is_empty() {
            return Err(self.fail("node without children"));
        }
        Ok(Tree::internal(label, children))
    }

    fn token(&mut self) -> String {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_whitespace() || c == '(' || c == ')' {
                break;
            }
            self.pos += c.len_utf8();
        }
        self.text[start..self.pos].to_string()
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn fail(&self, reason: &'static str) -> StructuralError {
        StructuralError::MalformedTree { position: self.pos, reason }
    }
}
