//! CSS selector subset used to locate insertion points
//!
//! Supported: type selectors, `*`, `.class`, `#id`, `:first-child`,
//! `:last-child`, and the descendant (whitespace) and child (`>`) combinators.
//! Anything else is rejected as invalid.

use thiserror::Error;

use crate::dom::tree::{NodeId, NodeTree};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("Empty selector")]
    Empty,

    #[error("Unexpected '{found}' at offset {offset} in selector '{selector}'")]
    Unexpected {
        selector: String,
        found: char,
        offset: usize,
    },

    #[error("Unsupported pseudo-class ':{0}'")]
    UnsupportedPseudoClass(String),

    #[error("Selector '{0}' ends with a combinator")]
    DanglingCombinator(String),

    #[error("Unexpected end of selector '{0}'")]
    UnexpectedEnd(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
    Descendant,
    Child,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PseudoClass {
    FirstChild,
    LastChild,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    /// `None` matches any element
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    pseudo_classes: Vec<PseudoClass>,
}

impl Compound {
    fn is_empty(&self) -> bool {
        self.tag.is_none()
            && self.id.is_none()
            && self.classes.is_empty()
            && self.pseudo_classes.is_empty()
    }

    fn matches(&self, tree: &NodeTree, node: NodeId) -> bool {
        let Some(tag) = tree.tag_name(node) else {
            return false;
        };

        if self.tag.as_deref().is_some_and(|expected| expected != tag) {
            return false;
        }
        if let Some(id) = &self.id
            && tree.attribute(node, "id") != Some(id.as_str())
        {
            return false;
        }
        if !self.classes.iter().all(|class| tree.has_class(node, class)) {
            return false;
        }

        self.pseudo_classes.iter().all(|pseudo| {
            let Some(parent) = tree.parent(node) else {
                return false;
            };
            let sibling = match pseudo {
                PseudoClass::FirstChild => tree.element_children(parent).next(),
                PseudoClass::LastChild => tree.element_children(parent).last(),
            };
            sibling == Some(node)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    /// How this step relates to the previous one (`None` for the first step)
    combinator: Option<Combinator>,
    compound: Compound,
}

/// A parsed selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    steps: Vec<Step>,
}

impl Selector {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        SelectorParser::new(input).parse()
    }

    /// Whether `node` matches the selector, ancestors being looked up in the whole tree
    pub fn matches(&self, tree: &NodeTree, node: NodeId) -> bool {
        self.matches_step(tree, node, self.steps.len() - 1)
    }

    fn matches_step(&self, tree: &NodeTree, node: NodeId, index: usize) -> bool {
        let step = &self.steps[index];
        if !step.compound.matches(tree, node) {
            return false;
        }
        if index == 0 {
            return true;
        }

        match step.combinator {
            Some(Combinator::Child) => tree
                .parent(node)
                .is_some_and(|parent| self.matches_step(tree, parent, index - 1)),
            Some(Combinator::Descendant) | None => {
                let mut ancestor = tree.parent(node);
                while let Some(current) = ancestor {
                    if self.matches_step(tree, current, index - 1) {
                        return true;
                    }
                    ancestor = tree.parent(current);
                }
                false
            }
        }
    }
}

struct SelectorParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> SelectorParser<'a> {
    fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn unexpected(&self, found: char) -> SelectorError {
        SelectorError::Unexpected {
            selector: self.input.to_string(),
            found,
            offset: self.pos,
        }
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
        self.pos > start
    }

    fn parse(mut self) -> Result<Selector, SelectorError> {
        let mut steps: Vec<Step> = Vec::new();
        let mut pending: Option<Combinator> = None;

        loop {
            let saw_whitespace = self.skip_whitespace();
            match self.peek() {
                None => break,
                Some('>') => {
                    if steps.is_empty() || pending == Some(Combinator::Child) {
                        return Err(self.unexpected('>'));
                    }
                    self.bump();
                    pending = Some(Combinator::Child);
                }
                Some(_) => {
                    if !steps.is_empty() && pending.is_none() && saw_whitespace {
                        pending = Some(Combinator::Descendant);
                    }
                    let compound = self.parse_compound()?;
                    steps.push(Step {
                        combinator: pending.take(),
                        compound,
                    });
                }
            }
        }

        if pending.is_some() {
            return Err(SelectorError::DanglingCombinator(self.input.to_string()));
        }
        if steps.is_empty() {
            return Err(SelectorError::Empty);
        }

        Ok(Selector { steps })
    }

    fn parse_compound(&mut self) -> Result<Compound, SelectorError> {
        let mut compound = Compound::default();
        let mut universal = false;

        match self.peek() {
            Some('*') => {
                self.bump();
                universal = true;
            }
            Some(c) if c.is_ascii_alphabetic() => {
                compound.tag = Some(self.parse_ident()?.to_ascii_lowercase());
            }
            _ => {}
        }

        while let Some(c) = self.peek() {
            match c {
                '.' => {
                    self.bump();
                    compound.classes.push(self.parse_ident()?);
                }
                '#' => {
                    self.bump();
                    compound.id = Some(self.parse_ident()?);
                }
                ':' => {
                    self.bump();
                    let name = self.parse_ident()?;
                    let pseudo = match name.as_str() {
                        "first-child" => PseudoClass::FirstChild,
                        "last-child" => PseudoClass::LastChild,
                        _ => return Err(SelectorError::UnsupportedPseudoClass(name)),
                    };
                    compound.pseudo_classes.push(pseudo);
                }
                '>' => break,
                c if c.is_whitespace() => break,
                c => return Err(self.unexpected(c)),
            }
        }

        if compound.is_empty() && !universal {
            return match self.peek() {
                Some(c) => Err(self.unexpected(c)),
                None => Err(SelectorError::UnexpectedEnd(self.input.to_string())),
            };
        }

        Ok(compound)
    }

    fn parse_ident(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            self.bump();
        }

        if self.pos == start {
            return match self.peek() {
                Some(c) => Err(self.unexpected(c)),
                None => Err(SelectorError::UnexpectedEnd(self.input.to_string())),
            };
        }

        Ok(self.input[start..self.pos].to_string())
    }
}

/// First element under `root` (excluded) matching `selector`, in document order
pub fn query_selector(tree: &NodeTree, root: NodeId, selector: &Selector) -> Option<NodeId> {
    tree.descendants(root)
        .into_iter()
        .find(|node| selector.matches(tree, *node))
}
