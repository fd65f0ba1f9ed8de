//! Prefix-trie transducer shared by all rewrite rules.
//!
//! A path from the root spells one left-hand phrase, one token per edge.
//! Nodes that terminate a registered rule carry that rule's output sequence
//! as their `emission`; interior nodes carry none. Each child map is owned
//! exclusively by its parent node.

use std::collections::HashMap;

use crate::parser::grammar::GrammarError;

/// One node of the transducer trie.
#[derive(Debug, Default)]
pub struct TrieNode {
    /// Output token sequence, set only where a rule's phrase ends.
    pub emission: Option<Vec<String>>,
    /// Edges keyed by the next token's text.
    pub children: HashMap<String, TrieNode>,
}

impl TrieNode {
    /// Insert a rule below this node (normally the root), creating interior
    /// nodes as needed and setting the emission at the terminal node.
    ///
    /// # Errors
    /// [`GrammarError::DuplicateRule`] if the phrase already has an emission
    /// registered; a grammar in which the same phrase rewrites two ways is
    /// ambiguous and rejected outright.
    pub fn insert(&mut self, lhs: &[String], rhs: Vec<String>) -> Result<(), GrammarError> {
        let mut node = self;
        for token in lhs {
            node = node.children.entry(token.clone()).or_default();
        }
        if let Some(existing) = &node.emission {
            return Err(GrammarError::DuplicateRule {
                lhs: lhs.join(" "),
                existing: existing.join(" "),
                new: rhs.join(" "),
            });
        }
        node.emission = Some(rhs);
        Ok(())
    }

    /// Follow the edge labeled `text`, if present.
    pub fn child(&self, text: &str) -> Option<&TrieNode> {
        self.children.get(text)
    }

    /// True if an edge labeled `text` leaves this node.
    pub fn has_child(&self, text: &str) -> bool {
        self.children.contains_key(text)
    }

    /// Walk an exact phrase from this node; `Some` only if every token
    /// matched an edge in order.
    pub fn walk(&self, phrase: &[String]) -> Option<&TrieNode> {
        let mut node = self;
        for token in phrase {
            node = node.child(token)?;
        }
        Some(node)
    }
}
