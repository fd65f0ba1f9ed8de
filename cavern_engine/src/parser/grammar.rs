//! Declarative grammar compilation.
//!
//! The grammar is a line-oriented text format. Each non-blank, non-comment
//! line has the shape `LHS_LIST => RHS`, where the left side is a
//! comma-separated list of alternative surface phrases (with per-word `|`
//! alternation) and the right side is a single space-separated output phrase.
//! Compilation expands alternation into one [`Rule`] per concrete phrase.

use thiserror::Error;

use crate::parser::token::clean;

/// Failures raised while compiling grammar text. All of these are fatal at
/// startup; none can occur during a parse.
#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("grammar line {line} is missing the '=>' separator: \"{text}\"")]
    MissingArrow { line: usize, text: String },
    #[error("grammar line {line} declares multiple right-hand phrases (',' is not allowed on the RHS): \"{text}\"")]
    RhsAlternation { line: usize, text: String },
    #[error("duplicate rule for phrase \"{lhs}\": already rewrites to \"{existing}\", cannot also rewrite to \"{new}\"")]
    DuplicateRule {
        lhs: String,
        existing: String,
        new: String,
    },
}

/// One fully expanded rewrite rule: a concrete left-hand phrase and the
/// output token sequence it emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub lhs: Vec<String>,
    pub rhs: Vec<String>,
}

/// Compile grammar text into a flat list of expanded rules, in declaration
/// order. Duplicate-phrase detection happens later, at trie insertion, where
/// the conflicting emission is known.
///
/// # Errors
/// - [`GrammarError::MissingArrow`] for a rule line without `=>`
/// - [`GrammarError::RhsAlternation`] when the right side contains `,`
pub fn compile_rules(grammar: &str) -> Result<Vec<Rule>, GrammarError> {
    let mut rules = Vec::new();

    for (line_no, raw_line) in grammar.lines().enumerate() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((left, right)) = line.split_once("=>") else {
            return Err(GrammarError::MissingArrow {
                line: line_no + 1,
                text: line.to_string(),
            });
        };
        let left = left.trim();
        let right = right.trim();

        if right.contains(',') {
            return Err(GrammarError::RhsAlternation {
                line: line_no + 1,
                text: line.to_string(),
            });
        }
        let rhs: Vec<String> = right.split_whitespace().map(str::to_string).collect();

        for phrase in left.split(',') {
            let raw_tokens: Vec<&str> = phrase.split_whitespace().collect();
            if raw_tokens.is_empty() {
                continue;
            }
            for lhs in expand_alternation(&raw_tokens) {
                rules.push(Rule { lhs, rhs: rhs.clone() });
            }
        }
    }

    Ok(rules)
}

/// Build a single rule from a runtime-injected phrase and output. No
/// alternation expansion is performed; the phrase is normalized the same way
/// raw input is.
pub fn single_rule(phrase: &str, output: &str) -> Rule {
    let lhs: Vec<String> = clean(phrase).split_whitespace().map(str::to_string).collect();
    let rhs: Vec<String> = output.split_whitespace().map(str::to_string).collect();
    Rule { lhs, rhs }
}

/// Expand per-word `|` alternation into the full cross product of choices,
/// left to right. A phrase with no pipes expands to itself.
fn expand_alternation(tokens: &[&str]) -> Vec<Vec<String>> {
    let mut variants: Vec<Vec<String>> = vec![Vec::new()];
    for token in tokens {
        let mut expanded = Vec::new();
        for choice in token.split('|') {
            for variant in &variants {
                let mut next = variant.clone();
                next.push(choice.to_string());
                expanded.push(next);
            }
        }
        variants = expanded;
    }
    variants
}
