//! Command grammar compiler and rewrite engine.
//!
//! Free-text player input is normalized into tokens, then repeatedly
//! rewritten by a trie-based transducer compiled from a declarative rule
//! grammar, until the token stream reaches a fixed point. The final stream is
//! scanned for a `[command]` marker whose trailing tokens carry the argument
//! payloads. See `src/grammar.rules` for the default rule set.
//!
//! One [`Parser`] value owns the whole grammar state (rules, vocabulary and
//! trie). There is no global instance: tests and tools construct isolated
//! grammars with [`Parser::compile`], and the game builds one at startup and
//! passes it by reference. Runtime rule injection takes `&mut self`, so its
//! two-step mutation (vocabulary, then trie) can never interleave with a
//! parse.

pub mod grammar;
pub mod token;
pub mod trie;

use std::collections::{BTreeSet, HashSet};

use log::{debug, info};

use crate::parser::grammar::{GrammarError, Rule, compile_rules, single_rule};
use crate::parser::token::{Token, clean, tokenize};
use crate::parser::trie::TrieNode;

/// Default grammar shipped with the game.
pub const DEFAULT_RULES: &str = include_str!("grammar.rules");

/// Result of parsing one line of player input.
///
/// An unparseable line is an expected outcome, not an error; the REPL reports
/// it and prompts again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// A command marker was found: the command name (marker text without its
    /// brackets) and one ordered argument group per token after the marker.
    Command { name: String, args: Vec<Vec<String>> },
    /// Empty input, or rewriting never produced a command marker.
    Invalid,
}

impl ParseOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, ParseOutcome::Command { .. })
    }
}

/// A compiled command grammar: vocabulary table plus transducer trie.
#[derive(Debug)]
pub struct Parser {
    trie: TrieNode,
    vocab: HashSet<String>,
}

impl Parser {
    /// Compile a grammar from declarative rule text.
    ///
    /// # Errors
    /// Any [`GrammarError`]: malformed line, RHS alternation, or two rules
    /// registering the same expanded phrase.
    pub fn compile(rule_text: &str) -> Result<Self, GrammarError> {
        let rules = compile_rules(rule_text)?;
        let mut parser = Self {
            trie: TrieNode::default(),
            vocab: HashSet::new(),
        };
        let rule_count = rules.len();
        for rule in rules {
            parser.install(rule)?;
        }
        info!("grammar compiled: {rule_count} rules, {} vocabulary tokens", parser.vocab.len());
        Ok(parser)
    }

    /// Compile the default grammar shipped with the game.
    ///
    /// # Errors
    /// Only if the bundled grammar itself is broken, which is a build defect.
    pub fn with_default_rules() -> Result<Self, GrammarError> {
        Self::compile(DEFAULT_RULES)
    }

    /// True if `token_text` appears on either side of any rule.
    pub fn knows_word(&self, token_text: &str) -> bool {
        self.vocab.contains(token_text)
    }

    /// True if the (normalized) phrase is already registered as a rule.
    /// Callers planning to [`Parser::add_new_rule`] query this first to get
    /// "add if absent" behavior.
    pub fn has_rule(&self, phrase: &str) -> bool {
        let lhs: Vec<String> = clean(phrase).split_whitespace().map(str::to_string).collect();
        if lhs.is_empty() {
            return false;
        }
        self.trie.walk(&lhs).is_some_and(|node| node.emission.is_some())
    }

    /// Inject a single rule at runtime, binding a new surface phrase (e.g. a
    /// freshly authored item name) to an output such as a category token.
    /// The phrase is not alternation-expanded.
    ///
    /// # Errors
    /// [`GrammarError::DuplicateRule`] if the phrase already has a rule;
    /// guard with [`Parser::has_rule`].
    pub fn add_new_rule(&mut self, phrase: &str, output: &str) -> Result<(), GrammarError> {
        let rule = single_rule(phrase, output);
        info!("injecting rule: \"{}\" => \"{}\"", rule.lhs.join(" "), rule.rhs.join(" "));
        self.install(rule)
    }

    /// Every command marker (`[name]`, brackets stripped) emitted by any
    /// rule. Used at startup to validate the command dispatch table.
    pub fn command_markers(&self) -> BTreeSet<String> {
        let mut markers = BTreeSet::new();
        collect_markers(&self.trie, &mut markers);
        markers
    }

    /// Parse one line of player input into a command and argument groups.
    /// Pure with respect to grammar state; never panics, never fails.
    pub fn parse(&self, input: &str) -> ParseOutcome {
        let tokens = tokenize(input);
        if tokens.is_empty() {
            return ParseOutcome::Invalid;
        }
        let tokens = self.rewrite(tokens);
        extract_command(&tokens)
    }

    /// Register a rule into both the vocabulary table and the trie.
    fn install(&mut self, rule: Rule) -> Result<(), GrammarError> {
        self.trie.insert(&rule.lhs, rule.rhs.clone())?;
        for word in rule.lhs.into_iter().chain(rule.rhs) {
            self.vocab.insert(word);
        }
        Ok(())
    }

    /// Run rewrite passes to a fixed point.
    ///
    /// Stops when a pass makes no rewrite, or when the token-text sequence
    /// repeats one already seen (cycle guard: a self-rewriting rule or a
    /// cyclic pair of rules would otherwise loop forever). Grammars are
    /// expected to converge; a growing non-repeating sequence is a content
    /// bug, not something this engine detects.
    fn rewrite(&self, mut tokens: Vec<Token>) -> Vec<Token> {
        let mut seen = HashSet::new();
        seen.insert(text_signature(&tokens));

        let mut pass = 0usize;
        loop {
            let (next, rule_matched) = self.rewrite_pass(&tokens);
            tokens = next;
            pass += 1;
            debug!("rewrite pass {pass}: [{}]", text_signature(&tokens));
            if !rule_matched || !seen.insert(text_signature(&tokens)) {
                break;
            }
        }
        tokens
    }

    /// One left-to-right pass of longest-match substitution.
    fn rewrite_pass(&self, tokens: &[Token]) -> (Vec<Token>, bool) {
        let mut output = Vec::with_capacity(tokens.len());
        let mut rule_matched = false;
        let mut ix = 0;

        while ix < tokens.len() {
            let current = &tokens[ix];

            // Out-of-vocabulary tokens are inert: never matched, never
            // removed. Known words with no rule starting at them pass
            // through the same way.
            if !self.vocab.contains(&current.text) || !self.trie.has_child(&current.text) {
                output.push(current.clone());
                ix += 1;
                continue;
            }

            // Greedy trie walk from this position, remembering the deepest
            // emission seen. The walk follows the single path the tokens
            // spell; it keeps extending past an emission while deeper
            // children exist.
            let mut node = &self.trie;
            let mut depth = 0;
            let mut best_rhs: Option<&[String]> = None;
            let mut matched_len = 0;
            for tok in &tokens[ix..] {
                let Some(next) = node.child(&tok.text) else { break };
                node = next;
                depth += 1;
                if let Some(emit) = &node.emission {
                    best_rhs = Some(emit);
                    matched_len = depth;
                }
                if node.children.is_empty() {
                    break;
                }
            }

            let Some(rhs) = best_rhs else {
                // Partial vocabulary match with no complete rule.
                output.push(current.clone());
                ix += 1;
                continue;
            };

            rule_matched = true;
            let consumed = &tokens[ix..ix + matched_len];
            // Surface texts the rule consumes without reproducing; these
            // become the payload of output tokens introduced by the rule.
            let diff: Vec<String> = consumed
                .iter()
                .filter(|tok| !rhs.contains(&tok.text))
                .map(|tok| tok.text.clone())
                .collect();
            for out_text in rhs {
                // A token reproduced on both sides passes its payload
                // through (e.g. a direction grouped earlier keeps the
                // original word the player typed).
                let data = consumed
                    .iter()
                    .rev()
                    .find(|tok| &tok.text == out_text)
                    .map_or_else(|| diff.clone(), |tok| tok.data.clone());
                output.push(Token::with_data(out_text.clone(), data));
            }
            ix += matched_len;
        }

        (output, rule_matched)
    }
}

/// Scan a rewritten token stream for the first command marker and collect the
/// argument groups that follow it.
fn extract_command(tokens: &[Token]) -> ParseOutcome {
    for (ix, tok) in tokens.iter().enumerate() {
        if let Some(name) = marker_name(&tok.text) {
            let args = tokens[ix + 1..].iter().map(|t| t.data.clone()).collect();
            return ParseOutcome::Command {
                name: name.to_string(),
                args,
            };
        }
    }
    ParseOutcome::Invalid
}

/// The command name inside a `[marker]` token, if `text` is one.
fn marker_name(text: &str) -> Option<&str> {
    text.strip_prefix('[')?.strip_suffix(']')
}

/// Cheap comparable rendering of just the text fields, for the cycle guard.
fn text_signature(tokens: &[Token]) -> String {
    let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
    texts.join(",")
}

fn collect_markers(node: &TrieNode, markers: &mut BTreeSet<String>) {
    if let Some(rhs) = &node.emission {
        for out_text in rhs {
            if let Some(name) = marker_name(out_text) {
                markers.insert(name.to_string());
            }
        }
    }
    for child in node.children.values() {
        collect_markers(child, markers);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser(rules: &str) -> Parser {
        Parser::compile(rules).unwrap()
    }

    fn parsed(p: &Parser, input: &str) -> (String, Vec<Vec<String>>) {
        match p.parse(input) {
            ParseOutcome::Command { name, args } => (name, args),
            ParseOutcome::Invalid => panic!("expected '{input}' to parse"),
        }
    }

    #[test]
    fn empty_input_is_invalid() {
        let p = parser("help => [help]");
        assert_eq!(p.parse(""), ParseOutcome::Invalid);
        assert_eq!(p.parse("the an a"), ParseOutcome::Invalid);
    }

    #[test]
    fn no_marker_means_invalid() {
        let p = parser("north,south => <CompassDir>");
        assert_eq!(p.parse("north"), ParseOutcome::Invalid);
    }

    #[test]
    fn unknown_words_are_copied_not_dropped() {
        let p = parser("attack <Creature> => [fight] <Creature>\ndragon => <Creature>");
        let (name, args) = parsed(&p, "quickly attack dragon");
        assert_eq!(name, "fight");
        assert_eq!(args, vec![vec!["dragon".to_string()]]);
    }

    #[test]
    fn longest_match_wins_over_shorter_prefix() {
        let p = parser("up => [move] above\nclimb up => [move] above");
        let (name, args) = parsed(&p, "climb up");
        assert_eq!(name, "move");
        // One rewrite consumed both words; their texts land in the diff.
        assert_eq!(args, vec![vec!["climb".to_string(), "up".to_string()]]);
    }

    #[test]
    fn walk_keeps_updating_to_the_deepest_emission() {
        // "describe" emits at depth 1, "describe room" at depth 2; the walk
        // must not stop at the first emission it sees.
        let p = parser("describe => [describe]\ndescribe room => [describe_room]");
        let (name, _) = parsed(&p, "describe room");
        assert_eq!(name, "describe_room");
        let (name, _) = parsed(&p, "describe");
        assert_eq!(name, "describe");
    }

    #[test]
    fn greedy_path_partial_match_falls_back_to_single_token() {
        // "describe dragon": the walk from "describe" cannot extend, but the
        // depth-1 emission still applies, and "dragon" is left for the next
        // position.
        let p = parser("describe => [describe]\ndescribe room => [describe_room]");
        let (name, args) = parsed(&p, "describe dragon");
        assert_eq!(name, "describe");
        assert_eq!(args, vec![vec!["dragon".to_string()]]);
    }

    #[test]
    fn pass_through_token_keeps_payload_across_rewrites() {
        let p = parser(
            "north,south,east,west => <CompassDir>\n\
             move|go <CompassDir> => [move] <CompassDir>",
        );
        let (name, args) = parsed(&p, "go north");
        assert_eq!(name, "move");
        assert_eq!(args, vec![vec!["north".to_string()]]);
    }

    #[test]
    fn alternation_variants_parse_identically() {
        let p = parser(
            "north => <CompassDir>\n\
             move|go <CompassDir> => [move] <CompassDir>",
        );
        assert_eq!(parsed(&p, "move north"), parsed(&p, "go north"));
    }

    #[test]
    fn stop_words_are_transparent() {
        let p = parser("sword => <PickUpAble>\nget <PickUpAble> => [pickup] <PickUpAble>");
        assert_eq!(parsed(&p, "get the sword"), parsed(&p, "get sword"));
    }

    #[test]
    fn rules_compose_across_passes() {
        let p = parser(
            "dragon => <Creature>\n\
             attack,fight => <FightVerb>\n\
             kill => attack\n\
             <FightVerb> <Creature> => [fight] <Creature> <FightVerb>",
        );
        let (name, args) = parsed(&p, "kill dragon");
        assert_eq!(name, "fight");
        assert_eq!(args[0], vec!["dragon".to_string()]);
    }

    #[test]
    fn self_rewrite_terminates_via_cycle_guard() {
        // "hold => hold" rewrites a form back to itself every pass.
        let p = parser("hold,grab => hold");
        assert_eq!(p.parse("grab"), ParseOutcome::Invalid);
        assert_eq!(p.parse("hold"), ParseOutcome::Invalid);
    }

    #[test]
    fn cyclic_rule_pair_terminates_within_two_passes() {
        let p = parser("ping => pong\npong => ping");
        // Without the repeat guard this would alternate forever.
        assert_eq!(p.parse("ping"), ParseOutcome::Invalid);
    }

    #[test]
    fn duplicate_rule_fails_compilation() {
        let err = Parser::compile("attack => [fight]\nattack => [assault]").unwrap_err();
        assert!(matches!(err, GrammarError::DuplicateRule { .. }));
    }

    #[test]
    fn runtime_rule_injection_extends_the_grammar() {
        let mut p = parser(
            "sword => <PickUpAble>\n\
             pick up,take => get\n\
             get <PickUpAble> => [pickup] <PickUpAble>",
        );
        assert_eq!(p.parse("get lantern"), ParseOutcome::Invalid);

        assert!(!p.has_rule("lantern"));
        p.add_new_rule("lantern", "<PickUpAble>").unwrap();
        assert!(p.has_rule("lantern"));

        let (name, args) = parsed(&p, "get lantern");
        assert_eq!(name, "pickup");
        assert_eq!(args, vec![vec!["lantern".to_string()]]);
    }

    #[test]
    fn injecting_an_existing_phrase_is_a_duplicate_error() {
        let mut p = parser("sword => <PickUpAble>");
        let err = p.add_new_rule("sword", "<Consumable>").unwrap_err();
        assert!(matches!(err, GrammarError::DuplicateRule { .. }));
    }

    #[test]
    fn command_markers_reflect_every_rhs_marker() {
        let p = parser(
            "quit => [end_game]\n\
             sword => <PickUpAble>\n\
             get <PickUpAble> => [pickup] <PickUpAble>",
        );
        let markers = p.command_markers();
        assert!(markers.contains("end_game"));
        assert!(markers.contains("pickup"));
        assert_eq!(markers.len(), 2);
    }

    #[test]
    fn parse_is_deterministic() {
        let p = Parser::with_default_rules().unwrap();
        let first = p.parse("attack the dragon");
        for _ in 0..10 {
            assert_eq!(p.parse("attack the dragon"), first);
        }
    }

    #[test]
    fn default_grammar_compiles() {
        let p = Parser::with_default_rules().unwrap();
        assert!(p.knows_word("sword"));
        assert!(p.knows_word("<CompassDir>"));
        assert!(!p.knows_word("xyzzy"));
    }
}
