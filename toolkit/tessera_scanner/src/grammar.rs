//! Grammar assembly.
//!
//! A [`GrammarBuilder`] collects terminals, pair declarations, keyword
//! sets, and validators, then [`build`](GrammarBuilder::build)s an
//! immutable [`Grammar`]: ids assigned in declaration order, pairs
//! resolved, every terminal initialized exactly once, and the dispatch
//! index precomputed. All configuration errors surface here, before any
//! scanning.

use rustc_hash::FxHashMap;
use tracing::debug;

use tessera_core::{
    AstKind, GrammarData, GrammarFlags, SourceBuffer, Terminal, TerminalId, Token,
    TokenValidator, HIGHEST_PRIORITY, LOWEST_PRIORITY,
};

use crate::dispatch::DispatchIndex;
use crate::keyword::KeywordValidator;
use crate::terminals::{EofTerminal, FixedTerminal, SyntaxErrorTerminal};
use crate::{GrammarError, Scanner};

/// Builder for a [`Grammar`].
pub struct GrammarBuilder {
    name: String,
    flags: GrammarFlags,
    default_literal_ast_kind: Option<AstKind>,
    whitespace: Vec<char>,
    terminals: Vec<Box<dyn Terminal>>,
    pairs: Vec<(String, String)>,
    keyword_sets: Vec<(String, Vec<String>)>,
    validators: Vec<(String, Box<dyn TokenValidator>)>,
}

impl GrammarBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        GrammarBuilder {
            name: name.into(),
            flags: GrammarFlags::empty(),
            default_literal_ast_kind: None,
            whitespace: GrammarData::DEFAULT_WHITESPACE.to_vec(),
            terminals: Vec::new(),
            pairs: Vec::new(),
            keyword_sets: Vec::new(),
            validators: Vec::new(),
        }
    }

    #[must_use]
    pub fn flags(mut self, flags: GrammarFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// AST node kind literal terminals infer under
    /// [`GrammarFlags::CREATE_AST`].
    #[must_use]
    pub fn default_literal_ast_kind(mut self, kind: AstKind) -> Self {
        self.default_literal_ast_kind = Some(kind);
        self
    }

    /// Replace the inter-token whitespace set.
    #[must_use]
    pub fn whitespace(mut self, chars: &[char]) -> Self {
        self.whitespace = chars.to_vec();
        self
    }

    /// Register a terminal. Declaration order is the equal-priority
    /// tie-break at dispatch time.
    #[must_use]
    pub fn terminal(mut self, terminal: impl Terminal + 'static) -> Self {
        self.terminals.push(Box::new(terminal));
        self
    }

    /// Declare two registered terminals as a structural pair
    /// (open/close delimiter). Resolved by name at build time.
    #[must_use]
    pub fn pair(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        self.pairs.push((open.into(), close.into()));
        self
    }

    /// Declare reserved words, reclassified out of `ident_terminal`
    /// matches by a [`KeywordValidator`].
    ///
    /// Each word is registered as a non-dispatched keyword terminal, so
    /// tokens reference a real terminal id; recognition happens entirely
    /// through the identifier's validation hook.
    #[must_use]
    pub fn keywords(mut self, ident_terminal: impl Into<String>, words: &[&str]) -> Self {
        self.keyword_sets.push((
            ident_terminal.into(),
            words.iter().map(|w| (*w).to_string()).collect(),
        ));
        self
    }

    /// Attach a validator to a registered terminal. Validators run in
    /// attachment order after every successful match of that terminal.
    #[must_use]
    pub fn validator(
        mut self,
        terminal: impl Into<String>,
        validator: impl TokenValidator + 'static,
    ) -> Self {
        self.validators.push((terminal.into(), Box::new(validator)));
        self
    }

    /// Validate the configuration and freeze the grammar.
    pub fn build(self) -> Result<Grammar, GrammarError> {
        let GrammarBuilder {
            name,
            flags,
            default_literal_ast_kind,
            whitespace,
            mut terminals,
            pairs,
            keyword_sets,
            validators,
        } = self;

        if terminals.is_empty() {
            return Err(GrammarError::EmptyGrammar { grammar: name });
        }

        // Reserved-word terminals come after user terminals, then the
        // synthetic eof/error terminals close the table.
        let mut keyword_words: Vec<(String, Vec<String>)> = Vec::new();
        for (ident_name, words) in keyword_sets {
            for word in &words {
                terminals.push(Box::new(FixedTerminal::keyword(word.clone()).reserved()));
            }
            keyword_words.push((ident_name, words));
        }
        let eof_index = terminals.len();
        terminals.push(Box::new(EofTerminal::new()));
        let error_index = terminals.len();
        terminals.push(Box::new(SyntaxErrorTerminal::new()));

        // Configuration checks: unique names, priorities in range.
        let mut by_name: FxHashMap<String, TerminalId> = FxHashMap::default();
        for (index, terminal) in terminals.iter().enumerate() {
            let info = terminal.info();
            let id = TerminalId::new(index_u32(index));
            if by_name.insert(info.name().to_string(), id).is_some() {
                return Err(GrammarError::DuplicateTerminal {
                    name: info.name().to_string(),
                });
            }
            if !(LOWEST_PRIORITY..=HIGHEST_PRIORITY).contains(&info.priority()) {
                return Err(GrammarError::PriorityOutOfRange {
                    name: info.name().to_string(),
                    priority: info.priority(),
                });
            }
        }

        // Assign ids in declaration order.
        for (index, terminal) in terminals.iter_mut().enumerate() {
            terminal.info_mut().assign_id(TerminalId::new(index_u32(index)));
        }

        // Resolve structural pairs, both directions.
        for (open, close) in pairs {
            let open_id = *by_name
                .get(&open)
                .ok_or(GrammarError::UnknownPairTerminal { name: open.clone() })?;
            let close_id = *by_name
                .get(&close)
                .ok_or(GrammarError::UnknownPairTerminal {
                    name: close.clone(),
                })?;
            terminals[open_id.index()].info_mut().set_paired_with(close_id);
            terminals[close_id.index()].info_mut().set_paired_with(open_id);
        }

        // Attach user validators.
        for (target, validator) in validators {
            let id = *by_name
                .get(&target)
                .ok_or(GrammarError::UnknownValidatorTarget {
                    name: target.clone(),
                })?;
            terminals[id.index()].info_mut().push_validator(validator);
        }

        // Attach keyword validators now that reserved words have ids.
        let case_insensitive = flags.contains(GrammarFlags::CASE_INSENSITIVE);
        for (ident_name, words) in keyword_words {
            let ident_id = *by_name
                .get(&ident_name)
                .ok_or(GrammarError::UnknownValidatorTarget {
                    name: ident_name.clone(),
                })?;
            let entries = words
                .into_iter()
                .filter_map(|word| by_name.get(&word).map(|id| (word, *id)))
                .collect();
            terminals[ident_id.index()]
                .info_mut()
                .push_validator(Box::new(KeywordValidator::new(entries, case_insensitive)));
        }

        // Freeze: initialize every terminal exactly once, then index.
        let data = GrammarData::new(name, flags, default_literal_ast_kind, whitespace);
        for terminal in &mut terminals {
            terminal.initialize(&data);
        }
        let dispatch = DispatchIndex::build(&terminals, case_insensitive);

        debug!(
            grammar = data.name(),
            terminals = terminals.len(),
            "grammar built"
        );
        Ok(Grammar {
            data,
            terminals,
            by_name,
            dispatch,
            eof: TerminalId::new(index_u32(eof_index)),
            error: TerminalId::new(index_u32(error_index)),
        })
    }
}

#[allow(
    clippy::cast_possible_truncation,
    reason = "terminal tables are far smaller than u32::MAX entries"
)]
fn index_u32(index: usize) -> u32 {
    index as u32
}

/// An immutable grammar: the terminal table, the dispatch index, and the
/// grammar-wide data.
///
/// Safe to share across scanner threads; every field is read-only after
/// [`GrammarBuilder::build`].
pub struct Grammar {
    data: GrammarData,
    terminals: Vec<Box<dyn Terminal>>,
    by_name: FxHashMap<String, TerminalId>,
    dispatch: DispatchIndex,
    eof: TerminalId,
    error: TerminalId,
}

impl Grammar {
    pub fn builder(name: impl Into<String>) -> GrammarBuilder {
        GrammarBuilder::new(name)
    }

    pub fn data(&self) -> &GrammarData {
        &self.data
    }

    /// Terminal lookup by id.
    ///
    /// # Panics
    ///
    /// Panics on an id from a different grammar (out of range).
    pub fn terminal(&self, id: TerminalId) -> &dyn Terminal {
        self.terminals[id.index()].as_ref()
    }

    /// Terminal lookup by name.
    pub fn terminal_id(&self, name: &str) -> Option<TerminalId> {
        self.by_name.get(name).copied()
    }

    /// All terminals, in declaration order.
    pub fn terminals(&self) -> impl Iterator<Item = &dyn Terminal> {
        self.terminals.iter().map(AsRef::as_ref)
    }

    /// Id of the synthetic end-of-input terminal.
    pub fn eof(&self) -> TerminalId {
        self.eof
    }

    /// Id of the synthetic unrecognized-input terminal.
    pub fn error_terminal(&self) -> TerminalId {
        self.error
    }

    pub(crate) fn dispatch(&self) -> &DispatchIndex {
        &self.dispatch
    }

    /// Diagnostic rendering of a token, delegated to its terminal.
    pub fn token_to_string(&self, token: &Token) -> String {
        self.terminal(token.terminal).token_to_string(token)
    }

    /// A scanner over `source` using this grammar.
    pub fn scanner<'g, 's>(&'g self, source: &'s SourceBuffer) -> Scanner<'g, 's> {
        Scanner::new(self, source)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::terminals::{FixedTerminal, IdentTerminal};
    use tessera_core::TermFlags;

    fn minimal() -> GrammarBuilder {
        Grammar::builder("test").terminal(IdentTerminal::new("identifier"))
    }

    #[test]
    fn empty_grammar_is_rejected() {
        let result = Grammar::builder("empty").build();
        assert_eq!(
            result.err(),
            Some(GrammarError::EmptyGrammar {
                grammar: "empty".to_string()
            })
        );
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let result = minimal()
            .terminal(IdentTerminal::new("identifier"))
            .build();
        assert_eq!(
            result.err(),
            Some(GrammarError::DuplicateTerminal {
                name: "identifier".to_string()
            })
        );
    }

    #[test]
    fn out_of_range_priority_is_rejected() {
        let result = minimal()
            .terminal(FixedTerminal::new("+").with_priority(1001))
            .build();
        assert_eq!(
            result.err(),
            Some(GrammarError::PriorityOutOfRange {
                name: "+".to_string(),
                priority: 1001
            })
        );
    }

    #[test]
    fn unknown_pair_name_is_rejected() {
        let result = minimal()
            .terminal(FixedTerminal::punctuation("("))
            .pair("(", ")")
            .build();
        assert_eq!(
            result.err(),
            Some(GrammarError::UnknownPairTerminal {
                name: ")".to_string()
            })
        );
    }

    #[test]
    fn ids_follow_declaration_order() {
        let grammar = minimal()
            .terminal(FixedTerminal::new("+"))
            .build()
            .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(grammar.terminal_id("identifier"), Some(TerminalId::new(0)));
        assert_eq!(grammar.terminal_id("+"), Some(TerminalId::new(1)));
    }

    #[test]
    fn pairs_are_linked_both_ways() {
        let grammar = minimal()
            .terminal(FixedTerminal::punctuation("("))
            .terminal(FixedTerminal::punctuation(")"))
            .pair("(", ")")
            .build()
            .unwrap_or_else(|e| panic!("{e}"));
        let open = grammar.terminal_id("(").unwrap_or(TerminalId::UNASSIGNED);
        let close = grammar.terminal_id(")").unwrap_or(TerminalId::UNASSIGNED);
        assert_eq!(grammar.terminal(open).info().paired_with(), Some(close));
        assert_eq!(grammar.terminal(close).info().paired_with(), Some(open));
    }

    #[test]
    fn literal_ast_kind_is_inferred_at_build() {
        let grammar = minimal()
            .terminal(FixedTerminal::new("+"))
            .flags(GrammarFlags::CREATE_AST)
            .default_literal_ast_kind(AstKind("literal"))
            .build()
            .unwrap_or_else(|e| panic!("{e}"));
        let plus = grammar.terminal_id("+").unwrap_or(TerminalId::UNASSIGNED);
        assert_eq!(
            grammar.terminal(plus).info().ast_kind(),
            Some(AstKind("literal"))
        );
        // The identifier terminal is not a literal; no inference.
        let ident = grammar
            .terminal_id("identifier")
            .unwrap_or(TerminalId::UNASSIGNED);
        assert!(grammar.terminal(ident).info().flags().is_empty());
        assert_eq!(grammar.terminal(ident).info().ast_kind(), None);
    }

    #[test]
    fn keyword_words_become_reserved_terminals() {
        let grammar = minimal()
            .keywords("identifier", &["if", "else"])
            .build()
            .unwrap_or_else(|e| panic!("{e}"));
        let if_id = grammar.terminal_id("if");
        assert!(if_id.is_some());
        let if_id = if_id.unwrap_or(TerminalId::UNASSIGNED);
        assert!(grammar
            .terminal(if_id)
            .info()
            .flags()
            .contains(TermFlags::LITERAL));
        // Reserved words stay out of dispatch; 'i' dispatches to the
        // identifier only.
        assert_eq!(grammar.dispatch().candidates('i'), &[TerminalId::new(0)]);
    }

    #[test]
    fn synthetic_terminals_are_registered() {
        let grammar = minimal().build().unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(
            grammar.terminal(grammar.eof()).info().name(),
            crate::terminals::EOF_NAME
        );
        assert_eq!(
            grammar.terminal(grammar.error_terminal()).info().name(),
            crate::terminals::SYNTAX_ERROR_NAME
        );
    }

    #[test]
    fn grammar_is_shareable_across_threads() {
        fn require_send_sync<T: Send + Sync>() {}
        require_send_sync::<Grammar>();
    }
}
