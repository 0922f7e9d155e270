//! Per-character candidate index.
//!
//! Built once per grammar from every terminal's
//! [`firsts`](tessera_core::Terminal::firsts) hint. Each bucket holds
//! the terminals declaring that character merged with every fallback
//! terminal (those declaring no firsts), ordered by descending priority
//! with declaration order breaking ties. Characters no terminal
//! declares dispatch to the fallback-only list.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;

use tessera_core::{by_priority_desc, Terminal, TerminalId};

type CandidateList = SmallVec<[TerminalId; 4]>;

pub(crate) struct DispatchIndex {
    buckets: FxHashMap<char, CandidateList>,
    fallback: CandidateList,
}

impl DispatchIndex {
    /// Build the index over an id-assigned terminal table.
    ///
    /// Under case-insensitive grammars, alphabetic firsts are bucketed
    /// under both case variants.
    pub(crate) fn build(terminals: &[Box<dyn Terminal>], case_insensitive: bool) -> Self {
        let mut buckets: FxHashMap<char, CandidateList> = FxHashMap::default();
        let mut fallback = CandidateList::new();

        for terminal in terminals {
            let id = terminal.info().id();
            match terminal.firsts() {
                None => fallback.push(id),
                Some(chars) => {
                    for ch in chars {
                        if case_insensitive && ch.is_ascii_alphabetic() {
                            push_unique(buckets.entry(ch.to_ascii_lowercase()).or_default(), id);
                            push_unique(buckets.entry(ch.to_ascii_uppercase()).or_default(), id);
                        } else {
                            push_unique(buckets.entry(ch).or_default(), id);
                        }
                    }
                }
            }
        }

        // Fallback terminals are candidates at every position, so they
        // join every bucket before ordering.
        for list in buckets.values_mut() {
            for &id in &fallback {
                push_unique(list, id);
            }
            sort_candidates(list, terminals);
        }
        sort_candidates(&mut fallback, terminals);

        debug!(
            buckets = buckets.len(),
            fallback = fallback.len(),
            "dispatch index built"
        );
        DispatchIndex { buckets, fallback }
    }

    /// Candidate terminals for an input position starting with `ch`, in
    /// try-order.
    pub(crate) fn candidates(&self, ch: char) -> &[TerminalId] {
        self.buckets.get(&ch).map_or(&self.fallback, |list| list)
    }
}

fn push_unique(list: &mut CandidateList, id: TerminalId) {
    if !list.contains(&id) {
        list.push(id);
    }
}

/// Descending priority, then declaration order. The id tie-break is what
/// makes equal-priority try-order deterministic.
fn sort_candidates(list: &mut CandidateList, terminals: &[Box<dyn Terminal>]) {
    list.sort_by(|&a, &b| {
        by_priority_desc(terminals[a.index()].info(), terminals[b.index()].info())
            .then_with(|| a.cmp(&b))
    });
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::terminals::{FixedTerminal, IdentTerminal};
    use tessera_core::{TermInfo, Terminal};

    /// Fallback terminal declaring no firsts.
    struct CatchAll {
        info: TermInfo,
    }

    impl CatchAll {
        fn new(priority: i32) -> Self {
            let mut info = TermInfo::new("catch-all");
            info.set_priority(priority);
            CatchAll { info }
        }
    }

    impl Terminal for CatchAll {
        fn info(&self) -> &TermInfo {
            &self.info
        }

        fn info_mut(&mut self) -> &mut TermInfo {
            &mut self.info
        }
    }

    fn with_ids(mut terminals: Vec<Box<dyn Terminal>>) -> Vec<Box<dyn Terminal>> {
        for (index, terminal) in terminals.iter_mut().enumerate() {
            terminal
                .info_mut()
                .assign_id(TerminalId::new(u32::try_from(index).unwrap_or(0)));
        }
        terminals
    }

    #[test]
    fn higher_priority_is_tried_first() {
        let terminals = with_ids(vec![
            Box::new(IdentTerminal::new("identifier")),
            Box::new(FixedTerminal::keyword("if").with_priority(10)),
        ]);
        let index = DispatchIndex::build(&terminals, false);
        // Both declare 'i'; the keyword must come first despite its
        // later declaration.
        assert_eq!(
            index.candidates('i'),
            &[TerminalId::new(1), TerminalId::new(0)]
        );
    }

    #[test]
    fn equal_priority_ties_follow_declaration_order() {
        let terminals = with_ids(vec![
            Box::new(FixedTerminal::new("==")),
            Box::new(FixedTerminal::new("=")),
        ]);
        let index = DispatchIndex::build(&terminals, false);
        assert_eq!(
            index.candidates('='),
            &[TerminalId::new(0), TerminalId::new(1)]
        );
    }

    #[test]
    fn fallback_terminals_join_every_bucket() {
        let terminals = with_ids(vec![
            Box::new(FixedTerminal::new("+")),
            Box::new(CatchAll::new(-5)),
        ]);
        let index = DispatchIndex::build(&terminals, false);
        assert_eq!(
            index.candidates('+'),
            &[TerminalId::new(0), TerminalId::new(1)]
        );
        // A character nobody declares still dispatches to the fallback.
        assert_eq!(index.candidates('?'), &[TerminalId::new(1)]);
    }

    #[test]
    fn high_priority_fallback_precedes_bucket_terminals() {
        let terminals = with_ids(vec![
            Box::new(FixedTerminal::new("+")),
            Box::new(CatchAll::new(100)),
        ]);
        let index = DispatchIndex::build(&terminals, false);
        assert_eq!(
            index.candidates('+'),
            &[TerminalId::new(1), TerminalId::new(0)]
        );
    }

    #[test]
    fn empty_firsts_terminal_is_never_dispatched() {
        let terminals = with_ids(vec![
            Box::new(FixedTerminal::keyword("while").reserved()),
            Box::new(IdentTerminal::new("identifier")),
        ]);
        let index = DispatchIndex::build(&terminals, false);
        assert_eq!(index.candidates('w'), &[TerminalId::new(1)]);
    }

    #[test]
    fn case_insensitive_buckets_both_variants() {
        let terminals = with_ids(vec![Box::new(FixedTerminal::keyword("begin"))]);
        let index = DispatchIndex::build(&terminals, true);
        assert_eq!(index.candidates('b'), &[TerminalId::new(0)]);
        assert_eq!(index.candidates('B'), &[TerminalId::new(0)]);
    }
}
