//! Terminal and grammar behavior flags.
//!
//! Flags are set during grammar construction and read-only afterwards,
//! enabling O(1) queries without consulting the terminal subtype.

use bitflags::bitflags;

bitflags! {
    /// Behavior flags attached to a terminal's identity record.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct TermFlags: u32 {
        /// Denotes a fixed literal value (`if`, `+`, `{`).
        const LITERAL = 1 << 0;
        /// Punctuation-like, carries no semantic content of its own.
        /// Implied by [`TokenCategory::Outline`](crate::TokenCategory).
        const PUNCTUATION = 1 << 1;
        /// Excluded from the significant token stream.
        const NON_SIGNIFICANT = 1 << 2;
        /// Scanned for tooling only, never fed to the parser tables.
        const NON_GRAMMAR = 1 << 3;
    }
}

bitflags! {
    /// Grammar-wide behavior flags, consulted by terminals at
    /// initialization time.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct GrammarFlags: u32 {
        /// The grammar requests AST construction; literal terminals with
        /// no explicit AST kind infer the grammar default at
        /// initialization.
        const CREATE_AST = 1 << 0;
        /// Fixed-text terminals match regardless of ASCII case.
        const CASE_INSENSITIVE = 1 << 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_compose() {
        let flags = TermFlags::LITERAL | TermFlags::PUNCTUATION;
        assert!(flags.contains(TermFlags::LITERAL));
        assert!(!flags.contains(TermFlags::NON_SIGNIFICANT));
    }

    #[test]
    fn grammar_flags_default_empty() {
        assert_eq!(GrammarFlags::default(), GrammarFlags::empty());
    }
}
