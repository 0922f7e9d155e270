//! Grammar-wide data handed to terminals at initialization.

use crate::GrammarFlags;

/// Identifies the AST node kind tokens of a terminal should produce.
///
/// The toolkit core never interprets the kind; it is an opaque tag the
/// AST construction layer resolves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AstKind(pub &'static str);

impl std::fmt::Display for AstKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Grammar-wide configuration supplied to
/// [`Terminal::initialize`](crate::Terminal::initialize).
///
/// Built by the grammar once every terminal is registered, before any
/// scanning starts. Read-only afterwards.
#[derive(Clone, Debug)]
pub struct GrammarData {
    name: String,
    flags: GrammarFlags,
    default_literal_ast_kind: Option<AstKind>,
    whitespace: Vec<char>,
}

impl GrammarData {
    /// Default inter-token whitespace characters.
    pub const DEFAULT_WHITESPACE: [char; 4] = [' ', '\t', '\r', '\n'];

    pub fn new(
        name: impl Into<String>,
        flags: GrammarFlags,
        default_literal_ast_kind: Option<AstKind>,
        whitespace: Vec<char>,
    ) -> Self {
        GrammarData {
            name: name.into(),
            flags,
            default_literal_ast_kind,
            whitespace,
        }
    }

    /// Grammar name, used in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn flags(&self) -> GrammarFlags {
        self.flags
    }

    /// The AST node kind literal terminals infer when the grammar
    /// requests AST construction.
    pub fn default_literal_ast_kind(&self) -> Option<AstKind> {
        self.default_literal_ast_kind
    }

    /// Characters the scanner skips between tokens.
    pub fn whitespace(&self) -> &[char] {
        &self.whitespace
    }

    /// Whether fixed-text terminals match regardless of ASCII case.
    pub fn case_insensitive(&self) -> bool {
        self.flags.contains(GrammarFlags::CASE_INSENSITIVE)
    }
}
