//! The terminal contract.
//!
//! A [`Terminal`] is the polymorphic unit representing one lexical
//! category (a literal, an identifier class, a comment form). It owns
//! its matching attempt ([`Terminal::try_match`]), its fast-dispatch
//! hint ([`Terminal::firsts`]), its disambiguation priority, and its
//! post-match validation hook.
//!
//! # Dispatch policy
//!
//! A scanner queries every terminal for its firsts set once, builds a
//! per-character candidate index, and orders each candidate list with
//! [`by_priority_desc`] so higher-priority terminals are always tried
//! first. Terminals of equal priority are tried in declaration order:
//! [`TerminalId`]s are assigned in registration order and break ties
//! deterministically.
//!
//! # Lifecycle
//!
//! Constructed during grammar definition, then
//! [`initialize`](Terminal::initialize)d exactly once by the grammar
//! before scanning starts. After initialization a terminal's identity
//! fields are immutable and safe to read from multiple scanner threads.

use std::cmp::Ordering;
use std::fmt;

use crate::{
    AstKind, GrammarData, GrammarFlags, ScanContext, SourceCursor, TermFlags, Token,
    TokenCategory, TokenRejection, TokenValidation, TokenValidator,
};

/// Lowest allowed terminal priority.
pub const LOWEST_PRIORITY: i32 = -1000;
/// Highest allowed terminal priority.
pub const HIGHEST_PRIORITY: i32 = 1000;

/// Identifies a terminal within its grammar.
///
/// Assigned in declaration order by the grammar builder; the id doubles
/// as the deterministic tie-break among equal-priority terminals and as
/// the lookup key for [`TermInfo::paired_with`]. It is an index, never an
/// ownership edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TerminalId(u32);

impl TerminalId {
    /// Placeholder id carried by terminals not yet registered with a
    /// grammar.
    pub const UNASSIGNED: TerminalId = TerminalId(u32::MAX);

    #[inline]
    pub const fn new(index: u32) -> Self {
        TerminalId(index)
    }

    /// Index into the owning grammar's terminal table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TerminalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Opaque editor metadata carried on a terminal.
///
/// The core and the scanner never interpret these fields; editor
/// services read them off the grammar.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EditorInfo {
    /// Highlighting class tag.
    pub token_class: u16,
    /// Whether matches of this terminal may span multiple lines.
    pub multiline: bool,
}

/// Identity record shared by every terminal implementation.
///
/// Holds the attributes the dispatch and validation policies read:
/// name, category, priority, flags, AST kind, pairing, and the validator
/// list. Concrete terminals embed one and expose it through
/// [`Terminal::info`].
pub struct TermInfo {
    name: String,
    display_name: Option<String>,
    category: TokenCategory,
    priority: i32,
    flags: TermFlags,
    ast_kind: Option<AstKind>,
    paired_with: Option<TerminalId>,
    editor: Option<EditorInfo>,
    id: TerminalId,
    initialized: bool,
    validators: Vec<Box<dyn TokenValidator>>,
}

impl TermInfo {
    /// New identity record with category [`TokenCategory::Content`].
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_category(name, TokenCategory::Content)
    }

    /// New identity record with an explicit category.
    ///
    /// [`TokenCategory::Outline`] terminals are implicitly flagged as
    /// punctuation-like and non-significant.
    pub fn with_category(name: impl Into<String>, category: TokenCategory) -> Self {
        let mut flags = TermFlags::empty();
        if category == TokenCategory::Outline {
            flags |= TermFlags::PUNCTUATION | TermFlags::NON_SIGNIFICANT;
        }
        TermInfo {
            name: name.into(),
            display_name: None,
            category,
            priority: 0,
            flags,
            ast_kind: None,
            paired_with: None,
            editor: None,
            id: TerminalId::UNASSIGNED,
            initialized: false,
            validators: Vec::new(),
        }
    }

    /// Stable identifier, unique within a grammar. Immutable after
    /// construction.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Human-readable label for error messages; falls back to the name.
    #[inline]
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    pub fn set_display_name(&mut self, display_name: impl Into<String>) {
        self.display_name = Some(display_name.into());
    }

    #[inline]
    pub fn category(&self) -> TokenCategory {
        self.category
    }

    /// Try-order among terminals that could match at the same position.
    /// Higher priority is tried first.
    #[inline]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Set the priority. Range validation happens at grammar build time;
    /// values outside `[LOWEST_PRIORITY, HIGHEST_PRIORITY]` are a fatal
    /// configuration error there.
    pub fn set_priority(&mut self, priority: i32) {
        self.priority = priority;
    }

    #[inline]
    pub fn flags(&self) -> TermFlags {
        self.flags
    }

    pub fn insert_flags(&mut self, flags: TermFlags) {
        self.flags |= flags;
    }

    /// AST node kind tokens of this terminal produce, if any.
    #[inline]
    pub fn ast_kind(&self) -> Option<AstKind> {
        self.ast_kind
    }

    /// Explicitly assign the AST node kind. An explicit kind is never
    /// overridden by initialization-time inference.
    pub fn set_ast_kind(&mut self, kind: AstKind) {
        self.ast_kind = Some(kind);
    }

    /// The terminal this one is structurally paired with (open/close
    /// delimiter), if any.
    #[inline]
    pub fn paired_with(&self) -> Option<TerminalId> {
        self.paired_with
    }

    /// Record the structural pair. Called by the grammar builder when
    /// resolving declared pairs.
    pub fn set_paired_with(&mut self, other: TerminalId) {
        self.paired_with = Some(other);
    }

    #[inline]
    pub fn editor(&self) -> Option<&EditorInfo> {
        self.editor.as_ref()
    }

    pub fn set_editor(&mut self, editor: EditorInfo) {
        self.editor = Some(editor);
    }

    /// Id within the owning grammar. [`TerminalId::UNASSIGNED`] until the
    /// grammar builder registers the terminal.
    #[inline]
    pub fn id(&self) -> TerminalId {
        self.id
    }

    /// Assign the grammar-local id. Called once by the grammar builder,
    /// in declaration order.
    pub fn assign_id(&mut self, id: TerminalId) {
        self.id = id;
    }

    /// Append a validator. Validators run in registration order.
    pub fn push_validator(&mut self, validator: Box<dyn TokenValidator>) {
        self.validators.push(validator);
    }

    /// Registered validators, in registration order.
    #[inline]
    pub fn validators(&self) -> &[Box<dyn TokenValidator>] {
        &self.validators
    }

    /// One-time initialization, called by the grammar after every
    /// terminal is registered and before scanning begins.
    ///
    /// Performs the literal-AST-kind inference: a literal terminal with
    /// no explicit AST kind, under a grammar that requests AST
    /// construction, adopts the grammar's default literal kind. The
    /// inference runs at most once; repeated calls are no-ops and never
    /// override an already-assigned kind.
    pub fn initialize(&mut self, grammar: &GrammarData) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        if self.ast_kind.is_none()
            && self.flags.contains(TermFlags::LITERAL)
            && grammar.flags().contains(GrammarFlags::CREATE_AST)
        {
            self.ast_kind = grammar.default_literal_ast_kind();
        }
    }
}

impl fmt::Debug for TermInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TermInfo")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("priority", &self.priority)
            .field("flags", &self.flags)
            .field("id", &self.id)
            .field("validators", &self.validators.len())
            .finish_non_exhaustive()
    }
}

/// The lexical terminal contract.
///
/// One implementation per lexical category. The base contract matches
/// nothing, declares no firsts, and validates trivially; every concrete
/// terminal supplies recognition logic, and most constrain their firsts
/// set so the scanner can index them.
pub trait Terminal: Send + Sync {
    /// The terminal's identity record.
    fn info(&self) -> &TermInfo;

    /// Mutable access to the identity record. Used during grammar
    /// construction only; after initialization the record is read-only
    /// by convention.
    fn info_mut(&mut self) -> &mut TermInfo;

    /// Attempt to recognize this terminal's pattern at the cursor's
    /// current position.
    ///
    /// `None` is the normal "does not match here" outcome, not a
    /// failure.
    ///
    /// # Contract
    ///
    /// The cursor may be advanced only when a token is returned. On
    /// `None` the cursor position must be left unchanged; scanners rely
    /// on this to try the next candidate terminal from the same
    /// position.
    fn try_match(&self, context: &mut ScanContext, cursor: &mut SourceCursor<'_>)
        -> Option<Token> {
        let _ = (context, cursor);
        None
    }

    /// The set of characters that could begin a match for this terminal.
    ///
    /// `None` declares a fallback terminal the scanner must try at every
    /// position regardless of indexing, the escape hatch for terminals
    /// whose leading character set is unbounded. The base contract
    /// returns `None`, which is conservative; terminals that can
    /// constrain their firsts should do so.
    ///
    /// An empty set means the terminal is never dispatched by the
    /// scanner; it can still produce tokens through validation-time
    /// reclassification.
    fn firsts(&self) -> Option<Vec<char>> {
        None
    }

    /// Diagnostic formatting for a token of this terminal.
    ///
    /// If the token's resolved value text equals the terminal's name,
    /// the text alone; otherwise `"<value-or-raw-text> (<name>)"`. Pure,
    /// not part of the matching protocol.
    fn token_to_string(&self, token: &Token) -> String {
        let name = self.info().name();
        match token.value.value_text() {
            Some(value) if value == name => value,
            Some(value) => format!("{value} ({name})"),
            None if token.text == name => token.text.clone(),
            None => format!("{} ({name})", token.text),
        }
    }

    /// One-time initialization; see [`TermInfo::initialize`].
    ///
    /// Implementations that override this to capture grammar
    /// configuration must delegate to `self.info_mut().initialize(..)`.
    fn initialize(&mut self, grammar: &GrammarData) {
        self.info_mut().initialize(grammar);
    }

    /// Run the validation hook over an accepted match.
    ///
    /// With no registered validators this returns the token unchanged
    /// with no allocation; the empty check is the entire fast path.
    /// Otherwise validators run in registration order, each seeing the
    /// current in-flight token through a fresh [`TokenValidation`]
    /// snapshot and optionally replacing it. The token left after the
    /// last validator is the result handed to the scanner.
    fn invoke_validate_token(
        &self,
        context: &ScanContext,
        cursor: &SourceCursor<'_>,
        candidates: &[TerminalId],
        token: Token,
    ) -> Result<Token, TokenRejection> {
        let validators = self.info().validators();
        if validators.is_empty() {
            return Ok(token);
        }
        let start = token.span.start;
        let mut current = token;
        for validator in validators {
            let validation = TokenValidation {
                context,
                cursor,
                start,
                candidates,
                token: &current,
            };
            if let Some(replacement) = validator.validate(&validation)? {
                current = replacement;
            }
        }
        Ok(current)
    }
}

/// Lexicographic ordering on display names.
///
/// For deterministic diagnostic listings, not scan-time dispatch.
pub fn by_name(a: &TermInfo, b: &TermInfo) -> Ordering {
    a.display_name().cmp(b.display_name())
}

/// Descending-priority ordering for candidate lists.
///
/// `Less` means "a is tried before b". Equal priorities compare
/// [`Ordering::Equal`]; the dispatch index breaks such ties by
/// declaration order ([`TerminalId`]), which is the documented
/// deterministic tie-break of this toolkit.
pub fn by_priority_desc(a: &TermInfo, b: &TermInfo) -> Ordering {
    b.priority().cmp(&a.priority())
}
