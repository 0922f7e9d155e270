//! Keyword reclassification through the validation hook.
//!
//! Reserved words are not dispatch candidates. The identifier terminal
//! matches them as ordinary identifiers; this validator then looks the
//! text up in a sorted keyword table and, on a hit, replaces the
//! identifier token with a token of the keyword's terminal. The grammar
//! gets keyword detection without a dedicated terminal subtype in the
//! dispatch path.

use tessera_core::{
    TerminalId, Token, TokenCategory, TokenRejection, TokenValidation, TokenValidator,
    TokenValue,
};

/// Reclassifies identifier tokens whose text is a reserved word.
///
/// The table is sorted once at grammar build time; lookup is a binary
/// search. Under case-insensitive grammars the table keys are folded to
/// lowercase and lookups fold the identifier text the same way.
pub struct KeywordValidator {
    /// `(keyword text, terminal id)`, sorted by text.
    table: Vec<(String, TerminalId)>,
    case_insensitive: bool,
}

impl KeywordValidator {
    pub fn new(mut entries: Vec<(String, TerminalId)>, case_insensitive: bool) -> Self {
        if case_insensitive {
            for (text, _) in &mut entries {
                text.make_ascii_lowercase();
            }
        }
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        KeywordValidator {
            table: entries,
            case_insensitive,
        }
    }

    /// Look up a keyword by identifier text.
    pub fn lookup(&self, text: &str) -> Option<TerminalId> {
        let index = if self.case_insensitive {
            let folded = text.to_ascii_lowercase();
            self.table
                .binary_search_by(|(kw, _)| kw.as_str().cmp(folded.as_str()))
        } else {
            self.table.binary_search_by(|(kw, _)| kw.as_str().cmp(text))
        };
        index.ok().map(|i| self.table[i].1)
    }
}

impl TokenValidator for KeywordValidator {
    fn validate(
        &self,
        validation: &TokenValidation<'_>,
    ) -> Result<Option<Token>, TokenRejection> {
        let Some(keyword_id) = self.lookup(&validation.token.text) else {
            return Ok(None);
        };
        Ok(Some(Token::new(
            keyword_id,
            validation.token.span,
            validation.token.text.clone(),
            TokenValue::None,
            TokenCategory::Content,
        )))
    }
}
