use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::SourceBuffer;

#[test]
fn current_and_peek() {
    let buf = SourceBuffer::new("abc");
    let cursor = buf.cursor();
    assert_eq!(cursor.current(), b'a');
    assert_eq!(cursor.peek(), b'b');
    assert_eq!(cursor.peek2(), b'c');
}

#[test]
fn peek_past_eof_is_sentinel() {
    let buf = SourceBuffer::new("a");
    let cursor = buf.cursor();
    assert_eq!(cursor.peek(), 0);
    assert_eq!(cursor.peek2(), 0);
}

#[test]
fn advance_and_eof() {
    let buf = SourceBuffer::new("ab");
    let mut cursor = buf.cursor();
    assert!(!cursor.is_eof());
    cursor.advance_n(2);
    assert!(cursor.is_eof());
    assert_eq!(cursor.current(), 0);
}

#[test]
fn copy_snapshot_restores_position() {
    let buf = SourceBuffer::new("hello");
    let mut cursor = buf.cursor();
    let saved = cursor;
    cursor.advance_n(3);
    assert_eq!(cursor.pos(), 3);
    cursor = saved;
    assert_eq!(cursor.pos(), 0);
    assert_eq!(cursor.current(), b'h');
}

#[test]
fn slice_from_tracks_token_text() {
    let buf = SourceBuffer::new("let x");
    let mut cursor = buf.cursor();
    let start = cursor.pos();
    cursor.eat_while(|b| b.is_ascii_alphabetic());
    assert_eq!(cursor.slice_from(start), "let");
}

#[test]
fn eat_while_stops_at_sentinel() {
    let buf = SourceBuffer::new("aaa");
    let mut cursor = buf.cursor();
    cursor.eat_while(|b| b == b'a');
    assert_eq!(cursor.pos(), 3);
    assert!(cursor.is_eof());
}

#[test]
fn current_char_decodes_ascii_and_multibyte() {
    let buf = SourceBuffer::new("aλ→");
    let mut cursor = buf.cursor();
    assert_eq!(cursor.current_char(), 'a');
    cursor.advance_char();
    assert_eq!(cursor.current_char(), 'λ');
    cursor.advance_char();
    assert_eq!(cursor.current_char(), '→');
    cursor.advance_char();
    assert!(cursor.is_eof());
    assert_eq!(cursor.current_char(), '\0');
}

#[test]
fn starts_with_exact_and_case_insensitive() {
    let buf = SourceBuffer::new("BEGIN block");
    let cursor = buf.cursor();
    assert!(cursor.starts_with("BEGIN"));
    assert!(!cursor.starts_with("begin"));
    assert!(cursor.starts_with_ignore_ascii_case("begin"));
}

#[test]
fn starts_with_never_reads_past_source() {
    let buf = SourceBuffer::new("ab");
    let cursor = buf.cursor();
    assert!(!cursor.starts_with("abc"));
}

#[test]
fn eat_until_newline_stops_at_newline() {
    let buf = SourceBuffer::new("// comment\nnext");
    let mut cursor = buf.cursor();
    cursor.eat_until_newline_or_eof();
    assert_eq!(cursor.current(), b'\n');
    assert_eq!(cursor.pos(), 10);
}

#[test]
fn eat_until_newline_stops_at_eof() {
    let buf = SourceBuffer::new("// trailing");
    let mut cursor = buf.cursor();
    cursor.eat_until_newline_or_eof();
    assert!(cursor.is_eof());
}

#[test]
fn find_str_reports_absolute_offset() {
    let buf = SourceBuffer::new("ab */ cd");
    let mut cursor = buf.cursor();
    cursor.advance(); // offset stays absolute even off origin
    assert_eq!(cursor.find_str("*/"), Some(3));
    assert_eq!(cursor.find_str("xx"), None);
}

proptest! {
    /// `find_str` agrees with `str::find` over the remaining source.
    #[test]
    fn find_str_matches_std(source in "[ -~]{0,64}", needle in "[ -~]{1,4}") {
        let buf = SourceBuffer::new(&source);
        let cursor = buf.cursor();
        let expected = source.find(&needle).map(|i| i as u32);
        prop_assert_eq!(cursor.find_str(&needle), expected);
    }

    /// `eat_while` consumes exactly the leading run the predicate accepts.
    #[test]
    fn eat_while_matches_take_while(source in "[a-z0-9 ]{0,64}") {
        let buf = SourceBuffer::new(&source);
        let mut cursor = buf.cursor();
        cursor.eat_while(|b| b.is_ascii_lowercase());
        let expected = source
            .bytes()
            .take_while(u8::is_ascii_lowercase)
            .count() as u32;
        prop_assert_eq!(cursor.pos(), expected);
    }
}
