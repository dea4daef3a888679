// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use yare::parameterized;

fn compiled(pattern: &str) -> Compiled {
    compile(pattern, &TypeRegistry::default()).unwrap()
}

fn offsets(pattern: &str) -> Vec<i64> {
    compiled(pattern)
        .conjunction
        .matchers()
        .iter()
        .map(PositionalMatcher::offset)
        .collect()
}

fn texts(pattern: &str) -> Vec<String> {
    compiled(pattern)
        .conjunction
        .matchers()
        .iter()
        .map(|m| m.element().pattern())
        .collect()
}

fn syntax_error(pattern: &str) -> CompileError {
    match compile(pattern, &TypeRegistry::default()).unwrap_err() {
        PatternError::Syntax(e) => e,
        other => panic!("expected syntax error, got {other:?}"),
    }
}

// =============================================================================
// OFFSETS
// =============================================================================

#[parameterized(
    single = { "A", &[0] },
    head_run = { "A/B/C", &[0, 1, 2] },
    glob_advances_depth = { "A/*/B", &[0, 1, 2] },
    greedy_then_one = { "**/T", &[-1] },
    greedy_then_two = { "A/**/B/C$", &[0, -2, -1] },
    greedy_then_three = { "A/B/**/C/D/E", &[0, 1, -3, -2, -1] },
    qualifiers_share_depth = { "A[k]/B(code == 1)[x]", &[0, 0, 1, 1, 1] },
    tail_qualifiers_share_offset = { "**/A/B[x]/C", &[-3, -2, -2, -1] },
    tail_glob = { "A/**/*", &[0, -1] },
    trailing_greedy = { "A/**", &[0] },
    leading_slash = { "/A/B", &[0, 1] },
    caret = { "^A/B", &[0, 1] },
    comment_between = { "A # first\n/B", &[0, 1] },
    whitespace = { "  A /  B  ", &[0, 1] },
)]
fn offsets_by_pattern(pattern: &str, expected: &[i64]) {
    assert_eq!(offsets(pattern), expected);
}

#[test]
fn greedy_alone_compiles_to_nothing() {
    assert!(compiled("**").conjunction.is_empty());
}

#[parameterized(
    empty = { "" },
    blank = { "   " },
    comment_only = { "# nothing here" },
    caret_only = { "^" },
)]
fn empty_patterns_compile(pattern: &str) {
    assert!(compiled(pattern).conjunction.is_empty());
}

// =============================================================================
// ELEMENTS
// =============================================================================

#[test]
fn ellipsis_emits_subtype_instead_of_type_name() {
    assert_eq!(
        texts("java.io.IOException.../java.lang.IllegalStateException"),
        ["java.io.IOException...", "java.lang.IllegalStateException"]
    );
    let compiled = compiled("java.io.IOException...");
    assert_eq!(
        compiled.conjunction.matchers()[0].element(),
        &ElementMatcher::Subtype("java.io.IOException".into())
    );
}

#[test]
fn unicode_ellipsis() {
    assert_eq!(texts("java.io.IOException\u{2026}"), ["java.io.IOException..."]);
}

#[test]
fn glob_is_subtype_of_root() {
    let compiled = compiled("*");
    assert_eq!(
        compiled.conjunction.matchers()[0].element(),
        &ElementMatcher::Subtype("java.lang.Throwable".into())
    );
}

#[test]
fn qualifiers_in_order() {
    assert_eq!(
        texts("java.io.IOException...(retryable)[io]$"),
        ["java.io.IOException...", "(retryable)", "[io]"]
    );
}

#[test]
fn reference_keys_parse_as_integers_or_names() {
    let compiled = compiled("A[ 0 ]/B[io]");
    let keys: Vec<_> = compiled
        .conjunction
        .matchers()
        .iter()
        .filter_map(|m| m.element().key().cloned())
        .collect();
    assert_eq!(keys, [Key::Index(0), Key::Name("io".into())]);
}

#[test]
fn property_block_is_verbatim() {
    assert_eq!(texts("T(message == \"a/b [c]\")"), ["T", "(message == \"a/b [c]\")"]);
}

#[test]
fn dollar_marks_last_matcher_terminal() {
    let compiled = compiled("A/B[k]$");
    let terminal: Vec<bool> = compiled
        .conjunction
        .matchers()
        .iter()
        .map(PositionalMatcher::is_terminal)
        .collect();
    assert_eq!(terminal, [false, false, true]);
}

#[test]
fn comments_allowed_after_dollar() {
    assert_eq!(offsets("A$ # done"), [0]);
}

#[parameterized(
    caret = { "^A", true },
    slash = { "/A", true },
    caret_slash = { "^/A", true },
    plain = { "A", false },
)]
fn left_anchor_flag(pattern: &str, expected: bool) {
    assert_eq!(compiled(pattern).left_anchored, expected);
}

// =============================================================================
// ERRORS
// =============================================================================

#[parameterized(
    second_greedy = { "A/**/B/**/C", "`**` may appear only once", 8 },
    greedy_twice_in_row = { "**/**", "`**` may appear only once", 4 },
    two_periods_then_name = { "A..B", "incomplete ellipsis", 3 },
    two_periods_at_end = { "A..", "incomplete ellipsis", 3 },
    period_then_slash = { "A./B", "incomplete ellipsis", 2 },
    trailing_slash = { "A/", "expected a type test after `/`", 2 },
    trailing_slash_comment = { "A/ # more", "expected a type test after `/`", 9 },
    empty_segment = { "A//B", "empty segment before `/`", 2 },
    missing_slash = { "A B", "expected `/` before the next segment", 2 },
    glob_after_test = { "A *", "expected `/` before the next segment", 2 },
    unterminated_block = { "A(x", "unterminated property block", 1 },
    unterminated_reference = { "A[k", "unterminated reference", 1 },
    empty_reference = { "A[ ]", "empty reference", 3 },
    after_dollar = { "A$/B", "unexpected character '/' after `$`", 2 },
    glob_property = { "* (x)", "a wildcard cannot take '('", 2 },
    glob_dollar = { "A/* $", "a wildcard cannot take '$'", 4 },
    property_after_reference = { "A[k](x)", "'(' is out of order in this segment", 4 },
    reference_twice = { "A[k][j]", "'[' is out of order in this segment", 4 },
    qualifier_first = { "/(x)", "'(' needs a type test before it", 1 },
    bad_start = { "(x)", "unexpected character '('", 0 },
    bad_identifier_char = { "A-B", "unexpected character '-'", 1 },
    double_caret = { "^^A", "unexpected character '^'", 1 },
    greedy_qualified = { "**(x)", "unexpected character '('", 2 },
    glob_qualified_directly = { "*[k]", "unexpected character '['", 1 },
    empty_block = { "A()", "invalid property block: empty expression", 2 },
    bad_block = { "A(==)", "invalid property block: unexpected character '='", 2 },
    block_error_offset = { "A(code == 1 2)", "invalid property block: unexpected character '2'", 12 },
)]
fn compile_errors(pattern: &str, message: &str, position: usize) {
    let err = syntax_error(pattern);
    assert_eq!(err.message, message);
    assert_eq!(err.position, position);
    assert_eq!(err.pattern, pattern);
}

#[test]
fn positions_count_characters_not_bytes() {
    let err = syntax_error("\u{e9}/\u{df}/%");
    assert_eq!(err.position, 4);
}

#[test]
fn unknown_subtype_fails_compilation() {
    let err = compile("A/com.example.Missing...", &TypeRegistry::default()).unwrap_err();
    assert_eq!(
        err,
        PatternError::UnknownType {
            name: "com.example.Missing".into(),
            position: 2,
            pattern: "A/com.example.Missing...".into(),
        }
    );
}

#[test]
fn unknown_exact_type_is_allowed() {
    assert_eq!(texts("com.example.Missing"), ["com.example.Missing"]);
}
