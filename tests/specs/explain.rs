//! Specs for `chainpat explain`.

use crate::prelude::*;

#[test]
fn lists_matchers_with_offsets() {
    explain("java.io.IOException/**/java.sql.SQLException$")
        .passes()
        .stdout_eq(
            "pattern: java.io.IOException/**/java.sql.SQLException$\n  \
             0  java.io.IOException\n \
             -1  java.sql.SQLException$\n",
        );
}

#[test]
fn qualifiers_share_a_segment_offset() {
    explain("^java.lang.Exception...(message != null)[top]/*")
        .passes()
        .stdout_eq(
            "pattern: ^java.lang.Exception...(message != null)[top]/*\n\
             anchored at head\n  \
             0  java.lang.Exception...\n  \
             0  (message != null)\n  \
             0  [top]\n  \
             1  java.lang.Throwable...\n",
        );
}

#[test]
fn empty_pattern_matches_nothing() {
    explain("  # only a comment")
        .passes()
        .stdout_has("no matchers: matches nothing");
}

#[test]
fn json_lists_matchers() {
    let result = explain("**/java.lang.Exception...[cause]$").json().passes();
    let json = result.json();

    assert_eq!(json["left_anchored"], false);
    let matchers = json["matchers"].as_array().unwrap();
    assert_eq!(matchers.len(), 2);
    assert_eq!(matchers[0]["offset"], -1);
    assert_eq!(matchers[0]["element"], "java.lang.Exception...");
    assert_eq!(matchers[0]["terminal"], false);
    assert_eq!(matchers[1]["element"], "[cause]");
    assert_eq!(matchers[1]["terminal"], true);
}

#[test]
fn syntax_error_exits_two() {
    explain("A//B")
        .exits(2)
        .stderr_has("empty segment before `/` at position 2");
}

#[test]
fn capture_needs_a_type_test() {
    explain("**/[cause]")
        .exits(2)
        .stderr_has("'[' needs a type test before it at position 3");
}
