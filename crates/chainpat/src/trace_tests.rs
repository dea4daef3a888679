// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use crate::chain::{Cause, Chain};

fn types(fault: &Fault) -> Vec<String> {
    Chain::from(fault)
        .iter()
        .map(|n| n.type_name().to_string())
        .collect()
}

const TRACE: &str = r#"Exception in thread "main" java.lang.IllegalStateException: request failed
	at com.example.Service.call(Service.java:42)
	at com.example.Main.main(Main.java:10)
	Suppressed: java.lang.RuntimeException: cleanup
		at com.example.Service.close(Service.java:50)
Caused by: java.io.IOException: connection reset: by peer
	at java.net.SocketInputStream.read(SocketInputStream.java:186)
	... 2 more
Caused by: java.net.SocketException
	... 4 more
"#;

#[test]
fn parses_head_and_causes() {
    let fault = parse(TRACE).unwrap().unwrap();
    assert_eq!(
        types(&fault),
        [
            "java.lang.IllegalStateException",
            "java.io.IOException",
            "java.net.SocketException"
        ]
    );
    assert_eq!(fault.message(), Some("request failed"));
    let cause = fault.source_fault().unwrap();
    assert_eq!(cause.message(), Some("connection reset: by peer"));
    assert_eq!(cause.source_fault().unwrap().message(), None);
}

#[test]
fn header_without_thread_prefix() {
    let fault = parse("java.lang.NullPointerException\n\tat X.y(X.java:1)\n")
        .unwrap()
        .unwrap();
    assert_eq!(types(&fault), ["java.lang.NullPointerException"]);
}

#[test]
fn unindented_continuation_extends_message() {
    let fault = parse("com.example.Failure: first line\nsecond line\n\tat X.y(X.java:1)\n")
        .unwrap()
        .unwrap();
    assert_eq!(fault.message(), Some("first line\nsecond line"));
}

#[test]
fn preamble_lines_are_skipped() {
    let fault = parse("2026-10-16 ERROR request failed\njava.io.IOException: boom\n")
        .unwrap()
        .unwrap();
    assert_eq!(types(&fault), ["java.io.IOException"]);
}

#[test]
fn no_header_is_none() {
    assert!(parse("").unwrap().is_none());
    assert!(parse("just some words\n\tat nothing\n").unwrap().is_none());
}

#[test]
fn caused_by_without_type_is_an_error() {
    let err = parse("java.lang.Exception\nCaused by: \n").unwrap_err();
    assert_eq!(err, TraceError::MissingType { line: 2 });
}

#[test]
fn caused_by_with_invalid_type_is_an_error() {
    let err = parse("java.lang.Exception\nCaused by: not a type\n").unwrap_err();
    assert_eq!(
        err,
        TraceError::InvalidType {
            line: 2,
            text: "not a type".into()
        }
    );
}

#[test]
fn inner_class_names_are_types() {
    let fault = parse("com.example.Outer$Inner: x\n").unwrap().unwrap();
    assert_eq!(fault.type_name(), "com.example.Outer$Inner");
}
