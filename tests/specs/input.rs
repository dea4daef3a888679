//! Specs for chain input formats.

use crate::prelude::*;

const TRACE: &str = "Exception in thread \"main\" java.lang.IllegalStateException: request failed
\tat com.example.Service.call(Service.java:42)
Caused by: java.io.IOException: connection reset
\tat java.net.SocketInputStream.read(SocketInputStream.java:186)
\t... 2 more
Caused by: java.net.SocketException
\t... 4 more
";

#[test]
fn stack_trace_from_stdin() {
    let project = Project::empty();

    matching("java.lang.IllegalStateException/java.io.IOException.../java.lang.Throwable...[root]$")
        .stdin(TRACE)
        .pwd(project.path())
        .passes()
        .stdout_eq("MATCH  nodes 0..3 of 3\n  [root] #2 java.net.SocketException\n");
}

#[test]
fn dash_reads_stdin() {
    let project = Project::empty();

    matching("**/java.net.SocketException$")
        .on("-")
        .stdin(TRACE)
        .pwd(project.path())
        .passes();
}

#[test]
fn stack_trace_file_by_extension() {
    let project = Project::empty();
    let trace = project.file("crash.log", TRACE);

    matching("**/java.io.IOException...$")
        .on(&trace)
        .pwd(project.path())
        .passes();
}

#[test]
fn trace_flag_overrides_extension() {
    let project = Project::empty();
    let trace = project.file("crash.toml", TRACE);

    matching("java.lang.RuntimeException...")
        .on(&trace)
        .args(&["--trace"])
        .pwd(project.path())
        .passes();
}

#[test]
fn json_chain_file() {
    let project = Project::empty();
    let chain = project.file(
        "chain.json",
        r#"{"fault": [
            {"type": "java.lang.IllegalStateException"},
            {"type": "java.sql.SQLException", "properties": {"sqlState": "40001"}}
        ]}"#,
    );

    matching("*/java.sql.SQLException(sqlState == '40001')$")
        .on(&chain)
        .pwd(project.path())
        .passes();
}

#[test]
fn malformed_stack_trace_is_an_error() {
    let project = Project::empty();

    matching("*")
        .stdin("java.lang.Exception\nCaused by: \n")
        .pwd(project.path())
        .exits(2)
        .stderr_has("line 2");
}

#[test]
fn empty_stdin_is_an_empty_chain() {
    let project = Project::empty();

    matching("*").stdin("").pwd(project.path()).no_match();
}
