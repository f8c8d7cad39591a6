//! End-to-end tests that run the built binary against a source file and
//! check stdout/exit code, the way `sarnowski-lona`'s `tests/` exercise
//! its binary rather than only its library.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;

fn source_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp source file");
    write!(file, "{}", contents).expect("write temp source file");
    file
}

fn run(contents: &str) -> assert_cmd::assert::Assert {
    let file = source_file(contents);
    Command::cargo_bin("tinylang")
        .expect("locate tinylang binary")
        .arg(file.path())
        .assert()
}

#[test]
fn arithmetic_precedence() {
    run("print 1 + 2 * 3;").success().stdout(contains("7.0"));
}

#[test]
fn if_else_takes_the_true_branch() {
    run("if (True) { print 1; } else { print 2; }").success().stdout(contains("1.0"));
}

#[test]
fn if_else_without_braces_takes_the_false_branch() {
    run("if (False) print 1; else print 2;").success().stdout(contains("2.0"));
}

#[test]
fn while_loop_counts_up() {
    run("var i = 0; while (i != 3) { print i; i = i + 1; }")
        .success()
        .stdout(contains("0.0").and(contains("1.0")).and(contains("2.0")));
}

#[test]
fn string_concatenation() {
    run(r#"print "foo" + "bar";"#).success().stdout(contains("foobar"));
}

#[test]
fn nil_prints_as_null() {
    run("var x; print x;").success().stdout(contains("NULL"));
}

#[test]
fn mixed_type_addition_is_a_runtime_error() {
    run(r#"print 1 + "a";"#).code(70);
}

#[test]
fn undefined_variable_is_a_runtime_error() {
    run("print missing;").code(70);
}

#[test]
fn assignment_to_undeclared_variable_is_a_runtime_error() {
    run("missing = 1;").code(70);
}

#[test]
fn missing_expression_is_a_compile_error() {
    run("var x = ;").code(65);
}

#[test]
fn assignment_reassigns_an_existing_global() {
    run("var x = 10; x = x + 5; print x;").success().stdout(contains("15.0"));
}

#[test]
fn while_with_less_than_condition_counts_up() {
    run("var i = 0; while (i < 3) { print i; i = i + 1; }")
        .success()
        .stdout(contains("0.0").and(contains("1.0")).and(contains("2.0")));
}

#[test]
fn expr_keyword_introduces_a_bare_expression_statement() {
    run("var x = 1; expr x = x + 1; print x;").success().stdout(contains("2.0"));
}
