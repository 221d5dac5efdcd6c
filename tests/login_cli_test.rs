//! Tests for `holt login set/show/rm` commands.

mod support;
use support::*;

#[test]
fn test_set_and_show_roundtrip() {
    let t = Test::new();

    let output = t.login_set(None, "alice@example.com", "hunter2");
    assert_success(&output);
    assert_stdout_contains(&output, "credentials saved");

    let output = t.login_show(None);
    assert_success(&output);
    assert_stdout_contains(&output, "alice@example.com");
    assert_stdout_contains(&output, "main_user");
}

#[test]
fn test_show_never_prints_password() {
    let t = Test::with_login("alice", "s3cret-p4ss");

    let output = t.login_show(None);
    assert_success(&output);
    assert_stdout_contains(&output, "presence-gated");
    assert_no_secret_leak(&output, "s3cret-p4ss");
}

#[test]
fn test_show_without_login_hints_set() {
    let t = Test::new();

    let output = t.login_show(None);
    assert_success(&output);
    assert_stdout_contains(&output, "no stored login");
    assert_stdout_contains(&output, "holt login set");
}

#[test]
fn test_set_warns_on_replace() {
    let t = Test::with_login("alice", "old-pass");

    let output = t.login_set(None, "bob", "new-pass");
    assert_success(&output);
    assert_stdout_contains(&output, "replacing stored login");

    let output = t.login_show(None);
    assert_stdout_contains(&output, "bob");
    assert_stdout_excludes(&output, "alice");
}

#[test]
fn test_rm_removes_login() {
    let t = Test::with_login("alice", "hunter2");

    let output = t.login_rm(None);
    assert_success(&output);
    assert_stdout_contains(&output, "removed login");

    let output = t.login_show(None);
    assert_success(&output);
    assert_stdout_contains(&output, "no stored login");
}

#[test]
fn test_rm_without_login_reports_nothing_to_do() {
    let t = Test::new();

    let output = t.login_rm(None);
    assert_success(&output);
    assert_stdout_contains(&output, "no stored login");
}

#[test]
fn test_named_accounts_are_independent() {
    let t = Test::new();

    assert_success(&t.login_set(Some("main_user"), "alice", "pass-a"));
    assert_success(&t.login_set(Some("work"), "bob", "pass-b"));

    let output = t.login_show(Some("work"));
    assert_stdout_contains(&output, "bob");
    assert_stdout_excludes(&output, "alice");

    assert_success(&t.login_rm(Some("work")));
    let output = t.login_show(Some("main_user"));
    assert_stdout_contains(&output, "alice");
}

#[test]
fn test_invalid_account_name_rejected() {
    let t = Test::new();

    let output = t.login_set(Some("bad/name"), "alice", "hunter2");
    assert_failure(&output);

    let output = t.login_set(Some(""), "alice", "hunter2");
    assert_failure(&output);
}

#[test]
fn test_username_read_from_stdin_when_flag_omitted() {
    let t = Test::new();

    // First stdin line is the username, second the password.
    let output = t
        .cmd()
        .args(["login", "set"])
        .write_stdin("carol\npiped-pass\n")
        .output()
        .expect("failed to run holt login set");
    assert_success(&output);

    let output = t.login_show(None);
    assert_stdout_contains(&output, "carol");
    assert_no_secret_leak(&output, "piped-pass");
}

#[test]
fn test_empty_stdin_stores_nothing() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["login", "set"])
        .write_stdin("")
        .output()
        .expect("failed to run holt login set");
    assert_success(&output);
    assert_stdout_contains(&output, "no credentials entered");

    let output = t.login_show(None);
    assert_stdout_contains(&output, "no stored login");
}

#[test]
fn test_configured_default_account_is_used() {
    let t = Test::new();
    t.write_config("[vault]\naccount = \"archive\"\n");

    assert_success(&t.login_set(None, "alice", "hunter2"));

    // Explicitly addressing the configured account finds the same login.
    let output = t.login_show(Some("archive"));
    assert_success(&output);
    assert_stdout_contains(&output, "alice");
}
