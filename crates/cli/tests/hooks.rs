//! End-to-end tests driving the `hookkit` binary the way a host pipeline
//! does: event JSON on stdin, verdict in the exit status and stderr.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use serde_json::{Value, json};
use tempfile::TempDir;

fn hookkit(workdir: &Path, args: &[&str], stdin: &str) -> Output {
    hookkit_bytes(workdir, args, stdin.as_bytes())
}

fn hookkit_bytes(workdir: &Path, args: &[&str], stdin: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_hookkit"))
        .args(args)
        .current_dir(workdir)
        .env_remove("RUST_LOG")
        .env_remove("HOOKKIT_CONFIG")
        .env_remove("HOOKKIT_STATE_DIR")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start hookkit");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin)
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn write_config(workdir: &Path, toml: &str) {
    let state = workdir.join(".claude");
    fs::create_dir_all(&state).unwrap();
    fs::write(state.join("hookkit.toml"), toml).unwrap();
}

fn read_log(workdir: &Path) -> Vec<Value> {
    let content = fs::read_to_string(workdir.join(".claude/tool_usage.json")).unwrap();
    serde_json::from_str(&content).unwrap()
}

#[test]
fn test_audit_appends_bash_entry() {
    let temp_dir = TempDir::new().unwrap();
    let output = hookkit(
        temp_dir.path(),
        &["audit"],
        r#"{"tool":"Bash","sessionId":"s1","command":"ls"}"#,
    );
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));

    let log = read_log(temp_dir.path());
    assert_eq!(log.len(), 1);
    assert_eq!(log[0]["tool"], "Bash");
    assert_eq!(log[0]["session_id"], "s1");
    assert_eq!(log[0]["data"], json!({"command": "ls", "description": ""}));
    assert!(log[0]["timestamp"].as_str().is_some_and(|t| !t.is_empty()));
}

#[test]
fn test_audit_adds_exactly_one_entry() {
    let temp_dir = TempDir::new().unwrap();
    let existing = json!([
        {"timestamp": "t0", "session_id": "a", "tool": "Read", "data": {"path": "."}},
        {"timestamp": "t1", "session_id": "a", "tool": "Glob", "data": {"path": "src"}},
    ]);
    fs::create_dir_all(temp_dir.path().join(".claude")).unwrap();
    fs::write(
        temp_dir.path().join(".claude/tool_usage.json"),
        serde_json::to_string_pretty(&existing).unwrap(),
    )
    .unwrap();

    let output = hookkit(
        temp_dir.path(),
        &["audit"],
        r#"{"tool":"Grep","sessionId":"b","path":"src","pattern":"fn"}"#,
    );
    assert!(output.status.success(), "{}", stderr(&output));

    let log = read_log(temp_dir.path());
    assert_eq!(log.len(), 3);
    assert_eq!(log[..2], existing.as_array().unwrap()[..]);
    assert_eq!(log[2]["tool"], "Grep");
    assert_eq!(log[2]["session_id"], "b");
    assert_eq!(log[2]["data"], json!({"path": "src", "pattern": "fn"}));
}

#[test]
fn test_audit_rejects_malformed_input() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join(".claude")).unwrap();
    let log_path = temp_dir.path().join(".claude/tool_usage.json");
    fs::write(&log_path, "[]").unwrap();

    let output = hookkit(temp_dir.path(), &["audit"], "this is not json");

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error parsing JSON input"));
    assert_eq!(fs::read_to_string(&log_path).unwrap(), "[]");
}

#[test]
fn test_audit_records_fields_of_unexpected_type() {
    let temp_dir = TempDir::new().unwrap();
    for input in [
        r#"{"tool":"Bash","sessionId":42,"command":"ls"}"#,
        r#"{"tool":"Bash","sessionId":null,"command":["ls","-l"]}"#,
    ] {
        let output = hookkit(temp_dir.path(), &["audit"], input);
        assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    }

    let log = read_log(temp_dir.path());
    assert_eq!(log.len(), 2);
    assert_eq!(log[0]["session_id"], 42);
    assert_eq!(log[0]["data"], json!({"command": "ls", "description": ""}));
    assert_eq!(log[1]["session_id"], Value::Null);
    assert_eq!(log[1]["data"]["command"], r#"["ls","-l"]"#);
}

#[test]
fn test_audit_rejects_non_utf8_input() {
    let temp_dir = TempDir::new().unwrap();
    let output = hookkit_bytes(temp_dir.path(), &["audit"], b"\xff\xfe");

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error parsing JSON input"));
    assert!(!temp_dir.path().join(".claude/tool_usage.json").exists());
}

#[test]
fn test_audit_reports_corrupt_log() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join(".claude")).unwrap();
    let log_path = temp_dir.path().join(".claude/tool_usage.json");
    fs::write(&log_path, "{").unwrap();

    let output = hookkit(temp_dir.path(), &["audit"], r#"{"tool":"Read"}"#);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Unexpected error"));
    assert_eq!(fs::read_to_string(&log_path).unwrap(), "{");
}

#[test]
fn test_audit_honours_state_dir_flag() {
    let temp_dir = TempDir::new().unwrap();
    let output = hookkit(
        temp_dir.path(),
        &["audit", "--state-dir", "audit-state"],
        r#"{"tool":"Write","file_path":"a.py"}"#,
    );
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(temp_dir.path().join("audit-state/tool_usage.json").exists());
    assert!(!temp_dir.path().join(".claude").exists());
}

#[test]
fn test_format_ignores_other_tools_and_bad_input() {
    let temp_dir = TempDir::new().unwrap();
    for input in [
        r#"{"tool":"Bash","command":"ls"}"#,
        r#"{"tool":"Edit","file_path":"notes.md"}"#,
        "definitely not json",
        "",
    ] {
        let output = hookkit(temp_dir.path(), &["format"], input);
        assert_eq!(output.status.code(), Some(0), "input {input:?}");
        assert!(stderr(&output).is_empty(), "input {input:?}: {}", stderr(&output));
    }
}

#[test]
fn test_format_ignores_non_utf8_input() {
    let temp_dir = TempDir::new().unwrap();
    let output = hookkit_bytes(temp_dir.path(), &["format"], b"\xff\xfe");

    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).is_empty(), "{}", stderr(&output));
}

#[test]
fn test_format_missing_formatter_is_silent() {
    let temp_dir = TempDir::new().unwrap();
    write_config(
        temp_dir.path(),
        "[formatter]\ncommand = \"hookkit-no-such-formatter\"\n",
    );

    let output = hookkit(
        temp_dir.path(),
        &["format"],
        r#"{"tool":"Edit","file_path":"x.py"}"#,
    );
    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).is_empty(), "{}", stderr(&output));
}

#[cfg(unix)]
#[test]
fn test_format_success_mentions_file() {
    let temp_dir = TempDir::new().unwrap();
    write_config(
        temp_dir.path(),
        "[formatter]\ncommand = \"true\"\nargs = [\"{file}\"]\n",
    );

    let output = hookkit(
        temp_dir.path(),
        &["format"],
        r#"{"tool":"Edit","file_path":"x.py"}"#,
    );
    assert_eq!(output.status.code(), Some(0));
    let err = stderr(&output);
    assert!(err.contains("Formatted x.py with true"), "{err}");
}

#[cfg(unix)]
#[test]
fn test_format_ignores_session_id_type() {
    let temp_dir = TempDir::new().unwrap();
    write_config(
        temp_dir.path(),
        "[formatter]\ncommand = \"true\"\nargs = [\"{file}\"]\n",
    );

    let output = hookkit(
        temp_dir.path(),
        &["format"],
        r#"{"tool":"Edit","sessionId":42,"file_path":"x.py"}"#,
    );
    assert_eq!(output.status.code(), Some(0));
    let err = stderr(&output);
    assert!(err.contains("Formatted x.py with true"), "{err}");
}

#[cfg(unix)]
#[test]
fn test_format_failure_and_timeout_still_exit_zero() {
    let temp_dir = TempDir::new().unwrap();
    write_config(
        temp_dir.path(),
        "[formatter]\ncommand = \"sh\"\nargs = [\"-c\", \"echo cannot parse >&2; exit 123\", \"{file}\"]\n",
    );
    let output = hookkit(
        temp_dir.path(),
        &["format"],
        r#"{"tool":"Write","file_path":"x.py"}"#,
    );
    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).contains("formatting issue: cannot parse"));

    write_config(
        temp_dir.path(),
        "[formatter]\ncommand = \"sh\"\nargs = [\"-c\", \"sleep 5\", \"{file}\"]\ntimeout_ms = 100\n",
    );
    let output = hookkit(
        temp_dir.path(),
        &["format"],
        r#"{"tool":"Write","file_path":"slow.py"}"#,
    );
    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).contains("timed out for slow.py"));
}

#[test]
fn test_format_survives_broken_config() {
    let temp_dir = TempDir::new().unwrap();
    write_config(temp_dir.path(), "[formatter\n");

    let output = hookkit(
        temp_dir.path(),
        &["format"],
        r#"{"tool":"Edit","file_path":"x.py"}"#,
    );
    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).contains("formatting error"));

    for input in [
        r#"{"tool":"Bash","command":"ls"}"#,
        r#"{"tool":"Read","path":"x.py"}"#,
    ] {
        let output = hookkit(temp_dir.path(), &["format"], input);
        assert_eq!(output.status.code(), Some(0));
        assert!(stderr(&output).is_empty(), "input {input:?}: {}", stderr(&output));
    }
}

#[test]
fn test_enforce_uv_blocks_pip() {
    let temp_dir = TempDir::new().unwrap();
    let output = hookkit(
        temp_dir.path(),
        &["enforce-uv"],
        r#"{"tool":"Bash","sessionId":"s2","command":"pip install requests"}"#,
    );
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Suggested command: uv pip install requests"));

    let content = fs::read_to_string(temp_dir.path().join(".claude/uv_enforcement.json")).unwrap();
    let log: Vec<Value> = serde_json::from_str(&content).unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0]["original_command"], "pip install requests");
}

#[test]
fn test_enforce_uv_allows_everything_else() {
    let temp_dir = TempDir::new().unwrap();
    for input in [
        r#"{"tool":"Bash","command":"uv pip install requests"}"#,
        r#"{"tool":"Edit","file_path":"x.py"}"#,
        "{oops",
    ] {
        let output = hookkit(temp_dir.path(), &["enforce-uv"], input);
        assert_eq!(output.status.code(), Some(0), "input {input:?}");
    }
    assert!(!temp_dir.path().join(".claude/uv_enforcement.json").exists());
}

#[test]
fn test_lint_skips_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let output = hookkit(
        temp_dir.path(),
        &["lint"],
        r#"{"tool":"Edit","file_path":"does_not_exist.py"}"#,
    );
    assert_eq!(output.status.code(), Some(0));
    assert!(!temp_dir.path().join(".claude/python_lint_errors.json").exists());
}
