use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Command isolated from the caller's config files and GHMAP_* variables
fn ghmap(home: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("ghmap");
    cmd.env("XDG_CONFIG_HOME", home)
        .env("HOME", home)
        .env_remove("GHMAP_MODE")
        .env_remove("GHMAP_PRETTY")
        .env_remove("GHMAP_CONFIG")
        .env_remove("RUST_LOG")
        .arg("--color")
        .arg("never");
    cmd
}

fn write_json(dir: &TempDir, name: &str, value: &Value) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

fn mock_user() -> Value {
    json!({
        "login": "octocat",
        "id": 583231,
        "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
        "html_url": "https://github.com/octocat",
        "type": "User",
        "name": "The Octocat",
        "hireable": null,
        "followers": 3938,
        "following": 9,
        "public_repos": 8,
        "public_gists": 8,
        "created_at": "2011-01-25T18:44:36Z",
        "plan": {"name": "pro", "space": 976562499, "collaborators": 0, "private_repos": 20}
    })
}

fn mock_repository(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "full_name": format!("octocat/{}", name),
        "owner": {"login": "octocat", "id": 583231, "url": "https://api.github.com/users/octocat"},
        "private": false,
        "fork": false,
        "language": "Rust",
        "watchers_count": 80,
        "forks_count": 9,
        "open_issues_count": 1,
        "clone_url": format!("https://github.com/octocat/{}.git", name),
        "created_at": "2011-01-26T19:01:12Z",
        "updated_at": "2011-01-26T19:14:43Z",
        "pushed_at": "2011-01-26T19:06:43Z"
    })
}

fn stdout_json(output: &[u8]) -> Value {
    serde_json::from_slice(output).expect("stdout should be JSON")
}

#[test]
fn test_help_command() {
    let home = TempDir::new().unwrap();
    ghmap(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Decode GitHub API payloads"));
}

#[test]
fn test_targets_lists_registered_converters() {
    let home = TempDir::new().unwrap();
    let output = ghmap(home.path()).arg("targets").assert().success().get_output().stdout.clone();

    let targets = stdout_json(&output);
    assert_eq!(
        targets["decode"],
        json!(["user", "authorization", "authorization-list", "repository", "repository-list"])
    );
    assert_eq!(targets["encode"], json!(["user-update", "authorization-update"]));
}

#[test]
fn test_targets_text_output() {
    let home = TempDir::new().unwrap();
    ghmap(home.path())
        .args(["-o", "text", "targets"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Decode targets:"))
        .stdout(predicate::str::contains("authorization-update"));
}

#[test]
fn test_decode_user_from_file() {
    let home = TempDir::new().unwrap();
    let path = write_json(&home, "user.json", &mock_user());

    let output = ghmap(home.path())
        .arg("decode")
        .arg("user")
        .arg(&path)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let user = stdout_json(&output);
    assert_eq!(user["login"], "octocat");
    assert_eq!(user["id"], 583231);
    assert_eq!(user["type"], "User");
    assert_eq!(user["hireable"], false);
    assert_eq!(user["email"], "");
    assert_eq!(user["plan"]["private_repos"], 20);
}

#[test]
fn test_decode_from_stdin() {
    let home = TempDir::new().unwrap();
    let payload = json!([mock_repository(2, "beta"), mock_repository(1, "alpha")]);

    let output = ghmap(home.path())
        .args(["decode", "repository-list", "--compact"])
        .write_stdin(payload.to_string())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let text = String::from_utf8(output.clone()).unwrap();
    assert_eq!(text.trim_end().lines().count(), 1);

    let repos = stdout_json(&output);
    let names: Vec<&str> = repos
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["beta", "alpha"]);
}

#[test]
fn test_decode_text_output() {
    let home = TempDir::new().unwrap();
    let payload = json!([mock_repository(2, "beta"), mock_repository(1, "alpha")]);
    let path = write_json(&home, "repos.json", &payload);

    ghmap(home.path())
        .args(["-o", "text", "decode", "repository-list"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::is_match("(?s)octocat/beta.*octocat/alpha").unwrap())
        .stdout(predicate::str::contains("Owner: octocat"));
}

#[test]
fn test_decode_unknown_target() {
    let home = TempDir::new().unwrap();

    ghmap(home.path())
        .args(["decode", "gist"])
        .write_stdin("{}")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No converter registered for type: gist"));
}

#[test]
fn test_decode_null_payload() {
    let home = TempDir::new().unwrap();

    ghmap(home.path())
        .args(["decode", "user"])
        .write_stdin("null")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Null input"));
}

#[test]
fn test_decode_invalid_json() {
    let home = TempDir::new().unwrap();

    ghmap(home.path())
        .args(["decode", "user"])
        .write_stdin("{\"login\": ")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input is not valid JSON"));
}

#[test]
fn test_decode_bad_timestamp() {
    let home = TempDir::new().unwrap();
    let mut user = mock_user();
    user["created_at"] = json!("not-a-date");

    ghmap(home.path())
        .args(["decode", "user"])
        .write_stdin(user.to_string())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timestamp at `created_at`"));
}

#[test]
fn test_json_error_carries_code() {
    let home = TempDir::new().unwrap();
    let mut user = mock_user();
    user["id"] = json!("42");

    let output = ghmap(home.path())
        .args(["-o", "json", "decode", "user"])
        .write_stdin(user.to_string())
        .assert()
        .failure()
        .get_output()
        .stderr
        .clone();

    let err: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(err["error"], true);
    assert_eq!(err["code"], "type_mismatch");
    assert!(err["message"].as_str().unwrap().contains("`id`"));
}

#[test]
fn test_strict_flag_rejects_missing_keys() {
    let home = TempDir::new().unwrap();
    let path = write_json(&home, "user.json", &mock_user());

    ghmap(home.path())
        .args(["decode", "user", "--strict"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing field"));
}

#[test]
fn test_strict_mode_from_config_file() {
    let home = TempDir::new().unwrap();
    let payload = write_json(&home, "user.json", &mock_user());
    let config = home.path().join("ghmap.toml");
    fs::write(&config, "mode = \"strict\"\n").unwrap();

    ghmap(home.path())
        .arg("--config")
        .arg(&config)
        .args(["decode", "user"])
        .arg(&payload)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing field"));
}

#[test]
fn test_strict_mode_from_user_config_dir() {
    let home = TempDir::new().unwrap();
    let payload = write_json(&home, "user.json", &mock_user());
    fs::create_dir_all(home.path().join("ghmap")).unwrap();
    fs::write(home.path().join("ghmap").join("config.toml"), "mode = \"strict\"\n").unwrap();

    ghmap(home.path())
        .args(["decode", "user"])
        .arg(&payload)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing field"));
}

#[test]
fn test_strict_mode_from_env() {
    let home = TempDir::new().unwrap();
    let payload = write_json(&home, "user.json", &mock_user());

    ghmap(home.path())
        .env("GHMAP_MODE", "strict")
        .args(["decode", "user"])
        .arg(&payload)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing field"));
}

#[test]
fn test_missing_config_file() {
    let home = TempDir::new().unwrap();

    ghmap(home.path())
        .args(["--config", "/nonexistent/ghmap.toml", "targets"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[test]
fn test_encode_user_update() {
    let home = TempDir::new().unwrap();
    let path = write_json(&home, "update.json", &json!({"bio": "Rustacean", "hireable": true}));

    let output = ghmap(home.path())
        .arg("encode")
        .arg("user-update")
        .arg(&path)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    assert_eq!(stdout_json(&output), json!({"bio": "Rustacean", "hireable": true}));
}

#[test]
fn test_encode_authorization_update_compact() {
    let home = TempDir::new().unwrap();

    ghmap(home.path())
        .args(["encode", "authorization-update", "--compact"])
        .write_stdin(r#"{"note_url": null, "note": "deploy", "scopes": ["repo"]}"#)
        .assert()
        .success()
        .stdout("{\"scopes\":[\"repo\"],\"note\":\"deploy\"}\n");
}

#[test]
fn test_encode_rejects_unknown_fields() {
    let home = TempDir::new().unwrap();

    ghmap(home.path())
        .args(["encode", "user-update"])
        .write_stdin(r#"{"hirable": true}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed update record"));
}

#[test]
fn test_verbose_logs_dispatch() {
    let home = TempDir::new().unwrap();

    ghmap(home.path())
        .args(["-v", "decode", "authorization-list"])
        .write_stdin("[]")
        .assert()
        .success()
        .stdout(predicate::str::contains("[]"))
        .stderr(predicate::str::contains("decoding payload"));
}
