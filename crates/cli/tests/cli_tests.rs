// End-to-end tests for the `vquote` binary against a mock BibleGet server.
//
// Every test gets its own config directory and an English host locale.
//
// Run with: cargo test -p versequote-cli --test cli_tests

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use httpmock::prelude::*;
use tempfile::TempDir;

const VERSIONS: &str = r#"{"validversions_fullname":{"CEI2008":"Conferenza Episcopale Italiana|2008|it","NABRE":"New American Bible - Revised Edition|2011|en","BLPD":"Biblia Libro del Pueblo de Dios|1990|es"}}"#;

const JOHN_3: &str = r#"{"results":[
  {"book":"John","bookabbrev":"Jn","chapter":"3","verse":"16","text":"For God so loved the world."},
  {"book":"John","bookabbrev":"Jn","chapter":"3","verse":"17","text":"For God did not send his Son."}
],"errors":[]}"#;

fn vquote(config: &Path, api_base: &str) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_vquote"));
    cmd.env("VERSEQUOTE_CONFIG_DIR", config)
        .env("VERSEQUOTE_API_BASE", api_base)
        .env_remove("VERSEQUOTE_DIALOG_BASE")
        .env_remove("LC_ALL")
        .env_remove("LC_MESSAGES")
        .env_remove("RUST_LOG")
        .env("LANG", "en_US.UTF-8");
    cmd
}

fn run(config: &Path, api_base: &str, args: &[&str]) -> Output {
    vquote(config, api_base).args(args).output().expect("run vquote")
}

fn run_with_stdin(config: &Path, api_base: &str, args: &[&str], stdin: &str) -> Output {
    let mut child = vquote(config, api_base)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn vquote");
    child.stdin.take().unwrap().write_all(stdin.as_bytes()).unwrap();
    child.wait_with_output().expect("wait for vquote")
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

fn mock_versions(server: &MockServer) -> httpmock::Mock<'_> {
    server.mock(|when, then| {
        when.method(GET).path("/v3/metadata.php").query_param("query", "bibleversions");
        then.status(200).header("content-type", "application/json").body(VERSIONS);
    })
}

// ===========================================================================
// validate
// ===========================================================================

#[test]
fn validate_accepts_and_normalizes() {
    let config = TempDir::new().unwrap();
    let out = run(config.path(), "http://127.0.0.1:9", &["validate", "Jn 3:16-18"]);

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out).trim(), "Jn3:16-18");
}

#[test]
fn validate_rejects_with_localized_message() {
    let config = TempDir::new().unwrap();
    let out = run(config.path(), "http://127.0.0.1:9", &["validate", "hello"]);

    assert_eq!(out.status.code(), Some(3));
    assert!(stderr(&out).contains("The quote is not valid"), "stderr: {}", stderr(&out));
}

// ===========================================================================
// search
// ===========================================================================

#[test]
fn search_prints_formatted_document() {
    let server = MockServer::start();
    mock_versions(&server);
    let quote = server.mock(|when, then| {
        when.method(GET)
            .path("/v3/index.php")
            .query_param("query", "Jn 3:16-17")
            .query_param("version", "NABRE")
            .query_param("preferorigin", "GREEK");
        then.status(200).body(JOHN_3);
    });
    let config = TempDir::new().unwrap();

    let out = run(config.path(), &server.base_url(), &["search", "Jn 3:16-17"]);

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    quote.assert();
    let text = stdout(&out);
    assert!(text.contains("John 3"));
    assert!(text.contains("16 For God so loved the world.17 For God did not send his Son."));
}

#[test]
fn search_json_reports_quotes_and_saves_document() {
    let server = MockServer::start();
    mock_versions(&server);
    server.mock(|when, then| {
        when.method(GET).path("/v3/index.php").query_param("preferorigin", "HEBREW");
        then.status(200).body(JOHN_3);
    });
    let config = TempDir::new().unwrap();
    let doc = config.path().join("notes.vqdoc");

    let out = run(
        config.path(),
        &server.base_url(),
        &["search", "Jn3,16-17", "--origin", "hebrew", "--version", "BLPD", "--json",
          "--document", doc.to_str().unwrap()],
    );

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    let val: serde_json::Value = serde_json::from_str(stdout(&out).trim()).unwrap();
    assert_eq!(val["version"], "BLPD");
    assert_eq!(val["revision"], 1);
    assert_eq!(val["quotes"].as_array().unwrap().len(), 2);
    assert!(doc.exists());
}

#[test]
fn search_failure_is_one_notice_and_no_document() {
    let server = MockServer::start();
    mock_versions(&server);
    server.mock(|when, then| {
        when.method(GET).path("/v3/index.php");
        then.status(500).body("boom");
    });
    let config = TempDir::new().unwrap();
    let doc = config.path().join("notes.vqdoc");

    let out = run(
        config.path(),
        &server.base_url(),
        &["search", "Jn 3:16", "--document", doc.to_str().unwrap()],
    );

    assert_eq!(out.status.code(), Some(4));
    let err = stderr(&out);
    assert_eq!(err.matches("The quote could not be retrieved").count(), 1, "stderr: {}", err);
    assert!(!doc.exists());
}

#[test]
fn search_invalid_reference_skips_lookup() {
    let server = MockServer::start();
    mock_versions(&server);
    let quote = server.mock(|when, then| {
        when.method(GET).path("/v3/index.php");
        then.status(200).body(JOHN_3);
    });
    let config = TempDir::new().unwrap();

    let out = run(config.path(), &server.base_url(), &["search", "3:16"]);

    assert_eq!(out.status.code(), Some(3));
    quote.assert_calls(0);
}

// ===========================================================================
// versions
// ===========================================================================

#[test]
fn versions_are_cached_and_preselected_by_language() {
    let server = MockServer::start();
    let versions = mock_versions(&server);
    let config = TempDir::new().unwrap();

    let first = run(config.path(), &server.base_url(), &["versions", "--json"]);
    let second = run(config.path(), &server.base_url(), &["versions"]);

    assert!(first.status.success(), "stderr: {}", stderr(&first));
    assert!(second.status.success(), "stderr: {}", stderr(&second));
    versions.assert();

    let list: serde_json::Value = serde_json::from_str(stdout(&first).trim()).unwrap();
    let keys: Vec<&str> = list.as_array().unwrap().iter().map(|v| v["key"].as_str().unwrap()).collect();
    assert_eq!(keys, vec!["CEI2008", "NABRE", "BLPD"]);
    assert_eq!(list[1]["selected"], true);
    assert!(stdout(&second).lines().any(|l| l.starts_with("* NABRE")));
}

#[test]
fn versions_failure_exits_with_lookup_code() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v3/metadata.php");
        then.status(503);
    });
    let config = TempDir::new().unwrap();

    let out = run(config.path(), &server.base_url(), &["versions"]);

    assert_eq!(out.status.code(), Some(4));
    assert!(stderr(&out).contains("The list of Bible versions could not be loaded"));
}

#[test]
fn select_version_checks_the_catalog() {
    let server = MockServer::start();
    mock_versions(&server);
    let config = TempDir::new().unwrap();

    let bad = run(config.path(), &server.base_url(), &["select-version", "KJV"]);
    assert_eq!(bad.status.code(), Some(2));

    let good = run(config.path(), &server.base_url(), &["select-version", "CEI2008"]);
    assert!(good.status.success(), "stderr: {}", stderr(&good));

    let list = run(config.path(), &server.base_url(), &["versions"]);
    assert!(stdout(&list).lines().any(|l| l.starts_with("* CEI2008")));
}

// ===========================================================================
// keyword / open
// ===========================================================================

#[test]
fn keyword_inserts_quotes_sent_by_the_dialog() {
    let config = TempDir::new().unwrap();
    let messages = concat!(
        r#"{"action":"ins","quote":{"book":"John","bookabbrev":"Jn","chapter":3,"verse":16,"text":"For God so loved the world."}}"#,
        "\n",
        "garbage\n",
        r#"{"action":"close"}"#,
        "\n",
    );

    let out = run_with_stdin(
        config.path(),
        "http://127.0.0.1:9",
        &["keyword", "loved", "--exact", "--version", "NABRE"],
        messages,
    );

    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert!(stdout(&out).contains("16 For God so loved the world."));
    assert!(stderr(&out).contains(
        "dialog: https://localhost:3000/search-results.html?keyword=loved&version=NABRE&exactmatch=true"
    ));
}

#[test]
fn keyword_blank_is_usage_error() {
    let config = TempDir::new().unwrap();
    let out = run_with_stdin(config.path(), "http://127.0.0.1:9", &["keyword", "   "], "");
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn open_prints_page_url() {
    let config = TempDir::new().unwrap();

    let out = run(config.path(), "http://127.0.0.1:9", &["open", "about"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out).trim(), "https://localhost:3000/about.html");

    let out = run(
        config.path(),
        "http://127.0.0.1:9",
        &["open", "settings", "--dialog-base", "https://addin.example.org/"],
    );
    assert_eq!(stdout(&out).trim(), "https://addin.example.org/settings.html");
}

#[test]
fn read_only_commands_work_without_writable_config() {
    let root = TempDir::new().unwrap();
    std::fs::write(root.path().join("blocker"), "not a directory").unwrap();
    let config = root.path().join("blocker").join("sub");
    let api = "http://127.0.0.1:9";

    let out = run(&config, api, &["validate", "Jn 3:16"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out).trim(), "Jn3:16");

    let out = run(&config, api, &["validate", "hello"]);
    assert_eq!(out.status.code(), Some(3));
    assert!(stderr(&out).contains("not valid"), "stderr: {}", stderr(&out));

    let out = run(&config, api, &["open", "about"]);
    assert!(out.status.success(), "stderr: {}", stderr(&out));
    assert_eq!(stdout(&out).trim(), "https://localhost:3000/about.html");
}

// ===========================================================================
// settings / lang
// ===========================================================================

#[test]
fn settings_import_show_reset() {
    let config = TempDir::new().unwrap();
    let api = "http://127.0.0.1:9";

    let shown = run(config.path(), api, &["settings", "show"]);
    let mut settings: serde_json::Value = serde_json::from_str(&stdout(&shown)).unwrap();
    assert_eq!(settings["par"]["fontFamily"], "Arial");

    settings["version"]["visible"] = serde_json::Value::Bool(true);
    let file = config.path().join("style.json");
    std::fs::write(&file, settings.to_string()).unwrap();
    let imported = run(config.path(), api, &["settings", "import", file.to_str().unwrap()]);
    assert!(imported.status.success(), "stderr: {}", stderr(&imported));

    let shown: serde_json::Value =
        serde_json::from_str(&stdout(&run(config.path(), api, &["settings", "show"]))).unwrap();
    assert_eq!(shown["version"]["visible"], true);

    assert!(run(config.path(), api, &["settings", "reset"]).status.success());
    let shown: serde_json::Value =
        serde_json::from_str(&stdout(&run(config.path(), api, &["settings", "show"]))).unwrap();
    assert_eq!(shown["version"]["visible"], false);
}

#[test]
fn settings_import_rejects_partial_override() {
    let config = TempDir::new().unwrap();
    let file = config.path().join("partial.json");
    std::fs::write(&file, r#"{"version":{"visible":true}}"#).unwrap();

    let out = run(config.path(), "http://127.0.0.1:9", &["settings", "import", file.to_str().unwrap()]);
    assert_eq!(out.status.code(), Some(2));
}

#[test]
fn settings_path_is_under_config_dir() {
    let config = TempDir::new().unwrap();
    let out = run(config.path(), "http://127.0.0.1:9", &["settings", "path"]);
    assert_eq!(
        stdout(&out).trim(),
        config.path().join("preferences.json").display().to_string()
    );
}

#[test]
fn lang_defaults_to_host_and_can_be_changed() {
    let config = TempDir::new().unwrap();
    let api = "http://127.0.0.1:9";

    assert_eq!(stdout(&run(config.path(), api, &["lang"])).trim(), "en");

    let bad = run(config.path(), api, &["lang", "fr"]);
    assert_eq!(bad.status.code(), Some(2));

    assert!(run(config.path(), api, &["lang", "es"]).status.success());
    assert_eq!(stdout(&run(config.path(), api, &["lang"])).trim(), "es");

    let out = run(config.path(), api, &["validate", "hello"]);
    assert!(stderr(&out).contains("La cita no es válida"));
}
