//! End-to-end tests for the `pokedex` binary.
//!
//! The REPL is driven through stdin. Tests that page through the listing
//! point `POKEDEX_API_URL` at a local mock server, so nothing here talks
//! to the public API.

use assert_cmd::Command;
use predicates::prelude::*;
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Get a command for the pokedex binary, never pointed at the real API.
fn pokedex() -> Command {
    let mut cmd = Command::cargo_bin("pokedex").unwrap();
    cmd.env("POKEDEX_API_URL", "http://127.0.0.1:9/api/v2/location-area/");
    cmd.env_remove("RUST_LOG");
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// Offline commands
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_help_lists_commands() {
    pokedex()
        .write_stdin("help\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to the Pokedex!"))
        .stdout(predicate::str::contains("help: Displays a help message"))
        .stdout(predicate::str::contains("exit: Exit the Pokedex"))
        .stdout(predicate::str::contains("map: Display the next 20 location areas"))
        .stdout(predicate::str::contains("mapb: Display the previous 20 location areas"));
}

#[test]
fn test_unknown_command() {
    pokedex()
        .write_stdin("pikachu\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Unknown command. Type 'help' for a list of commands.",
        ));
}

#[test]
fn test_mapb_on_fresh_session() {
    pokedex()
        .write_stdin("mapb\n")
        .assert()
        .success()
        .stdout("Pokedex > No previous page available.\nPokedex > \n");
}

#[test]
fn test_exit_status_is_zero() {
    pokedex()
        .write_stdin("exit\nhelp\n")
        .assert()
        .code(0)
        .stdout("Pokedex > ");
}

#[test]
fn test_end_of_input_exits_cleanly() {
    pokedex().write_stdin("").assert().success().stdout("Pokedex > \n");
}

#[test]
fn test_unreachable_api_is_reported_and_loop_continues() {
    pokedex()
        .write_stdin("map\nmapb\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: request to http://127.0.0.1:9/"))
        .stdout(predicate::str::contains("No previous page available."));
}

#[test]
fn test_invalid_config_fails_startup() {
    pokedex()
        .env("POKEDEX_API_URL", "not a url")
        .write_stdin("help\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Paging against a mock listing
// ─────────────────────────────────────────────────────────────────────────────

fn page(names: &[&str], next: Option<String>, previous: Option<String>) -> serde_json::Value {
    let results: Vec<_> = names
        .iter()
        .map(|n| serde_json::json!({ "name": n, "url": format!("https://example.test/{n}/") }))
        .collect();
    serde_json::json!({ "count": 3, "next": next, "previous": previous, "results": results })
}

#[test]
fn test_map_pages_forward_and_back() {
    let rt = Runtime::new().unwrap();
    let server = rt.block_on(async {
        let server = MockServer::start().await;
        let base = format!("{}/api/v2/location-area/", server.uri());
        let second = format!("{base}?offset=2&limit=2");

        Mock::given(method("GET"))
            .and(path("/api/v2/location-area/"))
            .and(query_param("offset", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(
                &["mt-coronet-1f-route-216"],
                None,
                Some(format!("{base}?offset=0&limit=2")),
            )))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v2/location-area/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(
                &["canalave-city-area", "eterna-city-area"],
                Some(second),
                None,
            )))
            .mount(&server)
            .await;
        server
    });

    pokedex()
        .env("POKEDEX_API_URL", format!("{}/api/v2/location-area/", server.uri()))
        .write_stdin("map\nmap\nmap\nmapb\nexit\n")
        .assert()
        .success()
        .stdout(
            "Pokedex > canalave-city-area\neterna-city-area\n\
             Pokedex > mt-coronet-1f-route-216\n\
             Pokedex > No next page available.\n\
             Pokedex > canalave-city-area\neterna-city-area\n\
             Pokedex > ",
        );

    let requests = rt.block_on(server.received_requests()).unwrap();
    assert_eq!(requests.len(), 3);
}
