use assert_cmd::Command;
use httpmock::{Method::GET, MockServer};
use predicates::prelude::*;

fn intra42() -> Command {
    let mut cmd = Command::cargo_bin("intra42").unwrap();
    for var in [
        "FT_API_CLIENT_ID",
        "FT_API_CLIENT_SECRET",
        "FT_API_REDIRECT_URL",
        "FT_API_SCOPES",
        "FT_API_URL",
        "FT_API_VERSION_HEADER",
        "FT_API_MAX_RETRIES",
        "FT_HTTP_TIMEOUT_SECS",
        "FT_USER_AGENT",
    ] {
        cmd.env_remove(var);
    }
    cmd.arg("--log-level").arg("warn");
    cmd
}

#[test]
fn prints_version() {
    intra42()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("intra42 "));
}

#[test]
fn authorize_link_embeds_state_and_client() {
    intra42()
        .env("FT_API_CLIENT_ID", "uid")
        .env("FT_API_CLIENT_SECRET", "secret")
        .env("FT_API_REDIRECT_URL", "https://app.example/callback")
        .args(["authorize-link", "--state", "abc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://api.intra.42.fr/oauth/authorize?"))
        .stdout(predicate::str::contains("client_id=uid"))
        .stdout(predicate::str::contains("state=abc"));
}

#[test]
fn authorize_link_requires_credentials() {
    intra42()
        .env("FT_API_REDIRECT_URL", "https://app.example/callback")
        .arg("authorize-link")
        .assert()
        .failure();
}

#[test]
fn get_prints_body_and_pagination() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(GET)
            .path("/v2/cursus")
            .query_param("page[size]", "1");
        then.status(200)
            .header("X-Total", "3")
            .header("X-Page", "1")
            .header("X-Per-Page", "1")
            .json_body(serde_json::json!([{"id": 21, "name": "42cursus"}]));
    });

    intra42()
        .env("FT_API_URL", server.base_url())
        .args(["get", "cursus", "--per-page", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"42cursus\""))
        .stderr(predicate::str::contains("\"pages\":3"));
    m.assert();
}

#[test]
fn get_surfaces_rate_limiting() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/v2/cursus");
        then.status(429);
    });

    intra42()
        .env("FT_API_URL", server.base_url())
        .args(["get", "cursus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Retry-After"));
}

#[test]
fn get_sends_env_version_header_and_user_agent() {
    let server = MockServer::start();
    let m = server.mock(|when, then| {
        when.method(GET)
            .path("/v2/cursus")
            .header("intra42-version", "2024-01")
            .header("user-agent", "campus-bot/1.0");
        then.status(200).json_body(serde_json::json!([]));
    });

    intra42()
        .env("FT_API_URL", server.base_url())
        .env("FT_API_VERSION_HEADER", "2024-01")
        .env("FT_USER_AGENT", "campus-bot/1.0")
        .args(["get", "cursus"])
        .assert()
        .success();
    m.assert();
}
