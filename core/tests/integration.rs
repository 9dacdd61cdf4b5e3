//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock echo server on a random port, then drives every client
//! verb over real HTTP through `UreqTransport`. The echo reply shows exactly
//! what arrived on the wire, so these tests check the encoded query strings,
//! bodies and headers rather than the client's internal request values.

use std::net::SocketAddr;

use mock_server::{Echo, ECHO_HEADER};
use rest_core::{ClientConfig, HttpClient, Outcome, Params};
use serde_json::{json, Value};

/// Start the mock server on a background thread and return its address.
fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

/// An address with nothing listening on it.
fn unreachable_addr() -> SocketAddr {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
}

fn echo(outcome: Outcome) -> Echo {
    match outcome {
        Outcome::Decoded { value, .. } => serde_json::from_value(value).unwrap(),
        other => panic!("expected a decoded echo, got {other:?}"),
    }
}

#[test]
fn get_encodes_mapping_params() {
    let addr = start_server();
    let client = HttpClient::new(&format!("http://{addr}"), None, None);

    let seen = echo(client.get("/echo/x", Some(Params::from([("a", 1), ("b", 2)]))));
    assert_eq!(seen.method, "GET");
    assert_eq!(seen.path, "/echo/x");
    let query = seen.query.unwrap();
    let mut pairs: Vec<&str> = query.split('&').collect();
    pairs.sort_unstable();
    assert_eq!(pairs, ["a=1", "b=2"]);
}

#[test]
fn get_appends_to_existing_query() {
    let addr = start_server();
    let client = HttpClient::new(&format!("http://{addr}"), None, None);

    let seen = echo(client.get("/echo/x?page=3", Some(Params::from([("a", 1)]))));
    assert_eq!(seen.query.as_deref(), Some("page=3&a=1"));
}

#[test]
fn get_sends_string_params_verbatim() {
    let addr = start_server();
    let client = HttpClient::new(&format!("http://{addr}"), None, None);

    let seen = echo(client.get("/echo", Some(Params::from("q=a%20b&x=%2F"))));
    assert_eq!(seen.query.as_deref(), Some("q=a%20b&x=%2F"));
}

#[test]
fn post_sends_form_encoded_body() {
    let addr = start_server();
    let client = HttpClient::new(&format!("http://{addr}"), None, None);

    let seen = echo(client.post("/echo", json!({"name": "a b", "n": 1}), false));
    assert_eq!(seen.method, "POST");
    assert_eq!(seen.body, "name=a+b&n=1");
}

#[test]
fn post_file_sends_payload_unmodified() {
    let addr = start_server();
    let client = HttpClient::new(&format!("http://{addr}"), None, None);

    let payload = "--xyz\r\nContent-Disposition: form-data; name=\"f\"\r\n\r\na b&c=d\r\n--xyz--\r\n";
    let seen = echo(client.post("/echo/upload", payload, true));
    assert_eq!(seen.body, payload);
    assert_eq!(seen.body_len, payload.len());
}

#[test]
fn put_sends_json_for_structured_data() {
    let addr = start_server();
    let client = HttpClient::new(&format!("http://{addr}"), None, None);

    let seen = echo(client.put("/echo/items/1", json!({"title": "x", "tags": [1, 2]})));
    assert_eq!(seen.method, "PUT");
    let body: Value = serde_json::from_str(&seen.body).unwrap();
    assert_eq!(body, json!({"title": "x", "tags": [1, 2]}));
}

#[test]
fn put_sends_strings_verbatim() {
    let addr = start_server();
    let client = HttpClient::new(&format!("http://{addr}"), None, None);

    let seen = echo(client.put("/echo/items/1", "not json at all"));
    assert_eq!(seen.body, "not json at all");
}

#[test]
fn delete_records_response_headers() {
    let addr = start_server();
    let client = HttpClient::new(&format!("http://{addr}"), None, None);

    let outcome = client.delete("/echo/items/1");
    assert_eq!(outcome.info().status, 200);
    assert_eq!(outcome.info().header(ECHO_HEADER), Some("echo"));
    assert_eq!(echo(outcome).method, "DELETE");

    let outcome = client.get("/echo/items/1", None);
    assert!(outcome.info().headers.is_none());
}

#[test]
fn default_headers_reach_the_server() {
    let addr = start_server();
    let mut client = HttpClient::new(&format!("http://{addr}"), None, None);
    client.add_default_header("X-Client: rest-core");

    let seen = echo(client.get("/echo", None));
    assert_eq!(seen.header("accept"), Some("application/json"));
    assert_eq!(seen.header("content-type"), Some("application/json"));
    assert_eq!(seen.header("x-client"), Some("rest-core"));
}

#[test]
fn basic_auth_sent_only_with_both_credentials() {
    let addr = start_server();
    let base = format!("http://{addr}");

    let client = HttpClient::new(&base, Some("user"), Some("pass"));
    let seen = echo(client.get("/echo", None));
    assert_eq!(seen.header("authorization"), Some("Basic dXNlcjpwYXNz"));

    let client = HttpClient::new(&base, Some("user"), Some(""));
    let seen = echo(client.post("/echo", "a=1", false));
    assert_eq!(seen.header("authorization"), None);

    let client = HttpClient::new(&base, None, Some("pass"));
    let seen = echo(client.delete("/echo"));
    assert_eq!(seen.header("authorization"), None);
}

#[test]
fn non_json_reply_is_a_decode_error() {
    let addr = start_server();
    let client = HttpClient::new(&format!("http://{addr}"), None, None);

    match client.get("/text", None) {
        Outcome::DecodeError { info, body } => {
            assert_eq!(info.status, 200);
            assert_eq!(info.content_type.as_deref(), Some("text/plain"));
            assert_eq!(body, "plain text, not json");
        }
        other => panic!("expected DecodeError, got {other:?}"),
    }
}

#[test]
fn empty_reply_decodes_to_null() {
    let addr = start_server();
    let client = HttpClient::new(&format!("http://{addr}"), None, None);

    let outcome = client.get("/empty", None);
    assert_eq!(outcome.info().status, 204);
    assert_eq!(outcome.value(), Some(&Value::Null));
}

#[test]
fn error_status_keeps_decoded_body() {
    let addr = start_server();
    let client = HttpClient::new(&format!("http://{addr}"), None, None);

    let outcome = client.delete("/status/500");
    assert!(outcome.is_decoded());
    assert_eq!(outcome.info().status, 500);
    assert_eq!(outcome.value(), Some(&json!({"status": 500})));
}

#[test]
fn reply_larger_than_ten_mebibytes_is_decoded() {
    let addr = start_server();
    let client = HttpClient::new(&format!("http://{addr}"), None, None);

    let len = 11 * 1024 * 1024;
    let outcome = client.get(&format!("/large/{len}"), None);
    assert!(outcome.is_decoded(), "expected Decoded, got {:?}", outcome.info());
    assert_eq!(outcome.info().status, 200);
    assert!(outcome.info().size_download > len);
    let data = outcome.value().unwrap()["data"].as_str().unwrap();
    assert_eq!(data.len(), len);
}

#[test]
fn unreachable_endpoint_yields_transport_error_for_every_verb() {
    let addr = unreachable_addr();
    let client = HttpClient::with_config(ClientConfig::new(format!("http://{addr}")).with_debug(true));

    let outcomes = [
        client.get("/x", Some(Params::from([("a", 1)]))),
        client.post("/x", "a=1", false),
        client.put("/x", json!({"a": 1})),
        client.delete("/x"),
    ];
    for outcome in outcomes {
        match outcome {
            Outcome::TransportError(info) => {
                assert_eq!(info.status, 0);
                assert!(info.error.is_some());
                assert!(info.url.starts_with(&format!("http://{addr}/x")));
            }
            other => panic!("expected TransportError, got {other:?}"),
        }
    }
}
