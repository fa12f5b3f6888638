//! Request pipeline tests against a wiremock server.

mod common;

use common::{client_for, TEST_TOKEN};
use integrations_pagerduty::config::ACCEPT_MEDIA_TYPE;
use integrations_pagerduty::services::ListUsersOptions;
use integrations_pagerduty::{Pagination, PagerDutyClient, PagerDutyErrorKind};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fixed_headers_are_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/abilities"))
        .and(header("Accept", ACCEPT_MEDIA_TYPE))
        .and(header("Authorization", format!("Token token={}", TEST_TOKEN).as_str()))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "abilities": ["teams", "read_only_users"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let abilities = client_for(&server).abilities().list().await.unwrap();
    assert_eq!(abilities.abilities, vec!["teams", "read_only_users"]);
}

#[tokio::test]
async fn test_user_agent_is_sent_when_configured() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/abilities"))
        .and(header("User-Agent", "pd-test/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"abilities": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = PagerDutyClient::builder()
        .base_url(server.uri())
        .token(TEST_TOKEN)
        .user_agent("pd-test/1.0")
        .build()
        .unwrap();

    client.abilities().list().await.unwrap();
}

#[tokio::test]
async fn test_validate_auth_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/abilities"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"abilities": []})))
        .mount(&server)
        .await;

    assert!(client_for(&server).validate_auth().await.is_ok());
}

#[test_case(401, PagerDutyErrorKind::Unauthorized ; "unauthorized")]
#[test_case(403, PagerDutyErrorKind::Forbidden ; "forbidden")]
#[tokio::test]
async fn test_validate_auth_rejected(status: u16, kind: PagerDutyErrorKind) {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/abilities"))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({
            "error": {"code": 2006, "message": "Invalid Credentials"}
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).validate_auth().await.unwrap_err();
    assert_eq!(err.kind(), kind);
    assert_eq!(err.status_code(), Some(status));
}

#[tokio::test]
async fn test_error_message_carries_request_line_and_detail() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/PXXXXXX"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": 2100, "message": "Not Found", "errors": []}
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).users().get("PXXXXXX").await.unwrap_err();

    assert_eq!(err.kind(), PagerDutyErrorKind::NotFound);
    assert!(err.is_api_error());
    assert_eq!(
        err.message(),
        format!(
            "GET API call to {}/users/PXXXXXX failed: 404 Not Found : Not Found (code 2100)",
            server.uri()
        )
    );

    let detail = err.api_error().unwrap();
    assert_eq!(detail.code, Some(2100));
    assert_eq!(detail.message.as_deref(), Some("Not Found"));
}

#[tokio::test]
async fn test_validation_errors_are_listed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/teams"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": 2001,
                "message": "Invalid Input Provided",
                "errors": ["Name cannot be empty."]
            }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .teams()
        .create(&Default::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), PagerDutyErrorKind::BadRequest);
    assert!(err
        .message()
        .ends_with("400 Bad Request : Invalid Input Provided (code 2001): Name cannot be empty."));
}

#[tokio::test]
async fn test_non_json_error_body_falls_back_to_status_line() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/teams/T1"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).teams().delete("T1").await.unwrap_err();

    assert_eq!(err.kind(), PagerDutyErrorKind::ServerError);
    assert!(err.api_error().is_none());
    assert_eq!(
        err.message(),
        format!("DELETE API call to {}/teams/T1 failed: 502 Bad Gateway", server.uri())
    );
}

#[tokio::test]
async fn test_json_error_body_without_envelope_falls_back() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/vendors/V1"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({"message": "slow down"})))
        .mount(&server)
        .await;

    let err = client_for(&server).vendors().get("V1").await.unwrap_err();

    assert_eq!(err.kind(), PagerDutyErrorKind::TooManyRequests);
    assert!(err.api_error().is_none());
    assert!(err.message().ends_with("failed: 429 Too Many Requests"));
}

#[tokio::test]
async fn test_undecodable_success_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/abilities"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server).abilities().list().await.unwrap_err();
    assert_eq!(err.kind(), PagerDutyErrorKind::Deserialization);
    assert_eq!(err.status_code(), Some(200));
}

#[tokio::test]
async fn test_delete_returns_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/users/U1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server).users().delete("U1").await.unwrap();
    assert_eq!(response.status().as_u16(), 204);
    assert!(response.body().is_empty());
    assert_eq!(response.method().as_str(), "DELETE");
    assert_eq!(response.url().path(), "/users/U1");
}

#[tokio::test]
async fn test_list_query_encoding() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users"))
        .and(query_param("limit", "25"))
        .and(query_param("query", "jane doe"))
        .and(query_param("team_ids[]", "T1"))
        .and(query_param("team_ids[]", "T2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "users": [{"id": "U1", "name": "Jane Doe", "email": "jane@example.com"}],
            "limit": 25,
            "offset": 0,
            "more": false,
            "total": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let options = ListUsersOptions {
        pagination: Pagination::new().limit(25),
        query: Some("jane doe".to_string()),
        team_ids: vec!["T1".to_string(), "T2".to_string()],
        ..Default::default()
    };
    let page = client_for(&server).users().list(&options).await.unwrap();

    assert_eq!(page.users.len(), 1);
    assert_eq!(page.users[0].email, "jane@example.com");
    assert!(page.pagination.next_page().is_none());
}

#[tokio::test]
async fn test_paging_through_results() {
    let server = MockServer::start().await;

    // Mounted first so it wins over the unfiltered first-page mock.
    Mock::given(method("GET"))
        .and(path("/teams"))
        .and(query_param("offset", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "teams": [{"id": "T2", "name": "two"}],
            "limit": 1,
            "offset": 1,
            "more": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/teams"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "teams": [{"id": "T1", "name": "one"}],
            "limit": 1,
            "offset": 0,
            "more": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut options = integrations_pagerduty::services::ListTeamsOptions {
        pagination: Pagination::new().limit(1),
        ..Default::default()
    };

    let mut names = Vec::new();
    loop {
        let page = client.teams().list(&options).await.unwrap();
        names.extend(page.teams.into_iter().map(|t| t.name));
        match page.pagination.next_page() {
            Some(next) => options.pagination = next,
            None => break,
        }
    }

    assert_eq!(names, vec!["one", "two"]);
}

#[tokio::test]
async fn test_connection_failure() {
    let client = PagerDutyClient::builder()
        .base_url("http://127.0.0.1:1")
        .token(TEST_TOKEN)
        .build()
        .unwrap();

    let err = client.abilities().list().await.unwrap_err();
    assert_eq!(err.kind(), PagerDutyErrorKind::ConnectionFailed);
    assert!(err.message().starts_with("GET API call to http://127.0.0.1:1/abilities failed"));
}

#[tokio::test]
async fn test_null_errors_array_keeps_detail() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/abilities"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"message": "Not Found", "code": 2100, "errors": null}
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).abilities().list().await.unwrap_err();

    assert_eq!(err.kind(), PagerDutyErrorKind::NotFound);
    assert_eq!(
        err.message(),
        format!(
            "GET API call to {}/abilities failed: 404 Not Found : Not Found (code 2100)",
            server.uri()
        )
    );
    assert!(err.api_error().unwrap().errors.is_empty());
}

#[tokio::test]
async fn test_truncated_error_body_keeps_status() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                return;
            }
            request.extend_from_slice(&buf[..n]);
        }
        socket
            .write_all(
                b"HTTP/1.1 500 Internal Server Error\r\n\
                  Content-Type: application/json\r\n\
                  Content-Length: 100\r\n\r\n{\"err",
            )
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });

    let client = PagerDutyClient::builder()
        .base_url(format!("http://{}", addr))
        .token(TEST_TOKEN)
        .build()
        .unwrap();

    let err = client.abilities().list().await.unwrap_err();

    assert_eq!(err.kind(), PagerDutyErrorKind::ServerError);
    assert_eq!(err.status_code(), Some(500));
    assert!(err.api_error().is_none());
    assert_eq!(
        err.message(),
        format!(
            "GET API call to http://{}/abilities failed: 500 Internal Server Error",
            addr
        )
    );
}
