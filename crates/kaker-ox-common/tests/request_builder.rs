use futures_util::StreamExt;
use kaker_ox_common::{AuthMethod, CommonRequestError, Endpoint, RequestBuilder, RequestConfig};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn builder_for(server: &MockServer) -> RequestBuilder {
    let config = RequestConfig::new(format!("{}/models", server.uri()))
        .with_auth(AuthMethod::QueryParam("key".to_string(), "secret".to_string()));
    RequestBuilder::new(reqwest::Client::new(), config)
}

#[tokio::test]
async fn post_json_sends_body_and_returns_raw_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/m:generateContent"))
        .and(query_param("key", "secret"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({"hello": "world"})))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"ok\":true}"))
        .expect(1)
        .mount(&server)
        .await;

    let bytes = builder_for(&server)
        .post_json(&Endpoint::new("m:generateContent"), &json!({"hello": "world"}))
        .await
        .unwrap();

    assert_eq!(&bytes[..], b"{\"ok\":true}");
}

#[tokio::test]
async fn post_json_maps_non_success_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let err = builder_for(&server)
        .post_json(&Endpoint::new("m:generateContent"), &json!({}))
        .await
        .unwrap_err();

    match err {
        CommonRequestError::Status { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "overloaded");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn transport_errors_do_not_leak_the_credential() {
    // Nothing listens on port 9 of localhost.
    let config = RequestConfig::new("http://127.0.0.1:9/models")
        .with_auth(AuthMethod::QueryParam("key".to_string(), "top-secret".to_string()));
    let builder = RequestBuilder::new(reqwest::Client::new(), config);

    let err = builder
        .post_json(&Endpoint::new("m:generateContent"), &json!({}))
        .await
        .unwrap_err();

    assert!(matches!(err, CommonRequestError::Http(_)));
    assert!(!err.to_string().contains("top-secret"));
    assert!(!format!("{err:?}").contains("top-secret"));
}

#[tokio::test]
async fn stream_lines_yields_every_line_of_the_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/m:streamGenerateContent"))
        .and(query_param("alt", "sse"))
        .and(query_param("key", "secret"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string("data: one\r\n\r\ndata: two\n"),
        )
        .mount(&server)
        .await;

    let endpoint = Endpoint::new("m:streamGenerateContent").with_query_param("alt", "sse");
    let lines: Vec<String> = builder_for(&server)
        .stream_lines(&endpoint, &json!({}))
        .map(|line| line.unwrap())
        .collect()
        .await;

    assert_eq!(lines, vec!["data: one", "", "data: two"]);
}

#[tokio::test]
async fn stream_lines_reports_status_as_single_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
        .mount(&server)
        .await;

    let items: Vec<_> = builder_for(&server)
        .stream_lines(&Endpoint::new("m:streamGenerateContent"), &json!({}))
        .collect()
        .await;

    assert_eq!(items.len(), 1);
    assert!(matches!(
        &items[0],
        Err(CommonRequestError::Status { status: 400, .. })
    ));
}

#[tokio::test]
async fn only_200_counts_as_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201).set_body_string("data: created\n"))
        .mount(&server)
        .await;
    let builder = builder_for(&server);

    let err = builder
        .post_json(&Endpoint::new("m:generateContent"), &json!({}))
        .await
        .unwrap_err();
    assert!(matches!(err, CommonRequestError::Status { status: 201, .. }));

    let items: Vec<_> = builder
        .stream_lines(&Endpoint::new("m:streamGenerateContent"), &json!({}))
        .collect()
        .await;
    assert_eq!(items.len(), 1);
    assert!(matches!(
        &items[0],
        Err(CommonRequestError::Status { status: 201, .. })
    ));
}
