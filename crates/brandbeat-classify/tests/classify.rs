//! Integration tests for `ClassifyClient::classify_batch` against a
//! `wiremock` stand-in for the hosted classification endpoint.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use brandbeat_classify::{ClassifyClient, ClassifyConfig};
use brandbeat_core::Relevance;

fn test_client(endpoint: &str) -> ClassifyClient {
    ClassifyClient::new(ClassifyConfig::new(endpoint, "test-token"))
        .expect("failed to build test ClassifyClient")
}

#[tokio::test]
async fn batch_verdicts_align_with_inputs() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/classify"))
        .and(header("authorization", "Bearer test-token"))
        .and(body_partial_json(json!({
            "inputs": ["acme earnings beat estimates", "local cat wins award"],
            "parameters": { "candidate_labels": [
                "business", "finance", "economy", "earnings", "stock", "unrelated"
            ]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "labels": ["earnings", "business", "unrelated"], "scores": [0.81, 0.12, 0.02] },
            { "labels": ["unrelated", "business"], "scores": [0.92, 0.05] }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&format!("{}/classify", server.uri()));
    let verdicts = client
        .classify_batch(&["acme earnings beat estimates", "local cat wins award"])
        .await;

    assert_eq!(verdicts, vec![Relevance::Relevant, Relevance::NotRelevant]);
}

#[tokio::test]
async fn endpoint_failure_marks_whole_batch_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let verdicts = client.classify_batch(&["a", "b", "c"]).await;
    assert_eq!(verdicts, vec![Relevance::Unknown; 3]);
}

#[tokio::test]
async fn malformed_body_marks_whole_batch_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let verdicts = client.classify_batch(&["a", "b"]).await;
    assert_eq!(verdicts, vec![Relevance::Unknown; 2]);
}

#[tokio::test]
async fn length_mismatch_marks_whole_batch_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "labels": ["business"], "scores": [0.9] }
        ])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let verdicts = client.classify_batch(&["a", "b"]).await;
    assert_eq!(verdicts, vec![Relevance::Unknown; 2]);
}

#[tokio::test]
async fn empty_batch_issues_no_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let verdicts = client.classify_batch(&[]).await;
    assert!(verdicts.is_empty());
}

#[tokio::test]
async fn transport_failure_marks_whole_batch_unknown() {
    let client = test_client("http://127.0.0.1:9/classify");
    let verdicts = client.classify_batch(&["a"]).await;
    assert_eq!(verdicts, vec![Relevance::Unknown]);
}
