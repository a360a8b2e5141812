use actix_web::{test, web, App};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use creditmeter_ingestion::errors::IngestionError;
use creditmeter_ingestion::handlers;
use creditmeter_ingestion::models::AppState;
use creditmeter_ingestion::services::{
    EmbeddingClient, IngestionPipeline, VectorStoreClient, WebhookClient,
};
use creditmeter_models::ingestion::{IngestContentRequest, WebhookNotification};

/// Responds to an embeddings request with one vector per input item, so
/// mocks stay in step with whatever batch size the client sends.
struct EchoEmbeddings;

impl Respond for EchoEmbeddings {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        let count = body["input"].as_array().map(|a| a.len()).unwrap_or(0);
        let data: Vec<serde_json::Value> = (0..count)
            .map(|i| serde_json::json!({"embedding": [i as f64, 1.0], "index": i}))
            .collect();
        ResponseTemplate::new(200)
            .set_body_json(serde_json::json!({"object": "list", "data": data}))
    }
}

/// Like `EchoEmbeddings` but lists the items in reverse order, as the API
/// is allowed to do.
struct ReversedEmbeddings;

impl Respond for ReversedEmbeddings {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        let count = body["input"].as_array().map(|a| a.len()).unwrap_or(0);
        let data: Vec<serde_json::Value> = (0..count)
            .rev()
            .map(|i| serde_json::json!({"embedding": [i as f64], "index": i}))
            .collect();
        ResponseTemplate::new(200)
            .set_body_json(serde_json::json!({"object": "list", "data": data}))
    }
}

fn words(count: usize) -> String {
    (1..=count)
        .map(|i| format!("word{}", i))
        .collect::<Vec<_>>()
        .join(" ")
}

fn request_for(
    content: &str,
    word_limit: usize,
    vector_server: &MockServer,
    webhook_server: &MockServer,
) -> IngestContentRequest {
    IngestContentRequest {
        content: content.to_string(),
        word_limit,
        unique_id: "job-1".to_string(),
        pinecone_url: vector_server.uri(),
        pinecone_api_key: "pinecone-key".to_string(),
        openai_api_key: "sk-test".to_string(),
        namespace: "ns".to_string(),
        webhook_url: format!("{}/hook", webhook_server.uri()),
        category: None,
    }
}

fn pipeline_for(embed_server: &MockServer) -> IngestionPipeline {
    IngestionPipeline::new(
        EmbeddingClient::with_base_url(embed_server.uri()),
        VectorStoreClient::new(),
        WebhookClient::new(),
    )
}

#[tokio::test]
async fn test_pipeline_embeds_upserts_and_notifies() {
    let embed_server = MockServer::start().await;
    let vector_server = MockServer::start().await;
    let webhook_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .and(header("Authorization", "Bearer sk-test"))
        .respond_with(EchoEmbeddings)
        .expect(1)
        .mount(&embed_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/vectors/upsert"))
        .and(header("Api-Key", "pinecone-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "upsertedCount": 3
        })))
        .expect(1)
        .mount(&vector_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&webhook_server)
        .await;

    // 250 words with a 100 word limit make chunks of 100, 100 and 50.
    let mut request = request_for(&words(250), 100, &vector_server, &webhook_server);
    request.category = Some("docs".to_string());

    pipeline_for(&embed_server).run(request).await.unwrap();

    // The stored vectors carry the chunk text and job metadata.
    let upsert_requests = vector_server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&upsert_requests[0].body).unwrap();
    assert_eq!(body["namespace"], "ns");
    let vectors = body["vectors"].as_array().unwrap();
    assert_eq!(vectors.len(), 3);
    for vector in vectors {
        let id = vector["id"].as_str().unwrap();
        assert_eq!(id.len(), 32);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(vector["metadata"]["memoryID"], "job-1");
        assert_eq!(vector["metadata"]["category"], "docs");
    }
    assert!(vectors[0]["metadata"]["content"]
        .as_str()
        .unwrap()
        .starts_with("word1 "));
    assert_eq!(
        vectors[2]["metadata"]["content"]
            .as_str()
            .unwrap()
            .split_whitespace()
            .count(),
        50
    );

    // One notification for the single batch, echoing ids and the job id.
    let webhook_requests = webhook_server.received_requests().await.unwrap();
    let notification: WebhookNotification =
        serde_json::from_slice(&webhook_requests[0].body).unwrap();
    assert_eq!(notification.processed, 3);
    assert_eq!(notification.total, 3);
    assert_eq!(notification.unique_id, "job-1");
    assert_eq!(notification.unique_ids.len(), 3);
    let stored_ids: Vec<&str> = vectors
        .iter()
        .map(|v| v["id"].as_str().unwrap())
        .collect();
    assert_eq!(notification.unique_ids, stored_ids);
}

#[tokio::test]
async fn test_pipeline_partitions_into_hundred_vector_batches() {
    let embed_server = MockServer::start().await;
    let vector_server = MockServer::start().await;
    let webhook_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(EchoEmbeddings)
        .expect(3)
        .mount(&embed_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/vectors/upsert"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(3)
        .mount(&vector_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(200))
        .expect(3)
        .mount(&webhook_server)
        .await;

    // A word limit of 1 turns 250 words into 250 chunks.
    let request = request_for(&words(250), 1, &vector_server, &webhook_server);
    pipeline_for(&embed_server).run(request).await.unwrap();

    let webhook_requests = webhook_server.received_requests().await.unwrap();
    let notifications: Vec<WebhookNotification> = webhook_requests
        .iter()
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect();

    assert_eq!(notifications.len(), 3);
    let processed: Vec<usize> = notifications.iter().map(|n| n.processed).collect();
    assert_eq!(processed, vec![100, 100, 50]);
    for notification in &notifications {
        assert_eq!(notification.total, 250);
        assert_eq!(notification.unique_ids.len(), notification.processed);
    }
}

#[tokio::test]
async fn test_pipeline_restores_embedding_order() {
    let embed_server = MockServer::start().await;
    let vector_server = MockServer::start().await;
    let webhook_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ReversedEmbeddings)
        .mount(&embed_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/vectors/upsert"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&vector_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&webhook_server)
        .await;

    let request = request_for("alpha beta gamma", 1, &vector_server, &webhook_server);
    pipeline_for(&embed_server).run(request).await.unwrap();

    // Chunk i must end up with the embedding the API labeled index i.
    let upsert_requests = vector_server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&upsert_requests[0].body).unwrap();
    let vectors = body["vectors"].as_array().unwrap();
    for (i, expected) in ["alpha", "beta", "gamma"].iter().enumerate() {
        assert_eq!(vectors[i]["metadata"]["content"], *expected);
        assert_eq!(vectors[i]["values"][0], i as f64);
    }
}

#[tokio::test]
async fn test_embedding_failure_aborts_before_upsert() {
    let embed_server = MockServer::start().await;
    let vector_server = MockServer::start().await;
    let webhook_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&embed_server)
        .await;

    let request = request_for(&words(10), 5, &vector_server, &webhook_server);
    let err = pipeline_for(&embed_server).run(request).await.unwrap_err();

    assert!(matches!(
        err,
        IngestionError::EmbeddingApi { status: 500, .. }
    ));
    assert!(err.to_string().contains("OpenAI API request failed"));
    assert!(vector_server.received_requests().await.unwrap().is_empty());
    assert!(webhook_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_webhook_rejection_fails_job_after_vectors_stored() {
    let embed_server = MockServer::start().await;
    let vector_server = MockServer::start().await;
    let webhook_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(EchoEmbeddings)
        .mount(&embed_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/vectors/upsert"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&vector_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&webhook_server)
        .await;

    let request = request_for(&words(10), 5, &vector_server, &webhook_server);
    let err = pipeline_for(&embed_server).run(request).await.unwrap_err();

    // The vectors stay stored; only the notification protocol failed.
    assert!(matches!(err, IngestionError::WebhookFailed { status: 500 }));
    assert_eq!(
        err.to_string(),
        "Webhook trigger failed with status code: 500"
    );
    assert_eq!(vector_server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_empty_content_completes_without_calls() {
    let embed_server = MockServer::start().await;
    let vector_server = MockServer::start().await;
    let webhook_server = MockServer::start().await;

    let request = request_for("   \n\t ", 10, &vector_server, &webhook_server);
    pipeline_for(&embed_server).run(request).await.unwrap();

    assert!(embed_server.received_requests().await.unwrap().is_empty());
    assert!(vector_server.received_requests().await.unwrap().is_empty());
    assert!(webhook_server.received_requests().await.unwrap().is_empty());
}

fn app_state(embed_server: &MockServer) -> Arc<AppState> {
    Arc::new(AppState {
        embedding_client: EmbeddingClient::with_base_url(embed_server.uri()),
        vector_client: VectorStoreClient::new(),
        webhook_client: WebhookClient::new(),
    })
}

#[actix_web::test]
async fn test_upsert_endpoint_returns_immediately_then_notifies() {
    let embed_server = MockServer::start().await;
    let vector_server = MockServer::start().await;
    let webhook_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(EchoEmbeddings)
        .mount(&embed_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/vectors/upsert"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&vector_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/hook"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&webhook_server)
        .await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state(&embed_server)))
            .configure(handlers::ingest::configure_ingestion_routes),
    )
    .await;

    let request = request_for(&words(250), 100, &vector_server, &webhook_server);
    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/upsert")
            .set_json(&request)
            .to_request(),
    )
    .await;

    assert!(response.status().is_success());
    let body: serde_json::Value = test::read_body_json(response).await;
    assert_eq!(body["status"], "processing started");
    assert_eq!(body["numTokens"], 250);

    // The job keeps running after the response; wait for its notification.
    let mut notified = 0;
    for _ in 0..50 {
        tokio::time::sleep(Duration::from_millis(100)).await;
        notified = webhook_server.received_requests().await.unwrap().len();
        if notified > 0 {
            break;
        }
    }
    assert_eq!(notified, 1);
}

#[actix_web::test]
async fn test_upsert_endpoint_rejects_zero_word_limit() {
    let embed_server = MockServer::start().await;
    let vector_server = MockServer::start().await;
    let webhook_server = MockServer::start().await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state(&embed_server)))
            .configure(handlers::ingest::configure_ingestion_routes),
    )
    .await;

    let request = request_for(&words(10), 0, &vector_server, &webhook_server);
    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/upsert")
            .set_json(&request)
            .to_request(),
    )
    .await;

    assert_eq!(response.status().as_u16(), 400);

    // No job was spawned for the rejected request.
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(embed_server.received_requests().await.unwrap().is_empty());
    assert!(webhook_server.received_requests().await.unwrap().is_empty());
}

#[actix_web::test]
async fn test_upsert_endpoint_rejects_missing_fields() {
    let embed_server = MockServer::start().await;

    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(app_state(&embed_server)))
            .configure(handlers::ingest::configure_ingestion_routes),
    )
    .await;

    // wordLimit is absent
    let response = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/upsert")
            .set_json(serde_json::json!({
                "content": "some words",
                "uniqueID": "job-1",
                "pineconeURL": "http://localhost:1",
                "pineconeAPIkey": "pk",
                "openAIAPIkey": "sk",
                "namespace": "ns",
                "webhookURL": "http://localhost:1/hook"
            }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status().as_u16(), 400);
}
