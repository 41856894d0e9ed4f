//! HTTP surface tests: request parsing and response shapes.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use search_service::autoupdate::{AutoupdateError, AutoupdatePort};
use search_service::http::{router, AppState};
use search_service::orchestrator::SearchOrchestrator;
use search_service_repository::{SearchStore, SearchStoreError};
use search_service_shared::{
    CollectionIndexSpec, Fqid, IndexRegistry, MatchedDocument, SearchExpression, SearchResult,
};

/// Store answering every query with no matches.
struct EmptyStore;

#[async_trait]
impl SearchStore for EmptyStore {
    async fn ensure_search_column(&self, _collection: &str) -> Result<(), SearchStoreError> {
        Ok(())
    }

    async fn provision_index(
        &self,
        _collection: &str,
        _fields: &[String],
    ) -> Result<(), SearchStoreError> {
        Ok(())
    }

    async fn provision_trigger(
        &self,
        _collection: &str,
        _fields: &[String],
    ) -> Result<(), SearchStoreError> {
        Ok(())
    }

    async fn query(
        &self,
        _collection: &str,
        _expression: &SearchExpression,
    ) -> Result<Vec<MatchedDocument>, SearchStoreError> {
        Ok(Vec::new())
    }

    async fn list_fqids(&self) -> Result<Vec<Fqid>, SearchStoreError> {
        Ok(Vec::new())
    }
}

/// Autoupdate port answering with a fixed payload.
struct StaticAutoupdate;

#[async_trait]
impl AutoupdatePort for StaticAutoupdate {
    async fn request(&self, _results: &[SearchResult]) -> Result<Value, AutoupdateError> {
        Ok(json!({}))
    }
}

fn test_router() -> axum::Router {
    let mut registry = IndexRegistry::new();
    registry
        .register(CollectionIndexSpec::new("topic", ["text", "title"]).unwrap())
        .unwrap();
    registry
        .register(CollectionIndexSpec::new("motion_block", ["title", "internal"]).unwrap())
        .unwrap();

    let orchestrator = Arc::new(SearchOrchestrator::new(
        Arc::new(EmptyStore),
        Arc::new(registry),
        Arc::new(StaticAutoupdate),
    ));
    router(AppState { orchestrator })
}

fn post_search(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/system/search")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_probe_answers() {
    let request = Request::builder()
        .method("GET")
        .uri("/system/search")
        .body(Body::empty())
        .unwrap();

    let response = test_router().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn search_returns_registry_shaped_results() {
    let response = test_router()
        .oneshot(post_search(json!({ "query": "hello" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({
            "results": [
                { "collection": "topic", "ids": [], "fields": { "text": null, "title": null } },
                { "collection": "motion_block", "ids": [], "fields": { "internal": null, "title": null } }
            ],
            "failures": [],
            "autoupdate": {}
        })
    );
}

#[tokio::test]
async fn rejects_empty_query() {
    let response = test_router()
        .oneshot(post_search(json!({ "query": "" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn rejects_unsearchable_query() {
    let response = test_router()
        .oneshot(post_search(json!({ "query": "  ()|&  " })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_query_field_is_a_client_error() {
    let response = test_router()
        .oneshot(post_search(json!({ "collections": ["topic"] })))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}
