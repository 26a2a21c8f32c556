use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use brandbeat_core::BrandResult;
use brandbeat_news::NewsService;

use crate::middleware::{request_id, RequestId};

#[derive(Clone)]
pub struct AppState {
    pub news: Arc<NewsService>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub request_id: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
}

impl ApiError {
    fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            request_id: request_id.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "bad_request" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct NewsQuery {
    brand: Option<String>,
}

async fn get_brand_news(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<NewsQuery>,
) -> Result<Json<BrandResult>, ApiError> {
    let Some(brand) = query
        .brand
        .as_deref()
        .map(str::trim)
        .filter(|b| !b.is_empty())
    else {
        return Err(ApiError::new(
            req_id.0,
            "bad_request",
            "missing required query parameter: brand",
        ));
    };

    match state.news.run(brand).await {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            tracing::error!(brand, error = %e, "news pipeline failed");
            Err(ApiError::new(
                req_id.0,
                "internal_error",
                "news pipeline failed",
            ))
        }
    }
}

async fn health(Extension(_req_id): Extension<RequestId>) -> impl IntoResponse {
    (StatusCode::OK, Json(HealthData { status: "ok" }))
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static("x-request-id"),
        ])
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/news", get(get_brand_news))
        .route("/healthz", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use brandbeat_cache::CacheStore;
    use brandbeat_classify::{ClassifyClient, ClassifyConfig};
    use brandbeat_scraper::PageClient;

    fn app_with(search_url: &str, classify_url: &str, dir: &TempDir) -> Router {
        let cache = CacheStore::new(dir.path(), Duration::from_secs(60)).unwrap();
        let pages = PageClient::new(5, "brandbeat-test/0.1").unwrap();
        let classifier =
            ClassifyClient::new(ClassifyConfig::new(classify_url, "test-token")).unwrap();
        let news = Arc::new(NewsService::new(cache, pages, classifier, search_url));
        build_app(AppState { news })
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn missing_brand_is_a_400_with_json_error_body() {
        let dir = TempDir::new().unwrap();
        let app = app_with("http://127.0.0.1:9/search", "http://127.0.0.1:9/classify", &dir);

        let response = app
            .oneshot(Request::builder().uri("/news").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "bad_request");
    }

    #[tokio::test]
    async fn blank_brand_is_a_400() {
        let dir = TempDir::new().unwrap();
        let app = app_with("http://127.0.0.1:9/search", "http://127.0.0.1:9/classify", &dir);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/news?brand=%20%20")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn pipeline_failure_is_a_500_with_json_error_body() {
        let dir = TempDir::new().unwrap();
        // Nothing listens on the search address, so discovery fails.
        let app = app_with("http://127.0.0.1:9/search", "http://127.0.0.1:9/classify", &dir);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/news?brand=Acme")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "internal_error");
    }

    #[tokio::test]
    async fn happy_path_returns_brand_result_json() {
        let search = MockServer::start().await;
        let articles = MockServer::start().await;
        let classify = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string(format!(
                "<a href=\"/url?q={}/story&sa=U\">link</a>",
                articles.uri()
            )))
            .mount(&search)
            .await;

        Mock::given(method("GET"))
            .and(path("/story"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<html><head><title>Acme wins</title></head><body><p>Acme won a contract.</p></body></html>",
            ))
            .mount(&articles)
            .await;

        Mock::given(method("POST"))
            .and(path("/classify"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "labels": ["business"], "scores": [0.8] }
            ])))
            .mount(&classify)
            .await;

        let dir = TempDir::new().unwrap();
        let app = app_with(
            &format!("{}/search", search.uri()),
            &format!("{}/classify", classify.uri()),
            &dir,
        );

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/news?brand=Acme")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["brand"], "Acme");
        assert_eq!(body["articles"][0]["title"], "Acme wins");
        assert_eq!(body["articles"][0]["relevance"], "relevant");
    }

    #[tokio::test]
    async fn healthz_is_ok_and_carries_request_id_header() {
        let dir = TempDir::new().unwrap();
        let app = app_with("http://127.0.0.1:9/search", "http://127.0.0.1:9/classify", &dir);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/healthz")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }
}
