// Module: http
// HTTP/JSON REST API

pub mod error;
pub mod health;
pub mod jiexi;
pub mod maccms;
pub mod response;
pub mod vod;

use axum::Router;
use neovideo_core::bootstrap::Services;
use neovideo_core::repository::CmsSourceStore;
use neovideo_core::service::{JiexiService, VodService};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::{AppError, AppResult};
pub use response::ApiResponse;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub vod: Arc<VodService>,
    pub jiexi: Arc<JiexiService>,
    pub cms_sources: Arc<dyn CmsSourceStore>,
}

impl From<Services> for AppState {
    fn from(services: Services) -> Self {
        Self {
            vod: services.vod,
            jiexi: services.jiexi,
            cms_sources: services.cms_sources,
        }
    }
}

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health::create_health_router())
        .merge(vod::create_vod_router())
        .merge(maccms::create_maccms_router())
        .merge(jiexi::create_jiexi_router())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        // Apply state to all routes (must be last)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use neovideo_core::bootstrap::{init_services_with_factory, Stores};
    use neovideo_core::models::CmsSource;
    use neovideo_core::service::BackendFactory;
    use neovideo_core::Config;
    use neovideo_providers::{
        Category, CmsBackend, ListAttributes, ListResult, ProviderClientError, VideoSummary,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    /// Answers from canned data; the source named "down" fails.
    struct CannedFactory;

    struct CannedBackend {
        down: bool,
    }

    impl BackendFactory for CannedFactory {
        fn backend_for(
            &self,
            source: &CmsSource,
        ) -> Result<Arc<dyn CmsBackend>, ProviderClientError> {
            Ok(Arc::new(CannedBackend {
                down: source.name == "down",
            }))
        }
    }

    impl CannedBackend {
        fn listing(&self, page: u64) -> Result<ListResult, ProviderClientError> {
            if self.down {
                return Err(ProviderClientError::Network("connection refused".to_string()));
            }
            Ok(ListResult {
                attributes: ListAttributes {
                    page_count: 2,
                    page,
                    record_count: 21,
                },
                videos: vec![VideoSummary {
                    id: 4217,
                    category_id: 13,
                    name: "繁花".to_string(),
                    ..VideoSummary::default()
                }],
                categories: vec![Category {
                    id: 13,
                    name: "国产剧".to_string(),
                }],
            })
        }
    }

    #[async_trait]
    impl CmsBackend for CannedBackend {
        async fn fetch_home(&self) -> Result<ListResult, ProviderClientError> {
            self.listing(1)
        }

        async fn fetch_categories(&self) -> Result<Vec<Category>, ProviderClientError> {
            Ok(self.listing(1)?.categories)
        }

        async fn search(
            &self,
            _keyword: &str,
            page: u32,
        ) -> Result<ListResult, ProviderClientError> {
            self.listing(u64::from(page))
        }

        async fn fetch_detail(&self, id: u64) -> Result<ListResult, ProviderClientError> {
            Err(ProviderClientError::NotImplemented(format!("detail for {id}")))
        }
    }

    fn app() -> Router {
        let services = init_services_with_factory(
            Stores::in_memory(),
            Arc::new(CannedFactory),
            &Config::default(),
        );
        create_router(services.into())
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    async fn register(app: &Router, name: &str) -> i64 {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/maccms",
            Some(json!({
                "name": name,
                "api": format!("https://{name}.example.com/api.php/provide/vod"),
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["data"]["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::String("OK".to_string()));
    }

    #[tokio::test]
    async fn test_home_with_empty_registry() {
        let (status, body) = send(&app(), Method::GET, "/api/vod/home", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["message"], json!("no CMS source registered"));
    }

    #[tokio::test]
    async fn test_home_aggregate() {
        let app = app();
        register(&app, "up").await;
        register(&app, "down").await;

        let (status, body) = send(&app, Method::GET, "/api/vod/home", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));

        let items = body["data"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["name"], json!("up"));
        assert_eq!(items[0]["data"]["videos"][0]["name"], json!("繁花"));
        assert!(items[0].get("error").is_none());
        assert_eq!(items[1]["error"], json!("Network error: connection refused"));
        assert!(items[1].get("data").is_none());
    }

    #[tokio::test]
    async fn test_categories_search_and_detail() {
        let app = app();
        let id = register(&app, "up").await;

        let categories = format!("/api/vod/{id}/categories");
        let (status, body) = send(&app, Method::GET, &categories, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["name"], json!("国产剧"));

        let (status, body) = send(
            &app,
            Method::GET,
            &format!("/api/vod/{id}/search?wd=%E7%B9%81%E8%8A%B1&pg=2"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["page"], json!(2));

        let (status, body) = send(&app, Method::GET, &format!("/api/vod/{id}/search"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));

        let detail = format!("/api/vod/{id}/detail/4217");
        let (status, _) = send(&app, Method::GET, &detail, None).await;
        assert_eq!(status, StatusCode::NOT_IMPLEMENTED);

        let (status, _) = send(&app, Method::GET, "/api/vod/99/categories", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_bad_gateway() {
        let app = app();
        let id = register(&app, "down").await;
        let categories = format!("/api/vod/{id}/categories");
        let (status, body) = send(&app, Method::GET, &categories, None).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["success"], json!(false));
    }

    #[tokio::test]
    async fn test_maccms_crud() {
        let app = app();
        let id = register(&app, "lzi").await;

        let (_, body) = send(&app, Method::GET, "/api/maccms", None).await;
        assert_eq!(body["data"][0]["resp_type"], json!("json"));

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/maccms",
            Some(json!({"name": "bad", "api": "not a url"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));

        let (status, body) = send(&app, Method::DELETE, &format!("/api/maccms/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!(id));

        let (status, _) = send(&app, Method::DELETE, &format!("/api/maccms/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_jiexi_batch_import() {
        let app = app();

        let import = "/api/jiexi/batch_import";
        let (status, body) = send(&app, Method::POST, import, Some(json!({"data": ""}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"success": false, "message": "nothing to import"}));

        let (_, body) = send(
            &app,
            Method::POST,
            import,
            Some(json!({"data": "no proxies here"})),
        )
        .await;
        assert_eq!(body["success"], json!(false));

        let raw = "虾米： https://jx.xmflv.com/?url=\nhttps://jx.m3u8.tv/jiexi/?url=";
        let (status, body) = send(&app, Method::POST, import, Some(json!({"data": raw}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"success": true, "message": "imported 2 record(s)", "data": 2})
        );

        let (_, body) = send(&app, Method::GET, "/api/jiexi", None).await;
        let records = body["data"].as_array().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["name"], json!("虾米"));
        assert!(records[1]["name"].is_null());
    }

    #[tokio::test]
    async fn test_jiexi_create_and_delete() {
        let app = app();

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/jiexi",
            Some(json!({"name": "夜幕", "url": "https://www.yemu.xyz/?url="})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let id = body["data"]["id"].as_i64().unwrap();

        let missing_url = json!({"name": "no url"});
        let (status, _) = send(&app, Method::POST, "/api/jiexi", Some(missing_url)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, body) = send(&app, Method::DELETE, &format!("/api/jiexi/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], json!("deleted"));
    }
}
