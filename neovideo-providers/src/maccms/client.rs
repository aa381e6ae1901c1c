//! MacCMS HTTP Client

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::decode::decode_body;
use super::types::ResponseFormat;
use crate::backend::CmsBackend;
use crate::error::{bytes_with_limit, check_response, ProviderClientError};
use crate::model::{Category, ListResult};

/// Query parameter carrying the search keyword.
const KEYWORD_PARAM: &str = "wd";
/// Query parameter carrying the 1-based page number.
const PAGE_PARAM: &str = "pg";

/// Client for one MacCMS `provide/vod` endpoint.
#[derive(Debug, Clone)]
pub struct MaccmsClient {
    api: String,
    format: ResponseFormat,
    client: Client,
}

impl MaccmsClient {
    /// Create a client for `api` using the given (pooled) HTTP client.
    pub fn new(
        api: impl Into<String>,
        format: ResponseFormat,
        client: Client,
    ) -> Result<Self, ProviderClientError> {
        let api = api.into();
        let parsed = url::Url::parse(&api)
            .map_err(|e| {
                ProviderClientError::InvalidConfig(format!("invalid api url '{api}': {e}"))
            })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ProviderClientError::InvalidConfig(format!(
                "unsupported scheme '{}' in api url",
                parsed.scheme()
            )));
        }

        Ok(Self { api, format, client })
    }

    /// Create a client from a stored response-format tag.
    pub fn from_tag(
        api: impl Into<String>,
        tag: &str,
        client: Client,
    ) -> Result<Self, ProviderClientError> {
        Self::new(api, tag.parse()?, client)
    }

    /// GET the endpoint and decode the body into the canonical model.
    async fn get_list(&self, query: &[(&str, String)]) -> Result<ListResult, ProviderClientError> {
        if self.format != ResponseFormat::Json {
            return Err(ProviderClientError::UnsupportedFormat(self.format.to_string()));
        }

        debug!(api = %self.api, ?query, "Requesting MacCMS list");

        let mut request = self.client.get(&self.api);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request.send().await?;
        let response = check_response(response)?;
        let body = bytes_with_limit(response).await?;
        decode_body(&body)
    }
}

#[async_trait]
impl CmsBackend for MaccmsClient {
    async fn fetch_home(&self) -> Result<ListResult, ProviderClientError> {
        self.get_list(&[]).await
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, ProviderClientError> {
        Ok(self.get_list(&[]).await?.categories)
    }

    async fn search(&self, keyword: &str, page: u32) -> Result<ListResult, ProviderClientError> {
        self.get_list(&[
            (KEYWORD_PARAM, keyword.to_string()),
            (PAGE_PARAM, page.to_string()),
        ])
        .await
    }

    async fn fetch_detail(&self, id: u64) -> Result<ListResult, ProviderClientError> {
        Err(ProviderClientError::NotImplemented(format!(
            "MacCMS detail lookup (vod {id})"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const VOD_PATH: &str = "/api.php/provide/vod";

    fn home_payload() -> serde_json::Value {
        json!({
            "code": 1,
            "page": 1,
            "pagecount": 3,
            "total": 41,
            "list": [
                {"vod_id": 10, "type_id": 1, "vod_name": "三体", "vod_time": "2024-02-01 10:00:00"}
            ],
            "class": [
                {"type_id": 1, "type_name": "电影"},
                {"type_id": 2, "type_name": "连续剧"}
            ]
        })
    }

    fn client_for(server: &MockServer, format: ResponseFormat) -> MaccmsClient {
        MaccmsClient::new(format!("{}{VOD_PATH}", server.uri()), format, Client::new()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_home() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(VOD_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(home_payload()))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, ResponseFormat::Json);
        let home = client.fetch_home().await.unwrap();

        assert_eq!(home.attributes.page_count, 3);
        assert_eq!(home.attributes.record_count, 41);
        assert_eq!(home.videos.len(), 1);
        assert_eq!(home.videos[0].name, "三体");
        assert_eq!(home.categories.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_categories() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(VOD_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(home_payload()))
            .mount(&server)
            .await;

        let client = client_for(&server, ResponseFormat::Json);
        let categories = client.fetch_categories().await.unwrap();

        assert_eq!(
            categories,
            vec![
                Category { id: 1, name: "电影".to_string() },
                Category { id: 2, name: "连续剧".to_string() },
            ]
        );
    }

    #[tokio::test]
    async fn test_search_sends_keyword_and_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(VOD_PATH))
            .and(query_param("wd", "三体"))
            .and(query_param("pg", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": 2,
                "pagecount": 2,
                "total": 21,
                "list": [{"vod_id": 11, "vod_name": "三体 第二部"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, ResponseFormat::Json);
        let result = client.search("三体", 2).await.unwrap();

        assert_eq!(result.attributes.page, 2);
        assert_eq!(result.videos[0].id, 11);
    }

    #[tokio::test]
    async fn test_invalid_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(VOD_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let client = client_for(&server, ResponseFormat::Json);
        let err = client.fetch_home().await.unwrap_err();
        assert!(matches!(err, ProviderClientError::Decode(_)));
        assert!(!err.is_transport());
    }

    #[tokio::test]
    async fn test_server_error_is_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(VOD_PATH))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let client = client_for(&server, ResponseFormat::Json);
        let err = client.fetch_home().await.unwrap_err();
        assert!(matches!(
            err,
            ProviderClientError::Http { status, .. } if status == reqwest::StatusCode::BAD_GATEWAY
        ));
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_xml_source_is_not_requested() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server, ResponseFormat::Xml);
        let err = client.fetch_home().await.unwrap_err();
        assert!(matches!(err, ProviderClientError::UnsupportedFormat(ref f) if f == "xml"));
    }

    #[tokio::test]
    async fn test_fetch_detail_is_not_implemented() {
        let client = MaccmsClient::new(
            "https://cms.example.com/api.php/provide/vod",
            ResponseFormat::Json,
            Client::new(),
        )
        .unwrap();
        let err = client.fetch_detail(1).await.unwrap_err();
        assert!(matches!(err, ProviderClientError::NotImplemented(_)));
    }

    #[test]
    fn test_rejects_invalid_api_url() {
        assert!(matches!(
            MaccmsClient::new("not a url", ResponseFormat::Json, Client::new()),
            Err(ProviderClientError::InvalidConfig(_))
        ));
        assert!(matches!(
            MaccmsClient::new("ftp://cms.example.com/vod", ResponseFormat::Json, Client::new()),
            Err(ProviderClientError::InvalidConfig(_))
        ));
        assert!(matches!(
            MaccmsClient::from_tag("https://cms.example.com/vod", "csv", Client::new()),
            Err(ProviderClientError::InvalidConfig(_))
        ));
    }
}
