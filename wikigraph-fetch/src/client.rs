use crate::config::ClientConfig;
use crate::error::Result;
use crate::params::QueryParams;
use crate::response::ApiResponse;
use reqwest::Client;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Thin wrapper around a `reqwest::Client` bound to one MediaWiki `api.php` endpoint.
pub struct WikiClient {
    client: Client,
    config: ClientConfig,
}

impl WikiClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.timeout_secs.div_ceil(2)))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client, config })
    }

    /// Issue one GET against the API. Non-2xx responses are returned, not raised;
    /// only transport failures and undecodable success bodies are errors.
    pub async fn query(&self, params: &QueryParams) -> Result<ApiResponse> {
        debug!("api_url: {}", self.config.api_url);
        debug!("url_params: {:?}", params.pairs());

        let start = Instant::now();
        let response = self
            .client
            .get(self.config.api_url.clone())
            .query(params.pairs())
            .send()
            .await?;

        let status_code = response.status().as_u16();
        let text = response.text().await?;
        debug!("res_code: {} ({:?})", status_code, start.elapsed());

        let body = if (200..300).contains(&status_code) {
            serde_json::from_str(&text)?
        } else {
            serde_json::from_str(&text).unwrap_or_else(|e| {
                warn!("Non-JSON body with status {}: {}", status_code, e);
                Value::Null
            })
        };

        Ok(ApiResponse::new(status_code, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    fn client_for(server: &MockServer) -> WikiClient {
        let config =
            ClientConfig::for_endpoint(&format!("{}/w/api.php", server.uri())).unwrap();
        WikiClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn test_query_sends_params_and_decodes_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/w/api.php"))
            .and(query_param("format", "json"))
            .and(query_param("action", "query"))
            .and(query_param("prop", "revisions"))
            .and(query_param("titles", "Rust"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "query": {"pages": {"1": {"title": "Rust", "revisions": [{"*": "[[Cargo]]"}]}}}
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let response = client.query(&QueryParams::revisions("Rust")).await.unwrap();

        assert_eq!(response.status_code, 200);
        assert!(response.is_success());
        assert_eq!(
            response.body["query"]["pages"]["1"]["revisions"][0]["*"],
            "[[Cargo]]"
        );
    }

    #[tokio::test]
    async fn test_joined_titles_reach_the_server() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(query_param("titles", "A|B|C"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"query": {"pages": {}}})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let response = client
            .query(&QueryParams::info(&["A", "B", "C"]))
            .await
            .unwrap();

        assert!(response.is_success());
    }

    #[tokio::test]
    async fn test_error_status_is_returned_not_raised() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("<html>busy</html>"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let response = client.query(&QueryParams::revisions("Rust")).await.unwrap();

        assert_eq!(response.status_code, 503);
        assert!(!response.is_success());
        assert!(response.body.is_null());
    }

    #[tokio::test]
    async fn test_garbage_success_body_is_a_parse_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server);
        let result = client.query(&QueryParams::revisions("Rust")).await;

        assert!(matches!(result, Err(FetchError::ParseError(_))));
    }
}
