//! HTTP client for the Sanity query API

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{query, ContentStore, StoreError};
use crate::config::StoreConfig;
use crate::content::{Post, PostStub};

#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    result: T,
}

/// Talks to `https://<project>.api.sanity.io/v<version>/data/query/<dataset>`
#[derive(Clone)]
pub struct SanityClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl SanityClient {
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        if config.project_id.is_empty() {
            return Err(StoreError::Config(
                "store.project_id is empty (set it in _config.yml or SANITY_PROJECT_ID)"
                    .to_string(),
            ));
        }

        let host = if config.use_cdn && config.token.is_none() {
            "apicdn"
        } else {
            "api"
        };
        let base_url = format!(
            "https://{}.{}.sanity.io/v{}/data/query/{}",
            config.project_id,
            host,
            config.api_version.trim_start_matches('v'),
            config.dataset
        );

        Ok(Self {
            client: Client::builder().build()?,
            base_url,
            token: config.token.clone(),
        })
    }

    /// Build the request URL for a query and its `$name` parameters
    fn query_url(&self, query: &str, params: &[(&str, &str)]) -> Result<String, StoreError> {
        let mut url = format!(
            "{}?query={}",
            self.base_url,
            utf8_percent_encode(query, NON_ALPHANUMERIC)
        );
        for (name, value) in params {
            // parameter values are JSON literals
            let literal = serde_json::to_string(value)?;
            url.push_str(&format!(
                "&%24{}={}",
                name,
                utf8_percent_encode(&literal, NON_ALPHANUMERIC)
            ));
        }
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        query: &str,
        params: &[(&str, &str)],
    ) -> Result<T, StoreError> {
        let url = self.query_url(query, params)?;
        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(StoreError::Status { status, body });
        }

        let body: QueryResponse<T> = resp.json().await?;
        Ok(body.result)
    }
}

#[async_trait]
impl ContentStore for SanityClient {
    async fn post_stubs(&self) -> Result<Vec<PostStub>, StoreError> {
        self.fetch(query::POST_STUBS, &[]).await
    }

    async fn post_by_slug(&self, slug: &str) -> Result<Option<Post>, StoreError> {
        self.fetch(query::POST_BY_SLUG, &[("slug", slug)]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> StoreConfig {
        StoreConfig {
            project_id: "abc123".to_string(),
            ..StoreConfig::default()
        }
    }

    #[test]
    fn test_base_url_uses_cdn_without_token() {
        let client = SanityClient::new(&test_config()).unwrap();
        assert_eq!(
            client.base_url,
            "https://abc123.apicdn.sanity.io/v2021-10-21/data/query/production"
        );
    }

    #[test]
    fn test_base_url_uses_api_with_token() {
        let mut config = test_config();
        config.token = Some("secret".to_string());
        let client = SanityClient::new(&config).unwrap();
        assert!(client.base_url.starts_with("https://abc123.api.sanity.io/"));
    }

    #[test]
    fn test_missing_project_id() {
        let err = SanityClient::new(&StoreConfig::default()).err().unwrap();
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[test]
    fn test_query_url_encodes_params_as_json() {
        let client = SanityClient::new(&test_config()).unwrap();
        let url = client
            .query_url(r#"*[slug.current == $slug]"#, &[("slug", "my-post")])
            .unwrap();
        assert!(url.contains("&%24slug=%22my%2Dpost%22"));
        assert!(!url.contains(' '));
    }
}
