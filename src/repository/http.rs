//! Thin HTTP wrapper over the backend REST API: verbs, JSON bodies, and
//! status-to-error mapping. No retries and no auth beyond what the client
//! is globally configured with.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::repository::errors::{RepositoryError, RepositoryResult};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Shape of a backend error body, when it sends one.
#[derive(serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Clone)]
pub struct HttpApi {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpApi {
    /// Builds a client against `base_url`, e.g. `http://localhost:3000/api`.
    pub fn new(base_url: &str) -> RepositoryResult<Self> {
        let mut base_url = Url::parse(base_url)?;
        // A trailing slash makes relative joins behave uniformly.
        if !base_url.path().ends_with('/') {
            base_url.set_path(&format!("{}/", base_url.path()));
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| RepositoryError::Unexpected(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { http, base_url })
    }

    fn url(&self, path: &str) -> RepositoryResult<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> RepositoryResult<T> {
        let url = self.url(path)?;
        log::debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        Self::handle_response(resp).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> RepositoryResult<T> {
        let url = self.url(path)?;
        log::debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        Self::handle_response(resp).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> RepositoryResult<T> {
        let url = self.url(path)?;
        log::debug!("PUT {url}");

        let resp = self.http.put(url).json(body).send().await?;
        Self::handle_response(resp).await
    }

    pub async fn delete(&self, path: &str) -> RepositoryResult<()> {
        let url = self.url(path)?;
        log::debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        Self::handle_empty(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> RepositoryResult<T> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                // Truncate on a char boundary; backend text is Portuguese.
                let preview: String = body.chars().take(200).collect();
                RepositoryError::Deserialization(format!("{e} (body preview: {preview:?})"))
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn handle_empty(resp: reqwest::Response) -> RepositoryResult<()> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> RepositoryError {
        if status == reqwest::StatusCode::NOT_FOUND {
            return RepositoryError::NotFound;
        }

        let raw = resp.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorBody>(&raw)
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                }
            });

        RepositoryError::Backend {
            status: status.as_u16(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let api = HttpApi::new("http://localhost:3000/api").unwrap();
        assert_eq!(
            api.url("clients").unwrap().as_str(),
            "http://localhost:3000/api/clients"
        );
    }

    #[test]
    fn leading_slash_in_path_is_tolerated() {
        let api = HttpApi::new("http://localhost:3000/api/").unwrap();
        assert_eq!(
            api.url("/clients/42/allocations").unwrap().as_str(),
            "http://localhost:3000/api/clients/42/allocations"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(HttpApi::new("not a url").is_err());
    }
}
