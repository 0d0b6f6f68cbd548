use crate::http::http_client::{HttpClient, HttpResponse, Method, Options};
use crate::settings::AppConfig;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("okta-request/", env!("CARGO_PKG_VERSION"));

/// A reqwest backed [`HttpClient`] for a single Okta org.
///
/// Endpoints are resolved against the org url, every request carries `Accept: application/json`
/// and, when an API token is configured, `Authorization: SSWS <token>`.
pub struct ApiClient {
    http_client: Client,
    base_url: Url,
    default_timeout: Option<Duration>,
}

impl ApiClient {
    pub fn new(org_url: &str, api_token: Option<String>) -> Result<ApiClient> {
        let mut base_url = Url::parse(org_url)?;
        base_url.set_query(None);
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(path.as_str());
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(token) = api_token {
            let mut value = HeaderValue::from_str(format!("SSWS {}", token).as_str())?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let http_client = Client::builder()
            .cookie_store(true)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(ApiClient {
            http_client,
            base_url,
            default_timeout: None,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<ApiClient> {
        let mut client = ApiClient::new(config.org_url()?.as_str(), config.api_token())?;
        client.default_timeout = config.timeout().and_then(timeout_duration);

        Ok(client)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn resolve(&self, path: &str) -> Result<Url> {
        let url = self.base_url.join(path)?;

        Ok(url)
    }

    fn timeout(&self, options: &Options) -> Result<Option<Duration>> {
        match options.get("timeout") {
            None => Ok(self.default_timeout),
            Some(value) => {
                let seconds = value
                    .as_f64()
                    .filter(|seconds| seconds.is_finite() && *seconds >= 0.0)
                    .ok_or_else(|| anyhow!("invalid timeout option: {}", value))?;
                Ok(timeout_duration(seconds))
            }
        }
    }
}

#[async_trait]
impl HttpClient for ApiClient {
    async fn request(&self, method: Method, path: &str, options: &Options) -> Result<HttpResponse> {
        let mut url = self.resolve(path)?;
        if let Some(query) = options.get("query") {
            append_query(&mut url, query)?;
        }

        log::debug!("{} {}", method, url);

        let mut request = self
            .http_client
            .request(reqwest::Method::from(method), url);

        if let Some(timeout) = self.timeout(options)? {
            request = request.timeout(timeout);
        }

        for (key, value) in options {
            match key.as_str() {
                "query" | "timeout" => {}
                "json" => request = request.json(value),
                "headers" => request = request.headers(header_map(value)?),
                _ => log::debug!("ignoring unsupported request option {}", key),
            }
        }

        let response = request.send().await?;
        let status_code = response.status().as_u16();
        let body = response.text().await?;

        log::debug!("{} {} -> {}", method, path, status_code);

        Ok(HttpResponse::new(status_code, body))
    }
}

/// `0` and values too large for a [`Duration`] both mean no timeout.
fn timeout_duration(seconds: f64) -> Option<Duration> {
    if seconds <= 0.0 {
        return None;
    }

    Duration::try_from_secs_f64(seconds).ok()
}

fn append_query(url: &mut Url, query: &Value) -> Result<()> {
    let params = query
        .as_object()
        .ok_or_else(|| anyhow!("the query option must be an object"))?;

    let mut pairs: Vec<(String, String)> = vec![];
    for (key, value) in params {
        match value {
            Value::Array(values) => {
                for value in values {
                    if let Some(value) = query_value(value) {
                        pairs.push((key.clone(), value));
                    }
                }
            }
            value => {
                if let Some(value) = query_value(value) {
                    pairs.push((key.clone(), value));
                }
            }
        }
    }

    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(pairs);
    }

    Ok(())
}

fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(value) => Some(value.clone()),
        value => Some(value.to_string()),
    }
}

fn header_map(headers: &Value) -> Result<HeaderMap> {
    let headers = headers
        .as_object()
        .ok_or_else(|| anyhow!("the headers option must be an object"))?;

    let mut header_map = HeaderMap::new();
    for (key, value) in headers {
        let value = match value {
            Value::String(value) => value.clone(),
            value => value.to_string(),
        };
        let header_key = HeaderName::from_bytes(key.as_bytes())?;
        let header_value = HeaderValue::from_str(value.as_str())?;
        header_map.insert(header_key, header_value);
    }

    Ok(header_map)
}
