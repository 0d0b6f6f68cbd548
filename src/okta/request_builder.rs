use crate::error::{ApiError, RequestError, Result};
use crate::http::http_client::{HttpClient, Method, Options};
use crate::okta::api_responses::Payload;
use serde::de::DeserializeOwned;
use serde_json::Value;

const SUCCESS_STATUSES: [u16; 7] = [200, 201, 202, 203, 204, 205, 206];

/// Collects the pieces of a single Okta API call and performs it.
///
/// ```no_run
/// # async fn run(client: &okta_request::ApiClient) -> okta_request::error::Result<()> {
/// use okta_request::RequestBuilder;
/// use serde_json::json;
///
/// let users = RequestBuilder::new(client)
///     .get("/api/v1/users")
///     .query(json!({"limit": 25}), false)
///     .send()
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct RequestBuilder<'a> {
    http_client: &'a dyn HttpClient,
    method: Option<Method>,
    endpoint: Option<String>,
    options: Options,
    return_as_mapping: bool,
}

impl<'a> RequestBuilder<'a> {
    /// Returns a new [`RequestBuilder`] bound to an already configured client.
    pub fn new(http_client: &'a dyn HttpClient) -> RequestBuilder<'a> {
        RequestBuilder {
            http_client,
            method: None,
            endpoint: None,
            options: Options::new(),
            return_as_mapping: false,
        }
    }

    /// Sets the HTTP verb from its name. Only GET, POST, PUT and DELETE are accepted.
    pub fn method(&mut self, name: &str) -> Result<&mut Self> {
        let method = name
            .parse::<Method>()
            .map_err(RequestError::InvalidArgument)?;
        self.method = Some(method);

        Ok(self)
    }

    /// Sets the HTTP verb from a typed [`Method`], which cannot fail.
    pub fn with_method(&mut self, method: Method) -> &mut Self {
        self.method = Some(method);
        self
    }

    /// Sets the path, relative to the client's base url or absolute. Used verbatim.
    pub fn endpoint(&mut self, path: impl Into<String>) -> &mut Self {
        self.endpoint = Some(path.into());
        self
    }

    /// Shorthand for `with_method(Method::Get).endpoint(path)`.
    pub fn get(&mut self, path: impl Into<String>) -> &mut Self {
        self.with_method(Method::Get).endpoint(path)
    }

    pub fn post(&mut self, path: impl Into<String>) -> &mut Self {
        self.with_method(Method::Post).endpoint(path)
    }

    pub fn put(&mut self, path: impl Into<String>) -> &mut Self {
        self.with_method(Method::Put).endpoint(path)
    }

    pub fn delete(&mut self, path: impl Into<String>) -> &mut Self {
        self.with_method(Method::Delete).endpoint(path)
    }

    /// Sets a raw option, replacing any previous value for `key`.
    pub fn option(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
        self.options.insert(key.into(), value);
        self
    }

    /// Adds query string parameters. With `replace` the previous parameters are dropped.
    pub fn query(&mut self, params: Value, replace: bool) -> &mut Self {
        self.merge_option("query", params, replace);
        self
    }

    /// Adds to the JSON request body. With `replace` the previous body is dropped.
    pub fn json(&mut self, data: Value, replace: bool) -> &mut Self {
        self.merge_option("json", data, replace);
        self
    }

    /// Alias of [`RequestBuilder::json`].
    pub fn data(&mut self, data: Value, replace: bool) -> &mut Self {
        self.json(data, replace)
    }

    /// Request timeout in seconds, `0` waits indefinitely.
    pub fn timeout(&mut self, seconds: f64) -> Result<&mut Self> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(RequestError::InvalidArgument(format!(
                "timeout must be a non-negative number of seconds, got {}",
                seconds
            )));
        }
        self.options
            .insert(String::from("timeout"), Value::from(seconds));

        Ok(self)
    }

    /// Return JSON objects as a plain [`Payload::Mapping`].
    pub fn assoc(&mut self, flag: bool) -> &mut Self {
        self.return_as_mapping = flag;
        self
    }

    pub fn current_method(&self) -> Option<Method> {
        self.method
    }

    pub fn current_endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn is_assoc(&self) -> bool {
        self.return_as_mapping
    }

    /// Performs the request and decodes the response body.
    ///
    /// Statuses outside of 200-206 become [`RequestError::Api`]. Errors raised by the HTTP client
    /// are returned as [`RequestError::Transport`].
    pub async fn send(&self) -> Result<Payload> {
        let method = self
            .method
            .ok_or_else(|| RequestError::InvalidState(String::from("no HTTP method set")))?;
        let endpoint = self
            .endpoint
            .as_deref()
            .ok_or_else(|| RequestError::InvalidState(String::from("no endpoint set")))?;

        let response = self
            .http_client
            .request(method, endpoint, &self.options)
            .await?;
        let status = response.status_code();
        let body = response.text();

        if !SUCCESS_STATUSES.contains(&status) {
            return Err(ApiError::from_body(status, body).into());
        }

        Ok(Payload::decode(body, self.return_as_mapping)?)
    }

    /// [`RequestBuilder::send`] followed by deserialization into `T`.
    pub async fn send_as<T: DeserializeOwned>(&self) -> Result<T> {
        let payload = self.send().await?;

        Ok(payload.into_typed()?)
    }

    fn merge_option(&mut self, key: &str, value: Value, replace: bool) {
        let merged = match (self.options.remove(key), value) {
            (Some(Value::Object(mut existing)), Value::Object(incoming)) if !replace => {
                existing.extend(incoming);
                Value::Object(existing)
            }
            (_, value) => value,
        };
        self.options.insert(String::from(key), merged);
    }
}
