pub mod error;
pub mod http;
pub mod okta;
pub mod settings;

pub use crate::error::{ApiError, RequestError};
pub use crate::http::api_client::ApiClient;
pub use crate::http::http_client::{HttpClient, HttpResponse, Method, Options};
pub use crate::okta::api_responses::{OktaError, Payload};
pub use crate::okta::request_builder::RequestBuilder;
