use crate::utils;
use anyhow::Result;
use clap::Parser;
use okta_request::settings::AppConfig;
use okta_request::{ApiClient, RequestBuilder, RequestError};
use serde_json::{Map, Value};

#[derive(Parser)]
pub struct Request {
    /// GET, POST, PUT or DELETE
    method: String,
    /// Path relative to the org url, or an absolute url
    endpoint: String,
    /// Query parameter, may be repeated
    #[arg(short, long, value_parser = utils::key_value)]
    query: Vec<(String, String)>,
    /// JSON request body
    #[arg(short, long)]
    data: Option<String>,
    /// Extra request header, may be repeated
    #[arg(short = 'H', long, value_parser = utils::key_value)]
    header: Vec<(String, String)>,
    /// Timeout in seconds, 0 waits indefinitely
    #[arg(short, long)]
    timeout: Option<f64>,
    /// Print JSON objects as plain key/value mappings
    #[arg(long)]
    assoc: bool,
}

impl Request {
    pub async fn run(&self, settings: &AppConfig) -> Result<()> {
        let client = ApiClient::from_config(settings)?;
        let mut builder = RequestBuilder::new(&client);

        builder
            .method(self.method.as_str())?
            .endpoint(self.endpoint.as_str())
            .assoc(self.assoc);

        if !self.query.is_empty() {
            builder.query(utils::to_object(&self.query), false);
        }

        if let Some(data) = &self.data {
            let body: Value = serde_json::from_str(data.as_str())?;
            builder.json(body, true);
        }

        if !self.header.is_empty() {
            let headers: Map<String, Value> = self
                .header
                .iter()
                .map(|(key, value)| (key.clone(), Value::String(value.clone())))
                .collect();
            builder.option("headers", Value::Object(headers));
        }

        if let Some(timeout) = self.timeout {
            builder.timeout(timeout)?;
        }

        match builder.send().await {
            Ok(payload) => {
                println!("{}", serde_json::to_string_pretty(&payload.into_value())?);

                Ok(())
            }
            Err(RequestError::Api(error)) => {
                if let Some(payload) = error.payload() {
                    eprintln!("{}", serde_json::to_string_pretty(payload)?);
                }

                Err(error.into())
            }
            Err(error) => Err(error.into()),
        }
    }
}
