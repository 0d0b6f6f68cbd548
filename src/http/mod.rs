pub mod api_client;
pub mod http_client;
