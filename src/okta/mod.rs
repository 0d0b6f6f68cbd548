pub mod api_responses;
pub mod request_builder;
