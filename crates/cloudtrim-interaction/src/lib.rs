//! Network side of the CloudTrim client.

pub mod http_api_client;

pub use crate::http_api_client::HttpApiClient;
