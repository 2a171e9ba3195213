//! HTTP client utilities.
//!
//! Builds the shared `reqwest::Client` from configuration and applies
//! per-request extras.

use reqwest::{Client, RequestBuilder};
use std::collections::HashMap;

use crate::options::ClientConfig;

/// Build a configured HTTP client from the client configuration.
///
/// This applies common configuration like timeouts and proxies.
pub fn build_http_client(config: &ClientConfig) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder();

    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }

    if let Some(proxy_url) = &config.proxy {
        if let Ok(proxy) = reqwest::Proxy::all(proxy_url) {
            builder = builder.proxy(proxy);
        }
    }

    builder.build()
}

/// Add extra headers to a request if any are configured.
pub fn add_extra_headers(
    mut request: RequestBuilder,
    extra_headers: &Option<HashMap<String, String>>,
) -> RequestBuilder {
    if let Some(headers) = extra_headers {
        for (key, value) in headers {
            request = request.header(key, value);
        }
    }
    request
}
