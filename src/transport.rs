//! Transport seam and the default HTTP implementation
//!
//! The caching layer treats the network as an opaque async call behind the
//! [`Transport`] trait: it hands over a request descriptor and gets back a
//! raw response or an error. [`HttpTransport`] is the default implementation
//! over `reqwest`; tests substitute scripted transports through the same
//! trait.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::error::FetchError;
use crate::request::RequestDescriptor;

/// Raw response produced by a transport before decoding
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code, or 200 for transports without one
    ///
    /// The caching layer never consults this: failures surface through the
    /// error channel and anything else goes to the decoder unchanged. The
    /// field is carried for custom transports and diagnostics.
    pub status: u16,
    /// Response body text
    pub body: String,
}

/// Opaque async request call
///
/// Implementations fail through [`FetchError`]; the controller treats every
/// failure uniformly, so transports are free to map their own error types
/// onto [`FetchError::Transport`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request described by `request` and returns the raw response
    async fn send(&self, request: &RequestDescriptor) -> Result<RawResponse, FetchError>;
}

/// Decodes a raw response body into the target type
pub fn decode<T: DeserializeOwned>(raw: &RawResponse) -> Result<T, FetchError> {
    Ok(serde_json::from_str(&raw.body)?)
}

/// Default transport over a reqwest HTTP client
///
/// Status codes are not interpreted here: an error page simply fails to
/// decode downstream, keeping the failure channel uniform.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Creates a transport with a fresh HTTP client
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    /// Creates a transport reusing an existing HTTP client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &RequestDescriptor) -> Result<RawResponse, FetchError> {
        let mut builder = self
            .client
            .request(request.method.into(), &request.url)
            .query(&request.query);

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(RawResponse { status, body })
    }
}
