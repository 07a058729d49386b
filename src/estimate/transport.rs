use gloo_net::http::Request;
use thiserror::Error;
use web_sys::RequestMode;

use crate::estimate::record::{BodyEncoding, EncodedBody};

/// The request left the browser without a transport-level exception.
///
/// The sheet endpoint is cross-origin and answers with an opaque response,
/// so this says nothing about whether the remote side stored the data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sent {
    pub endpoint: String,
    pub encoding: BodyEncoding,
    pub bytes: usize,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    #[error("no estimate endpoint configured")]
    MissingEndpoint,
    #[error("request to {endpoint} failed: {reason}")]
    Network { endpoint: String, reason: String },
}

/// Sends one encoded submission. Implementations must not retry.
pub trait Transport {
    async fn send(&self, endpoint: &str, body: EncodedBody) -> Result<Sent, TransportFailure>;
}

/// `fetch` in `no-cors` mode through gloo-net.
#[derive(Clone, Copy, Debug, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn send(&self, endpoint: &str, body: EncodedBody) -> Result<Sent, TransportFailure> {
        let bytes = body.payload.len();
        let encoding = body.encoding;

        // The response is opaque in no-cors mode; only a thrown fetch counts.
        Request::post(endpoint)
            .mode(RequestMode::NoCors)
            .header("Content-Type", body.content_type())
            .body(body.payload)
            .send()
            .await
            .map_err(|e| TransportFailure::Network {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Sent {
            endpoint: endpoint.to_string(),
            encoding,
            bytes,
        })
    }
}
