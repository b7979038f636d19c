//! Extraction proxy server
//!
//! Holds the model API key on the server side and forwards validated
//! requests to a [`GenerativeBackend`]. Responses:
//!
//! | Condition                 | Status | Body                                                |
//! |---------------------------|--------|-----------------------------------------------------|
//! | method is not `POST`      | 405    | `Method Not Allowed`                                |
//! | no API key configured     | 500    | `{"error":"API key not configured on the server."}` |
//! | image or MIME type absent | 400    | `{"error":"Missing image data or mime type."}`      |
//! | backend failed            | 500    | `{"error":"Failed to process image with the Gemini API."}` |
//! | success                   | 200    | the backend's JSON text                             |

use crate::wire::{ErrorBody, ExtractRequest};
use crate::{ExtractError, GenerativeBackend, Result};
use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use warp::http::{Method, StatusCode};
use warp::hyper::body::Bytes;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

/// Primary route
pub const PROXY_PATH: &str = "extract";

const MSG_NO_KEY: &str = "API key not configured on the server.";
const MSG_MISSING_INPUT: &str = "Missing image data or mime type.";
const MSG_BACKEND_FAILED: &str = "Failed to process image with the Gemini API.";

/// Shared server state
pub struct ProxyState {
    api_key: Option<String>,
    backend: Arc<dyn GenerativeBackend>,
}

impl ProxyState {
    /// State with an optional API key; without one every POST is refused
    pub fn new(api_key: Option<String>, backend: Arc<dyn GenerativeBackend>) -> Self {
        let api_key = api_key.filter(|k| !k.trim().is_empty());
        Self { api_key, backend }
    }

    /// Whether an API key is configured
    #[inline]
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl std::fmt::Debug for ProxyState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProxyState")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

/// `/extract` and the legacy `/.netlify/functions/gemini-proxy` route
pub fn routes(state: Arc<ProxyState>) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    let primary = warp::path(PROXY_PATH).and(warp::path::end());
    let legacy = warp::path!(".netlify" / "functions" / "gemini-proxy");
    let with_state = warp::any().map(move || Arc::clone(&state));

    primary
        .or(legacy)
        .unify()
        .and(warp::method())
        .and(warp::body::bytes())
        .and(with_state)
        .and_then(handle)
}

async fn handle(
    method: Method,
    body: Bytes,
    state: Arc<ProxyState>,
) -> std::result::Result<Response, Infallible> {
    Ok(respond(&method, &body, &state).await)
}

async fn respond(method: &Method, body: &[u8], state: &ProxyState) -> Response {
    if method != Method::POST {
        return warp::reply::with_status("Method Not Allowed", StatusCode::METHOD_NOT_ALLOWED).into_response();
    }
    if state.api_key.is_none() {
        tracing::error!("extraction proxy has no API key configured");
        return error_reply(StatusCode::INTERNAL_SERVER_ERROR, MSG_NO_KEY);
    }

    let request: ExtractRequest = if body.is_empty() {
        ExtractRequest::default()
    } else {
        match serde_json::from_slice(body) {
            Ok(request) => request,
            Err(e) => {
                tracing::debug!(error = %e, "malformed extraction request body");
                return error_reply(StatusCode::BAD_REQUEST, MSG_MISSING_INPUT);
            }
        }
    };
    if !request.is_complete() {
        return error_reply(StatusCode::BAD_REQUEST, MSG_MISSING_INPUT);
    }

    match state.backend.generate(&request.image_b64, &request.mime_type).await {
        Ok(text) => {
            tracing::info!(mime_type = %request.mime_type, "extraction completed");
            warp::reply::with_header(text, "content-type", "application/json").into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "backend extraction failed");
            error_reply(StatusCode::INTERNAL_SERVER_ERROR, MSG_BACKEND_FAILED)
        }
    }
}

fn error_reply(status: StatusCode, message: &str) -> Response {
    warp::reply::with_status(warp::reply::json(&ErrorBody::new(message)), status).into_response()
}

/// Bind `addr` and return the bound address plus the server future
///
/// The server stops once `shutdown` resolves. Port 0 picks a free port.
pub fn bind(
    addr: SocketAddr,
    state: Arc<ProxyState>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(SocketAddr, impl Future<Output = ()>)> {
    let (bound, server) = warp::serve(routes(state).with(warp::trace::request()))
        .try_bind_with_graceful_shutdown(addr, shutdown)
        .map_err(|e| ExtractError::Bind(e.to_string()))?;
    tracing::info!(addr = %bound, "extraction proxy listening");
    Ok((bound, server))
}
