//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method/path matching, body
//! limits, and hand-off to the compute dispatcher.

use http_body_util::{BodyExt, Full};
use hyper::body::Bytes;
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::sync::Arc;

use crate::config::AppState;
use crate::dispatch::Operation;
use crate::error::ApiError;
use crate::logger;
use crate::response::{
    self, health_response, json_response, not_found, options_response, payload_too_large,
};

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let access_log = state
        .cached_access_log
        .load(std::sync::atomic::Ordering::Relaxed);

    logger::log_headers_count(req.headers().len(), state.config.logging.show_headers);

    let email = &state.config.app.official_email;
    let routes = &state.config.routes;

    let mut response = match (&method, path.as_str()) {
        (&Method::POST, p) if p == routes.compute_path => {
            // Reject oversized bodies up front from the declared length
            if let Some(resp) = check_body_size(&req, state.config.http.max_body_size, email) {
                resp
            } else {
                match req.collect().await {
                    Ok(collected) => handle_compute(&collected.to_bytes(), &state).await,
                    Err(e) => {
                        logger::log_error(&format!("Failed to read request body: {e}"));
                        failure_response(email, &ApiError::InvalidBody)
                    }
                }
            }
        }
        (&Method::GET, p) if routes.health_enabled && p == routes.health_path => health_response(),
        (&Method::OPTIONS, _) => options_response(state.config.http.enable_cors),
        _ => not_found(email),
    };

    if state.config.http.enable_cors {
        apply_cors(&mut response);
    }
    if let Ok(name) = state.config.http.server_name.parse() {
        response.headers_mut().insert("Server", name);
    }

    if access_log {
        logger::log_request(method.as_str(), &path, response.status().as_u16());
    }

    Ok(response)
}

/// Run the dispatcher over a collected body and wrap the outcome
async fn handle_compute(body: &Bytes, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    let email = &state.config.app.official_email;

    let operation = match Operation::parse(body) {
        Ok(op) => op,
        Err(e) => return failure_response(email, &e),
    };

    match operation.execute(&state.ai).await {
        Ok(data) => json_response(StatusCode::OK, &response::Envelope::success(email, data)),
        Err(e) => {
            // Server-side detail is for operators only
            if e.status().is_server_error() {
                logger::log_error(&e.to_string());
            }
            failure_response(email, &e)
        }
    }
}

fn failure_response(email: &str, error: &ApiError) -> Response<Full<Bytes>> {
    json_response(error.status(), &response::Envelope::failure(email, error))
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(
    req: &Request<hyper::body::Incoming>,
    max_body_size: u64,
    email: &str,
) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    let size_str = match content_length.to_str() {
        Ok(s) => s,
        Err(_) => {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            return None;
        }
    };
    match size_str.parse::<u64>() {
        Ok(size) if size > max_body_size => {
            logger::log_error(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            Some(payload_too_large(email))
        }
        Err(_) => {
            logger::log_warning(&format!(
                "Invalid Content-Length value: '{size_str}', skipping size check"
            ));
            None
        }
        _ => None,
    }
}

fn apply_cors(response: &mut Response<Full<Bytes>>) {
    if let Ok(origin) = "*".parse() {
        response
            .headers_mut()
            .insert("Access-Control-Allow-Origin", origin);
    }
}
