//! HTTP API Client
//!
//! Envelope-aware helpers for communicating with the cooperative REST API.
//! Every response body is a JSON envelope of shape `{status, data: {...}}`;
//! error responses carry `{status, message}` instead.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;

/// Default API base URL, overridable at build time
pub const DEFAULT_API_BASE: &str = match option_env!("SACCO_API_BASE") {
    Some(url) => url,
    None => "http://localhost:8080/api/v1",
};

const API_URL_KEY: &str = "sacco_api_url";
const TOKEN_KEY: &str = "sacco_token";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Get the API base URL. A local-storage override wins over the
/// build-time default.
pub fn get_api_base() -> String {
    let url = local_storage()
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Bearer token for the current session, if any
pub fn auth_token() -> Option<String> {
    local_storage()?.get_item(TOKEN_KEY).ok()?
}

pub fn set_auth_token(token: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(TOKEN_KEY, token);
    }
}

pub fn clear_auth_token() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(TOKEN_KEY);
    }
}

// ============ Envelope ============

#[derive(Debug, serde::Deserialize)]
struct Envelope<T> {
    #[allow(dead_code)]
    status: String,
    data: T,
}

#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

fn authorized(builder: RequestBuilder) -> RequestBuilder {
    match auth_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

async fn parse_envelope<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if !response.ok() {
        let body: ErrorBody = response
            .json()
            .await
            .unwrap_or(ErrorBody { message: String::new() });
        return Err(if body.message.is_empty() {
            format!("Request failed with status {}", response.status())
        } else {
            body.message
        });
    }

    let envelope: Envelope<T> = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    Ok(envelope.data)
}

// ============ Request Helpers ============

/// GET a path and unwrap the envelope
pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let url = format!("{}{}", get_api_base(), path);

    let response = authorized(Request::get(&url))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    parse_envelope(response).await
}

/// POST a JSON body and unwrap the envelope
pub async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
    path: &str,
    body: &B,
) -> Result<T, String> {
    let url = format!("{}{}", get_api_base(), path);

    let response = authorized(Request::post(&url))
        .json(body)
        .map_err(|e| format!("Request build error: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    parse_envelope(response).await
}

/// POST with an empty body, for action endpoints like approve/pay
pub async fn post_empty<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let url = format!("{}{}", get_api_base(), path);

    let response = authorized(Request::post(&url))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    parse_envelope(response).await
}

/// DELETE a path and unwrap the envelope
pub async fn delete_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let url = format!("{}{}", get_api_base(), path);

    let response = authorized(Request::delete(&url))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    parse_envelope(response).await
}

/// GET raw bytes, aborting the request if it exceeds the timeout. Used for
/// report downloads, where a hung response should not pin the page.
pub async fn get_binary_with_timeout(path: &str, timeout_ms: u32) -> Result<Vec<u8>, String> {
    let url = format!("{}{}", get_api_base(), path);

    let controller = web_sys::AbortController::new()
        .map_err(|e| format!("Abort setup error: {:?}", e))?;
    let signal = controller.signal();
    let abort = gloo_timers::callback::Timeout::new(timeout_ms, move || controller.abort());

    let result = authorized(Request::get(&url))
        .abort_signal(Some(&signal))
        .send()
        .await;
    abort.cancel();

    let response = result.map_err(|e| format!("Network error: {}", e))?;
    if !response.ok() {
        return Err(format!("Download failed with status {}", response.status()));
    }

    response
        .binary()
        .await
        .map_err(|e| format!("Download read error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_unwraps_data() {
        let envelope: Envelope<Vec<u32>> =
            serde_json::from_str(r#"{"status":"ok","data":[1,2,3]}"#).unwrap();
        assert_eq!(envelope.data, vec![1, 2, 3]);
    }

    #[test]
    fn test_error_body_message_defaults_empty() {
        let body: ErrorBody = serde_json::from_str(r#"{"status":"error"}"#).unwrap();
        assert!(body.message.is_empty());

        let body: ErrorBody =
            serde_json::from_str(r#"{"status":"error","message":"Invalid token"}"#).unwrap();
        assert_eq!(body.message, "Invalid token");
    }
}
