//! REST Client
//!
//! Issues JSON requests against the backend under a fixed base path and
//! attaches the CSRF token read once at construction. Every outcome is
//! normalized into `OperationResult`; nothing escapes as a panic.

use std::rc::Rc;

use async_trait::async_trait;
use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

// ========================
// Configuration
// ========================

/// Client settings; every field falls back to the Django defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub csrf_cookie: String,
    pub csrf_header: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "/api".to_string(),
            csrf_cookie: "csrftoken".to_string(),
            csrf_header: "X-CSRFToken".to_string(),
        }
    }
}

// ========================
// Transport seam
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and reports the raw response.
///
/// Implementations only fail for transport problems (connection refused,
/// aborted fetch); HTTP error statuses are returned as responses.
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String>;
}

// ========================
// Errors
// ========================

/// Failure kinds; callers only ever show the message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("{0}")]
    Network(String),
    #[error("{message}")]
    Http { status: u16, message: String },
    #[error("{0}")]
    Parse(String),
}

pub type OperationResult<T> = Result<T, ApiError>;

// ========================
// Client
// ========================

#[derive(Clone)]
pub struct ApiClient {
    config: ClientConfig,
    csrf_token: Option<String>,
    transport: Rc<dyn HttpTransport>,
}

impl ApiClient {
    /// `cookies` is the raw `document.cookie` string; the token is extracted once here.
    pub fn new(config: ClientConfig, transport: Rc<dyn HttpTransport>, cookies: &str) -> Self {
        let csrf_token = csrf_token_from_cookies(cookies, &config.csrf_cookie);
        if csrf_token.is_none() {
            log::debug!("[API] no {} cookie present, writes will be sent without a CSRF token", config.csrf_cookie);
        }
        Self { config, csrf_token, transport }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }

    pub async fn request(&self, endpoint: &str, method: Method, body: Option<&Value>) -> OperationResult<Value> {
        let url = format!("{}{}", self.config.base_url, endpoint);

        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(token) = &self.csrf_token {
            headers.push((self.config.csrf_header.clone(), token.clone()));
        }

        let body = match body {
            Some(value) => Some(serde_json::to_string(value).map_err(|e| ApiError::Parse(e.to_string()))?),
            None => None,
        };

        log::debug!("[API] {} {}", method.as_str(), url);
        let request = HttpRequest { method, url: url.clone(), headers, body };

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                log::warn!("[API] {} {} failed: {}", method.as_str(), url, e);
                return Err(ApiError::Network(e));
            }
        };

        if !response.is_success() {
            let message = http_failure_message(&response);
            log::warn!("[API] {} {} -> {}: {}", method.as_str(), url, response.status, message);
            return Err(ApiError::Http { status: response.status, message });
        }

        parse_body(&response.body).map_err(|e| {
            log::warn!("[API] {} {} returned malformed JSON: {}", method.as_str(), url, e);
            e
        })
    }

    pub async fn get(&self, endpoint: &str) -> OperationResult<Value> {
        self.request(endpoint, Method::Get, None).await
    }

    pub async fn post(&self, endpoint: &str, data: &Value) -> OperationResult<Value> {
        self.request(endpoint, Method::Post, Some(data)).await
    }

    pub async fn put(&self, endpoint: &str, data: &Value) -> OperationResult<Value> {
        self.request(endpoint, Method::Put, Some(data)).await
    }

    pub async fn patch(&self, endpoint: &str, data: &Value) -> OperationResult<Value> {
        self.request(endpoint, Method::Patch, Some(data)).await
    }

    pub async fn delete(&self, endpoint: &str) -> OperationResult<Value> {
        self.request(endpoint, Method::Delete, None).await
    }
}

/// Find `name` in a `document.cookie` style string and percent-decode its value.
pub fn csrf_token_from_cookies(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix(name)?.strip_prefix('='))
        .map(|raw| percent_decode_str(raw).decode_utf8_lossy().into_owned())
}

fn http_failure_message(response: &HttpResponse) -> String {
    let server_message = serde_json::from_str::<Value>(&response.body).ok().and_then(|body| {
        ["detail", "error"]
            .iter()
            .find_map(|key| body.get(*key).and_then(Value::as_str).map(str::to_string))
    });

    match server_message {
        Some(message) => message,
        None if response.status_text.is_empty() => format!("HTTP error! status: {}", response.status),
        None => format!("HTTP error! status: {} {}", response.status, response.status_text),
    }
}

fn parse_body(body: &str) -> OperationResult<Value> {
    // 204 No Content and friends
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|e| ApiError::Parse(format!("Invalid JSON response: {}", e)))
}
