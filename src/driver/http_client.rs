// src/driver/http_client.rs
use core::fmt::Debug;
use std::time::Duration;

use crate::common::error::FetchError;

/// 请求超时
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((key, value.into()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// 阻塞式HTTP客户端
///
/// 同一时刻只有一个请求在途，调用方等待响应返回后再继续。
/// 任何状态码都作为响应返回，由调用方判断
pub trait HttpClient: Debug {
    fn post(&mut self, request: &HttpRequest) -> Result<HttpResponse, FetchError>;
}

pub struct ReqwestHttpClient {
    client: reqwest::blocking::Client,
}

impl Debug for ReqwestHttpClient {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "ReqwestHttpClient")
    }
}

impl ReqwestHttpClient {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                log::error!("Failed to build HTTP client: {}", e);
                FetchError::Transport(e.to_string())
            })?;
        Ok(Self { client })
    }
}

impl HttpClient for ReqwestHttpClient {
    fn post(&mut self, request: &HttpRequest) -> Result<HttpResponse, FetchError> {
        let mut builder = self.client.post(&request.url);

        for (key, value) in &request.headers {
            builder = builder.header(*key, value.as_str());
        }

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().map_err(|e| {
            log::error!("HTTP POST {} failed: {}", request.url, e);
            FetchError::Transport(e.to_string())
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| FetchError::Transport(format!("read body: {}", e)))?;

        log::debug!("HTTP POST {} -> {}", request.url, status);
        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_request_with_headers_and_body() {
        let request = HttpRequest::new("http://localhost:8086/api/v2/query")
            .with_header("Authorization", "Token abc")
            .with_body("{}");

        assert_eq!(request.header("authorization"), Some("Token abc"));
        assert_eq!(request.header("Accept"), None);
        assert_eq!(request.body.as_deref(), Some(&b"{}"[..]));
    }

    #[test]
    fn unreachable_host_is_transport_error() {
        let mut client = ReqwestHttpClient::new().unwrap();
        let request = HttpRequest::new("http://127.0.0.1:9/");
        let error = client.post(&request).unwrap_err();
        assert!(matches!(error, FetchError::Transport(_)));
    }
}
