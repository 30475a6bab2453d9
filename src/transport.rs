//! The seam between the client and the network.
//!
//! [`Client`](crate::Client) never talks to the network directly: it hands a fully prepared
//! [`Request`] to a [`Transport`] and gets back a status and an unread body. [`HttpTransport`]
//! is the production implementation; tests swap in a mock or point it at a local server.

use crate::error::BoxError;

use reqwest::blocking::{Client, ClientBuilder};
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode};

use std::fmt;
use std::io::Read;
use std::time::Duration;

/// An HTTP request ready to be sent.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
}

/// Status and body of an HTTP response. The body has not been read yet and is released when the
/// response is dropped.
pub struct Response {
    pub status: StatusCode,
    pub body: Box<dyn Read + Send>,
}

impl Response {
    pub fn new(status: StatusCode, body: impl Read + Send + 'static) -> Self {
        Response {
            status,
            body: Box::new(body),
        }
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

/// Executes one request and returns the raw response, or the error that prevented one.
#[cfg_attr(test, mockall::automock)]
pub trait Transport: Send + Sync {
    fn execute(&self, request: Request) -> Result<Response, BoxError>;
}

/// Blocking `reqwest` transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Option<Duration>) -> Result<HttpTransport, BoxError> {
        let mut builder = ClientBuilder::new().gzip(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(HttpTransport {
            http_client: builder.build()?,
        })
    }

    /// Wrap an already configured `reqwest` client.
    pub fn with_client(http_client: Client) -> HttpTransport {
        HttpTransport { http_client }
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: Request) -> Result<Response, BoxError> {
        let res = self
            .http_client
            .request(request.method, &request.url)
            .headers(request.headers)
            .send()?;
        Ok(Response::new(res.status(), res))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    #[test]
    fn response_body_is_readable() {
        let mut res = Response::new(StatusCode::OK, Cursor::new(b"{}".to_vec()));
        let mut body = String::new();
        res.body.read_to_string(&mut body).unwrap();
        assert_eq!(body, "{}");
    }

    #[test]
    fn response_debug_shows_status() {
        let res = Response::new(StatusCode::NOT_FOUND, std::io::empty());
        assert!(format!("{res:?}").contains("404"));
    }

    #[test]
    fn http_transport_builds_with_timeout() {
        assert!(HttpTransport::new(Some(Duration::from_secs(5))).is_ok());
    }

    #[test]
    fn http_transport_reports_connection_failure() {
        let transport = HttpTransport::new(Some(Duration::from_secs(2))).unwrap();
        let request = Request {
            method: Method::GET,
            url: "http://127.0.0.1:1/forecast".to_string(),
            headers: HeaderMap::new(),
        };
        assert!(transport.execute(request).is_err());
    }
}
