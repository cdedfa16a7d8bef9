use bytes::{Bytes, BytesMut};
use http::header::{HeaderName, HeaderValue, CONTENT_TYPE, X_CONTENT_TYPE_OPTIONS};
use http::{HeaderMap, Response, StatusCode};
use std::borrow::Cow;
use std::fmt;

/// In-memory response sink handed to every [`Handler`](crate::handler::Handler).
///
/// Records the status, headers and body a handler produces. The transport
/// turns it into a wire response with [`ResponseWriter::into_response`].
/// The status defaults to `200 OK` when a handler writes a body without
/// setting one.
#[derive(Debug, Default)]
pub struct ResponseWriter {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: BytesMut,
}

impl ResponseWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Status written so far, `200 OK` if none was set.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status.unwrap_or(StatusCode::OK)
    }

    pub fn set_status(&mut self, status: StatusCode) {
        self.status = Some(status);
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Insert or replace a header.
    pub fn set_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }

    /// Append raw bytes to the body.
    pub fn write_bytes(&mut self, chunk: &[u8]) {
        self.body.extend_from_slice(chunk);
    }

    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Body decoded as UTF-8, lossily.
    #[must_use]
    pub fn body_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Replace whatever was written with a plain-text error reply.
    ///
    /// The body is `message` followed by a newline.
    pub fn error(&mut self, status: StatusCode, message: &str) {
        self.status = Some(status);
        self.headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        self.headers
            .insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
        self.body.clear();
        self.body.extend_from_slice(message.as_bytes());
        self.body.extend_from_slice(b"\n");
    }

    /// Write a JSON body with `Content-Type: application/json`.
    pub fn json(&mut self, status: StatusCode, body: &serde_json::Value) -> serde_json::Result<()> {
        let encoded = serde_json::to_vec(body)?;
        self.status = Some(status);
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.body.clear();
        self.body.extend_from_slice(&encoded);
        Ok(())
    }

    /// Freeze into an `http::Response`.
    #[must_use]
    pub fn into_response(self) -> Response<Bytes> {
        let mut response = Response::new(self.body.freeze());
        *response.status_mut() = self.status.unwrap_or(StatusCode::OK);
        *response.headers_mut() = self.headers;
        response
    }
}

impl fmt::Write for ResponseWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.body.extend_from_slice(s.as_bytes());
        Ok(())
    }
}
