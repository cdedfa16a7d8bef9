#![allow(dead_code)]

use bytes::Bytes;
use http::Method;
use routemux::{handler_fn, Handler, Request, ResponseWriter};
use std::fmt::Write;

/// Build a request and run it through `handler`.
pub fn send(handler: &dyn Handler, method: Method, uri: &str) -> ResponseWriter {
    let mut req = http::Request::builder()
        .method(method)
        .uri(uri)
        .body(Bytes::new())
        .unwrap();
    let mut res = ResponseWriter::new();
    handler.serve(&mut req, &mut res).unwrap();
    res
}

pub fn get(handler: &dyn Handler, uri: &str) -> ResponseWriter {
    send(handler, Method::GET, uri)
}

/// Handler replying with a fixed body.
pub fn reply(body: &'static str) -> impl Handler {
    handler_fn(move |_req: &mut Request, res: &mut ResponseWriter| {
        res.write_str(body)?;
        Ok(())
    })
}

/// Handler replying with the (rewritten) query string.
pub fn query_echo() -> impl Handler {
    handler_fn(|req: &mut Request, res: &mut ResponseWriter| {
        res.write_str(req.uri().query().unwrap_or(""))?;
        Ok(())
    })
}

pub mod temp_files {
    use std::io::Write;

    /// Write `content` to a temporary file with the given extension.
    pub fn create_temp_table(content: &str, ext: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .prefix("routemux_test_")
            .suffix(&format!(".{ext}"))
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }
}
