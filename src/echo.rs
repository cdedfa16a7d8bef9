use crate::handler::{Handler, HandlerResult, Request};
use crate::server::{parse_query, ResponseWriter};
use http::StatusCode;
use serde_json::json;

/// Diagnostic handler: replies with what it was asked, as JSON.
///
/// The query it reports is the one the router rewrote, so path parameters
/// show up merged with the original query values.
#[derive(Debug, Clone)]
pub struct EchoHandler {
    name: String,
}

impl EchoHandler {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Handler for EchoHandler {
    fn serve(&self, req: &mut Request, res: &mut ResponseWriter) -> HandlerResult {
        let body = json!({
            "handler": self.name,
            "method": req.method().as_str(),
            "path": req.uri().path(),
            "query": parse_query(req.uri().query().unwrap_or("")),
        });
        res.json(StatusCode::OK, &body)?;
        Ok(())
    }
}
