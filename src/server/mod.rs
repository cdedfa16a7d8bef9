//! Request and response plumbing shared by routes and handlers: query-string
//! parsing and merging, host extraction, and the in-memory response sink.

pub mod request;
pub mod response;

pub use request::{
    decode_path, encode_query, merge_params, parse_query, request_host, set_query, strip_port,
    Params, QueryRewriteError,
};
pub use response::ResponseWriter;
