//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, transaction)
//! 2. `TraceLayer` (request span via [`make_request_span`])
//! 3. Request ID (propagate or mint `x-request-id`)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, RequestId, make_request_span, request_id_middleware};
