//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span and logging)
//! 3. Request ID (add unique ID to each request)
//! 4. Security headers (CSP, framing, caching)
//! 5. Session layer (tower-sessions over a bounded `moka` store)
//! 6. Session context provider (UI and API routes only)

pub mod context;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use context::{ContextError, SessionContextHandle, session_context_middleware};
pub use request_id::{RequestId, request_id_middleware};
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
